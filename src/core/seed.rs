//! Built-in default catalog, used when no custom files exist or custom data
//! is disabled.

use log::warn;

use super::catalog::Catalog;

/// `(code, name)` pairs. Names are already normalized.
pub const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("4131", "apple - fuji"),
    ("4133", "apple - gala"),
    ("4020", "apple - golden delicious"),
    ("4017", "apple - granny smith"),
    ("3283", "apple - honeycrisp"),
    ("4015", "apple - red delicious"),
    ("4046", "avocado - hass"),
    ("4011", "banana"),
    ("4060", "broccoli"),
    ("4069", "cabbage - green"),
    ("4050", "cantaloupe"),
    ("4094", "carrot"),
    ("4070", "celery"),
    ("4261", "coconut"),
    ("4078", "corn - yellow"),
    ("4062", "cucumber"),
    ("4081", "eggplant"),
    ("4608", "garlic"),
    ("4612", "ginger root"),
    ("4022", "grapes - green seedless"),
    ("4023", "grapes - red seedless"),
    ("4068", "green onion"),
    ("4034", "honeydew"),
    ("4030", "kiwi"),
    ("4053", "lemon"),
    ("4061", "lettuce - iceberg"),
    ("4640", "lettuce - romaine"),
    ("4048", "lime"),
    ("4051", "mango"),
    ("4082", "onion - red"),
    ("4166", "onion - sweet"),
    ("4093", "onion - yellow"),
    ("4012", "orange - navel"),
    ("4409", "pear - bartlett"),
    ("4413", "pear - bosc"),
    ("4065", "pepper - green bell"),
    ("4693", "pepper - jalapeño"),
    ("4088", "pepper - red bell"),
    ("4689", "pepper - yellow bell"),
    ("4430", "pineapple"),
    ("4072", "potato - russet"),
    ("4816", "sweet potato"),
    ("4664", "tomato - on the vine"),
    ("4087", "tomato - roma"),
    ("4032", "watermelon"),
    ("4067", "zucchini"),
];

/// Builds the default catalog from [`DEFAULT_ENTRIES`].
pub fn default_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for (code, name) in DEFAULT_ENTRIES {
        if let Err(e) = catalog.add(name, code) {
            warn!("Skipping default entry {code} - {name}: {e}");
        }
    }
    catalog
}
