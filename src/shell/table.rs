//! Two-column listing for "Show All".
//!
//! Widths are measured in terminal columns (`unicode-width`), not bytes or
//! chars, so names like "pepper - jalapeño" line up.

use unicode_width::UnicodeWidthStr;

use crate::core::catalog::Catalog;

const CODE_HEADER: &str = "PLU";
const NAME_HEADER: &str = "Produce Name";
const MIN_CODE_WIDTH: usize = 4;
const MIN_NAME_WIDTH: usize = 12;
const GAP: &str = "  ";

/// Rows sorted by name (case-insensitive), with a header and rule.
/// Returns None for an empty catalog.
pub fn render(catalog: &Catalog) -> Option<Vec<String>> {
    if catalog.is_empty() {
        return None;
    }

    let mut rows: Vec<(&str, &str)> = catalog.all().collect();
    rows.sort_by_key(|(_, name)| name.to_lowercase());

    let code_width = rows
        .iter()
        .map(|(code, _)| code.width())
        .chain([MIN_CODE_WIDTH])
        .max()
        .unwrap_or(MIN_CODE_WIDTH);
    let name_width = rows
        .iter()
        .map(|(_, name)| name.width())
        .chain([MIN_NAME_WIDTH])
        .max()
        .unwrap_or(MIN_NAME_WIDTH);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(row(CODE_HEADER, code_width, NAME_HEADER, name_width));
    lines.push("-".repeat(code_width + GAP.len() + name_width));
    for (code, name) in rows {
        lines.push(row(code, code_width, name, name_width));
    }
    Some(lines)
}

fn row(code: &str, code_width: usize, name: &str, name_width: usize) -> String {
    format!(
        "{}{GAP}{}",
        pad(code, code_width),
        pad(name, name_width)
    )
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}
