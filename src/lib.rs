//! PLU Lookup library exports for testing

pub mod core;
pub mod shell;

#[cfg(test)]
pub mod test_support;
