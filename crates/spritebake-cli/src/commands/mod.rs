//! CLI command implementations

pub mod combine;
pub mod json_output;
pub mod toggle;
pub mod validate;

#[cfg(test)]
mod test_support;
