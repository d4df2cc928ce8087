//! CLI command integration tests

pub mod add_tests;
pub mod find_tests;
