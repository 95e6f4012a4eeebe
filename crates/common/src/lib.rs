//! Shared building blocks for the quote service crates.
//! - Logging initialisation (`utils::logging`)
//! - Startup directory checks (`env`)
//! - Small response types shared by handlers (`types`)

pub mod types;
pub mod utils;
pub mod env;
