//! Utility functions for formatting values for display.

pub mod format;

pub use format::{format_date, format_optional, parse_date, truncate_string};
