//! Utility functions and helpers.
//!
//! - [`paths`]: lexical path resolution and reference path rendering

/// Path manipulation and resolution utilities
pub mod paths;
