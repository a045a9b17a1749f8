//! Common utilities for the Wombat crates.
//!
//! This crate provides shared infrastructure used by the parser and the CLI:
//! - **Warning System** - colored, deduplicated terminal output for
//!   recognized-but-unsupported selector features

pub mod warning;
