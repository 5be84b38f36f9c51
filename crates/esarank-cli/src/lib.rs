//! # esarank CLI
//!
//! Command-line entry point for esarank.
//!
//! Resolves configuration from a YAML file, the environment and flags, loads
//! posts from a JSON snapshot or the esa.io API, and writes the single-year and
//! multi-year ranking charts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod args;
pub mod error;
pub mod pipeline;

pub use args::*;
pub use error::*;
pub use pipeline::*;
