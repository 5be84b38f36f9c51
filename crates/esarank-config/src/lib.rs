//! # esarank Config
//!
//! Configuration schema, defaults, loading and validation for esarank.
//!
//! Settings come from an optional YAML file, then environment variables
//! (optionally read from a `.env` file), then command-line overrides. The
//! result is validated once, before any data is loaded.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod author_list;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use author_list::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
