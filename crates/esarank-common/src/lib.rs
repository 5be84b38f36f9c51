//! # esarank Common
//!
//! Shared types, errors, logging and the esa.io client for esarank.
//!
//! This crate provides the foundational data model (posts, authors and the
//! collection that owns them) used by every other crate in the workspace,
//! together with the ambient plumbing that loads it: JSON snapshots and the
//! paginated esa.io API.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod error;
pub mod esa;
pub mod logging;
pub mod snapshot;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RankingError, Result};
pub use esa::{EsaClient, EsaConfig, EsaPost, EsaPostsPage};
pub use logging::{init_dev_logging, init_logging, LoggingConfig};
pub use snapshot::{load_snapshot, save_snapshot};
pub use types::*;
