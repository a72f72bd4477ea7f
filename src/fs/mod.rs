//! Filesystem discovery module.
//!
//! Provides:
//! - Extension filtering over a directory tree
//! - Basename pairing across a key extension and paired extensions
//! - Async variants of both on `tokio::fs`
//! - File name helpers
//! - Precondition checks shared by every scan

pub mod filter;
pub mod naming;
pub mod pairs;
pub mod stream;
pub mod validation;

pub use filter::{by_ext, ByExt};
pub use naming::{ends_with_any, split_extension};
pub use pairs::{by_ext_first_pairs, FirstPairs, Pair};
pub use stream::{by_ext_async, by_ext_first_pairs_async};
pub use validation::{validate_extensions, validate_pairing, validate_root};
