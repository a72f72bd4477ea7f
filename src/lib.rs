//! path-gen - lazy file discovery by extension.
//!
//! This library finds files under a directory in two ways:
//!
//! - [`by_ext`]: every file whose name ends with one of a set of suffixes
//! - [`by_ext_first_pairs`]: files sharing a basename across a key extension
//!   and a set of paired extensions, one pair per basename per directory
//!
//! Both return lazy iterators; async streams are available through
//! [`by_ext_async`] and [`by_ext_first_pairs_async`].
//!
//! # Example
//!
//! ```no_run
//! use path_gen::{by_ext_first_pairs, Result};
//!
//! fn main() -> Result<()> {
//!     // Pair every photo with its sidecar, if it has one
//!     for pair in by_ext_first_pairs("photos", "jpg", &["xmp", "json"], true)? {
//!         let (photo, sidecar) = pair?;
//!         println!("{} -> {}", photo.display(), sidecar.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fs;

// Re-exports for convenience
pub use error::{Error, Result};
pub use fs::{
    by_ext, by_ext_async, by_ext_first_pairs, by_ext_first_pairs_async, ByExt, FirstPairs, Pair,
};
