//! # testset-legacy
//!
//! Conversion of legacy test set trees into the current YAML layout.
//!
//! The legacy layout keeps the description and area quotas in plain text
//! files and each question in its own directory with an INI `config` file.
//! [`Converter`] reads such a tree and writes the equivalent current tree
//! through the `testset-core` entities, returning the written tree fully
//! loaded so it can be linted or shown right away.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let conversion = testset_legacy::convert(Path::new("old"), Path::new("new")).expect("converted");
//! for skipped in &conversion.skipped {
//!     eprintln!("skipped {}: {}", skipped.source.display(), skipped.reason);
//! }
//! conversion.testset.lint().expect("valid testset");
//! ```

pub mod convert;
pub mod error;
pub mod ini;
pub mod source;

pub use convert::{CONVERTED_VERSION, Conversion, Converter, Skipped, convert};
pub use error::ConvertError;
