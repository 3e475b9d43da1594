//! # testset-core
//!
//! Lazily loaded model of a test set tree, with lint and show.
//!
//! A test set is a directory:
//!
//! ```text
//! root/metadata.yaml            description, version
//! root/<area>/metadata.yaml     questions_to_ask
//! root/<area>/<id>.yaml         type, timeout, question, answers, correct
//! ```
//!
//! Opening a [`TestSet`] does no I/O. Areas and questions are enumerated on
//! first access, and each entity reads its metadata on first property access.
//! Both are cached for the lifetime of the object.
//!
//! ```no_run
//! use testset_core::TestSet;
//!
//! let testset = TestSet::open("tests/fixtures/ok");
//! testset.lint().expect("valid testset");
//! testset.show(&mut std::io::stdout()).expect("printable testset");
//! ```

pub mod collection;
pub mod entities;
pub mod errors;
pub mod layout;
pub mod lazy;
pub mod lint;
pub mod show;
pub mod snapshot;
pub mod structured;

pub use collection::LazyCollection;
pub use entities::{Area, AreaMeta, Question, QuestionMeta, TestSet, TestSetMeta};
pub use errors::TestSetError;
pub use layout::{Layout, LegacyLayout};
pub use lint::LintRule;
