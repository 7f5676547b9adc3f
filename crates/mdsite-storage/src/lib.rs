//! Directory tree abstraction for the mdsite build pipeline.
//!
//! This crate provides a [`Storage`] trait describing the small set of
//! directory-entry operations the pipeline needs (list children, classify
//! entries, read, write, copy, reset). Traversal logic in `mdsite-build` is
//! written against the trait, so it runs unchanged over:
//!
//! - [`FsStorage`] for the real filesystem
//! - [`MockStorage`] for in-memory tests (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mdsite_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new();
//! for entry in storage.list(Path::new("content"))? {
//!     println!("{:?} {:?}", entry.kind, entry.name);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::{FileMeta, MockStorage};
pub use storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};
