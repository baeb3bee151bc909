//! Content storage for KD documentation pages.
//!
//! This crate provides a [`Storage`] trait for scanning documentation pages and
//! reading their Markdown bodies, independent of where the content lives.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, `exists()` and `mtime()` methods
//! - [`FsStorage`] reading `.md`/`.mdx` files with YAML front matter
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use kd_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("content/docs"));
//! for doc in storage.scan()? {
//!     println!("/docs/{}: {}", doc.path, doc.title);
//! }
//! ```

mod frontmatter;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use frontmatter::{FrontMatter, split_front_matter};
pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Document, Storage, StorageError, StorageErrorKind};
