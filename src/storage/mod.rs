//! File-store layer for the vault.
//!
//! Notes are markdown files with an optional YAML front matter block:
//!
//! ```markdown
//! ---
//! tags:
//!   - project
//!   - marketing
//! completed: false
//! ---
//! Area:: [[Marketing]]
//! Status:: #draft
//! ```
//!
//! ## Components
//!
//! - [`VaultStore`]: the file-store primitives every workflow step uses
//! - [`FsVault`]: `VaultStore` over a directory on disk
//! - [`Frontmatter`]: the key-value metadata block of a note

mod fs_store;
mod markdown;
mod store;

pub use fs_store::FsVault;
pub use markdown::{Frontmatter, split_frontmatter};
pub use store::{Entry, EntryKind, VaultStore};
