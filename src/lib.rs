//! # Para - PARA note workflows for markdown vaults
//!
//! Para manages notes organized with the PARA method (Projects, Areas,
//! Resources, Archive) in a folder of markdown files. Notes carry a YAML
//! front matter block whose tags decide their type.
//!
//! ## Features
//!
//! - **Templates**: create projects, areas and resources from template notes
//! - **Lifecycle**: archive, restore and complete notes, with rollback on failure
//! - **Archive scanning**: list archived notes, filtered by type or name
//!
//! ## Quick Start
//!
//! ```bash
//! # Set up the folders and templates in the current directory
//! para init
//!
//! # Create a project linked to an area
//! para create project "Launch" --area Marketing
//!
//! # Finish it
//! para complete 1-Projects/Launch.md
//!
//! # Bring something back from the archive
//! para restore --type project --query launch
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: `.para.toml` loading and vault discovery
//! - [`error`]: Error types and result aliases
//! - [`model`]: Data models (ParaType, ProjectStatus, ParaItem, ...)
//! - [`storage`]: Vault file-store and front matter handling
//! - [`classifier`]: Type and archive detection
//! - [`creator`]: Note creation from templates
//! - [`transition`]: Archive, restore and complete
//! - [`scanner`]: Archive and vault listings

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.para.toml` configuration files and vault discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `ParaError` enum and `Result<T>` type alias.
pub mod error;

/// Data models for PARA notes.
pub mod model;

/// Vault file-store layer.
///
/// Reads and writes notes as markdown files with YAML front matter.
pub mod storage;

/// Input validation utilities.
///
/// Validates note names before any file is written.
pub mod validation;

pub mod classifier;
pub mod creator;
pub mod logging;
pub mod paths;
pub mod scanner;
pub mod status;
pub mod templates;
pub mod transition;
