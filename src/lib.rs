//! # taskbox
//!
//! Minimal task-management HTTP service backed by a flat JSON file.
//!
//! This library provides:
//! - A CRUD HTTP API for task records, plus bulk import from CSV uploads
//! - A JSON-file-backed store that serializes all read-modify-write cycles
//! - Environment-based configuration
//!
//! ## Modules
//! - `api`: HTTP routes, request validation, and CSV bulk import
//! - `store`: the flat-file task store
//! - `config`: environment-based configuration

pub mod api;
pub mod config;
pub mod store;

pub use config::Config;
pub use store::{NewTask, Task, TaskPatch, TaskStore, TABLE_TASKS};
