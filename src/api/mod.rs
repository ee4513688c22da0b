//! HTTP API for the task service.
//!
//! ## Endpoints
//!
//! - `GET /tasks` - List all tasks
//! - `POST /tasks` - Create a task
//! - `POST /tasks/create-many` - Bulk-import tasks from a CSV upload
//! - `PUT /tasks/{id}` - Update a task's title/description
//! - `PATCH /tasks/{id}/completed` - Toggle a task's completion
//! - `DELETE /tasks/{id}` - Delete a task
//! - `GET /health` - Health check

mod routes;
pub mod tasks;
pub mod types;
pub mod validation;

pub use routes::{serve, AppState};
pub use types::*;
