//! Agent-facing operation surface.
//!
//! Everything a host agent runtime sees lives here: the operation
//! [`schema`]s, the [`registry`] that validates and dispatches requests, the
//! mailbox [`operations`] catalog, and the [`stdio`] transport that serves
//! it all as line-delimited JSON.

pub mod operations;
pub mod registry;
pub mod schema;
pub mod stdio;

pub use operations::mailbox_operations;
pub use registry::{DispatchError, OperationHandler, OperationRegistry, OperationSpec};
pub use schema::{Field, FieldType, Schema, SchemaError};
