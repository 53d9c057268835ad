//! Operation registry and dispatch.
//!
//! Operations are registered explicitly as [`OperationSpec`]s: a name, a
//! description, input and output schemas, and a handler closure. The
//! registry owns the name-to-spec map and dispatches one request at a time,
//! validating arguments against the input schema before the handler runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use thiserror::Error;

use super::schema::Schema;

/// Errors produced while routing a request to an operation.
#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    /// No operation is registered under the requested name.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The arguments failed schema validation or deserialization.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The operation result could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Handler invoked with validated arguments, yielding the result value.
pub type OperationHandler =
    Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value, DispatchError>> + Send + Sync>;

/// A registered operation: metadata, schemas, and handler.
pub struct OperationSpec {
    /// Operation name as the host invokes it.
    pub name: &'static str,
    /// Human-readable description for the announcement.
    pub description: &'static str,
    /// Schema the arguments are validated against.
    pub input: Schema,
    /// Schema of the result, announced but not enforced.
    pub output: Schema,
    /// Handler that runs the operation.
    pub handler: OperationHandler,
}

/// Registry of operations, keyed and iterated by name.
pub struct OperationRegistry {
    operations: BTreeMap<&'static str, OperationSpec>,
}

impl OperationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            operations: BTreeMap::new(),
        }
    }

    /// Registers an operation. Re-registering a name replaces the earlier
    /// operation.
    pub fn register(&mut self, spec: OperationSpec) {
        self.operations.insert(spec.name, spec);
    }

    /// Looks up an operation by name.
    pub fn get(&self, name: &str) -> Option<&OperationSpec> {
        self.operations.get(name)
    }

    /// Iterates over registered operations in name order.
    pub fn specs(&self) -> impl Iterator<Item = &OperationSpec> {
        self.operations.values()
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Routes a request to its operation.
    ///
    /// Arguments are validated against the operation's input schema before
    /// the handler runs; handlers never see arguments that failed
    /// validation.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> Result<Value, DispatchError> {
        let spec = self
            .operations
            .get(name)
            .ok_or_else(|| DispatchError::UnknownOperation(name.to_string()))?;

        spec.input
            .validate(&arguments)
            .map_err(|e| DispatchError::InvalidArguments(e.to_string()))?;

        (spec.handler)(arguments).await
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
