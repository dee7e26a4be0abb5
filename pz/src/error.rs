//! Error types for the order pipeline

use thiserror::Error;

use crate::domain::Role;

/// Errors raised by the coordinator and its components
#[derive(Debug, Error)]
pub enum PizzeriaError {
    #[error("Component not found: {name}")]
    ComponentNotFound { name: String },

    #[error("No component registered for the {role} stage")]
    StageMissing { role: Role },

    #[error("A component named '{name}' is already registered")]
    DuplicateComponent { name: String },

    #[error("The {role} stage already has a registered component ({existing})")]
    DuplicateRole { role: Role, existing: String },

    #[error("Component '{name}' is already attached to a coordinator")]
    AlreadyAttached { name: String },

    #[error("Component '{name}' is not attached to a coordinator")]
    NotAttached { name: String },

    #[error("Component '{component}' cannot perform directive '{directive}'")]
    UnsupportedDirective { component: String, directive: String },

    #[error("Unrecognized event kind: {kind}")]
    UnrecognizedEventKind { kind: String },

    #[error("Component '{name}' needs a Tokio runtime to start work")]
    NoRuntime { name: String },

    #[error("Coordinator channel closed")]
    CoordinatorClosed,

    #[error("Timed out after {timeout_ms}ms waiting for {what}")]
    Timeout { what: String, timeout_ms: u64 },
}

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, PizzeriaError>;
