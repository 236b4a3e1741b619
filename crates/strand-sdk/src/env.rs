//! Env and CallInfo — environment handle and opaque call context
//!
//! `Env` is the handle the runtime threads through every native call. The
//! binding layer uses it for one thing: the pending-error slot. When
//! argument validation fails, the extraction machinery records the error
//! here before the call is refused, so the runtime can raise it after the
//! callback returns its empty result.
//!
//! `CallInfo` is the runtime-supplied bundle describing one invocation:
//! the receiver and the positional arguments. Only the extraction machinery
//! interprets it.

use crate::error::BindError;
use crate::value::Value;

// ============================================================================
// Env
// ============================================================================

/// Runtime environment handle passed to every native callback.
#[derive(Debug, Default)]
pub struct Env {
    pending_error: Option<BindError>,
}

impl Env {
    /// Create a fresh environment with no pending error
    pub fn new() -> Self {
        Env::default()
    }

    /// Record an error to be raised by the runtime after the current call.
    /// A later error replaces an earlier one.
    pub fn set_pending_error(&mut self, error: BindError) {
        self.pending_error = Some(error);
    }

    /// Check whether an error is pending
    pub fn has_pending_error(&self) -> bool {
        self.pending_error.is_some()
    }

    /// Take the pending error, clearing the slot
    pub fn take_pending_error(&mut self) -> Option<BindError> {
        self.pending_error.take()
    }
}

// ============================================================================
// CallInfo
// ============================================================================

/// Opaque call context for a single invocation.
#[derive(Debug)]
pub struct CallInfo {
    this: Value,
    args: Vec<Value>,
}

impl CallInfo {
    /// Build a call context with a receiver and positional arguments
    pub fn new(this: Value, args: Vec<Value>) -> Self {
        CallInfo { this, args }
    }

    /// Build a call context for a free call (null receiver)
    pub fn free_call(args: Vec<Value>) -> Self {
        CallInfo {
            this: Value::Null,
            args,
        }
    }

    /// The receiver of this invocation
    pub fn this(&self) -> &Value {
        &self.this
    }

    /// Positional argument at `index`
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// All positional arguments
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Number of positional arguments
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
