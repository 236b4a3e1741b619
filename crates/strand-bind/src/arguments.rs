//! Arguments — typed extraction from the opaque call context
//!
//! An [`Arguments`] accessor wraps one invocation's environment handle and
//! call context. Bound signatures pull their parameters through it: ordinary
//! values come from the positional argument list, a [`This`] parameter comes
//! from the receiver slot ("receiver is pre-bound"). Extraction of `This` is
//! positionless — it never consumes a positional argument, wherever it
//! appears in the signature — though bindings conventionally take it first.
//!
//! Every extraction failure records a pending error on the [`Env`] before
//! it is reported, so a refused call always leaves the runtime with both
//! signals: the empty result and the pending error.

use std::any::type_name;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use strand_sdk::{BindError, BindResult, CallInfo, Env, FromValue, Value};

// ============================================================================
// Arguments
// ============================================================================

/// Accessor over one invocation's environment and call context.
pub struct Arguments<'a> {
    env: &'a mut Env,
    info: &'a CallInfo,
    next: usize,
}

impl<'a> Arguments<'a> {
    /// Create an accessor for one invocation
    pub fn new(env: &'a mut Env, info: &'a CallInfo) -> Self {
        Arguments { env, info, next: 0 }
    }

    /// Extract the next positional argument as `T`.
    ///
    /// On failure the error is recorded as pending on the environment and
    /// returned; the cursor still advances, so later diagnostics report the
    /// right index.
    pub fn next<T: FromValue>(&mut self) -> BindResult<T> {
        let index = self.next;
        self.next += 1;
        let result = match self.info.arg(index) {
            Some(value) => T::from_value(value),
            None => Err(BindError::MissingArgument { index }),
        };
        if let Err(error) = &result {
            self.env.set_pending_error(error.clone());
        }
        result
    }

    /// Extract the receiver slot as an instance of `C`
    pub fn receiver<C: 'static>(&mut self) -> BindResult<This<C>> {
        let result = This::from_receiver(self.info.this());
        if let Err(error) = &result {
            self.env.set_pending_error(error.clone());
        }
        result
    }

}

// ============================================================================
// This
// ============================================================================

/// Typed receiver handle: the pre-bound receiver parameter of a member
/// binding, conventionally declared first.
///
/// A `This<C>` parameter is extracted from the call context's receiver slot
/// rather than the positional argument list, at any position in the
/// signature, with the instance's class checked at extraction time. Borrows
/// are dynamically checked; overlapping
/// borrows of the same instance from reentrant calls are out of contract
/// and panic.
pub struct This<C> {
    cell: Rc<RefCell<C>>,
}

impl<C: 'static> This<C> {
    fn from_receiver(value: &Value) -> BindResult<Self> {
        let instance = value.as_object().ok_or_else(|| BindError::WrongReceiver {
            expected: type_name::<C>().to_string(),
            got: value.type_name().to_string(),
        })?;
        let cell = instance.cell::<C>().ok_or_else(|| BindError::WrongReceiver {
            expected: type_name::<C>().to_string(),
            got: "instance of another class".to_string(),
        })?;
        Ok(This { cell })
    }

    /// Immutably borrow the receiver
    pub fn borrow(&self) -> Ref<'_, C> {
        self.cell.borrow()
    }

    /// Mutably borrow the receiver
    pub fn borrow_mut(&self) -> RefMut<'_, C> {
        self.cell.borrow_mut()
    }
}

impl<C> Clone for This<C> {
    fn clone(&self) -> Self {
        This {
            cell: Rc::clone(&self.cell),
        }
    }
}

// ============================================================================
// FromCallContext
// ============================================================================

/// Per-parameter extraction from the call context.
///
/// Convertible values draw from the positional argument list; [`This`]
/// draws from the receiver slot. The two implementations are what make the
/// receiver-pre-bound convention type-driven instead of flag-driven.
pub trait FromCallContext: Sized {
    /// Extract this parameter from the accessor
    fn from_call_context(args: &mut Arguments<'_>) -> BindResult<Self>;
}

impl<T: FromValue> FromCallContext for T {
    fn from_call_context(args: &mut Arguments<'_>) -> BindResult<Self> {
        args.next()
    }
}

impl<C: 'static> FromCallContext for This<C> {
    fn from_call_context(args: &mut Arguments<'_>) -> BindResult<Self> {
        args.receiver()
    }
}

// ============================================================================
// Tests
// ============================================================================
