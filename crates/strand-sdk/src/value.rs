//! Value — the runtime's value representation
//!
//! `Value` is what the host runtime passes across the binding boundary:
//! primitives are stored inline, strings are reference-counted, and native
//! object instances travel as [`Instance`] handles.
//!
//! # Thread Safety
//!
//! Values are single-threaded by design. The host runtime delivers calls
//! cooperatively and serializes property access on a given instance; see the
//! concurrency notes on [`Instance`].

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

// ============================================================================
// Value
// ============================================================================

/// A value in the host runtime's representation.
#[derive(Clone)]
pub enum Value {
    /// The null value
    Null,
    /// Boolean
    Bool(bool),
    /// 32-bit integer
    I32(i32),
    /// 64-bit integer
    I64(i64),
    /// 64-bit float
    F64(f64),
    /// Immutable string
    Str(Rc<str>),
    /// A wrapped native object instance
    Object(Instance),
}

impl Value {
    /// Create a string value
    pub fn string(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    /// Wrap a native object into a new instance value
    pub fn object<C: 'static>(native: C) -> Self {
        Value::Object(Instance::new(native))
    }

    /// Check if this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i32 if this is an i32
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as i64 if this is an i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is an f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as string slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the instance handle if this is an object
    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// Name of the runtime type held by this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::F64(_) => "f64",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Objects compare by identity
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Value::Null"),
            Value::Bool(b) => write!(f, "Value::Bool({})", b),
            Value::I32(i) => write!(f, "Value::I32({})", i),
            Value::I64(i) => write!(f, "Value::I64({})", i),
            Value::F64(v) => write!(f, "Value::F64({})", v),
            Value::Str(s) => write!(f, "Value::Str({:?})", s),
            Value::Object(instance) => write!(f, "Value::Object({:?})", instance),
        }
    }
}

// ============================================================================
// Instance
// ============================================================================

/// A native object instance owned by the runtime.
///
/// The native value lives in an `Rc<RefCell<C>>` behind type erasure, so an
/// instance can be cloned into multiple runtime values while the native
/// object itself stays unique. Borrows are dynamically checked; overlapping
/// mutable access from reentrant calls is out of contract and panics like
/// any `RefCell`.
#[derive(Clone)]
pub struct Instance {
    inner: Rc<dyn Any>,
}

impl Instance {
    /// Wrap a native object into a new instance
    pub fn new<C: 'static>(native: C) -> Self {
        Instance {
            inner: Rc::new(RefCell::new(native)),
        }
    }

    /// Check whether this instance holds a `C`
    pub fn is<C: 'static>(&self) -> bool {
        self.inner.is::<RefCell<C>>()
    }

    /// Get the shared cell holding the native object, if it is a `C`
    pub fn cell<C: 'static>(&self) -> Option<Rc<RefCell<C>>> {
        Rc::clone(&self.inner).downcast::<RefCell<C>>().ok()
    }

    /// Immutably borrow the native object, if it is a `C`
    pub fn borrow<C: 'static>(&self) -> Option<Ref<'_, C>> {
        self.inner.downcast_ref::<RefCell<C>>().map(|c| c.borrow())
    }

    /// Mutably borrow the native object, if it is a `C`
    pub fn borrow_mut<C: 'static>(&self) -> Option<RefMut<'_, C>> {
        self.inner
            .downcast_ref::<RefCell<C>>()
            .map(|c| c.borrow_mut())
    }

    /// Identity comparison: do both handles refer to the same native object?
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance({:p})", Rc::as_ptr(&self.inner))
    }
}

// ============================================================================
// Tests
// ============================================================================
