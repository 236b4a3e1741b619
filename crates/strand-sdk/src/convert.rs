//! Traits for converting between runtime values and Rust types
//!
//! `FromValue` turns a runtime [`Value`] into a typed argument; `ToValue`
//! turns a native return value back into the runtime representation.
//!
//! [`CallReturn`] layers the value/void split on top of the conversion
//! traits: `()` implements `CallReturn` but not `ToValue`, which is what
//! lets the getter/setter return-shape contract in the binding layer be
//! enforced at compile time.

use std::rc::Rc;

use crate::env::Env;
use crate::error::{BindError, BindResult};
use crate::value::Value;

/// Convert a runtime value into a Rust type.
///
/// Implement this trait to allow a type to be received as a bound-function
/// argument. Conversion is exact; no coercion between numeric variants.
pub trait FromValue: Sized {
    /// Convert from a runtime value, reporting a mismatch on failure
    fn from_value(value: &Value) -> BindResult<Self>;
}

/// Convert a Rust value into the runtime representation.
///
/// Implement this trait to allow a type to be returned from a bound
/// function or getter. The environment handle is available for conversions
/// that need runtime services.
pub trait ToValue {
    /// Convert into a runtime value
    fn to_value(self, env: &mut Env) -> Value;
}

fn mismatch(expected: &str, value: &Value) -> BindError {
    BindError::TypeMismatch {
        expected: expected.to_string(),
        got: value.type_name().to_string(),
    }
}

// ============================================================================
// Primitive implementations
// ============================================================================

impl FromValue for bool {
    fn from_value(value: &Value) -> BindResult<Self> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl ToValue for bool {
    fn to_value(self, _env: &mut Env) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> BindResult<Self> {
        value.as_i32().ok_or_else(|| mismatch("i32", value))
    }
}

impl ToValue for i32 {
    fn to_value(self, _env: &mut Env) -> Value {
        Value::I32(self)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> BindResult<Self> {
        value.as_i64().ok_or_else(|| mismatch("i64", value))
    }
}

impl ToValue for i64 {
    fn to_value(self, _env: &mut Env) -> Value {
        Value::I64(self)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> BindResult<Self> {
        value.as_f64().ok_or_else(|| mismatch("f64", value))
    }
}

impl ToValue for f64 {
    fn to_value(self, _env: &mut Env) -> Value {
        Value::F64(self)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> BindResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("string", value))
    }
}

impl ToValue for String {
    fn to_value(self, _env: &mut Env) -> Value {
        Value::Str(Rc::from(self))
    }
}

impl ToValue for &str {
    fn to_value(self, _env: &mut Env) -> Value {
        Value::string(self)
    }
}

// ============================================================================
// Pass-through and optional values
// ============================================================================

impl FromValue for Value {
    fn from_value(value: &Value) -> BindResult<Self> {
        Ok(value.clone())
    }
}

impl ToValue for Value {
    fn to_value(self, _env: &mut Env) -> Value {
        self
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self, env: &mut Env) -> Value {
        match self {
            Some(inner) => inner.to_value(env),
            None => Value::Null,
        }
    }
}

// ============================================================================
// CallReturn
// ============================================================================

/// Return-value shape of a native signature.
///
/// `()` means the callable is invoked for its side effect and the runtime
/// sees the empty call result; any convertible type is turned into a runtime
/// value. `HAS_VALUE` feeds the role/return-shape assertions in the binding
/// layer.
///
/// The implementation pair is defined here, in the crate that owns
/// `ToValue`: `()` implements `CallReturn` but not `ToValue`, and keeping
/// both next to the conversion traits is what lets the two implementations
/// coexist.
pub trait CallReturn {
    /// Whether the native signature produces a value
    const HAS_VALUE: bool;

    /// Convert the native return into the runtime call result
    fn into_call_result(self, env: &mut Env) -> Option<Value>;
}

impl CallReturn for () {
    const HAS_VALUE: bool = false;

    fn into_call_result(self, _env: &mut Env) -> Option<Value> {
        None
    }
}

impl<T: ToValue> CallReturn for T {
    const HAS_VALUE: bool = true;

    fn into_call_result(self, env: &mut Env) -> Option<Value> {
        Some(self.to_value(env))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_exact() {
        assert_eq!(i32::from_value(&Value::I32(42)), Ok(42));
        assert_eq!(bool::from_value(&Value::Bool(true)), Ok(true));
        assert_eq!(
            String::from_value(&Value::string("hi")),
            Ok("hi".to_string())
        );

        // No numeric coercion
        let err = i32::from_value(&Value::F64(1.0)).unwrap_err();
        assert_eq!(err.to_string(), "Type mismatch: expected i32, got f64");
    }

    #[test]
    fn test_to_value() {
        let mut env = Env::new();
        assert_eq!(7i32.to_value(&mut env), Value::I32(7));
        assert_eq!("s".to_value(&mut env), Value::string("s"));
        assert_eq!(Some(1i64).to_value(&mut env), Value::I64(1));
        assert_eq!(None::<i64>.to_value(&mut env), Value::Null);
    }

    #[test]
    fn test_call_return_shapes() {
        let mut env = Env::new();
        assert!(!<() as CallReturn>::HAS_VALUE);
        assert!(<i32 as CallReturn>::HAS_VALUE);
        assert_eq!(().into_call_result(&mut env), None);
        assert_eq!(5i32.into_call_result(&mut env), Some(Value::I32(5)));
        assert_eq!(
            "s".to_string().into_call_result(&mut env),
            Some(Value::string("s"))
        );
    }

    #[test]
    fn test_value_pass_through() {
        let mut env = Env::new();
        let value = Value::string("kept");
        assert_eq!(Value::from_value(&value), Ok(value.clone()));
        assert_eq!(value.clone().to_value(&mut env), value);
    }
}
