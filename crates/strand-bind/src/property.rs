//! Property-method binding: roles, holders, adapters, accessor synthesis
//!
//! A native member bound to a runtime object property has one of three
//! shapes: a plain callable (method), a read accessor (getter), or a write
//! accessor (setter). The runtime only ever invokes one shape — the uniform
//! [`PropertyCallback`] — so this module folds all three into it:
//!
//! - [`Role`] classifies a binding at compile time ([`Method`], [`Getter`],
//!   [`Setter`]); roles have no runtime representation.
//! - [`PropertyHolder`] tags a [`CallbackHolder`] with its role.
//! - [`wrap_property`] builds the uniform callback: extract and validate
//!   arguments, invoke the native callable, convert or suppress the return.
//!   Role/return-shape contracts (a setter must not return a value, a getter
//!   must) are build-time assertions, never runtime checks.
//! - [`Field`] and [`IntoPropertyCallback`] synthesize getter/setter
//!   closures directly from a data-member projection when no user-supplied
//!   accessor exists.
//!
//! A refused call (failed validation) never reaches the native callable and
//! yields the empty sentinel `None`; the extraction machinery has already
//! recorded a pending error on the environment by then.

use std::marker::PhantomData;

use strand_sdk::{CallInfo, CallReturn, Env, FromValue, ToValue, Value};

use crate::arguments::{Arguments, This};
use crate::callback::{Callable, CallbackHolder, FromArguments, Invoker};

// ============================================================================
// Binding roles
// ============================================================================

/// Discriminant for a binding role.
///
/// Only consulted inside build-time assertions; no value of this type exists
/// at runtime.
#[derive(Clone, Copy, Debug)]
pub enum RoleKind {
    /// Plain callable member
    Method,
    /// Property read accessor
    Getter,
    /// Property write accessor
    Setter,
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Method {}
    impl Sealed for super::Getter {}
    impl Sealed for super::Setter {}
}

/// Compile-time classification of a bound member.
///
/// Sealed: the three roles are the only ones a native member can play.
pub trait Role: sealed::Sealed + 'static {
    /// Discriminant used by the role/return-shape assertions
    const KIND: RoleKind;
}

/// Role tag for a plain callable member
pub struct Method;

/// Role tag for a property read accessor; the bound signature must produce
/// a value
pub struct Getter;

/// Role tag for a property write accessor; the bound signature must not
/// produce a value
pub struct Setter;

impl Role for Method {
    const KIND: RoleKind = RoleKind::Method;
}

impl Role for Getter {
    const KIND: RoleKind = RoleKind::Getter;
}

impl Role for Setter {
    const KIND: RoleKind = RoleKind::Setter;
}

// ============================================================================
// Role-tagged holder
// ============================================================================

/// A [`CallbackHolder`] tagged with the role it was bound under.
///
/// The wrapped holder is moved in, never copied; construction cannot fail.
/// Role/signature mismatches are rejected earlier at the type level or at
/// adapter-build time.
pub struct PropertyHolder<F, R: Role> {
    holder: CallbackHolder<F>,
    _role: PhantomData<R>,
}

impl<F, R: Role> PropertyHolder<F, R> {
    /// Tag an existing holder with a role
    pub fn new(holder: CallbackHolder<F>) -> Self {
        PropertyHolder {
            holder,
            _role: PhantomData,
        }
    }
}

// ============================================================================
// Uniform adapter
// ============================================================================

/// The single callback shape the host runtime invokes, whatever the native
/// member's original shape.
///
/// `None` is the empty sentinel: either the native signature was void, or
/// validation failed and the callable was never invoked (in which case a
/// pending error sits on the [`Env`]).
pub type PropertyCallback = Box<dyn Fn(&mut Env, &CallInfo) -> Option<Value>>;

/// Build the uniform runtime callback from a role-tagged holder.
///
/// The holder is captured by move; the produced callback owns it
/// exclusively. Per invocation: extract and validate the full argument
/// tuple, refuse the call on failure, otherwise invoke the native callable
/// and convert (or suppress, for void signatures) its return.
///
/// Role/return-shape contracts are enforced when a binding is built: a
/// setter bound over a value-returning signature, or a getter bound over a
/// void one, fails to compile.
pub fn wrap_property<R, F, A>(holder: PropertyHolder<F, R>) -> PropertyCallback
where
    R: Role,
    A: FromArguments + 'static,
    F: Callable<A> + 'static,
    F::Output: CallReturn,
{
    const {
        assert!(
            !(matches!(R::KIND, RoleKind::Setter) && <F::Output as CallReturn>::HAS_VALUE),
            "setter must not return a value",
        );
        assert!(
            !(matches!(R::KIND, RoleKind::Getter) && !<F::Output as CallReturn>::HAS_VALUE),
            "getter must return a value",
        );
    }
    Box::new(move |env, info| {
        let invoker = {
            let mut args = Arguments::new(env, info);
            Invoker::<A>::new(&mut args)
        };
        if !invoker.is_ok() {
            return None;
        }
        let ret = invoker.dispatch(&holder.holder.callback)?;
        ret.into_call_result(env)
    })
}

// ============================================================================
// Field projections
// ============================================================================

/// A data-member projection: the binding target for a field that has no
/// user-supplied accessor functions.
///
/// Holds a pair of capture-free projection functions into a `C`. Built with
/// [`field!`](crate::field); bindable as [`Getter`] or [`Setter`], never as
/// [`Method`].
pub struct Field<C, M> {
    get: fn(&C) -> &M,
    get_mut: fn(&mut C) -> &mut M,
}

impl<C, M> Field<C, M> {
    /// Create a projection from its two accessors
    pub const fn new(get: fn(&C) -> &M, get_mut: fn(&mut C) -> &mut M) -> Self {
        Field { get, get_mut }
    }
}

impl<C, M> Clone for Field<C, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, M> Copy for Field<C, M> {}

/// Build a [`Field`] projection from a class type and a named field.
///
/// ```ignore
/// struct Point { x: i32 }
///
/// let x = field!(Point, x);
/// let getter = bind_getter(x);
/// let setter = bind_setter(x);
/// ```
#[macro_export]
macro_rules! field {
    ($class:ty, $field:ident) => {
        $crate::Field::new(
            |instance: &$class| &instance.$field,
            |instance: &mut $class| &mut instance.$field,
        )
    };
}

// ============================================================================
// Binding target factory
// ============================================================================

/// Compile-time selection of how a binding target becomes a runtime
/// callback.
///
/// Implemented for any callable under any role, and for [`Field`]
/// projections under [`Getter`] and [`Setter`]:
///
/// - a callable passes through to the generic holder unchanged;
/// - a `Field` bound as getter synthesizes `|this: This<C>| -> M` returning
///   a copy of the field;
/// - a `Field` bound as setter synthesizes `|this: This<C>, value: M|`
///   move-assigning into the field.
///
/// The synthesized closures follow the receiver-pre-bound convention: their
/// `This` parameter is supplied by the call context's receiver slot.
/// A `Field` bound as [`Method`] has no implementation and is rejected when
/// the binding is declared.
pub trait IntoPropertyCallback<R: Role, Args> {
    /// Build the uniform runtime callback for this binding target
    fn into_property_callback(self) -> PropertyCallback;
}

impl<R, F, A> IntoPropertyCallback<R, A> for F
where
    R: Role,
    A: FromArguments + 'static,
    F: Callable<A> + 'static,
    F::Output: CallReturn,
{
    fn into_property_callback(self) -> PropertyCallback {
        wrap_property::<R, F, A>(PropertyHolder::new(CallbackHolder::new(self)))
    }
}

impl<C, M> IntoPropertyCallback<Getter, (This<C>,)> for Field<C, M>
where
    C: 'static,
    M: Clone + ToValue + 'static,
{
    fn into_property_callback(self) -> PropertyCallback {
        let read = self.get;
        let getter = move |this: This<C>| -> M { read(&this.borrow()).clone() };
        wrap_property::<Getter, _, (This<C>,)>(PropertyHolder::new(CallbackHolder::new(getter)))
    }
}

impl<C, M> IntoPropertyCallback<Setter, (This<C>, M)> for Field<C, M>
where
    C: 'static,
    M: FromValue + 'static,
{
    fn into_property_callback(self) -> PropertyCallback {
        let write = self.get_mut;
        let setter = move |this: This<C>, value: M| {
            *write(&mut this.borrow_mut()) = value;
        };
        wrap_property::<Setter, _, (This<C>, M)>(PropertyHolder::new(CallbackHolder::new(setter)))
    }
}

// ============================================================================
// Binding entry points
// ============================================================================

/// Bind a native target under an explicit role.
///
/// ```ignore
/// let callback = bind::<Getter, _, _>(field!(Point, x));
/// ```
pub fn bind<R, T, A>(target: T) -> PropertyCallback
where
    R: Role,
    T: IntoPropertyCallback<R, A>,
{
    target.into_property_callback()
}

/// Bind a plain callable member.
///
/// A field projection is not a callable and cannot be bound as a method:
///
/// ```compile_fail
/// use strand_bind::{bind_method, field};
///
/// struct Point { x: i32 }
///
/// let _ = bind_method(field!(Point, x));
/// ```
pub fn bind_method<T, A>(target: T) -> PropertyCallback
where
    T: IntoPropertyCallback<Method, A>,
{
    target.into_property_callback()
}

/// Bind a property read accessor: a value-returning callable or a field
/// projection.
///
/// A getter must produce a value; binding a void signature fails to build:
///
/// ```compile_fail
/// use strand_bind::bind_getter;
///
/// let _ = bind_getter(|| {});
/// ```
pub fn bind_getter<T, A>(target: T) -> PropertyCallback
where
    T: IntoPropertyCallback<Getter, A>,
{
    target.into_property_callback()
}

/// Bind a property write accessor: a void callable or a field projection.
///
/// A setter must not produce a value; binding a value-returning signature
/// fails to build:
///
/// ```compile_fail
/// use strand_bind::bind_setter;
///
/// let _ = bind_setter(|value: i32| -> i32 { value });
/// ```
pub fn bind_setter<T, A>(target: T) -> PropertyCallback
where
    T: IntoPropertyCallback<Setter, A>,
{
    target.into_property_callback()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct Point {
        x: i32,
    }

    #[test]
    fn test_method_binding_returns_converted_value() {
        let callback = bind_method(|a: i32, b: i32| a + b);
        let mut env = Env::new();
        let info = CallInfo::free_call(vec![Value::I32(2), Value::I32(3)]);

        assert_eq!(callback(&mut env, &info), Some(Value::I32(5)));
        assert!(!env.has_pending_error());
    }

    #[test]
    fn test_void_method_yields_sentinel() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&calls);
        let callback = bind_method(move |_flag: bool| {
            counter.set(counter.get() + 1);
        });
        let mut env = Env::new();
        let info = CallInfo::free_call(vec![Value::Bool(true)]);

        assert_eq!(callback(&mut env, &info), None);
        assert_eq!(calls.get(), 1);
        assert!(!env.has_pending_error());
    }

    #[test]
    fn test_validation_failure_refuses_invocation() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&calls);
        let callback = bind_method(move |a: i32| {
            counter.set(counter.get() + 1);
            a
        });
        let mut env = Env::new();

        // Wrong type
        let info = CallInfo::free_call(vec![Value::string("nope")]);
        assert_eq!(callback(&mut env, &info), None);
        assert_eq!(calls.get(), 0);
        assert!(env.take_pending_error().is_some());

        // Missing argument
        let info = CallInfo::free_call(vec![]);
        assert_eq!(callback(&mut env, &info), None);
        assert_eq!(calls.get(), 0);
        assert!(env.has_pending_error());
    }

    #[test]
    fn test_custom_accessor_pair() {
        let getter = bind_getter(|this: This<Point>| this.borrow().x * 2);
        let setter = bind_setter(|this: This<Point>, value: i32| {
            this.borrow_mut().x = value;
        });

        let mut env = Env::new();
        let receiver = Value::object(Point { x: 10 });

        let info = CallInfo::new(receiver.clone(), vec![]);
        assert_eq!(getter(&mut env, &info), Some(Value::I32(20)));

        let info = CallInfo::new(receiver.clone(), vec![Value::I32(21)]);
        assert_eq!(setter(&mut env, &info), None);

        let info = CallInfo::new(receiver, vec![]);
        assert_eq!(getter(&mut env, &info), Some(Value::I32(42)));
    }

    #[test]
    fn test_synthesized_getter_reads_field() {
        let callback = bind_getter(field!(Point, x));
        let mut env = Env::new();
        let receiver = Value::object(Point { x: 5 });

        let info = CallInfo::new(receiver.clone(), vec![]);
        assert_eq!(callback(&mut env, &info), Some(Value::I32(5)));

        // Reading leaves the field unchanged
        let instance = receiver.as_object().unwrap();
        assert_eq!(instance.borrow::<Point>().map(|p| p.x), Some(5));
    }

    #[test]
    fn test_synthesized_setter_writes_field() {
        let callback = bind_setter(field!(Point, x));
        let mut env = Env::new();
        let receiver = Value::object(Point { x: 5 });

        let info = CallInfo::new(receiver.clone(), vec![Value::I32(10)]);
        assert_eq!(callback(&mut env, &info), None);

        let instance = receiver.as_object().unwrap();
        assert_eq!(instance.borrow::<Point>().map(|p| p.x), Some(10));
    }

    #[test]
    fn test_synthesized_setter_rejects_wrong_value_type() {
        let callback = bind_setter(field!(Point, x));
        let mut env = Env::new();
        let receiver = Value::object(Point { x: 5 });

        let info = CallInfo::new(receiver.clone(), vec![Value::string("ten")]);
        assert_eq!(callback(&mut env, &info), None);
        assert!(env.has_pending_error());

        let instance = receiver.as_object().unwrap();
        assert_eq!(instance.borrow::<Point>().map(|p| p.x), Some(5));
    }

    #[test]
    fn test_wrong_receiver_class_refuses_call() {
        let callback = bind_getter(field!(Point, x));
        let mut env = Env::new();
        let receiver = Value::object("not a point".to_string());

        let info = CallInfo::new(receiver, vec![]);
        assert_eq!(callback(&mut env, &info), None);
        assert!(env.has_pending_error());
    }

    #[test]
    fn test_receiver_parameter_position_is_free() {
        // This never consumes a positional argument, wherever it is declared
        let callback = bind_method(|scale: i32, this: This<Point>| this.borrow().x * scale);
        let mut env = Env::new();
        let info = CallInfo::new(Value::object(Point { x: 6 }), vec![Value::I32(7)]);

        assert_eq!(callback(&mut env, &info), Some(Value::I32(42)));
        assert!(!env.has_pending_error());
    }

    #[test]
    fn test_explicit_role_binding() {
        let callback = bind::<Method, _, _>(|| 7i32);
        let mut env = Env::new();
        let info = CallInfo::free_call(vec![]);
        assert_eq!(callback(&mut env, &info), Some(Value::I32(7)));
    }
}
