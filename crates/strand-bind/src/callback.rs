//! Generic callable holders and the typed invoker
//!
//! This module is the machinery the property layer delegates to:
//! [`CallbackHolder`] owns a native callable by value, [`Callable`]
//! abstracts callables over typed argument tuples, [`FromArguments`]
//! extracts a full tuple from the call context, and [`Invoker`] carries the
//! extraction result to an at-most-once dispatch.
//!
//! [`CallReturn`] (defined in `strand-sdk` next to the conversion traits,
//! re-exported here) is the value/void split: a native signature either
//! produces a convertible value or `()`. The split is resolved per binding
//! at compile time, so the per-call path never branches on it.

use strand_sdk::BindResult;

pub use strand_sdk::CallReturn;

use crate::arguments::{Arguments, FromCallContext};

// ============================================================================
// CallbackHolder
// ============================================================================

/// Owns a native callable by value.
///
/// Holders are moved, never copied: a holder is constructed once at binding
/// time and ends up owned exclusively by the produced runtime callback.
pub struct CallbackHolder<F> {
    pub(crate) callback: F,
}

impl<F> CallbackHolder<F> {
    /// Take ownership of a native callable
    pub fn new(callback: F) -> Self {
        CallbackHolder { callback }
    }
}

// ============================================================================
// Callable
// ============================================================================

/// A native callable invocable with a typed argument tuple.
///
/// Implemented for all `Fn` types of arity 0 through 6. The tuple shape is
/// what ties a callable to its [`FromArguments`] extraction.
pub trait Callable<Args> {
    /// The native return type
    type Output;

    /// Invoke the callable with an extracted argument tuple
    fn call(&self, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ($( $arg:ident ),*) => {
        impl<Fun, Ret, $($arg),*> Callable<($($arg,)*)> for Fun
        where
            Fun: Fn($($arg),*) -> Ret,
        {
            type Output = Ret;

            #[allow(non_snake_case)]
            fn call(&self, ($($arg,)*): ($($arg,)*)) -> Ret {
                self($($arg),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A1);
impl_callable!(A1, A2);
impl_callable!(A1, A2, A3);
impl_callable!(A1, A2, A3, A4);
impl_callable!(A1, A2, A3, A4, A5);
impl_callable!(A1, A2, A3, A4, A5, A6);

// ============================================================================
// FromArguments
// ============================================================================

/// Extract a full typed argument tuple from the call context.
///
/// Elements are extracted left to right; the first failure aborts the rest.
pub trait FromArguments: Sized {
    /// Extract every parameter of a signature
    fn from_arguments(args: &mut Arguments<'_>) -> BindResult<Self>;
}

macro_rules! impl_from_arguments {
    ($( $arg:ident ),*) => {
        impl<$($arg: FromCallContext),*> FromArguments for ($($arg,)*) {
            #[allow(unused_variables, clippy::unused_unit)]
            fn from_arguments(args: &mut Arguments<'_>) -> BindResult<Self> {
                Ok(($( $arg::from_call_context(args)?, )*))
            }
        }
    };
}

impl_from_arguments!();
impl_from_arguments!(A1);
impl_from_arguments!(A1, A2);
impl_from_arguments!(A1, A2, A3);
impl_from_arguments!(A1, A2, A3, A4);
impl_from_arguments!(A1, A2, A3, A4, A5);
impl_from_arguments!(A1, A2, A3, A4, A5, A6);

// ============================================================================
// Invoker
// ============================================================================

/// Extracts a signature's full argument tuple up front and dispatches to a
/// callable at most once.
///
/// Extraction happens in `new`; the error itself is already pending on the
/// environment (recorded by [`Arguments`]), so only success is kept here.
pub struct Invoker<Args> {
    extracted: Option<Args>,
}

impl<Args: FromArguments> Invoker<Args> {
    /// Extract all arguments for a signature
    pub fn new(args: &mut Arguments<'_>) -> Self {
        Invoker {
            extracted: Args::from_arguments(args).ok(),
        }
    }

    /// Whether every argument extracted and validated successfully
    pub fn is_ok(&self) -> bool {
        self.extracted.is_some()
    }

    /// Invoke the callable with the extracted arguments.
    ///
    /// Returns `None` without invoking when extraction failed.
    pub fn dispatch<F: Callable<Args>>(self, callback: &F) -> Option<F::Output> {
        self.extracted.map(|args| callback.call(args))
    }
}

// ============================================================================
// Tests
// ============================================================================
