//! Strand SDK - value, environment, and conversion types for native bindings
//!
//! This crate provides the substrate the Strand binding layer builds on:
//! the runtime value representation ([`Value`], [`Instance`]), the
//! environment handle and opaque call context ([`Env`], [`CallInfo`]), the
//! conversion traits ([`FromValue`], [`ToValue`]), and the shared error
//! type ([`BindError`]).
//!
//! Binding declarations themselves live in `strand-bind`; host runtimes and
//! native modules share this crate without depending on each other.

#![warn(missing_docs)]

pub mod convert;
pub mod env;
pub mod error;
pub mod value;

pub use convert::{CallReturn, FromValue, ToValue};
pub use env::{CallInfo, Env};
pub use error::{BindError, BindResult};
pub use value::{Instance, Value};
