//! Strand binding layer - native class members as runtime object properties
//!
//! This crate turns the three shapes a native class member can take — plain
//! function, member function, and data field — into the single uniform
//! callback the Strand runtime invokes for property access. Binding
//! construction happens once at registration time; the produced callbacks
//! are what the runtime exercises per call.
//!
//! # Example
//!
//! ```ignore
//! use strand_bind::{field, ClassBuilder, This};
//!
//! struct Point { x: i32, y: i32 }
//!
//! let class = ClassBuilder::<Point>::new("Point")
//!     .field("x", field!(Point, x))
//!     .field("y", field!(Point, y))
//!     .method("norm2", |this: This<Point>| {
//!         let p = this.borrow();
//!         p.x * p.x + p.y * p.y
//!     })
//!     .build();
//! ```

#![warn(missing_docs)]

pub mod arguments;
pub mod callback;
pub mod class;
pub mod property;

pub use arguments::{Arguments, FromCallContext, This};
pub use callback::{CallReturn, Callable, CallbackHolder, FromArguments, Invoker};
pub use class::{ClassBuilder, ClassDefinition, NativeModule, PropertyDescriptor};
pub use property::{
    bind, bind_getter, bind_method, bind_setter, wrap_property, Field, Getter,
    IntoPropertyCallback, Method, PropertyCallback, PropertyHolder, Role, RoleKind, Setter,
};
