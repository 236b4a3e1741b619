//! Class and module registration surface
//!
//! This is the binding-declaration side of the layer: a [`ClassBuilder`]
//! collects named members (methods, accessors, data fields) for a native
//! class, producing an immutable [`ClassDefinition`] the host runtime
//! dispatches property access through. [`NativeModule`] is the registry a
//! module hands to the runtime: exported free functions plus class
//! definitions, keyed by name.

use std::collections::HashMap;
use std::marker::PhantomData;

use strand_sdk::{CallInfo, Env, FromValue, ToValue, Value};

use crate::property::{Field, Getter, IntoPropertyCallback, Method, PropertyCallback, Setter};

// ============================================================================
// PropertyDescriptor
// ============================================================================

/// A named property with optional method, getter, and setter callbacks.
///
/// A data-member binding fills getter and setter; a plain function binding
/// fills method. All callbacks share the uniform runtime shape.
pub struct PropertyDescriptor {
    name: String,
    method: Option<PropertyCallback>,
    getter: Option<PropertyCallback>,
    setter: Option<PropertyCallback>,
}

impl PropertyDescriptor {
    fn empty(name: &str) -> Self {
        PropertyDescriptor {
            name: name.to_string(),
            method: None,
            getter: None,
            setter: None,
        }
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The method callback, if one is registered
    pub fn method(&self) -> Option<&PropertyCallback> {
        self.method.as_ref()
    }

    /// The getter callback, if one is registered
    pub fn getter(&self) -> Option<&PropertyCallback> {
        self.getter.as_ref()
    }

    /// The setter callback, if one is registered
    pub fn setter(&self) -> Option<&PropertyCallback> {
        self.setter.as_ref()
    }
}

// ============================================================================
// ClassBuilder
// ============================================================================

/// Fluent registration of a native class's members.
///
/// # Example
///
/// ```ignore
/// let class = ClassBuilder::<Point>::new("Point")
///     .field("x", field!(Point, x))
///     .property("scaled", |this: This<Point>| this.borrow().x * 2,
///               |this: This<Point>, v: i32| this.borrow_mut().x = v / 2)
///     .method("reset", |this: This<Point>| this.borrow_mut().x = 0)
///     .build();
/// ```
pub struct ClassBuilder<C> {
    name: String,
    properties: Vec<PropertyDescriptor>,
    _class: PhantomData<C>,
}

impl<C: 'static> ClassBuilder<C> {
    /// Start declaring a class with the given runtime name
    pub fn new(name: &str) -> Self {
        ClassBuilder {
            name: name.to_string(),
            properties: Vec::new(),
            _class: PhantomData,
        }
    }

    fn slot(&mut self, name: &str) -> &mut PropertyDescriptor {
        let index = match self.properties.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.properties.push(PropertyDescriptor::empty(name));
                self.properties.len() - 1
            }
        };
        &mut self.properties[index]
    }

    /// Register a method member. Re-registering a member overwrites it.
    pub fn method<T, A>(mut self, name: &str, target: T) -> Self
    where
        T: IntoPropertyCallback<Method, A>,
    {
        self.slot(name).method = Some(target.into_property_callback());
        self
    }

    /// Register a property read accessor
    pub fn getter<T, A>(mut self, name: &str, target: T) -> Self
    where
        T: IntoPropertyCallback<Getter, A>,
    {
        self.slot(name).getter = Some(target.into_property_callback());
        self
    }

    /// Register a property write accessor
    pub fn setter<T, A>(mut self, name: &str, target: T) -> Self
    where
        T: IntoPropertyCallback<Setter, A>,
    {
        self.slot(name).setter = Some(target.into_property_callback());
        self
    }

    /// Register read and write accessors for one property in one call
    pub fn property<G, GA, S, SA>(self, name: &str, getter: G, setter: S) -> Self
    where
        G: IntoPropertyCallback<Getter, GA>,
        S: IntoPropertyCallback<Setter, SA>,
    {
        self.getter(name, getter).setter(name, setter)
    }

    /// Register a read-write data member: both accessors are synthesized
    /// from the field projection
    pub fn field<M>(self, name: &str, field: Field<C, M>) -> Self
    where
        M: Clone + FromValue + ToValue + 'static,
    {
        self.getter(name, field).setter(name, field)
    }

    /// Finish the declaration
    pub fn build(self) -> ClassDefinition {
        ClassDefinition {
            name: self.name,
            properties: self.properties,
        }
    }
}

// ============================================================================
// ClassDefinition
// ============================================================================

/// Immutable class description with name-keyed property dispatch.
pub struct ClassDefinition {
    name: String,
    properties: Vec<PropertyDescriptor>,
}

impl ClassDefinition {
    /// Runtime name of the class
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a property descriptor by name
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// All declared properties, in declaration order
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Dispatch a property read on `receiver`.
    ///
    /// Returns `None` when the property or its getter does not exist, or
    /// when the call was refused (pending error on the environment).
    pub fn get_property(&self, env: &mut Env, receiver: &Value, name: &str) -> Option<Value> {
        let getter = self.property(name)?.getter.as_ref()?;
        let info = CallInfo::new(receiver.clone(), Vec::new());
        getter(env, &info)
    }

    /// Dispatch a property write on `receiver`.
    ///
    /// Returns whether a setter existed and was dispatched; a refused call
    /// still returns `true` and leaves the error pending on the
    /// environment.
    pub fn set_property(&self, env: &mut Env, receiver: &Value, name: &str, value: Value) -> bool {
        let setter = match self.property(name).and_then(PropertyDescriptor::setter) {
            Some(setter) => setter,
            None => return false,
        };
        let info = CallInfo::new(receiver.clone(), vec![value]);
        setter(env, &info);
        true
    }

    /// Dispatch a method call on `receiver`
    pub fn call_method(
        &self,
        env: &mut Env,
        receiver: &Value,
        name: &str,
        args: Vec<Value>,
    ) -> Option<Value> {
        let method = self.property(name)?.method.as_ref()?;
        let info = CallInfo::new(receiver.clone(), args);
        method(env, &info)
    }
}

// ============================================================================
// NativeModule
// ============================================================================

/// Module registry: exported functions and classes, keyed by name.
pub struct NativeModule {
    name: String,
    version: String,
    functions: HashMap<String, PropertyCallback>,
    classes: HashMap<String, ClassDefinition>,
}

impl NativeModule {
    /// Create a new module registry
    ///
    /// # Arguments
    /// * `name` - Module name (e.g., "geometry")
    /// * `version` - Semantic version (e.g., "1.0.0")
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        NativeModule {
            name: name.into(),
            version: version.into(),
            functions: HashMap::new(),
            classes: HashMap::new(),
        }
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Export a free function under the given name
    pub fn register_function<T, A>(&mut self, name: &str, target: T)
    where
        T: IntoPropertyCallback<Method, A>,
    {
        self.functions
            .insert(name.to_string(), target.into_property_callback());
    }

    /// Export a class definition under its declared name
    pub fn register_class(&mut self, class: ClassDefinition) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Look up an exported function
    pub fn function(&self, name: &str) -> Option<&PropertyCallback> {
        self.functions.get(name)
    }

    /// Look up an exported class
    pub fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(name)
    }

    /// Invoke an exported function with a null receiver
    pub fn call_function(&self, env: &mut Env, name: &str, args: Vec<Value>) -> Option<Value> {
        let function = self.functions.get(name)?;
        let info = CallInfo::free_call(args);
        function(env, &info)
    }

    /// Number of exported functions
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Names of all exported functions
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::arguments::This;
    use crate::field;

    use super::*;

    struct Rect {
        width: i32,
        height: i32,
    }

    fn rect_class() -> ClassDefinition {
        ClassBuilder::<Rect>::new("Rect")
            .field("width", field!(Rect, width))
            .field("height", field!(Rect, height))
            .getter("area", |this: This<Rect>| {
                let rect = this.borrow();
                rect.width * rect.height
            })
            .method("scale", |this: This<Rect>, factor: i32| {
                let mut rect = this.borrow_mut();
                rect.width *= factor;
                rect.height *= factor;
            })
            .build()
    }

    #[test]
    fn test_class_builder_descriptors() {
        let class = rect_class();
        assert_eq!(class.name(), "Rect");
        assert_eq!(class.properties().len(), 4);

        let width = class.property("width").unwrap();
        assert!(width.getter().is_some());
        assert!(width.setter().is_some());
        assert!(width.method().is_none());

        let area = class.property("area").unwrap();
        assert!(area.getter().is_some());
        assert!(area.setter().is_none());

        let scale = class.property("scale").unwrap();
        assert!(scale.method().is_some());

        assert!(class.property("missing").is_none());
    }

    #[test]
    fn test_class_property_dispatch() {
        let class = rect_class();
        let mut env = Env::new();
        let rect = Value::object(Rect {
            width: 3,
            height: 4,
        });

        assert_eq!(
            class.get_property(&mut env, &rect, "area"),
            Some(Value::I32(12))
        );

        assert!(class.set_property(&mut env, &rect, "width", Value::I32(5)));
        assert_eq!(
            class.get_property(&mut env, &rect, "width"),
            Some(Value::I32(5))
        );

        // area has no setter
        assert!(!class.set_property(&mut env, &rect, "area", Value::I32(0)));

        assert_eq!(
            class.call_method(&mut env, &rect, "scale", vec![Value::I32(2)]),
            None
        );
        assert_eq!(
            class.get_property(&mut env, &rect, "height"),
            Some(Value::I32(8))
        );
        assert!(!env.has_pending_error());
    }

    #[test]
    fn test_reregistration_overwrites() {
        let class = ClassBuilder::<Rect>::new("Rect")
            .getter("width", |_this: This<Rect>| 1i32)
            .getter("width", |this: This<Rect>| this.borrow().width)
            .build();

        let mut env = Env::new();
        let rect = Value::object(Rect {
            width: 7,
            height: 0,
        });
        assert_eq!(
            class.get_property(&mut env, &rect, "width"),
            Some(Value::I32(7))
        );
    }

    #[test]
    fn test_module_registry() {
        let mut module = NativeModule::new("geometry", "1.0.0");
        module.register_function("double", |x: i32| x * 2);
        module.register_class(rect_class());

        assert_eq!(module.name(), "geometry");
        assert_eq!(module.version(), "1.0.0");
        assert_eq!(module.function_count(), 1);
        assert!(module.function("double").is_some());
        assert!(module.function("missing").is_none());
        assert!(module.class("Rect").is_some());

        let mut env = Env::new();
        assert_eq!(
            module.call_function(&mut env, "double", vec![Value::I32(21)]),
            Some(Value::I32(42))
        );
    }
}
