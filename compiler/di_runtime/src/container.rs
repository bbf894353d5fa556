use std::any::{type_name, Any};

use crate::{Arguments, ContainerError, Value};

/// Lookup contract shared by interpreted and generated containers.
pub trait Container {
    /// Produce the value registered under `id`.
    fn get(&self, id: &str) -> Result<Value, ContainerError>;

    /// Whether `id` can be produced.
    fn has(&self, id: &str) -> bool;
}

/// Construction protocol for service types.
///
/// Arguments arrive positionally, in constructor-parameter order, exactly as
/// the resolver planned them.
pub trait Injectable: Any + Sized {
    fn construct(args: Arguments) -> Result<Self, ContainerError>;
}

/// Type-erased constructor stored in class metadata.
pub type ConstructFn = fn(Vec<Value>) -> Result<Value, ContainerError>;

/// Construct `T` from positional arguments and wrap it as a service value.
///
/// Generated containers call this in place of a constructor expression.
pub fn construct<T: Injectable>(args: Vec<Value>) -> Result<Value, ContainerError> {
    T::construct(Arguments::new(type_name::<T>(), args)).map(Value::object)
}
