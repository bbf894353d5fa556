//! Dynamically typed service values.

use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

use crate::proxy::LazyProxy;
use crate::{Container, ContainerError};

/// A value produced by a container.
///
/// Literal variants mirror the literals a definition may carry. Objects are
/// reference counted so a shared service keeps its identity across `get`
/// calls; equality on objects is pointer identity.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Object(Rc<dyn Any>),
    Container(Rc<dyn Container>),
}

impl Value {
    /// Wrap a constructed service.
    pub fn object<T: Any>(value: T) -> Self {
        Value::Object(Rc::new(value))
    }

    /// Short name of the variant, used in type mismatch messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(object) if object.is::<LazyProxy>() => "lazy proxy",
            Value::Object(_) => "object",
            Value::Container(_) => "container",
        }
    }

    /// Borrow the object as `T`.
    ///
    /// Lazy proxies are forced here: asking a proxy for its target type
    /// constructs the target on first use. Asking for `LazyProxy` itself
    /// returns the proxy untouched.
    pub fn downcast<T: Any>(&self) -> Result<Rc<T>, ContainerError> {
        let Value::Object(object) = self else {
            return Err(self.mismatch(type_name::<T>()));
        };

        if let Ok(value) = Rc::clone(object).downcast::<T>() {
            return Ok(value);
        }

        match object.downcast_ref::<LazyProxy>() {
            Some(proxy) => proxy.instance()?.downcast::<T>(),
            None => Err(self.mismatch(type_name::<T>())),
        }
    }

    pub fn as_bool(&self) -> Result<bool, ContainerError> {
        match self {
            Value::Bool(value) => Ok(*value),
            _ => Err(self.mismatch("bool")),
        }
    }

    pub fn as_int(&self) -> Result<i64, ContainerError> {
        match self {
            Value::Int(value) => Ok(*value),
            _ => Err(self.mismatch("int")),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Result<f64, ContainerError> {
        match self {
            Value::Float(value) => Ok(*value),
            Value::Int(value) => Ok(*value as f64),
            _ => Err(self.mismatch("float")),
        }
    }

    pub fn as_str(&self) -> Result<&str, ContainerError> {
        match self {
            Value::Str(value) => Ok(value),
            _ => Err(self.mismatch("string")),
        }
    }

    pub fn as_list(&self) -> Result<&[Value], ContainerError> {
        match self {
            Value::List(values) => Ok(values),
            _ => Err(self.mismatch("list")),
        }
    }

    pub fn as_container(&self) -> Result<Rc<dyn Container>, ContainerError> {
        match self {
            Value::Container(container) => Ok(Rc::clone(container)),
            _ => Err(self.mismatch("container")),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn mismatch(&self, expected: &str) -> ContainerError {
        ContainerError::TypeMismatch {
            expected: expected.to_owned(),
            found: self.kind().to_owned(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Container(a), Value::Container(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(value) => write!(f, "Bool({value})"),
            Value::Int(value) => write!(f, "Int({value})"),
            Value::Float(value) => write!(f, "Float({value:?})"),
            Value::Str(value) => write!(f, "Str({value:?})"),
            Value::List(values) => f.debug_tuple("List").field(values).finish(),
            Value::Object(object) => match object.downcast_ref::<LazyProxy>() {
                Some(proxy) => write!(f, "LazyProxy({})", proxy.class()),
                None => write!(f, "Object({:p})", Rc::as_ptr(object).cast::<()>()),
            },
            Value::Container(container) => {
                write!(f, "Container({:p})", Rc::as_ptr(container).cast::<()>())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

/// Positional constructor arguments handed to [`crate::Injectable::construct`].
pub struct Arguments {
    class: &'static str,
    values: std::vec::IntoIter<Value>,
    index: usize,
}

impl Arguments {
    pub fn new(class: &'static str, values: Vec<Value>) -> Self {
        Arguments {
            class,
            values: values.into_iter(),
            index: 0,
        }
    }

    /// Name of the class being constructed.
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Number of arguments not consumed yet.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Take the next argument as-is.
    pub fn value(&mut self) -> Result<Value, ContainerError> {
        let index = self.index;
        self.index += 1;
        self.values
            .next()
            .ok_or_else(|| ContainerError::MissingArgument {
                class: self.class.to_owned(),
                index,
            })
    }

    pub fn object<T: Any>(&mut self) -> Result<Rc<T>, ContainerError> {
        self.value()?.downcast::<T>()
    }

    pub fn string(&mut self) -> Result<String, ContainerError> {
        match self.value()? {
            Value::Str(value) => Ok(value),
            other => Err(other.mismatch("string")),
        }
    }

    pub fn bool(&mut self) -> Result<bool, ContainerError> {
        self.value()?.as_bool()
    }

    pub fn int(&mut self) -> Result<i64, ContainerError> {
        self.value()?.as_int()
    }

    pub fn float(&mut self) -> Result<f64, ContainerError> {
        self.value()?.as_float()
    }

    pub fn list(&mut self) -> Result<Vec<Value>, ContainerError> {
        match self.value()? {
            Value::List(values) => Ok(values),
            other => Err(other.mismatch("list")),
        }
    }

    pub fn container(&mut self) -> Result<Rc<dyn Container>, ContainerError> {
        self.value()?.as_container()
    }

    /// Take the next argument unless it is `null`.
    pub fn optional(&mut self) -> Result<Option<Value>, ContainerError> {
        let value = self.value()?;
        Ok(if value.is_null() { None } else { Some(value) })
    }
}
