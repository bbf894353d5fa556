//! Deferred construction for lazy services.
//!
//! A proxy is an ordinary [`Value::Object`] holding a [`LazyProxy`]. The
//! target is constructed the first time a consumer downcasts the value to
//! anything other than `LazyProxy`; later downcasts reuse that instance.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use crate::{ContainerError, Value};

/// Zero-argument factory producing the proxied value.
pub type ProxyFactory = Box<dyn Fn() -> Result<Value, ContainerError>>;

/// Capability used by containers to wrap lazy definitions.
pub trait ProxyManager {
    /// Wrap `factory` in a value that constructs `class` on first real use.
    fn get_proxy(&self, class: &str, factory: ProxyFactory) -> Result<Value, ContainerError>;
}

/// Holder of a not-yet-constructed service.
pub struct LazyProxy {
    class: String,
    instance: OnceCell<Value>,
    factory: ProxyFactory,
}

impl LazyProxy {
    pub fn new(class: impl Into<String>, factory: ProxyFactory) -> Self {
        LazyProxy {
            class: class.into(),
            instance: OnceCell::new(),
            factory,
        }
    }

    /// Class the proxy stands in for.
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn is_initialized(&self) -> bool {
        self.instance.get().is_some()
    }

    /// The proxied value, constructing it on the first call.
    ///
    /// A failing factory leaves the proxy uninitialised, so the next call
    /// tries again.
    pub fn instance(&self) -> Result<Value, ContainerError> {
        if let Some(instance) = self.instance.get() {
            return Ok(instance.clone());
        }

        let value = (self.factory)()?;
        Ok(self.instance.get_or_init(|| value).clone())
    }
}

impl fmt::Debug for LazyProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyProxy")
            .field("class", &self.class)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

/// Default proxy manager: wraps every factory in a [`LazyProxy`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LazyProxyManager;

impl LazyProxyManager {
    pub fn new() -> Self {
        LazyProxyManager
    }

    /// Shared handle, as stored in container options.
    pub fn shared() -> Rc<dyn ProxyManager> {
        Rc::new(LazyProxyManager)
    }
}

impl ProxyManager for LazyProxyManager {
    fn get_proxy(&self, class: &str, factory: ProxyFactory) -> Result<Value, ContainerError> {
        Ok(Value::object(LazyProxy::new(class, factory)))
    }
}
