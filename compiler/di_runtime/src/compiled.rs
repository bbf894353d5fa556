//! Base of generated containers.
//!
//! A generated container holds a [`CompiledBase`] and implements
//! [`Compiled`]: a static id-to-slot table plus a `dispatch` that calls the
//! slot's accessor. Lookup order lives in [`get`] so every generated
//! container behaves the same:
//!
//! 1. the container's own id
//! 2. shared instances already produced
//! 3. remembered thunks of non-shared services
//! 4. the slot table
//! 5. the fallback container, if any

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::{Container, ContainerError, LazyProxyManager, ProxyManager, Value, CONTAINER_ID};

/// Accessor of a non-shared service, remembered so it is not looked up again.
pub type Thunk<C> = fn(&Rc<C>) -> Result<Value, ContainerError>;

/// Implemented by generated containers.
pub trait Compiled: Container + Sized + 'static {
    /// Id to accessor slot, in definition order.
    const MAPPINGS: &'static [(&'static str, usize)];

    fn base(&self) -> &CompiledBase<Self>;

    /// Call the accessor assigned to `slot`.
    fn dispatch(c: &Rc<Self>, slot: usize) -> Result<Value, ContainerError>;
}

/// Runtime options of a generated container.
#[derive(Clone)]
pub struct CompiledOptions {
    pub proxy_manager: Rc<dyn ProxyManager>,
    /// Consulted for ids the generated code does not know.
    pub fallback: Option<Rc<dyn Container>>,
}

impl CompiledOptions {
    #[must_use]
    pub fn with_proxy_manager(mut self, proxy_manager: Rc<dyn ProxyManager>) -> Self {
        self.proxy_manager = proxy_manager;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Rc<dyn Container>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl Default for CompiledOptions {
    fn default() -> Self {
        CompiledOptions {
            proxy_manager: LazyProxyManager::shared(),
            fallback: None,
        }
    }
}

impl fmt::Debug for CompiledOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledOptions")
            .field("fallback", &self.fallback.is_some())
            .finish_non_exhaustive()
    }
}

/// State shared by all generated containers.
pub struct CompiledBase<C> {
    this: Weak<C>,
    slots: FxHashMap<&'static str, usize>,
    resolved: RefCell<FxHashMap<String, Value>>,
    thunks: RefCell<FxHashMap<String, Thunk<C>>>,
    options: CompiledOptions,
}

impl<C: Compiled> CompiledBase<C> {
    /// Called from `Rc::new_cyclic` with the container's own weak handle.
    pub fn new(this: Weak<C>, options: CompiledOptions) -> Self {
        CompiledBase {
            this,
            slots: C::MAPPINGS.iter().copied().collect(),
            resolved: RefCell::new(FxHashMap::default()),
            thunks: RefCell::new(FxHashMap::default()),
            options,
        }
    }

    /// Strong handle to the owning container.
    pub fn handle(&self) -> Result<Rc<C>, ContainerError> {
        upgrade(&self.this)
    }

    pub fn slot(&self, id: &str) -> Option<usize> {
        self.slots.get(id).copied()
    }

    /// The shared instance produced for `id`, if any.
    pub fn resolved(&self, id: &str) -> Option<Value> {
        self.resolved.borrow().get(id).cloned()
    }

    /// Record the shared instance of `id` and hand it back.
    pub fn share(&self, id: &str, value: Value) -> Value {
        self.resolved
            .borrow_mut()
            .insert(id.to_owned(), value.clone());
        value
    }

    /// Record the accessor of a non-shared `id` and hand it back.
    pub fn remember(&self, id: &str, thunk: Thunk<C>) -> Thunk<C> {
        self.thunks.borrow_mut().insert(id.to_owned(), thunk);
        thunk
    }

    pub fn thunk(&self, id: &str) -> Option<Thunk<C>> {
        self.thunks.borrow().get(id).copied()
    }

    pub fn proxy_manager(&self) -> Rc<dyn ProxyManager> {
        Rc::clone(&self.options.proxy_manager)
    }

    pub fn fallback(&self) -> Option<&Rc<dyn Container>> {
        self.options.fallback.as_ref()
    }

    /// The container itself as a value.
    pub fn container_value(&self) -> Result<Value, ContainerError> {
        let handle: Rc<dyn Container> = self.handle()?;
        Ok(Value::Container(handle))
    }
}

/// Upgrade a weak container handle held by a lazy factory.
pub fn upgrade<C>(this: &Weak<C>) -> Result<Rc<C>, ContainerError> {
    this.upgrade().ok_or(ContainerError::ContainerDropped)
}

/// Lookup shared by every generated `Container::get`.
pub fn get<C: Compiled>(container: &C, id: &str) -> Result<Value, ContainerError> {
    let base = container.base();

    if id == CONTAINER_ID {
        return base.container_value();
    }

    if let Some(value) = base.resolved(id) {
        return Ok(value);
    }

    if let Some(thunk) = base.thunk(id) {
        return thunk(&base.handle()?);
    }

    if let Some(slot) = base.slot(id) {
        return C::dispatch(&base.handle()?, slot);
    }

    match base.fallback() {
        Some(fallback) => fallback.get(id),
        None => Err(ContainerError::not_found(id)),
    }
}

/// Lookup shared by every generated `Container::has`.
pub fn has<C: Compiled>(container: &C, id: &str) -> bool {
    let base = container.base();

    id == CONTAINER_ID
        || base.slot(id).is_some()
        || base.resolved(id).is_some()
        || base.fallback().is_some_and(|fallback| fallback.has(id))
}
