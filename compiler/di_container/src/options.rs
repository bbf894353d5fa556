use std::fmt;
use std::rc::Rc;

use di_ir::{Argument, Tag};
use di_runtime::{LazyProxyManager, ProxyManager};

/// Container behavior switches.
#[derive(Clone)]
pub struct ContainerOptions {
    /// Refuse ids without a definition instead of defining them as classes.
    pub locked: bool,
    pub proxy_manager: Rc<dyn ProxyManager>,
    /// Alias abstract types to their single implementing definition.
    pub auto_binding: bool,
    /// Arguments applied by parameter name to every class definition that
    /// does not set them itself.
    pub global_arguments: Vec<(String, Argument)>,
    /// Tags given to every class definition that is, or implements, a type.
    pub auto_tags: Vec<(String, Tag)>,
}

impl ContainerOptions {
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    #[must_use]
    pub fn with_proxy_manager(mut self, proxy_manager: Rc<dyn ProxyManager>) -> Self {
        self.proxy_manager = proxy_manager;
        self
    }

    #[must_use]
    pub fn with_auto_binding(mut self, auto_binding: bool) -> Self {
        self.auto_binding = auto_binding;
        self
    }

    #[must_use]
    pub fn with_global_argument(
        mut self,
        name: impl Into<String>,
        argument: impl Into<Argument>,
    ) -> Self {
        let name = name.into();
        let argument = argument.into();
        match self.global_arguments.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = argument,
            None => self.global_arguments.push((name, argument)),
        }
        self
    }

    #[must_use]
    pub fn with_auto_tag(mut self, class: impl Into<String>, tag: Tag) -> Self {
        self.auto_tags.push((class.into(), tag));
        self
    }

    pub(crate) fn global_argument(&self, name: &str) -> Option<&Argument> {
        self.global_arguments
            .iter()
            .find_map(|(n, argument)| (n == name).then_some(argument))
    }
}

impl Default for ContainerOptions {
    fn default() -> Self {
        ContainerOptions {
            locked: false,
            proxy_manager: LazyProxyManager::shared(),
            auto_binding: true,
            global_arguments: Vec::new(),
            auto_tags: Vec::new(),
        }
    }
}

impl fmt::Debug for ContainerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerOptions")
            .field("locked", &self.locked)
            .field("auto_binding", &self.auto_binding)
            .field("global_arguments", &self.global_arguments)
            .field("auto_tags", &self.auto_tags)
            .finish_non_exhaustive()
    }
}
