use std::rc::Rc;

use indexmap::IndexMap;

use crate::Definition;

/// Definitions keyed by id, in insertion order.
///
/// Order matters: it decides compiled slot numbers and the order tagged
/// services come out in when priorities tie.
#[derive(Debug, Default)]
pub struct Definitions(IndexMap<String, Rc<Definition>>);

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a definition. Replacing keeps the original position.
    pub fn insert(&mut self, id: impl Into<String>, definition: impl Into<Definition>) -> &mut Self {
        self.0.insert(id.into(), Rc::new(definition.into()));
        self
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<String>, definition: impl Into<Definition>) -> Self {
        self.insert(id, definition);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Rc<Definition>> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<Definition>)> {
        self.0.iter().map(|(id, definition)| (id.as_str(), definition))
    }

    pub fn into_inner(self) -> IndexMap<String, Rc<Definition>> {
        self.0
    }
}

impl<I: Into<String>, D: Into<Definition>> FromIterator<(I, D)> for Definitions {
    fn from_iter<T: IntoIterator<Item = (I, D)>>(iter: T) -> Self {
        let mut definitions = Definitions::new();
        for (id, definition) in iter {
            definitions.insert(id, definition);
        }
        definitions
    }
}

impl From<IndexMap<String, Rc<Definition>>> for Definitions {
    fn from(map: IndexMap<String, Rc<Definition>>) -> Self {
        Definitions(map)
    }
}
