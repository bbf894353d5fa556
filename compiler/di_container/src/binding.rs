//! Auto-binding of abstract types to their implementations.

use std::rc::Rc;

use di_ir::{AliasDefinition, Definition};
use indexmap::IndexMap;

/// Alias every implemented type that has exactly one providing definition
/// and no definition of its own.
pub(crate) fn bind_interfaces(definitions: &mut IndexMap<String, Rc<Definition>>) {
    let mut providers: IndexMap<String, Vec<String>> = IndexMap::new();

    for (id, definition) in definitions.iter() {
        let Some(class) = definition.as_class() else {
            continue;
        };

        for interface in &class.class().implements {
            providers
                .entry(interface.clone())
                .or_default()
                .push(id.clone());
        }
    }

    for (interface, ids) in providers {
        if definitions.contains_key(&interface) {
            continue;
        }

        match ids.as_slice() {
            [id] => {
                tracing::debug!(%interface, provider = %id, "auto-binding");
                definitions.insert(interface, Rc::new(AliasDefinition::new(id.as_str()).into()));
            }
            _ => tracing::trace!(%interface, count = ids.len(), "ambiguous binding skipped"),
        }
    }
}
