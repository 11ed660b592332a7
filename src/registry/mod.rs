//! Optional type-identity enrichment
//!
//! A capability the traversal may consult to put a type or class name on a
//! node's display line. Absence of a registry never affects which nodes
//! are discovered or how they are ordered.

use crate::core::types::Address;
use std::collections::HashMap;

/// Looks up a runtime type name for an address.
pub trait TypeRegistry {
    fn type_name_at(&self, address: Address) -> Option<&str>;
}

/// Registry that knows no types
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTypes;

impl TypeRegistry for NoTypes {
    fn type_name_at(&self, _address: Address) -> Option<&str> {
        None
    }
}

/// Map-backed registry: address of a type descriptor to its name
#[derive(Debug, Default)]
pub struct MapTypeRegistry {
    names: HashMap<usize, String>,
}

impl MapTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, address: Address, name: impl Into<String>) -> &mut Self {
        self.names.insert(address.as_usize(), name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TypeRegistry for MapTypeRegistry {
    fn type_name_at(&self, address: Address) -> Option<&str> {
        self.names.get(&address.as_usize()).map(String::as_str)
    }
}
