//! Type Registry - Factory lookup by type name.
//!
//! A registry is an ordinary value: create one, register factories, and pass
//! it to whatever needs to build components by name. Names register once;
//! a second registration under a taken name is refused and the first entry
//! stays intact.

use std::collections::HashMap;

use crate::error::{ComposeError, Result};
use crate::primitives::{
    box_factory, button_factory, hbox_factory, label_factory, vbox_factory, ComponentFactory, Opt,
};
use crate::types::NodeId;

use super::builder::Builder;

/// Type name → factory table.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    factories: HashMap<String, ComponentFactory>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `Box`, `HBox`, `VBox`, `Label` and `Button`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for factory in [
            box_factory(),
            hbox_factory(),
            vbox_factory(),
            label_factory(),
            button_factory(),
        ] {
            registry.register(factory);
        }
        registry
    }

    /// Add `factory` under its type name.
    ///
    /// Returns `false` and keeps the existing entry if the name is taken.
    pub fn register(&mut self, factory: ComponentFactory) -> bool {
        if self.factories.contains_key(factory.type_name()) {
            tracing::debug!(type_name = factory.type_name(), "type already registered");
            return false;
        }
        tracing::debug!(type_name = factory.type_name(), "type registered");
        self.factories.insert(factory.type_name().to_string(), factory);
        true
    }

    pub fn get(&self, type_name: &str) -> Option<&ComponentFactory> {
        self.factories.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build a node of type `type_name` on `builder`.
    pub fn create(&self, builder: &mut Builder, type_name: &str, options: &[Opt]) -> Result<NodeId> {
        match self.get(type_name) {
            Some(factory) => factory.call(builder, options),
            None => {
                let err = ComposeError::UnknownType(type_name.to_string());
                builder.record(err.clone());
                Err(err)
            }
        }
    }
}
