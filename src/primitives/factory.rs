//! Component Factory - One typed node per call.
//!
//! A factory pairs a type name with a zero-state constructor and a list of
//! default options. Calling it builds the node, stamps the type name and
//! pushes it onto the builder with defaults applied before caller options.

use std::fmt;
use std::rc::Rc;

use crate::engine::{Builder, Node};
use crate::error::{ComposeError, Result};
use crate::types::{NodeFlags, NodeId};

use super::options::Opt;

/// Constructor plus defaults for one component type.
#[derive(Clone)]
pub struct ComponentFactory {
    type_name: Rc<str>,
    constructor: Rc<dyn Fn() -> Node>,
    defaults: Vec<Opt>,
}

impl fmt::Debug for ComponentFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentFactory")
            .field("type_name", &self.type_name)
            .field("defaults", &self.defaults.len())
            .finish()
    }
}

impl ComponentFactory {
    pub fn new<F>(type_name: &str, constructor: F) -> Self
    where
        F: Fn() -> Node + 'static,
    {
        Self {
            type_name: Rc::from(type_name),
            constructor: Rc::new(constructor),
            defaults: Vec::new(),
        }
    }

    /// New factory sharing this one's constructor, with `defaults` applied
    /// after this factory's own defaults.
    ///
    /// ```ignore
    /// let danger = button_factory().derive("DangerButton", [bg_color(0xcc0000ff)]);
    /// ```
    pub fn derive(&self, type_name: &str, defaults: impl IntoIterator<Item = Opt>) -> Self {
        let mut merged = self.defaults.clone();
        merged.extend(defaults);
        Self {
            type_name: Rc::from(type_name),
            constructor: self.constructor.clone(),
            defaults: merged,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn defaults(&self) -> &[Opt] {
        &self.defaults
    }

    /// True when nodes of this type must declare a composer.
    pub fn requires_children(&self) -> bool {
        self.instantiate().flags().contains(NodeFlags::REQUIRES_COMPOSER)
    }

    /// Zero-state node stamped with this factory's type name.
    pub fn instantiate(&self) -> Node {
        let mut node = (self.constructor)();
        node.type_name = self.type_name.clone();
        node
    }

    /// Build one node. Without a builder nothing is constructed.
    pub fn create(&self, builder: Option<&mut Builder>, options: &[Opt]) -> Result<NodeId> {
        let Some(builder) = builder else {
            tracing::debug!(type_name = self.type_name(), "factory called without builder");
            return Err(ComposeError::MissingBuilder {
                type_name: self.type_name.to_string(),
            });
        };
        self.call(builder, options)
    }

    /// Build one node on `builder`.
    pub fn call(&self, builder: &mut Builder, options: &[Opt]) -> Result<NodeId> {
        builder.push_with_defaults(self.instantiate(), &self.defaults, options)
    }
}
