//! Primitives - Options, factories and built-in components.
//!
//! - [`Opt`] and the option constructors configure one node
//! - [`ComponentFactory`] turns a constructor and defaults into a typed factory
//! - [`box_primitive`], [`hbox`], [`vbox`], [`label`], [`button`] are the built-ins
//!
//! Every factory takes the builder explicitly:
//!
//! ```ignore
//! vbox(b, &[padding(10.0), children(|b| {
//!     label(b, &[text("Hello")])?;
//!     Ok(())
//! })])?;
//! ```

mod controls;
mod factory;
mod options;

pub use controls::*;
pub use factory::ComponentFactory;
pub use options::*;
