//! State Module - Runtime state over a built tree.
//!
//! - **Focus** - Exclusive focus, nearest-focusable lookup, Tab-style cycling

pub mod focus;

pub use focus::*;
