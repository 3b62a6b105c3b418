//! Type system utilities and aliases.
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>` shared state.

pub mod aliases;

pub use aliases::*;
