//! DOM capability abstraction.
//!
//! The engine never touches a real document; it talks to a [`DomPage`]
//! implementation. `MemoryPage` is the in-memory implementation used by the
//! demo binary and by tests.

pub mod memory;
pub mod page;
pub mod selector;

pub use memory::{Element, MemoryPage, PageEffect};
pub use page::{DomPage, NodeId, ScrollTarget};
pub use selector::Selector;
