//! Command model, registry, page discovery, and transcript resolution.
//!
//! The static vocabulary ([`builtin`]) and the page-derived set
//! ([`discover`]) are merged per resolution cycle ([`registry`]) and walked
//! once by the greedy matcher ([`resolver`]).

pub mod builtin;
pub mod catalog;
pub mod command;
pub mod discover;
pub mod registry;
pub mod resolver;

pub use builtin::base_commands;
pub use catalog::SelectorCatalog;
pub use command::{Command, CommandOrigin, FeedbackText, PageAction};
pub use discover::discover_page_commands;
pub use registry::{merge_for_cycle, CommandSet};
pub use resolver::{resolve, Resolution};
