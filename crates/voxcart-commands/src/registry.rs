//! Ordered command sets and the per-cycle overlay merge.

use crate::command::Command;
use std::collections::HashMap;

/// An ordered set of commands with unique lowercase keys.
///
/// Insertion order is enumeration order. Inserting a colliding key replaces
/// the entry in place, keeping the original position (last write wins).
#[derive(Debug, Clone, Default)]
pub struct CommandSet {
    entries: Vec<Command>,
    index: HashMap<String, usize>,
}

impl CommandSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, command: Command) {
        match self.index.get(&command.pattern) {
            Some(&pos) => self.entries[pos] = command,
            None => {
                self.index
                    .insert(command.pattern.clone(), self.entries.len());
                self.entries.push(command);
            }
        }
    }

    pub fn get(&self, pattern: &str) -> Option<&Command> {
        self.index.get(pattern).map(|&pos| &self.entries[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a CommandSet {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Overlays the discovered set on the static set for one resolution cycle.
///
/// Enumeration order is the static declared order followed by new discovered
/// keys in scan order; a discovered entry whose key collides with a static
/// one shadows it while keeping the static position. These are exactly the
/// spread semantics the vocabulary was written against, so collisions shadow
/// deliberately rather than accidentally.
pub fn merge_for_cycle<'a>(
    static_set: &'a CommandSet,
    discovered: &'a CommandSet,
) -> Vec<&'a Command> {
    let mut merged: Vec<&'a Command> = Vec::with_capacity(static_set.len() + discovered.len());
    for cmd in static_set.iter() {
        merged.push(discovered.get(&cmd.pattern).unwrap_or(cmd));
    }
    for cmd in discovered.iter() {
        if static_set.get(&cmd.pattern).is_none() {
            merged.push(cmd);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandOrigin, FeedbackText, PageAction};
    use voxcart_dom::NodeId;

    fn stat(pattern: &str) -> Command {
        Command::new(
            pattern,
            PageAction::Navigate("/"),
            CommandOrigin::Static,
            FeedbackText::new("ok", "ok"),
        )
    }

    fn disc(pattern: &str, node: u64) -> Command {
        Command::new(
            pattern,
            PageAction::ClickNode(NodeId(node)),
            CommandOrigin::Discovered,
            FeedbackText::new("ok", "ok"),
        )
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut set = CommandSet::new();
        set.insert(disc("click one", 1));
        set.insert(disc("click two", 2));
        set.insert(disc("click one", 3));
        assert_eq!(set.len(), 2);
        let first = set.iter().next().unwrap();
        assert_eq!(first.pattern, "click one");
        assert_eq!(first.action, PageAction::ClickNode(NodeId(3)));
    }

    #[test]
    fn merge_keeps_static_order_and_overlays_collisions() {
        let mut static_set = CommandSet::new();
        static_set.insert(stat("go to home"));
        static_set.insert(stat("go to cart"));

        let mut discovered = CommandSet::new();
        discovered.insert(disc("go to cart", 7));
        discovered.insert(disc("click checkout", 8));

        let merged = merge_for_cycle(&static_set, &discovered);
        let patterns: Vec<&str> = merged.iter().map(|c| c.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["go to home", "go to cart", "click checkout"]);
        // The collided key carries the discovered action at the static slot.
        assert_eq!(merged[1].action, PageAction::ClickNode(NodeId(7)));
        assert_eq!(merged[1].origin, CommandOrigin::Discovered);
    }

    #[test]
    fn merge_of_empty_discovered_is_identity() {
        let mut static_set = CommandSet::new();
        static_set.insert(stat("help"));
        let empty = CommandSet::new();
        let merged = merge_for_cycle(&static_set, &empty);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].pattern, "help");
    }
}
