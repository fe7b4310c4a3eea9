//! Owning container for every user in the social network

use std::collections::HashMap;
use crate::error::ForestError;
use crate::forest::{UserId, UserNode};

/// Slot count below which `remove` never compacts
const COMPACT_MIN_SLOTS: usize = 64;

/// Forest of users linked by parent -> child relationships.
///
/// Nodes live in insertion-ordered slots; `index` maps each live id to its
/// slot. Re-inserting an existing id reuses the slot, so iteration order is
/// the order in which ids were first inserted.
#[derive(Debug, Clone, Default)]
pub struct SocialForest {
    /// Node slots, `None` once the node has been removed
    slots: Vec<Option<UserNode>>,

    /// Mapping from user ids to slot indices
    index: HashMap<UserId, usize>,
}

impl SocialForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty forest with room for `capacity` users
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Number of live users
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.index.contains_key(&id)
    }

    /// Get a user by id
    pub fn lookup(&self, id: UserId) -> Option<&UserNode> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_ref()
    }

    /// Label of a user, if present
    pub fn label(&self, id: UserId) -> Option<&str> {
        self.lookup(id).map(|node| node.label.as_str())
    }

    /// Iterate over live users in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &UserNode> + '_ {
        self.slots.iter().flatten()
    }

    /// Total number of parent -> child links
    pub fn edge_count(&self) -> usize {
        self.iter().map(UserNode::child_count).sum()
    }

    /// Total number of recorded interactions
    pub fn interaction_count(&self) -> usize {
        self.iter().map(|node| node.interactions.len()).sum()
    }

    fn node_mut(&mut self, id: UserId) -> Option<&mut UserNode> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_mut()
    }

    /// Insert a user, optionally as the last child of `parent_id`.
    ///
    /// An existing user with the same id is replaced: it is detached from
    /// its parent, its children become roots and its interactions are
    /// dropped. A parent that does not resolve (or is `id` itself) leaves
    /// the new user as a root.
    pub fn insert(&mut self, id: UserId, label: impl Into<String>, parent_id: Option<UserId>) {
        let existing = self.index.get(&id).copied();
        let slot = match existing {
            Some(slot) => {
                self.release(id);
                slot
            }
            None => {
                let slot = self.slots.len();
                self.slots.push(None);
                self.index.insert(id, slot);
                slot
            }
        };

        let parent = parent_id.filter(|&p| p != id && self.index.contains_key(&p));
        if parent.is_none() {
            if let Some(p) = parent_id {
                log::debug!("Parent {} of user {} does not resolve, inserting as root", p, id);
            }
        }

        let mut node = UserNode::new(id, label);
        node.parent = parent;
        self.slots[slot] = Some(node);

        if let Some(p) = parent {
            if let Some(parent_node) = self.node_mut(p) {
                parent_node.children.push(id);
            }
        }
    }

    /// Strict insert: refuses duplicates and parents that do not resolve.
    pub fn try_insert(
        &mut self,
        id: UserId,
        label: impl Into<String>,
        parent_id: Option<UserId>,
    ) -> Result<(), ForestError> {
        if self.contains(id) {
            return Err(ForestError::DuplicateUser(id));
        }
        if let Some(parent) = parent_id {
            if parent == id {
                return Err(ForestError::SelfParent(id));
            }
            if !self.contains(parent) {
                return Err(ForestError::UnknownParent { id, parent });
            }
        }
        self.insert(id, label, parent_id);
        Ok(())
    }

    /// Unlink an existing node from its parent and orphan its children.
    fn release(&mut self, id: UserId) {
        let Some(old) = self.node_mut(id) else {
            return;
        };
        let parent = old.parent.take();
        let children = std::mem::take(&mut old.children);

        if let Some(p) = parent {
            self.detach_child(p, id);
        }
        if !children.is_empty() {
            log::debug!("Replacing user {}: promoting {} children to roots", id, children.len());
        }
        for child in children {
            if let Some(child_node) = self.node_mut(child) {
                child_node.parent = None;
            }
        }
    }

    fn detach_child(&mut self, parent: UserId, child: UserId) {
        if let Some(parent_node) = self.node_mut(parent) {
            if let Some(pos) = parent_node.children.iter().position(|&c| c == child) {
                parent_node.children.remove(pos);
            }
        }
    }

    /// Remove a user together with every descendant.
    ///
    /// Returns the removed ids in pre-order; empty when `id` is unknown.
    pub fn remove(&mut self, id: UserId) -> Vec<UserId> {
        let Some(parent) = self.lookup(id).map(|node| node.parent) else {
            return Vec::new();
        };
        if let Some(p) = parent {
            self.detach_child(p, id);
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.index.remove(&current) else {
                continue;
            };
            if let Some(node) = self.slots[slot].take() {
                stack.extend(node.children.iter().rev());
                removed.push(current);
            }
        }

        log::debug!("Removed user {} and {} descendants", id, removed.len() - 1);

        let tombstones = self.slots.len() - self.index.len();
        if self.slots.len() > COMPACT_MIN_SLOTS && tombstones > self.index.len() {
            self.compact();
        }

        removed
    }

    /// Strict remove: fails for an unknown id.
    pub fn try_remove(&mut self, id: UserId) -> Result<Vec<UserId>, ForestError> {
        if !self.contains(id) {
            return Err(ForestError::UnknownUser(id));
        }
        Ok(self.remove(id))
    }

    /// Drop tombstoned slots, keeping iteration order.
    pub fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        self.index.clear();
        for (slot, node) in self.slots.iter().enumerate() {
            if let Some(node) = node {
                self.index.insert(node.id, slot);
            }
        }
    }

    /// Record the latest message from `sender` to `recipient`.
    ///
    /// Returns `false` (and records nothing) when the sender is unknown.
    /// The recipient is not required to exist.
    pub fn record_interaction(
        &mut self,
        sender: UserId,
        recipient: UserId,
        message: impl Into<String>,
    ) -> bool {
        match self.node_mut(sender) {
            Some(node) => {
                node.add_interaction(recipient, message);
                true
            }
            None => {
                log::debug!("Ignoring interaction from unknown user {}", sender);
                false
            }
        }
    }

    /// Strict variant of `record_interaction`.
    pub fn try_record_interaction(
        &mut self,
        sender: UserId,
        recipient: UserId,
        message: impl Into<String>,
    ) -> Result<(), ForestError> {
        if self.record_interaction(sender, recipient, message) {
            Ok(())
        } else {
            Err(ForestError::UnknownUser(sender))
        }
    }

    /// Verify the parent/child links of every node.
    pub fn check_consistency(&self) -> Result<(), ForestError> {
        let mut parent_of: HashMap<UserId, UserId> = HashMap::with_capacity(self.len());

        for node in self.iter() {
            for &child in &node.children {
                let Some(child_node) = self.lookup(child) else {
                    return Err(ForestError::Inconsistent(format!(
                        "user {} lists missing child {}", node.id, child
                    )));
                };
                if let Some(previous) = parent_of.insert(child, node.id) {
                    return Err(ForestError::Inconsistent(format!(
                        "user {} is a child of both {} and {}", child, previous, node.id
                    )));
                }
                if child_node.parent != Some(node.id) {
                    return Err(ForestError::Inconsistent(format!(
                        "user {} does not point back to parent {}", child, node.id
                    )));
                }
            }

            if let Some(parent) = node.parent {
                let listed = self
                    .lookup(parent)
                    .map_or(false, |p| p.children.contains(&node.id));
                if !listed {
                    return Err(ForestError::Inconsistent(format!(
                        "parent {} does not list user {}", parent, node.id
                    )));
                }
            }
        }

        // Walking up more than len() parents means a cycle
        for node in self.iter() {
            let mut steps = 0;
            let mut current = node.parent;
            while let Some(p) = current {
                steps += 1;
                if steps > self.len() {
                    return Err(ForestError::Inconsistent(format!(
                        "cycle through user {}", node.id
                    )));
                }
                current = self.lookup(p).and_then(|n| n.parent);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SocialForest {
        let mut forest = SocialForest::new();
        forest.insert(1, "A", None);
        forest.insert(2, "B", Some(1));
        forest.insert(3, "C", Some(1));
        forest.insert(4, "D", Some(2));
        forest
    }

    #[test]
    fn insert_links_parent_and_child() {
        let forest = sample();
        assert_eq!(forest.len(), 4);
        assert_eq!(forest.lookup(1).unwrap().children, vec![2, 3]);
        assert_eq!(forest.lookup(4).unwrap().parent, Some(2));
        assert!(forest.check_consistency().is_ok());
    }

    #[test]
    fn unknown_parent_makes_a_root() {
        let mut forest = SocialForest::new();
        forest.insert(1, "A", Some(99));
        assert!(forest.lookup(1).unwrap().is_root());
    }

    #[test]
    fn self_parent_is_ignored_on_reinsert() {
        let mut forest = sample();
        forest.insert(1, "A2", Some(1));
        assert!(forest.lookup(1).unwrap().is_root());
        assert!(forest.lookup(1).unwrap().children.is_empty());
        assert!(forest.check_consistency().is_ok());
    }

    #[test]
    fn reinsert_promotes_old_children_and_detaches() {
        let mut forest = sample();
        forest.record_interaction(2, 3, "oi");
        forest.insert(2, "B2", Some(3));

        assert_eq!(forest.len(), 4);
        assert_eq!(forest.lookup(1).unwrap().children, vec![3]);
        assert_eq!(forest.lookup(3).unwrap().children, vec![2]);
        assert!(forest.lookup(4).unwrap().is_root());
        assert!(forest.lookup(2).unwrap().interactions.is_empty());
        assert_eq!(forest.label(2), Some("B2"));
        assert!(forest.check_consistency().is_ok());

        // Slot reused: B2 still iterates second
        let order: Vec<UserId> = forest.iter().map(|n| n.id).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
    }

    #[test]
    fn remove_deletes_whole_subtree() {
        let mut forest = sample();
        forest.insert(5, "E", Some(4));

        let removed = forest.remove(2);
        assert_eq!(removed, vec![2, 4, 5]);
        assert_eq!(forest.len(), 2);
        assert!(forest.lookup(5).is_none());
        assert_eq!(forest.lookup(1).unwrap().children, vec![3]);
        assert!(forest.check_consistency().is_ok());
    }

    #[test]
    fn remove_unknown_is_a_noop() {
        let mut forest = sample();
        assert!(forest.remove(42).is_empty());
        assert_eq!(forest.len(), 4);
    }

    #[test]
    fn strict_operations_report_errors_without_mutating() {
        let mut forest = sample();
        assert_eq!(forest.try_insert(1, "X", None), Err(ForestError::DuplicateUser(1)));
        assert_eq!(
            forest.try_insert(9, "X", Some(77)),
            Err(ForestError::UnknownParent { id: 9, parent: 77 })
        );
        assert_eq!(forest.try_insert(9, "X", Some(9)), Err(ForestError::SelfParent(9)));
        assert_eq!(forest.try_remove(9), Err(ForestError::UnknownUser(9)));
        assert_eq!(
            forest.try_record_interaction(9, 1, "oi"),
            Err(ForestError::UnknownUser(9))
        );
        assert_eq!(forest.len(), 4);
        assert_eq!(forest.label(1), Some("A"));
    }

    #[test]
    fn compaction_keeps_order_and_lookups() {
        let mut forest = SocialForest::new();
        for id in 0..200 {
            forest.insert(id, format!("u{}", id), None);
        }
        for id in (0..200).filter(|id| id % 3 != 0) {
            forest.remove(id);
        }

        let ids: Vec<UserId> = forest.iter().map(|n| n.id).collect();
        let expected: Vec<UserId> = (0..200).filter(|id| id % 3 == 0).collect();
        assert_eq!(ids, expected);
        assert_eq!(forest.label(99), Some("u99"));
    }

    #[test]
    fn interactions_require_known_sender() {
        let mut forest = sample();
        assert!(forest.record_interaction(1, 2, "oi"));
        assert!(forest.record_interaction(1, 404, "alguém?"));
        assert!(!forest.record_interaction(404, 1, "oi"));
        assert_eq!(forest.interaction_count(), 2);
    }
}
