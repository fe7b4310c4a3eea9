//! Root detection and hierarchical traversal of the forest

use std::collections::HashSet;
use serde::{Serialize, Deserialize};
use crate::forest::{SocialForest, UserId};

/// One line of the hierarchical rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeLine {
    /// Distance from the root (roots are at depth 0)
    pub depth: usize,

    pub id: UserId,

    pub label: String,
}

/// Users with no parent, in insertion order
pub fn roots(forest: &SocialForest) -> Vec<UserId> {
    forest
        .iter()
        .filter(|node| node.is_root())
        .map(|node| node.id)
        .collect()
}

/// Depth-first pre-order rendering of every tree, roots in insertion order.
///
/// A user already emitted under an earlier root is not emitted again.
pub fn render(forest: &SocialForest) -> Vec<TreeLine> {
    let mut lines = Vec::with_capacity(forest.len());
    let mut visited: HashSet<UserId> = HashSet::with_capacity(forest.len());

    for root in roots(forest) {
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(node) = forest.lookup(id) else {
                continue;
            };
            lines.push(TreeLine {
                depth,
                id,
                label: node.label.clone(),
            });
            stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }
    }

    lines
}

/// Number of ancestors above `id`
pub fn depth_of(forest: &SocialForest, id: UserId) -> Option<usize> {
    let mut node = forest.lookup(id)?;
    let mut depth = 0;
    while let Some(parent) = node.parent {
        // Bounded by len() so a corrupted parent chain cannot spin forever
        if depth >= forest.len() {
            return None;
        }
        node = forest.lookup(parent)?;
        depth += 1;
    }
    Some(depth)
}

/// `id` followed by all of its descendants in pre-order
pub fn subtree(forest: &SocialForest, id: UserId) -> Vec<UserId> {
    let mut ids = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![id];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        if let Some(node) = forest.lookup(current) {
            ids.push(current);
            stack.extend(node.children.iter().rev());
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SocialForest {
        let mut forest = SocialForest::new();
        forest.insert(1, "Alice", None);
        forest.insert(2, "Bob", Some(1));
        forest.insert(3, "Carol", Some(1));
        forest.insert(4, "David", Some(2));
        forest.insert(5, "Gabriel", Some(3));
        forest.insert(6, "Hana", None);
        forest
    }

    #[test]
    fn roots_are_parentless_in_insertion_order() {
        let forest = sample();
        assert_eq!(roots(&forest), vec![1, 6]);
        assert_eq!(roots(&forest), roots(&forest));
    }

    #[test]
    fn render_is_preorder_with_depths() {
        let forest = sample();
        let lines = render(&forest);
        let pairs: Vec<(usize, &str)> = lines.iter().map(|l| (l.depth, l.label.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                (0, "Alice"),
                (1, "Bob"),
                (2, "David"),
                (1, "Carol"),
                (2, "Gabriel"),
                (0, "Hana"),
            ]
        );
        assert_eq!(lines[2].id, 4);
    }

    #[test]
    fn render_empty_forest() {
        assert!(render(&SocialForest::new()).is_empty());
    }

    #[test]
    fn depth_and_subtree() {
        let forest = sample();
        assert_eq!(depth_of(&forest, 1), Some(0));
        assert_eq!(depth_of(&forest, 4), Some(2));
        assert_eq!(depth_of(&forest, 99), None);
        assert_eq!(subtree(&forest, 1), vec![1, 2, 4, 3, 5]);
        assert_eq!(subtree(&forest, 6), vec![6]);
        assert!(subtree(&forest, 99).is_empty());
    }
}
