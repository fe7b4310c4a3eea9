//! Degree centrality and community metrics

use std::collections::HashSet;
use crate::community::{Community, CENTRAL_MEMBER_COUNT};
use crate::forest::{SocialForest, UserId};

/// Child count of every user, in insertion order.
///
/// Strictly out-degree: incoming parent links are not counted and nothing
/// is normalised.
pub fn degree_centrality(forest: &SocialForest) -> Vec<(UserId, usize)> {
    forest
        .iter()
        .map(|node| (node.id, node.child_count()))
        .collect()
}

/// The `n` users with the most children, highest first.
///
/// Ties keep insertion order.
pub fn top_central(forest: &SocialForest, n: usize) -> Vec<(UserId, usize)> {
    let mut degrees = degree_centrality(forest);
    degrees.sort_by(|a, b| b.1.cmp(&a.1));
    degrees.truncate(n);
    degrees
}

/// Recompute the metrics of a community from the current forest
pub fn calculate_community_metrics(community: &mut Community, forest: &SocialForest) {
    community.size = community.members.len();
    community.density = community_density(forest, &community.members);
    community.central_members = central_members(forest, &community.members, CENTRAL_MEMBER_COUNT);
}

/// Parent -> child links inside `members` divided by `members.len() - 1`
pub fn community_density(forest: &SocialForest, members: &[UserId]) -> f32 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton communities have density 1
    }

    let member_set: HashSet<UserId> = members.iter().copied().collect();

    let internal_links: usize = members
        .iter()
        .filter_map(|&id| forest.lookup(id))
        .map(|node| {
            node.children
                .iter()
                .filter(|&child| member_set.contains(child))
                .count()
        })
        .sum();

    internal_links as f32 / (n - 1) as f32
}

/// Up to `n` members with the highest child count, ties in member order
pub fn central_members(forest: &SocialForest, members: &[UserId], n: usize) -> Vec<UserId> {
    let mut degrees: Vec<(UserId, usize)> = members
        .iter()
        .map(|&id| (id, forest.lookup(id).map_or(0, |node| node.child_count())))
        .collect();

    degrees.sort_by(|a, b| b.1.cmp(&a.1));

    degrees.into_iter().take(n).map(|(id, _)| id).collect()
}
