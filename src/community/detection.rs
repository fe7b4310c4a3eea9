//! Community detection algorithms

use std::collections::{HashMap, HashSet};
use crate::community::Community;
use crate::community::metrics::calculate_community_metrics;
use crate::config::Config;
use crate::forest::{SocialForest, UserId};

/// Union-Find over slot positions, used for the undirected variant
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of element i)
    parent: Vec<usize>,

    /// Size of each set (for union by size)
    size: Vec<usize>,
}

impl DisjointSets {
    /// Create `n` singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Find the representative of the set containing x
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Path compression
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach the smaller set under the larger one
        if self.size[root_x] >= self.size[root_y] {
            self.parent[root_y] = root_x;
            self.size[root_x] += self.size[root_y];
        } else {
            self.parent[root_x] = root_y;
            self.size[root_y] += self.size[root_x];
        }
    }

    /// Size of the set containing x
    pub fn size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}

/// Partition users by depth-first traversal along child links.
///
/// The outer loop walks users in insertion order and starts a new group at
/// every user not yet visited. Each group lists ids in visitation order,
/// children in their stored order.
pub fn collect_components(forest: &SocialForest) -> Vec<Vec<UserId>> {
    let mut components = Vec::new();
    let mut visited: HashSet<UserId> = HashSet::with_capacity(forest.len());

    for start in forest.iter() {
        if visited.contains(&start.id) {
            continue;
        }

        let mut component = Vec::new();
        let mut stack = vec![start.id];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(node) = forest.lookup(id) else {
                continue;
            };
            component.push(id);
            stack.extend(node.children.iter().rev().filter(|child| !visited.contains(*child)));
        }

        if !component.is_empty() {
            components.push(component);
        }
    }

    components
}

/// Communities as label lists, in discovery order
pub fn find_communities(forest: &SocialForest) -> Vec<Vec<String>> {
    collect_components(forest)
        .into_iter()
        .map(|component| labels_of(forest, &component))
        .collect()
}

/// Communities treating every parent/child link as undirected.
///
/// Groups appear in order of their first member; members keep insertion
/// order. On a well-formed forest this yields the same partition as
/// `collect_components`.
pub fn find_undirected_communities(forest: &SocialForest) -> Vec<Vec<UserId>> {
    let ids: Vec<UserId> = forest.iter().map(|node| node.id).collect();
    let position: HashMap<UserId, usize> = ids
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, i))
        .collect();

    let mut sets = DisjointSets::new(ids.len());
    for (i, node) in forest.iter().enumerate() {
        for child in &node.children {
            if let Some(&j) = position.get(child) {
                sets.union(i, j);
            }
        }
    }

    let mut group_of_root: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<Vec<UserId>> = Vec::new();
    for (i, &id) in ids.iter().enumerate() {
        let root = sets.find(i);
        let group = *group_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::with_capacity(sets.size[root]));
            groups.len() - 1
        });
        groups[group].push(id);
    }

    groups
}

/// Discover communities with their metrics.
///
/// Communities smaller than `config.min_community_size` are dropped; ids
/// stay sequential over the communities kept.
pub fn detect(forest: &SocialForest, config: &Config) -> Vec<Community> {
    log::info!("Finding communities among {} users", forest.len());

    let communities: Vec<Community> = collect_components(forest)
        .into_iter()
        .filter(|members| members.len() >= config.min_community_size)
        .enumerate()
        .map(|(id, members)| {
            let mut community = Community {
                id: id as u32,
                root: members[0],
                labels: labels_of(forest, &members),
                size: members.len(),
                members,
                density: 0.0,
                central_members: Vec::new(),
            };
            calculate_community_metrics(&mut community, forest);
            community
        })
        .collect();

    log::info!(
        "Found {} communities with {} or more members",
        communities.len(),
        config.min_community_size
    );

    communities
}

fn labels_of(forest: &SocialForest, ids: &[UserId]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| forest.label(id))
        .map(str::to_string)
        .collect()
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
    fn single_tree_is_one_community_in_dfs_order() {
        let forest = sample();
        assert_eq!(find_communities(&forest), vec![vec!["A", "B", "D", "C"]]);
    }

    #[test]
    fn isolated_users_are_singletons() {
        let mut forest = sample();
        forest.insert(5, "E", None);
        forest.insert(6, "F", Some(404));
        let communities = find_communities(&forest);
        assert_eq!(communities.len(), 3);
        assert_eq!(communities[1], vec!["E"]);
        assert_eq!(communities[2], vec!["F"]);
    }

    #[test]
    fn child_listed_before_parent_starts_its_own_community() {
        let mut forest = SocialForest::new();
        forest.insert(1, "A", None);
        forest.insert(2, "B", Some(1));
        // Re-inserting 1 under 2 puts a child ahead of its parent
        forest.insert(1, "A", Some(2));

        assert_eq!(find_communities(&forest), vec![vec!["A"], vec!["B"]]);
        assert_eq!(find_undirected_communities(&forest), vec![vec![1, 2]]);
    }

    #[test]
    fn undirected_matches_directed_on_well_formed_forest() {
        let mut forest = sample();
        forest.insert(5, "E", None);
        forest.insert(6, "F", Some(5));

        let mut directed: Vec<Vec<UserId>> = collect_components(&forest)
            .into_iter()
            .map(|mut c| {
                c.sort_unstable();
                c
            })
            .collect();
        directed.sort();
        let mut undirected = find_undirected_communities(&forest);
        undirected.sort();

        assert_eq!(directed, undirected);
    }

    #[test]
    fn detect_filters_and_scores() {
        let mut forest = sample();
        forest.insert(5, "E", None);
        let config = Config {
            min_community_size: 2,
            ..Config::default()
        };

        let communities = detect(&forest, &config);
        assert_eq!(communities.len(), 1);
        let community = &communities[0];
        assert_eq!(community.id, 0);
        assert_eq!(community.root, 1);
        assert_eq!(community.members, vec![1, 2, 4, 3]);
        assert_eq!(community.size, 4);
        assert_eq!(community.density, 1.0);
        assert_eq!(community.central_members[0], 1);
    }

    #[test]
    fn disjoint_sets_union_and_size() {
        let mut sets = DisjointSets::new(4);
        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(1, 3);
        assert_eq!(sets.size(2), 4);
        assert_eq!(sets.find(0), sets.find(3));
    }
}
