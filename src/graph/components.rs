//! Connected component analysis

use crate::graph::WeightedGraph;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set (for union by rank)
    rank: Vec<u32>,
}

impl DisjointSets {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            rank: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            self.parent[x as usize] = self.find(px);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Union by rank: attach smaller tree under root of larger tree
        if self.rank[root_x as usize] > self.rank[root_y as usize] {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += self.rank[root_y as usize];
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += self.rank[root_x as usize];
        }
    }
}

/// Connected components of the graph, each a list of node indices.
///
/// Components are ordered by their first node's insertion order, and
/// members within a component keep insertion order, so the grouping is
/// stable across runs.
pub fn connected_components(graph: &WeightedGraph) -> Vec<Vec<u32>> {
    let n = graph.node_count();
    let mut sets = DisjointSets::new(n);

    for u in 0..n as u32 {
        for &(v, _) in graph.neighbors(u) {
            sets.union(u, v);
        }
    }

    let mut root_to_component: Vec<Option<usize>> = vec![None; n];
    let mut components: Vec<Vec<u32>> = Vec::new();

    for u in 0..n as u32 {
        let root = sets.find(u) as usize;
        let slot = match root_to_component[root] {
            Some(slot) => slot,
            None => {
                root_to_component[root] = Some(components.len());
                components.push(Vec::new());
                components.len() - 1
            }
        };
        components[slot].push(u);
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;

    #[test]
    fn two_triangles_are_two_components() {
        let edges = vec![
            ("a", "b", None),
            ("b", "c", None),
            ("c", "a", None),
            ("x", "y", None),
            ("y", "z", None),
            ("z", "x", None),
        ];
        let g = build_graph(edges, Vec::<&str>::new()).unwrap();

        let comps = connected_components(&g);
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0], vec![0, 1, 2]);
        assert_eq!(comps[1], vec![3, 4, 5]);
    }

    #[test]
    fn isolated_nodes_are_singleton_components() {
        let g = build_graph(vec![("a", "b", None)], vec!["c"]).unwrap();
        let comps = connected_components(&g);
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[1], vec![2]);
    }
}
