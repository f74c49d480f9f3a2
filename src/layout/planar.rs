//! Planar layout
//!
//! Validity is decided by the left-right planarity criterion
//! (de Fraysseix-Rosenstiehl): orient the graph by DFS, then check that
//! the return edges of each subtree can be split into two
//! non-conflicting sides using a stack of conflict pairs. Non-planar
//! graphs fail with an error instead of degenerate coordinates.
//!
//! Coordinates: an accepting run also resolves the combinatorial
//! embedding (a cyclic neighbor order per node). Per component, the
//! largest face of that embedding is pinned to a circle and every
//! remaining node relaxes to the barycenter of its neighbors, giving
//! the Tutte drawing for 3-connected inputs. Acyclic components get a
//! radial drawing with angular sectors proportional to subtree size.

use std::collections::{HashMap, HashSet};

use crate::error::{GraphError, Result};
use crate::graph::components::connected_components;
use crate::graph::WeightedGraph;
use crate::layout::{place_components, Point, PositionMap};

/// Compute a planar layout, or fail with `NonPlanar`.
///
/// Self-loops are ignored: they never affect planarity. Fails with
/// `EmptyGraph` on zero nodes.
pub fn planar_layout(graph: &WeightedGraph) -> Result<PositionMap> {
    let n = graph.node_count();
    if n == 0 {
        return Err(GraphError::EmptyGraph);
    }

    let m = graph.edge_count();
    if n > 2 && m > 3 * n - 6 {
        return Err(GraphError::NonPlanar(format!(
            "{m} edges exceed the Euler bound of {} for {n} nodes",
            3 * n - 6
        )));
    }

    let adjacency: Vec<Vec<usize>> = (0..n as u32)
        .map(|u| graph.neighbors(u).iter().map(|&(v, _)| v as usize).collect())
        .collect();

    let Some(rotation) = LrState::new(adjacency.clone()).run() else {
        return Err(GraphError::NonPlanar(
            "left-right planarity test found conflicting return edges".to_string(),
        ));
    };
    let faces = trace_faces(&rotation);

    let components = connected_components(graph);
    let per_component: Vec<Vec<Point>> = components
        .iter()
        .map(|members| draw_component(&adjacency, members, &faces))
        .collect();

    Ok(place_components(graph, &components, per_component))
}

// ---------------------------------------------------------------------------
// Left-right planarity test
// ---------------------------------------------------------------------------

type Edge = (usize, usize);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Interval {
    low: Option<Edge>,
    high: Option<Edge>,
}

impl Interval {
    fn is_empty(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ConflictPair {
    left: Interval,
    right: Interval,
}

impl ConflictPair {
    fn swap(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }
}

struct LrState {
    adjacency: Vec<Vec<usize>>,
    height: Vec<Option<usize>>,
    parent_edge: Vec<Option<Edge>>,
    /// Outgoing DFS-oriented edge targets per node, in orientation order.
    oriented: Vec<Vec<usize>>,
    /// Same targets re-sorted by nesting depth for the testing phase.
    ordered: Vec<Vec<usize>>,
    roots: Vec<usize>,
    lowpt: HashMap<Edge, usize>,
    lowpt2: HashMap<Edge, usize>,
    nesting_depth: HashMap<Edge, usize>,
    ref_edge: HashMap<Edge, Option<Edge>>,
    /// Side of each edge relative to its reference edge (1 or -1);
    /// resolved to an absolute side by `sign` during the embedding
    /// phase. Missing entries read as 1.
    side: HashMap<Edge, i8>,
    lowpt_edge: HashMap<Edge, Edge>,
    stack: Vec<ConflictPair>,
    /// Stack height when each edge's processing began; merges never pop
    /// below it.
    stack_bottom: HashMap<Edge, usize>,
}

impl LrState {
    fn new(adjacency: Vec<Vec<usize>>) -> Self {
        let n = adjacency.len();
        Self {
            adjacency,
            height: vec![None; n],
            parent_edge: vec![None; n],
            oriented: vec![Vec::new(); n],
            ordered: vec![Vec::new(); n],
            roots: Vec::new(),
            lowpt: HashMap::new(),
            lowpt2: HashMap::new(),
            nesting_depth: HashMap::new(),
            ref_edge: HashMap::new(),
            side: HashMap::new(),
            lowpt_edge: HashMap::new(),
            stack: Vec::new(),
            stack_bottom: HashMap::new(),
        }
    }

    /// Run the full test. Returns the combinatorial embedding as a
    /// clockwise neighbor rotation per node, or `None` when the graph
    /// is not planar.
    fn run(mut self) -> Option<Vec<Vec<usize>>> {
        let n = self.adjacency.len();

        for v in 0..n {
            if self.height[v].is_none() {
                self.height[v] = Some(0);
                self.roots.push(v);
                self.dfs_orientation(v);
            }
        }

        for v in 0..n {
            let mut targets = self.oriented[v].clone();
            targets.sort_by_key(|&w| self.nesting_depth[&(v, w)]);
            self.ordered[v] = targets;
        }

        let roots = self.roots.clone();
        for root in roots {
            // Components are independent; any leftovers from the
            // previous component must not leak into this one.
            self.stack.clear();
            if !self.dfs_testing(root) {
                return None;
            }
        }

        Some(self.embed())
    }

    /// Phase 1: orient edges by DFS, computing height, lowpt, lowpt2
    /// and the nesting depth used to order the testing phase.
    fn dfs_orientation(&mut self, v: usize) {
        let e = self.parent_edge[v];
        let height_v = self.height[v].unwrap_or(0);

        let neighbors = self.adjacency[v].clone();
        for w in neighbors {
            if w == v {
                continue;
            }
            let vw = (v, w);
            if self.lowpt.contains_key(&vw) || self.lowpt.contains_key(&(w, v)) {
                continue; // already oriented
            }

            self.oriented[v].push(w);
            self.lowpt.insert(vw, height_v);
            self.lowpt2.insert(vw, height_v);

            if self.height[w].is_none() {
                // tree edge
                self.parent_edge[w] = Some(vw);
                self.height[w] = Some(height_v + 1);
                self.dfs_orientation(w);
            } else {
                // back edge
                self.lowpt.insert(vw, self.height[w].unwrap_or(0));
            }

            let mut depth = 2 * self.lowpt[&vw];
            if self.lowpt2[&vw] < height_v {
                depth += 1; // chordal
            }
            self.nesting_depth.insert(vw, depth);

            if let Some(pe) = e {
                let (lp_vw, lp2_vw) = (self.lowpt[&vw], self.lowpt2[&vw]);
                let (lp_e, lp2_e) = (self.lowpt[&pe], self.lowpt2[&pe]);
                if lp_vw < lp_e {
                    self.lowpt2.insert(pe, lp_e.min(lp2_vw));
                    self.lowpt.insert(pe, lp_vw);
                } else if lp_vw > lp_e {
                    self.lowpt2.insert(pe, lp2_e.min(lp_vw));
                } else {
                    self.lowpt2.insert(pe, lp2_e.min(lp2_vw));
                }
            }
        }
    }

    /// Phase 2: push conflict pairs for back edges and merge them under
    /// the left-right constraints. Returns false when the constraints
    /// cannot be satisfied, i.e. the graph is not planar.
    fn dfs_testing(&mut self, v: usize) -> bool {
        let e = self.parent_edge[v];
        let height_v = self.height[v].unwrap_or(0);
        let targets = self.ordered[v].clone();

        for (i, &w) in targets.iter().enumerate() {
            let ei = (v, w);
            self.stack_bottom.insert(ei, self.stack.len());

            if self.parent_edge[w] == Some(ei) {
                // tree edge
                if !self.dfs_testing(w) {
                    return false;
                }
            } else {
                // back edge
                self.lowpt_edge.insert(ei, ei);
                self.stack.push(ConflictPair {
                    left: Interval::default(),
                    right: Interval {
                        low: Some(ei),
                        high: Some(ei),
                    },
                });
            }

            if self.lowpt[&ei] < height_v {
                // ei has a return edge below v
                if i == 0 {
                    if let Some(pe) = e {
                        let le = self.lowpt_edge[&ei];
                        self.lowpt_edge.insert(pe, le);
                    }
                } else {
                    let Some(pe) = e else { return false };
                    if !self.add_constraints(ei, pe) {
                        return false;
                    }
                }
            }
        }

        if let Some(pe) = e {
            self.remove_back_edges(pe);

            // The parent edge sides with its highest remaining return
            // edge.
            let height_u = self.height[pe.0].unwrap_or(0);
            if self.lowpt[&pe] < height_u {
                if let Some(top) = self.stack.last() {
                    let chosen = match (top.left.high, top.right.high) {
                        (Some(hl), Some(hr)) => {
                            if self.lowpt[&hl] > self.lowpt[&hr] {
                                Some(hl)
                            } else {
                                Some(hr)
                            }
                        }
                        (Some(hl), None) => Some(hl),
                        (None, hr) => hr,
                    };
                    self.ref_edge.insert(pe, chosen);
                }
            }
        }

        true
    }

    fn add_constraints(&mut self, ei: Edge, e: Edge) -> bool {
        let mut p = ConflictPair::default();
        let bottom = self.stack_bottom[&ei];

        // Merge return edges of ei into p.right.
        loop {
            let Some(mut q) = self.stack.pop() else {
                return false;
            };
            if !q.left.is_empty() {
                q.swap();
            }
            if !q.left.is_empty() {
                return false; // not planar
            }
            let Some(q_low) = q.right.low else {
                return false;
            };
            if self.lowpt[&q_low] > self.lowpt[&e] {
                // merge intervals
                match p.right.low {
                    None => p.right.high = q.right.high,
                    Some(p_low) => {
                        self.ref_edge.insert(p_low, q.right.high);
                    }
                }
                p.right.low = q.right.low;
            } else {
                // align
                self.ref_edge.insert(q_low, Some(self.lowpt_edge[&e]));
            }
            if self.stack.len() == bottom {
                break;
            }
        }

        // Merge conflicting return edges of the earlier siblings into
        // p.left.
        while self
            .stack
            .last()
            .is_some_and(|top| self.conflicting(&top.left, ei) || self.conflicting(&top.right, ei))
        {
            let Some(mut q) = self.stack.pop() else {
                return false;
            };
            if self.conflicting(&q.right, ei) {
                q.swap();
            }
            if self.conflicting(&q.right, ei) {
                return false; // not planar
            }
            // merge interval below lowpt(ei) into p.right
            if let Some(p_low) = p.right.low {
                self.ref_edge.insert(p_low, q.right.high);
            }
            if q.right.low.is_some() {
                p.right.low = q.right.low;
            }
            match p.left.low {
                None => p.left.high = q.left.high,
                Some(p_low) => {
                    self.ref_edge.insert(p_low, q.left.high);
                }
            }
            p.left.low = q.left.low;
        }

        if !(p.left.is_empty() && p.right.is_empty()) {
            self.stack.push(p);
        }
        true
    }

    /// Trim back edges returning to the parent endpoint of `e` once the
    /// subtree below it is fully processed.
    fn remove_back_edges(&mut self, e: Edge) {
        let u = e.0;
        let height_u = self.height[u].unwrap_or(0);

        // Drop conflict pairs whose lowest return point is u. Their
        // left intervals end up on the opposite side of the reference.
        while self
            .stack
            .last()
            .is_some_and(|top| self.pair_lowest(top) == Some(height_u))
        {
            if let Some(p) = self.stack.pop() {
                if let Some(low) = p.left.low {
                    self.side.insert(low, -1);
                }
            }
        }

        // Trim the topmost remaining pair.
        if let Some(mut p) = self.stack.pop() {
            while let Some(high) = p.left.high {
                if high.1 == u {
                    p.left.high = self.ref_edge.get(&high).copied().flatten();
                } else {
                    break;
                }
            }
            if p.left.high.is_none() {
                if let Some(low) = p.left.low {
                    self.ref_edge.insert(low, p.right.low);
                    self.side.insert(low, -1);
                    p.left.low = None;
                }
            }

            while let Some(high) = p.right.high {
                if high.1 == u {
                    p.right.high = self.ref_edge.get(&high).copied().flatten();
                } else {
                    break;
                }
            }
            if p.right.high.is_none() {
                if let Some(low) = p.right.low {
                    self.ref_edge.insert(low, p.left.low);
                    self.side.insert(low, -1);
                    p.right.low = None;
                }
            }

            self.stack.push(p);
        }
    }

    fn conflicting(&self, interval: &Interval, b: Edge) -> bool {
        match interval.high {
            Some(high) => self.lowpt[&high] > self.lowpt[&b],
            None => false,
        }
    }

    fn pair_lowest(&self, pair: &ConflictPair) -> Option<usize> {
        match (pair.left.low, pair.right.low) {
            (Some(l), Some(r)) => Some(self.lowpt[&l].min(self.lowpt[&r])),
            (Some(l), None) => Some(self.lowpt[&l]),
            (None, Some(r)) => Some(self.lowpt[&r]),
            (None, None) => None,
        }
    }

    /// Absolute side of an edge: its relative side multiplied through
    /// its reference chain. Collapses the chain as it resolves.
    fn sign(&mut self, e: Edge) -> i8 {
        if let Some(Some(reference)) = self.ref_edge.get(&e).copied() {
            let s = self.sign(reference);
            let resolved = self.side.get(&e).copied().unwrap_or(1) * s;
            self.side.insert(e, resolved);
            self.ref_edge.insert(e, None);
        }
        self.side.get(&e).copied().unwrap_or(1)
    }

    /// Phase 3: build the clockwise rotation per node. Outgoing edges
    /// are re-sorted by side-signed nesting depth, then a final DFS
    /// slots each incoming half-edge next to the reference child edge
    /// on its resolved side.
    fn embed(&mut self) -> Vec<Vec<usize>> {
        let n = self.adjacency.len();

        let mut signed_depth: HashMap<Edge, i64> = HashMap::new();
        for v in 0..n {
            for w in self.oriented[v].clone() {
                let e = (v, w);
                let depth = self.nesting_depth[&e] as i64;
                signed_depth.insert(e, self.sign(e) as i64 * depth);
            }
        }
        for v in 0..n {
            self.ordered[v].sort_by_key(|&w| signed_depth[&(v, w)]);
        }

        let mut rotation: Vec<Vec<usize>> = self.ordered.clone();
        let mut left_ref: Vec<Option<usize>> = vec![None; n];
        let mut right_ref: Vec<Option<usize>> = vec![None; n];
        for root in self.roots.clone() {
            self.dfs_embedding(root, &mut rotation, &mut left_ref, &mut right_ref);
        }

        rotation
    }

    fn dfs_embedding(
        &mut self,
        v: usize,
        rotation: &mut [Vec<usize>],
        left_ref: &mut [Option<usize>],
        right_ref: &mut [Option<usize>],
    ) {
        for w in self.ordered[v].clone() {
            let ei = (v, w);
            if self.parent_edge[w] == Some(ei) {
                // tree edge: the parent half-edge opens w's rotation
                rotation[w].insert(0, v);
                left_ref[v] = Some(w);
                right_ref[v] = Some(w);
                self.dfs_embedding(w, rotation, left_ref, right_ref);
            } else if self.side.get(&ei).copied().unwrap_or(1) == 1 {
                insert_after(&mut rotation[w], v, right_ref[w]);
            } else {
                insert_before(&mut rotation[w], v, left_ref[w]);
                left_ref[w] = Some(v);
            }
        }
    }
}

/// Insert `item` clockwise-after `anchor` in a rotation.
fn insert_after(list: &mut Vec<usize>, item: usize, anchor: Option<usize>) {
    match anchor.and_then(|a| list.iter().position(|&x| x == a)) {
        Some(p) => list.insert(p + 1, item),
        None => list.push(item),
    }
}

/// Insert `item` clockwise-before `anchor` in a rotation.
fn insert_before(list: &mut Vec<usize>, item: usize, anchor: Option<usize>) {
    match anchor.and_then(|a| list.iter().position(|&x| x == a)) {
        Some(p) => list.insert(p, item),
        None => list.insert(0, item),
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Faces of the embedding: one closed walk per orbit of directed
/// half-edges under the face-successor rule.
fn trace_faces(rotation: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut visited: HashSet<Edge> = HashSet::new();
    let mut faces = Vec::new();
    let half_edges: usize = rotation.iter().map(Vec::len).sum();

    for u in 0..rotation.len() {
        for &v in &rotation[u] {
            if visited.contains(&(u, v)) {
                continue;
            }
            let mut walk = Vec::new();
            let (mut a, mut b) = (u, v);
            while walk.len() <= half_edges {
                visited.insert((a, b));
                walk.push(a);
                let Some(p) = rotation[b].iter().position(|&x| x == a) else {
                    break;
                };
                let len = rotation[b].len();
                let next = rotation[b][(p + len - 1) % len];
                (a, b) = (b, next);
                if (a, b) == (u, v) {
                    break;
                }
            }
            faces.push(walk);
        }
    }

    faces
}

/// Reduce a face walk to a simple cycle by cutting out the excursions
/// through repeated (cut) vertices. A tree's single face reduces to
/// fewer than three nodes.
fn face_cycle(walk: &[usize]) -> Vec<usize> {
    let mut cycle: Vec<usize> = Vec::new();
    for &u in walk {
        match cycle.iter().position(|&x| x == u) {
            Some(p) => cycle.truncate(p + 1),
            None => cycle.push(u),
        }
    }
    cycle
}

/// Draw one component: pin its largest embedding face on a circle and
/// relax everything else to neighbor barycenters; trees get a radial
/// drawing.
fn draw_component(adjacency: &[Vec<usize>], members: &[u32], faces: &[Vec<usize>]) -> Vec<Point> {
    let k = members.len();
    if k == 1 {
        return vec![Point::new(0.0, 0.0)];
    }
    if k == 2 {
        return vec![Point::new(-0.5, 0.0), Point::new(0.5, 0.0)];
    }

    let local_index: HashMap<usize, usize> = members
        .iter()
        .enumerate()
        .map(|(i, &idx)| (idx as usize, i))
        .collect();
    let local_adj: Vec<Vec<usize>> = members
        .iter()
        .map(|&u| {
            adjacency[u as usize]
                .iter()
                .filter_map(|v| local_index.get(v).copied())
                .collect()
        })
        .collect();

    // Largest face that reduces to a genuine cycle; faces never span
    // components, so the first node decides membership.
    let mut pinned: Option<Vec<usize>> = None;
    for walk in faces {
        let Some(&first) = walk.first() else {
            continue;
        };
        if !local_index.contains_key(&first) {
            continue;
        }
        let cycle = face_cycle(walk);
        if cycle.len() >= 3 && pinned.as_ref().map_or(true, |best| cycle.len() > best.len()) {
            pinned = Some(cycle);
        }
    }

    match pinned {
        Some(cycle) => {
            let local_cycle: Vec<usize> = cycle
                .iter()
                .filter_map(|u| local_index.get(u).copied())
                .collect();
            face_pinned_relaxation(&local_adj, &local_cycle)
        }
        None => radial_tree(&local_adj),
    }
}

/// Tutte drawing: the pinned face on the unit circle, free nodes
/// iterated to the barycenter of their neighbors.
fn face_pinned_relaxation(adjacency: &[Vec<usize>], cycle: &[usize]) -> Vec<Point> {
    let k = adjacency.len();
    let mut positions = vec![Point::new(0.0, 0.0); k];
    let mut pinned = vec![false; k];

    let step = std::f64::consts::TAU / cycle.len() as f64;
    for (i, &node) in cycle.iter().enumerate() {
        let angle = step * i as f64;
        positions[node] = Point::new(angle.cos(), angle.sin());
        pinned[node] = true;
    }

    // Gauss-Seidel sweeps; the system is diagonally dominant so this
    // converges to the unique barycentric solution.
    for _ in 0..1000 {
        let mut max_move = 0.0f64;
        for u in 0..k {
            if pinned[u] || adjacency[u].is_empty() {
                continue;
            }
            let inv = 1.0 / adjacency[u].len() as f64;
            let nx = adjacency[u].iter().map(|&v| positions[v].x).sum::<f64>() * inv;
            let ny = adjacency[u].iter().map(|&v| positions[v].y).sum::<f64>() * inv;
            let moved = (nx - positions[u].x).hypot(ny - positions[u].y);
            max_move = max_move.max(moved);
            positions[u] = Point::new(nx, ny);
        }
        if max_move < 1e-7 {
            break;
        }
    }

    positions
}

/// Radial drawing for an acyclic component: depth maps to radius,
/// children split their parent's angular sector proportionally to
/// subtree size.
fn radial_tree(adjacency: &[Vec<usize>]) -> Vec<Point> {
    let k = adjacency.len();
    let mut parent: Vec<Option<usize>> = vec![None; k];
    let mut depth = vec![0usize; k];
    let mut order = Vec::with_capacity(k);

    let mut stack = vec![0usize];
    let mut seen = vec![false; k];
    seen[0] = true;
    while let Some(u) = stack.pop() {
        order.push(u);
        for &v in &adjacency[u] {
            if !seen[v] {
                seen[v] = true;
                parent[v] = Some(u);
                depth[v] = depth[u] + 1;
                stack.push(v);
            }
        }
    }

    let mut subtree = vec![1usize; k];
    for &u in order.iter().rev() {
        if let Some(p) = parent[u] {
            subtree[p] += subtree[u];
        }
    }
    let max_depth = depth.iter().copied().max().unwrap_or(0).max(1) as f64;

    let mut positions = vec![Point::new(0.0, 0.0); k];
    let mut sectors = vec![(0.0, std::f64::consts::TAU); k];
    for &u in &order {
        let (start, end) = sectors[u];
        if parent[u].is_some() {
            let mid = (start + end) / 2.0;
            let radius = depth[u] as f64 / max_depth;
            positions[u] = Point::new(radius * mid.cos(), radius * mid.sin());
        }

        let children: Vec<usize> = adjacency[u]
            .iter()
            .copied()
            .filter(|&v| parent[v] == Some(u))
            .collect();
        let total: usize = children.iter().map(|&v| subtree[v]).sum();
        if total == 0 {
            continue;
        }
        let mut cursor = start;
        for &v in &children {
            let width = (end - start) * subtree[v] as f64 / total as f64;
            sectors[v] = (cursor, cursor + width);
            cursor += width;
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;

    fn complete(ids: &[&str]) -> WeightedGraph {
        let mut edges = Vec::new();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                edges.push((ids[i], ids[j], None));
            }
        }
        build_graph(edges, Vec::<&str>::new()).unwrap()
    }

    #[test]
    fn empty_graph_fails() {
        assert!(matches!(
            planar_layout(&WeightedGraph::new()),
            Err(GraphError::EmptyGraph)
        ));
    }

    #[test]
    fn k4_is_planar() {
        let g = complete(&["a", "b", "c", "d"]);
        let pos = planar_layout(&g).unwrap();
        assert_eq!(pos.len(), 4);
    }

    #[test]
    fn k5_is_rejected() {
        let g = complete(&["a", "b", "c", "d", "e"]);
        assert!(matches!(planar_layout(&g), Err(GraphError::NonPlanar(_))));
    }

    #[test]
    fn k33_is_rejected() {
        // Passes the Euler bound (9 <= 12), so only the LR test can
        // catch it.
        let mut edges = Vec::new();
        for u in ["a", "b", "c"] {
            for v in ["x", "y", "z"] {
                edges.push((u, v, None));
            }
        }
        let g = build_graph(edges, Vec::<&str>::new()).unwrap();
        assert!(matches!(planar_layout(&g), Err(GraphError::NonPlanar(_))));
    }

    #[test]
    fn ring_is_planar_and_fully_placed() {
        let ids: Vec<String> = (0..8).map(|i| format!("n{i}")).collect();
        let edges: Vec<(String, String, Option<f64>)> = (0..8)
            .map(|i| (ids[i].clone(), ids[(i + 1) % 8].clone(), None))
            .collect();
        let g = build_graph(edges, Vec::<String>::new()).unwrap();

        let pos = planar_layout(&g).unwrap();
        assert_eq!(pos.len(), 8);

        // A pinned ring keeps all nodes distinct.
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert!(pos[&ids[i]].distance(&pos[&ids[j]]) > 1e-6);
            }
        }
    }

    #[test]
    fn tree_is_planar() {
        let g = build_graph(
            vec![
                ("root", "a", None),
                ("root", "b", None),
                ("a", "a1", None),
                ("a", "a2", None),
                ("b", "b1", None),
            ],
            Vec::<&str>::new(),
        )
        .unwrap();

        let pos = planar_layout(&g).unwrap();
        assert_eq!(pos.len(), 6);
    }

    #[test]
    fn disconnected_planar_graphs_are_accepted() {
        let g = build_graph(
            vec![
                ("a", "b", None),
                ("b", "c", None),
                ("c", "a", None),
                ("x", "y", None),
            ],
            vec!["lonely"],
        )
        .unwrap();

        let pos = planar_layout(&g).unwrap();
        assert_eq!(pos.len(), 6);
    }

    #[test]
    fn self_loops_are_ignored() {
        let mut g = complete(&["a", "b", "c"]);
        g.add_edge("a", "a", 2.0).unwrap();
        assert!(planar_layout(&g).is_ok());
    }

    #[test]
    fn k5_minus_an_edge_is_planar() {
        // Maximal planar graph on 5 nodes; exercises the LR test right
        // at the Euler bound.
        let mut edges = Vec::new();
        let ids = ["a", "b", "c", "d", "e"];
        for i in 0..5 {
            for j in (i + 1)..5 {
                if !(i == 0 && j == 4) {
                    edges.push((ids[i], ids[j], None));
                }
            }
        }
        let g = build_graph(edges, Vec::<&str>::new()).unwrap();
        assert!(planar_layout(&g).is_ok());
    }

    fn cube() -> WeightedGraph {
        // Q3: nodes are 3-bit strings, edges flip one bit.
        let ids: Vec<String> = (0..8).map(|i| format!("{i:03b}")).collect();
        let mut edges = Vec::new();
        for i in 0..8usize {
            for bit in [1usize, 2, 4] {
                let j = i ^ bit;
                if i < j {
                    edges.push((ids[i].clone(), ids[j].clone(), None));
                }
            }
        }
        build_graph(edges, Vec::<String>::new()).unwrap()
    }

    fn proper_crossing(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
        fn orient(a: Point, b: Point, c: Point) -> f64 {
            (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
        }
        orient(q1, q2, p1) * orient(q1, q2, p2) < 0.0
            && orient(p1, p2, q1) * orient(p1, p2, q2) < 0.0
    }

    #[test]
    fn cube_drawing_is_crossing_free() {
        // 3-connected and planar, so the face-pinned relaxation is a
        // Tutte drawing and no pair of non-adjacent edges may cross.
        let g = cube();
        let pos = planar_layout(&g).unwrap();

        let edges = g.edges();
        for (a, &(u1, v1, _)) in edges.iter().enumerate() {
            for &(u2, v2, _) in edges.iter().skip(a + 1) {
                if u1 == u2 || u1 == v2 || v1 == u2 || v1 == v2 {
                    continue;
                }
                let p1 = pos[g.node_id(u1)];
                let p2 = pos[g.node_id(v1)];
                let q1 = pos[g.node_id(u2)];
                let q2 = pos[g.node_id(v2)];
                assert!(
                    !proper_crossing(p1, p2, q1, q2),
                    "edges ({u1},{v1}) and ({u2},{v2}) cross"
                );
            }
        }
    }

    #[test]
    fn dodecahedron_drawing_is_crossing_free() {
        // Canonical dodecahedron: outer 5-cycle, inner 5-cycle,
        // 10-cycle waist, spokes between the rings.
        let mut edges = Vec::new();
        let outer: Vec<String> = (0..5).map(|i| format!("o{i}")).collect();
        let waist: Vec<String> = (0..10).map(|i| format!("w{i}")).collect();
        let inner: Vec<String> = (0..5).map(|i| format!("c{i}")).collect();
        for i in 0..5 {
            edges.push((outer[i].clone(), outer[(i + 1) % 5].clone(), None));
            edges.push((inner[i].clone(), inner[(i + 1) % 5].clone(), None));
            edges.push((outer[i].clone(), waist[2 * i].clone(), None));
            edges.push((inner[i].clone(), waist[2 * i + 1].clone(), None));
        }
        for i in 0..10 {
            edges.push((waist[i].clone(), waist[(i + 1) % 10].clone(), None));
        }
        let g = build_graph(edges, Vec::<String>::new()).unwrap();
        let pos = planar_layout(&g).unwrap();

        let placed = g.edges();
        for (a, &(u1, v1, _)) in placed.iter().enumerate() {
            for &(u2, v2, _) in placed.iter().skip(a + 1) {
                if u1 == u2 || u1 == v2 || v1 == u2 || v1 == v2 {
                    continue;
                }
                assert!(
                    !proper_crossing(
                        pos[g.node_id(u1)],
                        pos[g.node_id(v1)],
                        pos[g.node_id(u2)],
                        pos[g.node_id(v2)],
                    ),
                    "edges ({u1},{v1}) and ({u2},{v2}) cross"
                );
            }
        }
    }

    #[test]
    fn petersen_is_rejected() {
        // 15 edges on 10 nodes sits under the Euler bound, so only the
        // left-right test can reject it.
        let mut edges = Vec::new();
        let outer: Vec<String> = (0..5).map(|i| format!("o{i}")).collect();
        let inner: Vec<String> = (0..5).map(|i| format!("i{i}")).collect();
        for i in 0..5 {
            edges.push((outer[i].clone(), outer[(i + 1) % 5].clone(), None));
            edges.push((inner[i].clone(), inner[(i + 2) % 5].clone(), None));
            edges.push((outer[i].clone(), inner[i].clone(), None));
        }
        let g = build_graph(edges, Vec::<String>::new()).unwrap();
        assert!(matches!(planar_layout(&g), Err(GraphError::NonPlanar(_))));
    }
}
