//! 2D layout of a hierarchy graph.
//!
//! Three strategies named after the graphviz programs whose drawings they
//! approximate:
//!
//! - `dot`: layered tree, roots on top, parents centered over children
//! - `twopi`: radial tree, depth rings around the root
//! - `circo`: every node on a single circle
//!
//! All strategies work on a spanning forest of the graph, so extra edges
//! (a node listed under two parents, or a cycle) never stall the layout;
//! they are still drawn by the renderer, just not used for placement.
//!
//! Coordinates are in points (1/72 inch) with y pointing up, so a renderer
//! only needs to scale the bounding box onto its drawing surface.

use crate::error::VisError;
use crate::hierarchy::HierarchyGraph;
use crate::types::UnitId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Horizontal distance between neighbouring leaves / nodes on a circle.
pub const NODE_GAP: f64 = 54.0;

/// Vertical distance between ranks, and radial distance between rings.
pub const RANK_GAP: f64 = 72.0;

/// Named layout algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Layered top-down tree
    #[default]
    #[serde(alias = "hierarchical", alias = "tree")]
    Dot,

    /// Radial tree around the root
    #[serde(alias = "radial")]
    Twopi,

    /// All nodes on one circle
    #[serde(alias = "circular")]
    Circo,
}

impl LayoutStrategy {
    /// Returns a list of all strategies.
    pub fn all() -> Vec<LayoutStrategy> {
        vec![LayoutStrategy::Dot, LayoutStrategy::Twopi, LayoutStrategy::Circo]
    }

    /// Returns the strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutStrategy::Dot => "dot",
            LayoutStrategy::Twopi => "twopi",
            LayoutStrategy::Circo => "circo",
        }
    }
}

impl std::fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for LayoutStrategy {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "hierarchical" | "tree" => Ok(LayoutStrategy::Dot),
            "twopi" | "radial" => Ok(LayoutStrategy::Twopi),
            "circo" | "circular" => Ok(LayoutStrategy::Circo),
            _ => Err(VisError::config(format!(
                "Unknown layout strategy: {} (expected dot, twopi or circo)",
                s
            ))),
        }
    }
}

/// Node positions produced by a layout strategy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: BTreeMap<UnitId, (f64, f64)>,
}

impl Layout {
    /// Position of node `id`, if it was laid out.
    pub fn get(&self, id: UnitId) -> Option<(f64, f64)> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All `(id, (x, y))` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, (f64, f64))> + '_ {
        self.positions.iter().map(|(&id, &pos)| (id, pos))
    }

    /// Bounding box as `((x_min, x_max), (y_min, y_max))`.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut iter = self.positions.values();
        let &(x0, y0) = iter.next()?;
        let init = ((x0, x0), (y0, y0));
        Some(iter.fold(init, |((xl, xh), (yl, yh)), &(x, y)| {
            ((xl.min(x), xh.max(x)), (yl.min(y), yh.max(y)))
        }))
    }
}

/// Computes node coordinates for `graph` using `strategy`.
pub fn compute_layout(graph: &HierarchyGraph, strategy: LayoutStrategy) -> Layout {
    if graph.is_empty() {
        return Layout::default();
    }

    let forest = SpanningForest::build(graph);
    let positions = match strategy {
        LayoutStrategy::Dot => layout_layered(&forest),
        LayoutStrategy::Twopi => layout_radial(&forest),
        LayoutStrategy::Circo => layout_circular(&forest),
    };

    Layout { positions }
}

/// Depth-first spanning forest over the hierarchy.
struct SpanningForest {
    roots: Vec<UnitId>,
    children: BTreeMap<UnitId, Vec<UnitId>>,
    depth: BTreeMap<UnitId, usize>,
    /// Depth-first preorder over the whole forest
    order: Vec<UnitId>,
}

impl SpanningForest {
    fn build(graph: &HierarchyGraph) -> Self {
        let mut forest = Self {
            roots: Vec::new(),
            children: BTreeMap::new(),
            depth: BTreeMap::new(),
            order: Vec::with_capacity(graph.node_count()),
        };
        let mut visited = BTreeSet::new();

        // Real roots first, then whatever is left inside cycles
        let seeds: Vec<UnitId> = graph.roots().into_iter().chain(graph.nodes()).collect();

        for seed in seeds {
            if !visited.insert(seed) {
                continue;
            }
            forest.roots.push(seed);
            forest.depth.insert(seed, 0);

            let mut stack = vec![seed];
            while let Some(node) = stack.pop() {
                forest.order.push(node);
                let depth = forest.depth_of(node);

                let kids: Vec<UnitId> = graph
                    .children(node)
                    .into_iter()
                    .filter(|&child| visited.insert(child))
                    .collect();
                for &kid in &kids {
                    forest.depth.insert(kid, depth + 1);
                }
                stack.extend(kids.iter().rev());
                forest.children.insert(node, kids);
            }
        }

        forest
    }

    fn depth_of(&self, id: UnitId) -> usize {
        self.depth.get(&id).copied().unwrap_or(0)
    }

    fn children_of(&self, id: UnitId) -> &[UnitId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of leaves below (or at) each node.
    fn leaf_counts(&self) -> BTreeMap<UnitId, usize> {
        let mut counts = BTreeMap::new();
        // Reverse preorder visits every child before its parent
        for &node in self.order.iter().rev() {
            let below: usize = self
                .children_of(node)
                .iter()
                .map(|c| counts.get(c).copied().unwrap_or(1))
                .sum();
            counts.insert(node, below.max(1));
        }
        counts
    }
}

fn layout_layered(forest: &SpanningForest) -> BTreeMap<UnitId, (f64, f64)> {
    let mut xs: BTreeMap<UnitId, f64> = BTreeMap::new();

    // Leaves take consecutive slots in preorder
    let mut next_slot = 0.0;
    for &node in &forest.order {
        if forest.children_of(node).is_empty() {
            xs.insert(node, next_slot);
            next_slot += 1.0;
        }
    }

    // Parents sit over the midpoint of their first and last child; reverse
    // preorder places every child before its parent.
    for &node in forest.order.iter().rev() {
        let kids = forest.children_of(node);
        if let (Some(first), Some(last)) = (kids.first(), kids.last()) {
            let x = (xs.get(first).copied().unwrap_or(0.0) + xs.get(last).copied().unwrap_or(0.0)) / 2.0;
            xs.insert(node, x);
        }
    }

    xs.into_iter()
        .map(|(id, slot)| {
            let y = -(forest.depth_of(id) as f64) * RANK_GAP;
            (id, (slot * NODE_GAP, y))
        })
        .collect()
}

/// Angular sector `[start, start + span)` assigned to a node on ring `level`.
struct Sector {
    node: UnitId,
    level: usize,
    start: f64,
    span: f64,
}

fn layout_radial(forest: &SpanningForest) -> BTreeMap<UnitId, (f64, f64)> {
    let leaves = forest.leaf_counts();
    let weight = |id: &UnitId| leaves.get(id).copied().unwrap_or(1);
    let mut positions = BTreeMap::new();

    // A single root sits at the center; several roots ring an empty center.
    let root_level = if forest.roots.len() == 1 { 0 } else { 1 };

    let mut stack = Vec::new();
    let total: usize = forest.roots.iter().map(weight).sum();
    let mut start = FRAC_PI_2;
    for root in &forest.roots {
        let span = TAU * weight(root) as f64 / total.max(1) as f64;
        stack.push(Sector {
            node: *root,
            level: root_level,
            start,
            span,
        });
        start += span;
    }

    while let Some(sector) = stack.pop() {
        let radius = sector.level as f64 * RANK_GAP;
        let angle = sector.start + sector.span / 2.0;
        positions.insert(sector.node, (radius * angle.cos(), radius * angle.sin()));

        // Children split the parent's sector by leaf count
        let kids = forest.children_of(sector.node);
        let total: usize = kids.iter().map(weight).sum();
        let mut child_start = sector.start;
        for kid in kids {
            let child_span = sector.span * weight(kid) as f64 / total.max(1) as f64;
            stack.push(Sector {
                node: *kid,
                level: sector.level + 1,
                start: child_start,
                span: child_span,
            });
            child_start += child_span;
        }
    }

    positions
}

fn layout_circular(forest: &SpanningForest) -> BTreeMap<UnitId, (f64, f64)> {
    let n = forest.order.len();
    if n == 1 {
        return forest.order.iter().map(|&id| (id, (0.0, 0.0))).collect();
    }

    let radius = (NODE_GAP * n as f64 / TAU).max(NODE_GAP);
    forest
        .order
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            // Clockwise from twelve o'clock
            let angle = FRAC_PI_2 - TAU * i as f64 / n as f64;
            (id, (radius * angle.cos(), radius * angle.sin()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, Unit};
    use approx::assert_relative_eq;

    fn graph_of(paths: &[&[UnitId]]) -> HierarchyGraph {
        let units: Vec<Unit> = paths
            .iter()
            .map(|p| Unit::new(p.to_vec(), Position::default()).unwrap())
            .collect();
        HierarchyGraph::from_units(&units)
    }

    fn sample_tree() -> HierarchyGraph {
        graph_of(&[&[1], &[1, 2], &[1, 3], &[1, 2, 4], &[1, 2, 5], &[1, 3, 6]])
    }

    #[test]
    fn test_every_node_placed_once() {
        let graph = sample_tree();
        for strategy in LayoutStrategy::all() {
            let layout = compute_layout(&graph, strategy);
            assert_eq!(layout.len(), graph.node_count(), "strategy {}", strategy);
            for id in graph.nodes() {
                assert!(layout.get(id).is_some(), "{} missing node {}", strategy, id);
            }
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = HierarchyGraph::new();
        for strategy in LayoutStrategy::all() {
            let layout = compute_layout(&graph, strategy);
            assert!(layout.is_empty());
            assert!(layout.bounds().is_none());
        }
    }

    #[test]
    fn test_dot_parents_above_and_centered() {
        let layout = compute_layout(&sample_tree(), LayoutStrategy::Dot);
        let (x1, y1) = layout.get(1).unwrap();
        let (x2, y2) = layout.get(2).unwrap();
        let (x3, y3) = layout.get(3).unwrap();
        let (x4, y4) = layout.get(4).unwrap();
        let (x5, _) = layout.get(5).unwrap();

        assert!(y1 > y2 && y2 > y4);
        assert_relative_eq!(y2, y3);
        assert_relative_eq!(x2, (x4 + x5) / 2.0);
        assert_relative_eq!(x1, (x2 + x3) / 2.0);
        assert!(x4 < x5);
    }

    #[test]
    fn test_dot_separate_roots_do_not_overlap() {
        let graph = graph_of(&[&[1], &[1, 2], &[7], &[7, 8]]);
        let layout = compute_layout(&graph, LayoutStrategy::Dot);
        let (x2, _) = layout.get(2).unwrap();
        let (x8, _) = layout.get(8).unwrap();
        assert!((x2 - x8).abs() >= NODE_GAP);
    }

    #[test]
    fn test_twopi_single_root_at_center() {
        let layout = compute_layout(&sample_tree(), LayoutStrategy::Twopi);
        let (x, y) = layout.get(1).unwrap();
        assert_relative_eq!(x, 0.0);
        assert_relative_eq!(y, 0.0);

        let (x4, y4) = layout.get(4).unwrap();
        assert_relative_eq!((x4 * x4 + y4 * y4).sqrt(), 2.0 * RANK_GAP, epsilon = 1e-9);
    }

    #[test]
    fn test_circo_common_radius() {
        let layout = compute_layout(&sample_tree(), LayoutStrategy::Circo);
        let radii: Vec<f64> = layout
            .iter()
            .map(|(_, (x, y))| (x * x + y * y).sqrt())
            .collect();
        for r in &radii {
            assert_relative_eq!(*r, radii[0], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cycle_still_laid_out() {
        let graph = graph_of(&[&[2, 1], &[3, 2], &[1, 3]]);
        assert!(graph.roots().is_empty());
        for strategy in LayoutStrategy::all() {
            assert_eq!(compute_layout(&graph, strategy).len(), 3);
        }
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        const LEN: UnitId = 200_000;
        let mut graph = HierarchyGraph::new();
        for id in 0..LEN {
            graph.add_node(id);
        }
        for id in 1..LEN {
            graph.add_edge(id - 1, id);
        }

        for strategy in LayoutStrategy::all() {
            let layout = compute_layout(&graph, strategy);
            assert_eq!(layout.len(), LEN as usize, "strategy {}", strategy);
        }

        let dot = compute_layout(&graph, LayoutStrategy::Dot);
        let (x_top, y_top) = dot.get(0).unwrap();
        let (x_bottom, y_bottom) = dot.get(LEN - 1).unwrap();
        assert_relative_eq!(x_top, x_bottom);
        assert_relative_eq!(y_top - y_bottom, (LEN - 1) as f64 * RANK_GAP);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("dot".parse::<LayoutStrategy>().unwrap(), LayoutStrategy::Dot);
        assert_eq!("Radial".parse::<LayoutStrategy>().unwrap(), LayoutStrategy::Twopi);
        assert_eq!("circo".parse::<LayoutStrategy>().unwrap(), LayoutStrategy::Circo);
        assert!("neato".parse::<LayoutStrategy>().is_err());
    }
}
