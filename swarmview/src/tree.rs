//! Hierarchy panel renderer.

use crate::axes::Axes2d;
use crate::style::TreeStyle;
use swarmview_core::{compute_layout, HierarchyGraph, Unit};
use tracing::debug;

/// Panel title of the hierarchy diagram.
pub const TREE_TITLE: &str = "tree structure";

/// Draws the parent -> child hierarchy of `units` onto `ax`.
///
/// Nodes become fixed-size markers labelled with the unit id; edges become
/// arrows from parent to child. An empty unit list leaves the panel empty
/// apart from its title.
pub fn draw_tree(units: &[Unit], ax: &mut Axes2d, style: &TreeStyle) {
    let graph = HierarchyGraph::from_units(units);
    let layout = compute_layout(&graph, style.layout);
    debug!(
        "tree: {} nodes, {} edges, layout={}",
        graph.node_count(),
        graph.edge_count(),
        style.layout
    );

    // Edges first so node markers cover the line ends
    for (parent, child) in graph.edges() {
        if let (Some(from), Some(to)) = (layout.get(parent), layout.get(child)) {
            ax.arrow(from, to, style.node_size);
        }
    }

    for (id, at) in layout.iter() {
        ax.node(at, style.node_size);
        ax.label(at, id.to_string(), style.font_size);
    }

    ax.set_title(TREE_TITLE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::Mark2d;
    use swarmview_core::{LayoutStrategy, Position, UnitId};

    fn units(paths: &[&[UnitId]]) -> Vec<Unit> {
        paths
            .iter()
            .map(|p| Unit::new(p.to_vec(), Position::default()).unwrap())
            .collect()
    }

    #[test]
    fn test_draws_nodes_edges_and_labels() {
        let mut ax = Axes2d::new();
        let style = TreeStyle::default();
        draw_tree(&units(&[&[1], &[1, 2], &[1, 3], &[9, 4]]), &mut ax, &style);

        assert_eq!(ax.node_count(), 4);
        assert_eq!(ax.arrow_count(), 2);
        assert_eq!(ax.label_texts(), vec!["1", "2", "3", "4"]);
        assert_eq!(ax.title(), Some(TREE_TITLE));
    }

    #[test]
    fn test_arrows_point_parent_to_child() {
        let mut ax = Axes2d::new();
        draw_tree(&units(&[&[1], &[1, 2]]), &mut ax, &TreeStyle::default());

        let arrow = ax
            .marks()
            .iter()
            .find_map(|m| match m {
                Mark2d::Arrow { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .unwrap();
        // dot layout puts the parent above the child
        assert!(arrow.0 .1 > arrow.1 .1);
    }

    #[test]
    fn test_style_sizes_applied() {
        let style = TreeStyle {
            layout: LayoutStrategy::Circo,
            node_size: 100.0,
            font_size: 8.0,
        };
        let mut ax = Axes2d::new();
        draw_tree(&units(&[&[1], &[1, 2], &[1, 3]]), &mut ax, &style);

        for mark in ax.marks() {
            match mark {
                Mark2d::Node { size, .. } => assert_eq!(*size, 100.0),
                Mark2d::Arrow { target_size, .. } => assert_eq!(*target_size, 100.0),
                Mark2d::Label { font_size, .. } => assert_eq!(*font_size, 8.0),
            }
        }
    }

    #[test]
    fn test_empty_units_is_noop() {
        let mut ax = Axes2d::new();
        draw_tree(&[], &mut ax, &TreeStyle::default());
        assert!(ax.marks().is_empty());
        assert_eq!(ax.title(), Some(TREE_TITLE));
    }
}
