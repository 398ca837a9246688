// Tests for file graph assembly and ordering

use super::*;
use crate::graph::cache::ModuleNode;
use crate::manifest::Manifest;

// ============================================================================
// Test Utilities
// ============================================================================

fn file(name: &str) -> PathBuf {
    PathBuf::from(format!("/app/node_modules/{name}/index.js"))
}

fn position(order: &[PathBuf], name: &str) -> usize {
    order
        .iter()
        .position(|f| f == &file(name))
        .unwrap_or_else(|| panic!("{name} missing from {order:?}"))
}

/// Cache with the given (id, has_output, deps) modules
fn cache_of(modules: &[(&str, bool, &[&str])]) -> ModuleCache {
    let mut cache = ModuleCache::new();
    for (id, has_output, _) in modules {
        let manifest = Manifest::empty(format!("/app/node_modules/{id}/package.json"));
        let mut node = ModuleNode::new(*id, manifest, None);
        node.output_file = has_output.then(|| file(id));
        cache.insert(node);
    }
    for (id, _, deps) in modules {
        let node = cache.get(id).unwrap();
        for dep in *deps {
            let dep = cache.get(dep).unwrap();
            cache.node_mut(node).add_dependency(dep);
        }
    }
    cache
}

// ============================================================================
// Basic Graph Operations
// ============================================================================

#[test]
fn test_new_graph_is_empty() {
    let graph = DependencyGraph::new();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.topological_sort().unwrap().is_empty());
}

#[test]
fn test_add_duplicate_node_is_idempotent() {
    let mut graph = DependencyGraph::new();
    let idx1 = graph.add_node(file("a"));
    let idx2 = graph.add_node(file("a"));

    assert_eq!(idx1, idx2);
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_self_dependency_is_ignored() {
    let mut graph = DependencyGraph::new();
    graph.add_dependency(&file("a"), &file("a"));

    assert_eq!(graph.edge_count(), 0);
    assert!(graph.detect_cycle().is_none());
}

#[test]
fn test_duplicate_edges_collapse() {
    let mut graph = DependencyGraph::new();
    graph.add_dependency(&file("a"), &file("b"));
    graph.add_dependency(&file("a"), &file("b"));

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(
        graph.get_dependencies(&file("a")).unwrap(),
        vec![file("b").as_path()]
    );
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_linear_chain_puts_dependencies_first() {
    // a depends on b depends on c
    let mut graph = DependencyGraph::new();
    graph.add_dependency(&file("a"), &file("b"));
    graph.add_dependency(&file("b"), &file("c"));

    let order = graph.topological_sort().unwrap();
    assert_eq!(order, vec![file("c"), file("b"), file("a")]);
}

#[test]
fn test_diamond_respects_every_edge() {
    let mut graph = DependencyGraph::new();
    graph.add_dependency(&file("app"), &file("left"));
    graph.add_dependency(&file("app"), &file("right"));
    graph.add_dependency(&file("left"), &file("base"));
    graph.add_dependency(&file("right"), &file("base"));

    let order = graph.topological_sort().unwrap();
    assert_eq!(order.len(), 4);
    assert!(position(&order, "base") < position(&order, "left"));
    assert!(position(&order, "base") < position(&order, "right"));
    assert!(position(&order, "left") < position(&order, "app"));
    assert!(position(&order, "right") < position(&order, "app"));
}

#[test]
fn test_unrelated_files_keep_insertion_order() {
    let mut graph = DependencyGraph::new();
    for name in ["zeta", "alpha", "mid"] {
        graph.add_node(file(name));
    }

    let order = graph.topological_sort().unwrap();
    assert_eq!(order, vec![file("zeta"), file("alpha"), file("mid")]);
}

#[test]
fn test_sort_is_deterministic() {
    let build = || {
        let mut graph = DependencyGraph::new();
        graph.add_node(file("x"));
        graph.add_dependency(&file("a"), &file("c"));
        graph.add_dependency(&file("b"), &file("c"));
        graph.add_node(file("y"));
        graph.topological_sort().unwrap()
    };

    assert_eq!(build(), build());
}

// ============================================================================
// Cycle Detection
// ============================================================================

#[test]
fn test_two_node_cycle_is_rejected() {
    let mut graph = DependencyGraph::new();
    graph.add_dependency(&file("a"), &file("b"));
    graph.add_dependency(&file("b"), &file("a"));

    let cycle = graph.detect_cycle().unwrap();
    assert_eq!(cycle, vec![file("a"), file("b")]);

    let err = graph.topological_sort().unwrap_err();
    assert!(matches!(err, ResolveError::CircularDependency { .. }));
    assert!(err.to_string().contains("→"));
}

#[test]
fn test_acyclic_graph_has_no_cycle() {
    let mut graph = DependencyGraph::new();
    graph.add_dependency(&file("a"), &file("b"));
    assert!(graph.detect_cycle().is_none());
}

// ============================================================================
// Assembly from module nodes
// ============================================================================

#[test]
fn test_assemble_skips_nodes_without_output() {
    let cache = cache_of(&[
        ("app", true, &["plain"]),
        ("plain", false, &["base"]),
        ("base", true, &[]),
    ]);

    let graph = DependencyGraph::assemble(&cache);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.contains(&file("plain")));
}

#[test]
fn test_assemble_orders_modules() {
    let cache = cache_of(&[
        ("app", true, &["lib"]),
        ("lib", true, &["base"]),
        ("base", true, &[]),
    ]);

    let order = DependencyGraph::assemble(&cache).topological_sort().unwrap();
    assert_eq!(order, vec![file("base"), file("lib"), file("app")]);
}

#[test]
fn test_assemble_cycle_between_output_files_fails() {
    let cache = cache_of(&[("a", true, &["b"]), ("b", true, &["a"])]);

    let result = DependencyGraph::assemble(&cache).topological_sort();
    assert!(matches!(result, Err(ResolveError::CircularDependency { .. })));
}

#[test]
fn test_cycle_through_dropped_module_is_not_a_cycle() {
    let cache = cache_of(&[("a", true, &["b"]), ("b", false, &["a"])]);

    let order = DependencyGraph::assemble(&cache).topological_sort().unwrap();
    assert_eq!(order, vec![file("a")]);
}
