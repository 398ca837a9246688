use super::*;

fn node(id: &str, parent: Option<NodeId>) -> ModuleNode {
    let manifest = Manifest::empty(format!("/app/node_modules/{id}/package.json"));
    ModuleNode::new(id, manifest, parent)
}

#[test]
fn test_new_cache_is_empty() {
    let cache = ModuleCache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.get("simple"), None);
}

#[test]
fn test_insert_is_idempotent() {
    let mut cache = ModuleCache::new();
    let first = cache.insert(node("simple", None));
    let second = cache.insert(node("simple", Some(first)));

    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.node(first).parent, None);
}

#[test]
fn test_shared_node_is_visible_through_every_reference() {
    let mut cache = ModuleCache::new();
    let shared = cache.insert(node("shared", None));
    let a = cache.insert(node("a", None));
    let b = cache.insert(node("b", None));
    cache.node_mut(a).add_dependency(shared);
    cache.node_mut(b).add_dependency(shared);

    let leaf = cache.insert(node("leaf", Some(shared)));
    cache.node_mut(shared).add_dependency(leaf);

    for dependent in [a, b] {
        let via = cache.node(dependent).dependencies[0];
        assert_eq!(cache.dependency_ids(via), vec!["leaf"]);
    }
}

#[test]
fn test_add_dependency_skips_duplicates() {
    let mut cache = ModuleCache::new();
    let a = cache.insert(node("a", None));
    let b = cache.insert(node("b", None));
    cache.node_mut(a).add_dependency(b);
    cache.node_mut(a).add_dependency(b);

    assert_eq!(cache.node(a).dependencies, vec![b]);
}

#[test]
fn test_iteration_follows_discovery_order() {
    let mut cache = ModuleCache::new();
    for id in ["zeta", "alpha", "mid"] {
        cache.insert(node(id, None));
    }

    let order: Vec<&str> = cache.iter().map(|(_, n)| n.id.as_str()).collect();
    assert_eq!(order, vec!["zeta", "alpha", "mid"]);
    assert_eq!(cache.ids().map(NodeId::index).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(
        cache.by_module_id("alpha").map(|n| n.dir()),
        Some(Path::new("/app/node_modules/alpha"))
    );
}
