use petgraph::{
    graph::NodeIndex,
    stable_graph::StableGraph,
    visit::{depth_first_search, Control, DfsEvent, NodeIndexable},
    Undirected,
};

/// Assumes the component containing `target` is a tree; other components are ignored, so a
/// spanning forest is fine. Returns the longest path from a leaf to `target`, leaf first and
/// `target` last.
pub fn longest_path_to_point_in_tree<N, E>(
    graph: &StableGraph<N, E, Undirected>,
    target: NodeIndex,
) -> Vec<NodeIndex> {
    let bound = graph.node_bound();
    let mut predecessors = vec![NodeIndex::end(); bound];
    let mut has_successor = vec![false; bound];
    let mut discovered = vec![false; bound];
    depth_first_search(graph, Some(target), |event| {
        match event {
            DfsEvent::Discover(n, _) => discovered[n.index()] = true,
            DfsEvent::TreeEdge(u, v) => {
                predecessors[v.index()] = u;
                has_successor[u.index()] = true;
            }
            _ => {}
        }

        Control::<()>::Continue
    });

    let leaves: Vec<_> = graph
        .node_indices()
        .filter(|i| discovered[i.index()] && !has_successor[i.index()])
        .collect();

    let mut max_path = Vec::new();
    for leaf in leaves.into_iter() {
        let mut next = leaf;
        let mut path = vec![leaf];
        while next != target {
            next = predecessors[next.index()];
            path.push(next);
        }
        if path.len() > max_path.len() {
            max_path = path;
        }
    }

    max_path
}
