use louvain::{modularity, Louvain};
use petgraph::graph::UnGraph;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two weighted triangles joined by one light bridge.
    //
    // Run with `RUST_LOG=louvain=debug` to see per-level progress.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut graph = UnGraph::<&str, f64>::new_undirected();
    let names = ["A", "B", "C", "D", "E", "F"];
    let nodes: Vec<_> = names.iter().map(|&name| graph.add_node(name)).collect();
    for &(i, j, w) in &[
        (0, 1, 2.0),
        (1, 2, 2.0),
        (0, 2, 2.0),
        (3, 4, 1.0),
        (4, 5, 1.0),
        (3, 5, 1.0),
        (2, 3, 0.5),
    ] {
        let _ = graph.add_edge(nodes[i], nodes[j], w);
    }

    let hierarchy = Louvain::new().with_randomized(true).with_seed(42).run(&graph)?;

    println!(
        "n_nodes={} n_edges={} levels={}",
        graph.node_count(),
        graph.edge_count(),
        hierarchy.levels()
    );
    for (cid, members) in hierarchy.communities().iter().enumerate() {
        let labels: Vec<&str> = members.iter().map(|&n| graph[n]).collect();
        println!("  community {}: {:?}", cid, labels);
    }

    // Score an alternative split for comparison.
    let everything = vec![nodes.clone()];
    println!(
        "modularity: louvain={:.4} single-community={:.4}",
        hierarchy.modularity().unwrap_or(0.0),
        modularity(&graph, &everything)?
    );

    Ok(())
}
