//! Step-wise marching on a small weighted graph, printing the front as it moves.
//!
//! Run with `cargo run -p marcher --example path_voronoi`.

use marcher::prelude::*;

fn main() -> Result<(), MarchError> {
    // Two clusters joined by a long bridge.
    let edges = [
        (0, 1, 1.0),
        (1, 2, 1.0),
        (2, 0, 1.5),
        (2, 3, 4.0),
        (3, 4, 1.0),
        (4, 5, 1.0),
        (5, 3, 1.5),
    ];
    let graph = AdjacencyGraph::from_edges(6, edges)?;
    let mut engine = MarchingEngine::new(&graph);

    engine.begin(&[0, 5])?;
    loop {
        let remaining = engine.step();
        println!(
            "phase={:?} frontier={} frozen={}",
            engine.phase(),
            remaining,
            engine.frozen_count()
        );
        if remaining == 0 {
            break;
        }
    }
    for (id, (d, v)) in engine.distance().iter().zip(engine.voronoi()).enumerate() {
        println!("{id}: distance={d:.2} seed={v:?}");
    }
    Ok(())
}
