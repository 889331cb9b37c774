use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use marcher::api::{
    farthest_point_sampling, sphere_grid, AdjacencyGraph, ElementId, MarchingEngine, Propagation,
};
use polars::prelude::*;
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{write_sidecar, Provenance};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Fast marching runner: distances, Voronoi labels, farthest-point samples")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// March over an edge list (`from,to,cost`) and write `id,distance,voronoi`.
    /// Unreached ids get empty `distance` and `voronoi` cells.
    March {
        #[arg(long)]
        edges: PathBuf,
        /// Comma-separated seed ids
        #[arg(long, value_delimiter = ',')]
        seeds: Vec<ElementId>,
        #[arg(long)]
        out: PathBuf,
        /// Universe size; defaults to the largest id in the edge list plus one
        #[arg(long)]
        nodes: Option<usize>,
    },
    /// Farthest-point sampling on a spherical point cloud; writes `id,x,y,z`
    Sample {
        /// Lattice dimensions as NX,NY,NZ
        #[arg(long, value_delimiter = ',', default_value = "16,16,16")]
        dims: Vec<usize>,
        #[arg(long, default_value_t = 32)]
        count: usize,
        #[arg(long)]
        out: PathBuf,
        /// Straight-line distance to the nearest sample instead of lattice paths
        #[arg(long)]
        radial: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::March {
            edges,
            seeds,
            out,
            nodes,
        } => march(&edges, &seeds, &out, nodes),
        Action::Sample {
            dims,
            count,
            out,
            radial,
        } => sample(&dims, count, &out, radial),
        Action::Report => report(),
    }
}

fn march(edges_path: &Path, seeds: &[ElementId], out: &Path, nodes: Option<usize>) -> Result<()> {
    tracing::info!(edges = %edges_path.display(), seeds = ?seeds, out = %out.display(), "march");
    let edges = read_edges(edges_path)?;
    let len = nodes.unwrap_or_else(|| {
        edges
            .iter()
            .map(|&(a, b, _)| a.max(b) + 1)
            .max()
            .unwrap_or(0)
    });
    let graph = AdjacencyGraph::from_edges(len, edges).context("building graph")?;
    let mut engine = MarchingEngine::new(&graph);
    engine.run(seeds).context("running march")?;

    let reached = engine.voronoi().iter().filter(|v| v.is_some()).count();
    let max_distance = max_finite(engine.distance());
    tracing::info!(elements = len, reached, max_distance, "march_done");

    let ids: Vec<u64> = (0..len as u64).collect();
    let voronoi: Vec<Option<u64>> = engine.voronoi().iter().map(|v| v.map(|s| s as u64)).collect();
    // unreached rows get empty distance and voronoi cells
    let distance: Vec<Option<f64>> = engine
        .distance()
        .iter()
        .map(|&d| d.is_finite().then_some(d))
        .collect();
    let mut df = df!(
        "id" => ids,
        "distance" => distance,
        "voronoi" => voronoi
    )?;
    write_frame(out, &mut df)?;

    let record = Provenance::new(
        "march",
        json!({ "edges": edges_path.to_string_lossy(), "seeds": seeds, "nodes": len }),
    )
    .with_summary(json!({ "reached": reached, "max_distance": max_distance }));
    write_sidecar(out, record)?;
    Ok(())
}

fn sample(dims: &[usize], count: usize, out: &Path, radial: bool) -> Result<()> {
    let &[nx, ny, nz] = dims else {
        bail!("--dims needs exactly three values, got {}", dims.len());
    };
    tracing::info!(nx, ny, nz, count, radial, "sample");
    let propagation = if radial {
        Propagation::Radial
    } else {
        Propagation::Accumulated
    };
    let grid = sphere_grid([nx, ny, nz], propagation);
    let inactive = grid.inactive_ids();
    let mut engine = MarchingEngine::new(&grid);
    engine.exclude(&inactive)?;
    let picks = farthest_point_sampling(&mut engine, count)?;
    let coverage = if picks.is_empty() {
        f64::INFINITY
    } else {
        max_finite(engine.distance())
    };
    tracing::info!(samples = picks.len(), coverage, "sample_done");

    let points: Vec<_> = picks.iter().map(|&id| grid.point(id)).collect();
    let mut df = df!(
        "id" => picks.iter().map(|&id| id as u64).collect::<Vec<_>>(),
        "x" => points.iter().map(|p| p.x).collect::<Vec<_>>(),
        "y" => points.iter().map(|p| p.y).collect::<Vec<_>>(),
        "z" => points.iter().map(|p| p.z).collect::<Vec<_>>()
    )?;
    write_frame(out, &mut df)?;

    let record = Provenance::new(
        "sample",
        json!({ "dims": dims, "count": count, "radial": radial }),
    )
    .with_summary(json!({ "samples": picks.len(), "active": grid.active_count(), "coverage": coverage }));
    write_sidecar(out, record)?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "marcher_version": marcher::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn max_finite(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|d| d.is_finite())
        .fold(0.0, f64::max)
}

fn is_parquet(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "parquet")
}

/// Edge triples from CSV (header `from,to,cost`) or Parquet with the same columns.
fn read_edges(path: &Path) -> Result<Vec<(ElementId, ElementId, f64)>> {
    let lf = if is_parquet(path) {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
    } else {
        LazyCsvReader::new(path).with_has_header(true).finish()?
    };
    let df = lf
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let from = id_column(&df, "from")?;
    let to = id_column(&df, "to")?;
    let cost = df.column("cost")?.cast(&DataType::Float64)?;
    let mut edges = Vec::with_capacity(df.height());
    for (row, ((a, b), c)) in from.into_iter().zip(to).zip(cost.f64()?).enumerate() {
        let Some(c) = c else {
            bail!("row {row}: missing cost");
        };
        edges.push((a, b, c));
    }
    Ok(edges)
}

fn id_column(df: &DataFrame, name: &str) -> Result<Vec<ElementId>> {
    let col = df.column(name)?.cast(&DataType::UInt64)?;
    col.u64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| match v {
            Some(id) => Ok(id as ElementId),
            None => bail!("row {row}: missing or negative `{name}`"),
        })
        .collect()
}

fn write_frame(out: &Path, df: &mut DataFrame) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    if is_parquet(out) {
        ParquetWriter::new(&mut file).finish(df)?;
    } else {
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn read_back(path: &Path) -> DataFrame {
        LazyCsvReader::new(path)
            .with_has_header(true)
            .finish()
            .unwrap()
            .collect()
            .unwrap()
    }

    fn f64_column(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        let col = df.column(name).unwrap().cast(&DataType::Float64).unwrap();
        col.f64().unwrap().into_iter().collect()
    }

    #[test]
    fn march_writes_distances_labels_and_sidecar() {
        let dir = tempdir().unwrap();
        let edges = dir.path().join("edges.csv");
        std::fs::write(&edges, "from,to,cost\n0,1,1.0\n1,2,1.0\n2,3,1.0\n3,4,1.0\n").unwrap();
        let out = dir.path().join("out/dist.csv");
        march(&edges, &[0, 4], &out, Some(6)).unwrap();

        let df = read_back(&out);
        assert_eq!(df.height(), 6);
        let d = f64_column(&df, "distance");
        assert_eq!(&d[..5], &[Some(0.0), Some(1.0), Some(2.0), Some(1.0), Some(0.0)]);
        assert_eq!(d[5], None);
        let v = f64_column(&df, "voronoi");
        assert_eq!(v[1], Some(0.0));
        assert_eq!(v[3], Some(4.0));
        assert_eq!(v[5], None);

        let sidecar = dir.path().join("out/dist.provenance.json");
        let parsed: serde_json::Value =
            serde_json::from_slice(&std::fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(parsed["command"], "march");
        assert_eq!(parsed["summary"]["reached"], 5);
    }

    #[test]
    fn march_rejects_out_of_range_seed() {
        let dir = tempdir().unwrap();
        let edges = dir.path().join("edges.csv");
        std::fs::write(&edges, "from,to,cost\n0,1,2.5\n").unwrap();
        let out = dir.path().join("dist.csv");
        let err = march(&edges, &[3], &out, None).unwrap_err();
        assert!(format!("{err:#}").contains("out of range"));
        assert!(!out.exists());
    }

    #[test]
    fn sample_writes_requested_points() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("samples.csv");
        sample(&[8, 8, 8], 5, &out, false).unwrap();
        let df = read_back(&out);
        assert_eq!(df.height(), 5);
        assert!(dir.path().join("samples.provenance.json").exists());

        assert!(sample(&[8, 8], 5, &out, false).is_err());
    }
}
