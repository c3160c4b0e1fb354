use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use frontier_zdd::builder::DdBuilder;
use frontier_zdd::frontier::FrontierManager;
use frontier_zdd::graph::Graph;
use frontier_zdd::specs::{SingleCycle, SinglePath, SpanningTree};
use frontier_zdd::zdd::ZddManager;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Family {
    /// Single cycles.
    Cycles,
    /// Hamiltonian cycles.
    Hamiltonian,
    /// Paths between opposite corners.
    Paths,
    /// Spanning trees.
    Trees,
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Grid size (the grid has `n x n` vertices).
    #[arg(value_name = "INT", default_value = "5")]
    n: usize,

    /// Family of subgraphs to build.
    #[arg(long, value_enum, default_value = "cycles")]
    family: Family,

    /// Number of random members to print.
    #[arg(long, value_name = "INT", default_value = "3")]
    samples: usize,

    /// Seed for sampling.
    #[arg(long, value_name = "INT", default_value = "42")]
    seed: u64,

    /// Stop once the diagram holds more nodes.
    #[arg(long, value_name = "INT")]
    node_limit: Option<usize>,

    /// Print the diagram in Graphviz format.
    #[arg(long)]
    dot: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let graph = Graph::grid(args.n, args.n);
    let fm = FrontierManager::new(&graph)?;
    println!(
        "Grid {0}x{0}: {1} vertices, {2} edges, frontier width {3}",
        args.n,
        graph.num_vertices(),
        graph.num_edges(),
        fm.max_width()
    );

    let mgr = match args.node_limit {
        Some(limit) => ZddManager::with_node_limit(limit),
        None => ZddManager::new(),
    };
    let builder = DdBuilder::new(&mgr);
    let (f, stats) = match args.family {
        Family::Cycles => builder.build_with_stats(&SingleCycle::new(&fm))?,
        Family::Hamiltonian => builder.build_with_stats(&SingleCycle::hamiltonian(&fm))?,
        Family::Paths => {
            let corner = graph.num_vertices().saturating_sub(1);
            builder.build_with_stats(&SinglePath::new(&fm, 0, corner)?)?
        }
        Family::Trees => builder.build_with_stats(&SpanningTree::new(&fm))?,
    };
    info!(
        "Explored {} states (max level width {}, peak {})",
        stats.total_states(),
        stats.max_level_width(),
        stats.peak_states
    );

    println!("{:?}: {} members, {} nodes", args.family, mgr.count(f), stats.nodes);

    let rng = StdRng::seed_from_u64(args.seed);
    for set in mgr.random_sets(f, rng).take(args.samples) {
        let edges: Vec<String> = set
            .iter()
            .map(|var| {
                let (u, v) = graph.edge(var.position());
                format!("{}-{}", u, v)
            })
            .collect();
        println!("  {{{}}}", edges.join(", "));
    }

    if args.dot {
        println!("{}", mgr.to_dot(f));
    }

    let time_total = time_total.elapsed();
    println!("\nAll done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
