use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use island_generator::export;
use island_generator::island::Island;
use island_generator::simulation::ActivityLog;

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate a procedural island and simulate the critters living on it")]
struct Args {
    /// Width of the island in cells
    #[arg(short = 'W', long, default_value = "220")]
    width: usize,

    /// Height of the island in cells
    #[arg(short = 'H', long, default_value = "140")]
    height: usize,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of simulation steps to run
    #[arg(short, long, default_value = "10")]
    ticks: u64,

    /// Tick agents in parallel
    #[arg(long)]
    parallel: bool,

    /// Export the colored height map to a PNG (e.g. "island_color.png")
    #[arg(long)]
    export_map: Option<String>,

    /// Export the raw height map to a grayscale PNG (e.g. "island.png")
    #[arg(long)]
    export_height: Option<String>,

    /// Export the final simulation state to a JSON file
    #[arg(long)]
    export_state: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("using seed {}", seed);

    let mut island = match Island::generate(seed, args.width, args.height) {
        Ok(island) => island,
        Err(e) => {
            eprintln!("Failed to generate island: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "generated {}x{} island with {} cells",
        island.width,
        island.height,
        island.width * island.height
    );

    let mut log = ActivityLog::new();
    island.fill_with_critters(&mut log);
    drain_activity(&mut log);
    info!("spawned {} critters", island.spawns.len());

    for _ in 0..args.ticks {
        if args.parallel {
            island.tick_parallel(&mut log);
        } else {
            island.tick(&mut log);
        }
        drain_activity(&mut log);
    }

    info!(
        "ran {} ticks: {} events, {} items consumed, {} actions planned, {} world changes",
        args.ticks,
        log.stats.total_events,
        log.stats.items_consumed,
        log.stats.actions_planned,
        log.stats.world_events,
    );

    if let Some(ref path) = args.export_map {
        match export::export_colored_height_map(&island, path) {
            Ok(()) => info!("wrote colored map to {}", path),
            Err(e) => eprintln!("Failed to export colored map: {}", e),
        }
    }

    if let Some(ref path) = args.export_height {
        match export::export_height_map(&island, path) {
            Ok(()) => info!("wrote height map to {}", path),
            Err(e) => eprintln!("Failed to export height map: {}", e),
        }
    }

    if let Some(ref path) = args.export_state {
        match export::export_snapshot(&island, path) {
            Ok(()) => info!("wrote simulation state to {}", path),
            Err(e) => eprintln!("Failed to export simulation state: {}", e),
        }
    }
}

/// Surface pending activity-log entries through tracing.
fn drain_activity(log: &mut ActivityLog) {
    for entry in log.drain() {
        info!(
            "[{:>4}] {:<4} {}: {}",
            entry.tick,
            entry.category.label(),
            entry.actor,
            entry.message
        );
    }
}
