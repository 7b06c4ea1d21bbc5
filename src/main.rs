use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use patrol::{load_map, logging, loop_inducing_positions, walk_path, Strategy};

#[derive(Parser)]
#[command(name = "patrol", version, about = "Trace a patrolling guard and count the obstructions that trap her")]
struct Cli {
    /// 1 for cells visited, 2 for loop-inducing obstructions; both if omitted
    #[arg(value_parser = clap::value_parser!(u8).range(1 ..= 2))]
    part: Option<u8>,

    /// Read `day6test<N>.in` instead of `day6.in`
    #[arg(long)]
    test: Option<u32>,

    /// Read this file instead
    #[arg(long, conflicts_with = "test")]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Strategy::Restart)]
    strategy: Strategy,
}

impl Cli {
    fn input_path(&self) -> PathBuf {
        match (&self.input, self.test) {
            (Some(path), _) => path.clone(),
            (None, Some(test)) => format!("day6test{}.in", test).into(),
            (None, None) => "day6.in".into(),
        }
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let fname = cli.input_path();
    info!(path = %fname.display(), strategy = ?cli.strategy, "loading map");
    let map = load_map(&fname)?;

    let time = std::time::Instant::now();
    if cli.part != Some(2) {
        println!("{}", walk_path(&map.grid, map.start)?.len());
    }
    if cli.part != Some(1) {
        println!("{}", loop_inducing_positions(&map.grid, map.start, cli.strategy)?.len());
    }
    eprintln!("{} seconds elapsed", time.elapsed().as_secs_f32());
    Ok(())
}
