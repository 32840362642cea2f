use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use drainpool::{
    inputs, BatchRunner, Result, SharedQueueThreadPool, ShutdownPolicy, SimulatedProcessor,
};

const DEFAULT_INPUTS: &str = "input-00,input-01,input-02,input-03,input-04,input-05,\
                              input-06,input-07,input-08,input-09,input-10,input-11,\
                              input-12,input-13,input-14,input-15";

#[derive(Parser)]
#[command(name = "pool-bench", version, about = "Measures batch throughput on a thread pool")]
struct Cli {
    /// Number of worker threads [default: number of CPUs]
    #[arg(long)]
    threads: Option<u32>,

    /// Number of inputs per batch
    #[arg(long, default_value_t = 8)]
    batch_size: usize,

    /// Number of times the input list is repeated
    #[arg(long, default_value_t = 1)]
    repeat: usize,

    /// Comma separated list of inputs
    #[arg(long, default_value = DEFAULT_INPUTS)]
    inputs: String,

    /// Directory to list inputs from, overrides --inputs
    #[arg(long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// File extension accepted from --input-dir, may be repeated
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Simulated cost per input in milliseconds
    #[arg(long, default_value_t = 2)]
    work_ms: u64,

    /// Join worker threads when the pool is dropped
    #[arg(long)]
    join: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let listed = match &cli.input_dir {
        Some(dir) => inputs::list_dir(dir, &cli.extensions)?,
        None => inputs::split(&cli.inputs, ','),
    };
    let files = inputs::repeat(&listed, cli.repeat);

    let policy = if cli.join {
        ShutdownPolicy::Join
    } else {
        ShutdownPolicy::Detach
    };
    let mut builder = SharedQueueThreadPool::builder().shutdown_policy(policy);
    if let Some(threads) = cli.threads {
        builder = builder.threads(threads);
    }
    let pool = builder.build()?;

    info!("pool-bench {}", env!("CARGO_PKG_VERSION"));
    info!(
        "{} inputs, {} threads, batch size {}",
        files.len(),
        pool.threads(),
        cli.batch_size
    );

    let processor = SimulatedProcessor::new(Duration::from_millis(cli.work_ms));
    let runner = BatchRunner::new(pool, processor, cli.batch_size)?;
    let report = runner.run(&files)?;

    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
