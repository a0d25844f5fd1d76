//! # Jump Keys Host Daemon
//!
//! Replays an input script against a simulated host and prints the
//! resulting transcript.

use clap::Parser;
use jumpkeysd::{load_config, read_text, HostRuntime, HostRuntimeConfig};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "jumpkeysd", version)]
#[command(about = "Replay jump-keys input scripts against a simulated host")]
struct Args {
    /// Input script file
    #[arg(short, long, value_name = "FILE")]
    script: PathBuf,

    /// Adapter configuration (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stored key bindings text (JSON), as a user would have saved it
    #[arg(short, long, value_name = "FILE")]
    bindings: Option<PathBuf>,

    /// Maximum steps to run (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    max_steps: usize,

    /// Log filter, e.g. `debug` or `services_jump_gesture=trace`
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    let mut runtime = build_runtime(&args).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    for line in runtime.take_output() {
        println!("{}", line);
    }
    while runtime.step() {
        for line in runtime.take_output() {
            println!("{}", line);
        }
    }
}

fn build_runtime(args: &Args) -> Result<HostRuntime, jumpkeysd::HostRuntimeError> {
    let mut config = HostRuntimeConfig {
        script: Some(read_text(&args.script)?),
        max_steps: args.max_steps,
        ..HostRuntimeConfig::default()
    };
    if let Some(path) = &args.config {
        config.jump_keys = load_config(path)?;
    }
    if let Some(path) = &args.bindings {
        config.bindings = Some(read_text(path)?);
    }
    HostRuntime::new(config)
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
