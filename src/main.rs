use anyhow::Context;
use clap::Parser;
use movie_vault::cli::{Cli, Commands};
use movie_vault::{Config, init_tracing, run};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load()?;

    if cli.command() == Commands::Serve {
        config.validate().context("Invalid configuration")?;
        init_tracing(&config)?;
    }

    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build().context("Failed to build tokio runtime")?;
    runtime.block_on(run(cli, config))
}
