use anyhow::Result;
use clap::Parser;
use genolab_lib::cli::{run, Cli};
use genolab_lib::model::config::AppConfig;
use genolab_lib::model::metrics::{init_logging, Metrics};

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)?;

    let metrics = Metrics::new();
    let output = run(&cli, &config, &metrics)?;
    println!("{output}");
    metrics.log_summary();

    Ok(())
}
