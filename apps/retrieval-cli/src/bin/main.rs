use std::env;

use tracing_subscriber::EnvFilter;

use retrieval_cli::{run_command, USAGE};
use retrieval_core::config::Config;
use retrieval_exps::ExperimentConfig;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() { eprintln!("Usage: {} {}", prog, USAGE); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let (cmd, args) = parse_args();

    let settings = config.experiment()?;
    let exp_config = ExperimentConfig::from_settings(&settings)?;
    tracing::info!(model = %exp_config.model_name, text_to_embed_fn = %exp_config.text_to_embed_fn(), "experiment configured");

    run_command(&exp_config, &cmd, &args, &mut std::io::stdout().lock())
}
