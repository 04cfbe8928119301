use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};

use retrieval_core::types::{query_record, Movie};
use retrieval_exps::ExperimentConfig;

pub const USAGE: &str = "<params|id|clean-query|embed-text> [args...]";

/// Run one CLI command against `config`, writing the result to `out`.
pub fn run_command(config: &ExperimentConfig, cmd: &str, args: &[String], out: &mut impl Write) -> Result<()> {
    match cmd {
        "params" => {
            config.initialize_preprocessor();
            let params = serde_json::to_string_pretty(&config.exp_params())?;
            writeln!(out, "{}", params)?;
            writeln!(out, "index_config_unique_id: {}", config.index_config_unique_id())?;
        }
        "id" => writeln!(out, "{}", config.index_config_unique_id())?,
        "clean-query" => {
            if args.is_empty() {
                bail!("Usage: retrieval-cli clean-query \"<query>\"");
            }
            config.initialize_preprocessor();
            let cleaned = config.query_prepro(&query_record(args.join(" ")))?;
            writeln!(out, "{}", cleaned)?;
        }
        "embed-text" => {
            let Some(path) = args.first() else {
                bail!("Usage: retrieval-cli embed-text <movie.json>");
            };
            let movie = read_movie(Path::new(path))?;
            writeln!(out, "{}", config.text_to_embed(&movie))?;
        }
        other => bail!("Unknown command '{}'. Usage: retrieval-cli {}", other, USAGE),
    }
    Ok(())
}

fn read_movie(path: &Path) -> Result<Movie> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Movie::from_json(&json).with_context(|| format!("Failed to parse movie from {}", path.display()))
}
