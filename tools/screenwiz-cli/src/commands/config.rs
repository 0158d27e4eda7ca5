//! Show or write the effective configuration.

use std::path::Path;

use screenwiz_common::config::{config_file_path, AppConfig};

/// Print `config`. With `write`, save it to `path` when one was given on
/// the command line, otherwise to the standard location.
pub fn run(config: &AppConfig, path: Option<&Path>, write: bool) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);

    if write {
        let target = path.map_or_else(config_file_path, Path::to_path_buf);
        config.save_to(&target)?;
        println!("\nWrote {}", target.display());
    }

    Ok(())
}
