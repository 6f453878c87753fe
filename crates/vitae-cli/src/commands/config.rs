//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use vitae_core::VitaeConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "storage.table_path")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a bare string)
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

/// Run a config subcommand against `--config`, or the default file.
pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn read_or_default(path: &Path) -> anyhow::Result<VitaeConfig> {
    if path.exists() {
        Ok(VitaeConfig::from_file(path)?)
    } else {
        Ok(VitaeConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = read_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, path: PathBuf) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or(path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    VitaeConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(read_or_default(path)?)?;
    let value = lookup(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(read_or_default(path)?)?;

    let parsed: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    assign(&mut json, key, parsed.clone())?;

    // Round-trip through the typed config so bad values are rejected.
    let config: VitaeConfig = serde_json::from_value(json)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'vitae config init' to create a configuration file.");
    }

    Ok(())
}

/// Follow a dotted key through nested JSON objects.
fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

/// Replace the value at an existing dotted key.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let (parent_key, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, key),
    };

    let parent = match parent_key {
        Some(parent_key) => parent_key
            .split('.')
            .try_fold(json, |current, part| current.get_mut(part)),
        None => Some(json),
    }
    .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;

    let object = parent
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path"))?;

    if !object.contains_key(leaf) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    object.insert(leaf.to_string(), value);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_nested_key() {
        let json = serde_json::to_value(VitaeConfig::default()).unwrap();
        assert_eq!(
            lookup(&json, "storage.results_prefix"),
            Some(&Value::String("results".to_string()))
        );
        assert!(lookup(&json, "storage.missing").is_none());
    }

    #[test]
    fn test_assign_rejects_unknown_key() {
        let mut json = serde_json::to_value(VitaeConfig::default()).unwrap();
        assert!(assign(&mut json, "storage.bogus", Value::Null).is_err());
        assert!(assign(&mut json, "nowhere.deep", Value::Null).is_err());
    }

    #[test]
    fn test_set_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        set_config(&path, "storage.object_root", "out").unwrap();

        let config = VitaeConfig::from_file(&path).unwrap();
        assert_eq!(config.storage.object_root, PathBuf::from("out"));
        assert_eq!(config.storage.results_prefix, "results");
    }
}
