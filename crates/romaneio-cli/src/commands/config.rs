//! Config command - inspect and edit the JSON configuration.
//!
//! Keys are `section.field` over the known sections (extraction,
//! blocklist, dispatch, store). Edits are validated by deserializing
//! the result back into the config type before anything is saved, so a
//! typo or a wrong-typed value never lands on disk.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use romaneio_core::RomaneioConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with the defaults
    Init(InitArgs),

    /// Print a section or field (e.g. "dispatch.template")
    Get {
        /// Key, "section" or "section.field"
        key: String,
    },

    /// Change a field and save
    Set {
        /// Key, "section.field"
        key: String,
        /// New value; JSON literals are parsed, anything else is a string
        value: String,
    },

    /// Show where the configuration file lives
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

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show(),
        ConfigCommand::Init(init) => init_file(init),
        ConfigCommand::Get { key } => {
            let value = lookup(&load_or_default()?, &key)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        ConfigCommand::Set { key, value } => set(&key, &value),
        ConfigCommand::Path => path(),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("romaneio")
        .join("config.json")
}

fn load_or_default() -> anyhow::Result<RomaneioConfig> {
    let path = default_config_path();
    if path.exists() {
        Ok(RomaneioConfig::from_file(&path)?)
    } else {
        Ok(RomaneioConfig::default())
    }
}

fn show() -> anyhow::Result<()> {
    if !default_config_path().exists() {
        println!(
            "{} No config file, these are the defaults.",
            style("ℹ").blue()
        );
    }
    println!("{}", serde_json::to_string_pretty(&load_or_default()?)?);
    Ok(())
}

fn init_file(args: InitArgs) -> anyhow::Result<()> {
    let path = args.output.unwrap_or_else(default_config_path);
    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    RomaneioConfig::default().save(&path)?;
    println!("{} Wrote {}", style("✓").green(), path.display());
    Ok(())
}

fn set(key: &str, raw: &str) -> anyhow::Result<()> {
    let updated = apply(load_or_default()?, key, raw)?;
    let path = default_config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    updated.save(&path)?;
    println!(
        "{} Set {} in {}",
        style("✓").green(),
        style(key).bold(),
        path.display()
    );
    Ok(())
}

fn path() -> anyhow::Result<()> {
    let path = default_config_path();
    println!("Configuration file: {}", path.display());
    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'romaneio config init' to create it.");
    }
    Ok(())
}

/// Read a section or a single field out of the config.
fn lookup(config: &RomaneioConfig, key: &str) -> anyhow::Result<Value> {
    let tree = serde_json::to_value(config)?;
    let mut node = &tree;
    for part in key.split('.') {
        node = node
            .get(part)
            .ok_or_else(|| unknown_key(key, &tree))?;
    }
    Ok(node.clone())
}

/// Apply one `section.field` edit and re-type the whole config.
fn apply(config: RomaneioConfig, key: &str, raw: &str) -> anyhow::Result<RomaneioConfig> {
    let (section, field) = key
        .split_once('.')
        .ok_or_else(|| anyhow::anyhow!("key must be section.field, e.g. dispatch.template"))?;

    let mut tree = serde_json::to_value(&config)?;
    let err = unknown_key(key, &tree);
    let Some(fields) = tree.get_mut(section).and_then(Value::as_object_mut) else {
        return Err(err);
    };
    if !fields.contains_key(field) {
        return Err(err);
    }

    // "3.0" or ["a","b"] parse as JSON; plain text becomes a string
    let value: Value =
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    fields.insert(field.to_string(), value);

    serde_json::from_value(tree)
        .map_err(|e| anyhow::anyhow!("{} does not accept that value: {}", key, e))
}

fn unknown_key(key: &str, tree: &Value) -> anyhow::Error {
    anyhow::anyhow!("unknown key '{}'; known keys: {}", key, known_keys(tree).join(", "))
}

/// Every `section.field` pair the config shape offers.
fn known_keys(tree: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    let Some(sections) = tree.as_object() else {
        return keys;
    };
    for (section, body) in sections {
        match body.as_object() {
            Some(fields) => {
                keys.extend(fields.keys().map(|f| format!("{section}.{f}")));
            }
            None => keys.push(section.clone()),
        }
    }
    keys
}
