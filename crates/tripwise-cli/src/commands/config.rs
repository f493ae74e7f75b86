use clap::Subcommand;
use std::path::PathBuf;
use tripwise_core::{PreferenceStore, Preferences};

use super::CliResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a preference value
    Get {
        /// Dot-path key (e.g. "automation_level", "scheduler.minimum_buffer_minutes")
        key: String,
    },
    /// Set a preference value
    Set {
        /// Dot-path key
        key: String,
        /// New value
        value: String,
    },
    /// List all preference values
    List {
        /// Print as JSON instead of key = value lines
        #[arg(long)]
        json: bool,
    },
    /// Reset preferences to defaults
    Reset,
    /// Print the preferences file path
    Path,
}

pub fn run(action: ConfigAction, config_path: Option<PathBuf>) -> CliResult {
    let store = super::store(config_path)?;

    match action {
        ConfigAction::Get { key } => {
            let prefs = store.load()?;
            match prefs.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut prefs = store.load()?;
            prefs.set(&key, &value)?;
            store.save(&prefs)?;
            println!("ok");
        }
        ConfigAction::List { json } => {
            let prefs = store.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&prefs)?);
            } else {
                for (key, value) in prefs.entries() {
                    println!("{key} = {value}");
                }
            }
        }
        ConfigAction::Reset => {
            store.save(&Preferences::default())?;
            println!("preferences reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", store.path().display());
        }
    }
    Ok(())
}
