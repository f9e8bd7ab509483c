pub mod roll;
pub mod tables;

use std::path::Path;

use kd_karma::{KarmaConfig, ResultTables};

/// Load pipeline configuration, or the defaults when no file is given.
fn load_config(path: Option<&Path>) -> Result<KarmaConfig, String> {
    match path {
        Some(path) => {
            let text = read_file(path)?;
            KarmaConfig::from_json_str(&text).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => Ok(KarmaConfig::default()),
    }
}

/// Load result tables, or the standard tables when no file is given.
fn load_tables(path: Option<&Path>) -> Result<ResultTables, String> {
    match path {
        Some(path) => {
            let text = read_file(path)?;
            ResultTables::from_json_str(&text).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => Ok(ResultTables::standard()),
    }
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}
