use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const STORAGE_KEY: &str = "bah_data_v2";

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl StoreConfig {
    /// Uses `data_dir` when given, `~/.cellar` otherwise.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".cellar")
            }
        };
        Ok(Self {
            data_dir,
            storage_key: STORAGE_KEY.to_string(),
        })
    }
}
