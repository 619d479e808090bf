use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::db::{ConfiguredObjects, ConnectionInfo, SchemaErrorPolicy};

/// How the object catalog is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    /// Interrogate the catalog views for the configured schemas.
    #[default]
    Live,
    /// Use the configured name lists only.
    Configured,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub connection: ConnectionInfo,
    pub schemas: Vec<String>,
    pub discovery_mode: DiscoveryMode,
    pub objects: ConfiguredObjects,
    pub page_size: usize,
    pub data_page_size: usize,
    pub on_schema_error: SchemaErrorPolicy,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            connection: ConnectionInfo::default(),
            schemas: Vec::new(),
            discovery_mode: DiscoveryMode::Live,
            objects: ConfiguredObjects::default(),
            page_size: 10,
            data_page_size: 20,
            on_schema_error: SchemaErrorPolicy::FailRequest,
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("orascope");
            path.push("config.json");
            path
        })
    }

    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(config) = serde_json::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::new()
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                match fs::create_dir_all(parent) {
                    Ok(()) => {}
                    Err(err) => { eprintln!("Config persistence error: {err}"); return Err(Box::new(err)); },
                }
            }
            let content = match serde_json::to_string_pretty(self) {
                Ok(content) => content,
                Err(err) => { eprintln!("Config persistence error: {err}"); return Err(Box::new(err)); },
            };
            match fs::write(path, content) {
                Ok(()) => {}
                Err(err) => { eprintln!("Config persistence error: {err}"); return Err(Box::new(err)); },
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BrowseHistory {
    pub entries: Vec<BrowseHistoryEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BrowseHistoryEntry {
    pub request: String,
    pub timestamp: String,
    pub execution_time_ms: u64,
    pub object_count: usize,
    pub connection_name: String,
}

impl BrowseHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|mut path| {
            path.push("orascope");
            path.push("history.json");
            path
        })
    }

    pub fn load() -> Self {
        if let Some(path) = Self::history_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(history) = serde_json::from_str(&content) {
                        return history;
                    }
                }
            }
        }
        Self::new()
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(path) = Self::history_path() {
            if let Some(parent) = path.parent() {
                match fs::create_dir_all(parent) {
                    Ok(()) => {}
                    Err(err) => { eprintln!("History persistence error: {err}"); return Err(Box::new(err)); },
                }
            }
            let content = match serde_json::to_string_pretty(self) {
                Ok(content) => content,
                Err(err) => { eprintln!("History persistence error: {err}"); return Err(Box::new(err)); },
            };
            match fs::write(path, content) {
                Ok(()) => {}
                Err(err) => { eprintln!("History persistence error: {err}"); return Err(Box::new(err)); },
            }
        }
        Ok(())
    }

    pub fn add_entry(&mut self, entry: BrowseHistoryEntry) {
        self.entries.insert(0, entry);
        // Keep only the most recent browses
        self.entries.truncate(200);
    }
}

impl Default for BrowseHistory {
    fn default() -> Self {
        Self::new()
    }
}
