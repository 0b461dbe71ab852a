//! Configuration types for cowdash.
//!
//! [`Config::load`] reads `~/.config/cowdash/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[feed]
url          = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSbbDDjYaOGEd9bgF9IKaarmaWw-Yz2Pd0f_C4gelacmktiqjris1vqBufc-G-acPQJ12kOhBZYHpeR/pub?output=csv"
refresh_secs = 60
timeout_secs = 30

[defaults]
id_prefix  = "TKT-"
site       = "Unknown"
issue_type = "Other"
status     = "Open"
open_date  = ""

[columns]
id         = ["id", "ticket"]
site       = ["site", "cow"]
issue_type = ["issue", "type"]
status     = ["status"]
open_date  = ["date", "open"]

[ui]
page_size = 5
theme     = "default"

[export]
dir = "cowdash-export"

[map]
center = [24.4539, 46.5260]

[[map.sites]]
name = "COW Site 1"
lat  = 24.7136
lon  = 46.6753

[[map.sites]]
name = "COW Site 2"
lat  = 24.6748
lon  = 46.7317

[[map.sites]]
name = "COW Site 3"
lat  = 24.4539
lon  = 46.5260

[[map.sites]]
name = "Site A"
lat  = 24.5
lon  = 46.5

[[map.sites]]
name = "Site B"
lat  = 24.6
lon  = 46.7

[[map.sites]]
name = "Site C"
lat  = 24.3
lon  = 46.4
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/cowdash/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub defaults: FieldDefaults,
    #[serde(default)]
    pub columns: ColumnAliases,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub map: MapConfig,
}

/// `[feed]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_feed_url() -> String {
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vSbbDDjYaOGEd9bgF9IKaarmaWw-Yz2Pd0f_C4gelacmktiqjris1vqBufc-G-acPQJ12kOhBZYHpeR/pub?output=csv".to_string()
}
fn default_refresh_secs() -> u64 { 60 }
fn default_timeout_secs() -> u64 { 30 }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            refresh_secs: default_refresh_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[defaults]` section: the value each ticket field takes when the sheet
/// has no matching column or the cell is empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDefaults {
    /// Prefix of synthesized ids; the 1-based data-row number is appended.
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
    #[serde(default = "default_site")]
    pub site: String,
    #[serde(default = "default_issue_type")]
    pub issue_type: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub open_date: String,
}

fn default_id_prefix() -> String { "TKT-".to_string() }
fn default_site() -> String { "Unknown".to_string() }
fn default_issue_type() -> String { "Other".to_string() }
fn default_status() -> String { "Open".to_string() }

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            site: default_site(),
            issue_type: default_issue_type(),
            status: default_status(),
            open_date: String::new(),
        }
    }
}

impl FieldDefaults {
    /// Placeholder id for the data row at `row_index` (0-based).
    pub fn synthesize_id(&self, row_index: usize) -> String {
        format!("{}{}", self.id_prefix, row_index + 1)
    }
}

/// `[columns]` section: ordered header substrings tried for each field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnAliases {
    #[serde(default = "default_id_aliases")]
    pub id: Vec<String>,
    #[serde(default = "default_site_aliases")]
    pub site: Vec<String>,
    #[serde(default = "default_issue_type_aliases")]
    pub issue_type: Vec<String>,
    #[serde(default = "default_status_aliases")]
    pub status: Vec<String>,
    #[serde(default = "default_open_date_aliases")]
    pub open_date: Vec<String>,
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
fn default_id_aliases() -> Vec<String> { aliases(&["id", "ticket"]) }
fn default_site_aliases() -> Vec<String> { aliases(&["site", "cow"]) }
fn default_issue_type_aliases() -> Vec<String> { aliases(&["issue", "type"]) }
fn default_status_aliases() -> Vec<String> { aliases(&["status"]) }
fn default_open_date_aliases() -> Vec<String> { aliases(&["date", "open"]) }

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            id: default_id_aliases(),
            site: default_site_aliases(),
            issue_type: default_issue_type_aliases(),
            status: default_status_aliases(),
            open_date: default_open_date_aliases(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_page_size() -> usize { 5 }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            theme: default_theme(),
        }
    }
}

/// `[export]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
}

fn default_export_dir() -> PathBuf { PathBuf::from("cowdash-export") }

impl Default for ExportConfig {
    fn default() -> Self {
        Self { dir: default_export_dir() }
    }
}

/// `[map]` section: where each site is drawn.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    /// Fallback `[lat, lon]` for sites missing from `sites`.
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default)]
    pub sites: Vec<SiteLocation>,
}

fn default_center() -> [f64; 2] { [24.4539, 46.5260] }

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            sites: Vec::new(),
        }
    }
}

/// One `[[map.sites]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/cowdash/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::load_from(&path)
    }

    /// Load an explicit file layered over the built-in defaults. A missing
    /// file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("cowdash")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.feed.refresh_secs, 60);
        assert_eq!(cfg.ui.page_size, 5);
        assert_eq!(cfg.defaults.site, "Unknown");
        assert_eq!(cfg.defaults.issue_type, "Other");
        assert_eq!(cfg.columns.open_date, vec!["date", "open"]);
        assert_eq!(cfg.map.sites.len(), 6);
        assert_eq!(cfg.map.sites[0].name, "COW Site 1");
    }

    #[test]
    fn embedded_defaults_match_serde_defaults() {
        let cfg = Config::defaults();
        assert_eq!(cfg.defaults, FieldDefaults::default());
        assert_eq!(cfg.columns, ColumnAliases::default());
        assert_eq!(cfg.feed.url, FeedConfig::default().url);
    }

    #[test]
    fn synthesized_ids_are_one_based() {
        let d = FieldDefaults::default();
        assert_eq!(d.synthesize_id(0), "TKT-1");
        assert_eq!(d.synthesize_id(41), "TKT-42");
    }

    #[test]
    fn user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[ui]\npage_size = 10\n\n[defaults]\nsite = \"Unassigned\"\n",
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.ui.page_size, 10);
        assert_eq!(cfg.defaults.site, "Unassigned");
        // Untouched keys keep their defaults.
        assert_eq!(cfg.defaults.issue_type, "Other");
        assert_eq!(cfg.feed.refresh_secs, 60);
    }

    #[test]
    fn missing_user_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.ui.page_size, 5);
    }
}
