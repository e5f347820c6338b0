//! Layout configuration.
//!
//! The configuration is loaded from a YAML file whose path is passed on the
//! command line (`--config <path>`) or found in one of the default locations.
//! It lists named configurations, each of which applies to one exact set of
//! connected monitors.
//!
//! # Example
//!
//! ```yaml
//! options:
//!   remove_unlisted: true
//!   reorder: true
//! configurations:
//!   - name: docked
//!     monitors: [eDP-1, DP-1]
//!     layouts:
//!       - monitor: DP-1
//!         desktops: [web, code, chat]
//!       - monitor: eDP-1
//!         desktops: [music]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the config directory.
pub const CONFIG_FILE: &str = "configuration.yaml";

/// Top-level configuration file.
///
/// Every field is optional and falls back to its default,
/// though a file without configurations never matches anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Switches that tune how the reconciliation plan is built.
    #[serde(default)]
    pub options: Options,

    /// Candidate configurations, tried in file order.
    #[serde(default)]
    pub configurations: Vec<Configuration>,
}

/// Planner switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Delete desktops that no layout of the selected configuration names.
    pub remove_unlisted: bool,
    /// Put each layout monitor's desktops into the listed order.
    pub reorder: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            remove_unlisted: true,
            reorder: true,
        }
    }
}

/// A named arrangement that applies when exactly `monitors` are connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,

    /// Monitor names that must be connected (in any order) for this
    /// configuration to be selected.
    #[serde(default)]
    pub monitors: Vec<String>,

    #[serde(default)]
    pub layouts: Vec<Layout>,
}

/// Desktops wanted on one monitor, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub monitor: String,
    #[serde(default)]
    pub desktops: Vec<String>,
}

impl Configuration {
    /// Whether this configuration's monitor set equals `detected`,
    /// ignoring order and repeated names.
    pub fn matches(&self, detected: &[String]) -> bool {
        let wanted: HashSet<&str> = self.monitors.iter().map(String::as_str).collect();
        let found: HashSet<&str> = detected.iter().map(String::as_str).collect();
        wanted == found
    }
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e.0)))
    }

    /// Parse configuration from a YAML string.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(contents).map_err(|e| ConfigError(e.to_string()))
    }

    /// Return the first configuration whose monitor set equals `detected`.
    pub fn active_configuration(&self, detected: &[String]) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.matches(detected))
    }
}

/// Pick the configuration file: `explicit` if given, else
/// [`CONFIG_FILE`] in `working_dir` if it exists, else [`CONFIG_FILE`] in
/// `config_dir` (whether or not it exists).
pub fn resolve_path(explicit: Option<PathBuf>, working_dir: &Path, config_dir: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    let local = working_dir.join(CONFIG_FILE);
    if local.is_file() {
        return local;
    }
    config_dir.join(CONFIG_FILE)
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    const SAMPLE: &str = r#"
configurations:
  - name: laptop
    monitors: [eDP-1]
    layouts:
      - monitor: eDP-1
        desktops: ["1", "2", "3"]
  - name: docked
    monitors: [eDP-1, DP-1]
    layouts:
      - monitor: DP-1
        desktops: [web, code]
      - monitor: eDP-1
        desktops: [chat]
"#;

    #[test]
    fn deserialize_full_config() {
        let yaml = r#"
options:
  remove_unlisted: false
  reorder: false
configurations:
  - name: docked
    monitors: [eDP-1, DP-1]
    layouts:
      - monitor: DP-1
        desktops: [web, code]
"#;
        let cfg = Config::parse(yaml).unwrap();
        assert!(!cfg.options.remove_unlisted);
        assert!(!cfg.options.reorder);
        assert_eq!(cfg.configurations.len(), 1);
        let c = &cfg.configurations[0];
        assert_eq!(c.name, "docked");
        assert_eq!(c.monitors, names(&["eDP-1", "DP-1"]));
        assert_eq!(c.layouts[0].monitor, "DP-1");
        assert_eq!(c.layouts[0].desktops, names(&["web", "code"]));
    }

    #[test]
    fn missing_options_use_defaults() {
        let cfg = Config::parse(SAMPLE).unwrap();
        assert_eq!(cfg.options, Options::default());
        assert!(cfg.options.remove_unlisted);
        assert!(cfg.options.reorder);
    }

    #[test]
    fn partial_options() {
        let yaml = "options:\n  reorder: false\nconfigurations: []\n";
        let cfg = Config::parse(yaml).unwrap();
        assert!(cfg.options.remove_unlisted);
        assert!(!cfg.options.reorder);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let yaml = "configurations:\n  - name: bare\n";
        let cfg = Config::parse(yaml).unwrap();
        assert!(cfg.configurations[0].monitors.is_empty());
        assert!(cfg.configurations[0].layouts.is_empty());
    }

    #[test]
    fn unknown_keys_ignored() {
        let yaml = "configurations: []\nfuture_section:\n  key: 42\n";
        let _cfg = Config::parse(yaml).unwrap();
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = Config::parse("configurations: [name: {").unwrap_err();
        assert!(err.to_string().starts_with("config error:"));
    }

    #[test]
    fn missing_configuration_name_is_an_error() {
        assert!(Config::parse("configurations:\n  - monitors: [DP-1]\n").is_err());
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = Config::load(Path::new("/nonexistent/bspdesk/configuration.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bspdesk/configuration.yaml"));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("bspdesk-config-{}.yaml", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let cfg = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(cfg.configurations.len(), 2);
    }

    //  Path resolution

    /// A fresh, empty directory under the system temp dir.
    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bspdesk-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn explicit_path_wins() {
        let cwd = scratch_dir("explicit-cwd");
        std::fs::write(cwd.join(CONFIG_FILE), SAMPLE).unwrap();
        let chosen = resolve_path(Some(PathBuf::from("/etc/custom.yaml")), &cwd, Path::new("/xdg"));
        std::fs::remove_dir_all(&cwd).unwrap();
        assert_eq!(chosen, PathBuf::from("/etc/custom.yaml"));
    }

    #[test]
    fn working_directory_file_before_config_dir() {
        let cwd = scratch_dir("local-cwd");
        std::fs::write(cwd.join(CONFIG_FILE), SAMPLE).unwrap();
        let chosen = resolve_path(None, &cwd, Path::new("/xdg/bspdesk"));
        std::fs::remove_dir_all(&cwd).unwrap();
        assert_eq!(chosen, cwd.join(CONFIG_FILE));
    }

    #[test]
    fn falls_back_to_config_dir() {
        let cwd = scratch_dir("fallback-cwd");
        let chosen = resolve_path(None, &cwd, Path::new("/xdg/bspdesk"));
        std::fs::remove_dir_all(&cwd).unwrap();
        assert_eq!(chosen, PathBuf::from("/xdg/bspdesk/configuration.yaml"));
    }

    #[test]
    fn directory_named_like_config_is_not_a_file() {
        let cwd = scratch_dir("dir-cwd");
        std::fs::create_dir_all(cwd.join(CONFIG_FILE)).unwrap();
        let chosen = resolve_path(None, &cwd, Path::new("/xdg/bspdesk"));
        std::fs::remove_dir_all(&cwd).unwrap();
        assert_eq!(chosen, PathBuf::from("/xdg/bspdesk/configuration.yaml"));
    }

    //  Matching

    #[test]
    fn match_is_order_insensitive() {
        let cfg = Config::parse(SAMPLE).unwrap();
        let active = cfg.active_configuration(&names(&["DP-1", "eDP-1"])).unwrap();
        assert_eq!(active.name, "docked");
    }

    #[test]
    fn match_single_monitor() {
        let cfg = Config::parse(SAMPLE).unwrap();
        let active = cfg.active_configuration(&names(&["eDP-1"])).unwrap();
        assert_eq!(active.name, "laptop");
    }

    #[test]
    fn subset_or_superset_does_not_match() {
        let cfg = Config::parse(SAMPLE).unwrap();
        assert!(cfg.active_configuration(&names(&["DP-1"])).is_none());
        assert!(cfg
            .active_configuration(&names(&["eDP-1", "DP-1", "HDMI-A-1"]))
            .is_none());
    }

    #[test]
    fn first_match_wins() {
        let yaml = r#"
configurations:
  - name: first
    monitors: [DP-1, DP-2]
  - name: second
    monitors: [DP-2, DP-1]
"#;
        let cfg = Config::parse(yaml).unwrap();
        let active = cfg.active_configuration(&names(&["DP-2", "DP-1"])).unwrap();
        assert_eq!(active.name, "first");
    }

    #[test]
    fn repeated_names_do_not_count_twice() {
        let c = Configuration {
            name: "dup".into(),
            monitors: names(&["DP-1", "DP-1"]),
            layouts: vec![],
        };
        assert!(!c.matches(&names(&["DP-1", "DP-2"])));
        assert!(c.matches(&names(&["DP-1"])));
    }

    #[test]
    fn empty_detection_only_matches_empty_set() {
        let cfg = Config::parse(SAMPLE).unwrap();
        assert!(cfg.active_configuration(&[]).is_none());
        let empty = Configuration {
            name: "headless".into(),
            monitors: vec![],
            layouts: vec![],
        };
        assert!(empty.matches(&[]));
    }
}
