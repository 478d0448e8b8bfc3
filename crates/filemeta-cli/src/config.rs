//! Host configuration (config.yaml)
//!
//! Maps a host id to the directories to scan on that host:
//!
//! ```yaml
//! local:
//!   paths: [/data/runs]
//!   exts: [.fastq.gz]
//! seqbox:
//!   host: seqbox.example.org
//!   user: ngs
//!   port: 2222
//!   key: ~/.ssh/id_ed25519
//!   aliases: [seqbox]
//!   paths: [/mnt/runs]
//! ```
//!
//! Hosts are scanned in file order.

use crate::error::{CliError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Default config file name, looked up next to the executable
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Default remote shell port
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Host id that always resolves to the local filesystem
pub const LOCAL_HOST_ID: &str = "local";

/// One configured source of files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostEntry {
    /// Root directories to scan
    pub paths: Vec<String>,

    /// Suffix filters; empty or absent keeps every file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exts: Option<Vec<String>>,

    /// Remote address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Remote login user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Remote port, as a number or a quoted number
    #[serde(
        default,
        deserialize_with = "deserialize_port",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<u16>,

    /// Private key path, `~` allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Local hostnames under which this host is the current machine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

impl HostEntry {
    /// Entry scanning local roots only
    pub fn local(paths: Vec<String>, exts: Vec<String>) -> Self {
        Self {
            paths,
            exts: Some(exts),
            ..Self::default()
        }
    }

    pub fn exts(&self) -> &[String] {
        self.exts.as_deref().unwrap_or_default()
    }

    pub fn aliases(&self) -> &[String] {
        self.aliases.as_deref().unwrap_or_default()
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_SSH_PORT)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PortValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PortValue::Number(port)) => Ok(Some(port)),
        Some(PortValue::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid port '{}'", text))),
    }
}

/// Ordered host id -> entry mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostsConfig {
    hosts: Vec<(String, HostEntry)>,
}

impl HostsConfig {
    /// Single synthetic `local` host, used when roots are given on the command line
    pub fn local(paths: Vec<String>, exts: Vec<String>) -> Self {
        Self {
            hosts: vec![(LOCAL_HOST_ID.to_string(), HostEntry::local(paths, exts))],
        }
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::ConfigNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text, keeping host order
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mapping = match serde_yaml::from_str::<Value>(content)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Err(CliError::invalid_config("configuration is empty")),
            _ => {
                return Err(CliError::invalid_config(
                    "expected a mapping of host ids to host entries",
                ))
            },
        };

        let mut hosts = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let host_id = match key {
                Value::String(host_id) => host_id,
                other => {
                    return Err(CliError::invalid_config(format!(
                        "host ids must be strings, got {:?}",
                        other
                    )))
                },
            };
            let entry: HostEntry = serde_yaml::from_value(value)
                .map_err(|e| CliError::invalid_config(format!("host '{}': {}", host_id, e)))?;
            hosts.push((host_id, entry));
        }

        Ok(Self { hosts })
    }

    pub fn hosts(&self) -> &[(String, HostEntry)] {
        &self.hosts
    }
}

/// `config.yaml` next to the running executable, or in the working
/// directory when the executable location is unknown
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CONFIG_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Expand a leading `~` against the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
seqbox:
  host: seqbox.example.org
  user: ngs
  port: 2222
  key: ~/.ssh/id_ed25519
  aliases: [seqbox, seqbox.local]
  paths: [/mnt/runs, /mnt/archive]
local:
  paths: [/data/runs]
  exts: [.fastq.gz, .bam]
"#;

    #[test]
    fn test_parse_keeps_host_order() {
        let config = HostsConfig::from_yaml_str(SAMPLE).unwrap();
        let ids: Vec<&str> = config.hosts().iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["seqbox", "local"]);
    }

    #[test]
    fn test_parse_remote_entry() {
        let config = HostsConfig::from_yaml_str(SAMPLE).unwrap();
        let (_, entry) = &config.hosts()[0];
        assert_eq!(entry.host.as_deref(), Some("seqbox.example.org"));
        assert_eq!(entry.user.as_deref(), Some("ngs"));
        assert_eq!(entry.port(), 2222);
        assert_eq!(entry.key.as_deref(), Some("~/.ssh/id_ed25519"));
        assert_eq!(entry.aliases(), ["seqbox".to_string(), "seqbox.local".to_string()]);
        assert_eq!(entry.paths.len(), 2);
        assert!(entry.exts().is_empty());
    }

    #[test]
    fn test_parse_defaults() {
        let config = HostsConfig::from_yaml_str("box:\n  host: h\n  user: u\n  paths: [/x]\n  exts: ~\n").unwrap();
        let (_, entry) = &config.hosts()[0];
        assert_eq!(entry.port(), DEFAULT_SSH_PORT);
        assert!(entry.exts().is_empty());
        assert!(entry.aliases().is_empty());
        assert!(entry.key.is_none());
    }

    #[test]
    fn test_parse_quoted_port() {
        let config =
            HostsConfig::from_yaml_str("box:\n  host: h\n  user: u\n  port: \"2222\"\n  paths: [/x]\n").unwrap();
        assert_eq!(config.hosts()[0].1.port(), 2222);
    }

    #[test]
    fn test_parse_bad_port_is_error() {
        for port in ["\"ssh\"", "70000", "\"70000\""] {
            let yaml = format!("box:\n  host: h\n  user: u\n  port: {}\n  paths: [/x]\n", port);
            let err = HostsConfig::from_yaml_str(&yaml).unwrap_err();
            assert!(matches!(err, CliError::InvalidConfig(_)), "port {}", port);
        }
    }

    #[test]
    fn test_parse_missing_paths_is_error() {
        let err = HostsConfig::from_yaml_str("box:\n  host: h\n").unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig(_)));
        assert!(err.to_string().contains("box"));
    }

    #[test]
    fn test_parse_rejects_non_mapping() {
        assert!(matches!(
            HostsConfig::from_yaml_str("- a\n- b\n").unwrap_err(),
            CliError::InvalidConfig(_)
        ));
        assert!(matches!(
            HostsConfig::from_yaml_str("").unwrap_err(),
            CliError::InvalidConfig(_) | CliError::YamlParse(_)
        ));
    }

    #[test]
    fn test_parse_malformed_yaml() {
        let err = HostsConfig::from_yaml_str("local: [unclosed").unwrap_err();
        assert!(matches!(err, CliError::YamlParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), SAMPLE).unwrap();

        let config = HostsConfig::load(file.path()).unwrap();
        assert_eq!(config.hosts().len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = HostsConfig::load("/nonexistent/filemeta/config.yaml").unwrap_err();
        assert!(matches!(err, CliError::ConfigNotFound(_)));
    }

    #[test]
    fn test_local_config() {
        let config = HostsConfig::local(vec!["/data".to_string()], vec![".fastq".to_string()]);
        let (id, entry) = &config.hosts()[0];
        assert_eq!(id, LOCAL_HOST_ID);
        assert_eq!(entry.exts(), [".fastq".to_string()]);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/etc/key"), PathBuf::from("/etc/key"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.ssh/id"), home.join(".ssh/id"));
            assert_eq!(expand_home("~"), home);
        }
    }

    #[test]
    fn test_default_config_path_file_name() {
        assert!(default_config_path().ends_with(DEFAULT_CONFIG_FILE));
    }
}
