// ============================================================================
// Secrets configuration
// ============================================================================
// The Alpha Vantage key lives in a local java-style properties file that is
// never committed. It is read once at startup; if it cannot be read the app
// still runs, but every fetch attempt reports the configuration error.
// ============================================================================

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ConfigError;

/// Default secrets file, looked up relative to the working directory.
pub const DEFAULT_SECRETS_FILE: &str = "secrets.properties";

/// Environment variable overriding the secrets file location.
pub const SECRETS_PATH_ENV: &str = "STOCKWATCH_SECRETS";

/// API credentials loaded from the secrets file.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub access_token: String,
}

impl Secrets {
    /// Loads secrets from `$STOCKWATCH_SECRETS`, or `secrets.properties`
    /// in the working directory when the variable is unset.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(SECRETS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SECRETS_FILE));
        Self::from_path(&path)
    }

    /// Loads secrets from an explicit path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Reading secrets file");

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let access_token =
            parse_property(&content, "access_token").ok_or_else(|| ConfigError::MissingToken {
                path: path.to_path_buf(),
            })?;

        info!(path = %path.display(), "Loaded API credentials");
        Ok(Self { access_token })
    }
}

/// Looks up a key in java-properties content: `key=value` or `key: value`,
/// one pair per line, `#`/`!` comment lines skipped.
fn parse_property(content: &str, key: &str) -> Option<String> {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let Some((k, v)) = line.split_once(['=', ':']) else {
            continue;
        };
        if k.trim() == key {
            let value = v.trim();
            if value.is_empty() {
                return None;
            }
            return Some(value.to_string());
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_equals() {
        let content = "access_token=abc123\n";
        assert_eq!(parse_property(content, "access_token"), Some("abc123".to_string()));
    }

    #[test]
    fn test_parse_property_colon_and_whitespace() {
        let content = "access_token : abc123  \n";
        assert_eq!(parse_property(content, "access_token"), Some("abc123".to_string()));
    }

    #[test]
    fn test_parse_property_skips_comments() {
        let content = "# access_token=commented\n! legacy comment\naccess_token=real\n";
        assert_eq!(parse_property(content, "access_token"), Some("real".to_string()));
    }

    #[test]
    fn test_parse_property_missing_key() {
        let content = "other_key=value\n";
        assert_eq!(parse_property(content, "access_token"), None);
    }

    #[test]
    fn test_parse_property_empty_value() {
        let content = "access_token=\n";
        assert_eq!(parse_property(content, "access_token"), None);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Secrets::from_path(Path::new("does-not-exist.properties"))
            .expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_from_path_reads_token() {
        let dir = std::env::temp_dir();
        let path = dir.join("stockwatch-test-secrets.properties");
        std::fs::write(&path, "# quotes API\naccess_token=demo\n").unwrap();

        let secrets = Secrets::from_path(&path).unwrap();
        assert_eq!(secrets.access_token, "demo");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_from_path_missing_token() {
        let dir = std::env::temp_dir();
        let path = dir.join("stockwatch-test-no-token.properties");
        std::fs::write(&path, "refresh_token=demo\n").unwrap();

        let err = Secrets::from_path(&path).expect_err("token absent must fail");
        assert!(matches!(err, ConfigError::MissingToken { .. }));

        std::fs::remove_file(&path).ok();
    }
}
