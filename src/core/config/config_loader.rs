// Builds a `Config` from environment-style key/value input.
//
// Two folder schemes are supported:
// - legacy: MCPGD_FOLDER_ID holds a single folder id
// - new:    MCPGD_FOLDERS holds `alias:id` pairs, MCPGD_DEFAULT_FOLDER picks one
// Whichever one is missing gets derived from the other.

use std::path::{Path, PathBuf};

use super::config_models::{Config, ConfigError, FolderAliases};

pub const CLIENT_SECRET_PATH_VAR: &str = "MCPGD_CLIENT_SECRET_PATH";
pub const TOKEN_PATH_VAR: &str = "MCPGD_TOKEN_PATH";
pub const FOLDERS_VAR: &str = "MCPGD_FOLDERS";
pub const DEFAULT_FOLDER_VAR: &str = "MCPGD_DEFAULT_FOLDER";
pub const LEGACY_FOLDER_ID_VAR: &str = "MCPGD_FOLDER_ID";

const DEFAULT_TOKEN_FILE: &str = ".mcp_google_spreadsheet.json";
const LEGACY_ALIAS: &str = "default";

impl Config {
    /// Load `.env` (if present) and resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from an arbitrary lookup function.
    ///
    /// Empty values are treated exactly like unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let client_secret_path = get(CLIENT_SECRET_PATH_VAR).ok_or(ConfigError::MissingClientSecret)?;

        let token_path = get(TOKEN_PATH_VAR).unwrap_or_else(|| {
            let home = get("HOME")
                .or_else(|| get("USERPROFILE"))
                .unwrap_or_else(|| ".".to_string());
            PathBuf::from(home)
                .join(DEFAULT_TOKEN_FILE)
                .to_string_lossy()
                .into_owned()
        });

        let mut folders = get(FOLDERS_VAR)
            .map(|raw| parse_folders(&raw))
            .unwrap_or_default();
        let mut default_folder = get(DEFAULT_FOLDER_VAR).unwrap_or_default();
        let mut folder_id = get(LEGACY_FOLDER_ID_VAR).unwrap_or_default();

        if folders.is_empty() && !folder_id.is_empty() {
            // Legacy scheme only: expose the single folder under a fixed alias.
            folders.insert(LEGACY_ALIAS, folder_id.clone());
            default_folder = LEGACY_ALIAS.to_string();
        } else if !folders.is_empty() && folder_id.is_empty() {
            // New scheme only: backfill the default folder id.
            let chosen = match default_folder.as_str() {
                "" => None,
                alias => folders.get(alias),
            };
            if let Some(id) = chosen {
                folder_id = id.to_string();
            } else if let Some((first_alias, first_id)) = folders.first() {
                folder_id = first_id.to_string();
                if default_folder.is_empty() {
                    default_folder = first_alias.to_string();
                }
            }
        }

        if folder_id.is_empty() && folders.is_empty() {
            return Err(ConfigError::NoFolders);
        }

        let folder_summary: Vec<String> = folders
            .iter()
            .map(|(alias, id)| format!("{alias}={id}"))
            .collect();
        tracing::info!(
            event = "config_loaded",
            client_secret_path = %client_secret_path,
            token_path = %token_path,
            folder_id = %folder_id,
            folders = ?folder_summary,
            default_folder = %default_folder,
            client_secret_exists = Path::new(&client_secret_path).exists(),
            "Configuration loaded"
        );

        Ok(Config {
            client_secret_path,
            token_path,
            folder_id,
            folders,
            default_folder,
        })
    }
}

/// Parse `alias:id,alias:id` into an ordered mapping.
///
/// Entries without a `:` are dropped silently.
pub fn parse_folders(raw: &str) -> FolderAliases {
    let mut folders = FolderAliases::new();
    for item in raw.split(',') {
        let item = item.trim();
        if let Some((alias, id)) = item.split_once(':') {
            folders.insert(alias.trim(), id.trim());
        }
    }
    folders
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_legacy_only_is_normalized() {
        let config = resolve(&[
            (CLIENT_SECRET_PATH_VAR, "secret.json"),
            (LEGACY_FOLDER_ID_VAR, "F1"),
        ])
        .unwrap();

        let folders: Vec<_> = config.folders.iter().collect();
        assert_eq!(folders, vec![("default", "F1")]);
        assert_eq!(config.default_folder, "default");
        assert_eq!(config.folder_id, "F1");
    }

    #[test]
    fn test_new_scheme_first_entry_wins_without_default() {
        let config = resolve(&[
            (CLIENT_SECRET_PATH_VAR, "secret.json"),
            (FOLDERS_VAR, "a:1,b:2"),
        ])
        .unwrap();

        assert_eq!(config.folder_id, "1");
        assert_eq!(config.default_folder, "a");
    }

    #[test]
    fn test_new_scheme_with_default_alias() {
        let config = resolve(&[
            (CLIENT_SECRET_PATH_VAR, "secret.json"),
            (FOLDERS_VAR, "work:W1,home:H1"),
            (DEFAULT_FOLDER_VAR, "home"),
        ])
        .unwrap();

        assert_eq!(config.folder_id, "H1");
        assert_eq!(config.default_folder, "home");
        assert_eq!(config.resolve_folder_id(Some("work")), "W1");
    }

    #[test]
    fn test_unknown_default_alias_falls_back_to_first_entry() {
        let config = resolve(&[
            (CLIENT_SECRET_PATH_VAR, "secret.json"),
            (FOLDERS_VAR, "work:W1,home:H1"),
            (DEFAULT_FOLDER_VAR, "missing"),
        ])
        .unwrap();

        // The id comes from the first entry but the configured alias is kept as given.
        assert_eq!(config.folder_id, "W1");
        assert_eq!(config.default_folder, "missing");
    }

    #[test]
    fn test_both_schemes_are_taken_as_given() {
        let config = resolve(&[
            (CLIENT_SECRET_PATH_VAR, "secret.json"),
            (FOLDERS_VAR, "work:W1"),
            (LEGACY_FOLDER_ID_VAR, "ELSEWHERE"),
        ])
        .unwrap();

        assert_eq!(config.folder_id, "ELSEWHERE");
        assert_eq!(config.default_folder, "");
        assert_eq!(config.folders.len(), 1);
        assert_eq!(config.resolve_folder_id(None), "ELSEWHERE");
    }

    #[test]
    fn test_no_folders_is_an_error() {
        let err = resolve(&[(CLIENT_SECRET_PATH_VAR, "secret.json")]).unwrap_err();
        assert_eq!(err, ConfigError::NoFolders);

        // Only malformed entries leave nothing to work with either.
        let err = resolve(&[
            (CLIENT_SECRET_PATH_VAR, "secret.json"),
            (FOLDERS_VAR, "bad,worse"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::NoFolders);
    }

    #[test]
    fn test_missing_or_empty_client_secret_is_an_error() {
        let err = resolve(&[(LEGACY_FOLDER_ID_VAR, "F1")]).unwrap_err();
        assert_eq!(err, ConfigError::MissingClientSecret);

        let err = resolve(&[(CLIENT_SECRET_PATH_VAR, ""), (LEGACY_FOLDER_ID_VAR, "F1")])
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingClientSecret);
    }

    #[test]
    fn test_token_path_defaults_under_home() {
        let config = resolve(&[
            (CLIENT_SECRET_PATH_VAR, "secret.json"),
            (LEGACY_FOLDER_ID_VAR, "F1"),
            ("HOME", "/home/tester"),
        ])
        .unwrap();

        let expected = PathBuf::from("/home/tester").join(".mcp_google_spreadsheet.json");
        assert_eq!(config.token_path, expected.to_string_lossy());

        let config = resolve(&[
            (CLIENT_SECRET_PATH_VAR, "secret.json"),
            (LEGACY_FOLDER_ID_VAR, "F1"),
            (TOKEN_PATH_VAR, "/tmp/token.json"),
        ])
        .unwrap();
        assert_eq!(config.token_path, "/tmp/token.json");
    }

    #[test]
    fn test_malformed_entries_are_dropped() {
        let folders = parse_folders("a:1,bad,c:3");
        let collected: Vec<_> = folders.iter().collect();
        assert_eq!(collected, vec![("a", "1"), ("c", "3")]);
    }

    #[test]
    fn test_parse_trims_and_splits_on_first_colon() {
        let folders = parse_folders(" work : W1 , url:https://x ,, ");
        let collected: Vec<_> = folders.iter().collect();
        assert_eq!(collected, vec![("work", "W1"), ("url", "https://x")]);
    }

    #[test]
    fn test_parse_duplicate_alias_keeps_last_value() {
        let folders = parse_folders("a:1,b:2,a:9");
        assert_eq!(folders.get("a"), Some("9"));
        assert_eq!(folders.first(), Some(("a", "9")));
    }

    #[test]
    fn test_client_secret_existence_is_not_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist.json");

        let config = resolve(&[
            (CLIENT_SECRET_PATH_VAR, missing.to_str().unwrap()),
            (LEGACY_FOLDER_ID_VAR, "F1"),
        ])
        .unwrap();
        assert_eq!(config.client_secret_path, missing.to_str().unwrap());
    }
}
