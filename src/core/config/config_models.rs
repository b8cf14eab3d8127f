// Configuration domain: the resolved startup configuration and the folder alias
// registry built on top of it. Nothing in here touches the environment; see
// `config_loader.rs` for how a `Config` is produced.

use thiserror::Error;

/// Errors raised while resolving the startup configuration. Both are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MCPGD_CLIENT_SECRET_PATH environment variable is required")]
    MissingClientSecret,
    #[error("MCPGD_FOLDERS or MCPGD_FOLDER_ID environment variable is required")]
    NoFolders,
}

/// Ordered alias -> folder id mapping.
///
/// Insertion order is preserved. Inserting an alias that already exists replaces its
/// folder id but keeps the alias at its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderAliases {
    entries: Vec<(String, String)>,
}

impl FolderAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, folder_id: impl Into<String>) {
        let alias = alias.into();
        let folder_id = folder_id.into();
        match self.entries.iter_mut().find(|(a, _)| *a == alias) {
            Some(entry) => entry.1 = folder_id,
            None => self.entries.push((alias, folder_id)),
        }
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, id)| id.as_str())
    }

    pub fn first(&self) -> Option<(&str, &str)> {
        self.entries
            .first()
            .map(|(alias, id)| (alias.as_str(), id.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, id)| (alias.as_str(), id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A: Into<String>, I: Into<String>> FromIterator<(A, I)> for FolderAliases {
    fn from_iter<T: IntoIterator<Item = (A, I)>>(iter: T) -> Self {
        let mut aliases = FolderAliases::new();
        for (alias, id) in iter {
            aliases.insert(alias, id);
        }
        aliases
    }
}

/// Process-wide configuration. Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the OAuth client secret (or service-account key) JSON.
    pub client_secret_path: String,
    /// Where the installed-app flow caches its tokens.
    pub token_path: String,
    /// Default folder id. Kept for the legacy single-folder scheme and backfilled
    /// from `folders` when only the new scheme is configured.
    pub folder_id: String,
    pub folders: FolderAliases,
    /// Alias into `folders` naming the default target. May be empty.
    pub default_folder: String,
}

// ============================================================================
// FOLDER ALIAS REGISTRY
// ============================================================================

impl Config {
    /// Resolve a folder alias or raw folder id to a folder id.
    ///
    /// Empty or missing input yields the default folder. Unknown input is assumed to
    /// be a raw folder id and is returned unchanged; whether it actually exists only
    /// shows up later as an API failure.
    pub fn resolve_folder_id(&self, folder: Option<&str>) -> String {
        let folder = match folder {
            Some(f) if !f.is_empty() => f,
            _ => return self.folder_id.clone(),
        };

        if let Some(id) = self.folders.get(folder) {
            return id.to_string();
        }

        tracing::debug!(folder, "Folder argument is not a known alias, using it as a raw id");
        folder.to_string()
    }

    /// Reverse lookup: first alias whose folder id matches, or an empty string.
    pub fn resolve_alias(&self, folder_id: &str) -> String {
        self.folders
            .iter()
            .find(|(_, id)| *id == folder_id)
            .map(|(alias, _)| alias.to_string())
            .unwrap_or_default()
    }

    /// Every configured folder id in mapping order, used to scope file listings.
    pub fn folder_ids(&self) -> Vec<String> {
        if self.folders.is_empty() {
            if self.folder_id.is_empty() {
                return Vec::new();
            }
            return vec![self.folder_id.clone()];
        }
        self.folders.iter().map(|(_, id)| id.to_string()).collect()
    }

    /// Label reported back to callers for the folder a resource was created in.
    pub fn folder_label(&self, folder: Option<&str>) -> String {
        match folder {
            Some(f) if !f.is_empty() => f.to_string(),
            _ => self.default_folder.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work_home_config() -> Config {
        Config {
            client_secret_path: "secret.json".to_string(),
            token_path: "token.json".to_string(),
            folder_id: "H1".to_string(),
            folders: [("work", "W1"), ("home", "H1")].into_iter().collect(),
            default_folder: "home".to_string(),
        }
    }

    #[test]
    fn test_duplicate_alias_overwrites_in_place() {
        let mut aliases = FolderAliases::new();
        aliases.insert("a", "1");
        aliases.insert("b", "2");
        aliases.insert("a", "3");

        let collected: Vec<_> = aliases.iter().collect();
        assert_eq!(collected, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_resolve_folder_id_alias_and_raw() {
        let config = work_home_config();

        assert_eq!(config.resolve_folder_id(Some("work")), "W1");
        assert_eq!(config.resolve_folder_id(Some("unknown-raw-id")), "unknown-raw-id");
    }

    #[test]
    fn test_resolve_folder_id_defaults_when_missing() {
        let config = work_home_config();

        assert_eq!(config.resolve_folder_id(None), config.folder_id);
        assert_eq!(config.resolve_folder_id(Some("")), config.folder_id);
    }

    #[test]
    fn test_resolve_folder_id_is_identity_on_raw_ids() {
        let config = work_home_config();

        for raw in ["1AbCdEf", "W2", "work ", "HOME"] {
            assert_eq!(config.resolve_folder_id(Some(raw)), raw);
        }
    }

    #[test]
    fn test_alias_round_trip() {
        let config = work_home_config();

        for alias in ["work", "home"] {
            let id = config.resolve_folder_id(Some(alias));
            assert_eq!(config.resolve_alias(&id), alias);
        }
    }

    #[test]
    fn test_resolve_alias_first_match_wins() {
        let config = Config {
            folders: [("first", "SAME"), ("second", "SAME")].into_iter().collect(),
            ..work_home_config()
        };

        assert_eq!(config.resolve_alias("SAME"), "first");
        assert_eq!(config.resolve_alias("nope"), "");
    }

    #[test]
    fn test_folder_ids_fall_back_to_legacy() {
        let config = Config {
            folders: FolderAliases::new(),
            folder_id: "F1".to_string(),
            ..work_home_config()
        };
        assert_eq!(config.folder_ids(), vec!["F1".to_string()]);

        assert_eq!(
            work_home_config().folder_ids(),
            vec!["W1".to_string(), "H1".to_string()]
        );
    }

    #[test]
    fn test_folder_label() {
        let config = work_home_config();
        assert_eq!(config.folder_label(Some("work")), "work");
        assert_eq!(config.folder_label(None), "home");
    }
}
