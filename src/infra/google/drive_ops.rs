// Drive v3: listing, copying, renaming, moving and deleting files.

use serde_json::{json, Value};

use super::google_workspace_client::{GoogleWorkspaceClient, DRIVE_API};
use crate::core::workspace::WorkspaceError;

const FILE_FIELDS: &str = "id, name, mimeType, parents, createdTime, modifiedTime";

/// `('a' in parents or 'b' in parents) and trashed=false`
pub fn parents_query(folder_ids: &[String]) -> String {
    let parents = folder_ids
        .iter()
        .map(|id| format!("'{}' in parents", id.replace('\'', "\\'")))
        .collect::<Vec<_>>()
        .join(" or ");
    format!("({parents}) and trashed=false")
}

impl GoogleWorkspaceClient {
    /// Files directly inside any of the folders, newest first.
    pub(super) async fn list_files(&self, folder_ids: &[String]) -> Result<Value, WorkspaceError> {
        if folder_ids.is_empty() {
            return Err(WorkspaceError::InvalidArgument(
                "no folders configured".to_string(),
            ));
        }

        let query = parents_query(folder_ids);
        let fields = format!("files({FILE_FIELDS})");
        let response = self
            .get(
                &format!("{DRIVE_API}/files"),
                &[
                    ("q", query.as_str()),
                    ("fields", fields.as_str()),
                    ("orderBy", "modifiedTime desc"),
                    ("supportsAllDrives", "true"),
                    ("includeItemsFromAllDrives", "true"),
                ],
            )
            .await?;

        Ok(response
            .get("files")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }

    /// Copy a file, optionally into a different folder.
    pub(super) async fn copy_file(
        &self,
        file_id: &str,
        new_name: &str,
        parent: Option<&str>,
    ) -> Result<Value, WorkspaceError> {
        let mut body = json!({ "name": new_name });
        if let Some(parent) = parent.filter(|p| !p.is_empty()) {
            body["parents"] = json!([parent]);
        }

        let copied = self
            .post(
                &format!("{DRIVE_API}/files/{file_id}/copy"),
                &[("fields", FILE_FIELDS), ("supportsAllDrives", "true")],
                &body,
            )
            .await?;
        tracing::info!(file_id, new_name, "Copied file");
        Ok(copied)
    }

    pub(super) async fn rename_file(&self, file_id: &str, new_name: &str) -> Result<Value, WorkspaceError> {
        let renamed = self
            .patch(
                &format!("{DRIVE_API}/files/{file_id}"),
                &[("fields", FILE_FIELDS), ("supportsAllDrives", "true")],
                &json!({ "name": new_name }),
            )
            .await?;
        tracing::info!(file_id, new_name, "Renamed file");
        Ok(renamed)
    }

    /// Move a file so that `folder_id` becomes its only parent.
    pub(super) async fn move_file(&self, file_id: &str, folder_id: &str) -> Result<Value, WorkspaceError> {
        let current = self
            .get(
                &format!("{DRIVE_API}/files/{file_id}"),
                &[("fields", "parents"), ("supportsAllDrives", "true")],
            )
            .await?;
        let previous_parents = current
            .get("parents")
            .and_then(Value::as_array)
            .map(|parents| {
                parents
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default();

        self.patch(
            &format!("{DRIVE_API}/files/{file_id}"),
            &[
                ("addParents", folder_id),
                ("removeParents", previous_parents.as_str()),
                ("fields", "id, parents"),
                ("supportsAllDrives", "true"),
            ],
            &json!({}),
        )
        .await
    }

    pub(super) async fn delete_file(&self, file_id: &str) -> Result<Value, WorkspaceError> {
        self.delete(&format!("{DRIVE_API}/files/{file_id}?supportsAllDrives=true"))
            .await?;
        tracing::info!(file_id, "Deleted file");
        Ok(json!(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parents_query_single_folder() {
        assert_eq!(
            parents_query(&["F1".to_string()]),
            "('F1' in parents) and trashed=false"
        );
    }

    #[test]
    fn test_parents_query_joins_folders_with_or() {
        let query = parents_query(&["W1".to_string(), "H1".to_string()]);
        assert_eq!(query, "('W1' in parents or 'H1' in parents) and trashed=false");
    }

    #[test]
    fn test_parents_query_escapes_quotes() {
        let query = parents_query(&["it's".to_string()]);
        assert_eq!(query, "('it\\'s' in parents) and trashed=false");
    }
}
