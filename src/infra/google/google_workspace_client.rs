// REST client for Drive v3, Sheets v4, Slides v1 and Docs v1.
//
// Each product lives in its own `*_ops.rs` file as an extra `impl` block on
// `GoogleWorkspaceClient`. This file holds the shared HTTP plumbing and the
// routing from `WorkspaceOp` to those blocks.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};

use super::google_auth::AccessTokenProvider;
use crate::core::workspace::{SpreadsheetSource, WorkspaceApi, WorkspaceError, WorkspaceOp};

pub(super) const DRIVE_API: &str = "https://www.googleapis.com/drive/v3";
pub(super) const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub(super) const SLIDES_API: &str = "https://slides.googleapis.com/v1/presentations";
pub(super) const DOCS_API: &str = "https://docs.googleapis.com/v1/documents";

pub struct GoogleWorkspaceClient {
    http: Client,
    auth: Box<dyn AccessTokenProvider>,
}

impl GoogleWorkspaceClient {
    pub fn new(auth: Box<dyn AccessTokenProvider>) -> Self {
        Self {
            http: Client::new(),
            auth,
        }
    }

    // ==========================================================================
    // HTTP PLUMBING
    // ==========================================================================

    async fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, WorkspaceError> {
        let token = self.auth.access_token().await?;

        tracing::debug!(%method, url, "Calling Google API");
        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .query(query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(match status {
                StatusCode::NOT_FOUND => WorkspaceError::NotFound(text),
                StatusCode::UNAUTHORIZED => WorkspaceError::Auth(text),
                _ => WorkspaceError::Api {
                    status: status.as_u16(),
                    body: text,
                },
            });
        }

        // Deletes answer with an empty body.
        if text.trim().is_empty() {
            return Ok(json!({}));
        }
        serde_json::from_str(&text)
            .map_err(|e| WorkspaceError::Http(format!("invalid JSON in response: {e}")))
    }

    pub(super) async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, WorkspaceError> {
        self.send(Method::GET, url, query, None).await
    }

    pub(super) async fn post(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, WorkspaceError> {
        self.send(Method::POST, url, query, Some(body)).await
    }

    pub(super) async fn put(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, WorkspaceError> {
        self.send(Method::PUT, url, query, Some(body)).await
    }

    pub(super) async fn patch(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, WorkspaceError> {
        self.send(Method::PATCH, url, query, Some(body)).await
    }

    pub(super) async fn delete(&self, url: &str) -> Result<Value, WorkspaceError> {
        self.send(Method::DELETE, url, &[], None).await
    }
}

/// Reject empty target ids before any request is made.
pub(super) fn require_id(kind: &str, id: &str) -> Result<(), WorkspaceError> {
    if id.trim().is_empty() {
        return Err(WorkspaceError::InvalidArgument(format!(
            "{kind} id is required and no current {kind} is set"
        )));
    }
    Ok(())
}

#[async_trait]
impl WorkspaceApi for GoogleWorkspaceClient {
    async fn execute(&self, op: &WorkspaceOp) -> Result<Value, WorkspaceError> {
        match op {
            WorkspaceOp::ListFiles { folder_ids } => self.list_files(folder_ids).await,
            WorkspaceOp::CopyFile { file_id, new_name } => {
                require_id("file", file_id)?;
                self.copy_file(file_id, new_name, None).await
            }
            WorkspaceOp::RenameFile { file_id, new_name } => {
                require_id("file", file_id)?;
                self.rename_file(file_id, new_name).await
            }
            WorkspaceOp::CreateSpreadsheet {
                title,
                folder_id,
                source,
            } => match source {
                SpreadsheetSource::Blank => self.create_spreadsheet(title, folder_id).await,
                SpreadsheetSource::Template(source_id) | SpreadsheetSource::Existing(source_id) => {
                    require_id("source spreadsheet", source_id)?;
                    self.copy_spreadsheet(source_id, title, folder_id).await
                }
            },
            WorkspaceOp::Spreadsheet { spreadsheet_id, op } => {
                require_id("spreadsheet", spreadsheet_id)?;
                self.execute_sheet_op(spreadsheet_id, op).await
            }
            WorkspaceOp::CreatePresentation { title } => self.create_presentation(title).await,
            WorkspaceOp::Presentation {
                presentation_id,
                op,
            } => {
                require_id("presentation", presentation_id)?;
                self.execute_slide_op(presentation_id, op).await
            }
            WorkspaceOp::CreateDocument { title } => self.create_document(title).await,
            WorkspaceOp::Document { document_id, op } => {
                require_id("document", document_id)?;
                self.execute_doc_op(document_id, op).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workspace::SheetOp;

    struct NoToken;

    #[async_trait]
    impl AccessTokenProvider for NoToken {
        async fn access_token(&self) -> Result<String, WorkspaceError> {
            Err(WorkspaceError::Auth("no credentials in tests".to_string()))
        }
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("spreadsheet", "S1").is_ok());
        let err = require_id("spreadsheet", "  ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: spreadsheet id is required and no current spreadsheet is set"
        );
    }

    #[tokio::test]
    async fn test_empty_spreadsheet_id_is_rejected_before_auth() {
        let client = GoogleWorkspaceClient::new(Box::new(NoToken));
        let err = client
            .execute(&WorkspaceOp::Spreadsheet {
                spreadsheet_id: String::new(),
                op: SheetOp::ListSheets,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_auth_failure_surfaces_as_error() {
        let client = GoogleWorkspaceClient::new(Box::new(NoToken));
        let err = client
            .execute(&WorkspaceOp::CreateDocument {
                title: "Notes".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::Auth(_)));
    }
}
