use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::envelope::{is_truthy, Envelope};
use super::slide_content::normalize_slide_content;
use super::workspace_models::{SheetOp, SlideOp, SpreadsheetSource, WorkspaceOp};
use crate::core::config::Config;
use crate::core::session::SessionState;

/// Errors surfaced by a Workspace API client.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Google API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Not supported: {0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for WorkspaceError {
    fn from(err: reqwest::Error) -> Self {
        WorkspaceError::Http(err.to_string())
    }
}

/// The external collaborator that actually talks to Drive, Sheets, Slides and Docs.
///
/// Implementations return the raw result payload. Deciding what counts as success is
/// left to `WorkspaceService`.
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    async fn execute(&self, op: &WorkspaceOp) -> Result<Value, WorkspaceError>;
}

// Lets the service hold whichever client was picked at startup.
#[async_trait]
impl WorkspaceApi for Box<dyn WorkspaceApi> {
    async fn execute(&self, op: &WorkspaceOp) -> Result<Value, WorkspaceError> {
        (**self).execute(op).await
    }
}

/// Wraps every delegated operation in the same resolve, invoke, shape cycle.
///
/// Delegate failures never escape: they come back as `{success: false, message}`.
pub struct WorkspaceService<C: WorkspaceApi> {
    client: C,
    config: Arc<Config>,
    session: SessionState,
}

impl<C: WorkspaceApi> WorkspaceService<C> {
    pub fn new(client: C, config: Arc<Config>) -> Self {
        Self {
            client,
            config,
            session: SessionState::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Run one operation and shape its outcome into an envelope.
    pub async fn dispatch(&self, op: WorkspaceOp) -> Envelope {
        match self.invoke(&op).await {
            Ok(payload) => Envelope::success(op.success_message()).absorb(payload, op.payload_shape()),
            Err(message) => Envelope::failure(message),
        }
    }

    /// Exactly one delegate call. Errors and falsy payloads become the failure message.
    async fn invoke(&self, op: &WorkspaceOp) -> Result<Value, String> {
        tracing::debug!(operation = op.name(), "Dispatching workspace operation");

        match self.client.execute(op).await {
            Ok(payload) if is_truthy(&payload) => Ok(payload),
            Ok(_) => {
                tracing::error!(operation = op.name(), "Workspace operation returned no result");
                Err(op.failure_message())
            }
            Err(err) => {
                tracing::error!(operation = op.name(), error = %err, "Workspace operation failed");
                Err(format!("{}: {}", op.failure_message(), err))
            }
        }
    }

    /// List files across every configured folder, tagging each with its folder alias.
    pub async fn list_files(&self) -> Envelope {
        let op = WorkspaceOp::ListFiles {
            folder_ids: self.config.folder_ids(),
        };
        let payload = match self.invoke(&op).await {
            Ok(payload) => payload,
            Err(message) => return Envelope::failure(message),
        };

        let mut files = match payload {
            Value::Array(files) => files,
            other => vec![other],
        };

        if files.is_empty() {
            tracing::info!("Folders are empty");
            return Envelope::success("Folders are empty").with("files", Vec::<Value>::new());
        }

        for file in files.iter_mut() {
            let Some(fields) = file.as_object_mut() else {
                continue;
            };
            let parent = fields
                .get("parents")
                .and_then(|parents| parents.get(0))
                .and_then(Value::as_str)
                .map(str::to_string);
            if let Some(parent) = parent {
                let folder_name = self.config.resolve_alias(&parent);
                fields.insert("folder_id".to_string(), Value::String(parent));
                fields.insert("folder_name".to_string(), Value::String(folder_name));
            }
        }

        tracing::info!(count = files.len(), "Found files in folders");
        Envelope::success(format!("Found {} files", files.len())).with("files", files)
    }

    /// Create a spreadsheet in the resolved folder and make it the current one.
    pub async fn create_spreadsheet(
        &self,
        title: String,
        folder: Option<String>,
        source: SpreadsheetSource,
    ) -> Envelope {
        let folder_id = self.config.resolve_folder_id(folder.as_deref());
        let folder_label = self.config.folder_label(folder.as_deref());
        tracing::info!(title = %title, folder = %folder_label, "Creating spreadsheet");

        let op = WorkspaceOp::CreateSpreadsheet {
            title: title.clone(),
            folder_id,
            source,
        };
        let payload = match self.invoke(&op).await {
            Ok(payload) => payload,
            Err(message) => return Envelope::failure(message),
        };

        let spreadsheet_id = payload
            .get("spreadsheet_id")
            .or_else(|| payload.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let mut envelope = Envelope::success(op.success_message())
            .absorb(payload, op.payload_shape())
            .with("title", title)
            .with("folder", folder_label);

        match spreadsheet_id {
            Some(id) => {
                self.session.set_current(id.clone()).await;
                tracing::info!(spreadsheet_id = %id, "Current spreadsheet updated");
                envelope = envelope.with("spreadsheet_id", id);
            }
            None => tracing::error!("Spreadsheet was created but no id came back"),
        }
        envelope
    }

    /// Run a sheet operation against the given spreadsheet, or the current one.
    ///
    /// An id that cannot be resolved is forwarded empty and left to the client to reject.
    pub async fn spreadsheet(&self, spreadsheet_id: Option<String>, op: SheetOp) -> Envelope {
        let spreadsheet_id = self
            .session
            .resolve_or_current(spreadsheet_id)
            .await
            .unwrap_or_default();
        self.dispatch(WorkspaceOp::Spreadsheet { spreadsheet_id, op })
            .await
    }

    /// Add a slide after normalizing the raw content text.
    pub async fn add_slide(&self, presentation_id: String, title: String, content: &str) -> Envelope {
        let content = normalize_slide_content(content);
        self.dispatch(WorkspaceOp::Presentation {
            presentation_id,
            op: SlideOp::AddSlide { title, content },
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FolderAliases;
    use crate::core::workspace::workspace_models::DocOp;
    use serde_json::json;
    use std::sync::Mutex;

    type Responder = Box<dyn Fn(&WorkspaceOp) -> Result<Value, WorkspaceError> + Send + Sync>;

    /// Records every op it receives and answers with a scripted response.
    struct MockWorkspace {
        calls: Mutex<Vec<WorkspaceOp>>,
        respond: Responder,
    }

    impl MockWorkspace {
        fn new<F>(respond: F) -> Self
        where
            F: Fn(&WorkspaceOp) -> Result<Value, WorkspaceError> + Send + Sync + 'static,
        {
            Self {
                calls: Mutex::new(Vec::new()),
                respond: Box::new(respond),
            }
        }

        fn calls(&self) -> Vec<WorkspaceOp> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WorkspaceApi for MockWorkspace {
        async fn execute(&self, op: &WorkspaceOp) -> Result<Value, WorkspaceError> {
            self.calls.lock().unwrap().push(op.clone());
            (self.respond)(op)
        }
    }

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            client_secret_path: "secret.json".to_string(),
            token_path: "token.json".to_string(),
            folder_id: "H1".to_string(),
            folders: FolderAliases::from_iter([("work", "W1"), ("home", "H1")]),
            default_folder: "home".to_string(),
        })
    }

    fn service<F>(respond: F) -> WorkspaceService<MockWorkspace>
    where
        F: Fn(&WorkspaceOp) -> Result<Value, WorkspaceError> + Send + Sync + 'static,
    {
        WorkspaceService::new(MockWorkspace::new(respond), test_config())
    }

    #[tokio::test]
    async fn test_create_then_list_sheets_uses_current_spreadsheet() {
        let service = service(|op| match op {
            WorkspaceOp::CreateSpreadsheet { .. } => Ok(json!({"spreadsheet_id": "S1"})),
            WorkspaceOp::Spreadsheet { .. } => Ok(json!([{"title": "Sheet1", "sheet_id": 0}])),
            _ => Ok(Value::Null),
        });

        let created = service
            .create_spreadsheet("Q1 Report".to_string(), None, SpreadsheetSource::Blank)
            .await;
        assert!(created.success);
        assert_eq!(created.get("spreadsheet_id"), Some(&json!("S1")));
        assert_eq!(created.get("folder"), Some(&json!("home")));
        assert_eq!(service.session().current().await.as_deref(), Some("S1"));

        let listed = service.spreadsheet(None, SheetOp::ListSheets).await;
        assert!(listed.success);
        assert_eq!(listed.get("sheets"), Some(&json!([{"title": "Sheet1", "sheet_id": 0}])));

        let calls = service.client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            WorkspaceOp::CreateSpreadsheet {
                title: "Q1 Report".to_string(),
                folder_id: "H1".to_string(),
                source: SpreadsheetSource::Blank,
            }
        );
        assert_eq!(
            calls[1],
            WorkspaceOp::Spreadsheet {
                spreadsheet_id: "S1".to_string(),
                op: SheetOp::ListSheets,
            }
        );
    }

    #[tokio::test]
    async fn test_copy_sources_set_current_from_id_field() {
        let service = service(|_| Ok(json!({"id": "COPY1", "name": "Budget"})));

        let created = service
            .create_spreadsheet(
                "Budget".to_string(),
                Some("work".to_string()),
                SpreadsheetSource::Template("T1".to_string()),
            )
            .await;

        assert!(created.success);
        assert_eq!(created.message, "Created spreadsheet Budget from template T1");
        assert_eq!(created.get("folder"), Some(&json!("work")));
        assert_eq!(service.session().current().await.as_deref(), Some("COPY1"));
        assert!(matches!(
            &service.client.calls()[0],
            WorkspaceOp::CreateSpreadsheet { folder_id, .. } if folder_id == "W1"
        ));
    }

    #[tokio::test]
    async fn test_failed_creation_keeps_previous_spreadsheet() {
        let service = service(|op| match op {
            WorkspaceOp::CreateSpreadsheet { title, .. } if title == "first" => {
                Ok(json!({"spreadsheet_id": "S1"}))
            }
            _ => Err(WorkspaceError::Api {
                status: 403,
                body: "forbidden".to_string(),
            }),
        });

        service
            .create_spreadsheet("first".to_string(), None, SpreadsheetSource::Blank)
            .await;
        let failed = service
            .create_spreadsheet("second".to_string(), None, SpreadsheetSource::Blank)
            .await;

        assert!(!failed.success);
        assert!(failed.message.starts_with("Failed to create spreadsheet 'second'"));
        assert_eq!(service.session().current().await.as_deref(), Some("S1"));
    }

    #[tokio::test]
    async fn test_explicit_spreadsheet_id_overrides_current() {
        let service = service(|_| Ok(json!({"sheet_id": 7, "title": "Extra"})));
        service.session().set_current("S1").await;

        let added = service
            .spreadsheet(
                Some("OTHER".to_string()),
                SheetOp::AddSheet {
                    sheet_name: "Extra".to_string(),
                },
            )
            .await;

        assert!(added.success);
        assert_eq!(added.get("sheet_id"), Some(&json!(7)));
        assert!(matches!(
            &service.client.calls()[0],
            WorkspaceOp::Spreadsheet { spreadsheet_id, .. } if spreadsheet_id == "OTHER"
        ));
    }

    #[tokio::test]
    async fn test_missing_spreadsheet_is_forwarded_empty() {
        let service = service(|op| match op {
            WorkspaceOp::Spreadsheet { spreadsheet_id, .. } if spreadsheet_id.is_empty() => Err(
                WorkspaceError::InvalidArgument("spreadsheet id is required".to_string()),
            ),
            _ => Ok(json!(true)),
        });

        let result = service.spreadsheet(None, SheetOp::ListSheets).await;

        assert!(!result.success);
        assert!(result.message.contains("spreadsheet id is required"));
        assert_eq!(service.client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_errors_and_falsy_results_become_failures() {
        let service = service(|op| match op {
            WorkspaceOp::CopyFile { file_id, .. } if file_id == "err" => {
                Err(WorkspaceError::Http("connection reset".to_string()))
            }
            WorkspaceOp::CopyFile { file_id, .. } if file_id == "null" => Ok(Value::Null),
            WorkspaceOp::CopyFile { file_id, .. } if file_id == "false" => Ok(json!(false)),
            WorkspaceOp::CopyFile { file_id, .. } if file_id == "empty" => Ok(json!({})),
            _ => Ok(json!({"id": "NEW"})),
        });

        for file_id in ["err", "null", "false", "empty"] {
            let result = service
                .dispatch(WorkspaceOp::CopyFile {
                    file_id: file_id.to_string(),
                    new_name: "copy".to_string(),
                })
                .await;
            assert!(!result.success, "{file_id} should fail");
            assert!(!result.message.is_empty());
            assert!(result.data.is_empty());
        }

        // The service keeps serving after failures.
        let result = service
            .dispatch(WorkspaceOp::CopyFile {
                file_id: "ok".to_string(),
                new_name: "copy".to_string(),
            })
            .await;
        assert!(result.success);
        assert_eq!(result.message, "Copied file ok to copy");
        assert_eq!(result.get("id"), Some(&json!("NEW")));
    }

    #[tokio::test]
    async fn test_error_text_is_part_of_failure_message() {
        let service = service(|_| {
            Err(WorkspaceError::Unsupported(
                "slide transitions cannot be changed through the Slides API".to_string(),
            ))
        });

        let result = service
            .dispatch(WorkspaceOp::Presentation {
                presentation_id: "P1".to_string(),
                op: SlideOp::UpdateTransition {
                    slide_id: "s1".to_string(),
                    transition_type: "FADE".to_string(),
                    duration: "SLOW".to_string(),
                },
            })
            .await;

        assert_eq!(
            result.message,
            "Failed to update slide transition: Not supported: slide transitions cannot be changed through the Slides API"
        );
    }

    #[tokio::test]
    async fn test_list_files_annotates_folder_aliases() {
        let service = service(|_| {
            Ok(json!([
                {"id": "a", "name": "A", "parents": ["W1"]},
                {"id": "b", "name": "B", "parents": ["UNKNOWN"]},
                {"id": "c", "name": "C"}
            ]))
        });

        let result = service.list_files().await;
        assert!(result.success);
        assert_eq!(result.message, "Found 3 files");

        let files = result.get("files").and_then(Value::as_array).unwrap();
        assert_eq!(files[0]["folder_id"], json!("W1"));
        assert_eq!(files[0]["folder_name"], json!("work"));
        assert_eq!(files[1]["folder_name"], json!(""));
        assert!(files[2].get("folder_name").is_none());

        assert_eq!(
            service.client.calls()[0],
            WorkspaceOp::ListFiles {
                folder_ids: vec!["W1".to_string(), "H1".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn test_list_files_empty_folders_still_succeeds() {
        let service = service(|_| Ok(json!([])));

        let result = service.list_files().await;
        assert!(result.success);
        assert_eq!(result.message, "Folders are empty");
        assert_eq!(result.get("files"), Some(&json!([])));
    }

    #[tokio::test]
    async fn test_add_slide_normalizes_content() {
        let service = service(|_| Ok(json!({"slide_id": "slide_1"})));

        let result = service
            .add_slide("P1".to_string(), "Agenda".to_string(), "Intro\\nWrap-up")
            .await;

        assert!(result.success);
        assert_eq!(result.message, "Added slide: Agenda");
        assert_eq!(
            service.client.calls()[0],
            WorkspaceOp::Presentation {
                presentation_id: "P1".to_string(),
                op: SlideOp::AddSlide {
                    title: "Agenda".to_string(),
                    content: json!("Intro\nWrap-up"),
                },
            }
        );
    }

    #[tokio::test]
    async fn test_documents_do_not_touch_session() {
        let service = service(|_| Ok(json!(true)));

        let result = service
            .dispatch(WorkspaceOp::Document {
                document_id: "D1".to_string(),
                op: DocOp::InsertPageBreak { index: 1 },
            })
            .await;

        assert!(result.success);
        assert_eq!(result.message, "Page break inserted successfully");
        assert!(result.data.is_empty());
        assert_eq!(service.session().current().await, None);
    }

    #[tokio::test]
    async fn test_boxed_client_delegates() {
        let boxed: Box<dyn WorkspaceApi> = Box::new(MockWorkspace::new(|_| Ok(json!({"document_id": "D9"}))));
        let service = WorkspaceService::new(boxed, test_config());

        let result = service
            .dispatch(WorkspaceOp::CreateDocument {
                title: "Notes".to_string(),
            })
            .await;
        assert!(result.success);
        assert_eq!(result.message, "Created document: Notes");
        assert_eq!(result.get("document_id"), Some(&json!("D9")));
    }
}
