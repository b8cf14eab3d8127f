// =============================================================================
// GOOGLE WORKSPACE MODULE
// =============================================================================
//
// REST implementation of `WorkspaceApi` over Drive, Sheets, Slides and Docs.
// The core layer only sees `WorkspaceOp` in and JSON payloads out.

pub mod a1_notation;
pub mod colors;
pub mod docs_ops;
pub mod drive_ops;
pub mod google_auth;
pub mod google_workspace_client;
pub mod sheets_ops;
pub mod slides_ops;

pub use google_auth::{token_provider_from_config, AccessTokenProvider};
pub use google_workspace_client::GoogleWorkspaceClient;
