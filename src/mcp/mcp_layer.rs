// MCP layer - the tool surface agents talk to over stdio.
// Tools only translate arguments into workspace operations; all behavior lives in core.

#[path = "server.rs"]
mod server;
#[path = "tool_params.rs"]
mod tool_params;

pub use server::WorkspaceMcp;
