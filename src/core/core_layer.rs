// The core module contains everything that does not talk to Google or MCP directly.
// Each concern gets its own submodule.

#[path = "config/mod.rs"]
pub mod config;

#[path = "session/mod.rs"]
pub mod session;

#[path = "workspace/mod.rs"]
pub mod workspace;
