pub mod config_loader;
pub mod config_models;

pub use config_models::{Config, FolderAliases};
