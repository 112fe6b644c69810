pub mod config_loader;
pub mod status_service;

pub use config_loader::{load_config, ConfigLoadError};
pub use status_service::StatusService;
