pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

pub use adapters::soap::PowerOnSoapClient;
pub use app::{build_router, AppState};
pub use config::{CliArgs, GatewayConfig};
pub use domain::ports::PowerOnBackend;
pub use utils::error::{GatewayError, Result};
