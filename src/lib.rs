pub mod errors;
pub mod insights;
pub mod models;
pub mod progress;
pub mod risk;
pub mod sanitize;
pub mod search;
pub mod store;

pub use errors::{AppError, AppResult};
pub use store::seed::{DEMO_ADMIN_EMAIL, DEMO_DEV_EMAIL, DEMO_WORKSPACE_ID};
pub use store::Store;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
