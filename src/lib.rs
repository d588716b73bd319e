pub mod app;
pub mod config;
pub mod errors;
pub mod habits;
pub mod handlers;
pub mod journal;
pub mod models;
pub mod mood;
pub mod state;
pub mod stats;
pub mod storage;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
