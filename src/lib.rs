pub mod config;
pub mod connection;
pub mod database;
pub mod error;
pub mod handlers;
pub mod types;
pub mod use_cases;
pub mod utils;

pub use error::ApiError;
pub use handlers::{AppState, configure};
pub use utils::{Clock, FixedClock, SystemClock};
