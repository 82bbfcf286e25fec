//! Web layer for the reachability server.
//!
//! Provides JSON endpoints for reachability maps and destination details.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
