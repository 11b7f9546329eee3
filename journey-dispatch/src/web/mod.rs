//! Web layer for journey dispatch.
//!
//! Provides HTTP endpoints for previewing and submitting journeys.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
