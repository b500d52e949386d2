//! Web layer for the rail router.
//!
//! JSON endpoints for the map and trip search, with HTML fragments for
//! clients that ask for them.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Assembler, Directory};
