//! Web server module
//!
//! Serves the Subsonic-compatible search endpoints.

mod error;
mod handlers;
mod params;
mod responses;
mod routes;
mod state;

pub use error::ApiError;
pub use params::SearchParams;
pub use responses::{search_result2, search_result3, Envelope, Subsonic, API_VERSION};
pub use routes::create_router;
pub use state::AppState;
