//! TaskDesk web service
//!
//! Serves two surfaces over the same task services: HTML pages that answer
//! form posts with redirects, and a JSON API under `/api` that answers with
//! an [`response::Envelope`]. Both identify the user through the session
//! cookie managed by [`session::SessionManager`].

pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

pub use config::AppConfig;
pub use routes::create_router;
pub use state::AppState;
