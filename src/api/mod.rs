//! HTTP surface: dashboard report endpoints plus data administration.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::dashboard_router;
pub use server::{start_server, DashboardServer};
pub use types::ApiContext;
