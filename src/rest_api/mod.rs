//! # REST API Module
//!
//! HTTP surface of the backend: restaurant discovery, menus, and the
//! order lifecycle, one handler per endpoint.

pub mod errors;
pub mod response;
pub mod routes;
pub mod server;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use response::{DeleteOrderResponse, UpdateOrderResponse};
pub use routes::AppState;
pub use server::ApiServer;
