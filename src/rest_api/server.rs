//! # REST API HTTP Server
//!
//! Axum-based HTTP server wiring every endpoint to its handler, with the
//! store injected through shared state. The store connection is
//! established by the caller before this server ever binds its listener.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::store::DocumentStore;

use super::routes::{self, AppState, SharedState};

/// REST API server: configuration plus the injected store.
pub struct ApiServer {
    config: ServerConfig,
    state: SharedState,
}

impl ApiServer {
    pub fn new(config: ServerConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            state: Arc::new(AppState { store }),
        }
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        // Permissive CORS unless origins are configured.
        let cors = if self.config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = self
                .config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/", get(routes::greeting))
            .route("/locations", get(routes::locations))
            .route("/restaurants", get(routes::restaurants))
            .route("/quickSearch", get(routes::quick_search))
            .route("/filter/:mealId", get(routes::filter_restaurants))
            .route("/details/:id", get(routes::restaurant_details))
            .route("/menu/:id", get(routes::restaurant_menu))
            .route("/menuItems", post(routes::menu_items))
            .route("/placeOrder", post(routes::place_order))
            .route("/orders", get(routes::orders))
            .route("/updateOrder/:id", put(routes::update_order))
            .route("/deleteOrder/:id", delete(routes::delete_order))
            .with_state(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Bind the listener and serve until the process exits.
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid listen address: {}", e),
            )
        })?;

        let router = self.router();
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "mealcart listening");

        axum::serve(listener, router).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn create_test_server() -> ApiServer {
        ApiServer::new(ServerConfig::default(), Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_server_creation() {
        let server = create_test_server();
        assert_eq!(server.socket_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_router_builds() {
        let server = create_test_server();
        let _router = server.router();
    }
}
