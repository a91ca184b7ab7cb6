pub mod error;
pub mod handlers;
pub mod ui;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use log::info;
use tokio::net::TcpListener;

use apidocs_core::DocumentStore;

pub use error::ServerError;

/// Route serving each version's document.
pub const DOCUMENT_ROUTE: &str = "/spec/{group}/document.json";

/// Shared state of the document routes.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    /// Page title of the browsing UI.
    pub title: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<DocumentStore>, title: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            title: title.into(),
        }
    }
}

/// Router for the document endpoints and the browsing UI.
///
/// The UI root is read from the published endpoint table when the router is
/// built.
pub fn router(state: AppState) -> Router {
    let root = state.store.load().endpoints().root.clone();
    Router::new()
        .route(&root, get(handlers::index))
        .route(DOCUMENT_ROUTE, get(handlers::document))
        .with_state(state)
}

/// Serve the router until the listener fails.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!("serving API documents on http://{addr}");
    }
    axum::serve(listener, app).await?;
    Ok(())
}
