use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Html;
use log::{debug, warn};

use apidocs_core::SpecDocument;

use crate::AppState;
use crate::error::ServerError;
use crate::ui::render_index;

/// `GET /spec/{group}/document.json`
pub async fn document(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> Result<Json<Arc<SpecDocument>>, ServerError> {
    let set = state.store.load();
    match set.get(&group) {
        Some(doc) => {
            debug!("serving document {group}");
            Ok(Json(Arc::clone(doc)))
        }
        None => {
            warn!("requested unknown document group {group}");
            Err(ServerError::UnknownGroup(group))
        }
    }
}

/// `GET {root}`: the browsing UI.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let set = state.store.load();
    let html = render_index(set.endpoints(), &state.title)?;
    Ok(Html(html))
}
