use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;

use webstat_core::{format::SnapshotDisplay, session::ViewState};

use crate::{auth::middleware::CurrentIdentity, error::AppError, state::AppState};

/// `GET /api/w/{website}` — analytics view for one website.
///
/// Runs a full fetch cycle for the caller. A denied request becomes a
/// `303 See Other` to the auth entry or the dashboard. Otherwise the body is
/// `{"data": {"website", "state": "empty"}}` or the populated snapshot with
/// its display strings.
#[tracing::instrument(skip_all, fields(website = %website))]
pub async fn website_analytics(
    State(state): State<Arc<AppState>>,
    Path(website): Path<String>,
    Extension(current): Extension<CurrentIdentity>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session_for(&website);

    let view = session.run(current.0.as_ref()).await;
    let body = match view {
        ViewState::Redirect(target) => {
            return Err(AppError::Redirect(state.redirect_location(*target)));
        }
        ViewState::Empty => json!({
            "data": {
                "website": website,
                "state": view.name(),
            }
        }),
        ViewState::Populated(snapshot) => json!({
            "data": {
                "website": website,
                "state": view.name(),
                "total_visits": snapshot.total_visits,
                "total_page_views": snapshot.total_page_views,
                "grouped_pages": snapshot.grouped_pages,
                "display": SnapshotDisplay::from(snapshot.as_ref()),
            }
        }),
        ViewState::Loading => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "fetch cycle for {website} did not settle"
            )));
        }
    };

    Ok(Json(body))
}
