/// Boxes API routes
use crate::{error::Result, error::ServerError, middleware::RequestUser, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use watchbox_core::types::{BoxId, BoxSession, CreateBox, PlayOptions};
use watchbox_storage::boxes;

#[derive(Debug, Deserialize)]
pub struct CreateBoxRequest {
    pub name: String,
    #[serde(default)]
    pub options: PlayOptions,
}

/// POST /api/boxes
/// Open a new box
pub async fn create_box(
    State(state): State<AppState>,
    user: RequestUser,
    Json(req): Json<CreateBoxRequest>,
) -> Result<Json<BoxSession>> {
    if req.name.trim().is_empty() {
        return Err(ServerError::MissingParameters("name".into()));
    }

    let session = boxes::create(
        &state.pool,
        CreateBox {
            name: req.name,
            creator: Some(user.0),
            options: req.options,
        },
    )
    .await?;

    Ok(Json(session))
}

/// GET /api/boxes/:id
/// Get a box with its full playlist
pub async fn get_box(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<BoxSession>> {
    let box_id = BoxId::new(id);
    let session = boxes::get_by_id(&state.pool, &box_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Box not found".to_string()))?;

    Ok(Json(session))
}

/// PUT /api/boxes/:id/close
/// Close a box; closed boxes reject every queue command
pub async fn close_box(
    Path(id): Path<String>,
    State(state): State<AppState>,
    _user: RequestUser,
) -> Result<Json<BoxSession>> {
    let box_id = BoxId::new(id);
    if !boxes::set_open(&state.pool, &box_id, false).await? {
        return Err(ServerError::NotFound("Box not found".to_string()));
    }

    let session = boxes::get_by_id(&state.pool, &box_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Box not found".to_string()))?;

    Ok(Json(session))
}

/// PUT /api/boxes/:id/options
/// Update the box's mode flags; takes effect on the next advance
pub async fn update_options(
    Path(id): Path<String>,
    State(state): State<AppState>,
    _user: RequestUser,
    Json(options): Json<PlayOptions>,
) -> Result<Json<BoxSession>> {
    let box_id = BoxId::new(id);
    if !boxes::set_options(&state.pool, &box_id, options).await? {
        return Err(ServerError::NotFound("Box not found".to_string()));
    }

    let session = boxes::get_by_id(&state.pool, &box_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Box not found".to_string()))?;

    Ok(Json(session))
}
