/// Videos API routes
use crate::{error::Result, error::ServerError, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use watchbox_core::types::{CreateVideo, Video, VideoId};
use watchbox_storage::videos;

/// GET /api/videos
/// Every video the service has resolved so far
pub async fn list_videos(State(state): State<AppState>) -> Result<Json<Vec<Video>>> {
    Ok(Json(videos::get_all(&state.pool).await?))
}

/// POST /api/videos
/// Store a video directly, bypassing catalog resolution
pub async fn create_video(
    State(state): State<AppState>,
    Json(req): Json<CreateVideo>,
) -> Result<Json<Video>> {
    if req.link.trim().is_empty() || req.name.trim().is_empty() {
        return Err(ServerError::MissingParameters("link, name".into()));
    }

    // Creation is idempotent by link
    if let Some(existing) = videos::get_by_link(&state.pool, &req.link).await? {
        return Ok(Json(existing));
    }

    Ok(Json(videos::create(&state.pool, req).await?))
}

/// GET /api/videos/:id
pub async fn get_video(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Video>> {
    let video_id = VideoId::new(id);
    let video = videos::get_by_id(&state.pool, &video_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Video not found".to_string()))?;

    Ok(Json(video))
}
