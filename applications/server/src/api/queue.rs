/// Queue API routes
///
/// Mutations are not applied inline: each handler validates what it can
/// cheaply, enqueues a typed command and returns at once. The command
/// queue applies it in per-box order.
use crate::{error::Result, error::ServerError, middleware::RequestUser, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use watchbox_core::types::{
    BoxId, BoxScope, Command, PlaylistId, PlaylistSubmissionRequest, QueueItem, QueueItemActionRequest,
    QueueItemId, VideoSubmissionRequest,
};
use watchbox_storage::{boxes, queue};

#[derive(Debug, Deserialize)]
pub struct SubmitVideoRequest {
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitPlaylistRequest {
    #[serde(rename = "playlistId")]
    pub playlist_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub accepted: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

fn accepted(command: &Command) -> Json<AcceptedResponse> {
    Json(AcceptedResponse {
        accepted: true,
        kind: command.kind(),
    })
}

/// GET /api/boxes/:id/queue
/// The playlist, most recent submission first
pub async fn get_queue(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<QueueItem>>> {
    let box_id = BoxId::new(id);
    if !boxes::exists(&state.pool, &box_id).await? {
        return Err(ServerError::NotFound("Box not found".to_string()));
    }

    Ok(Json(queue::list_by_submission(&state.pool, &box_id).await?))
}

/// GET /api/boxes/:id/queue/current
/// The currently playing item, if any
pub async fn get_current(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Option<QueueItem>>> {
    let box_id = BoxId::new(id);
    Ok(Json(state.playlist.get_current_video(&box_id).await?))
}

/// POST /api/boxes/:id/queue/video
/// Submit a video link for the box's playlist
pub async fn submit_video(
    Path(id): Path<String>,
    State(state): State<AppState>,
    user: RequestUser,
    Json(req): Json<SubmitVideoRequest>,
) -> Result<Json<AcceptedResponse>> {
    let link = req
        .link
        .filter(|link| !link.trim().is_empty())
        .ok_or_else(|| ServerError::MissingParameters("link".into()))?;

    ensure_open_box(&state, &BoxId::new(id.clone())).await?;

    let command = Command::AddVideo(VideoSubmissionRequest {
        box_token: BoxId::new(id),
        user_token: user.0,
        link,
    });
    let response = accepted(&command);
    state.commands.submit(command).await?;
    Ok(response)
}

/// POST /api/boxes/:id/queue/playlist
/// Expand a saved playlist into the box's queue
pub async fn submit_playlist(
    Path(id): Path<String>,
    State(state): State<AppState>,
    user: RequestUser,
    Json(req): Json<SubmitPlaylistRequest>,
) -> Result<Json<AcceptedResponse>> {
    let playlist_id = req
        .playlist_id
        .filter(|playlist_id| !playlist_id.trim().is_empty())
        .ok_or_else(|| ServerError::MissingParameters("playlistId".into()))?;

    ensure_open_box(&state, &BoxId::new(id.clone())).await?;

    let command = Command::AddPlaylist(PlaylistSubmissionRequest {
        box_token: BoxId::new(id),
        user_token: user.0,
        playlist_id: PlaylistId::new(playlist_id),
    });
    let response = accepted(&command);
    state.commands.submit(command).await?;
    Ok(response)
}

/// PUT /api/boxes/:id/queue/skip
/// Close the playing item and start the next one
pub async fn skip_video(
    Path(id): Path<String>,
    State(state): State<AppState>,
    user: RequestUser,
) -> Result<Json<AcceptedResponse>> {
    ensure_open_box(&state, &BoxId::new(id.clone())).await?;

    let command = Command::SkipVideo(BoxScope {
        box_token: BoxId::new(id),
        user_token: user.0,
    });
    let response = accepted(&command);
    state.commands.submit(command).await?;
    Ok(response)
}

/// PUT /api/boxes/:id/queue/:item/next
/// Move an upcoming item into the next-to-play slot
pub async fn play_next(
    Path((id, item)): Path<(String, String)>,
    State(state): State<AppState>,
    user: RequestUser,
) -> Result<Json<AcceptedResponse>> {
    let request = checked_action(&state, id, item, user).await?;
    let command = Command::PlayNext(request);
    let response = accepted(&command);
    state.commands.submit(command).await?;
    Ok(response)
}

/// PUT /api/boxes/:id/queue/:item/now
/// Interrupt playback and start the item immediately
pub async fn play_now(
    Path((id, item)): Path<(String, String)>,
    State(state): State<AppState>,
    user: RequestUser,
) -> Result<Json<AcceptedResponse>> {
    let request = checked_action(&state, id, item, user).await?;
    let command = Command::PlayNow(request);
    let response = accepted(&command);
    state.commands.submit(command).await?;
    Ok(response)
}

/// PUT /api/boxes/:id/queue/:item/replay
/// Bring a played item back and start it immediately
pub async fn replay(
    Path((id, item)): Path<(String, String)>,
    State(state): State<AppState>,
    user: RequestUser,
) -> Result<Json<AcceptedResponse>> {
    let request = checked_action(&state, id, item, user).await?;
    let command = Command::Replay(request);
    let response = accepted(&command);
    state.commands.submit(command).await?;
    Ok(response)
}

/// DELETE /api/boxes/:id/queue/:item
/// Remove a submission from the playlist
pub async fn remove_video(
    Path((id, item)): Path<(String, String)>,
    State(state): State<AppState>,
    user: RequestUser,
) -> Result<Json<AcceptedResponse>> {
    let request = checked_action(&state, id, item, user).await?;
    let command = Command::RemoveVideo(request);
    let response = accepted(&command);
    state.commands.submit(command).await?;
    Ok(response)
}

/// Rejects what can be rejected before enqueueing: a closed or missing
/// box, and an unknown item (404 instead of a silently dropped command).
async fn checked_action(
    state: &AppState,
    id: String,
    item: String,
    user: RequestUser,
) -> Result<QueueItemActionRequest> {
    let box_token = BoxId::new(id);
    let item = QueueItemId::new(item);

    ensure_open_box(state, &box_token).await?;
    if !queue::item_exists(&state.pool, &box_token, &item).await? {
        return Err(ServerError::NotFound("VIDEO_NOT_FOUND".to_string()));
    }

    Ok(QueueItemActionRequest {
        box_token,
        user_token: user.0,
        item,
    })
}

async fn ensure_open_box(state: &AppState, box_token: &BoxId) -> Result<()> {
    match boxes::is_open(&state.pool, box_token).await? {
        None => Err(ServerError::NotFound("Box not found".to_string())),
        Some(false) => Err(ServerError::Conflict(format!("box {box_token} is closed"))),
        Some(true) => Ok(()),
    }
}
