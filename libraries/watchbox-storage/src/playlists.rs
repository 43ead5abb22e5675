//! User catalog playlist queries
//!
//! Saved playlists back the `addPlaylist` command: submitting one expands
//! every video into fresh queue items.

use crate::error::Result;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use watchbox_core::types::{PlaylistId, UserId, UserPlaylist, Video};

/// Create an empty catalog playlist
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    owner: Option<&UserId>,
) -> Result<UserPlaylist> {
    let playlist = UserPlaylist {
        id: PlaylistId::generate(),
        name: name.to_string(),
        owner: owner.cloned(),
        videos: Vec::new(),
        created_at: Utc::now(),
    };

    sqlx::query("INSERT INTO user_playlists (id, name, owner_id, created_at) VALUES (?, ?, ?, ?)")
        .bind(&playlist.id)
        .bind(&playlist.name)
        .bind(&playlist.owner)
        .bind(playlist.created_at)
        .execute(pool)
        .await?;

    Ok(playlist)
}

/// Append a video to a playlist
pub async fn add_video(pool: &SqlitePool, playlist_id: &PlaylistId, video: &Video) -> Result<()> {
    sqlx::query(
        r"
        INSERT INTO user_playlist_videos (playlist_id, video_id, position)
        VALUES (?, ?, (SELECT COALESCE(MAX(position) + 1, 0)
                       FROM user_playlist_videos WHERE playlist_id = ?))
        ",
    )
    .bind(playlist_id)
    .bind(&video.id)
    .bind(playlist_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a playlist with its videos in stored order
pub async fn get_with_videos(
    pool: &SqlitePool,
    id: &PlaylistId,
) -> Result<Option<UserPlaylist>> {
    let row = sqlx::query(
        "SELECT id, name, owner_id, created_at FROM user_playlists WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let video_rows = sqlx::query(
        r"
        SELECT v.id, v.link, v.name, v.duration, v.created_at
        FROM user_playlist_videos pv
        INNER JOIN videos v ON pv.video_id = v.id
        WHERE pv.playlist_id = ?
        ORDER BY pv.position
        ",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let videos = video_rows
        .into_iter()
        .map(|row| Video {
            id: row.get("id"),
            link: row.get("link"),
            name: row.get("name"),
            duration: row.get("duration"),
            created_at: row.get("created_at"),
        })
        .collect();

    Ok(Some(UserPlaylist {
        id: row.get("id"),
        name: row.get("name"),
        owner: row.get("owner_id"),
        videos,
        created_at: row.get("created_at"),
    }))
}
