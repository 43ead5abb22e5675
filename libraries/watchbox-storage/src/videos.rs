//! Video catalog queries

use crate::error::Result;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use watchbox_core::types::{CreateVideo, Video, VideoId};

fn video_from_row(row: &sqlx::sqlite::SqliteRow) -> Video {
    Video {
        id: row.get("id"),
        link: row.get("link"),
        name: row.get("name"),
        duration: row.get("duration"),
        created_at: row.get("created_at"),
    }
}

/// Store a new video record
pub async fn create(pool: &SqlitePool, request: CreateVideo) -> Result<Video> {
    let video = Video {
        id: VideoId::generate(),
        link: request.link,
        name: request.name,
        duration: request.duration,
        created_at: Utc::now(),
    };

    sqlx::query(
        r"
        INSERT INTO videos (id, link, name, duration, created_at)
        VALUES (?, ?, ?, ?, ?)
        ",
    )
    .bind(&video.id)
    .bind(&video.link)
    .bind(&video.name)
    .bind(&video.duration)
    .bind(video.created_at)
    .execute(pool)
    .await?;

    Ok(video)
}

/// Find a video by its external catalog link
pub async fn get_by_link(pool: &SqlitePool, link: &str) -> Result<Option<Video>> {
    let row = sqlx::query(
        "SELECT id, link, name, duration, created_at FROM videos WHERE link = ? LIMIT 1",
    )
    .bind(link)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(video_from_row))
}

/// Find a video by id
pub async fn get_by_id(pool: &SqlitePool, id: &VideoId) -> Result<Option<Video>> {
    let row =
        sqlx::query("SELECT id, link, name, duration, created_at FROM videos WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(row.as_ref().map(video_from_row))
}

/// All known videos
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Video>> {
    let rows =
        sqlx::query("SELECT id, link, name, duration, created_at FROM videos ORDER BY created_at")
            .fetch_all(pool)
            .await?;

    Ok(rows.iter().map(video_from_row).collect())
}
