//! Box session queries

use crate::error::Result;
use crate::queue;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use watchbox_core::types::{BoxId, BoxSession, CreateBox, PlayOptions};

/// Create a new box, open and empty
pub async fn create(pool: &SqlitePool, request: CreateBox) -> Result<BoxSession> {
    let now = Utc::now();
    let session = BoxSession {
        id: BoxId::generate(),
        name: request.name,
        creator: request.creator,
        open: true,
        options: request.options,
        playlist: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r"
        INSERT INTO boxes (id, name, creator_id, open, loop_mode, random_mode, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(&session.id)
    .bind(&session.name)
    .bind(&session.creator)
    .bind(session.open)
    .bind(session.options.loop_mode)
    .bind(session.options.random)
    .bind(session.created_at)
    .bind(session.updated_at)
    .execute(pool)
    .await?;

    Ok(session)
}

/// Load a box snapshot with its playlist fully materialized
pub async fn get_by_id(pool: &SqlitePool, id: &BoxId) -> Result<Option<BoxSession>> {
    let row = sqlx::query(
        r"
        SELECT id, name, creator_id, open, loop_mode, random_mode, created_at, updated_at
        FROM boxes
        WHERE id = ?
        ",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let playlist = queue::list_for_box(pool, id).await?;

    Ok(Some(BoxSession {
        id: row.get("id"),
        name: row.get("name"),
        creator: row.get("creator_id"),
        open: row.get("open"),
        options: PlayOptions {
            loop_mode: row.get("loop_mode"),
            random: row.get("random_mode"),
        },
        playlist,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }))
}

/// Flip a box's open flag. Returns whether the box existed.
pub async fn set_open(pool: &SqlitePool, id: &BoxId, open: bool) -> Result<bool> {
    let result = sqlx::query("UPDATE boxes SET open = ?, updated_at = ? WHERE id = ?")
        .bind(open)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Update a box's mode flags. Returns whether the box existed.
pub async fn set_options(pool: &SqlitePool, id: &BoxId, options: PlayOptions) -> Result<bool> {
    let result =
        sqlx::query("UPDATE boxes SET loop_mode = ?, random_mode = ?, updated_at = ? WHERE id = ?")
            .bind(options.loop_mode)
            .bind(options.random)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

/// The box's open flag without materializing its playlist; `None` when
/// the box does not exist.
pub async fn is_open(pool: &SqlitePool, id: &BoxId) -> Result<Option<bool>> {
    let row = sqlx::query("SELECT open FROM boxes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get("open")))
}

/// Whether a box exists
pub async fn exists(pool: &SqlitePool, id: &BoxId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM boxes WHERE id = ? LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
