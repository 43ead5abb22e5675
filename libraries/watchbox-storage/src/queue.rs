//! Queue item queries
//!
//! The ordered playlist of a box. Stored order (the `position` column) is
//! the engine's order: upcoming items first, then the playing item, then
//! history. `replace` is the single write path for whole-sequence updates.

use crate::error::Result;
use sqlx::{Row, SqlitePool};
use watchbox_core::types::{BoxId, QueueItem, QueueItemId, Video};

const ITEM_COLUMNS: &str = r"
    qi.id, qi.submitted_at, qi.submitted_by, qi.start_time, qi.end_time, qi.ignored,
    v.id AS video_id, v.link AS video_link, v.name AS video_name,
    v.duration AS video_duration, v.created_at AS video_created_at
";

fn item_from_row(row: &sqlx::sqlite::SqliteRow) -> QueueItem {
    QueueItem {
        id: row.get("id"),
        video: Video {
            id: row.get("video_id"),
            link: row.get("video_link"),
            name: row.get("video_name"),
            duration: row.get("video_duration"),
            created_at: row.get("video_created_at"),
        },
        submitted_at: row.get("submitted_at"),
        submitted_by: row.get("submitted_by"),
        start_time: row.get("start_time"),
        end_time: row.get("end_time"),
        ignored: row.get("ignored"),
    }
}

/// Get a box's playlist in stored (engine) order
pub async fn list_for_box(pool: &SqlitePool, box_id: &BoxId) -> Result<Vec<QueueItem>> {
    let rows = sqlx::query(&format!(
        r"
        SELECT {ITEM_COLUMNS}
        FROM queue_items qi
        INNER JOIN videos v ON qi.video_id = v.id
        WHERE qi.box_id = ?
        ORDER BY qi.position
        "
    ))
    .bind(box_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(item_from_row).collect())
}

/// Get a box's playlist newest-submission-first (the API read path)
pub async fn list_by_submission(pool: &SqlitePool, box_id: &BoxId) -> Result<Vec<QueueItem>> {
    let rows = sqlx::query(&format!(
        r"
        SELECT {ITEM_COLUMNS}
        FROM queue_items qi
        INNER JOIN videos v ON qi.video_id = v.id
        WHERE qi.box_id = ?
        ORDER BY qi.submitted_at DESC
        "
    ))
    .bind(box_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(item_from_row).collect())
}

/// Atomically replace a box's whole sequence.
///
/// Positions are rewritten from the slice order. Interleaving two replaces
/// on the same box is prevented by the command processor's per-box
/// serialization, not here.
pub async fn replace(pool: &SqlitePool, box_id: &BoxId, items: &[QueueItem]) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM queue_items WHERE box_id = ?")
        .bind(box_id)
        .execute(&mut *tx)
        .await?;

    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            r"
            INSERT INTO queue_items
                (id, box_id, video_id, position, submitted_at, submitted_by,
                 start_time, end_time, ignored)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&item.id)
        .bind(box_id)
        .bind(&item.video.id)
        .bind(position as i64)
        .bind(item.submitted_at)
        .bind(&item.submitted_by)
        .bind(item.start_time)
        .bind(item.end_time)
        .bind(item.ignored)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("UPDATE boxes SET updated_at = ? WHERE id = ?")
        .bind(chrono::Utc::now())
        .bind(box_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Delete one item by id regardless of its state.
///
/// Returns whether a row was removed.
pub async fn remove_item(pool: &SqlitePool, box_id: &BoxId, item_id: &QueueItemId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM queue_items WHERE box_id = ? AND id = ?")
        .bind(box_id)
        .bind(item_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Whether an item exists within a box (route-level pre-validation)
pub async fn item_exists(pool: &SqlitePool, box_id: &BoxId, item_id: &QueueItemId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM queue_items WHERE box_id = ? AND id = ? LIMIT 1")
        .bind(box_id)
        .bind(item_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// The currently playing item of a box, if any
pub async fn current_item(pool: &SqlitePool, box_id: &BoxId) -> Result<Option<QueueItem>> {
    let row = sqlx::query(&format!(
        r"
        SELECT {ITEM_COLUMNS}
        FROM queue_items qi
        INNER JOIN videos v ON qi.video_id = v.id
        WHERE qi.box_id = ? AND qi.start_time IS NOT NULL AND qi.end_time IS NULL
        LIMIT 1
        "
    ))
    .bind(box_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(item_from_row))
}
