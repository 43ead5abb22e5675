//! User queries

use crate::error::Result;
use sqlx::{Row, SqlitePool};
use watchbox_core::types::{User, UserId};

/// Store a user record
pub async fn create(pool: &SqlitePool, user: &User) -> Result<()> {
    sqlx::query("INSERT INTO users (id, name, mail, created_at) VALUES (?, ?, ?, ?)")
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.mail)
        .bind(user.created_at)
        .execute(pool)
        .await?;

    Ok(())
}

/// Find a user by id
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, name, mail, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| User {
        id: row.get("id"),
        name: row.get("name"),
        mail: row.get("mail"),
        created_at: row.get("created_at"),
    }))
}

/// All known users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, name, mail, created_at FROM users ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| User {
            id: row.get("id"),
            name: row.get("name"),
            mail: row.get("mail"),
            created_at: row.get("created_at"),
        })
        .collect())
}
