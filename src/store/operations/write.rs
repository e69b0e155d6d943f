use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::store::{error::Result, operations::read::parse_message_row, types::Message, types::Role};

/// Append a new message to a conversation
///
/// Timestamps are assigned by the database at write time. Messages are never
/// updated after creation.
///
/// # Returns
///
/// Returns the persisted message, including its server-assigned timestamps.
pub async fn append(
    pool: &Pool,
    conversation_id: &str,
    role: Role,
    content: &str,
) -> Result<Message> {
    let conn = pool.get().await?;

    let id = Uuid::new_v4();
    let role_str = role.as_str();

    let row = conn
        .query_one(
            "INSERT INTO messages (id, conversation_id, role, content) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, conversation_id, role, content, created_at, updated_at",
            &[&id, &conversation_id, &role_str, &content],
        )
        .await?;

    parse_message_row(&row)
}

/// Delete all messages belonging to a conversation
///
/// Idempotent: deleting an absent conversation removes zero rows and is not
/// an error.
///
/// # Returns
///
/// Returns the number of messages removed.
pub async fn delete_conversation(pool: &Pool, conversation_id: &str) -> Result<u64> {
    let conn = pool.get().await?;

    let removed = conn
        .execute(
            "DELETE FROM messages WHERE conversation_id = $1",
            &[&conversation_id],
        )
        .await?;

    Ok(removed)
}
