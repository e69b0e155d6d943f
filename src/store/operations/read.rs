use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::store::{
    error::Result,
    types::{Message, Role},
};

/// Parse a message row from the database
///
/// Shared by the write path (INSERT ... RETURNING) and the read path.
pub(crate) fn parse_message_row(row: &Row) -> Result<Message> {
    let role_str: String = row.get("role");
    let role = Role::parse(&role_str)?;

    Ok(Message {
        id: row.get("id"),
        conversation_id: row.get("conversation_id"),
        role,
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Retrieve all messages in a conversation
///
/// Messages are ordered ascending by creation time, with insertion order
/// (`seq`) breaking timestamp ties. An unknown conversation yields an empty
/// list, not an error.
pub async fn list_by_conversation(pool: &Pool, conversation_id: &str) -> Result<Vec<Message>> {
    let conn = pool.get().await?;

    let rows = conn
        .query(
            "SELECT id, conversation_id, role, content, created_at, updated_at \
             FROM messages \
             WHERE conversation_id = $1 \
             ORDER BY created_at ASC, seq ASC",
            &[&conversation_id],
        )
        .await?;

    rows.iter().map(parse_message_row).collect()
}
