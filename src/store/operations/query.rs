use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::store::{
    error::Result,
    types::{ConversationSummary, Role},
};

/// One summary row per conversation, computed by grouping all messages on
/// their conversation id.
///
/// Per group this selects the most recent message (max creation time, `seq`
/// breaking ties) for content/role/time, the oldest message (min creation
/// time) for the opening content, and the total count. `DISTINCT ON` over an
/// explicit sort keeps the min/max selection deterministic rather than
/// relying on grouping order.
///
/// Results are ordered by most recent activity, descending.
const SUMMARY_SQL: &str = "\
WITH latest AS (
    SELECT DISTINCT ON (conversation_id)
           conversation_id, content, role, created_at
    FROM messages
    ORDER BY conversation_id, created_at DESC, seq DESC
),
earliest AS (
    SELECT DISTINCT ON (conversation_id)
           conversation_id, content
    FROM messages
    ORDER BY conversation_id, created_at ASC, seq ASC
),
counts AS (
    SELECT conversation_id, count(*) AS message_count
    FROM messages
    GROUP BY conversation_id
)
SELECT l.conversation_id,
       l.content    AS last_message,
       l.role       AS last_message_role,
       l.created_at AS last_message_time,
       c.message_count,
       e.content    AS first_message
FROM latest l
JOIN earliest e USING (conversation_id)
JOIN counts   c USING (conversation_id)
ORDER BY l.created_at DESC";

fn parse_summary_row(row: &Row) -> Result<ConversationSummary> {
    let role_str: String = row.get("last_message_role");
    let last_message_role = Role::parse(&role_str)?;

    Ok(ConversationSummary {
        conversation_id: row.get("conversation_id"),
        last_message: row.get("last_message"),
        last_message_role,
        last_message_time: row.get("last_message_time"),
        message_count: row.get("message_count"),
        first_message: row.get("first_message"),
    })
}

/// Group all messages by conversation and reduce each group to one summary row
pub async fn list_conversation_summaries(pool: &Pool) -> Result<Vec<ConversationSummary>> {
    let conn = pool.get().await?;

    let rows = conn.query(SUMMARY_SQL, &[]).await?;

    rows.iter().map(parse_summary_row).collect()
}
