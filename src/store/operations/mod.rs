//! Low-level SQL operations against the messages table

mod query;
mod read;
mod write;

pub use query::list_conversation_summaries;
pub use read::list_by_conversation;
pub use write::{append, delete_conversation};
