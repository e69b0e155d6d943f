// Handlers module

pub mod conversations;
pub mod health;
pub mod history;
pub mod send_message;
pub mod stream_message;

pub use conversations::{delete_conversation_handler, list_conversations_handler};
pub use health::health_handler;
pub use history::get_history_handler;
pub use send_message::send_message_handler;
pub use stream_message::stream_message_handler;
