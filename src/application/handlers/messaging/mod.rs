//! Messaging handlers - per-quote threads between customer and operator.

mod list_messages;
mod post_message;

pub use list_messages::{ListMessagesHandler, ListMessagesQuery};
pub use post_message::{PostMessageCommand, PostMessageHandler, PostMessageResult};
