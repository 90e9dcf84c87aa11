//! Per-quote messaging thread.

mod message;

pub use message::{Message, MessageBody, NewMessage, SenderType, MAX_BODY};
