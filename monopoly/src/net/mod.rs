//! Wire protocol: canonical outgoing messages and their JSON encoding.

pub mod errors;
pub mod messages;

pub use errors::SerializationError;
pub use messages::OutgoingMessage;
