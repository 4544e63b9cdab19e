pub mod message;

pub use message::{OutboundMessage, PostMessageResponse, SendOutcome};
