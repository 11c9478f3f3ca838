mod client_message;
pub mod codec;
mod error;
mod server_message;

pub use client_message::{
    sort_canonical, Attack, BuildCommand, ClientMessage, ClientMessageKind, Direction, PlayerInput,
};
pub use error::CodecError;
pub use server_message::ServerMessage;
