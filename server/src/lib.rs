//! # Recoil Server
//! The authoritative peer of a recoil session: buffers per-frame client
//! input, advances the simulation no faster than the slowest client, and
//! broadcasts the inputs every frame consumed.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod connection;
mod error;
mod server;

pub use error::ServerError;
pub use server::{Server, ServerConfig};
