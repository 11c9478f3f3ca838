//! # Recoil Client
//! The predicting peer. Runs the shared simulation ahead of the server using
//! its own input and whatever remote input has been relayed so far, then
//! rewinds and replays whenever the server's authoritative input for a frame
//! disagrees with what was predicted.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

cfg_if! {
    if #[cfg(all(target_arch = "wasm32", not(feature = "wbindgen")))]
    {
        // Use no protocols...
        compile_error!("wasm target for 'recoil_client' crate requires the 'wbindgen' feature to be enabled.");
    }
}

mod client;
mod client_config;
mod error;
mod input;
mod prediction;

pub use client::Client;
pub use client_config::ClientConfig;
pub use error::ClientError;
pub use input::{IdleInput, InputSource};
