//! The byte-level connection boundary and the typed message layer on top of
//! it. Transports are assumed to deliver in order and without loss.

mod error;

pub use error::TransportError;

use std::marker::PhantomData;

use log::warn;
use serde::{de::DeserializeOwned, Serialize};

use crate::messages::codec;

/// One end of an ordered, reliable, message-framed connection.
pub trait Transport {
    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;

    /// Returns the next received payload, or `None` if nothing is waiting.
    /// Never blocks.
    fn receive(&mut self) -> Result<Option<Box<[u8]>>, TransportError>;

    fn close(&mut self);

    fn is_closed(&self) -> bool;
}

/// Sends `S` and receives `R` over a [`Transport`], encoding with the wire
/// codec.
pub struct MessageConnection<S, R> {
    transport: Box<dyn Transport>,
    phantom: PhantomData<fn(S) -> R>,
}

impl<S: Serialize, R: DeserializeOwned> MessageConnection<S, R> {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            phantom: PhantomData,
        }
    }

    pub fn send(&mut self, message: &S) -> Result<(), TransportError> {
        let payload = codec::encode(message).map_err(|err| TransportError::Io {
            reason: err.to_string(),
        })?;
        self.transport.send(&payload)
    }

    /// Drains every payload that has arrived. Payloads that fail to decode
    /// are logged and dropped.
    pub fn consume(&mut self) -> Result<Vec<R>, TransportError> {
        let mut messages = Vec::new();
        while let Some(payload) = self.transport.receive()? {
            match codec::decode(&payload) {
                Ok(message) => messages.push(message),
                Err(err) => warn!("dropping undecodable message: {}", err),
            }
        }
        Ok(messages)
    }

    pub fn close(&mut self) {
        self.transport.close();
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }
}
