//! Binary encoding of wire messages.

use serde::{de::DeserializeOwned, Serialize};

use crate::messages::CodecError;

pub fn encode<M: Serialize>(message: &M) -> Result<Vec<u8>, CodecError> {
    Ok(bincode::serde::encode_to_vec(message, bincode::config::standard())?)
}

pub fn decode<M: DeserializeOwned>(data: &[u8]) -> Result<M, CodecError> {
    let (message, _) = bincode::serde::decode_from_slice(data, bincode::config::standard())?;
    Ok(message)
}
