//! # Payload Codec
//!
//! Mapping sets are held in the repository as zstd-compressed JSON and
//! decoded on every read. Reads are rare relative to the cache's lifetime,
//! so the trade favours memory footprint over CPU.
//!
//! Each payload also carries the SHA-256 digest of its uncompressed bytes,
//! which lets a reload tell changed sets from unchanged ones without
//! decompressing the old payload.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Failure encoding or decoding a payload.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("serialization failed: {0}")]
    Serialize(serde_json::Error),

    #[error("compression failed: {0}")]
    Compress(std::io::Error),

    #[error("decompression failed: {0}")]
    Decompress(std::io::Error),

    #[error("deserialization failed: {0}")]
    Deserialize(serde_json::Error),
}

/// A compressed, serialized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPayload {
    bytes: Box<[u8]>,
    uncompressed_len: usize,
    digest: [u8; 32],
}

impl CompressedPayload {
    /// Serialize `value` as JSON and compress it at `level`.
    pub fn encode<T: Serialize>(value: &T, level: i32) -> Result<Self, CodecError> {
        let raw = serde_json::to_vec(value).map_err(CodecError::Serialize)?;
        let digest: [u8; 32] = Sha256::digest(&raw).into();
        let bytes = zstd::encode_all(raw.as_slice(), level).map_err(CodecError::Compress)?;
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
            uncompressed_len: raw.len(),
            digest,
        })
    }

    /// Decompress and deserialize into a fresh value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        let raw = zstd::decode_all(&*self.bytes).map_err(CodecError::Decompress)?;
        serde_json::from_slice(&raw).map_err(CodecError::Deserialize)
    }

    /// Size held in memory.
    pub fn compressed_len(&self) -> usize {
        self.bytes.len()
    }

    /// Size of the serialized form before compression.
    pub fn uncompressed_len(&self) -> usize {
        self.uncompressed_len
    }

    /// SHA-256 of the serialized form.
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    #[cfg(test)]
    pub(crate) fn from_raw_parts(bytes: Vec<u8>, uncompressed_len: usize) -> Self {
        Self {
            bytes: bytes.into_boxed_slice(),
            uncompressed_len,
            digest: [0; 32],
        }
    }
}
