//! JSON collection codec for store files.
//!
//! # Responsibility
//! - Encode an ordered entity sequence into the on-disk JSON array.
//! - Decode store file bytes back into entities without panicking.
//!
//! # Invariants
//! - Element order is preserved in both directions.
//! - Every field, identifier included, is part of the encoding.
//!
//! # See also
//! - `crate::fs` for how encoded bytes reach the store file.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Content of a freshly bootstrapped store file.
pub const EMPTY_COLLECTION: &[u8] = b"[]";

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug)]
pub enum CodecError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::Decode(err) => write!(
                f,
                "failed to decode collection at line {} column {}: {err}",
                err.line(),
                err.column()
            ),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

/// Encodes entities as one compact JSON array.
pub fn encode_collection<T: Serialize>(entities: &[T]) -> CodecResult<Vec<u8>> {
    serde_json::to_vec(entities).map_err(CodecError::Encode)
}

/// Decodes a JSON array of entities.
///
/// Anything other than an array of `T` is a decode error, including an
/// empty input.
pub fn decode_collection<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<Vec<T>> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, encode_collection, CodecError, EMPTY_COLLECTION};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: String,
        weight: f64,
        tags: Vec<String>,
        parent: Option<String>,
    }

    fn sample(id: &str, weight: f64) -> Sample {
        Sample {
            id: id.to_string(),
            weight,
            tags: vec!["a".into(), "b\n\"quoted\"".into()],
            parent: None,
        }
    }

    #[test]
    fn empty_collection_decodes_to_empty_vec() {
        let decoded: Vec<Sample> = decode_collection(EMPTY_COLLECTION).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(encode_collection::<Sample>(&[]).unwrap(), EMPTY_COLLECTION);
    }

    #[test]
    fn roundtrip_preserves_order_and_fields() {
        let mut third = sample("c", -0.5);
        third.parent = Some("a".into());
        let entities = vec![sample("b", 1.25), sample("a", 0.0), third];

        let bytes = encode_collection(&entities).unwrap();
        let decoded: Vec<Sample> = decode_collection(&bytes).unwrap();
        assert_eq!(decoded, entities);
    }

    #[test]
    fn encoding_is_a_json_array_of_full_objects() {
        let bytes = encode_collection(&[sample("x", 2.0)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert!(value.is_array());
        assert_eq!(value[0]["id"], "x");
        assert_eq!(value[0]["weight"], 2.0);
        assert!(value[0]["parent"].is_null());
    }

    #[test]
    fn malformed_input_is_a_decode_error() {
        let inputs: [&[u8]; 4] = [b"", b"{", b"{\"id\":\"x\"}", b"[{\"id\":1}]"];
        for input in inputs {
            let err = decode_collection::<Sample>(input).unwrap_err();
            assert!(matches!(err, CodecError::Decode(_)), "input {input:?}");
        }
    }
}
