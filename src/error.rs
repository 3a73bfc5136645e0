use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigilError {
    /// Construction was given a payload that serializes to JSON `null`.
    #[error("empty token")]
    EmptyToken,

    /// The compact string does not have exactly three `.`-separated segments.
    #[error("not a valid compact token string")]
    InvalidTokenString,

    /// The header segment failed to decode.
    #[error("not a valid header")]
    InvalidHeader,

    /// The payload segment failed to decode.
    #[error("not a valid payload")]
    InvalidPayload,

    /// The signature segment is not valid base64.
    #[error("not a valid signature")]
    InvalidSignature,

    /// The supplied key is not the kind the algorithm signs with.
    #[error("wrong key kind: expected {expected}")]
    WrongKeyKind { expected: &'static str },

    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Header or payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("token expired")]
    Expired,

    #[error("token not yet valid")]
    NotYetValid,
}
