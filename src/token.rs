//! The compact token protocol: construct, sign, parse, verify.
//!
//! A token travels as `header.payload.signature`, each segment padding-free
//! URL-safe base64. The three segment strings are cached on the token and
//! the signing input is always rebuilt from those cached strings, never by
//! re-encoding the decoded structures: the bytes signed must be the bytes
//! transmitted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::claims::{unix_now, ClaimSet, StandardClaims};
use crate::error::SigilError;
use crate::key::Key;
use crate::signer::Signer;

/// Value of the header `type` field for every token this crate produces.
pub const TOKEN_TYPE: &str = "JWT";

/// The token header. `alg` always names the scheme that produced the
/// signature; `sign` overwrites it unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "type", default)]
    pub token_type: String,

    #[serde(default)]
    pub alg: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

/// A compact token with payload type `C`.
///
/// Freshly constructed tokens are unsigned: only the payload and its wire
/// segment are populated. `sign` fills in the rest; `parse` produces a
/// fully populated token whose signature is of unknown validity until
/// `verify`. There is no partially-parsed state.
#[derive(Debug, Clone)]
pub struct Token<C = StandardClaims> {
    pub header: Header,
    header_b64: String,
    pub payload: C,
    payload_b64: String,
    pub signature: Vec<u8>,
    signature_b64: String,
}

impl<C> Token<C> {
    /// Construct an unsigned token, serializing and caching the payload
    /// segment. A payload that serializes to JSON `null` is rejected with
    /// [`SigilError::EmptyToken`].
    pub fn new(payload: C) -> Result<Token<C>, SigilError>
    where
        C: Serialize,
    {
        let json = serde_json::to_vec(&payload).map_err(SigilError::Serialize)?;
        if json.as_slice() == b"null" {
            return Err(SigilError::EmptyToken);
        }

        Ok(Token {
            header: Header::default(),
            header_b64: String::new(),
            payload,
            payload_b64: URL_SAFE_NO_PAD.encode(json),
            signature: Vec::new(),
            signature_b64: String::new(),
        })
    }

    /// Construct an unsigned token carrying a key identifier, which `sign`
    /// copies into the header.
    pub fn with_key_id(payload: C, kid: impl Into<String>) -> Result<Token<C>, SigilError>
    where
        C: Serialize,
    {
        let mut token = Token::new(payload)?;
        token.header.kid = Some(kid.into());
        Ok(token)
    }

    /// Parse a compact `header.payload.signature` string.
    ///
    /// Each segment failure is distinguishable: wrong segment count,
    /// undecodable header, payload that does not fit `C`, or a signature
    /// segment that is not valid base64.
    pub fn parse(compact: &str) -> Result<Token<C>, SigilError>
    where
        C: DeserializeOwned,
    {
        let segments: Vec<&str> = compact.split('.').collect();
        if segments.len() != 3 {
            return Err(SigilError::InvalidTokenString);
        }

        let header_bytes = URL_SAFE_NO_PAD
            .decode(segments[0])
            .map_err(|_| SigilError::InvalidHeader)?;
        let header: Header =
            serde_json::from_slice(&header_bytes).map_err(|_| SigilError::InvalidHeader)?;

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(segments[1])
            .map_err(|_| SigilError::InvalidPayload)?;
        let payload: C =
            serde_json::from_slice(&payload_bytes).map_err(|_| SigilError::InvalidPayload)?;

        let signature = URL_SAFE_NO_PAD
            .decode(segments[2])
            .map_err(|_| SigilError::InvalidSignature)?;

        Ok(Token {
            header,
            header_b64: segments[0].to_owned(),
            payload,
            payload_b64: segments[1].to_owned(),
            signature,
            signature_b64: segments[2].to_owned(),
        })
    }

    /// Sign the token, overwriting any previous header and signature, and
    /// return the compact string.
    ///
    /// The signing input is exactly `header-segment + "." + payload-segment`
    /// as cached; scheme errors propagate unchanged.
    pub fn sign(&mut self, signer: &dyn Signer, key: &Key) -> Result<String, SigilError> {
        let kid = self.header.kid.take();
        self.header = Header {
            token_type: TOKEN_TYPE.to_owned(),
            alg: signer.alg().to_owned(),
            kid,
        };

        let header_json = serde_json::to_vec(&self.header).map_err(SigilError::Serialize)?;
        self.header_b64 = URL_SAFE_NO_PAD.encode(header_json);

        let signing_input = format!("{}.{}", self.header_b64, self.payload_b64);

        let signature = signer.sign(signing_input.as_bytes(), key)?;
        self.signature_b64 = URL_SAFE_NO_PAD.encode(&signature);
        self.signature = signature;

        Ok(format!("{signing_input}.{}", self.signature_b64))
    }

    /// Check the signature with the given scheme and key.
    ///
    /// Returns `false` for unsigned tokens and whenever the header's `alg`
    /// differs from the scheme's identifier, without attempting any
    /// cryptography: a token signed under one algorithm never verifies
    /// under another, even a cryptographically compatible one. All failure
    /// causes collapse to `false`.
    pub fn verify(&self, signer: &dyn Signer, key: &Key) -> bool {
        if !self.is_signed() {
            return false;
        }

        if self.header.alg != signer.alg() {
            return false;
        }

        let signing_input = format!("{}.{}", self.header_b64, self.payload_b64);
        signer.verify(signing_input.as_bytes(), &self.signature, key)
    }

    /// Whether the token carries a signature (of any validity).
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// The cached wire segments.
    pub fn header_segment(&self) -> &str {
        &self.header_b64
    }

    pub fn payload_segment(&self) -> &str {
        &self.payload_b64
    }

    pub fn signature_segment(&self) -> &str {
        &self.signature_b64
    }

    /// Reassemble the compact string from the cached segments.
    pub fn compact(&self) -> String {
        format!(
            "{}.{}.{}",
            self.header_b64, self.payload_b64, self.signature_b64
        )
    }
}

impl<C: ClaimSet> Token<C> {
    /// Temporal validity against the system clock. See [`validate_at`].
    ///
    /// [`validate_at`]: Token::validate_at
    pub fn validate(&self) -> Result<(), SigilError> {
        self.validate_at(unix_now())
    }

    /// Temporal validity against an explicit clock.
    ///
    /// Only payloads exposing the standard claim set are checked; any
    /// other payload is trivially valid here and must be validated by the
    /// caller.
    pub fn validate_at(&self, now: i64) -> Result<(), SigilError> {
        match self.payload.standard_claims() {
            Some(claims) => claims.validate_at(now),
            None => Ok(()),
        }
    }
}
