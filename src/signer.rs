//! The signature-scheme contract shared by all algorithm families.

use crate::ecdsa::{ES256, ES384, ES512};
use crate::ed25519::ED25519;
use crate::error::SigilError;
use crate::es256k::ES256K;
use crate::key::Key;

/// A signature scheme usable by the token protocol.
///
/// Implementations are stateless apart from fixed configuration and are
/// safe to share across threads. New algorithms plug in by implementing
/// this trait; the token protocol itself never changes.
pub trait Signer {
    /// Fixed identifier placed in the token header, e.g. `"ES256"`.
    fn alg(&self) -> &'static str;

    /// Sign `message` with `key`, returning the raw signature bytes.
    ///
    /// A key of the wrong kind yields [`SigilError::WrongKeyKind`].
    fn sign(&self, message: &[u8], key: &Key) -> Result<Vec<u8>, SigilError>;

    /// Check `signature` over `message` with `key`.
    ///
    /// Fails closed: malformed signatures, wrong key kinds, and any other
    /// partially-invalid input all yield `false`, never an error.
    fn verify(&self, message: &[u8], signature: &[u8], key: &Key) -> bool;
}

/// Look up a built-in scheme by its header identifier.
pub fn by_alg(name: &str) -> Option<&'static dyn Signer> {
    match name {
        "ES256" => Some(&ES256),
        "ES384" => Some(&ES384),
        "ES512" => Some(&ES512),
        "ES256k" => Some(&ES256K),
        "ED25519" => Some(&ED25519),
        _ => None,
    }
}
