//! Key material passed to signature schemes.
//!
//! `Key` is a closed sum over the typed signing and verifying keys of
//! every supported scheme. Length and curve validity are enforced when the
//! wrapped key is constructed, so schemes only have to match on the kind:
//! a mismatch is a [`SigilError::WrongKeyKind`](crate::error::SigilError)
//! from `sign` and `false` from `verify`.

/// Opaque key material for signing or verifying.
///
/// Build one from the curve crates' key types via `From`, e.g.
/// `Key::from(p256::ecdsa::SigningKey::random(&mut rng))`.
#[derive(Clone)]
pub enum Key {
    P256Signing(p256::ecdsa::SigningKey),
    P256Verifying(p256::ecdsa::VerifyingKey),
    P384Signing(p384::ecdsa::SigningKey),
    P384Verifying(p384::ecdsa::VerifyingKey),
    P521Signing(p521::ecdsa::SigningKey),
    P521Verifying(p521::ecdsa::VerifyingKey),
    Secp256k1Signing(k256::ecdsa::SigningKey),
    Secp256k1Verifying(k256::ecdsa::VerifyingKey),
    Ed25519Signing(ed25519_dalek::SigningKey),
    Ed25519Verifying(ed25519_dalek::VerifyingKey),
}

impl From<p256::ecdsa::SigningKey> for Key {
    fn from(key: p256::ecdsa::SigningKey) -> Key {
        Key::P256Signing(key)
    }
}

impl From<p256::ecdsa::VerifyingKey> for Key {
    fn from(key: p256::ecdsa::VerifyingKey) -> Key {
        Key::P256Verifying(key)
    }
}

impl From<p384::ecdsa::SigningKey> for Key {
    fn from(key: p384::ecdsa::SigningKey) -> Key {
        Key::P384Signing(key)
    }
}

impl From<p384::ecdsa::VerifyingKey> for Key {
    fn from(key: p384::ecdsa::VerifyingKey) -> Key {
        Key::P384Verifying(key)
    }
}

impl From<p521::ecdsa::SigningKey> for Key {
    fn from(key: p521::ecdsa::SigningKey) -> Key {
        Key::P521Signing(key)
    }
}

impl From<p521::ecdsa::VerifyingKey> for Key {
    fn from(key: p521::ecdsa::VerifyingKey) -> Key {
        Key::P521Verifying(key)
    }
}

impl From<k256::ecdsa::SigningKey> for Key {
    fn from(key: k256::ecdsa::SigningKey) -> Key {
        Key::Secp256k1Signing(key)
    }
}

impl From<k256::ecdsa::VerifyingKey> for Key {
    fn from(key: k256::ecdsa::VerifyingKey) -> Key {
        Key::Secp256k1Verifying(key)
    }
}

impl From<ed25519_dalek::SigningKey> for Key {
    fn from(key: ed25519_dalek::SigningKey) -> Key {
        Key::Ed25519Signing(key)
    }
}

impl From<ed25519_dalek::VerifyingKey> for Key {
    fn from(key: ed25519_dalek::VerifyingKey) -> Key {
        Key::Ed25519Verifying(key)
    }
}
