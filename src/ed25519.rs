//! Ed25519 signatures: no external digest step, fixed 64-byte signatures.

use ed25519_dalek::Signer as _;
use ed25519_dalek::Verifier as _;

use crate::error::SigilError;
use crate::key::Key;
use crate::signer::Signer;

/// The Ed25519 scheme. The algorithm digests internally, so the signing
/// input is passed through unhashed.
#[derive(Debug, Clone, Copy)]
pub struct Ed25519;

pub const ED25519: Ed25519 = Ed25519;

impl Signer for Ed25519 {
    fn alg(&self) -> &'static str {
        "ED25519"
    }

    fn sign(&self, message: &[u8], key: &Key) -> Result<Vec<u8>, SigilError> {
        match key {
            Key::Ed25519Signing(sk) => Ok(sk.sign(message).to_bytes().to_vec()),
            _ => Err(SigilError::WrongKeyKind {
                expected: "Ed25519 signing key",
            }),
        }
    }

    fn verify(&self, message: &[u8], signature: &[u8], key: &Key) -> bool {
        match key {
            Key::Ed25519Verifying(vk) => {
                if signature.len() != ed25519_dalek::SIGNATURE_LENGTH {
                    return false;
                }
                let Ok(sig) = ed25519_dalek::Signature::from_slice(signature) else {
                    return false;
                };
                vk.verify(message, &sig).is_ok()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_ed25519_roundtrip() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let vk = sk.verifying_key();

        let msg = b"header.payload";
        let sig = ED25519.sign(msg, &Key::from(sk)).unwrap();

        assert_eq!(sig.len(), 64);
        assert!(ED25519.verify(msg, &sig, &Key::from(vk)));
    }

    #[test]
    fn test_verify_rejects_bad_signature_length() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let vk = Key::from(sk.verifying_key());

        assert!(!ED25519.verify(b"msg", &[0u8; 63], &vk));
        assert!(!ED25519.verify(b"msg", &[0u8; 65], &vk));
        assert!(!ED25519.verify(b"msg", &[], &vk));
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let other = ed25519_dalek::SigningKey::generate(&mut OsRng);

        let msg = b"header.payload";
        let sig = ED25519.sign(msg, &Key::from(sk)).unwrap();

        assert!(!ED25519.verify(msg, &sig, &Key::from(other.verifying_key())));
    }

    #[test]
    fn test_sign_rejects_ecdsa_key() {
        let sk = p256::ecdsa::SigningKey::random(&mut OsRng);
        let err = ED25519.sign(b"msg", &Key::from(sk)).unwrap_err();
        assert!(matches!(err, SigilError::WrongKeyKind { .. }));
    }

    #[test]
    fn test_verify_rejects_corrupted_signature() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let vk = sk.verifying_key();

        let msg = b"header.payload";
        let mut sig = ED25519.sign(msg, &Key::from(sk)).unwrap();
        sig[0] ^= 0x01;

        assert!(!ED25519.verify(msg, &sig, &Key::from(vk)));
    }
}
