//! ECDSA over the NIST curves with a selectable digest: ES256, ES384, ES512.
//!
//! The digest is fixed per variant; the curve comes from the key. A
//! signature is the concatenation `r || s` with each integer left-padded
//! with zero bytes to the byte width of the key's curve, so its length is
//! always exactly twice that width regardless of integer magnitude.

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::SigilError;
use crate::key::Key;
use crate::signer::Signer;

/// Digest choice carried by each variant as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlg {
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlg {
    fn digest(self, message: &[u8]) -> Vec<u8> {
        match self {
            DigestAlg::Sha256 => Sha256::digest(message).to_vec(),
            DigestAlg::Sha384 => Sha384::digest(message).to_vec(),
            DigestAlg::Sha512 => Sha512::digest(message).to_vec(),
        }
    }
}

/// An ECDSA scheme: a fixed digest paired with its header identifier.
#[derive(Debug, Clone, Copy)]
pub struct Ecdsa {
    digest: DigestAlg,
    name: &'static str,
}

pub const ES256: Ecdsa = Ecdsa {
    digest: DigestAlg::Sha256,
    name: "ES256",
};

pub const ES384: Ecdsa = Ecdsa {
    digest: DigestAlg::Sha384,
    name: "ES384",
};

pub const ES512: Ecdsa = Ecdsa {
    digest: DigestAlg::Sha512,
    name: "ES512",
};

// Byte width of one signature integer: ceil(curve bits / 8).
const P256_INT_LEN: usize = 32;
const P384_INT_LEN: usize = 48;
const P521_INT_LEN: usize = 66;

impl Signer for Ecdsa {
    fn alg(&self) -> &'static str {
        self.name
    }

    fn sign(&self, message: &[u8], key: &Key) -> Result<Vec<u8>, SigilError> {
        let prehash = self.digest.digest(message);
        match key {
            Key::P256Signing(sk) => {
                let sig: p256::ecdsa::Signature = sk
                    .sign_prehash(&prehash)
                    .map_err(|e| SigilError::SigningFailed(format!("ECDSA P-256: {e}")))?;
                Ok(sig.to_vec())
            }
            Key::P384Signing(sk) => {
                let sig: p384::ecdsa::Signature = sk
                    .sign_prehash(&prehash)
                    .map_err(|e| SigilError::SigningFailed(format!("ECDSA P-384: {e}")))?;
                Ok(sig.to_vec())
            }
            Key::P521Signing(sk) => {
                let sig: p521::ecdsa::Signature = sk
                    .sign_prehash(&prehash)
                    .map_err(|e| SigilError::SigningFailed(format!("ECDSA P-521: {e}")))?;
                Ok(sig.to_vec())
            }
            _ => Err(SigilError::WrongKeyKind {
                expected: "ECDSA signing key",
            }),
        }
    }

    fn verify(&self, message: &[u8], signature: &[u8], key: &Key) -> bool {
        let prehash = self.digest.digest(message);
        match key {
            Key::P256Verifying(vk) => {
                if signature.len() != 2 * P256_INT_LEN {
                    return false;
                }
                let Ok(sig) = p256::ecdsa::Signature::from_slice(signature) else {
                    return false;
                };
                vk.verify_prehash(&prehash, &sig).is_ok()
            }
            Key::P384Verifying(vk) => {
                if signature.len() != 2 * P384_INT_LEN {
                    return false;
                }
                let Ok(sig) = p384::ecdsa::Signature::from_slice(signature) else {
                    return false;
                };
                vk.verify_prehash(&prehash, &sig).is_ok()
            }
            Key::P521Verifying(vk) => {
                if signature.len() != 2 * P521_INT_LEN {
                    return false;
                }
                let Ok(sig) = p521::ecdsa::Signature::from_slice(signature) else {
                    return false;
                };
                vk.verify_prehash(&prehash, &sig).is_ok()
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
    fn test_es256_roundtrip() {
        let sk = p256::ecdsa::SigningKey::random(&mut OsRng);
        let vk = sk.verifying_key().to_owned();

        let msg = b"header.payload";
        let sig = ES256.sign(msg, &Key::from(sk)).unwrap();

        assert_eq!(sig.len(), 64);
        assert!(ES256.verify(msg, &sig, &Key::from(vk)));
    }

    #[test]
    fn test_es384_roundtrip() {
        let sk = p384::ecdsa::SigningKey::random(&mut OsRng);
        let vk = sk.verifying_key().to_owned();

        let msg = b"header.payload";
        let sig = ES384.sign(msg, &Key::from(sk)).unwrap();

        assert_eq!(sig.len(), 96);
        assert!(ES384.verify(msg, &sig, &Key::from(vk)));
    }

    #[test]
    fn test_es512_roundtrip() {
        let sk = p521::ecdsa::SigningKey::random(&mut OsRng);
        let vk = p521::ecdsa::VerifyingKey::from(&sk);

        let msg = b"header.payload";
        let sig = ES512.sign(msg, &Key::from(sk)).unwrap();

        assert_eq!(sig.len(), 132);
        assert!(ES512.verify(msg, &sig, &Key::from(vk)));
    }

    /// The digest comes from the variant, the curve width from the key.
    #[test]
    fn test_es256_with_p384_key() {
        let sk = p384::ecdsa::SigningKey::random(&mut OsRng);
        let vk = sk.verifying_key().to_owned();

        let msg = b"header.payload";
        let sig = ES256.sign(msg, &Key::from(sk)).unwrap();

        assert_eq!(sig.len(), 96);
        assert!(ES256.verify(msg, &sig, &Key::from(vk)));
        assert!(!ES384.verify(msg, &sig, &Key::from(vk)));
    }

    #[test]
    fn test_sign_rejects_wrong_key_kind() {
        let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let err = ES256.sign(b"msg", &Key::from(sk)).unwrap_err();
        assert!(matches!(err, SigilError::WrongKeyKind { .. }));
    }

    #[test]
    fn test_verify_rejects_wrong_signature_width() {
        let sk = p256::ecdsa::SigningKey::random(&mut OsRng);
        let vk = sk.verifying_key().to_owned();

        let msg = b"header.payload";
        let sig = ES256.sign(msg, &Key::from(sk)).unwrap();

        let pub_key = Key::from(vk);
        assert!(!ES256.verify(msg, &sig[..63], &pub_key));
        let mut extended = sig.clone();
        extended.push(0);
        assert!(!ES256.verify(msg, &extended, &pub_key));
        assert!(!ES256.verify(msg, &[], &pub_key));
    }

    #[test]
    fn test_verify_rejects_wrong_curve_key() {
        let sk = p256::ecdsa::SigningKey::random(&mut OsRng);
        let msg = b"header.payload";
        let sig = ES256.sign(msg, &Key::from(sk)).unwrap();

        // 64-byte signature against a P-384 key: width check fails.
        let other = p384::ecdsa::SigningKey::random(&mut OsRng);
        assert!(!ES256.verify(msg, &sig, &Key::from(other.verifying_key().to_owned())));
    }

    #[test]
    fn test_verify_rejects_signing_key_material() {
        let sk = p256::ecdsa::SigningKey::random(&mut OsRng);
        let msg = b"header.payload";
        let sig = ES256.sign(msg, &Key::from(sk.clone())).unwrap();

        assert!(!ES256.verify(msg, &sig, &Key::from(sk)));
    }

    #[test]
    fn test_verify_rejects_tampered_message() {
        let sk = p256::ecdsa::SigningKey::random(&mut OsRng);
        let vk = sk.verifying_key().to_owned();
        let sig = ES256.sign(b"header.payload", &Key::from(sk)).unwrap();

        assert!(!ES256.verify(b"header.payloae", &sig, &Key::from(vk)));
    }
}
