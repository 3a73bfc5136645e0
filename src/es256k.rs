//! ECDSA over secp256k1 with a fixed SHA-256 digest: ES256k.
//!
//! Unlike the NIST family, signatures use the curve library's DER
//! serialization and are variable length; structural validation happens
//! in the DER parser.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use sha2::{Digest, Sha256};

use crate::error::SigilError;
use crate::key::Key;
use crate::signer::Signer;

/// The secp256k1 scheme.
#[derive(Debug, Clone, Copy)]
pub struct Es256k;

pub const ES256K: Es256k = Es256k;

impl Signer for Es256k {
    fn alg(&self) -> &'static str {
        "ES256k"
    }

    fn sign(&self, message: &[u8], key: &Key) -> Result<Vec<u8>, SigilError> {
        match key {
            Key::Secp256k1Signing(sk) => {
                let prehash = Sha256::digest(message);
                let sig: k256::ecdsa::Signature = sk
                    .sign_prehash(&prehash)
                    .map_err(|e| SigilError::SigningFailed(format!("secp256k1: {e}")))?;
                Ok(sig.to_der().as_bytes().to_vec())
            }
            _ => Err(SigilError::WrongKeyKind {
                expected: "secp256k1 signing key",
            }),
        }
    }

    fn verify(&self, message: &[u8], signature: &[u8], key: &Key) -> bool {
        match key {
            Key::Secp256k1Verifying(vk) => {
                let Ok(sig) = k256::ecdsa::Signature::from_der(signature) else {
                    return false;
                };
                let prehash = Sha256::digest(message);
                vk.verify_prehash(&prehash, &sig).is_ok()
            }
            _ => false,
        }
    }
}
