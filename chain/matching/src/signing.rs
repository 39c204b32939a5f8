//! Signer recovery — the cryptographic capability consumed by the gate
//!
//! The engine only needs `recover(digest, signature) -> Address`; the
//! primitive behind it is pluggable through the `SignerRecovery` trait.
//! The shipped implementation is Ed25519: a recoverable signature is the
//! 96-byte concatenation of the signer's verifying key and the detached
//! signature over the order's content hash, and the signer's address is
//! derived from the verifying key by hashing.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};
use types::errors::SignatureError;
use types::ids::{Address, OrderHash};

/// Byte length of a recoverable signature blob: verifying key ‖ signature.
pub const RECOVERABLE_SIGNATURE_LEN: usize = 96;

/// Capability to recover the signing address from a digest and signature.
///
/// Fails with a distinct error when the blob is the wrong length, carries
/// a malformed key, or does not verify against the digest.
pub trait SignerRecovery: std::fmt::Debug {
    fn recover(&self, digest: &OrderHash, signature: &[u8]) -> Result<Address, SignatureError>;
}

/// Ed25519-backed signer recovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Recovery;

impl SignerRecovery for Ed25519Recovery {
    fn recover(&self, digest: &OrderHash, signature: &[u8]) -> Result<Address, SignatureError> {
        if signature.len() != RECOVERABLE_SIGNATURE_LEN {
            return Err(SignatureError::InvalidLength {
                expected: RECOVERABLE_SIGNATURE_LEN,
                actual: signature.len(),
            });
        }

        let key_bytes: [u8; 32] = signature[..32]
            .try_into()
            .map_err(|_| SignatureError::MalformedKey)?;
        let sig_bytes: [u8; 64] = signature[32..]
            .try_into()
            .map_err(|_| SignatureError::VerificationFailed)?;

        let verifying_key =
            VerifyingKey::from_bytes(&key_bytes).map_err(|_| SignatureError::MalformedKey)?;
        let sig = Signature::from_bytes(&sig_bytes);

        verifying_key
            .verify(digest.as_bytes(), &sig)
            .map_err(|_| SignatureError::VerificationFailed)?;

        Ok(address_of(&verifying_key))
    }
}

/// Derive the on-venue address of a verifying key: the first 20 bytes of
/// its SHA-256 digest.
pub fn address_of(verifying_key: &VerifyingKey) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(verifying_key.to_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[..20]);
    Address::from_bytes(bytes)
}

/// Produce a recoverable signature blob over a digest.
///
/// Counterpart of [`Ed25519Recovery::recover`]; used by order signers and
/// by the test suite.
pub fn sign_digest(digest: &OrderHash, signing_key: &SigningKey) -> Vec<u8> {
    let sig = signing_key.sign(digest.as_bytes());
    let mut blob = Vec::with_capacity(RECOVERABLE_SIGNATURE_LEN);
    blob.extend_from_slice(&signing_key.verifying_key().to_bytes());
    blob.extend_from_slice(&sig.to_bytes());
    blob
}
