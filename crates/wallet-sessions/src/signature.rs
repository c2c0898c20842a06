//! Session-proof signature scheme.
//!
//! A session is opened by proving control of the wallet's secp256k1 key:
//! the wallet signs the digest of `(wallet id, replay nonce, requested
//! duration, chain tag)` and the module recovers the signer from the
//! signature and compares it to the claimed wallet identity.
//!
//! The nonce must be the wallet's *current* replay counter, read before
//! signing; it is consumed by the successful creation, so a captured
//! signature can never open a second session. The chain tag separates
//! networks: the same payload signed for another deployment recovers the
//! right key but hashes to a different digest, so verification fails.
//!
//! Wire format: 65 bytes `r || s || v`, with `v` the recovery id (0-3).

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::{WalletId, WalletSessionsError};

/// Length of the `r || s || v` signature encoding.
pub const SIGNATURE_LEN: usize = 65;

/// Prefix preventing collisions with any other signed payload format.
const DIGEST_PREFIX: &[u8] = b"wallet-sso/session/v1";

/// Derive a wallet identity from a verifying key: the last 20 bytes of
/// `SHA-256(x || y)` over the uncompressed curve point.
pub fn wallet_id_of(key: &VerifyingKey) -> WalletId {
    let point = key.to_encoded_point(false);
    // skip the 0x04 uncompressed-point marker
    let hash = Sha256::digest(&point.as_bytes()[1..]);

    let mut id = [0u8; 20];
    id.copy_from_slice(&hash[12..]);
    WalletId(id)
}

/// Canonical digest of a session-creation request.
///
/// Fields are hashed in fixed order with fixed-width big-endian encoding,
/// so signer and verifier agree byte-for-byte.
pub fn session_digest(
    wallet: &WalletId,
    nonce: u64,
    requested_duration: u64,
    chain_tag: u64,
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(DIGEST_PREFIX);
    hasher.update(wallet.0);
    hasher.update(nonce.to_be_bytes());
    hasher.update(requested_duration.to_be_bytes());
    hasher.update(chain_tag.to_be_bytes());
    hasher.finalize().into()
}

/// Recover the signing wallet identity from a digest and an `r || s || v`
/// signature.
///
/// Any decoding or recovery failure is reported as
/// [`WalletSessionsError::InvalidSignatureFormat`]; a structurally valid
/// signature by the wrong key is *not* detected here (recovery always
/// yields some key) and surfaces as a mismatch in
/// [`verify_session_signature`].
pub fn recover_wallet_id(
    digest: &[u8; 32],
    signature: &[u8],
) -> Result<WalletId, WalletSessionsError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(WalletSessionsError::InvalidSignatureFormat);
    }

    let sig = Signature::from_slice(&signature[..64])
        .map_err(|_| WalletSessionsError::InvalidSignatureFormat)?;
    let recovery_id = RecoveryId::from_byte(signature[64])
        .ok_or(WalletSessionsError::InvalidSignatureFormat)?;

    let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| WalletSessionsError::InvalidSignatureFormat)?;

    Ok(wallet_id_of(&key))
}

/// Check that `signature` proves control of `wallet`'s key over the given
/// nonce, duration and chain tag. No side effects.
pub fn verify_session_signature(
    wallet: &WalletId,
    nonce: u64,
    requested_duration: u64,
    chain_tag: u64,
    signature: &[u8],
) -> Result<(), WalletSessionsError> {
    let digest = session_digest(wallet, nonce, requested_duration, chain_tag);
    let recovered = recover_wallet_id(&digest, signature)?;

    if recovered != *wallet {
        return Err(WalletSessionsError::SignatureMismatch);
    }

    Ok(())
}
