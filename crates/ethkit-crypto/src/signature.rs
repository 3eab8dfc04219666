//! Deterministic, recovery-compatible ECDSA over secp256k1.
//!
//! The nonce is `keccak256(digest || key || counter) mod n`. Any candidate
//! that would produce an unusable signature is rejected and the counter is
//! bumped; `s` is never negated after the fact.

use ethkit_primitives::{int::trim_leading_zeros, Address, ChainId, H256};
use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::point::AffineCoordinates;
use k256::elliptic_curve::scalar::IsHigh;
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, FieldBytes, ProjectivePoint, Scalar};
use std::cmp::Ordering;
use tracing::debug;
use zeroize::Zeroizing;

use crate::hash::keccak256_parts;
use crate::{keccak256, CryptoError};

/// Half of the secp256k1 curve order (n/2)
/// n/2 = 0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0
const SECP256K1_N_DIV_2: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D,
    0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Field prime minus group order (p - n)
/// = 0x14551231950B75FC4402DA1722FC9BAEE
const SECP256K1_P_MINUS_N: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    0x45, 0x51, 0x23, 0x19, 0x50, 0xB7, 0x5F, 0xC4,
    0x40, 0x2D, 0xA1, 0x72, 0x2F, 0xC9, 0xBA, 0xEE,
];

/// Public key
pub type PublicKey = VerifyingKey;

/// Private key (32 bytes). The secret scalar is zeroized on drop.
pub type PrivateKey = SigningKey;

/// Recoverable signature with an EIP-155 `v`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// r component (32 bytes)
    pub r: [u8; 32],
    /// s component (32 bytes)
    pub s: [u8; 32],
    /// Minimal big-endian `chain_id * 2 + 35 + parity`
    pub v: Vec<u8>,
}

impl Signature {
    /// Create signature from r, s, v components
    pub fn new(r: [u8; 32], s: [u8; 32], v: Vec<u8>) -> Self {
        Signature { r, s, v }
    }

    /// `v` as an integer. `None` if wider than 16 bytes.
    pub fn v_value(&self) -> Option<u128> {
        if self.v.len() > 16 {
            return None;
        }
        Some(self.v.iter().fold(0u128, |acc, b| (acc << 8) | *b as u128))
    }

    /// Recovery id (y parity) under `chain_id`
    pub fn recovery_id(&self, chain_id: ChainId) -> Result<u8, CryptoError> {
        let v = self
            .v_value()
            .ok_or_else(|| CryptoError::InvalidSignature("v wider than 16 bytes".to_string()))?;
        let base = eip155_base(chain_id);
        match v.checked_sub(base) {
            Some(id @ (0 | 1)) => Ok(id as u8),
            _ => Err(CryptoError::InvalidRecoveryId(v)),
        }
    }

    /// Check if signature has low-s value (EIP-2 compliant)
    pub fn is_low_s(&self) -> bool {
        compare_bytes(&self.s, &SECP256K1_N_DIV_2) != Ordering::Greater
    }
}

/// Signing knobs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignOptions {
    /// Reject candidates with `s > n/2`
    pub eip2: bool,
    /// Starting value of the nonce counter
    pub k_counter: u8,
}

impl Default for SignOptions {
    fn default() -> Self {
        SignOptions {
            eip2: true,
            k_counter: 0,
        }
    }
}

/// Compare two 32-byte arrays as big-endian integers
fn compare_bytes(a: &[u8; 32], b: &[u8; 32]) -> Ordering {
    a.iter().cmp(b.iter())
}

fn eip155_base(chain_id: ChainId) -> u128 {
    chain_id as u128 * 2 + 35
}

/// Build a private key from 32 raw bytes
pub fn private_key_from_slice(bytes: &[u8]) -> Result<PrivateKey, CryptoError> {
    if bytes.len() != 32 {
        return Err(CryptoError::InvalidKeyMaterial(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    SigningKey::from_slice(bytes).map_err(|_| {
        CryptoError::InvalidKeyMaterial(
            "scalar is zero or not below the curve order".to_string(),
        )
    })
}

/// Sign `digest` with EIP-2 enforcement and the counter starting at zero
pub fn sign(
    digest: &H256,
    private_key: &PrivateKey,
    chain_id: ChainId,
) -> Result<Signature, CryptoError> {
    sign_with(digest, private_key, chain_id, SignOptions::default())
}

/// Sign `digest`, retrying with an incremented counter until a candidate is accepted
pub fn sign_with(
    digest: &H256,
    private_key: &PrivateKey,
    chain_id: ChainId,
    options: SignOptions,
) -> Result<Signature, CryptoError> {
    let secret: Zeroizing<[u8; 32]> = Zeroizing::new(private_key.to_bytes().into());
    let d: Scalar = **private_key.as_nonzero_scalar();
    let z = <Scalar as Reduce<k256::U256>>::reduce_bytes(&FieldBytes::from(*digest.as_bytes()));

    for counter in options.k_counter..=u8::MAX {
        match attempt(digest, &secret, &d, &z, counter, options.eip2) {
            Ok((r, s, parity)) => {
                let v_int = eip155_base(chain_id) + parity as u128;
                let v = trim_leading_zeros(&v_int.to_be_bytes()).to_vec();
                return Ok(Signature { r, s, v });
            }
            Err(reason) => {
                debug!(counter, reason, "rejected signing nonce");
            }
        }
    }
    Err(CryptoError::SigningExhausted)
}

/// One pass of the engine. `Err` carries the rejection reason.
fn attempt(
    digest: &H256,
    secret: &[u8; 32],
    d: &Scalar,
    z: &Scalar,
    counter: u8,
    eip2: bool,
) -> Result<([u8; 32], [u8; 32], bool), &'static str> {
    let k_hash = Zeroizing::new(
        keccak256_parts(&[&digest.as_bytes()[..], &secret[..], &[counter][..]]).into_bytes(),
    );
    let k = <Scalar as Reduce<k256::U256>>::reduce_bytes(&FieldBytes::from(*k_hash));
    let k_inv = Option::<Scalar>::from(k.invert()).ok_or("nonce is not invertible")?;

    let point = AffinePoint::from(ProjectivePoint::GENERATOR * k);
    let x: [u8; 32] = point.x().into();
    if compare_bytes(&x, &SECP256K1_P_MINUS_N) == Ordering::Less {
        return Err("x below p - n");
    }
    // r must equal x exactly, so the recovery id never needs the overflow bit
    let r = Option::<Scalar>::from(Scalar::from_repr(x.into())).ok_or("x not below n")?;
    let parity = bool::from(point.y_is_odd());

    let s = k_inv * (*z + r * d);
    if s == Scalar::ZERO {
        return Err("s is zero");
    }
    if eip2 && bool::from(s.is_high()) {
        return Err("s above n/2");
    }
    Ok((x, s.to_bytes().into(), parity))
}

/// Verify a signature against a message hash and public key
pub fn verify(
    message_hash: &H256,
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<bool, CryptoError> {
    // Reject non-low-s signatures per EIP-2
    if !signature.is_low_s() {
        return Ok(false);
    }

    let k256_sig = to_k256(signature)?;

    use k256::ecdsa::signature::hazmat::PrehashVerifier;
    Ok(public_key
        .verify_prehash(message_hash.as_bytes(), &k256_sig)
        .is_ok())
}

/// Recover the signer's public key; `chain_id` is needed to read `v`
pub fn recover_public_key(
    message_hash: &H256,
    signature: &Signature,
    chain_id: ChainId,
) -> Result<PublicKey, CryptoError> {
    let mut k256_sig = to_k256(signature)?;
    let mut id = signature.recovery_id(chain_id)?;
    // k256 only accepts low-s; (r, n - s) recovers the same key with flipped parity
    if let Some(normalized) = k256_sig.normalize_s() {
        k256_sig = normalized;
        id ^= 1;
    }
    let recovery_id =
        RecoveryId::from_byte(id).ok_or(CryptoError::InvalidRecoveryId(id as u128))?;

    VerifyingKey::recover_from_prehash(message_hash.as_bytes(), &k256_sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))
}

fn to_k256(signature: &Signature) -> Result<K256Signature, CryptoError> {
    let r: FieldBytes = signature.r.into();
    let s: FieldBytes = signature.s.into();
    K256Signature::from_scalars(r, s).map_err(|e| CryptoError::InvalidSignature(e.to_string()))
}

/// Derive Ethereum address from public key
pub fn public_key_to_address(public_key: &PublicKey) -> Address {
    // 0x04 || x || y
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);

    let mut addr_bytes = [0u8; 20];
    addr_bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(addr_bytes)
}

/// Address controlled by `private_key`
pub fn private_key_to_address(private_key: &PrivateKey) -> Address {
    public_key_to_address(private_key.verifying_key())
}
