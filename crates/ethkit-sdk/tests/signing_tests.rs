//! Signing and verification tests for ethkit-sdk
//!
//! Tests message signing, transaction signing, recovery and EIP-155 replay protection.

use ethkit_crypto::{public_key_to_address, recover_public_key, verify, CryptoError};
use ethkit_sdk::{units, Address, SdkError, SignedTransaction, TxBuilder, Wallet, H256, U256};

const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// secp256k1 group order
const CURVE_ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

fn hardhat_wallet() -> Wallet {
    Wallet::from_private_key_hex(HARDHAT_KEY).unwrap()
}

fn recipient() -> Address {
    Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap()
}

fn transfer(chain_id: u64, nonce: u64) -> TxBuilder {
    TxBuilder::new(chain_id)
        .nonce(nonce)
        .gas_limit(21000)
        .gas_price(units::gwei(20))
        .to(recipient())
        .value(units::ether(1))
}

/// `n - s`, the malleable twin of a low-s value
fn flip_s(s: &[u8; 32]) -> [u8; 32] {
    let n = U256::from_big_endian(&hex::decode(CURVE_ORDER).unwrap());
    let mut out = [0u8; 32];
    (n - U256::from_big_endian(s)).to_big_endian(&mut out);
    out
}

// ==================== Message Signing Tests ====================

#[test]
fn test_sign_hash_components() {
    let wallet = Wallet::new_random();
    let hash = H256::from_bytes([0x42; 32]);
    let signature = wallet.sign_hash(&hash, 1).unwrap();
    assert_ne!(signature.r, [0u8; 32]);
    assert_ne!(signature.s, [0u8; 32]);
    assert!(signature.is_low_s());
}

#[test]
fn test_sign_v_carries_chain_id() {
    let wallet = Wallet::new_random();
    let hash = H256::from_bytes([0x42; 32]);

    let v = wallet.sign_hash(&hash, 1).unwrap().v_value().unwrap();
    assert!(v == 37 || v == 38);

    let v = wallet.sign_hash(&hash, 11155111).unwrap().v_value().unwrap();
    assert!(v == 22310257 || v == 22310258);
}

#[test]
fn test_sign_hash_deterministic() {
    let wallet = hardhat_wallet();
    let hash = H256::from_bytes([0x07; 32]);
    assert_eq!(wallet.sign_hash(&hash, 1).unwrap(), wallet.sign_hash(&hash, 1).unwrap());
}

#[test]
fn test_sign_message_differs_from_raw_hash() {
    let wallet = hardhat_wallet();
    let message = b"hello ethkit";
    let prefixed = wallet.sign_message(message, 1).unwrap();
    let raw = wallet.sign_hash(&ethkit_crypto::keccak256(message), 1).unwrap();
    assert_ne!(prefixed.r, raw.r);
}

#[test]
fn test_sign_empty_and_large_message() {
    let wallet = Wallet::new_random();
    assert!(wallet.sign_message(b"", 1).is_ok());
    assert!(wallet.sign_message(&vec![0xab; 100_000], 1).is_ok());
}

// ==================== Verification Tests ====================

#[test]
fn test_verify_signature() {
    let wallet = Wallet::new_random();
    let hash = H256::from_bytes([0x11; 32]);
    let signature = wallet.sign_hash(&hash, 1).unwrap();
    assert!(verify(&hash, &signature, wallet.public_key()).unwrap());
}

#[test]
fn test_verify_wrong_hash_or_key() {
    let wallet = Wallet::new_random();
    let other = Wallet::new_random();
    let hash = H256::from_bytes([0x11; 32]);
    let signature = wallet.sign_hash(&hash, 1).unwrap();

    assert!(!verify(&H256::from_bytes([0x12; 32]), &signature, wallet.public_key()).unwrap());
    assert!(!verify(&hash, &signature, other.public_key()).unwrap());
}

#[test]
fn test_verify_rejects_high_s() {
    let wallet = hardhat_wallet();
    let hash = H256::from_bytes([0x33; 32]);
    let mut signature = wallet.sign_hash(&hash, 1).unwrap();
    signature.s = flip_s(&signature.s);

    assert!(!signature.is_low_s());
    assert!(!verify(&hash, &signature, wallet.public_key()).unwrap());
}

#[test]
fn test_verify_tampered_signature() {
    let wallet = Wallet::new_random();
    let hash = H256::from_bytes([0x55; 32]);
    let mut signature = wallet.sign_hash(&hash, 1).unwrap();
    signature.r[31] ^= 0x01;
    // Either the scalar is rejected outright or it fails verification
    assert!(!verify(&hash, &signature, wallet.public_key()).unwrap_or(false));
}

// ==================== Recovery Tests ====================

#[test]
fn test_recover_signer_address() {
    let wallet = hardhat_wallet();
    let hash = H256::from_bytes([0xaa; 32]);
    let signature = wallet.sign_hash(&hash, 137).unwrap();

    let public_key = recover_public_key(&hash, &signature, 137).unwrap();
    assert_eq!(&public_key_to_address(&public_key), wallet.address());
}

#[test]
fn test_recover_under_wrong_chain_fails() {
    let wallet = hardhat_wallet();
    let hash = H256::from_bytes([0xaa; 32]);
    let signature = wallet.sign_hash(&hash, 1).unwrap();

    let result = recover_public_key(&hash, &signature, 5);
    assert!(matches!(result, Err(CryptoError::InvalidRecoveryId(_))));
}

// ==================== Transaction Signing Tests ====================

#[test]
fn test_sign_transaction_recovers_sender() {
    let wallet = hardhat_wallet();
    let signed = transfer(1, 0).sign(&wallet).unwrap();
    assert_eq!(&signed.sender().unwrap(), wallet.address());
    assert!(signed.signature.is_low_s());
}

#[test]
fn test_sign_transaction_deterministic() {
    let wallet = hardhat_wallet();
    let first = transfer(1, 3).sign(&wallet).unwrap();
    let second = transfer(1, 3).sign(&wallet).unwrap();
    assert_eq!(first.raw, second.raw);
    assert_eq!(first.hash, second.hash);
}

#[test]
fn test_different_nonce_different_hash() {
    let wallet = hardhat_wallet();
    let first = transfer(1, 0).sign(&wallet).unwrap();
    let second = transfer(1, 1).sign(&wallet).unwrap();
    assert_ne!(first.hash, second.hash);
}

#[test]
fn test_raw_transaction_round_trip() {
    let wallet = hardhat_wallet();
    let signed = transfer(10, 9).sign(&wallet).unwrap();

    let decoded = SignedTransaction::decode(&signed.raw).unwrap();
    assert_eq!(decoded.tx, signed.tx);
    assert_eq!(decoded.signature, signed.signature);
    assert_eq!(decoded.hash, signed.hash);
    assert_eq!(&decoded.sender().unwrap(), wallet.address());
}

#[test]
fn test_contract_deployment_round_trip() {
    let wallet = hardhat_wallet();
    let signed = TxBuilder::new(1)
        .nonce(0)
        .gas_limit(500_000)
        .gas_price(units::gwei(1))
        .data(vec![0x60u8, 0x80, 0x60, 0x40, 0x52])
        .sign(&wallet)
        .unwrap();

    let decoded = SignedTransaction::decode(&signed.raw).unwrap();
    assert!(decoded.tx.is_contract_creation());
    assert_eq!(&decoded.tx.data[..], &[0x60u8, 0x80, 0x60, 0x40, 0x52][..]);
}

// ==================== Replay Protection Tests ====================

#[test]
fn test_same_transaction_differs_across_chains() {
    let wallet = hardhat_wallet();
    let mainnet = transfer(1, 0).sign(&wallet).unwrap();
    let goerli = transfer(5, 0).sign(&wallet).unwrap();
    assert_ne!(mainnet.raw, goerli.raw);
    assert_ne!(mainnet.signature.v, goerli.signature.v);
}

#[test]
fn test_replayed_signature_does_not_recover_sender() {
    let wallet = hardhat_wallet();
    let mut signed = transfer(1, 0).sign(&wallet).unwrap();
    signed.tx.chain_id = 5;
    assert!(signed.sender().is_err());
}

#[test]
fn test_zero_chain_id_rejected() {
    let result = transfer(0, 0).sign(&hardhat_wallet());
    assert!(matches!(result, Err(SdkError::InvalidChainId(0))));
}

#[test]
fn test_pre_eip155_raw_rejected() {
    // nonce 9 transfer signed with v = 27
    let raw = hex::decode(
        "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a7640000801b\
         a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276\
         a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83",
    )
    .unwrap();
    assert!(matches!(SignedTransaction::decode(&raw), Err(SdkError::InvalidChainId(0))));
}
