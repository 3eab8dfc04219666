//! Wallet and account management

use ethkit_crypto::{
    keccak256_parts, private_key_from_slice, private_key_to_address, sign, PrivateKey, PublicKey,
    Signature,
};
use ethkit_primitives::{Address, ChainId, Nonce, H256};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::transaction::{SignedTransaction, Transaction};
use crate::SdkError;

/// Holds one private key and the address it controls.
///
/// Not `Clone`; build a second wallet from the same bytes if a copy is
/// really needed. The key is zeroized on drop.
pub struct Wallet {
    private_key: PrivateKey,
    address: Address,
}

impl Wallet {
    /// Create a new random wallet
    pub fn new_random() -> Self {
        Self::from_key(SigningKey::random(&mut OsRng))
    }

    /// Create a wallet from a 32-byte private key
    pub fn from_private_key(key: &[u8]) -> Result<Self, SdkError> {
        Ok(Self::from_key(private_key_from_slice(key)?))
    }

    /// Create a wallet from a hex-encoded private key, with or without `0x`
    pub fn from_private_key_hex(key: &str) -> Result<Self, SdkError> {
        let digits = key.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);
        // the hex error would echo the input
        let bytes = Zeroizing::new(hex::decode(digits).map_err(|_| {
            SdkError::InvalidHex("private key is not valid hex".to_string())
        })?);
        Self::from_private_key(&bytes)
    }

    fn from_key(private_key: PrivateKey) -> Self {
        let address = private_key_to_address(&private_key);
        Self {
            private_key,
            address,
        }
    }

    /// Address controlled by this wallet
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Public key
    pub fn public_key(&self) -> &PublicKey {
        self.private_key.verifying_key()
    }

    /// Sign a 32-byte digest with an EIP-155 `v` for `chain_id`
    pub fn sign_hash(&self, hash: &H256, chain_id: ChainId) -> Result<Signature, SdkError> {
        self.check_signer()?;
        Ok(sign(hash, &self.private_key, chain_id)?)
    }

    /// Sign `message` under the `"\x19Ethereum Signed Message:\n{len}"` prefix
    pub fn sign_message(&self, message: &[u8], chain_id: ChainId) -> Result<Signature, SdkError> {
        let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
        let hash = keccak256_parts(&[prefix.as_bytes(), message]);
        self.sign_hash(&hash, chain_id)
    }

    /// Sign a legacy transaction
    pub fn sign_transaction(&self, tx: &Transaction) -> Result<SignedTransaction, SdkError> {
        self.check_signer()?;
        tx.sign(&self.private_key)
    }

    /// Address of the contract this wallet deploys at `nonce`
    pub fn contract_address(&self, nonce: Nonce) -> Address {
        ethkit_rlp::contract_address(&self.address, nonce)
    }

    fn check_signer(&self) -> Result<(), SdkError> {
        if self.address.is_zero() {
            return Err(SdkError::ZeroAddressSigner);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethkit_crypto::recover_public_key;
    use ethkit_crypto::public_key_to_address;

    const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const HARDHAT_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn test_wallet_random() {
        let wallet = Wallet::new_random();
        assert_ne!(wallet.address(), &Address::ZERO);
    }

    #[test]
    fn test_wallet_from_hex() {
        let wallet = Wallet::from_private_key_hex(HARDHAT_KEY).unwrap();
        assert_eq!(wallet.address().to_hex(), HARDHAT_ADDRESS);

        let wallet = Wallet::from_private_key_hex(&HARDHAT_KEY[2..]).unwrap();
        assert_eq!(wallet.address().to_hex(), HARDHAT_ADDRESS);
    }

    #[test]
    fn test_wallet_rejects_bad_keys() {
        assert!(Wallet::from_private_key_hex("0x1234").is_err());
        assert!(Wallet::from_private_key_hex("0xzz").is_err());
        assert!(matches!(
            Wallet::from_private_key(&[0u8; 32]),
            Err(SdkError::Crypto(_))
        ));
        assert!(Wallet::from_private_key(&[0xffu8; 32]).is_err());
    }

    #[test]
    fn test_wallet_sign_hash_recovers() {
        let wallet = Wallet::from_private_key_hex(HARDHAT_KEY).unwrap();
        let hash = H256::from_bytes([0x42; 32]);
        let signature = wallet.sign_hash(&hash, 1).unwrap();

        let v = signature.v_value().unwrap();
        assert!(v == 37 || v == 38);
        let key = recover_public_key(&hash, &signature, 1).unwrap();
        assert_eq!(&public_key_to_address(&key), wallet.address());
    }

    #[test]
    fn test_wallet_sign_message() {
        let wallet = Wallet::new_random();
        let a = wallet.sign_message(b"hello", 1).unwrap();
        let b = wallet.sign_message(b"hello", 1).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, wallet.sign_message(b"hello!", 1).unwrap());
    }

    #[test]
    fn test_wallet_contract_address() {
        let wallet = Wallet::from_private_key_hex(HARDHAT_KEY).unwrap();
        // first deployment from the default hardhat account
        assert_eq!(
            wallet.contract_address(0).to_hex(),
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
    }

    #[test]
    fn test_wallet_debug_hides_key() {
        let wallet = Wallet::new_random();
        let debug = format!("{:?}", wallet);
        assert!(debug.contains("address"));
        assert!(!debug.contains("private_key"));
    }
}
