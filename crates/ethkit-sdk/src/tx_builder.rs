//! Transaction builder

use bytes::Bytes;
use ethkit_primitives::{Address, ChainId, U256};

use crate::transaction::{SignedTransaction, Transaction};
use crate::{SdkError, Wallet};

/// Transaction builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct TxBuilder {
    chain_id: ChainId,
    nonce: Option<u64>,
    gas_limit: Option<u64>,
    gas_price: Option<U256>,
    to: Option<Address>,
    value: U256,
    data: Bytes,
}

impl TxBuilder {
    /// Create a new transaction builder
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            ..Default::default()
        }
    }

    /// Set the nonce
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Set the gas limit
    pub fn gas_limit(mut self, limit: u64) -> Self {
        self.gas_limit = Some(limit);
        self
    }

    /// Set the gas price in wei
    pub fn gas_price(mut self, price: impl Into<U256>) -> Self {
        self.gas_price = Some(price.into());
        self
    }

    /// Set the recipient address; leave unset to deploy a contract
    pub fn to(mut self, address: Address) -> Self {
        self.to = Some(address);
        self
    }

    /// Set the value to transfer (in wei)
    pub fn value(mut self, value: impl Into<U256>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the input data
    pub fn data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = data.into();
        self
    }

    /// Build the unsigned transaction
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (nonce, gas_limit, gas_price)
    /// - Chain ID is 0
    pub fn build(&self) -> Result<Transaction, SdkError> {
        if self.chain_id == 0 {
            return Err(SdkError::InvalidChainId(0));
        }
        let nonce = self.nonce.ok_or(SdkError::MissingField("nonce"))?;
        let gas_limit = self.gas_limit.ok_or(SdkError::MissingField("gas_limit"))?;
        let gas_price = self.gas_price.ok_or(SdkError::MissingField("gas_price"))?;

        Ok(Transaction {
            nonce,
            gas_price,
            gas_limit,
            to: self.to,
            value: self.value,
            data: self.data.clone(),
            chain_id: self.chain_id,
        })
    }

    /// Build and sign with `wallet`
    pub fn sign(&self, wallet: &Wallet) -> Result<SignedTransaction, SdkError> {
        let tx = self.build()?;
        wallet.sign_transaction(&tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{ether, gwei};

    fn test_wallet() -> Wallet {
        Wallet::from_private_key_hex(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap()
    }

    fn recipient() -> Address {
        Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap()
    }

    #[test]
    fn test_tx_builder_build() {
        let tx = TxBuilder::new(1)
            .nonce(0)
            .gas_limit(21000)
            .gas_price(gwei(1))
            .to(recipient())
            .value(ether(1))
            .build()
            .unwrap();

        assert_eq!(tx.nonce, 0);
        assert_eq!(tx.gas_limit, 21000);
        assert_eq!(tx.gas_price, U256::from(1_000_000_000u64));
        assert_eq!(tx.to, Some(recipient()));
        assert_eq!(tx.value, ether(1));
        assert_eq!(tx.chain_id, 1);
    }

    #[test]
    fn test_tx_builder_missing_fields() {
        let result = TxBuilder::new(1).gas_limit(21000).gas_price(1u64).build();
        assert!(matches!(result, Err(SdkError::MissingField("nonce"))));

        let result = TxBuilder::new(1).nonce(0).gas_limit(21000).build();
        assert!(matches!(result, Err(SdkError::MissingField("gas_price"))));
    }

    #[test]
    fn test_tx_builder_sign_recovers_sender() {
        let wallet = test_wallet();
        let signed = TxBuilder::new(1)
            .nonce(0)
            .gas_limit(21000)
            .gas_price(gwei(1))
            .to(recipient())
            .value(ether(1))
            .sign(&wallet)
            .unwrap();

        assert!(signed.signature.is_low_s());
        assert_eq!(signed.tx.nonce, 0);
        assert_eq!(&signed.sender().unwrap(), wallet.address());
    }

    #[test]
    fn test_tx_builder_contract_creation() {
        let signed = TxBuilder::new(1)
            .nonce(0)
            .gas_limit(1_000_000)
            .gas_price(gwei(1))
            .data(vec![0x60u8, 0x80, 0x60, 0x40])
            .sign(&test_wallet())
            .unwrap();

        assert!(signed.tx.is_contract_creation());
    }

    #[test]
    fn test_tx_builder_rejects_zero_chain_id() {
        let result = TxBuilder::new(0)
            .nonce(0)
            .gas_limit(21000)
            .gas_price(gwei(1))
            .to(recipient())
            .sign(&test_wallet());

        let err = result.unwrap_err();
        assert!(err.to_string().contains("chain ID"));
    }
}
