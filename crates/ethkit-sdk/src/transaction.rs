//! Legacy (EIP-155) transactions

use bytes::Bytes;
use ethkit_crypto::{
    keccak256, public_key_to_address, recover_public_key, sign, PrivateKey, Signature,
};
use ethkit_primitives::hexstr;
use ethkit_primitives::int::trim_leading_zeros;
use ethkit_primitives::{Address, ChainId, H256, U256};
use ethkit_rlp::{decode, encode, RlpError, RlpValue};
use tracing::debug;

use crate::SdkError;

/// Unsigned legacy transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Sender nonce
    pub nonce: u64,
    /// Gas price in wei
    pub gas_price: U256,
    /// Gas limit
    pub gas_limit: u64,
    /// Recipient address (None for contract creation)
    pub to: Option<Address>,
    /// Value to transfer in wei
    pub value: U256,
    /// Input data
    pub data: Bytes,
    /// Chain the signature commits to
    pub chain_id: ChainId,
}

impl Transaction {
    /// True when this deploys a contract
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    fn fields(&self) -> Vec<RlpValue> {
        vec![
            self.nonce.into(),
            self.gas_price.into(),
            self.gas_limit.into(),
            self.to.map(RlpValue::from).unwrap_or_else(RlpValue::empty),
            self.value.into(),
            self.data.as_ref().into(),
        ]
    }

    /// `[nonce, gasPrice, gasLimit, to, value, data, chainId, "", ""]`
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut fields = self.fields();
        fields.push(self.chain_id.into());
        fields.push(RlpValue::empty());
        fields.push(RlpValue::empty());
        encode(&RlpValue::List(fields))
    }

    /// Keccak-256 of the signing payload
    pub fn signing_hash(&self) -> H256 {
        keccak256(&self.signing_payload())
    }

    /// Sign and serialize for `eth_sendRawTransaction`
    pub fn sign(&self, private_key: &PrivateKey) -> Result<SignedTransaction, SdkError> {
        if self.chain_id == 0 {
            return Err(SdkError::InvalidChainId(0));
        }
        let signature = sign(&self.signing_hash(), private_key, self.chain_id)?;

        let mut fields = self.fields();
        fields.push(trim_leading_zeros(&signature.v).into());
        fields.push(trim_leading_zeros(&signature.r).into());
        fields.push(trim_leading_zeros(&signature.s).into());
        let raw = encode(&RlpValue::List(fields));
        let hash = keccak256(&raw);
        debug!(hash = %hash, nonce = self.nonce, chain_id = self.chain_id, "signed transaction");

        Ok(SignedTransaction {
            tx: self.clone(),
            raw: raw.into(),
            hash,
            signature,
        })
    }
}

/// Signed transaction ready for broadcast
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    /// The transaction that was signed
    pub tx: Transaction,
    /// RLP of the nine signed fields
    pub raw: Bytes,
    /// Keccak-256 of `raw`
    pub hash: H256,
    /// Signature over the signing hash
    pub signature: Signature,
}

impl SignedTransaction {
    /// `raw` as `0x…` hex
    pub fn raw_hex(&self) -> String {
        hexstr::encode_bytes(&self.raw)
    }

    /// Parse raw bytes produced by [`Transaction::sign`] or any EIP-155 signer
    pub fn decode(raw: &[u8]) -> Result<Self, SdkError> {
        let item = decode(raw)?;
        let fields = item.as_list().ok_or(RlpError::ExpectedList)?;
        let [nonce, gas_price, gas_limit, to, value, data, v, r, s] = fields else {
            return Err(SdkError::MissingField("signed transaction fields"));
        };

        let to = match to.as_bytes() {
            Some([]) => None,
            _ => Some(to.to_address()?),
        };
        let data = data.as_bytes().ok_or(RlpError::ExpectedBytes)?;
        let v_bytes = v.as_bytes().ok_or(RlpError::ExpectedBytes)?.to_vec();
        let v_value = v.to_u256()?;
        if v_value < U256::from(37u64) {
            return Err(SdkError::InvalidChainId(0));
        }
        let chain_id = (v_value - U256::from(35u64)) / U256::from(2u64);
        if chain_id.bits() > 64 {
            return Err(RlpError::InvalidInteger("chain id").into());
        }

        let tx = Transaction {
            nonce: nonce.to_u64()?,
            gas_price: gas_price.to_u256()?,
            gas_limit: gas_limit.to_u64()?,
            to,
            value: value.to_u256()?,
            data: Bytes::copy_from_slice(data),
            chain_id: chain_id.low_u64(),
        };
        let signature = Signature::new(word(r)?, word(s)?, v_bytes);

        Ok(SignedTransaction {
            tx,
            raw: Bytes::copy_from_slice(raw),
            hash: keccak256(raw),
            signature,
        })
    }

    /// Recover the address that signed this transaction
    pub fn sender(&self) -> Result<Address, SdkError> {
        let public_key =
            recover_public_key(&self.tx.signing_hash(), &self.signature, self.tx.chain_id)?;
        Ok(public_key_to_address(&public_key))
    }
}

/// A stripped `r`/`s` integer widened back to 32 bytes
fn word(item: &RlpValue) -> Result<[u8; 32], SdkError> {
    let value = item.to_u256()?;
    let mut out = [0u8; 32];
    value.to_big_endian(&mut out);
    Ok(out)
}
