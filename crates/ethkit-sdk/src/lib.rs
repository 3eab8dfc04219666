//! # ethkit-sdk
//!
//! Client toolkit for Ethereum-compatible chains.
//!
//! ## Features
//!
//! - **Client / BlockingClient**: JSON-RPC client over a pluggable transport
//! - **Wallet**: key handling and signing
//! - **TxBuilder / Transaction**: legacy EIP-155 transactions
//! - **Contract**: function descriptors and call encoding
//! - **ABI**: Solidity ABI encoding and decoding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ethkit_sdk::{units, Client, TxBuilder, Wallet};
//! use ethkit_sdk::types::BlockId;
//! use ethkit_primitives::Address;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new_mock();
//!     let wallet = Wallet::new_random();
//!
//!     let nonce = client.get_transaction_count(wallet.address(), BlockId::Pending).await?;
//!     let to = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d")?;
//!     let tx = TxBuilder::new(client.chain_id().await?)
//!         .nonce(nonce)
//!         .gas_limit(21000)
//!         .gas_price(units::gwei(1))
//!         .to(to)
//!         .value(units::ether(1))
//!         .sign(&wallet)?;
//!
//!     let hash = client.send_transaction(&tx).await?;
//!     println!("sent {}", hash);
//!     Ok(())
//! }
//! ```
//!
//! ## Contract Interaction
//!
//! ```rust,no_run
//! use ethkit_sdk::{contract, abi::AbiValue, Client};
//! use ethkit_sdk::types::BlockId;
//! use ethkit_primitives::Address;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new_mock();
//!     let token = Address::from_hex("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")?;
//!     let usdc = contract::erc20(token);
//!
//!     let owner = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d")?;
//!     let balance_of = usdc.function("balanceOf").expect("erc20 has balanceOf");
//!     let values = client
//!         .call_function(token, balance_of, &[AbiValue::Address(owner)], BlockId::Latest)
//!         .await?;
//!     println!("balance: {:?}", values[0]);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod client;
mod config;
pub mod contract;
mod error;
mod transaction;
mod transport;
mod tx_builder;
pub mod types;
pub mod units;
mod wallet;

pub use client::{BlockingClient, Client};
pub use config::ClientConfig;
pub use error::SdkError;
pub use transaction::{SignedTransaction, Transaction};
pub use transport::{MockTransport, Transport};
pub use tx_builder::TxBuilder;
pub use wallet::Wallet;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives for convenience
pub use ethkit_primitives::{Address, ChainId, Nonce, H256, U256};
