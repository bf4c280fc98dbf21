#![warn(missing_docs)]

//! Signature-gated minting.
//!
//! This crate grants permission to perform a one-time mint of a scarce
//! token to holders of an off-chain issued authorization, alongside an
//! unsigned price-gated path. Trust rests on three pieces:
//!
//! - a deterministic canonical message (from `mintpass-signature`) that
//!   binds issuer context, recipient, token and price,
//! - a [`SignerRegistry`] of identities empowered to issue grants, and
//! - a [`ConsumptionLedger`] that records every redeemed grant forever.
//!
//! Two resource families are provided. [`Collection`] is the multi-token
//! family: one configuration per token id, one mint per wallet, and the
//! *signed* price is authoritative at redemption. [`Edition`] is the
//! single-token family: grants bind the recipient's balance as a nonce,
//! repeat mints are legitimate, and the *configured* price is
//! authoritative.
//!
//! # Quick example
//!
//! ```rust
//! use mintpass_gate::{Authorization, Collection, InstanceId, IssuerKey, MintMessage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let owner = IssuerKey::import(&[1u8; 32])?;
//! let collection = Collection::new(InstanceId::derive("docs/example"), owner.address());
//!
//! collection.add_signer(owner.address(), owner.address())?;
//! collection.set_token_uri(owner.address(), 7, "ipfs://example")?;
//! collection.set_minting_active(owner.address(), 7, true)?;
//!
//! // Off-chain: the owner issues a free grant for a recipient.
//! let recipient = IssuerKey::import(&[2u8; 32])?.address();
//! let grant = MintMessage::token_grant(*collection.instance(), recipient, 7, 0);
//! let signature = owner.sign(&grant)?;
//!
//! // The recipient redeems it once; a second attempt is a replay.
//! let minted = collection.mint(recipient, 7, Authorization::Signed(signature), 0)?;
//! assert_eq!(minted.issuer, Some(owner.address()));
//! assert!(collection.mint(recipient, 7, Authorization::Signed(signature), 0).is_err());
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::*;

mod registry;
pub use registry::*;

mod ledger;
pub use ledger::*;

mod verify;
pub use verify::*;

mod config;
pub use config::*;

mod collection;
pub use collection::*;

mod edition;
pub use edition::*;

mod signature;
pub use signature::*;
