#![warn(missing_docs)]

//! Signature-layer primitives for mint authorizations.
//!
//! This crate is the leaf of the mintpass workspace: it defines the
//! identities involved in an authorization ([`Address`], [`InstanceId`]),
//! the canonical message layout that both sides of the protocol must
//! reproduce byte-for-byte ([`MintMessage`]), and the recoverable
//! secp256k1 signatures that bind them together ([`RecoverableSignature`],
//! [`IssuerKey`]).
//!
//! The verifying side never learns a public key out of band; the signing
//! identity is *recovered* from the signature and the canonical digest,
//! then checked against a registry by the gate crate.

mod error;
pub use error::*;

mod address;
pub use address::*;

mod instance;
pub use instance::*;

mod message;
pub use message::*;

mod signature;
pub use signature::*;

mod issuer;
pub use issuer::*;
