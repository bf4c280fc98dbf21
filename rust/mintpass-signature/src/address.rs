use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The size of an [`Address`] in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// A 20-byte identity for owners, issuers, recipients and callers.
///
/// Derived from a secp256k1 verifying key as the trailing [`ADDRESS_SIZE`]
/// bytes of the SHA-256 digest of the uncompressed SEC1 point (without the
/// leading `0x04` tag). The derivation is part of the protocol: the
/// identity a verifier recovers from a signature must match the identity
/// the registry was seeded with.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// Construct an [`Address`] from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Address(bytes)
    }

    /// Derive the [`Address`] of a secp256k1 verifying key.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        // Skip the 0x04 uncompressed-point tag.
        let digest = Sha256::digest(&point.as_bytes()[1..]);
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes.copy_from_slice(&digest[digest.len() - ADDRESS_SIZE..]);
        Address(bytes)
    }

    /// The raw bytes of this address.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
