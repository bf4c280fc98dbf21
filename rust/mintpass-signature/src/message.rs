use crate::{ADDRESS_SIZE, Address, INSTANCE_ID_SIZE, InstanceId};
use sha2::{Digest, Sha256};

/// Canonical byte length of a [`MintMessage::TokenGrant`].
pub const TOKEN_GRANT_SIZE: usize = INSTANCE_ID_SIZE + ADDRESS_SIZE + 8 + 16;

/// Canonical byte length of a [`MintMessage::EditionGrant`].
pub const EDITION_GRANT_SIZE: usize = INSTANCE_ID_SIZE + ADDRESS_SIZE + 8;

/// A mint authorization request, canonicalized before signing.
///
/// Field order and widths are part of the protocol: the off-chain issuing
/// side and the verifying side must produce byte-identical encodings, or
/// signatures will recover the wrong identity and always be rejected.
/// Values exist only transiently to produce canonical bytes; nothing about
/// the encoding depends on any collection's iteration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MintMessage {
    /// Multi-token family: binds recipient, token and the issuer's price.
    ///
    /// The price the issuer signs is authoritative at redemption for this
    /// family; it may legitimately differ from the configured price (for
    /// example a discounted allowlist grant).
    TokenGrant {
        /// The deployment this grant is valid for.
        instance: InstanceId,
        /// The identity the grant was issued to.
        recipient: Address,
        /// The token the grant permits minting.
        token_id: u64,
        /// The price, in the smallest currency unit, the issuer signed.
        price: u128,
    },

    /// Single-token family: binds recipient and a balance-derived nonce.
    ///
    /// The nonce is the recipient's balance at issuance time, so each
    /// successive grant for the same recipient is a distinct message.
    EditionGrant {
        /// The deployment this grant is valid for.
        instance: InstanceId,
        /// The identity the grant was issued to.
        recipient: Address,
        /// The recipient's balance at issuance time.
        nonce: u64,
    },
}

impl MintMessage {
    /// Construct a multi-token grant message.
    pub const fn token_grant(
        instance: InstanceId,
        recipient: Address,
        token_id: u64,
        price: u128,
    ) -> Self {
        MintMessage::TokenGrant {
            instance,
            recipient,
            token_id,
            price,
        }
    }

    /// Construct a single-token grant message.
    pub const fn edition_grant(instance: InstanceId, recipient: Address, nonce: u64) -> Self {
        MintMessage::EditionGrant {
            instance,
            recipient,
            nonce,
        }
    }

    /// The canonical fixed-order, fixed-width, big-endian encoding.
    ///
    /// Injective over the field tuple: any two messages that differ in any
    /// field encode to different bytes, and the two grant shapes have
    /// distinct lengths so they cannot collide with each other.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            MintMessage::TokenGrant {
                instance,
                recipient,
                token_id,
                price,
            } => {
                let mut bytes = Vec::with_capacity(TOKEN_GRANT_SIZE);
                bytes.extend_from_slice(instance.as_bytes());
                bytes.extend_from_slice(recipient.as_bytes());
                bytes.extend_from_slice(&token_id.to_be_bytes());
                bytes.extend_from_slice(&price.to_be_bytes());
                bytes
            }
            MintMessage::EditionGrant {
                instance,
                recipient,
                nonce,
            } => {
                let mut bytes = Vec::with_capacity(EDITION_GRANT_SIZE);
                bytes.extend_from_slice(instance.as_bytes());
                bytes.extend_from_slice(recipient.as_bytes());
                bytes.extend_from_slice(&nonce.to_be_bytes());
                bytes
            }
        }
    }

    /// SHA-256 digest of the canonical encoding; the value actually signed
    /// and recovered against.
    pub fn digest(&self) -> [u8; 32] {
        Sha256::digest(self.to_bytes()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> MintMessage {
        MintMessage::token_grant(
            InstanceId::derive("test/instance"),
            Address::new([1u8; ADDRESS_SIZE]),
            7,
            250_000,
        )
    }

    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(fixture().to_bytes(), fixture().to_bytes());
        assert_eq!(fixture().digest(), fixture().digest());
    }

    #[test]
    fn test_encoding_has_fixed_width() {
        assert_eq!(fixture().to_bytes().len(), TOKEN_GRANT_SIZE);

        let edition = MintMessage::edition_grant(
            InstanceId::derive("test/instance"),
            Address::new([1u8; ADDRESS_SIZE]),
            0,
        );
        assert_eq!(edition.to_bytes().len(), EDITION_GRANT_SIZE);
    }

    #[test]
    fn test_every_field_reaches_the_encoding() {
        let base = fixture();

        let other_instance = MintMessage::token_grant(
            InstanceId::derive("other/instance"),
            Address::new([1u8; ADDRESS_SIZE]),
            7,
            250_000,
        );
        let other_recipient = MintMessage::token_grant(
            InstanceId::derive("test/instance"),
            Address::new([2u8; ADDRESS_SIZE]),
            7,
            250_000,
        );
        let other_token = MintMessage::token_grant(
            InstanceId::derive("test/instance"),
            Address::new([1u8; ADDRESS_SIZE]),
            8,
            250_000,
        );
        let other_price = MintMessage::token_grant(
            InstanceId::derive("test/instance"),
            Address::new([1u8; ADDRESS_SIZE]),
            7,
            250_001,
        );

        for other in [other_instance, other_recipient, other_token, other_price] {
            assert_ne!(base.to_bytes(), other.to_bytes());
        }
    }

    #[test]
    fn test_field_boundaries_do_not_bleed() {
        // A token id that "borrows" bytes from the price field must still
        // produce a distinct encoding.
        let instance = InstanceId::derive("test/instance");
        let recipient = Address::new([0u8; ADDRESS_SIZE]);
        let one = MintMessage::token_grant(instance, recipient, 0x01, 0);
        let two = MintMessage::token_grant(instance, recipient, 0, 0x01 << 120);
        assert_ne!(one.to_bytes(), two.to_bytes());
    }

    #[test]
    fn test_grant_shapes_cannot_collide() {
        let instance = InstanceId::derive("test/instance");
        let recipient = Address::new([3u8; ADDRESS_SIZE]);
        let token = MintMessage::token_grant(instance, recipient, 0, 0);
        let edition = MintMessage::edition_grant(instance, recipient, 0);
        assert_ne!(token.to_bytes().len(), edition.to_bytes().len());
        assert_ne!(token.digest(), edition.digest());
    }
}
