use mintpass_signature::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The set of identities currently empowered to issue valid grants.
///
/// Membership is the *only* source of trust: a cryptographically valid
/// signature from a non-member is treated exactly like a forged one. An
/// empty registry fails every signed redemption by design; owners must
/// seed at least one signer (commonly themselves).
///
/// The registry is a plain value owned by its resource aggregate and
/// passed by reference into verification - not a hidden singleton. Owner
/// gating of mutations lives on the aggregates ([`crate::Collection`],
/// [`crate::Edition`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerRegistry {
    signers: HashSet<Address>,
}

impl SignerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a signer. Idempotent: adding an existing member is a no-op.
    pub fn insert(&mut self, signer: Address) {
        self.signers.insert(signer);
    }

    /// Remove a signer. Idempotent: removing an absent member is a no-op.
    ///
    /// Removal immediately invalidates every previously issued but not yet
    /// redeemed signature from that identity.
    pub fn remove(&mut self, signer: &Address) {
        self.signers.remove(signer);
    }

    /// O(1) membership probe; callable by anyone, no side effects.
    pub fn contains(&self, signer: &Address) -> bool {
        self.signers.contains(signer)
    }

    /// Number of registered signers.
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// Whether the registry has no members.
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}
