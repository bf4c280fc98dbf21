use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The size of an [`InstanceId`] in bytes.
pub const INSTANCE_ID_SIZE: usize = 32;

/// Opaque binding to one deployed instance of the authorization scheme.
///
/// Every canonical message includes the instance id, so a signature issued
/// for one deployment can never be replayed against an otherwise identical
/// deployment: the recovered identity will not match any registered signer
/// there.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct InstanceId([u8; INSTANCE_ID_SIZE]);

impl InstanceId {
    /// Construct an [`InstanceId`] from raw bytes.
    pub const fn new(bytes: [u8; INSTANCE_ID_SIZE]) -> Self {
        InstanceId(bytes)
    }

    /// Derive an [`InstanceId`] from a human-readable deployment label.
    pub fn derive(label: &str) -> Self {
        InstanceId(Sha256::digest(label.as_bytes()).into())
    }

    /// The raw bytes of this instance id.
    pub const fn as_bytes(&self) -> &[u8; INSTANCE_ID_SIZE] {
        &self.0
    }
}

impl From<[u8; INSTANCE_ID_SIZE]> for InstanceId {
    fn from(bytes: [u8; INSTANCE_ID_SIZE]) -> Self {
        InstanceId(bytes)
    }
}

impl AsRef<[u8]> for InstanceId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        assert_eq!(InstanceId::derive("mainnet/1"), InstanceId::derive("mainnet/1"));
        assert_ne!(InstanceId::derive("mainnet/1"), InstanceId::derive("mainnet/2"));
    }
}
