use serde::{Deserialize, Serialize};

/// Per-token configuration read by the mint gates.
///
/// A gate takes one consistent snapshot of this value at the start of an
/// attempt; concurrent reconfiguration is never observable mid-attempt.
/// The default value (inactive, no URI, zero price, unlimited supply)
/// stands in for tokens that were never configured - such tokens fail the
/// activation precondition before anything else is looked at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Unsigned-path mint price in the smallest currency unit.
    pub price: u128,
    /// Whether minting is currently open.
    pub minting_active: bool,
    /// Metadata URI; minting is refused until one is set.
    pub uri: Option<String>,
    /// Maximum number of mints, `None` for unlimited.
    pub max_supply: Option<u64>,
}

impl TokenConfig {
    pub(crate) fn uri_is_set(&self) -> bool {
        self.uri.as_deref().is_some_and(|uri| !uri.is_empty())
    }
}
