//! Signature verification against the signer registry.

use crate::{MintpassGateError, SignerRegistry};
use mintpass_signature::{Address, MintMessage, RecoverableSignature};

/// Recover the identity that signed `message` and require registry
/// membership.
///
/// Every failure collapses to [`MintpassGateError::BadSignature`]: a
/// structurally broken signature, a well-formed signature over a different
/// message, and a valid signature from an unregistered identity are
/// indistinguishable to the caller. This function is only reached on the
/// signed path; the empty-signature sentinel is dispatched before any
/// recovery is attempted.
pub fn verify(
    message: &MintMessage,
    signature: &RecoverableSignature,
    registry: &SignerRegistry,
) -> Result<Address, MintpassGateError> {
    let issuer = signature.recover(message).map_err(|error| {
        tracing::debug!(%error, "signature recovery failed");
        MintpassGateError::BadSignature
    })?;

    if !registry.contains(&issuer) {
        tracing::debug!(%issuer, "recovered identity is not a registered signer");
        return Err(MintpassGateError::BadSignature);
    }

    Ok(issuer)
}
