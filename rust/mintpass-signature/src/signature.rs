use crate::{Address, MintMessage, MintpassSignatureError};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;

/// The size of a [`RecoverableSignature`] in bytes: `r || s || recovery_id`.
pub const SIGNATURE_SIZE: usize = 65;

/// A recoverable secp256k1 ECDSA signature over a canonical mint message.
///
/// The signing identity is not transmitted alongside the signature; it is
/// recovered from the signature and the message digest, then checked for
/// registry membership by the verifying side.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverableSignature {
    #[serde(with = "BigArray")]
    bytes: [u8; SIGNATURE_SIZE],
}

impl RecoverableSignature {
    /// Parse a signature from its 65-byte wire form.
    ///
    /// Only the length is validated here; scalar range and recovery id
    /// checks happen in [`RecoverableSignature::recover`], where a failure
    /// is indistinguishable from any other structural fault.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MintpassSignatureError> {
        let bytes: [u8; SIGNATURE_SIZE] =
            bytes
                .try_into()
                .map_err(|_| MintpassSignatureError::Malformed {
                    expected: SIGNATURE_SIZE,
                    found: bytes.len(),
                })?;
        Ok(RecoverableSignature { bytes })
    }

    pub(crate) fn from_parts(signature: &Signature, recovery_id: RecoveryId) -> Self {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..SIGNATURE_SIZE - 1].copy_from_slice(signature.to_bytes().as_slice());
        bytes[SIGNATURE_SIZE - 1] = recovery_id.to_byte();
        RecoverableSignature { bytes }
    }

    /// The 65-byte wire form of this signature.
    pub const fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        self.bytes
    }

    /// Recover the identity that signed `message`.
    ///
    /// Structural faults (an invalid recovery id, out-of-range scalars, an
    /// unrecoverable point) all surface as [`MintpassSignatureError`]
    /// variants; they never panic and never leak a garbage identity. Note
    /// that a *well-formed* signature over a different message recovers
    /// successfully, just to an identity that will not be registered -
    /// membership is the verifying side's decision, not this function's.
    pub fn recover(&self, message: &MintMessage) -> Result<Address, MintpassSignatureError> {
        let recovery_byte = self.bytes[SIGNATURE_SIZE - 1];
        let recovery_id = RecoveryId::from_byte(recovery_byte)
            .ok_or(MintpassSignatureError::InvalidRecoveryId(recovery_byte))?;
        let signature = Signature::from_slice(&self.bytes[..SIGNATURE_SIZE - 1])
            .map_err(|_| MintpassSignatureError::Recovery)?;
        let key = VerifyingKey::recover_from_prehash(&message.digest(), &signature, recovery_id)
            .map_err(|_| MintpassSignatureError::Recovery)?;
        Ok(Address::from_verifying_key(&key))
    }
}

impl std::fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RecoverableSignature")
            .field(&hex::encode(self.bytes))
            .finish()
    }
}

/// Authorization presented with a redemption attempt.
///
/// The empty byte string is a distinguished sentinel meaning "no
/// authorization attempted": it dispatches the gate to the unsigned path
/// and never reaches the recovery procedure. Anything non-empty must parse
/// as a full 65-byte signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authorization {
    /// No signature presented; the unsigned path applies.
    None,
    /// A recoverable signature to evaluate on the signed path.
    Signed(RecoverableSignature),
}

impl Authorization {
    /// Decode an authorization from its wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MintpassSignatureError> {
        if bytes.is_empty() {
            Ok(Authorization::None)
        } else {
            RecoverableSignature::from_bytes(bytes).map(Authorization::Signed)
        }
    }

    /// Whether a signature was presented.
    pub const fn is_signed(&self) -> bool {
        matches!(self, Authorization::Signed(_))
    }
}

impl From<RecoverableSignature> for Authorization {
    fn from(signature: RecoverableSignature) -> Self {
        Authorization::Signed(signature)
    }
}
