use thiserror::Error;

/// The common error type used by this crate.
///
/// Structural faults in presented signatures are reported through these
/// variants; a raw decoding fault from the underlying curve arithmetic is
/// never surfaced to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintpassSignatureError {
    /// The signature byte string has the wrong length.
    #[error("Malformed signature: expected {expected} bytes, found {found}")]
    Malformed {
        /// The expected byte length.
        expected: usize,
        /// The length that was presented.
        found: usize,
    },

    /// The trailing recovery byte is not a valid recovery id.
    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// No signing identity could be recovered from the signature.
    #[error("Unable to recover a signing identity")]
    Recovery,

    /// Key material could not be parsed as a secp256k1 signing key.
    #[error("Invalid signing key material")]
    InvalidKey,

    /// The signing operation itself failed.
    #[error("Signing failed")]
    Signing,
}
