use thiserror::Error;

/// The common error type used by this crate.
///
/// Every rejection is terminal and leaves no state change behind; retrying
/// requires fresh input (a new signature, a corrected payment, or a
/// reconfigured token). Messages mirror the reasons a caller is allowed to
/// distinguish - in particular, every signature-related cause collapses
/// into [`MintpassGateError::BadSignature`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintpassGateError {
    /// Minting for the target token is not active.
    #[error("Minting not active")]
    NotActive,

    /// No metadata URI is set; a token that cannot be delivered yet must
    /// not be mintable.
    #[error("URI not set")]
    UriNotSet,

    /// The signature is malformed, forged, issued by a non-member, or (in
    /// the multi-token family) bound to a different price than was paid.
    /// Deliberately indistinguishable so rejections leak nothing about
    /// which field was wrong.
    #[error("Invalid signature")]
    BadSignature,

    /// This authorization tuple has already been redeemed.
    #[error("Authorization already used")]
    Replay,

    /// The payment does not match the configured price.
    #[error("Incorrect value: expected {expected}, found {provided}")]
    IncorrectPayment {
        /// The configured price.
        expected: u128,
        /// The payment that was presented.
        provided: u128,
    },

    /// The caller is not the owner of the aggregate.
    #[error("Caller is not the owner")]
    Unauthorized,

    /// The token's maximum supply has been reached.
    #[error("Max supply reached")]
    SupplyExceeded,

    /// The caller already holds this token.
    #[error("Already minted")]
    AlreadyIssued,
}
