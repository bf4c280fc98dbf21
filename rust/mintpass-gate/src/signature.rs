//! Re-exports from mintpass-signature for the types that appear in this
//! crate's public API.

pub use mintpass_signature::{
    Address, Authorization, InstanceId, IssuerKey, MintMessage, MintpassSignatureError,
    RecoverableSignature,
};
