use crate::{Address, MintMessage, MintpassSignatureError, RecoverableSignature};
use k256::ecdsa::SigningKey;
use rand_core::CryptoRngCore;

/// The off-chain issuance side of the protocol: a secp256k1 signing key
/// that produces [`RecoverableSignature`]s over the exact canonical
/// message layout.
///
/// How issued signatures reach their recipients (key-value stores, direct
/// delivery, ...) is outside this crate; any storage layer only ever sees
/// opaque signature bytes.
#[derive(Clone)]
pub struct IssuerKey {
    signing_key: SigningKey,
}

impl IssuerKey {
    /// Generate a fresh issuer key from the provided RNG.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        IssuerKey {
            signing_key: SigningKey::random(rng),
        }
    }

    /// Import an issuer key from a 32-byte secret scalar.
    pub fn import(bytes: &[u8]) -> Result<Self, MintpassSignatureError> {
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| MintpassSignatureError::InvalidKey)?;
        Ok(IssuerKey { signing_key })
    }

    /// The identity a verifier will recover from this key's signatures.
    pub fn address(&self) -> Address {
        Address::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign the canonical encoding of `message`.
    pub fn sign(&self, message: &MintMessage) -> Result<RecoverableSignature, MintpassSignatureError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(&message.digest())
            .map_err(|_| MintpassSignatureError::Signing)?;
        Ok(RecoverableSignature::from_parts(&signature, recovery_id))
    }
}

impl std::fmt::Debug for IssuerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_tuple("IssuerKey").field(&self.address()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ADDRESS_SIZE, InstanceId};
    use rand::SeedableRng;
    use testresult::TestResult;

    #[test]
    fn test_generated_keys_sign_recoverable_grants() -> TestResult {
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(17);
        let issuer = IssuerKey::generate(&mut rng);

        let message = MintMessage::edition_grant(
            InstanceId::derive("test/instance"),
            Address::new([4u8; ADDRESS_SIZE]),
            2,
        );
        let signature = issuer.sign(&message)?;
        assert_eq!(signature.recover(&message)?, issuer.address());
        Ok(())
    }

    #[test]
    fn test_import_rejects_bad_scalars() {
        assert_eq!(
            IssuerKey::import(&[0u8; 32]).map(|key| key.address()),
            Err(MintpassSignatureError::InvalidKey)
        );
        assert!(IssuerKey::import(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_debug_hides_key_material() -> TestResult {
        let issuer = IssuerKey::import(&[42u8; 32])?;
        let rendered = format!("{issuer:?}");
        assert!(rendered.contains(&issuer.address().to_string()));
        Ok(())
    }
}
