use crate::{
    Consumption, ConsumptionKey, ConsumptionLedger, MintpassGateError, SignerRegistry, TokenConfig,
    verify,
};
use mintpass_signature::{Address, Authorization, InstanceId, MintMessage};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Receipt for an accepted edition mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionMinted {
    /// Identity the token was issued to.
    pub recipient: Address,
    /// Serial number of the minted token, assigned in mint order.
    pub token_id: u64,
    /// The recipient's balance at redemption time, which is the nonce the
    /// grant was bound to.
    pub nonce: u64,
    /// Issuer recovered from the signature, or `None` on the unsigned
    /// path.
    pub issuer: Option<Address>,
    /// The payment that settled the mint.
    pub price: u128,
}

#[derive(Debug, Default)]
struct EditionState {
    signers: SignerRegistry,
    config: TokenConfig,
    balances: HashMap<Address, u64>,
    minted: u64,
}

/// A single-token resource family: one shared configuration, repeat mints
/// per wallet, and grants bound to the recipient's balance as a nonce.
///
/// The *configured* price is authoritative for this family (the decided
/// half of the protocol's price-policy split): a payment mismatch is
/// [`MintpassGateError::IncorrectPayment`] on the signed and unsigned path
/// alike. Because each successful mint raises the recipient's balance,
/// every new grant the issuer signs is a distinct message, and the
/// consumption ledger keys on `(issuer, recipient, nonce)`.
pub struct Edition {
    instance: InstanceId,
    owner: Address,
    ledger: ConsumptionLedger,
    state: RwLock<EditionState>,
}

impl Edition {
    /// Create an edition bound to `instance` and administered by `owner`.
    pub fn new(instance: InstanceId, owner: Address) -> Self {
        Edition {
            instance,
            owner,
            ledger: ConsumptionLedger::new(),
            state: RwLock::new(EditionState::default()),
        }
    }

    /// The deployment binding baked into every grant for this edition.
    pub fn instance(&self) -> &InstanceId {
        &self.instance
    }

    /// The administering identity.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The consumption ledger, for read-only probes.
    pub fn ledger(&self) -> &ConsumptionLedger {
        &self.ledger
    }

    fn owned(&self, caller: Address) -> Result<(), MintpassGateError> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(MintpassGateError::Unauthorized)
        }
    }

    /// Add an identity to the signer registry. Owner only; idempotent.
    pub fn add_signer(&self, caller: Address, signer: Address) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().signers.insert(signer);
        Ok(())
    }

    /// Remove an identity from the signer registry. Owner only;
    /// idempotent.
    pub fn remove_signer(&self, caller: Address, signer: &Address) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().signers.remove(signer);
        Ok(())
    }

    /// Registry membership probe; callable by anyone.
    pub fn is_signer(&self, signer: &Address) -> bool {
        self.state.read().signers.contains(signer)
    }

    /// Set the mint price. Owner only.
    pub fn set_price(&self, caller: Address, price: u128) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().config.price = price;
        Ok(())
    }

    /// Set the metadata URI. Owner only.
    pub fn set_uri(
        &self,
        caller: Address,
        uri: impl Into<String>,
    ) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().config.uri = Some(uri.into());
        Ok(())
    }

    /// Open or close minting. Owner only.
    pub fn set_minting_active(
        &self,
        caller: Address,
        active: bool,
    ) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().config.minting_active = active;
        Ok(())
    }

    /// Flip the activation flag, returning the new value. Owner only.
    pub fn toggle_minting_active(&self, caller: Address) -> Result<bool, MintpassGateError> {
        self.owned(caller)?;
        let mut state = self.state.write();
        state.config.minting_active = !state.config.minting_active;
        Ok(state.config.minting_active)
    }

    /// Cap the total number of mints. Owner only.
    pub fn set_max_supply(&self, caller: Address, max_supply: u64) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().config.max_supply = Some(max_supply);
        Ok(())
    }

    /// The configured mint price.
    pub fn price(&self) -> u128 {
        self.state.read().config.price
    }

    /// The configured metadata URI, if any.
    pub fn uri(&self) -> Option<String> {
        self.state.read().config.uri.clone()
    }

    /// Whether minting is open.
    pub fn minting_active(&self) -> bool {
        self.state.read().config.minting_active
    }

    /// The configured supply cap, if any.
    pub fn max_supply(&self) -> Option<u64> {
        self.state.read().config.max_supply
    }

    /// How many tokens the holder owns.
    pub fn balance_of(&self, holder: Address) -> u64 {
        self.state
            .read()
            .balances
            .get(&holder)
            .copied()
            .unwrap_or_default()
    }

    /// Total number of tokens minted.
    pub fn total_supply(&self) -> u64 {
        self.state.read().minted
    }

    /// Redeem a mint for `caller`.
    ///
    /// Preconditions mirror [`crate::Collection::mint`] (activation, URI,
    /// supply cap), except that repeat mints per wallet are legitimate
    /// here. Payment must equal the configured price on either path. On
    /// the signed path the grant is rebuilt as
    /// `(instance, caller, nonce = balance_of(caller))`, so an issuer's
    /// outstanding grant is consumed at exactly the balance it was signed
    /// for. No rejection branch mutates anything.
    pub fn mint(
        &self,
        caller: Address,
        authorization: Authorization,
        payment: u128,
    ) -> Result<EditionMinted, MintpassGateError> {
        let mut state = self.state.write();
        // One consistent snapshot per attempt.
        let config = state.config.clone();

        if !config.minting_active {
            return Err(MintpassGateError::NotActive);
        }
        if !config.uri_is_set() {
            return Err(MintpassGateError::UriNotSet);
        }
        if let Some(max_supply) = config.max_supply {
            if state.minted >= max_supply {
                return Err(MintpassGateError::SupplyExceeded);
            }
        }
        if payment != config.price {
            return Err(MintpassGateError::IncorrectPayment {
                expected: config.price,
                provided: payment,
            });
        }

        let nonce = state.balances.get(&caller).copied().unwrap_or_default();

        let issuer = match authorization {
            Authorization::None => None,
            Authorization::Signed(signature) => {
                let grant = MintMessage::edition_grant(self.instance, caller, nonce);
                let issuer = verify(&grant, &signature, &state.signers)?;
                let key = ConsumptionKey {
                    issuer,
                    recipient: caller,
                    resource: nonce,
                };
                match self.ledger.try_consume(key) {
                    Consumption::AlreadyUsed => return Err(MintpassGateError::Replay),
                    Consumption::Consumed => Some(issuer),
                }
            }
        };

        let token_id = state.minted;
        *state.balances.entry(caller).or_default() += 1;
        state.minted += 1;
        tracing::debug!(%caller, token_id, signed = issuer.is_some(), "edition mint accepted");

        Ok(EditionMinted {
            recipient: caller,
            token_id,
            nonce,
            issuer,
            price: payment,
        })
    }
}
