use crate::{
    Consumption, ConsumptionKey, ConsumptionLedger, MintpassGateError, SignerRegistry, TokenConfig,
    verify,
};
use mintpass_signature::{Address, Authorization, InstanceId, MintMessage};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Receipt for an accepted mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minted {
    /// Identity the token was issued to.
    pub recipient: Address,
    /// The minted token.
    pub token_id: u64,
    /// Issuer recovered from the signature, or `None` on the unsigned
    /// path.
    pub issuer: Option<Address>,
    /// The payment that settled the mint.
    pub price: u128,
}

#[derive(Debug, Default)]
struct CollectionState {
    signers: SignerRegistry,
    configs: HashMap<u64, TokenConfig>,
    balances: HashMap<(Address, u64), u64>,
    minted: HashMap<u64, u64>,
}

impl CollectionState {
    fn config_mut(&mut self, token_id: u64) -> &mut TokenConfig {
        self.configs.entry(token_id).or_default()
    }

    fn balance(&self, holder: Address, token_id: u64) -> u64 {
        self.balances
            .get(&(holder, token_id))
            .copied()
            .unwrap_or_default()
    }

    fn minted_count(&self, token_id: u64) -> u64 {
        self.minted.get(&token_id).copied().unwrap_or_default()
    }

    fn issue(&mut self, recipient: Address, token_id: u64) {
        *self.balances.entry((recipient, token_id)).or_default() += 1;
        *self.minted.entry(token_id).or_default() += 1;
    }
}

/// A multi-token resource family: one configuration per token id, a
/// signature-gated mint path and an unsigned price-gated mint path. The
/// unsigned path allows at most one mint per wallet and token; the signed
/// path allows one redemption per issued grant, enforced by the
/// consumption ledger.
///
/// The *signed* price is authoritative for this family. The gate rebuilds
/// the grant message from the presented payment, so a payment that differs
/// from the price the issuer signed recovers a wrong identity and is
/// rejected as [`MintpassGateError::BadSignature`] - indistinguishable
/// from forgery, so rejections do not reveal which field was wrong.
///
/// A mint attempt runs under a single write lock over the aggregate state:
/// it sees one consistent configuration snapshot, serializes with every
/// other attempt, and mutates nothing on any rejection branch.
pub struct Collection {
    instance: InstanceId,
    owner: Address,
    ledger: ConsumptionLedger,
    state: RwLock<CollectionState>,
}

impl Collection {
    /// Create a collection bound to `instance` and administered by
    /// `owner`.
    ///
    /// The signer registry starts empty, so every signed redemption fails
    /// until the owner seeds it (commonly with its own identity).
    pub fn new(instance: InstanceId, owner: Address) -> Self {
        Collection {
            instance,
            owner,
            ledger: ConsumptionLedger::new(),
            state: RwLock::new(CollectionState::default()),
        }
    }

    /// The deployment binding baked into every grant for this collection.
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
    /// idempotent. Immediately invalidates that identity's outstanding
    /// unredeemed grants.
    pub fn remove_signer(&self, caller: Address, signer: &Address) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().signers.remove(signer);
        Ok(())
    }

    /// Registry membership probe; callable by anyone.
    pub fn is_signer(&self, signer: &Address) -> bool {
        self.state.read().signers.contains(signer)
    }

    /// Set the unsigned-path price for a token. Owner only.
    pub fn set_token_price(
        &self,
        caller: Address,
        token_id: u64,
        price: u128,
    ) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().config_mut(token_id).price = price;
        Ok(())
    }

    /// Set the metadata URI for a token. Owner only.
    pub fn set_token_uri(
        &self,
        caller: Address,
        token_id: u64,
        uri: impl Into<String>,
    ) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().config_mut(token_id).uri = Some(uri.into());
        Ok(())
    }

    /// Open or close minting for a token. Owner only.
    pub fn set_minting_active(
        &self,
        caller: Address,
        token_id: u64,
        active: bool,
    ) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().config_mut(token_id).minting_active = active;
        Ok(())
    }

    /// Flip the activation flag for a token, returning the new value.
    /// Owner only.
    pub fn toggle_minting_active(
        &self,
        caller: Address,
        token_id: u64,
    ) -> Result<bool, MintpassGateError> {
        self.owned(caller)?;
        let mut state = self.state.write();
        let config = state.config_mut(token_id);
        config.minting_active = !config.minting_active;
        Ok(config.minting_active)
    }

    /// Cap the number of mints for a token. Owner only.
    pub fn set_max_supply(
        &self,
        caller: Address,
        token_id: u64,
        max_supply: u64,
    ) -> Result<(), MintpassGateError> {
        self.owned(caller)?;
        self.state.write().config_mut(token_id).max_supply = Some(max_supply);
        Ok(())
    }

    /// The configured unsigned-path price for a token.
    pub fn token_price(&self, token_id: u64) -> u128 {
        self.config(token_id).price
    }

    /// The configured metadata URI for a token, if any.
    pub fn token_uri(&self, token_id: u64) -> Option<String> {
        self.config(token_id).uri
    }

    /// Whether minting is open for a token.
    pub fn minting_active(&self, token_id: u64) -> bool {
        self.config(token_id).minting_active
    }

    /// The configured supply cap for a token, if any.
    pub fn max_supply(&self, token_id: u64) -> Option<u64> {
        self.config(token_id).max_supply
    }

    /// How many of `token_id` the holder owns.
    pub fn balance_of(&self, holder: Address, token_id: u64) -> u64 {
        self.state.read().balance(holder, token_id)
    }

    /// How many of `token_id` have been minted so far.
    pub fn minted(&self, token_id: u64) -> u64 {
        self.state.read().minted_count(token_id)
    }

    fn config(&self, token_id: u64) -> TokenConfig {
        self.state
            .read()
            .configs
            .get(&token_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Redeem a mint of `token_id` for `caller`.
    ///
    /// The attempt settles as exactly one of:
    ///
    /// 1. [`MintpassGateError::NotActive`] - activation flag is off.
    /// 2. [`MintpassGateError::UriNotSet`] - no metadata URI configured.
    /// 3. [`MintpassGateError::SupplyExceeded`] - supply cap reached.
    /// 4. Unsigned path ([`Authorization::None`]):
    ///    [`MintpassGateError::AlreadyIssued`] if the caller already holds
    ///    the token (the constraint that keeps the stateless unsigned path
    ///    from being repeatable), then
    ///    [`MintpassGateError::IncorrectPayment`] unless the payment
    ///    equals the configured price exactly (zero price, zero payment).
    ///    No registry or ledger involvement.
    /// 5. Signed path: [`MintpassGateError::BadSignature`] unless the
    ///    signature recovers a registered signer for the grant
    ///    `(instance, caller, token_id, payment)`;
    ///    [`MintpassGateError::Replay`] if that issuer's grant for this
    ///    caller and token was redeemed before.
    /// 6. Acceptance: the caller's balance and the token's mint count are
    ///    incremented and a [`Minted`] receipt is returned.
    ///
    /// No rejection branch mutates anything.
    pub fn mint(
        &self,
        caller: Address,
        token_id: u64,
        authorization: Authorization,
        payment: u128,
    ) -> Result<Minted, MintpassGateError> {
        let mut state = self.state.write();
        // One consistent snapshot per attempt.
        let config = state.configs.get(&token_id).cloned().unwrap_or_default();

        if !config.minting_active {
            return Err(MintpassGateError::NotActive);
        }
        if !config.uri_is_set() {
            return Err(MintpassGateError::UriNotSet);
        }
        if let Some(max_supply) = config.max_supply {
            if state.minted_count(token_id) >= max_supply {
                return Err(MintpassGateError::SupplyExceeded);
            }
        }
        let issuer = match authorization {
            Authorization::None => {
                if state.balance(caller, token_id) > 0 {
                    return Err(MintpassGateError::AlreadyIssued);
                }
                if payment != config.price {
                    return Err(MintpassGateError::IncorrectPayment {
                        expected: config.price,
                        provided: payment,
                    });
                }
                None
            }
            Authorization::Signed(signature) => {
                // The payment is the declared price: a payment that
                // differs from the signed price recovers a wrong identity
                // and fails membership.
                let grant = MintMessage::token_grant(self.instance, caller, token_id, payment);
                let issuer = verify(&grant, &signature, &state.signers)?;
                let key = ConsumptionKey {
                    issuer,
                    recipient: caller,
                    resource: token_id,
                };
                match self.ledger.try_consume(key) {
                    Consumption::AlreadyUsed => return Err(MintpassGateError::Replay),
                    Consumption::Consumed => Some(issuer),
                }
            }
        };

        state.issue(caller, token_id);
        tracing::debug!(%caller, token_id, signed = issuer.is_some(), "mint accepted");

        Ok(Minted {
            recipient: caller,
            token_id,
            issuer,
            price: payment,
        })
    }
}
