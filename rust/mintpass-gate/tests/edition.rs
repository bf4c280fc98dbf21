//! Integration suite for the single-token family: balance-as-nonce
//! grants, the configured-price policy, and the shared preconditions.

use mintpass_gate::{
    Authorization, Edition, InstanceId, IssuerKey, MintMessage, MintpassGateError,
};
use pretty_assertions::assert_eq;
use testresult::TestResult;

fn issuer_key(seed: u8) -> IssuerKey {
    IssuerKey::import(&[seed; 32]).expect("seed is a valid secret scalar")
}

fn edition() -> (Edition, IssuerKey) {
    let owner = issuer_key(1);
    let edition = Edition::new(InstanceId::derive("test/edition"), owner.address());
    (edition, owner)
}

/// An edition with URI and activation configured and the owner registered
/// as signer; price stays at zero unless a test raises it.
fn configured_edition() -> (Edition, IssuerKey) {
    let (edition, owner) = edition();
    edition.set_uri(owner.address(), "ipfs://base").unwrap();
    edition.toggle_minting_active(owner.address()).unwrap();
    edition
        .add_signer(owner.address(), owner.address())
        .unwrap();
    (edition, owner)
}

#[test]
fn signed_mint_assigns_serial_token_ids() -> TestResult {
    let (edition, owner) = configured_edition();

    let minter = issuer_key(2).address();
    let grant = MintMessage::edition_grant(*edition.instance(), minter, 0);
    let signature = owner.sign(&grant)?;

    let minted = edition.mint(minter, Authorization::Signed(signature), 0)?;
    assert_eq!(minted.token_id, 0);
    assert_eq!(minted.nonce, 0);
    assert_eq!(minted.issuer, Some(owner.address()));
    assert_eq!(edition.total_supply(), 1);
    assert_eq!(edition.balance_of(minter), 1);
    Ok(())
}

#[test]
fn balance_nonce_makes_each_grant_single_use() -> TestResult {
    let (edition, owner) = configured_edition();
    let minter = issuer_key(2).address();

    let first = owner.sign(&MintMessage::edition_grant(*edition.instance(), minter, 0))?;
    edition.mint(minter, Authorization::Signed(first), 0)?;

    // The first grant was bound to balance 0; now that the balance is 1 it
    // no longer recovers a registered signer.
    assert_eq!(
        edition.mint(minter, Authorization::Signed(first), 0),
        Err(MintpassGateError::BadSignature)
    );

    // A fresh grant over the new balance succeeds.
    let second = owner.sign(&MintMessage::edition_grant(*edition.instance(), minter, 1))?;
    let minted = edition.mint(minter, Authorization::Signed(second), 0)?;
    assert_eq!(minted.token_id, 1);
    assert_eq!(minted.nonce, 1);
    assert_eq!(edition.balance_of(minter), 2);
    Ok(())
}

#[test]
fn configured_price_is_authoritative_on_both_paths() -> TestResult {
    let (edition, owner) = configured_edition();
    edition.set_price(owner.address(), 500)?;
    let minter = issuer_key(2).address();

    assert_eq!(
        edition.mint(minter, Authorization::None, 499),
        Err(MintpassGateError::IncorrectPayment {
            expected: 500,
            provided: 499
        })
    );

    // Even a valid grant cannot change the price for this family.
    let grant = owner.sign(&MintMessage::edition_grant(*edition.instance(), minter, 0))?;
    assert_eq!(
        edition.mint(minter, Authorization::Signed(grant), 0),
        Err(MintpassGateError::IncorrectPayment {
            expected: 500,
            provided: 0
        })
    );

    edition.mint(minter, Authorization::Signed(grant), 500)?;
    Ok(())
}

#[test]
fn unsigned_mint_is_price_gated_only() -> TestResult {
    let (edition, owner) = configured_edition();
    edition.set_price(owner.address(), 500)?;
    let minter = issuer_key(2).address();

    let minted = edition.mint(minter, Authorization::None, 500)?;
    assert_eq!(minted.issuer, None);

    // No one-per-wallet rule in this family.
    edition.mint(minter, Authorization::None, 500)?;
    assert_eq!(edition.balance_of(minter), 2);
    Ok(())
}

#[test]
fn preconditions_apply_before_any_signature_work() -> TestResult {
    let (edition, owner) = edition();
    edition.add_signer(owner.address(), owner.address())?;

    let minter = issuer_key(2).address();
    let grant = owner.sign(&MintMessage::edition_grant(*edition.instance(), minter, 0))?;

    // Not active yet.
    assert_eq!(
        edition.mint(minter, Authorization::Signed(grant), 0),
        Err(MintpassGateError::NotActive)
    );

    // Active but no URI.
    edition.toggle_minting_active(owner.address())?;
    assert_eq!(
        edition.mint(minter, Authorization::Signed(grant), 0),
        Err(MintpassGateError::UriNotSet)
    );

    edition.set_uri(owner.address(), "ipfs://base")?;
    edition.mint(minter, Authorization::Signed(grant), 0)?;
    Ok(())
}

#[test]
fn max_supply_caps_total_mints() -> TestResult {
    let (edition, owner) = configured_edition();
    edition.set_max_supply(owner.address(), 2)?;

    let minter = issuer_key(2).address();
    edition.mint(minter, Authorization::None, 0)?;
    edition.mint(minter, Authorization::None, 0)?;
    assert_eq!(
        edition.mint(minter, Authorization::None, 0),
        Err(MintpassGateError::SupplyExceeded)
    );
    Ok(())
}

#[test]
fn admin_surface_is_owner_only() -> TestResult {
    let (edition, owner) = edition();
    let outsider = issuer_key(9).address();

    assert_eq!(
        edition.add_signer(outsider, outsider),
        Err(MintpassGateError::Unauthorized)
    );
    assert_eq!(
        edition.remove_signer(outsider, &owner.address()),
        Err(MintpassGateError::Unauthorized)
    );
    assert_eq!(
        edition.set_price(outsider, 1),
        Err(MintpassGateError::Unauthorized)
    );
    assert_eq!(
        edition.set_uri(outsider, "ipfs://evil"),
        Err(MintpassGateError::Unauthorized)
    );
    assert_eq!(
        edition.set_minting_active(outsider, true),
        Err(MintpassGateError::Unauthorized)
    );
    assert_eq!(
        edition.toggle_minting_active(outsider),
        Err(MintpassGateError::Unauthorized)
    );
    assert_eq!(
        edition.set_max_supply(outsider, 1),
        Err(MintpassGateError::Unauthorized)
    );
    Ok(())
}

#[test]
fn configuration_round_trips() -> TestResult {
    let (edition, owner) = edition();

    edition.set_uri(owner.address(), "ipfs://base")?;
    assert_eq!(edition.uri(), Some("ipfs://base".into()));

    edition.set_price(owner.address(), 42)?;
    assert_eq!(edition.price(), 42);

    assert!(edition.toggle_minting_active(owner.address())?);
    assert!(edition.minting_active());

    edition.set_max_supply(owner.address(), 3)?;
    assert_eq!(edition.max_supply(), Some(3));

    edition.add_signer(owner.address(), owner.address())?;
    assert!(edition.is_signer(&owner.address()));
    edition.remove_signer(owner.address(), &owner.address())?;
    assert!(!edition.is_signer(&owner.address()));
    Ok(())
}
