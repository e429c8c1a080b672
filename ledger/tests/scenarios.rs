//! End-to-end ledger scenarios, driven by a deterministic clock.

use protocoin_ledger::{LedgerError, MintStatus, TokenLedger};
use protocoin_nullables::clock::DAY_SECS;
use protocoin_nullables::NullClock;
use protocoin_types::{Account, TokenAmount, INITIAL_SUPPLY};

struct Fixture {
    ledger: TokenLedger,
    owner: Account,
    other: Account,
    clock: NullClock,
}

fn deploy() -> Fixture {
    let owner = Account::new("owner");
    Fixture {
        ledger: TokenLedger::new(owner.clone()),
        owner,
        other: Account::new("other"),
        clock: NullClock::default(),
    }
}

fn amt(raw: u128) -> TokenAmount {
    TokenAmount::new(raw)
}

#[test]
fn has_protocoin_metadata_and_genesis_supply() {
    let f = deploy();
    assert_eq!(f.ledger.name(), "ProtoCoin");
    assert_eq!(f.ledger.symbol(), "PRC");
    assert_eq!(f.ledger.decimals(), 18);
    assert_eq!(f.ledger.total_supply().raw(), 10_000_000 * 10u128.pow(18));
    assert_eq!(f.ledger.balance_of(&f.owner), INITIAL_SUPPLY);
}

#[test]
fn owner_transfers_five_units() {
    let mut f = deploy();
    assert_eq!(f.ledger.balance_of(&f.other), TokenAmount::ZERO);

    f.ledger.transfer(&f.owner, &f.other, amt(5)).unwrap();

    assert_eq!(f.ledger.balance_of(&f.owner), INITIAL_SUPPLY - amt(5));
    assert_eq!(f.ledger.balance_of(&f.other), amt(5));
}

#[test]
fn empty_account_cannot_transfer() {
    let mut f = deploy();
    let err = f.ledger.transfer(&f.other, &f.owner, amt(1)).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
}

#[test]
fn approve_sets_allowance() {
    let mut f = deploy();
    f.ledger.approve(&f.owner, &f.other, amt(1));
    assert_eq!(f.ledger.allowance(&f.owner, &f.other), amt(1));
}

#[test]
fn spender_transfers_from_owner_then_overdraws_allowance() {
    let mut f = deploy();
    f.ledger.approve(&f.owner, &f.other, amt(10));

    f.ledger
        .transfer_from(&f.other, &f.owner, &f.other, amt(5))
        .unwrap();

    assert_eq!(f.ledger.allowance(&f.owner, &f.other), amt(5));
    assert_eq!(f.ledger.balance_of(&f.owner), INITIAL_SUPPLY - amt(5));
    assert_eq!(f.ledger.balance_of(&f.other), amt(5));

    let err = f
        .ledger
        .transfer_from(&f.other, &f.owner, &f.other, amt(10))
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InsufficientAllowance {
            owner: f.owner.clone(),
            spender: f.other.clone(),
            needed: amt(10),
            available: amt(5),
        }
    );
    assert_eq!(f.ledger.allowance(&f.owner, &f.other), amt(5));
}

#[test]
fn transfer_from_with_allowance_but_no_balance() {
    let mut f = deploy();
    f.ledger.approve(&f.other, &f.owner, amt(1));
    let err = f
        .ledger
        .transfer_from(&f.owner, &f.other, &f.owner, amt(1))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
}

#[test]
fn transfer_from_without_allowance() {
    let mut f = deploy();
    let err = f
        .ledger
        .transfer_from(&f.other, &f.owner, &f.other, amt(1))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
}

#[test]
fn mint_once() {
    let mut f = deploy();
    f.ledger.set_mint_amount(&f.owner, amt(1000)).unwrap();
    f.ledger.mint(&f.owner, &f.other, f.clock.now()).unwrap();
    assert_eq!(f.ledger.balance_of(&f.other), amt(1000));
}

#[test]
fn mint_twice_to_different_accounts() {
    let mut f = deploy();
    f.ledger.set_mint_amount(&f.owner, amt(1000)).unwrap();
    f.ledger.set_mint_delay(&f.owner, DAY_SECS).unwrap();

    f.ledger.mint(&f.owner, &f.owner, f.clock.now()).unwrap();
    f.ledger.mint(&f.owner, &f.other, f.clock.now()).unwrap();

    assert_eq!(f.ledger.balance_of(&f.owner), INITIAL_SUPPLY + amt(1000));
    assert_eq!(f.ledger.balance_of(&f.other), amt(1000));
}

#[test]
fn mint_twice_after_two_days() {
    let mut f = deploy();
    f.ledger.set_mint_amount(&f.owner, amt(1000)).unwrap();
    f.ledger.set_mint_delay(&f.owner, DAY_SECS).unwrap();

    f.ledger.mint(&f.owner, &f.other, f.clock.now()).unwrap();
    assert_eq!(f.ledger.balance_of(&f.other), amt(1000));

    f.clock.advance_days(2);
    f.ledger.mint(&f.owner, &f.other, f.clock.now()).unwrap();
    assert_eq!(f.ledger.balance_of(&f.other), amt(2000));
}

#[test]
fn cannot_mint_twice_within_delay() {
    let mut f = deploy();
    f.ledger.set_mint_amount(&f.owner, amt(1000)).unwrap();
    f.ledger.set_mint_delay(&f.owner, DAY_SECS).unwrap();

    let first = f.clock.now();
    f.ledger.mint(&f.owner, &f.other, first).unwrap();

    f.clock.advance(DAY_SECS - 1);
    assert_eq!(
        f.ledger.mint_status(&f.other, f.clock.now()),
        MintStatus::Cooling { remaining_secs: 1 }
    );
    let err = f.ledger.mint(&f.owner, &f.other, f.clock.now()).unwrap_err();
    assert_eq!(
        err,
        LedgerError::MintCooldownActive {
            account: f.other.clone(),
            next_mint_at: first.saturating_add(DAY_SECS),
        }
    );

    f.clock.advance(1);
    assert_eq!(f.ledger.mint_status(&f.other, f.clock.now()), MintStatus::Eligible);
    f.ledger.mint(&f.owner, &f.other, f.clock.now()).unwrap();
    assert_eq!(f.ledger.balance_of(&f.other), amt(2000));
}

#[test]
fn minting_disabled_by_default() {
    let mut f = deploy();
    assert_eq!(f.ledger.mint_status(&f.other, f.clock.now()), MintStatus::Disabled);
    let err = f.ledger.mint(&f.owner, &f.other, f.clock.now()).unwrap_err();
    assert_eq!(err, LedgerError::MintingDisabled);
    let err = f.ledger.mint(&f.other, &f.owner, f.clock.now()).unwrap_err();
    assert_eq!(err, LedgerError::MintingDisabled);
}

#[test]
fn non_owner_cannot_configure_faucet() {
    let mut f = deploy();
    let err = f.ledger.set_mint_amount(&f.other, amt(1000)).unwrap_err();
    assert_eq!(err, LedgerError::Unauthorized { caller: f.other.clone() });
    let err = f.ledger.set_mint_delay(&f.other, DAY_SECS).unwrap_err();
    assert_eq!(err, LedgerError::Unauthorized { caller: f.other.clone() });
    assert_eq!(f.ledger.mint_amount(), TokenAmount::ZERO);
    assert_eq!(f.ledger.mint_delay(), 0);
}

#[test]
fn any_caller_may_trigger_a_mint() {
    let mut f = deploy();
    f.ledger.set_mint_amount(&f.owner, amt(7)).unwrap();
    let stranger = Account::new("stranger");
    f.ledger.mint(&stranger, &f.other, f.clock.now()).unwrap();
    assert_eq!(f.ledger.balance_of(&f.other), amt(7));
    assert_eq!(f.ledger.last_mint_at(&f.other), Some(f.clock.now()));
    assert_eq!(f.ledger.last_mint_at(&stranger), None);
}

#[test]
fn snapshot_restore_preserves_cooldowns() {
    let mut f = deploy();
    f.ledger.set_mint_amount(&f.owner, amt(1000)).unwrap();
    f.ledger.set_mint_delay(&f.owner, DAY_SECS).unwrap();
    f.ledger.mint(&f.owner, &f.other, f.clock.now()).unwrap();

    let bytes = f.ledger.snapshot(f.clock.now()).to_bytes();
    let snapshot = protocoin_ledger::LedgerSnapshot::from_bytes(&bytes).unwrap();
    let mut restored = TokenLedger::restore(snapshot).unwrap();

    f.clock.advance(60);
    let err = restored.mint(&f.owner, &f.other, f.clock.now()).unwrap_err();
    assert!(matches!(err, LedgerError::MintCooldownActive { .. }));
    restored.check_invariants().unwrap();
}
