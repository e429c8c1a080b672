#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use protocoin_ledger::TokenLedger;
use protocoin_types::{Account, Timestamp, TokenAmount};

#[derive(Arbitrary, Debug)]
enum Op {
    Transfer { from: u8, to: u8, amount: u128 },
    Approve { owner: u8, spender: u8, amount: u128 },
    TransferFrom { spender: u8, owner: u8, to: u8, amount: u128 },
    Mint { caller: u8, to: u8, advance: u32 },
    SetMintAmount { caller: u8, amount: u128 },
    SetMintDelay { caller: u8, secs: u64 },
}

fn account(id: u8) -> Account {
    Account::new(format!("acct{}", id % 8))
}

// Apply arbitrary operation sequences. No operation may panic, and supply
// must equal the sum of balances after every step, including failed ones.
fuzz_target!(|ops: Vec<Op>| {
    let mut ledger = TokenLedger::new(account(0));
    let mut now = 0u64;

    for op in ops {
        let _ = match op {
            Op::Transfer { from, to, amount } => {
                ledger.transfer(&account(from), &account(to), TokenAmount::new(amount))
            }
            Op::Approve { owner, spender, amount } => {
                ledger.approve(&account(owner), &account(spender), TokenAmount::new(amount));
                Ok(())
            }
            Op::TransferFrom { spender, owner, to, amount } => ledger.transfer_from(
                &account(spender),
                &account(owner),
                &account(to),
                TokenAmount::new(amount),
            ),
            Op::Mint { caller, to, advance } => {
                now = now.saturating_add(u64::from(advance));
                ledger
                    .mint(&account(caller), &account(to), Timestamp::new(now))
                    .map(|_| ())
            }
            Op::SetMintAmount { caller, amount } => {
                ledger.set_mint_amount(&account(caller), TokenAmount::new(amount))
            }
            Op::SetMintDelay { caller, secs } => ledger.set_mint_delay(&account(caller), secs),
        };
        assert!(ledger.check_invariants().is_ok());
    }
});
