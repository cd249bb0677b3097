use cosmwasm_std::Uint128;

use crate::state::UserAccount;

/// Length of the early-withdrawal window: 14 days of 3-second blocks.
pub const PENALTY_WINDOW_BLOCKS: u64 = 14 * 24 * 60 * 60 / 3;

/// Fee charged on principal withdrawn inside the window, in basis points (100 = 1%).
pub const EARLY_WITHDRAW_FEE_BPS: u16 = 100;

const BPS_DENOMINATOR: u128 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub fee: Uint128,
    pub net: Uint128,
}

/// First block at which `account` can withdraw without a fee.
pub fn unlock_block(account: &UserAccount) -> u64 {
    account
        .lock_anchor_block
        .saturating_add(PENALTY_WINDOW_BLOCKS)
}

pub fn is_locked(account: &UserAccount, current_block: u64) -> bool {
    current_block < unlock_block(account)
}

/// Split a principal withdrawal into the fee and what reaches the user.
/// The fee rounds down, so dust always goes to the user.
pub fn split(amount: Uint128, locked: bool) -> FeeSplit {
    if !locked {
        return FeeSplit {
            fee: Uint128::zero(),
            net: amount,
        };
    }
    let fee = amount.multiply_ratio(EARLY_WITHDRAW_FEE_BPS as u128, BPS_DENOMINATOR);
    FeeSplit {
        fee,
        net: amount - fee,
    }
}
