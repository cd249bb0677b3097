use cosmwasm_std::{Uint128, Uint256};

use crate::error::ContractError;
use crate::state::{LedgerState, PoolConfig, UserAccount};

/// Fixed-point scale for `acc_reward_per_share` (10^12).
/// Keeps per-share precision when the total stake dwarfs the per-block emission.
pub const ACC_REWARD_SCALE: Uint256 = Uint256::from_u128(1_000_000_000_000u128);

impl LedgerState {
    /// Fresh ledger. Nothing accrues before `start_block`, so settlement starts there.
    pub fn new(start_block: u64) -> Self {
        LedgerState {
            total_staked: Uint128::zero(),
            acc_reward_per_share: Uint256::zero(),
            last_settled_block: start_block,
            total_remaining_reward: Uint128::zero(),
        }
    }

    /// Settle emission up to `current_block`.
    ///
    /// Only blocks inside `[start_block, bonus_end_block]` accrue. Ranges with no
    /// stake advance `last_settled_block` without touching the accumulator, so a
    /// later depositor never collects reward for blocks nobody was staked in.
    pub fn settle(&mut self, config: &PoolConfig, current_block: u64) -> Result<(), ContractError> {
        if current_block <= self.last_settled_block {
            return Ok(());
        }
        let effective_end = current_block.min(config.bonus_end_block);
        if effective_end <= self.last_settled_block {
            return Ok(());
        }

        let from = self.last_settled_block.max(config.start_block);
        let blocks = effective_end.saturating_sub(from);
        if !self.total_staked.is_zero() && blocks > 0 {
            let emitted = Uint256::from(blocks).checked_mul(Uint256::from(config.reward_per_block))?;
            let increment = emitted
                .checked_mul(ACC_REWARD_SCALE)?
                .checked_div(Uint256::from(self.total_staked))?;
            self.acc_reward_per_share = self.acc_reward_per_share.checked_add(increment)?;
        }

        self.last_settled_block = effective_end;
        Ok(())
    }

    /// Copy of the ledger as it would look after settling at `current_block`.
    pub fn projected(&self, config: &PoolConfig, current_block: u64) -> Result<Self, ContractError> {
        let mut projected = self.clone();
        projected.settle(config, current_block)?;
        Ok(projected)
    }
}

/// `staked × acc / SCALE`: everything a position of `staked` has earned since inception.
pub fn earned(staked: Uint128, acc_reward_per_share: Uint256) -> Result<Uint128, ContractError> {
    let scaled = Uint256::from(staked)
        .checked_mul(acc_reward_per_share)?
        .checked_div(ACC_REWARD_SCALE)?;
    Ok(Uint128::try_from(scaled)?)
}

impl UserAccount {
    pub fn pending_reward(&self, acc_reward_per_share: Uint256) -> Result<Uint128, ContractError> {
        let earned = earned(self.staked_amount, acc_reward_per_share)?;
        Ok(earned.checked_sub(self.reward_debt)?)
    }

    /// Price the current stake in at `acc_reward_per_share`.
    pub fn reset_reward_debt(&mut self, acc_reward_per_share: Uint256) -> Result<(), ContractError> {
        self.reward_debt = earned(self.staked_amount, acc_reward_per_share)?;
        Ok(())
    }
}

/// Read-only quote of what `account` has accrued by `current_block`.
pub fn quote_pending(
    ledger: &LedgerState,
    config: &PoolConfig,
    account: &UserAccount,
    current_block: u64,
) -> Result<Uint128, ContractError> {
    if account.staked_amount.is_zero() {
        return Ok(Uint128::zero());
    }
    let projected = ledger.projected(config, current_block)?;
    account.pending_reward(projected.acc_reward_per_share)
}
