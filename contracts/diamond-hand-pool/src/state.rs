use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128, Uint256};
use cw_storage_plus::{Item, Map};
use diamond_hand_common::AssetInfo;

/// Address allowed to call `Initialize` (the instantiator).
pub const INITIALIZER: Item<Addr> = Item::new("initializer");
/// Present only once the pool has been initialized.
pub const CONFIG: Item<PoolConfig> = Item::new("config");
pub const LEDGER: Item<LedgerState> = Item::new("ledger");
/// Per-participant accounts. Never removed, even once fully withdrawn,
/// so a participant's history stays queryable.
pub const USERS: Map<&Addr, UserAccount> = Map::new("users");

#[cw_serde]
pub struct PoolConfig {
    pub staked_asset: AssetInfo,
    pub reward_asset: AssetInfo,
    /// Reward units emitted per block across all stakers
    pub reward_per_block: Uint128,
    /// First block that accrues reward
    pub start_block: u64,
    /// Accrual stops at this block
    pub bonus_end_block: u64,
    /// Per-user stake cap; zero means unlimited
    pub pool_limit_per_user: Uint128,
    pub admin: Addr,
    /// Receives early-withdrawal fees. Falls back to `admin` when unset.
    pub fee_recipient: Option<Addr>,
}

impl PoolConfig {
    pub fn fee_recipient(&self) -> &Addr {
        self.fee_recipient.as_ref().unwrap_or(&self.admin)
    }

    pub fn has_user_limit(&self) -> bool {
        !self.pool_limit_per_user.is_zero()
    }
}

#[cw_serde]
pub struct LedgerState {
    /// Sum of every account's `staked_amount`
    pub total_staked: Uint128,
    /// Cumulative reward per staked unit, scaled by `ACC_REWARD_SCALE`
    pub acc_reward_per_share: Uint256,
    pub last_settled_block: u64,
    /// Reward asset funded but not yet paid out or reclaimed
    pub total_remaining_reward: Uint128,
}

#[cw_serde]
#[derive(Default)]
pub struct UserAccount {
    pub staked_amount: Uint128,
    /// Reward already priced in at the last settlement, in reward units
    pub reward_debt: Uint128,
    /// Block at which the current penalty window began
    pub lock_anchor_block: u64,
}
