use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use diamond_hand_common::AssetInfoUnchecked;

use crate::state::{LedgerState, PoolConfig};

/// The instantiator becomes the only address allowed to call `Initialize`.
#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// One-time pool setup. Instantiator only.
    Initialize {
        staked_asset: AssetInfoUnchecked,
        reward_asset: AssetInfoUnchecked,
        reward_per_block: Uint128,
        start_block: u64,
        bonus_end_block: u64,
        /// Zero disables the per-user cap
        pool_limit_per_user: Uint128,
        admin: String,
    },
    /// Stake `amount` of the staked asset and harvest pending reward.
    /// Native assets must be attached as funds; CW20 assets are pulled with
    /// `TransferFrom`, so the caller must have granted an allowance.
    /// Zero is allowed and only harvests. Every deposit restarts the penalty window.
    Deposit { amount: Uint128 },
    /// Withdraw principal and harvest pending reward. A 1% fee applies inside
    /// the penalty window.
    Withdraw { amount: Uint128 },
    /// Withdraw the whole stake and forfeit pending reward.
    EmergencyWithdraw {},
    /// Fund the reward pool. Admin only.
    DepositReward { amount: Uint128 },
    /// Reclaim reward that has not been paid out. Admin only.
    AdminWithdraw { amount: Uint128 },
    /// Change the per-block emission after settling at the old rate. Admin only.
    UpdateRewardPerBlock { reward_per_block: Uint128 },
    /// Admin only.
    SetFeeRecipient { fee_recipient: String },
    /// Admin only. Zero disables the cap.
    SetPoolLimitPerUser { pool_limit_per_user: Uint128 },
    /// End emission at the current block. Admin only.
    StopReward {},
    /// Move the emission window. Admin only, and only before it starts.
    UpdateStartAndEndBlocks { start_block: u64, bonus_end_block: u64 },
    /// Send a stray asset that is neither staked nor reward to the admin. Admin only.
    RecoverWrongTokens {
        asset: AssetInfoUnchecked,
        amount: Uint128,
    },
    /// Hand the admin role to another address. Admin only.
    UpdateAdmin { admin: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PoolConfig)]
    Config {},
    #[returns(LedgerState)]
    Ledger {},
    #[returns(PendingRewardResponse)]
    PendingReward { address: String },
    #[returns(UserInfoResponse)]
    UserInfo { address: String },
    #[returns(bool)]
    IsUserInPenaltyPeriod { address: String },
    #[returns(Uint128)]
    TotalRemainingReward {},
    /// Total staked principal across all accounts
    #[returns(Uint128)]
    StakingCount {},
    #[returns(Vec<StakerEntry>)]
    Stakers {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct PendingRewardResponse {
    /// Reward accrued by the accumulator as of the current block
    pub accrued: Uint128,
    /// What a harvest would pay right now: `accrued` capped at the remaining reward
    pub claimable: Uint128,
}

#[cw_serde]
pub struct UserInfoResponse {
    pub staked_amount: Uint128,
    pub reward_debt: Uint128,
    pub lock_anchor_block: u64,
}

#[cw_serde]
pub struct StakerEntry {
    pub address: String,
    pub info: UserInfoResponse,
}

/// Arguments of `ExecuteMsg::Initialize`, unpacked by the entry point.
pub struct InitializeParams {
    pub staked_asset: AssetInfoUnchecked,
    pub reward_asset: AssetInfoUnchecked,
    pub reward_per_block: Uint128,
    pub start_block: u64,
    pub bonus_end_block: u64,
    pub pool_limit_per_user: Uint128,
    pub admin: String,
}
