use cosmwasm_std::{ConversionOverflowError, DivideByZeroError, OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    DivideByZero(#[from] DivideByZeroError),

    #[error("{0}")]
    ConversionOverflow(#[from] ConversionOverflowError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("pool is already initialized")]
    AlreadyInitialized,

    #[error("pool is not initialized")]
    NotInitialized,

    #[error("invalid block range: start {start_block} must be before bonus end {bonus_end_block}")]
    InvalidBlockRange {
        start_block: u64,
        bonus_end_block: u64,
    },

    #[error("pool already started at block {start_block}")]
    PoolAlreadyStarted { start_block: u64 },

    #[error("deposit would exceed per-user limit: {requested} > {limit}")]
    LimitExceeded { requested: Uint128, limit: Uint128 },

    #[error("insufficient stake: requested {requested}, staked {staked}")]
    InsufficientStake { requested: Uint128, staked: Uint128 },

    #[error("amount {requested} exceeds total remaining reward {remaining}")]
    ExceedsRemainingReward {
        requested: Uint128,
        remaining: Uint128,
    },

    #[error("must send exactly {expected}{denom}")]
    FundsMismatch { expected: Uint128, denom: String },

    #[error("this call does not accept native funds")]
    UnexpectedFunds,

    #[error("cannot recover the staked or reward asset")]
    CannotRecoverPoolAsset,
}
