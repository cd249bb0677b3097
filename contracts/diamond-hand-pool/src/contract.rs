use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InitializeParams, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::INITIALIZER;

const CONTRACT_NAME: &str = "crates.io:diamond-hand-pool";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    INITIALIZER.save(deps.storage, &info.sender)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "diamond-hand-pool")
        .add_attribute("initializer", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Initialize {
            staked_asset,
            reward_asset,
            reward_per_block,
            start_block,
            bonus_end_block,
            pool_limit_per_user,
            admin,
        } => execute::initialize(
            deps,
            env,
            info,
            InitializeParams {
                staked_asset,
                reward_asset,
                reward_per_block,
                start_block,
                bonus_end_block,
                pool_limit_per_user,
                admin,
            },
        ),
        ExecuteMsg::Deposit { amount } => execute::deposit(deps, env, info, amount),
        ExecuteMsg::Withdraw { amount } => execute::withdraw(deps, env, info, amount),
        ExecuteMsg::EmergencyWithdraw {} => execute::emergency_withdraw(deps, env, info),
        ExecuteMsg::DepositReward { amount } => execute::deposit_reward(deps, env, info, amount),
        ExecuteMsg::AdminWithdraw { amount } => execute::admin_withdraw(deps, env, info, amount),
        ExecuteMsg::UpdateRewardPerBlock { reward_per_block } => {
            execute::update_reward_per_block(deps, env, info, reward_per_block)
        }
        ExecuteMsg::SetFeeRecipient { fee_recipient } => {
            execute::set_fee_recipient(deps, env, info, fee_recipient)
        }
        ExecuteMsg::SetPoolLimitPerUser {
            pool_limit_per_user,
        } => execute::set_pool_limit_per_user(deps, env, info, pool_limit_per_user),
        ExecuteMsg::StopReward {} => execute::stop_reward(deps, env, info),
        ExecuteMsg::UpdateStartAndEndBlocks {
            start_block,
            bonus_end_block,
        } => execute::update_start_and_end_blocks(deps, env, info, start_block, bonus_end_block),
        ExecuteMsg::RecoverWrongTokens { asset, amount } => {
            execute::recover_wrong_tokens(deps, env, info, asset, amount)
        }
        ExecuteMsg::UpdateAdmin { admin } => execute::update_admin(deps, env, info, admin),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Ledger {} => query::query_ledger(deps),
        QueryMsg::PendingReward { address } => query::query_pending_reward(deps, env, address),
        QueryMsg::UserInfo { address } => query::query_user_info(deps, address),
        QueryMsg::IsUserInPenaltyPeriod { address } => {
            query::query_is_user_in_penalty_period(deps, env, address)
        }
        QueryMsg::TotalRemainingReward {} => query::query_total_remaining_reward(deps),
        QueryMsg::StakingCount {} => query::query_staking_count(deps),
        QueryMsg::Stakers { start_after, limit } => query::query_stakers(deps, start_after, limit),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
