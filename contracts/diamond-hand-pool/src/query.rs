use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::accumulator::quote_pending;
use crate::msg::{PendingRewardResponse, StakerEntry, UserInfoResponse};
use crate::penalty;
use crate::state::{UserAccount, CONFIG, LEDGER, USERS};

const DEFAULT_LIMIT: u32 = 30;
const MAX_LIMIT: u32 = 100;

fn user_info(account: UserAccount) -> UserInfoResponse {
    UserInfoResponse {
        staked_amount: account.staked_amount,
        reward_debt: account.reward_debt,
        lock_anchor_block: account.lock_anchor_block,
    }
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_ledger(deps: Deps) -> StdResult<Binary> {
    let ledger = LEDGER.load(deps.storage)?;
    to_json_binary(&ledger)
}

/// Pending reward as of the current block, without settling anything.
/// `claimable` is what a harvest would actually pay given the funded reward.
pub fn query_pending_reward(deps: Deps, env: Env, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let account = USERS.may_load(deps.storage, &addr)?.unwrap_or_default();

    let (accrued, remaining) = match CONFIG.may_load(deps.storage)? {
        Some(config) => {
            let ledger = LEDGER.load(deps.storage)?;
            let accrued = quote_pending(&ledger, &config, &account, env.block.height)
                .map_err(|e| StdError::generic_err(e.to_string()))?;
            (accrued, ledger.total_remaining_reward)
        }
        None => (Uint128::zero(), Uint128::zero()),
    };

    to_json_binary(&PendingRewardResponse {
        accrued,
        claimable: accrued.min(remaining),
    })
}

pub fn query_user_info(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let account = USERS.may_load(deps.storage, &addr)?.unwrap_or_default();
    to_json_binary(&user_info(account))
}

/// Unknown addresses have never deposited and so are never in a penalty period.
pub fn query_is_user_in_penalty_period(deps: Deps, env: Env, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let locked = USERS
        .may_load(deps.storage, &addr)?
        .map(|account| penalty::is_locked(&account, env.block.height))
        .unwrap_or(false);
    to_json_binary(&locked)
}

pub fn query_total_remaining_reward(deps: Deps) -> StdResult<Binary> {
    let remaining = LEDGER
        .may_load(deps.storage)?
        .map(|ledger| ledger.total_remaining_reward)
        .unwrap_or_default();
    to_json_binary(&remaining)
}

pub fn query_staking_count(deps: Deps) -> StdResult<Binary> {
    let total_staked = LEDGER
        .may_load(deps.storage)?
        .map(|ledger| ledger.total_staked)
        .unwrap_or_default();
    to_json_binary(&total_staked)
}

/// Every account ever created, including fully withdrawn ones, in address order.
pub fn query_stakers(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let entries: Vec<StakerEntry> = USERS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            item.map(|(addr, account)| StakerEntry {
                address: addr.to_string(),
                info: user_info(account),
            })
        })
        .collect::<StdResult<_>>()?;

    to_json_binary(&entries)
}
