use cosmwasm_std::{
    Addr, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response, Storage, Uint128,
};
use diamond_hand_common::{AssetInfo, AssetInfoUnchecked};

use crate::error::ContractError;
use crate::msg::InitializeParams;
use crate::penalty;
use crate::state::{
    LedgerState, PoolConfig, UserAccount, CONFIG, INITIALIZER, LEDGER, USERS,
};

/// Load config and ledger, failing if `Initialize` has not run yet.
fn load_pool(storage: &dyn Storage) -> Result<(PoolConfig, LedgerState), ContractError> {
    let config = CONFIG
        .may_load(storage)?
        .ok_or(ContractError::NotInitialized)?;
    let ledger = LEDGER.load(storage)?;
    Ok((config, ledger))
}

fn assert_admin(config: &PoolConfig, sender: &Addr, action: &str) -> Result<(), ContractError> {
    if *sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: format!("only admin can {}", action),
        });
    }
    Ok(())
}

fn assert_no_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

/// Take `amount` of `asset` from the sender.
/// Native assets must already be attached to the call, exactly. CW20 assets
/// come back as a `TransferFrom` message to dispatch with the response.
fn receive_asset(
    asset: &AssetInfo,
    info: &MessageInfo,
    contract: &Addr,
    amount: Uint128,
) -> Result<Option<CosmosMsg>, ContractError> {
    match asset {
        AssetInfo::Native { denom } => {
            if amount.is_zero() {
                assert_no_funds(info)?;
                return Ok(None);
            }
            let exact = info.funds.len() == 1
                && info.funds[0].denom == *denom
                && info.funds[0].amount == amount;
            if !exact {
                return Err(ContractError::FundsMismatch {
                    expected: amount,
                    denom: denom.clone(),
                });
            }
            Ok(None)
        }
        AssetInfo::Cw20 { .. } => {
            assert_no_funds(info)?;
            Ok(asset.transfer_from_msg(&info.sender, contract, amount)?)
        }
    }
}

/// Realize `account`'s pending reward against a settled ledger.
/// The payout is capped at the remaining reward; any shortfall is dropped.
fn harvest(ledger: &mut LedgerState, account: &UserAccount) -> Result<Uint128, ContractError> {
    if account.staked_amount.is_zero() {
        return Ok(Uint128::zero());
    }
    let pending = account.pending_reward(ledger.acc_reward_per_share)?;
    let payout = pending.min(ledger.total_remaining_reward);
    ledger.total_remaining_reward = ledger.total_remaining_reward.checked_sub(payout)?;
    Ok(payout)
}

fn with_transfer(response: Response, msg: Option<CosmosMsg>) -> Response {
    match msg {
        Some(msg) => response.add_message(msg),
        None => response,
    }
}

/// One-time pool setup. Only the instantiator may call this.
pub fn initialize(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    params: InitializeParams,
) -> Result<Response, ContractError> {
    let InitializeParams {
        staked_asset,
        reward_asset,
        reward_per_block,
        start_block,
        bonus_end_block,
        pool_limit_per_user,
        admin,
    } = params;

    if CONFIG.exists(deps.storage) {
        return Err(ContractError::AlreadyInitialized);
    }
    if info.sender != INITIALIZER.load(deps.storage)? {
        return Err(ContractError::Unauthorized {
            reason: "only the instantiator can initialize the pool".to_string(),
        });
    }
    assert_no_funds(&info)?;
    if start_block >= bonus_end_block {
        return Err(ContractError::InvalidBlockRange {
            start_block,
            bonus_end_block,
        });
    }

    let config = PoolConfig {
        staked_asset: staked_asset.check(deps.api)?,
        reward_asset: reward_asset.check(deps.api)?,
        reward_per_block,
        start_block,
        bonus_end_block,
        pool_limit_per_user,
        admin: deps.api.addr_validate(&admin)?,
        fee_recipient: None,
    };
    CONFIG.save(deps.storage, &config)?;
    LEDGER.save(deps.storage, &LedgerState::new(start_block))?;

    Ok(Response::new()
        .add_attribute("action", "initialize")
        .add_attribute("admin", config.admin.to_string())
        .add_event(
            Event::new("diamond_hand_initialized")
                .add_attribute("staked_asset", config.staked_asset.to_string())
                .add_attribute("reward_asset", config.reward_asset.to_string())
                .add_attribute("reward_per_block", reward_per_block.to_string())
                .add_attribute("start_block", start_block.to_string())
                .add_attribute("bonus_end_block", bonus_end_block.to_string())
                .add_attribute("pool_limit_per_user", pool_limit_per_user.to_string())
                .add_attribute("block", env.block.height.to_string()),
        ))
}

/// Stake `amount` and harvest pending reward. Restarts the penalty window.
pub fn deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let (config, mut ledger) = load_pool(deps.storage)?;
    let mut account = USERS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();

    let new_stake = account.staked_amount.checked_add(amount)?;
    if config.has_user_limit() && new_stake > config.pool_limit_per_user {
        return Err(ContractError::LimitExceeded {
            requested: new_stake,
            limit: config.pool_limit_per_user,
        });
    }
    let pull_msg = receive_asset(&config.staked_asset, &info, &env.contract.address, amount)?;

    let current_block = env.block.height;
    ledger.settle(&config, current_block)?;
    let reward = harvest(&mut ledger, &account)?;

    account.staked_amount = new_stake;
    account.reset_reward_debt(ledger.acc_reward_per_share)?;
    account.lock_anchor_block = current_block;
    ledger.total_staked = ledger.total_staked.checked_add(amount)?;

    USERS.save(deps.storage, &info.sender, &account)?;
    LEDGER.save(deps.storage, &ledger)?;

    let response = with_transfer(Response::new(), pull_msg);
    let response = with_transfer(
        response,
        config.reward_asset.transfer_msg(&info.sender, reward)?,
    );

    Ok(response
        .add_attribute("action", "deposit")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("reward", reward.to_string())
        .add_event(
            Event::new("diamond_hand_deposit")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("staked_amount", account.staked_amount.to_string())
                .add_attribute("reward_paid", reward.to_string())
                .add_attribute("total_staked", ledger.total_staked.to_string())
                .add_attribute("unlock_block", penalty::unlock_block(&account).to_string()),
        ))
}

/// Withdraw principal and harvest pending reward.
/// Inside the penalty window the fee goes to the fee recipient.
pub fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let (config, mut ledger) = load_pool(deps.storage)?;
    let mut account = USERS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();

    if amount.is_zero() || amount > account.staked_amount {
        return Err(ContractError::InsufficientStake {
            requested: amount,
            staked: account.staked_amount,
        });
    }

    let current_block = env.block.height;
    ledger.settle(&config, current_block)?;
    let reward = harvest(&mut ledger, &account)?;

    let locked = penalty::is_locked(&account, current_block);
    let penalty::FeeSplit { fee, net } = penalty::split(amount, locked);

    account.staked_amount = account.staked_amount.checked_sub(amount)?;
    account.reset_reward_debt(ledger.acc_reward_per_share)?;
    ledger.total_staked = ledger.total_staked.checked_sub(amount)?;

    USERS.save(deps.storage, &info.sender, &account)?;
    LEDGER.save(deps.storage, &ledger)?;

    let fee_recipient = config.fee_recipient();
    let response = with_transfer(
        Response::new(),
        config.reward_asset.transfer_msg(&info.sender, reward)?,
    );
    let response = with_transfer(response, config.staked_asset.transfer_msg(&info.sender, net)?);
    let response = with_transfer(response, config.staked_asset.transfer_msg(fee_recipient, fee)?);

    Ok(response
        .add_attribute("action", "withdraw")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("fee", fee.to_string())
        .add_attribute("reward", reward.to_string())
        .add_event(
            Event::new("diamond_hand_withdraw")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("net", net.to_string())
                .add_attribute("fee", fee.to_string())
                .add_attribute("fee_recipient", fee_recipient.to_string())
                .add_attribute("in_penalty_period", locked.to_string())
                .add_attribute("reward_paid", reward.to_string())
                .add_attribute("total_staked", ledger.total_staked.to_string()),
        ))
}

/// Withdraw the whole stake without settling. Pending reward is forfeited;
/// the early-withdrawal fee still applies inside the window.
pub fn emergency_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let (config, mut ledger) = load_pool(deps.storage)?;

    let Some(mut account) = USERS.may_load(deps.storage, &info.sender)? else {
        return Ok(Response::new()
            .add_attribute("action", "emergency_withdraw")
            .add_attribute("user", info.sender.to_string())
            .add_attribute("amount", "0"));
    };

    let amount = account.staked_amount;
    let locked = penalty::is_locked(&account, env.block.height);
    let penalty::FeeSplit { fee, net } = penalty::split(amount, locked);

    account.staked_amount = Uint128::zero();
    account.reward_debt = Uint128::zero();
    ledger.total_staked = ledger.total_staked.checked_sub(amount)?;

    USERS.save(deps.storage, &info.sender, &account)?;
    LEDGER.save(deps.storage, &ledger)?;

    let fee_recipient = config.fee_recipient();
    let response = with_transfer(
        Response::new(),
        config.staked_asset.transfer_msg(&info.sender, net)?,
    );
    let response = with_transfer(response, config.staked_asset.transfer_msg(fee_recipient, fee)?);

    Ok(response
        .add_attribute("action", "emergency_withdraw")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("fee", fee.to_string())
        .add_event(
            Event::new("diamond_hand_emergency_withdraw")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("net", net.to_string())
                .add_attribute("fee", fee.to_string())
                .add_attribute("fee_recipient", fee_recipient.to_string())
                .add_attribute("in_penalty_period", locked.to_string())
                .add_attribute("total_staked", ledger.total_staked.to_string()),
        ))
}

/// Fund the reward pool. Admin only.
/// Raises the payout ceiling; the emission schedule is untouched.
pub fn deposit_reward(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let (config, mut ledger) = load_pool(deps.storage)?;
    assert_admin(&config, &info.sender, "deposit reward")?;

    let pull_msg = receive_asset(&config.reward_asset, &info, &env.contract.address, amount)?;
    ledger.total_remaining_reward = ledger.total_remaining_reward.checked_add(amount)?;
    LEDGER.save(deps.storage, &ledger)?;

    Ok(with_transfer(Response::new(), pull_msg)
        .add_attribute("action", "deposit_reward")
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("diamond_hand_reward_funded")
                .add_attribute("amount", amount.to_string())
                .add_attribute(
                    "total_remaining_reward",
                    ledger.total_remaining_reward.to_string(),
                ),
        ))
}

/// Reclaim reward that has not been paid out. Admin only.
pub fn admin_withdraw(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let (config, mut ledger) = load_pool(deps.storage)?;
    assert_admin(&config, &info.sender, "withdraw reward")?;

    if amount > ledger.total_remaining_reward {
        return Err(ContractError::ExceedsRemainingReward {
            requested: amount,
            remaining: ledger.total_remaining_reward,
        });
    }
    ledger.total_remaining_reward = ledger.total_remaining_reward.checked_sub(amount)?;
    LEDGER.save(deps.storage, &ledger)?;

    Ok(with_transfer(
        Response::new(),
        config.reward_asset.transfer_msg(&config.admin, amount)?,
    )
    .add_attribute("action", "admin_withdraw")
    .add_attribute("amount", amount.to_string())
    .add_event(
        Event::new("diamond_hand_reward_reclaimed")
            .add_attribute("admin", config.admin.to_string())
            .add_attribute("amount", amount.to_string())
            .add_attribute(
                "total_remaining_reward",
                ledger.total_remaining_reward.to_string(),
            ),
    ))
}

/// Change the emission rate. Blocks up to now settle at the old rate first.
pub fn update_reward_per_block(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    reward_per_block: Uint128,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let (mut config, mut ledger) = load_pool(deps.storage)?;
    assert_admin(&config, &info.sender, "update reward per block")?;

    ledger.settle(&config, env.block.height)?;
    let previous = config.reward_per_block;
    config.reward_per_block = reward_per_block;

    LEDGER.save(deps.storage, &ledger)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_reward_per_block")
        .add_event(
            Event::new("diamond_hand_reward_per_block_updated")
                .add_attribute("previous", previous.to_string())
                .add_attribute("reward_per_block", reward_per_block.to_string())
                .add_attribute("block", env.block.height.to_string()),
        ))
}

pub fn set_fee_recipient(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    fee_recipient: String,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let (mut config, _) = load_pool(deps.storage)?;
    assert_admin(&config, &info.sender, "set fee recipient")?;

    let fee_recipient = deps.api.addr_validate(&fee_recipient)?;
    config.fee_recipient = Some(fee_recipient.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_fee_recipient")
        .add_attribute("fee_recipient", fee_recipient.to_string()))
}

pub fn set_pool_limit_per_user(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    pool_limit_per_user: Uint128,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let (mut config, _) = load_pool(deps.storage)?;
    assert_admin(&config, &info.sender, "set pool limit per user")?;

    config.pool_limit_per_user = pool_limit_per_user;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_pool_limit_per_user")
        .add_attribute("pool_limit_per_user", pool_limit_per_user.to_string()))
}

/// End emission at the current block. Already-accrued reward stays claimable.
pub fn stop_reward(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let (mut config, mut ledger) = load_pool(deps.storage)?;
    assert_admin(&config, &info.sender, "stop reward")?;

    ledger.settle(&config, env.block.height)?;
    config.bonus_end_block = config.bonus_end_block.min(env.block.height);

    LEDGER.save(deps.storage, &ledger)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "stop_reward")
        .add_attribute("bonus_end_block", config.bonus_end_block.to_string()))
}

/// Move the emission window. Only allowed while the pool has not started.
pub fn update_start_and_end_blocks(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    start_block: u64,
    bonus_end_block: u64,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let (mut config, mut ledger) = load_pool(deps.storage)?;
    assert_admin(&config, &info.sender, "update start and end blocks")?;

    let current_block = env.block.height;
    if current_block >= config.start_block {
        return Err(ContractError::PoolAlreadyStarted {
            start_block: config.start_block,
        });
    }
    if start_block >= bonus_end_block || current_block >= start_block {
        return Err(ContractError::InvalidBlockRange {
            start_block,
            bonus_end_block,
        });
    }

    config.start_block = start_block;
    config.bonus_end_block = bonus_end_block;
    ledger.last_settled_block = start_block;

    CONFIG.save(deps.storage, &config)?;
    LEDGER.save(deps.storage, &ledger)?;

    Ok(Response::new()
        .add_attribute("action", "update_start_and_end_blocks")
        .add_attribute("start_block", start_block.to_string())
        .add_attribute("bonus_end_block", bonus_end_block.to_string()))
}

/// Send a stray asset to the admin. The staked and reward assets are off limits.
pub fn recover_wrong_tokens(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    asset: AssetInfoUnchecked,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let (config, _) = load_pool(deps.storage)?;
    assert_admin(&config, &info.sender, "recover tokens")?;

    let asset = asset.check(deps.api)?;
    if asset == config.staked_asset || asset == config.reward_asset {
        return Err(ContractError::CannotRecoverPoolAsset);
    }

    Ok(with_transfer(
        Response::new(),
        asset.transfer_msg(&config.admin, amount)?,
    )
    .add_attribute("action", "recover_wrong_tokens")
    .add_attribute("asset", asset.to_string())
    .add_attribute("amount", amount.to_string()))
}

pub fn update_admin(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let (mut config, _) = load_pool(deps.storage)?;
    assert_admin(&config, &info.sender, "update admin")?;

    let previous = config.admin.clone();
    config.admin = deps.api.addr_validate(&admin)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_admin")
        .add_event(
            Event::new("diamond_hand_admin_updated")
                .add_attribute("previous", previous.to_string())
                .add_attribute("admin", config.admin.to_string()),
        ))
}
