use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    coins, to_json_binary, Addr, Api, BankMsg, CosmosMsg, StdError, StdResult, Uint128, WasmMsg,
};

/// A fungible asset held by the pool: either a bank denom or a CW20 token contract.
#[cw_serde]
pub enum AssetInfo {
    Native { denom: String },
    Cw20 { contract_addr: Addr },
}

/// Unvalidated [`AssetInfo`] as it arrives in execute messages.
#[cw_serde]
pub enum AssetInfoUnchecked {
    Native { denom: String },
    Cw20 { contract_addr: String },
}

/// The subset of the CW20 execute interface the pool calls.
/// Mirrors `cw20::Cw20ExecuteMsg` so the wire format matches any conforming token.
#[cw_serde]
pub enum Cw20ExecuteMsg {
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
}

impl AssetInfoUnchecked {
    pub fn check(self, api: &dyn Api) -> StdResult<AssetInfo> {
        match self {
            AssetInfoUnchecked::Native { denom } => {
                if denom.trim().is_empty() {
                    return Err(StdError::generic_err("native denom cannot be empty"));
                }
                Ok(AssetInfo::Native { denom })
            }
            AssetInfoUnchecked::Cw20 { contract_addr } => Ok(AssetInfo::Cw20 {
                contract_addr: api.addr_validate(&contract_addr)?,
            }),
        }
    }
}

impl AssetInfo {
    /// Build the message that sends `amount` from the contract to `recipient`.
    /// Zero amounts produce no message.
    pub fn transfer_msg(&self, recipient: &Addr, amount: Uint128) -> StdResult<Option<CosmosMsg>> {
        if amount.is_zero() {
            return Ok(None);
        }
        let msg: CosmosMsg = match self {
            AssetInfo::Native { denom } => BankMsg::Send {
                to_address: recipient.to_string(),
                amount: coins(amount.u128(), denom),
            }
            .into(),
            AssetInfo::Cw20 { contract_addr } => WasmMsg::Execute {
                contract_addr: contract_addr.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                    recipient: recipient.to_string(),
                    amount,
                })?,
                funds: vec![],
            }
            .into(),
        };
        Ok(Some(msg))
    }

    /// Build the message that pulls `amount` from `owner` into `recipient` using the
    /// allowance `owner` granted. Native assets arrive as attached funds instead,
    /// so they never produce a message here.
    pub fn transfer_from_msg(
        &self,
        owner: &Addr,
        recipient: &Addr,
        amount: Uint128,
    ) -> StdResult<Option<CosmosMsg>> {
        match self {
            AssetInfo::Native { .. } => Ok(None),
            AssetInfo::Cw20 { .. } if amount.is_zero() => Ok(None),
            AssetInfo::Cw20 { contract_addr } => Ok(Some(
                WasmMsg::Execute {
                    contract_addr: contract_addr.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                        owner: owner.to_string(),
                        recipient: recipient.to_string(),
                        amount,
                    })?,
                    funds: vec![],
                }
                .into(),
            )),
        }
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetInfo::Native { denom } => write!(f, "native:{}", denom),
            AssetInfo::Cw20 { contract_addr } => write!(f, "cw20:{}", contract_addr),
        }
    }
}
