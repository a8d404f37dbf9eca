// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Wire shapes of the node's JSON-RPC control interface.
//!
//! Argument and reply structs mirror the node's field names. Replies carry more
//! fields than listed; unknown ones are ignored.

use dlc_kernel::contract::{Contract, Oracle};
use dlc_kernel::types::{ContractIdx, OracleIdx, OracleSignature, PeerIdx, RPoint};
use serde::{Deserialize, Serialize};

/// Path the node serves one-shot JSON-RPC requests on.
pub const RPC_PATH: &str = "/oneoff";

/// Service prefix of every method name.
pub const SERVICE: &str = "LitRPC";

#[derive(Serialize, Deserialize, Debug)]
pub struct RpcRequest<P> {
    pub method: String,
    pub params: [P; 1],
    pub id: u64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RpcResponse<R> {
    pub id: u64,
    pub result: Option<R>,
    pub error: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct NoArgs {}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct StatusReply {
    #[serde(default)]
    pub status: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct SuccessReply {
    #[serde(default)]
    pub success: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListenArgs {
    /// Bind address, e.g. ":2448".
    pub port: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ListeningPortsReply {
    #[serde(rename = "LisIpPorts", default)]
    pub listening_ports: Vec<String>,
    /// Address derived from the node's identity key.
    #[serde(rename = "Adr")]
    pub adr: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ConnectArgs {
    /// `address@host:port`.
    #[serde(rename = "LNAddr")]
    pub ln_addr: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListOraclesReply {
    #[serde(default)]
    pub oracles: Vec<Oracle>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct AddOracleArgs {
    /// Hex-encoded compressed public key.
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct AddOracleReply {
    pub oracle: Oracle,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ContractReply {
    pub contract: Contract,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListContractsReply {
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct GetContractArgs {
    pub idx: ContractIdx,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ContractIdxArgs {
    #[serde(rename = "CIdx")]
    pub c_idx: ContractIdx,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetOracleArgs {
    #[serde(rename = "CIdx")]
    pub c_idx: ContractIdx,
    #[serde(rename = "OIdx")]
    pub o_idx: OracleIdx,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetSettlementTimeArgs {
    #[serde(rename = "CIdx")]
    pub c_idx: ContractIdx,
    #[serde(rename = "Time")]
    pub time: u64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetCoinTypeArgs {
    #[serde(rename = "CIdx")]
    pub c_idx: ContractIdx,
    #[serde(rename = "CoinType")]
    pub coin_type: u32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetRPointArgs {
    #[serde(rename = "CIdx")]
    pub c_idx: ContractIdx,
    #[serde(rename = "RPoint")]
    pub r_point: RPoint,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetFundingArgs {
    #[serde(rename = "CIdx")]
    pub c_idx: ContractIdx,
    #[serde(rename = "OurAmount")]
    pub our_amount: i64,
    #[serde(rename = "TheirAmount")]
    pub their_amount: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetDivisionArgs {
    #[serde(rename = "CIdx")]
    pub c_idx: ContractIdx,
    #[serde(rename = "ValueFullyOurs")]
    pub value_fully_ours: i64,
    #[serde(rename = "ValueFullyTheirs")]
    pub value_fully_theirs: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OfferContractArgs {
    #[serde(rename = "CIdx")]
    pub c_idx: ContractIdx,
    #[serde(rename = "PeerIdx")]
    pub peer_idx: PeerIdx,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SettleContractArgs {
    #[serde(rename = "CIdx")]
    pub c_idx: ContractIdx,
    #[serde(rename = "OracleValue")]
    pub oracle_value: i64,
    #[serde(rename = "OracleSig")]
    pub oracle_sig: OracleSignature,
}
