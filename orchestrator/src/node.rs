// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The control interface a peer node exposes to the orchestrator.

use dlc_kernel::contract::{Contract, Oracle};
use dlc_kernel::types::{ContractIdx, OracleIdx, OracleSignature, PeerIdx, RPoint};

use crate::errors::NodeError;

/// One request/response call per node operation. Each call completes before the
/// orchestrator issues the next; effects on the other node (offer delivery,
/// funding confirmation) arrive asynchronously.
#[allow(async_fn_in_trait)]
pub trait NodeClient {
    /// Short name used in logs.
    fn label(&self) -> &str;

    /// Start accepting peer connections on `bind`, e.g. `":2448"`.
    async fn listen(&self, bind: &str) -> Result<(), NodeError>;

    /// Routable address derived from the node's identity key.
    async fn peer_address(&self) -> Result<String, NodeError>;

    async fn connect(&self, address: &str, host: &str, port: u16) -> Result<(), NodeError>;

    async fn list_oracles(&self) -> Result<Vec<Oracle>, NodeError>;

    async fn add_oracle(&self, key_hex: &str, name: &str) -> Result<Oracle, NodeError>;

    async fn new_contract(&self) -> Result<Contract, NodeError>;

    async fn set_contract_oracle(&self, contract: ContractIdx, oracle: OracleIdx) -> Result<(), NodeError>;

    async fn set_contract_settlement_time(&self, contract: ContractIdx, time: u64) -> Result<(), NodeError>;

    async fn set_contract_coin_type(&self, contract: ContractIdx, coin_type: u32) -> Result<(), NodeError>;

    async fn set_contract_r_point(&self, contract: ContractIdx, r_point: &RPoint) -> Result<(), NodeError>;

    async fn set_contract_funding(&self, contract: ContractIdx, ours: i64, theirs: i64) -> Result<(), NodeError>;

    async fn set_contract_division(
        &self,
        contract: ContractIdx,
        value_fully_ours: i64,
        value_fully_theirs: i64,
    ) -> Result<(), NodeError>;

    async fn offer_contract(&self, contract: ContractIdx, peer: PeerIdx) -> Result<(), NodeError>;

    async fn list_contracts(&self) -> Result<Vec<Contract>, NodeError>;

    async fn accept_contract(&self, contract: ContractIdx) -> Result<(), NodeError>;

    async fn get_contract(&self, contract: ContractIdx) -> Result<Contract, NodeError>;

    async fn settle_contract(
        &self,
        contract: ContractIdx,
        oracle_value: i64,
        oracle_sig: &OracleSignature,
    ) -> Result<(), NodeError>;
}
