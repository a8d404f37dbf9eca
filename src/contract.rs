// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Oracle and contract records as a node reports them.
//!
//! Field names follow the node's JSON. Fields the orchestrator never reads are
//! dropped on deserialization.

use serde::{Deserialize, Serialize};

use crate::types::{ContractIdx, ContractStatus, OracleIdx, OraclePublicKey, PeerIdx, RPoint};

/// An oracle registered with one node.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Oracle {
    pub idx: OracleIdx,
    #[serde(rename = "A")]
    pub public_key: OraclePublicKey,
    pub url: String,
    pub name: String,
}

/// A contract record local to one node.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Contract {
    pub idx: ContractIdx,
    /// Index of the mirrored record on the counterparty, once exchanged.
    pub their_idx: ContractIdx,
    pub peer_idx: PeerIdx,
    pub coin_type: u32,
    #[serde(rename = "OracleA")]
    pub oracle_key: OraclePublicKey,
    #[serde(rename = "OracleR")]
    pub r_point: RPoint,
    #[serde(rename = "OracleTimestamp")]
    pub settlement_time: u64,
    pub our_funding_amount: i64,
    pub their_funding_amount: i64,
    pub status: ContractStatus,
}
