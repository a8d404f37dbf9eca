// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Drafting a contract on the offering node.

use dlc_kernel::terms::ContractTerms;
use dlc_kernel::types::{ContractIdx, OracleIdx};

use crate::errors::OrchestratorError;
use crate::lifecycle::Phase;
use crate::node::NodeClient;

/// Create an empty draft and configure it call by call.
///
/// `oracle` must be an index on this same node. The first failing call aborts
/// and leaves the draft half-configured on the node; it is not cleaned up.
pub async fn build_contract<C: NodeClient>(
    node: &C,
    oracle: OracleIdx,
    terms: &ContractTerms,
) -> Result<ContractIdx, OrchestratorError> {
    let call = |name| OrchestratorError::call(Phase::Drafted, name);

    let draft = node.new_contract().await.map_err(call("NewContractDraft"))?;
    let idx = draft.idx;
    tracing::debug!(node = node.label(), contract = %idx, "draft created");

    node.set_contract_oracle(idx, oracle)
        .await
        .map_err(call("SetContractOracle"))?;
    node.set_contract_settlement_time(idx, terms.settlement_time)
        .await
        .map_err(call("SetContractSettlementTime"))?;
    node.set_contract_coin_type(idx, terms.coin_type)
        .await
        .map_err(call("SetContractCoinType"))?;
    node.set_contract_r_point(idx, &terms.r_point)
        .await
        .map_err(call("SetContractCommitmentPoint"))?;
    node.set_contract_funding(idx, terms.our_funding, terms.their_funding)
        .await
        .map_err(call("SetContractFunding"))?;
    node.set_contract_division(idx, terms.division.value_fully_ours, terms.division.value_fully_theirs)
        .await
        .map_err(call("SetContractDivision"))?;

    Ok(idx)
}
