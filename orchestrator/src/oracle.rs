// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Making sure each node knows the oracle.

use dlc_kernel::types::{OracleIdx, OraclePublicKey};

use crate::errors::OrchestratorError;
use crate::lifecycle::Phase;
use crate::node::NodeClient;

/// The oracle's index on each node. The two are unrelated numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OracleBinding {
    /// Bound into the draft.
    pub offerer: OracleIdx,
    /// Lets the acceptor validate the offer it receives.
    pub acceptor: OracleIdx,
}

/// Index of `key` on `node`, registering it under `label` if missing.
///
/// Matching is exact on the key bytes. Not retried: a blind retry after a
/// failed add could register the key twice.
pub async fn ensure_oracle<C: NodeClient>(
    node: &C,
    key: &OraclePublicKey,
    label: &str,
) -> Result<OracleIdx, OrchestratorError> {
    const PHASE: Phase = Phase::OracleReady;

    let oracles = node
        .list_oracles()
        .await
        .map_err(OrchestratorError::call(PHASE, "ListOracles"))?;

    if let Some(found) = oracles.iter().find(|o| o.public_key == *key) {
        tracing::debug!(node = node.label(), idx = %found.idx, "oracle already registered");
        return Ok(found.idx);
    }

    let added = node
        .add_oracle(&key.to_hex(), label)
        .await
        .map_err(OrchestratorError::call(PHASE, "AddOracle"))?;
    tracing::info!(node = node.label(), idx = %added.idx, "registered oracle {}", key);
    Ok(added.idx)
}

/// Register the oracle on both nodes. Both must succeed.
pub async fn ensure_oracle_on_both<C: NodeClient>(
    offerer: &C,
    acceptor: &C,
    key: &OraclePublicKey,
    label: &str,
) -> Result<OracleBinding, OrchestratorError> {
    let offerer_idx = ensure_oracle(offerer, key, label).await?;
    let acceptor_idx = ensure_oracle(acceptor, key, label).await?;
    Ok(OracleBinding {
        offerer: offerer_idx,
        acceptor: acceptor_idx,
    })
}
