// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Linking the two peer nodes so offers can travel between them.

use crate::config::{OrchestratorConfig, PeerEndpoint};
use crate::errors::OrchestratorError;
use crate::lifecycle::Phase;
use crate::node::NodeClient;

/// Listen addresses and dial target for one connection attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerLink {
    pub offerer_bind: String,
    pub acceptor_bind: String,
    pub connect_host: String,
    pub connect_port: u16,
}

impl PeerLink {
    pub fn new(offerer: &PeerEndpoint, acceptor: &PeerEndpoint, connect_host: &str) -> Self {
        Self {
            offerer_bind: offerer.listen_addr(),
            acceptor_bind: acceptor.listen_addr(),
            connect_host: connect_host.to_string(),
            connect_port: acceptor.listen_port,
        }
    }

    pub fn from_config(cfg: &OrchestratorConfig) -> Self {
        Self::new(&cfg.offerer, &cfg.acceptor, &cfg.connect_host)
    }
}

/// Have both nodes listen, then dial the acceptor from the offerer.
///
/// Any failure aborts; nothing is retried. A successful return only means the
/// dial was accepted by the offerer. Messages over the new session arrive later.
pub async fn connect_peers<C: NodeClient>(
    offerer: &C,
    acceptor: &C,
    link: &PeerLink,
) -> Result<(), OrchestratorError> {
    const PHASE: Phase = Phase::Connected;

    offerer
        .listen(&link.offerer_bind)
        .await
        .map_err(OrchestratorError::call(PHASE, "Listen"))?;
    acceptor
        .listen(&link.acceptor_bind)
        .await
        .map_err(OrchestratorError::call(PHASE, "Listen"))?;

    let address = acceptor
        .peer_address()
        .await
        .map_err(OrchestratorError::call(PHASE, "GetPeerAddress"))?;
    tracing::debug!(node = acceptor.label(), %address, "peer address");

    offerer
        .connect(&address, &link.connect_host, link.connect_port)
        .await
        .map_err(OrchestratorError::call(PHASE, "Connect"))?;

    tracing::info!(
        from = offerer.label(),
        to = acceptor.label(),
        "connected {}@{}:{}",
        address,
        link.connect_host,
        link.connect_port
    );
    Ok(())
}
