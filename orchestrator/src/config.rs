// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::time::Duration;

use dlc_kernel::config::{TUTORIAL_ORACLE_LABEL, TUTORIAL_ORACLE_PUBKEY};
use dlc_kernel::error::KernelResult;
use dlc_kernel::terms::{Attestation, ContractTerms};
use dlc_kernel::types::{ContractIdx, OraclePublicKey, PeerIdx};

use crate::poll::PollPolicy;

/// Where one peer node's control interface and peer listener live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerEndpoint {
    pub label: String,
    pub host: String,
    pub rpc_port: u16,
    /// Port the node is told to accept peer connections on.
    pub listen_port: u16,
}

impl PeerEndpoint {
    pub fn rpc_url(&self) -> String {
        format!("http://{}:{}", self.host, self.rpc_port)
    }

    /// Bind address in the form the node's listen call takes.
    pub fn listen_addr(&self) -> String {
        format!(":{}", self.listen_port)
    }
}

/// How long to give an offer to reach the counterparty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagationPolicy {
    /// Blind wait right after offering.
    pub settle_delay: Duration,
    /// Follow-up check on the counterparty's contract list.
    pub verify: PollPolicy,
}

#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Node that drafts, offers and settles.
    pub offerer: PeerEndpoint,
    /// Node that accepts.
    pub acceptor: PeerEndpoint,
    /// Host the offerer dials to reach the acceptor's listener.
    pub connect_host: String,
    pub oracle_key: OraclePublicKey,
    pub oracle_label: String,
    pub terms: ContractTerms,
    pub attestation: Attestation,
    /// Ordinal under which the offerer knows the acceptor.
    pub offer_peer: PeerIdx,
    /// Acceptor-side index of the offer to accept. When unset the offer is
    /// found by matching the drafted terms.
    pub acceptor_contract: Option<ContractIdx>,
    pub propagation: PropagationPolicy,
    pub activation: PollPolicy,
    pub rpc_timeout: Duration,
    /// Pause for the operator before settling.
    pub wait_for_operator: bool,
}

impl OrchestratorConfig {
    /// Two local regtest nodes settling the tutorial contract.
    pub fn tutorial() -> KernelResult<Self> {
        Ok(Self {
            offerer: PeerEndpoint {
                label: "lit1".to_string(),
                host: "localhost".to_string(),
                rpc_port: 8001,
                listen_port: 2448,
            },
            acceptor: PeerEndpoint {
                label: "lit2".to_string(),
                host: "localhost".to_string(),
                rpc_port: 8002,
                listen_port: 2449,
            },
            connect_host: "localhost".to_string(),
            oracle_key: OraclePublicKey::from_hex(TUTORIAL_ORACLE_PUBKEY)?,
            oracle_label: TUTORIAL_ORACLE_LABEL.to_string(),
            terms: ContractTerms::tutorial()?,
            attestation: Attestation::tutorial()?,
            offer_peer: PeerIdx(1),
            acceptor_contract: None,
            propagation: PropagationPolicy {
                settle_delay: Duration::from_secs(2),
                verify: PollPolicy::bounded(Duration::from_millis(500), 10),
            },
            activation: PollPolicy::unbounded(Duration::from_millis(500)),
            rpc_timeout: Duration::from_secs(30),
            wait_for_operator: true,
        })
    }
}
