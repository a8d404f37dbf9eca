// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use dlc_kernel::error::KernelError;
use dlc_kernel::types::{ContractIdx, ContractStatus};
use thiserror::Error;

use crate::lifecycle::Phase;

/// Failure of a single call against a peer node.
#[derive(Error, Debug)]
pub enum NodeError {
    /// The node could not be reached or did not answer in time.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The node answered and refused the request.
    #[error("{method} rejected by node: {message}")]
    Remote { method: String, message: String },
    #[error("Bad reply to {method}: {reason}")]
    Decode { method: String, reason: String },
}

impl NodeError {
    /// Transport failures are the retryable class; the run still treats them as fatal.
    pub fn is_transport(&self) -> bool {
        matches!(self, NodeError::Transport(_))
    }
}

impl From<reqwest::Error> for NodeError {
    fn from(e: reqwest::Error) -> Self {
        NodeError::Transport(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("{phase}: {call} failed: {source}")]
    Call {
        phase: Phase,
        call: &'static str,
        source: NodeError,
    },
    #[error("No contract found to accept")]
    NoContractToAccept,
    #[error("Ambiguous offer: contracts {candidates:?} all match the drafted terms")]
    AmbiguousOffer { candidates: Vec<ContractIdx> },
    /// The node gave up on the contract while it was being activated.
    #[error("Contract {contract} ended up {status:?} instead of active")]
    ContractRejected { contract: ContractIdx, status: ContractStatus },
    #[error("Contract {contract} not active after {attempts} polls")]
    ActivationTimeout { contract: ContractIdx, attempts: u32 },
    #[error("Cancelled while {phase}")]
    Cancelled { phase: Phase },
    #[error("Operator gate failed: {0}")]
    Gate(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] KernelError),
}

impl OrchestratorError {
    pub(crate) fn call(phase: Phase, call: &'static str) -> impl FnOnce(NodeError) -> Self {
        move |source| OrchestratorError::Call { phase, call, source }
    }

    /// Phase the run was trying to reach when it aborted.
    pub fn phase(&self) -> Phase {
        match self {
            OrchestratorError::Call { phase, .. } | OrchestratorError::Cancelled { phase } => *phase,
            OrchestratorError::NoContractToAccept | OrchestratorError::AmbiguousOffer { .. } => Phase::Accepted,
            OrchestratorError::ContractRejected { .. } | OrchestratorError::ActivationTimeout { .. } => {
                Phase::Active
            }
            OrchestratorError::Gate(_) => Phase::Settled,
            OrchestratorError::Config(_) => Phase::Init,
        }
    }

    /// The node-level error behind this failure, if any.
    pub fn node_error(&self) -> Option<&NodeError> {
        match self {
            OrchestratorError::Call { source, .. } => Some(source),
            _ => None,
        }
    }
}
