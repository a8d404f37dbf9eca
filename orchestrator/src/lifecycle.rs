// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The contract lifecycle, from unconnected nodes to a settled contract.
//!
//! Phases run strictly in order. The first failing call ends the run; nothing
//! already done on the nodes is rolled back.

use std::fmt;

use dlc_kernel::contract::Contract;
use dlc_kernel::terms::ContractTerms;
use dlc_kernel::types::{ContractIdx, ContractStatus, OraclePublicKey};
use tokio_util::sync::CancellationToken;

use crate::builder::build_contract;
use crate::config::OrchestratorConfig;
use crate::connector::{connect_peers, PeerLink};
use crate::errors::OrchestratorError;
use crate::gate::SettlementGate;
use crate::node::NodeClient;
use crate::oracle::{ensure_oracle_on_both, OracleBinding};
use crate::poll::{poll_until, sleep_or_cancel, PollOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Init,
    Connected,
    OracleReady,
    Drafted,
    Offered,
    Exchanged,
    Accepted,
    Active,
    Settled,
}

impl fmt::Display for Phase {
    /// Describes the work that leads into the phase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Init => "initializing",
            Phase::Connected => "connecting nodes",
            Phase::OracleReady => "ensuring oracle",
            Phase::Drafted => "creating contract",
            Phase::Offered => "offering contract",
            Phase::Exchanged => "waiting for contract exchange",
            Phase::Accepted => "accepting contract",
            Phase::Active => "waiting for activation",
            Phase::Settled => "settling contract",
        };
        f.write_str(s)
    }
}

/// What a completed run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementReport {
    pub oracles: OracleBinding,
    /// Contract index on the offering node.
    pub offerer_contract: ContractIdx,
    /// Index of the same contract on the accepting node.
    pub acceptor_contract: ContractIdx,
    /// Status reads it took to see the contract active.
    pub activation_polls: u32,
    /// Status read back after settling, if that read succeeded.
    pub final_status: Option<ContractStatus>,
}

pub struct Orchestrator<C, G> {
    cfg: OrchestratorConfig,
    offerer: C,
    acceptor: C,
    gate: G,
    cancel: CancellationToken,
    phase: Phase,
}

impl<C: NodeClient, G: SettlementGate> Orchestrator<C, G> {
    pub fn new(cfg: OrchestratorConfig, offerer: C, acceptor: C, gate: G) -> Self {
        Self {
            cfg,
            offerer,
            acceptor,
            gate,
            cancel: CancellationToken::new(),
            phase: Phase::Init,
        }
    }

    /// Replace the token observed during waits.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Last phase reached.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn offerer(&self) -> &C {
        &self.offerer
    }

    pub fn acceptor(&self) -> &C {
        &self.acceptor
    }

    /// Drive the contract through every phase up to settlement.
    pub async fn run(&mut self) -> Result<SettlementReport, OrchestratorError> {
        println!("Connecting nodes together...");
        connect_peers(&self.offerer, &self.acceptor, &PeerLink::from_config(&self.cfg)).await?;
        self.advance(Phase::Connected);

        println!("Ensuring oracle is available...");
        let oracles = ensure_oracle_on_both(
            &self.offerer,
            &self.acceptor,
            &self.cfg.oracle_key,
            &self.cfg.oracle_label,
        )
        .await?;
        tracing::info!(offerer = %oracles.offerer, acceptor = %oracles.acceptor, "oracle indices");
        self.advance(Phase::OracleReady);

        println!("Creating the contract...");
        let contract = build_contract(&self.offerer, oracles.offerer, &self.cfg.terms).await?;
        self.advance(Phase::Drafted);

        println!("Offering the contract to the other peer...");
        self.offerer
            .offer_contract(contract, self.cfg.offer_peer)
            .await
            .map_err(OrchestratorError::call(Phase::Offered, "OfferContract"))?;
        self.advance(Phase::Offered);

        println!("Waiting for the contract to be exchanged...");
        let offer = self.await_exchange(contract).await?;
        self.advance(Phase::Exchanged);

        println!("Accepting the contract on the other peer...");
        self.acceptor
            .accept_contract(offer)
            .await
            .map_err(OrchestratorError::call(Phase::Accepted, "AcceptContract"))?;
        self.advance(Phase::Accepted);

        println!("Waiting for the contract to be activated...");
        let activation_polls = self.await_activation(contract).await?;
        self.advance(Phase::Active);

        if self.cfg.wait_for_operator {
            println!("Contract active. Generate a block on regtest and press enter");
        }
        tokio::select! {
            res = self.gate.wait(contract) => res?,
            _ = self.cancel.cancelled() => return Err(OrchestratorError::Cancelled { phase: Phase::Settled }),
        }

        println!("Settling the contract...");
        let attestation = self.cfg.attestation;
        let division = self.cfg.terms.division;
        if !division.covers(attestation.value) {
            tracing::warn!(value = attestation.value, "attested value lies outside the division thresholds");
        }
        match division.settles_fully_to(attestation.value) {
            Some(side) => tracing::info!(value = attestation.value, ?side, "attested value pays out fully"),
            None => tracing::info!(value = attestation.value, "attested value splits the funds"),
        }
        self.offerer
            .settle_contract(contract, attestation.value, &attestation.signature)
            .await
            .map_err(OrchestratorError::call(Phase::Settled, "SettleContract"))?;
        self.advance(Phase::Settled);

        let final_status = match self.offerer.get_contract(contract).await {
            Ok(c) => Some(c.status),
            Err(e) => {
                tracing::warn!(%contract, "could not read contract after settling: {}", e);
                None
            }
        };

        Ok(SettlementReport {
            oracles,
            offerer_contract: contract,
            acceptor_contract: offer,
            activation_polls,
            final_status,
        })
    }

    fn advance(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }

    /// Wait for the offer of `offered` to show up on the acceptor and pick it.
    async fn await_exchange(&self, offered: ContractIdx) -> Result<ContractIdx, OrchestratorError> {
        let propagation = self.cfg.propagation;
        if !sleep_or_cancel(propagation.settle_delay, &self.cancel).await {
            return Err(OrchestratorError::Cancelled { phase: Phase::Exchanged });
        }

        let outcome = poll_until(&propagation.verify, &self.cancel, |attempt| async move {
            let contracts = self
                .acceptor
                .list_contracts()
                .await
                .map_err(OrchestratorError::call(Phase::Exchanged, "ListContracts"))?;
            let picked = select_offer(
                &contracts,
                &self.cfg.terms,
                &self.cfg.oracle_key,
                offered,
                self.cfg.acceptor_contract,
            )?;
            if picked.is_none() {
                tracing::debug!(attempt, "offer not visible on {} yet", self.acceptor.label());
            }
            Ok::<_, OrchestratorError>(picked)
        })
        .await?;

        match outcome {
            PollOutcome::Ready { value, attempts } => {
                tracing::debug!(contract = %value, attempts, "offer received");
                Ok(value)
            }
            PollOutcome::Exhausted { attempts } => {
                tracing::warn!(attempts, "no matching offer on {}", self.acceptor.label());
                Err(OrchestratorError::NoContractToAccept)
            }
            PollOutcome::Cancelled { .. } => Err(OrchestratorError::Cancelled { phase: Phase::Exchanged }),
        }
    }

    /// Poll the offerer's view of the contract until it reports active.
    async fn await_activation(&self, contract: ContractIdx) -> Result<u32, OrchestratorError> {
        let outcome = poll_until(&self.cfg.activation, &self.cancel, |attempt| async move {
            let c = self
                .offerer
                .get_contract(contract)
                .await
                .map_err(OrchestratorError::call(Phase::Active, "GetContract"))?;
            match c.status {
                ContractStatus::Active => Ok::<_, OrchestratorError>(Some(())),
                ContractStatus::Declined | ContractStatus::Error => {
                    Err(OrchestratorError::ContractRejected { contract, status: c.status })
                }
                status => {
                    tracing::trace!(attempt, ?status, "contract not active yet");
                    Ok(None)
                }
            }
        })
        .await?;

        match outcome {
            PollOutcome::Ready { attempts, .. } => Ok(attempts),
            PollOutcome::Exhausted { attempts } => Err(OrchestratorError::ActivationTimeout { contract, attempts }),
            PollOutcome::Cancelled { .. } => Err(OrchestratorError::Cancelled { phase: Phase::Active }),
        }
    }
}

/// Pick the acceptor-side contract to accept.
///
/// Only contracts offered to this node count. An explicit index wins. Without
/// one the offer must match the drafted terms. Among matches, the one whose
/// counterparty index points back at `offered` is taken; matches pointing at
/// some other draft are leftovers from earlier offers and are skipped. When
/// the node reports no back link, the unlinked matches must be unique, and
/// more than one is an error rather than a guess.
pub fn select_offer(
    contracts: &[Contract],
    terms: &ContractTerms,
    oracle: &OraclePublicKey,
    offered: ContractIdx,
    explicit: Option<ContractIdx>,
) -> Result<Option<ContractIdx>, OrchestratorError> {
    if let Some(idx) = explicit {
        return Ok(contracts
            .iter()
            .find(|c| c.idx == idx && c.status == ContractStatus::OfferedToMe)
            .map(|c| c.idx));
    }

    let matching: Vec<&Contract> = contracts.iter().filter(|c| terms.matches_offer(c, oracle)).collect();

    let linked: Vec<ContractIdx> = matching
        .iter()
        .filter(|c| c.their_idx == offered)
        .map(|c| c.idx)
        .collect();
    let candidates = if linked.is_empty() {
        matching
            .iter()
            .filter(|c| c.their_idx == ContractIdx::default())
            .map(|c| c.idx)
            .collect()
    } else {
        linked
    };

    match candidates.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        _ => Err(OrchestratorError::AmbiguousOffer { candidates }),
    }
}
