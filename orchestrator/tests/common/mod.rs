// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Two peer nodes simulated in memory.
//!
//! Enough node behaviour to drive a contract end to end: peer links, oracle
//! registry, draft configuration, offer delivery, acceptance, activation on a
//! simulated block and settlement checked against known attestations.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use dlc_kernel::contract::{Contract, Oracle};
use dlc_kernel::terms::{Attestation, ContractTerms};
use dlc_kernel::types::{
    ContractIdx, ContractStatus, OracleIdx, OraclePublicKey, OracleSignature, PeerIdx, RPoint,
};
use dlc_orchestrator::config::OrchestratorConfig;
use dlc_orchestrator::errors::NodeError;
use dlc_orchestrator::node::NodeClient;
use dlc_orchestrator::poll::PollPolicy;

pub const OFFERER: usize = 0;
pub const ACCEPTOR: usize = 1;

/// Tutorial config with waits short enough for tests.
pub fn fast_config() -> OrchestratorConfig {
    let mut cfg = OrchestratorConfig::tutorial().unwrap();
    cfg.propagation.settle_delay = Duration::ZERO;
    cfg.propagation.verify = PollPolicy::bounded(Duration::from_millis(1), 3);
    cfg.activation = PollPolicy::unbounded(Duration::from_millis(1));
    cfg.wait_for_operator = false;
    cfg
}

#[derive(Default)]
struct SimContract {
    contract: Contract,
    oracle: Option<OracleIdx>,
    division: Option<(i64, i64)>,
}

#[derive(Default)]
struct SimNode {
    address: String,
    listening: Option<String>,
    /// Peer ordinal n refers to `peers[n - 1]`.
    peers: Vec<usize>,
    oracles: Vec<Oracle>,
    contracts: Vec<SimContract>,
}

impl SimNode {
    fn contract_mut(&mut self, idx: ContractIdx) -> Option<&mut SimContract> {
        self.contracts.iter_mut().find(|c| c.contract.idx == idx)
    }

    fn draft_mut(&mut self, idx: ContractIdx) -> Result<&mut SimContract, String> {
        match self.contract_mut(idx) {
            None => Err(format!("contract {} not found", idx)),
            Some(c) if c.contract.status != ContractStatus::Draft => {
                Err(format!("contract {} is not a draft", idx))
            }
            Some(c) => Ok(c),
        }
    }
}

#[derive(Default)]
struct SimState {
    nodes: [SimNode; 2],
    calls: Vec<(usize, &'static str)>,
    failures: HashMap<(usize, &'static str), NodeErrorKind>,
    attestations: HashMap<(OraclePublicKey, RPoint, i64), OracleSignature>,
    hold_offers: bool,
    activate_after_polls: Option<u32>,
    pending_polls: u32,
    decline_accepted: bool,
    observed: Vec<ContractStatus>,
}

#[derive(Clone)]
enum NodeErrorKind {
    Remote(String),
    Transport,
}

impl SimState {
    /// Log the call and apply any injected failure.
    fn enter(&mut self, node: usize, method: &'static str) -> Result<(), NodeError> {
        self.calls.push((node, method));
        match self.failures.get(&(node, method)) {
            None => Ok(()),
            Some(NodeErrorKind::Remote(msg)) => Err(remote(method, msg)),
            Some(NodeErrorKind::Transport) => Err(NodeError::Transport(format!("{} timed out", method))),
        }
    }

    fn mine(&mut self) {
        for node in &mut self.nodes {
            for c in &mut node.contracts {
                if c.contract.status == ContractStatus::Accepted {
                    c.contract.status = ContractStatus::Active;
                }
            }
        }
    }
}

fn remote(method: &str, msg: &str) -> NodeError {
    NodeError::Remote {
        method: method.to_string(),
        message: msg.to_string(),
    }
}

#[derive(Clone, Default)]
pub struct SimNetwork {
    state: Arc<Mutex<SimState>>,
}

impl SimNetwork {
    pub fn new() -> Self {
        let net = Self::default();
        {
            let mut s = net.lock();
            s.nodes[OFFERER].address = "ln1offerer".to_string();
            s.nodes[ACCEPTOR].address = "ln1acceptor".to_string();
        }
        net
    }

    /// Network where the tutorial attestation verifies.
    pub fn tutorial() -> Self {
        let net = Self::new();
        let cfg = OrchestratorConfig::tutorial().unwrap();
        net.add_attestation(&cfg.oracle_key, &cfg.terms.r_point, cfg.attestation);
        net
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap()
    }

    pub fn peers(&self) -> (SimPeer, SimPeer) {
        (self.peer(OFFERER, "lit1"), self.peer(ACCEPTOR, "lit2"))
    }

    fn peer(&self, id: usize, label: &str) -> SimPeer {
        SimPeer {
            id,
            label: label.to_string(),
            state: self.state.clone(),
        }
    }

    pub fn add_attestation(&self, oracle: &OraclePublicKey, r_point: &RPoint, att: Attestation) {
        self.lock()
            .attestations
            .insert((*oracle, *r_point, att.value), att.signature);
    }

    /// Make `method` on `node` answer with a node-side error.
    pub fn fail(&self, node: usize, method: &'static str, msg: &str) {
        self.lock()
            .failures
            .insert((node, method), NodeErrorKind::Remote(msg.to_string()));
    }

    pub fn fail_transport(&self, node: usize, method: &'static str) {
        self.lock().failures.insert((node, method), NodeErrorKind::Transport);
    }

    /// Offers are accepted by the sender but never delivered.
    pub fn hold_offers(&self) {
        self.lock().hold_offers = true;
    }

    /// Accepted contracts turn active on the poll after `n` non-active reads.
    pub fn activate_after_polls(&self, n: u32) {
        self.lock().activate_after_polls = Some(n);
    }

    /// Accepted contracts read back as declined, as when the funding exchange fails.
    pub fn decline_accepted(&self) {
        self.lock().decline_accepted = true;
    }

    /// Confirm funding of every accepted contract.
    pub fn mine_block(&self) {
        self.lock().mine();
    }

    pub fn preload_oracle(&self, node: usize, key: OraclePublicKey, name: &str) -> OracleIdx {
        let mut s = self.lock();
        let oracles = &mut s.nodes[node].oracles;
        let idx = OracleIdx(oracles.len() as u64 + 1);
        oracles.push(Oracle {
            idx,
            public_key: key,
            url: String::new(),
            name: name.to_string(),
        });
        idx
    }

    /// Place an offer on `node` as if some peer had sent it from its contract
    /// `their_idx`. Index 0 leaves the offer without a back link.
    pub fn inject_offer(
        &self,
        node: usize,
        oracle: OraclePublicKey,
        terms: &ContractTerms,
        their_idx: ContractIdx,
    ) -> ContractIdx {
        let mut s = self.lock();
        let contracts = &mut s.nodes[node].contracts;
        let idx = ContractIdx(contracts.len() as u64 + 1);
        contracts.push(SimContract {
            contract: Contract {
                idx,
                their_idx,
                oracle_key: oracle,
                r_point: terms.r_point,
                settlement_time: terms.settlement_time,
                coin_type: terms.coin_type,
                our_funding_amount: terms.their_funding,
                their_funding_amount: terms.our_funding,
                status: ContractStatus::OfferedToMe,
                ..Default::default()
            },
            oracle: None,
            division: Some((terms.division.value_fully_theirs, terms.division.value_fully_ours)),
        });
        idx
    }

    pub fn calls(&self) -> Vec<(usize, &'static str)> {
        self.lock().calls.clone()
    }

    pub fn calls_to(&self, node: usize) -> Vec<&'static str> {
        self.lock()
            .calls
            .iter()
            .filter(|(n, _)| *n == node)
            .map(|(_, m)| *m)
            .collect()
    }

    pub fn count(&self, node: usize, method: &str) -> usize {
        self.calls_to(node).iter().filter(|m| **m == method).count()
    }

    /// Statuses returned by GetContract so far.
    pub fn observed(&self) -> Vec<ContractStatus> {
        self.lock().observed.clone()
    }

    pub fn oracles(&self, node: usize) -> Vec<Oracle> {
        self.lock().nodes[node].oracles.clone()
    }

    pub fn contract(&self, node: usize, idx: ContractIdx) -> Option<Contract> {
        self.lock().nodes[node]
            .contracts
            .iter()
            .find(|c| c.contract.idx == idx)
            .map(|c| c.contract.clone())
    }

    pub fn division(&self, node: usize, idx: ContractIdx) -> Option<(i64, i64)> {
        self.lock().nodes[node]
            .contracts
            .iter()
            .find(|c| c.contract.idx == idx)
            .and_then(|c| c.division)
    }
}

pub struct SimPeer {
    id: usize,
    label: String,
    state: Arc<Mutex<SimState>>,
}

impl SimPeer {
    fn enter(&self, method: &'static str) -> Result<MutexGuard<'_, SimState>, NodeError> {
        let mut s = self.state.lock().unwrap();
        s.enter(self.id, method)?;
        Ok(s)
    }
}

impl NodeClient for SimPeer {
    fn label(&self) -> &str {
        &self.label
    }

    async fn listen(&self, bind: &str) -> Result<(), NodeError> {
        let mut s = self.enter("Listen")?;
        s.nodes[self.id].listening = Some(bind.to_string());
        Ok(())
    }

    async fn peer_address(&self) -> Result<String, NodeError> {
        let s = self.enter("GetPeerAddress")?;
        Ok(s.nodes[self.id].address.clone())
    }

    async fn connect(&self, address: &str, _host: &str, port: u16) -> Result<(), NodeError> {
        let mut s = self.enter("Connect")?;
        let bind = format!(":{}", port);
        let target = s
            .nodes
            .iter()
            .position(|n| n.address == address && n.listening.as_deref() == Some(bind.as_str()))
            .ok_or_else(|| remote("Connect", "no node listening at that address"))?;
        s.nodes[self.id].peers.push(target);
        s.nodes[target].peers.push(self.id);
        Ok(())
    }

    async fn list_oracles(&self) -> Result<Vec<Oracle>, NodeError> {
        let s = self.enter("ListOracles")?;
        Ok(s.nodes[self.id].oracles.clone())
    }

    async fn add_oracle(&self, key_hex: &str, name: &str) -> Result<Oracle, NodeError> {
        let mut s = self.enter("AddOracle")?;
        let key = OraclePublicKey::from_hex(key_hex).map_err(|e| remote("AddOracle", &e.to_string()))?;
        let oracles = &mut s.nodes[self.id].oracles;
        let oracle = Oracle {
            idx: OracleIdx(oracles.len() as u64 + 1),
            public_key: key,
            url: String::new(),
            name: name.to_string(),
        };
        oracles.push(oracle.clone());
        Ok(oracle)
    }

    async fn new_contract(&self) -> Result<Contract, NodeError> {
        let mut s = self.enter("NewContractDraft")?;
        let contracts = &mut s.nodes[self.id].contracts;
        let contract = Contract {
            idx: ContractIdx(contracts.len() as u64 + 1),
            status: ContractStatus::Draft,
            ..Default::default()
        };
        contracts.push(SimContract {
            contract: contract.clone(),
            ..Default::default()
        });
        Ok(contract)
    }

    async fn set_contract_oracle(&self, contract: ContractIdx, oracle: OracleIdx) -> Result<(), NodeError> {
        let mut s = self.enter("SetContractOracle")?;
        let node = &mut s.nodes[self.id];
        let key = node
            .oracles
            .iter()
            .find(|o| o.idx == oracle)
            .map(|o| o.public_key)
            .ok_or_else(|| remote("SetContractOracle", "invalid oracle index"))?;
        let c = node.draft_mut(contract).map_err(|e| remote("SetContractOracle", &e))?;
        c.oracle = Some(oracle);
        c.contract.oracle_key = key;
        Ok(())
    }

    async fn set_contract_settlement_time(&self, contract: ContractIdx, time: u64) -> Result<(), NodeError> {
        let mut s = self.enter("SetContractSettlementTime")?;
        let c = s.nodes[self.id]
            .draft_mut(contract)
            .map_err(|e| remote("SetContractSettlementTime", &e))?;
        c.contract.settlement_time = time;
        Ok(())
    }

    async fn set_contract_coin_type(&self, contract: ContractIdx, coin_type: u32) -> Result<(), NodeError> {
        let mut s = self.enter("SetContractCoinType")?;
        let c = s.nodes[self.id]
            .draft_mut(contract)
            .map_err(|e| remote("SetContractCoinType", &e))?;
        c.contract.coin_type = coin_type;
        Ok(())
    }

    async fn set_contract_r_point(&self, contract: ContractIdx, r_point: &RPoint) -> Result<(), NodeError> {
        let mut s = self.enter("SetContractCommitmentPoint")?;
        let c = s.nodes[self.id]
            .draft_mut(contract)
            .map_err(|e| remote("SetContractCommitmentPoint", &e))?;
        c.contract.r_point = *r_point;
        Ok(())
    }

    async fn set_contract_funding(&self, contract: ContractIdx, ours: i64, theirs: i64) -> Result<(), NodeError> {
        let mut s = self.enter("SetContractFunding")?;
        let c = s.nodes[self.id]
            .draft_mut(contract)
            .map_err(|e| remote("SetContractFunding", &e))?;
        c.contract.our_funding_amount = ours;
        c.contract.their_funding_amount = theirs;
        Ok(())
    }

    async fn set_contract_division(
        &self,
        contract: ContractIdx,
        value_fully_ours: i64,
        value_fully_theirs: i64,
    ) -> Result<(), NodeError> {
        let mut s = self.enter("SetContractDivision")?;
        if value_fully_ours == value_fully_theirs {
            return Err(remote("SetContractDivision", "thresholds must differ"));
        }
        let c = s.nodes[self.id]
            .draft_mut(contract)
            .map_err(|e| remote("SetContractDivision", &e))?;
        c.division = Some((value_fully_ours, value_fully_theirs));
        Ok(())
    }

    async fn offer_contract(&self, contract: ContractIdx, peer: PeerIdx) -> Result<(), NodeError> {
        let mut s = self.enter("OfferContract")?;
        let hold = s.hold_offers;
        let target = peer
            .0
            .checked_sub(1)
            .and_then(|i| s.nodes[self.id].peers.get(i as usize).copied())
            .ok_or_else(|| remote("OfferContract", "peer not connected"))?;

        let offered = {
            let c = s.nodes[self.id]
                .draft_mut(contract)
                .map_err(|e| remote("OfferContract", &e))?;
            if c.oracle.is_none() || c.division.is_none() {
                return Err(remote("OfferContract", "contract not fully configured"));
            }
            c.contract.status = ContractStatus::OfferedByMe;
            c.contract.peer_idx = peer;
            (c.contract.clone(), c.division)
        };

        if hold {
            return Ok(());
        }

        let back_to_sender = s.nodes[target]
            .peers
            .iter()
            .position(|p| *p == self.id)
            .map(|i| PeerIdx(i as u32 + 1))
            .unwrap_or_default();
        let (theirs, division) = offered;
        let contracts = &mut s.nodes[target].contracts;
        let idx = ContractIdx(contracts.len() as u64 + 1);
        contracts.push(SimContract {
            contract: Contract {
                idx,
                their_idx: theirs.idx,
                peer_idx: back_to_sender,
                coin_type: theirs.coin_type,
                oracle_key: theirs.oracle_key,
                r_point: theirs.r_point,
                settlement_time: theirs.settlement_time,
                our_funding_amount: theirs.their_funding_amount,
                their_funding_amount: theirs.our_funding_amount,
                status: ContractStatus::OfferedToMe,
            },
            oracle: None,
            division: division.map(|(ours, theirs)| (theirs, ours)),
        });
        if let Some(c) = s.nodes[self.id].contract_mut(contract) {
            c.contract.their_idx = idx;
        }
        Ok(())
    }

    async fn list_contracts(&self) -> Result<Vec<Contract>, NodeError> {
        let s = self.enter("ListContracts")?;
        Ok(s.nodes[self.id].contracts.iter().map(|c| c.contract.clone()).collect())
    }

    async fn accept_contract(&self, contract: ContractIdx) -> Result<(), NodeError> {
        let mut s = self.enter("AcceptContract")?;
        let node = &mut s.nodes[self.id];
        let known: Vec<OraclePublicKey> = node.oracles.iter().map(|o| o.public_key).collect();

        let c = node
            .contract_mut(contract)
            .ok_or_else(|| remote("AcceptContract", "contract not found"))?;
        if c.contract.status != ContractStatus::OfferedToMe {
            return Err(remote("AcceptContract", "contract is not offered to us"));
        }
        if !known.contains(&c.contract.oracle_key) {
            return Err(remote("AcceptContract", "unknown oracle"));
        }
        c.contract.status = ContractStatus::Accepted;
        let (peer, their_idx) = (c.contract.peer_idx, c.contract.their_idx);

        let sender = peer
            .0
            .checked_sub(1)
            .and_then(|i| node.peers.get(i as usize).copied());
        if let Some(sender) = sender {
            if let Some(theirs) = s.nodes[sender].contract_mut(their_idx) {
                theirs.contract.status = ContractStatus::Accepted;
            }
        }
        Ok(())
    }

    async fn get_contract(&self, contract: ContractIdx) -> Result<Contract, NodeError> {
        let mut s = self.enter("GetContract")?;
        let status = s.nodes[self.id]
            .contract_mut(contract)
            .map(|c| c.contract.status)
            .ok_or_else(|| remote("GetContract", "contract not found"))?;

        if status == ContractStatus::Accepted && s.decline_accepted {
            if let Some(c) = s.nodes[self.id].contract_mut(contract) {
                c.contract.status = ContractStatus::Declined;
            }
        } else if status == ContractStatus::Accepted {
            if let Some(n) = s.activate_after_polls {
                if s.pending_polls >= n {
                    s.mine();
                } else {
                    s.pending_polls += 1;
                }
            }
        }

        let c = s.nodes[self.id]
            .contract_mut(contract)
            .map(|c| c.contract.clone())
            .ok_or_else(|| remote("GetContract", "contract not found"))?;
        s.observed.push(c.status);
        Ok(c)
    }

    async fn settle_contract(
        &self,
        contract: ContractIdx,
        oracle_value: i64,
        oracle_sig: &OracleSignature,
    ) -> Result<(), NodeError> {
        let mut s = self.enter("SettleContract")?;
        let (key, r_point, division) = {
            let c = s.nodes[self.id]
                .contract_mut(contract)
                .ok_or_else(|| remote("SettleContract", "contract not found"))?;
            if c.contract.status != ContractStatus::Active {
                return Err(remote("SettleContract", "contract is not active"));
            }
            (c.contract.oracle_key, c.contract.r_point, c.division)
        };

        let (a, b) = division.ok_or_else(|| remote("SettleContract", "contract has no division"))?;
        if oracle_value < a.min(b) || oracle_value > a.max(b) {
            return Err(remote("SettleContract", "oracle value outside contract range"));
        }
        if s.attestations.get(&(key, r_point, oracle_value)) != Some(oracle_sig) {
            return Err(remote("SettleContract", "invalid oracle signature"));
        }

        if let Some(c) = s.nodes[self.id].contract_mut(contract) {
            c.contract.status = ContractStatus::SettleConfirmed;
        }
        Ok(())
    }
}
