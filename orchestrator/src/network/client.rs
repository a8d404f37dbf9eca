use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dlc_kernel::contract::{Contract, Oracle};
use dlc_kernel::types::{ContractIdx, OracleIdx, OracleSignature, PeerIdx, RPoint};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::*;
use crate::errors::NodeError;
use crate::node::NodeClient;

/// JSON-RPC client for one peer node.
#[derive(Debug, Clone)]
pub struct RpcClient {
    label: String,
    base_url: String,
    client: Client,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    pub fn new(label: impl Into<String>, url: &str, timeout: Duration) -> Result<Self, NodeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            label: label.into(),
            base_url: url.trim_end_matches('/').to_string(),
            client,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<P, R>(&self, method: &'static str, params: P) -> Result<R, NodeError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("{}{}", self.base_url, RPC_PATH);
        let req = RpcRequest {
            method: format!("{}.{}", SERVICE, method),
            params: [params],
            id,
        };

        tracing::debug!(node = %self.label, method, id, "rpc call");
        let resp = self.client.post(&url).json(&req).send().await?;

        if !resp.status().is_success() {
            return Err(NodeError::Transport(format!("{} request failed: {}", method, resp.status())));
        }

        let body: RpcResponse<R> = resp.json().await.map_err(|e| NodeError::Decode {
            method: method.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(err) = body.error {
            let message = match err {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            tracing::debug!(node = %self.label, method, id, %message, "rpc rejected");
            return Err(NodeError::Remote {
                method: method.to_string(),
                message,
            });
        }

        body.result.ok_or_else(|| NodeError::Decode {
            method: method.to_string(),
            reason: "reply carries neither result nor error".to_string(),
        })
    }

    /// Calls that reply with a bare success flag.
    async fn command<P: Serialize>(&self, method: &'static str, params: P) -> Result<(), NodeError> {
        let reply: SuccessReply = self.call(method, params).await?;
        if !reply.success {
            return Err(NodeError::Remote {
                method: method.to_string(),
                message: "node reported failure".to_string(),
            });
        }
        Ok(())
    }
}

impl NodeClient for RpcClient {
    fn label(&self) -> &str {
        &self.label
    }

    async fn listen(&self, bind: &str) -> Result<(), NodeError> {
        let _: StatusReply = self.call("Listen", ListenArgs { port: bind.to_string() }).await?;
        Ok(())
    }

    async fn peer_address(&self) -> Result<String, NodeError> {
        let reply: ListeningPortsReply = self.call("GetListeningPorts", NoArgs {}).await?;
        Ok(reply.adr)
    }

    async fn connect(&self, address: &str, host: &str, port: u16) -> Result<(), NodeError> {
        let ln_addr = format!("{}@{}:{}", address, host, port);
        let _: StatusReply = self.call("Connect", ConnectArgs { ln_addr }).await?;
        Ok(())
    }

    async fn list_oracles(&self) -> Result<Vec<Oracle>, NodeError> {
        let reply: ListOraclesReply = self.call("ListOracles", NoArgs {}).await?;
        Ok(reply.oracles)
    }

    async fn add_oracle(&self, key_hex: &str, name: &str) -> Result<Oracle, NodeError> {
        let args = AddOracleArgs {
            key: key_hex.to_string(),
            name: name.to_string(),
        };
        let reply: AddOracleReply = self.call("AddOracle", args).await?;
        Ok(reply.oracle)
    }

    async fn new_contract(&self) -> Result<Contract, NodeError> {
        let reply: ContractReply = self.call("NewContract", NoArgs {}).await?;
        Ok(reply.contract)
    }

    async fn set_contract_oracle(&self, contract: ContractIdx, oracle: OracleIdx) -> Result<(), NodeError> {
        self.command("SetContractOracle", SetOracleArgs { c_idx: contract, o_idx: oracle })
            .await
    }

    async fn set_contract_settlement_time(&self, contract: ContractIdx, time: u64) -> Result<(), NodeError> {
        self.command("SetContractSettlementTime", SetSettlementTimeArgs { c_idx: contract, time })
            .await
    }

    async fn set_contract_coin_type(&self, contract: ContractIdx, coin_type: u32) -> Result<(), NodeError> {
        self.command("SetContractCoinType", SetCoinTypeArgs { c_idx: contract, coin_type })
            .await
    }

    async fn set_contract_r_point(&self, contract: ContractIdx, r_point: &RPoint) -> Result<(), NodeError> {
        self.command("SetContractRPoint", SetRPointArgs { c_idx: contract, r_point: *r_point })
            .await
    }

    async fn set_contract_funding(&self, contract: ContractIdx, ours: i64, theirs: i64) -> Result<(), NodeError> {
        let args = SetFundingArgs {
            c_idx: contract,
            our_amount: ours,
            their_amount: theirs,
        };
        self.command("SetContractFunding", args).await
    }

    async fn set_contract_division(
        &self,
        contract: ContractIdx,
        value_fully_ours: i64,
        value_fully_theirs: i64,
    ) -> Result<(), NodeError> {
        let args = SetDivisionArgs {
            c_idx: contract,
            value_fully_ours,
            value_fully_theirs,
        };
        self.command("SetContractDivision", args).await
    }

    async fn offer_contract(&self, contract: ContractIdx, peer: PeerIdx) -> Result<(), NodeError> {
        self.command("OfferContract", OfferContractArgs { c_idx: contract, peer_idx: peer })
            .await
    }

    async fn list_contracts(&self) -> Result<Vec<Contract>, NodeError> {
        let reply: ListContractsReply = self.call("ListContracts", NoArgs {}).await?;
        Ok(reply.contracts)
    }

    async fn accept_contract(&self, contract: ContractIdx) -> Result<(), NodeError> {
        self.command("AcceptContract", ContractIdxArgs { c_idx: contract }).await
    }

    async fn get_contract(&self, contract: ContractIdx) -> Result<Contract, NodeError> {
        let reply: ContractReply = self.call("GetContract", GetContractArgs { idx: contract }).await?;
        Ok(reply.contract)
    }

    async fn settle_contract(
        &self,
        contract: ContractIdx,
        oracle_value: i64,
        oracle_sig: &OracleSignature,
    ) -> Result<(), NodeError> {
        let args = SettleContractArgs {
            c_idx: contract,
            oracle_value,
            oracle_sig: *oracle_sig,
        };
        self.command("SettleContract", args).await
    }
}
