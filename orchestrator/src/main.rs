// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dlc_kernel::types::{ContractIdx, OraclePublicKey, OracleSignature, RPoint};
use dlc_orchestrator::config::OrchestratorConfig;
use dlc_orchestrator::errors::OrchestratorError;
use dlc_orchestrator::gate::{ImmediateGate, SettlementGate, StdinGate};
use dlc_orchestrator::lifecycle::Orchestrator;
use dlc_orchestrator::network::RpcClient;
use dlc_orchestrator::telemetry::init_telemetry;
use tokio_util::sync::CancellationToken;

/// Every flag defaults to the regtest tutorial; running without flags settles
/// the tutorial contract between two local nodes.
#[derive(Parser)]
#[command(name = "dlc-tutorial")]
#[command(about = "Offer, accept and settle an oracle-backed contract between two nodes", long_about = None)]
struct Cli {
    /// RPC host of the offering node
    #[arg(long, default_value = "localhost")]
    node1_host: String,

    /// RPC port of the offering node
    #[arg(long, default_value_t = 8001)]
    node1_port: u16,

    /// RPC host of the accepting node
    #[arg(long, default_value = "localhost")]
    node2_host: String,

    /// RPC port of the accepting node
    #[arg(long, default_value_t = 8002)]
    node2_port: u16,

    /// Oracle public key (hex)
    #[arg(long)]
    oracle_key: Option<String>,

    /// R-point of the oracle publication (hex)
    #[arg(long)]
    r_point: Option<String>,

    /// Attested value to settle with
    #[arg(long)]
    oracle_value: Option<i64>,

    /// Oracle signature over the attested value (hex)
    #[arg(long)]
    oracle_sig: Option<String>,

    /// Accept this contract index on the second node instead of matching terms
    #[arg(long)]
    accept_contract: Option<u64>,

    /// Give up waiting for activation after this many seconds
    #[arg(long)]
    activation_timeout_secs: Option<u64>,

    /// Settle as soon as the contract is active
    #[arg(long)]
    no_wait: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<OrchestratorConfig> {
        let mut cfg = OrchestratorConfig::tutorial().context("tutorial defaults")?;

        cfg.offerer.host = self.node1_host;
        cfg.offerer.rpc_port = self.node1_port;
        cfg.acceptor.host = self.node2_host;
        cfg.acceptor.rpc_port = self.node2_port;

        if let Some(key) = self.oracle_key {
            cfg.oracle_key = OraclePublicKey::from_hex(&key).context("--oracle-key")?;
        }
        if let Some(r) = self.r_point {
            cfg.terms.r_point = RPoint::from_hex(&r).context("--r-point")?;
        }
        if let Some(value) = self.oracle_value {
            cfg.attestation.value = value;
        }
        if let Some(sig) = self.oracle_sig {
            cfg.attestation.signature = OracleSignature::from_hex(&sig).context("--oracle-sig")?;
        }
        cfg.acceptor_contract = self.accept_contract.map(ContractIdx);
        if let Some(secs) = self.activation_timeout_secs {
            cfg.activation = cfg.activation.with_deadline(Duration::from_secs(secs));
        }
        cfg.wait_for_operator = !self.no_wait;

        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_telemetry();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<OrchestratorError>() {
                Some(err) => {
                    tracing::error!(phase = ?err.phase(), "run aborted: {}", err);
                    eprintln!("Aborted while {}: {}", err.phase(), err);
                }
                None => {
                    tracing::error!("run aborted: {:#}", e);
                    eprintln!("Aborted: {:#}", e);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = cli.into_config()?;
    tracing::debug!("Running with config: {:?}", cfg);

    let lit1 = RpcClient::new(&cfg.offerer.label, &cfg.offerer.rpc_url(), cfg.rpc_timeout)?;
    let lit2 = RpcClient::new(&cfg.acceptor.label, &cfg.acceptor.rpc_url(), cfg.rpc_timeout)?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping");
            on_signal.cancel();
        }
    });

    if cfg.wait_for_operator {
        drive(cfg, lit1, lit2, StdinGate, cancel).await
    } else {
        drive(cfg, lit1, lit2, ImmediateGate, cancel).await
    }
}

async fn drive<G: SettlementGate>(
    cfg: OrchestratorConfig,
    lit1: RpcClient,
    lit2: RpcClient,
    gate: G,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut orchestrator = Orchestrator::new(cfg, lit1, lit2, gate).with_cancel(cancel);
    let report = orchestrator.run().await?;

    tracing::info!(
        contract = %report.offerer_contract,
        counterparty_contract = %report.acceptor_contract,
        status = ?report.final_status,
        "contract settled"
    );
    println!("Contract settled. Mine two blocks to ensure contract outputs are claimed back to the nodes' wallets.");
    println!();
    println!("Done.");
    Ok(())
}
