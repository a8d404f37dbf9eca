// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Operator hand-off before settlement.

use std::io::{self, BufRead, BufReader};

use dlc_kernel::types::ContractIdx;
use tokio::sync::oneshot;

/// Blocks settlement until something outside the orchestrator has happened,
/// typically a block being mined on the underlying chain.
#[allow(async_fn_in_trait)]
pub trait SettlementGate {
    async fn wait(&mut self, contract: ContractIdx) -> io::Result<()>;
}

/// Waits for the operator to press enter.
#[derive(Debug, Default)]
pub struct StdinGate;

impl SettlementGate for StdinGate {
    async fn wait(&mut self, contract: ContractIdx) -> io::Result<()> {
        read_line_detached(BufReader::new(io::stdin())).await?;
        tracing::debug!(%contract, "operator released settlement");
        Ok(())
    }
}

/// Proceeds at once.
#[derive(Debug, Default)]
pub struct ImmediateGate;

impl SettlementGate for ImmediateGate {
    async fn wait(&mut self, _contract: ContractIdx) -> io::Result<()> {
        Ok(())
    }
}

/// Read one line on a plain thread the runtime does not own.
///
/// Dropping the returned future abandons the read; the thread stays parked
/// until input arrives or the process exits, and never holds up runtime
/// shutdown the way a blocking-pool read would.
async fn read_line_detached<R>(mut reader: R) -> io::Result<()>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = tx.send(reader.read_line(&mut line).map(|_| ()));
    });
    rx.await
        .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "line reader stopped"))?
}
