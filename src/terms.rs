// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::contract::Contract;
use crate::division::Division;
use crate::types::{ContractStatus, OraclePublicKey, OracleSignature, RPoint};

/// Everything a draft is configured with apart from the oracle binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractTerms {
    /// Unix timestamp of the oracle publication the contract settles on.
    pub settlement_time: u64,
    pub coin_type: u32,
    pub r_point: RPoint,
    pub our_funding: i64,
    pub their_funding: i64,
    pub division: Division,
}

impl ContractTerms {
    /// Whether `contract`, as mirrored on the counterparty, is an offer of these terms.
    ///
    /// The counterparty records funding from its own point of view, so the two
    /// amounts appear swapped.
    pub fn matches_offer(&self, contract: &Contract, oracle: &OraclePublicKey) -> bool {
        contract.status == ContractStatus::OfferedToMe
            && contract.oracle_key == *oracle
            && contract.r_point == self.r_point
            && contract.settlement_time == self.settlement_time
            && contract.coin_type == self.coin_type
            && contract.our_funding_amount == self.their_funding
            && contract.their_funding_amount == self.our_funding
    }
}

/// The oracle's signed outcome used to settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attestation {
    pub value: i64,
    pub signature: OracleSignature,
}

impl ContractTerms {
    /// Terms of the regtest tutorial contract.
    pub fn tutorial() -> crate::error::KernelResult<Self> {
        use crate::config::*;
        Ok(Self {
            settlement_time: TUTORIAL_SETTLEMENT_TIME,
            coin_type: COIN_TYPE_BTC_REGTEST,
            r_point: RPoint::from_hex(TUTORIAL_R_POINT)?,
            our_funding: TUTORIAL_FUNDING,
            their_funding: TUTORIAL_FUNDING,
            division: Division::new(TUTORIAL_VALUE_FULLY_OURS, TUTORIAL_VALUE_FULLY_THEIRS)?,
        })
    }
}

impl Attestation {
    /// The oracle's published outcome for the tutorial contract.
    pub fn tutorial() -> crate::error::KernelResult<Self> {
        use crate::config::*;
        Ok(Self {
            value: TUTORIAL_ORACLE_VALUE,
            signature: OracleSignature::from_hex(TUTORIAL_ORACLE_SIG)?,
        })
    }
}
