// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Contract enums.

use serde::{Deserialize, Serialize};

use crate::error::KernelError;

/// Contract status as a node reports it. Codes are the node's own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ContractStatus {
    Draft = 0,
    Active = 1,
    OfferedByMe = 2,
    OfferedToMe = 3,
    Declined = 4,
    Accepted = 5,
    Acknowledged = 6,
    Error = 7,
    Closed = 8,
    SettleSubmitted = 9,
    SettleInProgress = 10,
    SettleConfirmed = 11,
}

impl ContractStatus {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(ContractStatus::Draft),
            1 => Some(ContractStatus::Active),
            2 => Some(ContractStatus::OfferedByMe),
            3 => Some(ContractStatus::OfferedToMe),
            4 => Some(ContractStatus::Declined),
            5 => Some(ContractStatus::Accepted),
            6 => Some(ContractStatus::Acknowledged),
            7 => Some(ContractStatus::Error),
            8 => Some(ContractStatus::Closed),
            9 => Some(ContractStatus::SettleSubmitted),
            10 => Some(ContractStatus::SettleInProgress),
            11 => Some(ContractStatus::SettleConfirmed),
            _ => None,
        }
    }

    /// Settlement has been handed to the node, or the contract is already closed.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            ContractStatus::Closed
                | ContractStatus::SettleSubmitted
                | ContractStatus::SettleInProgress
                | ContractStatus::SettleConfirmed
        )
    }
}

impl Default for ContractStatus {
    fn default() -> Self {
        ContractStatus::Draft
    }
}

impl TryFrom<u8> for ContractStatus {
    type Error = KernelError;

    fn try_from(v: u8) -> Result<Self, KernelError> {
        ContractStatus::from_u8(v).ok_or(KernelError::UnknownStatus(v))
    }
}

impl From<ContractStatus> for u8 {
    fn from(s: ContractStatus) -> u8 {
        s as u8
    }
}

/// One party of the contract, seen from the node that drafted it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Ours,
    Theirs,
}
