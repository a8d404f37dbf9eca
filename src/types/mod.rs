// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod id;
pub mod keys;
pub mod enums;

pub use id::{ContractIdx, OracleIdx, PeerIdx};
pub use keys::{OraclePublicKey, OracleSignature, RPoint};
pub use enums::{ContractStatus, Side};
