// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! dlc-kernel: the I/O-free model of an oracle-settled two-party contract as a
//! peer node exposes it over its control interface.

pub mod config;
pub mod error;
pub mod types;
pub mod division;
pub mod terms;
pub mod contract;
