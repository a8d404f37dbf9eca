// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Reference values for the regtest tutorial contract.

/// Compressed public key of the tutorial oracle.
pub const TUTORIAL_ORACLE_PUBKEY: &str =
    "03c0d496ef6656fe102a689abc162ceeae166832d826f8750c94d797c92eedd465";

/// R-point the oracle committed to for the attested publication.
pub const TUTORIAL_R_POINT: &str =
    "027168bba1aaecce0500509df2ff5e35a4f55a26a8af7ceacd346045eceb1786ad";

/// Oracle signature over [`TUTORIAL_ORACLE_VALUE`].
pub const TUTORIAL_ORACLE_SIG: &str =
    "9e349c50db6d07d5d8b12b7ada7f91d13af742653ff57ffb0b554170536faeac";

pub const TUTORIAL_ORACLE_VALUE: i64 = 15161;

/// Label used when registering the oracle with a node.
pub const TUTORIAL_ORACLE_LABEL: &str = "Tutorial";

/// June 13, 2018 midnight UTC.
pub const TUTORIAL_SETTLEMENT_TIME: u64 = 1528848000;

/// Bitcoin regtest.
pub const COIN_TYPE_BTC_REGTEST: u32 = 257;

/// 1 BTC in satoshi, funded by each side.
pub const TUTORIAL_FUNDING: i64 = 100_000_000;

/// Value at or above which the offering side takes everything.
pub const TUTORIAL_VALUE_FULLY_OURS: i64 = 20000;

/// Value at or below which the counterparty takes everything.
pub const TUTORIAL_VALUE_FULLY_THEIRS: i64 = 10000;
