// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod api;
pub mod node;
pub mod network;
pub mod poll;
pub mod gate;
pub mod connector;
pub mod oracle;
pub mod builder;
pub mod lifecycle;
pub mod telemetry;
