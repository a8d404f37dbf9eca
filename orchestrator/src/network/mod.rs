pub mod client;

pub use client::RpcClient;
