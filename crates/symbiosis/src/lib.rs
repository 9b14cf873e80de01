//! Symbiosis 跨链路由引擎适配器。
//!
//! 实现 `bento-core` 的 `RoutingEngine` / `RoutingEngineFactory` 端口，
//! 把引擎抛出的任意错误形态解码为封闭的 `RoutingError` 分类。

pub mod client;

pub use client::{SymbiosisClient, SymbiosisConnector};
