//! # `bento-core` - 领域核心
//!
//! 跨链兑换网关的纯领域层：代币实体、静态注册表、兑换参数与结果模型、
//! 对外部路由引擎的端口抽象以及统一错误分类。
//!
//! ## 架构职责
//! - 不做任何 I/O，所有网络与持久化行为通过 `swap::port` 中的 trait 注入
//! - 上层 crate (`bento-swap`, `bento-symbiosis`, `bento-api`) 仅依赖此处的抽象

pub mod common;
pub mod config;
pub mod swap;
pub mod token;
