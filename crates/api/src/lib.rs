//! # `bento-api` - HTTP API 网关
//!
//! 本 crate 是 Bento 跨链兑换服务的 HTTP/REST 入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自前端或钱包集成方的 HTTP 请求
//! - 把请求体归一为领域参数 (代币解析、金额换算、参数校验)
//! - 调用下层 `SwapExecutor` 完成报价与兑换计算
//! - 将领域模型转换为稳定的 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
