//! # `bento-swap` - 兑换域服务层
//!
//! 围绕外部路由引擎的解析与容错调用逻辑：
//! - `resolver`: 把异构代币标识归一为规范 [`bento_core::token::entity::Token`]
//! - `builder`: 校验并装配 `SwapParams` (金额换算、滑点上界、deadline)
//! - `executor`: 两层重试/回退策略的执行引擎
//! - `formatter`: 结果整形与错误分类 (含修复建议)

pub mod builder;
pub mod executor;
pub mod formatter;
pub mod observer;
pub mod resolver;
