use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::entity::{SelectMode, SwapParams, SwapResult};
use crate::token::entity::{ChainId, Token};

/// # Summary
/// 路由引擎协作方边界上的封闭错误分类。适配器必须把引擎抛出的任意形态
/// (code / reason / 消息子串) 解码到这些带标签的变体之一，
/// 未识别的形态落入 `Unknown`，绝不允许原始错误对象穿透边界。
#[derive(Error, Debug, Clone)]
pub enum RoutingError {
    /// 链级 gas / 余额模拟失败的透传
    #[error("链上资金不足: {reason}")]
    InsufficientFunds {
        wallet: String,
        network_url: String,
        reason: String,
    },
    #[error("无法预估 gas: {0}")]
    UnpredictableGasLimit(String),
    #[error("兑换后金额低于手续费: {0}")]
    AmountLessThanFee(String),
    /// 聚合器侧的 (通常是瞬时的) 调用失败
    #[error("聚合器调用失败: {0}")]
    Aggregator(String),
    #[error("网络错误: {0}")]
    Network(String),
    #[error("响应解析失败: {0}")]
    Parse(String),
    #[error("未分类的引擎错误: {0}")]
    Unknown(String),
}

/// # Summary
/// 外部路由引擎端口。路径发现、价格计算与交易构造全部发生在引擎内部，
/// 本系统只消费这三个操作。
///
/// # Invariants
/// - 必须是异步且线程安全的 (`Send + Sync`)，并发请求共享同一个句柄。
#[async_trait]
pub trait RoutingEngine: Send + Sync {
    /// 按地址在引擎目录中精确查找代币
    async fn find_token(
        &self,
        address: &str,
        chain_id: ChainId,
    ) -> Result<Option<Token>, RoutingError>;

    /// 引擎全量代币目录
    async fn tokens(&self) -> Result<Vec<Token>, RoutingError>;

    /// # Summary
    /// 计算一次兑换：报价、路径与待签名的交易载荷。
    /// 任何聚合器/网络问题以 `RoutingError` 返回。
    async fn compute_swap(&self, params: &SwapParams) -> Result<SwapResult, RoutingError>;
}

/// # Summary
/// 路由引擎上下文工厂。`client_id` 为空串时构造的句柄不受任何
/// 客户端身份范围的聚合器限制，执行引擎的强制回退层依赖此语义。
pub trait RoutingEngineFactory: Send + Sync {
    fn connect(&self, client_id: &str) -> Arc<dyn RoutingEngine>;
}

// ============================================================
//  结构化尝试事件
// ============================================================

/// 重试策略的层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptTier {
    /// 第一层：主上下文的多轮轮换
    Primary,
    /// 第二层：中性身份上下文的强制回退
    Forced,
}

/// 单次尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    Failed(String),
}

/// # Summary
/// 执行引擎每次聚合器调用产生的结构化事件，用于可观测性与测试断言。
/// 不持久化，生命周期仅限单次请求。
#[derive(Debug, Clone)]
pub struct AttemptEvent {
    pub tier: AttemptTier,
    /// 第一层内的轮次 (1 起)；第二层固定为 1
    pub round: u32,
    pub mode: SelectMode,
    pub slippage_bps: u32,
    pub outcome: AttemptOutcome,
}

/// # Summary
/// 注入到执行引擎的结构化事件汇。相比环境式输出，
/// 注入式事件汇让测试可以对尝试序列做精确断言。
pub trait AttemptObserver: Send + Sync {
    fn on_attempt(&self, event: &AttemptEvent);
}
