use thiserror::Error;

use crate::token::entity::{AmountError, ChainId, Token};

/// # Summary
/// 兑换域对外的统一错误分类。每个变体携带机读 kind 与人类可读信息，
/// 解析与参数错误在任何网络调用之前立即抛出。
#[derive(Error, Debug, Clone)]
pub enum SwapError {
    /// 解析优先级全部穷尽后仍无法识别代币 (可恢复：
    /// 调用方应提供自定义定义或修正标识符)
    #[error("未知代币 {identifier} (chainId {chain_id})")]
    UnknownToken {
        identifier: String,
        chain_id: ChainId,
        /// 指导纠错的已知可用区域代币示例
        example: Token,
    },

    /// 滑点越界、地址缺失等，在任何网络调用之前拒绝
    #[error("参数无效: {0}")]
    InvalidParameters(String),

    /// 链级 gas/余额模拟失败的透传，附带由网络 URL 推断的链名
    #[error("钱包资金不足 ({network}): {reason}")]
    InsufficientFunds {
        wallet: String,
        network: String,
        network_url: String,
        reason: String,
    },

    /// 两层回退策略全部穷尽后的复合失败，保留各层摘要
    #[error("所有聚合器均失败。主流程: {primary}; 强制回退: {forced}")]
    RoutingFailure { primary: String, forced: String },

    /// 其余引擎错误的透传
    #[error("{0}")]
    Unknown(String),
}

impl SwapError {
    /// 机读错误类别，响应体中的 `kind` 字段
    pub fn kind(&self) -> &'static str {
        match self {
            SwapError::UnknownToken { .. } => "UNKNOWN_TOKEN",
            SwapError::InvalidParameters(_) => "INVALID_PARAMETERS",
            SwapError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            SwapError::RoutingFailure { .. } => "SWAP_ROUTING_FAILED",
            SwapError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }
}

impl From<AmountError> for SwapError {
    fn from(err: AmountError) -> Self {
        SwapError::InvalidParameters(err.to_string())
    }
}
