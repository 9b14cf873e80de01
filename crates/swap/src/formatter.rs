use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use bento_core::swap::entity::{SelectMode, SwapResult};
use bento_core::swap::error::SwapError;
use bento_core::swap::port::RoutingError;
use bento_core::token::entity::{ChainId, Token};

// ============================================================
//  对外响应整形
// ============================================================

/// 响应体中的代币摘要
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
    #[schema(example = "0x4eD141110F6EeeAbA9A1df36d8c26f684d2475Dc")]
    pub address: String,
    #[schema(example = "BRZ")]
    pub symbol: String,
    #[schema(example = 137)]
    pub chain_id: ChainId,
    #[schema(example = 18)]
    pub decimals: u8,
    pub is_native: bool,
    pub is_synthetic: bool,
}

/// 路由路径段摘要
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RouteSummary {
    #[schema(example = "open-ocean")]
    pub provider: String,
    pub tokens: Vec<TokenSummary>,
}

/// 手续费摘要，金额为有效数字渲染
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeeSummary {
    #[schema(example = "symbiosis")]
    pub provider: String,
    #[schema(example = "0.05")]
    pub value: String,
}

/// # Summary
/// 兑换成功的稳定对外形状。金额以有效数字字符串渲染，
/// 交易载荷原样透传，`selectMode` 回显实际成功的聚合器模式。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapSummary {
    pub select_mode: SelectMode,
    #[schema(example = "evm")]
    pub transaction_type: String,
    #[schema(example = "9.97")]
    pub token_amount_out: String,
    #[schema(example = "9.94")]
    pub token_amount_out_min: String,
    #[schema(example = "0.12")]
    pub price_impact: String,
    #[schema(example = "0x9f4Ab...")]
    pub approve_to: String,
    /// 引擎预计耗时 (秒)，仅在引擎给出时序列化
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u64>,
    pub routes: Vec<RouteSummary>,
    pub fees: Vec<FeeSummary>,
    /// 待钱包签名的交易载荷，不透明透传
    pub transaction_request: serde_json::Value,
}

/// 代币 → 响应摘要
pub fn format_token(token: &Token) -> TokenSummary {
    TokenSummary {
        address: token.address.clone(),
        symbol: token.symbol.clone(),
        chain_id: token.chain_id,
        decimals: token.decimals,
        is_native: token.is_native,
        is_synthetic: token.is_synthetic,
    }
}

/// # Summary
/// 引擎结果 → 稳定响应形状。`select_mode` 必须是实际成功的模式。
pub fn format_swap_result(result: SwapResult, select_mode: SelectMode) -> SwapSummary {
    SwapSummary {
        select_mode,
        transaction_type: result.transaction_type,
        token_amount_out: result.token_amount_out.to_significant(),
        token_amount_out_min: result.token_amount_out_min.to_significant(),
        price_impact: result
            .price_impact
            .round_sf(6)
            .unwrap_or(result.price_impact)
            .normalize()
            .to_string(),
        approve_to: result.approve_to,
        estimated_time: result.estimated_time,
        routes: result
            .routes
            .iter()
            .map(|leg| RouteSummary {
                provider: leg.provider.clone(),
                tokens: leg.tokens.iter().map(format_token).collect(),
            })
            .collect(),
        fees: result
            .fees
            .iter()
            .map(|fee| FeeSummary {
                provider: fee.provider.clone(),
                value: fee.value.to_significant(),
            })
            .collect(),
        transaction_request: result.transaction_request,
    }
}

// ============================================================
//  错误分类与修复建议
// ============================================================

/// # Summary
/// 协作方边界错误 → 对外错误分类。资金不足透传并附上
/// 由失败网络 URL 推断的链名；其余形态落入 Unknown 透传。
pub fn classify_routing_error(err: RoutingError) -> SwapError {
    match err {
        RoutingError::InsufficientFunds {
            wallet,
            network_url,
            reason,
        } => SwapError::InsufficientFunds {
            wallet,
            network: chain_from_network_url(&network_url).to_string(),
            network_url,
            reason,
        },
        other => SwapError::Unknown(other.to_string()),
    }
}

/// 从失败的网络 URL 推断链名，识别不出返回 "Unknown"
pub fn chain_from_network_url(url: &str) -> &'static str {
    let url = url.to_lowercase();
    if url.contains("base") {
        "Base"
    } else if url.contains("polygon") {
        "Polygon"
    } else if url.contains("ethereum") || url.contains("mainnet") {
        "Ethereum"
    } else {
        "Unknown"
    }
}

/// # Summary
/// 按底层消息模式匹配选择修复建议。尽力而为、不求穷尽，
/// 未识别的消息落入通用建议。建议文案属于对外 wire 契约，保持英文。
pub fn suggestion_for(error: &SwapError) -> &'static str {
    match error {
        SwapError::UnknownToken { .. } => {
            "Provide a custom token definition using 'customTokenIn' / 'customTokenOut', or correct the identifier."
        }
        SwapError::InvalidParameters(_) => {
            "Use slippage between 10 (0.1%) and 300 (3.0%) and provide both from/to addresses."
        }
        SwapError::InsufficientFunds { .. } => {
            // 本层不持有钱包状态，无法计算真实余额，只能给出通用补救方向
            "Add native gas funds to the wallet on the failing network and verify the token balance covers the swap."
        }
        SwapError::RoutingFailure { .. } => {
            "Wait a few minutes and retry, or reduce the swap amount. All aggregators were attempted."
        }
        SwapError::Unknown(message) => {
            if message.contains("Amount") && message.contains("less than fee") {
                "Try increasing the swap amount. The amount after conversion is less than the required fee."
            } else {
                "Check token addresses, amounts, and network connectivity."
            }
        }
    }
}
