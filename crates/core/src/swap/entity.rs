use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::token::entity::{Token, TokenAmount};

/// 滑点上限：300 bps = 3.00%，任何路径都不得越过
pub const MAX_SLIPPAGE_BPS: u32 = 300;
/// 请求体缺省滑点
pub const DEFAULT_SLIPPAGE_BPS: u32 = 300;
/// deadline 固定窗口 (分钟)，构造后不再重算
pub const DEADLINE_WINDOW_MINUTES: i64 = 20;

/// # Summary
/// 路由引擎暴露的可互换聚合器策略。
///
/// # Invariants
/// - 序列化形式固定为 snake_case 字符串 (`best_return` 等)，与引擎 wire 协议一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    /// 回报最优
    BestReturn,
    /// 价格最优
    BestPrice,
    /// 最快成交
    Fastest,
    /// 费用最低
    Cheapest,
}

impl SelectMode {
    /// 重试轮次的基准顺序。请求的模式会被旋转到首位，其余保持相对顺序。
    pub const ROTATION: [SelectMode; 4] = [
        SelectMode::BestReturn,
        SelectMode::Fastest,
        SelectMode::Cheapest,
        SelectMode::BestPrice,
    ];

    /// # Summary
    /// 宽松解析：无法识别的输入静默回退到缺省模式 `best_return`。
    pub fn parse_or_default(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "best_return" => SelectMode::BestReturn,
            "best_price" => SelectMode::BestPrice,
            "fastest" => SelectMode::Fastest,
            "cheapest" => SelectMode::Cheapest,
            _ => SelectMode::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectMode::BestReturn => "best_return",
            SelectMode::BestPrice => "best_price",
            SelectMode::Fastest => "fastest",
            SelectMode::Cheapest => "cheapest",
        }
    }
}

impl Default for SelectMode {
    fn default() -> Self {
        SelectMode::BestReturn
    }
}

impl std::fmt::Display for SelectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// # Summary
/// 一次兑换请求的完整参数集，由参数构造器校验并装配。
///
/// # Invariants
/// - `0 ≤ slippage_bps ≤ 300`。
/// - `deadline_epoch_seconds` 在构造时一次性计算，重试期间不重算；
///   超长的重试序列可能令其过期，这是已知且被记录的行为。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapParams {
    pub token_amount_in: TokenAmount,
    pub token_out: Token,
    pub from: String,
    pub to: String,
    pub slippage_bps: u32,
    pub deadline_epoch_seconds: i64,
    pub select_mode: SelectMode,
}

/// 路由路径上的一段：提供方及其途经代币
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteLeg {
    pub provider: String,
    pub tokens: Vec<Token>,
}

/// 单项手续费：提供方及收取的金额
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeItem {
    pub provider: String,
    pub value: TokenAmount,
}

/// # Summary
/// 路由引擎一次成功计算的产物。除格式化器消费的字段外视为不透明。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapResult {
    pub token_amount_out: TokenAmount,
    pub token_amount_out_min: TokenAmount,
    pub price_impact: Decimal,
    pub routes: Vec<RouteLeg>,
    pub fees: Vec<FeeItem>,
    /// 交易载荷，原样透传给调用方的钱包
    pub transaction_request: serde_json::Value,
    pub approve_to: String,
    pub transaction_type: String,
    /// 引擎给出的预计耗时 (秒)，可选透传
    pub estimated_time: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default_is_lenient() {
        assert_eq!(
            SelectMode::parse_or_default("fastest"),
            SelectMode::Fastest
        );
        assert_eq!(
            SelectMode::parse_or_default("BEST_PRICE"),
            SelectMode::BestPrice
        );
        assert_eq!(
            SelectMode::parse_or_default("warp_speed"),
            SelectMode::BestReturn
        );
        assert_eq!(SelectMode::parse_or_default(""), SelectMode::BestReturn);
    }

    #[test]
    fn test_rotation_base_order() {
        assert_eq!(
            SelectMode::ROTATION,
            [
                SelectMode::BestReturn,
                SelectMode::Fastest,
                SelectMode::Cheapest,
                SelectMode::BestPrice,
            ]
        );
    }

    #[test]
    fn test_wire_serialization_snake_case() {
        assert_eq!(
            serde_json::to_string(&SelectMode::BestReturn).unwrap(),
            "\"best_return\""
        );
        let parsed: SelectMode = serde_json::from_str("\"cheapest\"").unwrap();
        assert_eq!(parsed, SelectMode::Cheapest);
    }
}
