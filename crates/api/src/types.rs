//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。
//! 请求/响应字段统一 camelCase，与前端钱包集成约定一致。

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use bento_core::token::entity::{ChainId, CustomTokenSpec, Token};
use bento_core::token::registry::chain_name;

// ============================================================
//  通用响应包装
// ============================================================

/// 统一的成功响应包装
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// # Summary
/// 统一的失败响应。`kind` 是机器可读的错误分类，`suggestion` 是
/// 面向调用方的修复建议；未知代币错误额外携带可直接照抄的
/// `customToken` 示例与该代币的可用链列表。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误分类 (UNKNOWN_TOKEN / INVALID_PARAMETERS / ...)
    #[schema(example = "UNKNOWN_TOKEN")]
    pub kind: String,
    /// 错误描述信息
    pub error: String,
    /// 修复建议
    pub suggestion: String,
    /// 可照抄的自定义代币定义示例 (仅 UNKNOWN_TOKEN)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<CustomTokenSpec>,
    /// 示例代币的可用链列表 (仅 UNKNOWN_TOKEN)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_chains: Option<Vec<ChainId>>,
    /// 合法的聚合器模式取值 (仅 INVALID_PARAMETERS)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_select_modes: Option<Vec<String>>,
}

// ============================================================
//  兑换请求 DTO
// ============================================================

/// # Summary
/// `/api/quote`、`/api/swap` 与 `/api/route` 共用的请求体。
///
/// # Invariants
/// - `userAddress` 是 `from` / `to` 的回退值，三者至少给出一个。
/// - `customTokenIn` / `useNativeTokenIn` 优先于 `tokenIn` 字符串，出方向同理。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    /// 入方向链
    #[schema(example = 137)]
    pub from_chain_id: ChainId,
    /// 出方向链
    #[schema(example = 8453)]
    pub to_chain_id: ChainId,
    /// 入方向代币标识 (地址或符号)
    #[serde(default)]
    #[schema(example = "BRZ")]
    pub token_in: Option<String>,
    /// 出方向代币标识 (地址或符号)
    #[serde(default)]
    #[schema(example = "BRZ")]
    pub token_out: Option<String>,
    /// 人类可读的入金额
    #[schema(example = "10")]
    pub amount: String,
    /// 付款地址
    #[serde(default)]
    pub from: Option<String>,
    /// 收款地址
    #[serde(default)]
    pub to: Option<String>,
    /// from/to 缺省时的回退地址
    #[serde(default)]
    #[schema(example = "0x7F101fE45e6649A6fB8F3F8B43ed03D353f2B90c")]
    pub user_address: Option<String>,
    /// 滑点 (基点)，缺省 300
    #[serde(default)]
    #[schema(example = 300)]
    pub slippage: Option<u32>,
    /// 聚合器模式，无法识别时回退 best_return
    #[serde(default)]
    #[schema(example = "best_return")]
    pub select_mode: Option<String>,
    /// 入方向的自定义代币定义 (优先级最高)
    #[serde(default)]
    pub custom_token_in: Option<CustomTokenSpec>,
    /// 出方向的自定义代币定义
    #[serde(default)]
    pub custom_token_out: Option<CustomTokenSpec>,
    /// 入方向使用链原生资产 (忽略 tokenIn)
    #[serde(default)]
    pub use_native_token_in: Option<bool>,
    /// 出方向使用链原生资产 (忽略 tokenOut)
    #[serde(default)]
    pub use_native_token_out: Option<bool>,
}

// ============================================================
//  列表类响应 DTO
// ============================================================

/// 代币目录/注册表条目的完整 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetailResponse {
    /// 合约地址，空串 = 原生资产
    #[schema(example = "0x4eD141110F6EeeAbA9A1df36d8c26f684d2475Dc")]
    pub address: String,
    /// 代币符号
    #[schema(example = "BRZ")]
    pub symbol: String,
    /// 完整名称
    #[schema(example = "Brazilian Digital Token")]
    pub name: String,
    /// 小数位数
    #[schema(example = 18)]
    pub decimals: u8,
    /// 所在链
    #[schema(example = 137)]
    pub chain_id: ChainId,
    /// 可读链名
    #[schema(example = "Polygon")]
    pub chain_name: String,
    /// 图标 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// 是否为链的原生资产
    pub is_native: bool,
}

impl From<&Token> for TokenDetailResponse {
    fn from(token: &Token) -> Self {
        Self {
            address: token.address.clone(),
            symbol: token.symbol.clone(),
            name: token.name.clone(),
            decimals: token.decimals,
            chain_id: token.chain_id,
            chain_name: chain_name(token.chain_id).to_string(),
            icon: token.icon.clone(),
            is_native: token.is_native,
        }
    }
}

/// 受支持链条目
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainResponse {
    /// 链名 (对外公布的标识)
    #[schema(example = "POLYGON")]
    pub name: String,
    /// 链 ID
    #[schema(example = 137)]
    pub chain_id: ChainId,
}

/// `/api/route` 的响应：报价摘要加上从交易载荷提取的 gas 预估
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    #[serde(flatten)]
    pub summary: bento_swap::formatter::SwapSummary,
    /// 交易载荷中的 gas / gasLimit 字段 (引擎未给出时为 null)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_gas: Option<String>,
}
