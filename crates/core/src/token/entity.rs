use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// EVM / TON 等链的数字标识 (如 137 = Polygon, 8453 = Base)
pub type ChainId = u32;

/// # Summary
/// 金额构造环节可能发生的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("无法解析的金额: {0}")]
    Unparsable(String),
    #[error("金额不能为负: {0}")]
    Negative(String),
    #[error("金额超出可表示范围: {0}")]
    Overflow(String),
}

/// # Summary
/// 单条链上的规范代币表示。所有异构的代币标识（原生资产、区域稳定币、
/// 自定义定义、外部目录条目）最终都归一到此结构。
///
/// # Invariants
/// - `address` 为空串时表示链的原生资产 (哨兵约定)，此时 `is_native == true`。
/// - 构造后不可变；身份由 `(chain_id, address)` 决定，原生资产以 `"native"` 占位。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// 所在链
    pub chain_id: ChainId,
    /// 合约地址，空串 = 原生资产
    pub address: String,
    /// 代币符号 (如 BRZ, ETH)
    pub symbol: String,
    /// 小数位数
    pub decimals: u8,
    /// 完整名称
    pub name: String,
    /// 图标 URL (目录/注册表条目可选携带)
    pub icon: Option<String>,
    /// 是否为链的原生资产
    pub is_native: bool,
    /// 是否为路由引擎铸造的合成代币
    pub is_synthetic: bool,
}

impl Token {
    /// 构造一个普通的合约代币
    pub fn erc20(
        chain_id: ChainId,
        address: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            address: address.into(),
            symbol: symbol.into(),
            decimals,
            name: name.into(),
            icon: None,
            is_native: false,
            is_synthetic: false,
        }
    }

    /// 构造链的原生资产 (空地址哨兵)
    pub fn native(
        chain_id: ChainId,
        symbol: impl Into<String>,
        decimals: u8,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            address: String::new(),
            symbol: symbol.into(),
            decimals,
            name: name.into(),
            icon: None,
            is_native: true,
            is_synthetic: false,
        }
    }

    /// # Summary
    /// 由调用方完整给出的自定义代币定义直接构造，绕过一切注册表与目录。
    pub fn custom(spec: CustomTokenSpec) -> Self {
        Self {
            chain_id: spec.chain_id,
            address: spec.address,
            symbol: spec.symbol,
            decimals: spec.decimals,
            name: spec.name.unwrap_or_default(),
            icon: None,
            is_native: false,
            is_synthetic: false,
        }
    }

    /// 代币身份键：`(chain_id, 小写地址 | "native")`
    pub fn identity(&self) -> (ChainId, String) {
        if self.address.is_empty() {
            (self.chain_id, "native".to_string())
        } else {
            (self.chain_id, self.address.to_lowercase())
        }
    }

    /// 符号大小写不敏感匹配
    pub fn symbol_matches(&self, other: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(other)
    }
}

/// # Summary
/// 请求体中调用方自带的代币定义 (customTokenIn / customTokenOut)。
/// 解析优先级最高，使调用方可以兑换任何目录未收录的资产。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomTokenSpec {
    /// 合约地址
    #[schema(example = "0x4eD141110F6EeeAbA9A1df36d8c26f684d2475Dc")]
    pub address: String,
    /// 代币符号
    #[schema(example = "BRZ")]
    pub symbol: String,
    /// 小数位数
    #[schema(example = 18)]
    pub decimals: u8,
    /// 所在链
    #[schema(example = 137)]
    pub chain_id: ChainId,
    /// 完整名称 (可选)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// # Summary
/// 绑定了代币的原始整数金额。`raw == round(human × 10^decimals)`。
///
/// # Invariants
/// - `raw` 永远是非负整数；人类可读金额只在构造时出现，
///   之后所有计算均基于整数，避免浮点漂移。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub token: Token,
    pub raw: u128,
}

impl TokenAmount {
    /// # Summary
    /// 由人类可读金额字符串换算为原始整数金额。
    ///
    /// # Logic
    /// 1. 以 `rust_decimal` 精确解析输入，拒绝负数与非法字面量。
    /// 2. 乘以 `10^decimals` 后四舍五入 (half-up) 到整数。
    /// 3. 超出 `u128` 或 Decimal 可表示范围时报 Overflow。
    pub fn from_human(token: Token, human: &str) -> Result<Self, AmountError> {
        let amount = Decimal::from_str(human.trim())
            .map_err(|_| AmountError::Unparsable(human.to_string()))?;
        if amount.is_sign_negative() {
            return Err(AmountError::Negative(human.to_string()));
        }

        let scale = Decimal::from(10u64)
            .checked_powu(u64::from(token.decimals))
            .ok_or_else(|| AmountError::Overflow(human.to_string()))?;
        let scaled = amount
            .checked_mul(scale)
            .ok_or_else(|| AmountError::Overflow(human.to_string()))?;
        let raw = scaled
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u128()
            .ok_or_else(|| AmountError::Overflow(human.to_string()))?;

        Ok(Self { token, raw })
    }

    /// 直接由原始整数金额构造
    pub fn from_raw(token: Token, raw: u128) -> Self {
        Self { token, raw }
    }

    /// 由十进制整数字符串构造 (外部引擎的 wire 格式)
    pub fn from_raw_str(token: Token, raw: &str) -> Result<Self, AmountError> {
        let raw = raw
            .trim()
            .parse::<u128>()
            .map_err(|_| AmountError::Unparsable(raw.to_string()))?;
        Ok(Self { token, raw })
    }

    /// 原始金额的十进制字符串
    pub fn raw_string(&self) -> String {
        self.raw.to_string()
    }

    /// # Summary
    /// 渲染为 6 位有效数字的人类可读字符串 (尾随零去除)。
    ///
    /// # Logic
    /// 金额超出 Decimal 的 96 位尾数时退化为原始整数字符串，不丢失信息。
    pub fn to_significant(&self) -> String {
        let Ok(mut value) = Decimal::from_str(&self.raw.to_string()) else {
            return self.raw.to_string();
        };
        if value.set_scale(u32::from(self.token.decimals)).is_err() {
            return self.raw.to_string();
        }
        value.round_sf(6).unwrap_or(value).normalize().to_string()
    }
}
