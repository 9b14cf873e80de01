//! # 路由控制器
//!
//! 每个子模块对应一组 REST 接口；共享的请求归一逻辑放在本模块。

pub mod brazilian;
pub mod quote;
pub mod route;
pub mod swap;
pub mod tokens;

use bento_core::swap::entity::{DEFAULT_SLIPPAGE_BPS, MAX_SLIPPAGE_BPS, SelectMode, SwapParams};
use bento_core::swap::error::SwapError;
use bento_swap::resolver::TokenSelector;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::SwapRequest;

/// 请求体的一个方向 (入/出) → 解析器选择子
fn selector_for(
    custom: &Option<bento_core::token::entity::CustomTokenSpec>,
    use_native: Option<bool>,
    identifier: &Option<String>,
) -> TokenSelector {
    if let Some(spec) = custom {
        return TokenSelector::Custom(spec.clone());
    }
    if use_native.unwrap_or(false) {
        return TokenSelector::Native;
    }
    TokenSelector::Id(identifier.clone().unwrap_or_default())
}

/// # Summary
/// 请求体 → 完整的兑换参数集，三个 POST 接口共用。
///
/// # Logic
/// 1. 滑点越界最先拒绝——在任何解析或网络调用之前。
/// 2. 解析入/出两个方向的代币 (自定义 > 原生 > 标识符)。
/// 3. 金额换算为原始整数。
/// 4. `from`/`to` 缺省时回退到 `userAddress`，仍为空由构造器拒绝。
pub(crate) async fn prepare_params(
    state: &AppState,
    req: &SwapRequest,
) -> Result<SwapParams, ApiError> {
    let slippage_bps = req.slippage.unwrap_or(DEFAULT_SLIPPAGE_BPS);
    if slippage_bps > MAX_SLIPPAGE_BPS {
        return Err(SwapError::InvalidParameters(format!(
            "滑点 {slippage_bps} bps 超过上限 {MAX_SLIPPAGE_BPS} bps (3%)"
        ))
        .into());
    }

    let selector_in = selector_for(&req.custom_token_in, req.use_native_token_in, &req.token_in);
    let selector_out = selector_for(
        &req.custom_token_out,
        req.use_native_token_out,
        &req.token_out,
    );

    let token_in = state.resolver.resolve(req.from_chain_id, &selector_in).await?;
    let token_out = state.resolver.resolve(req.to_chain_id, &selector_out).await?;

    let amount_in = state.builder.create_token_amount(token_in, &req.amount)?;

    let fallback = req.user_address.clone().unwrap_or_default();
    let from = req.from.clone().unwrap_or_else(|| fallback.clone());
    let to = req.to.clone().unwrap_or(fallback);

    let mode = SelectMode::parse_or_default(req.select_mode.as_deref().unwrap_or_default());

    let params = state
        .builder
        .build(amount_in, token_out, &from, &to, slippage_bps, mode)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bento_core::token::entity::CustomTokenSpec;

    #[test]
    fn test_selector_precedence_custom_then_native_then_id() {
        let spec = CustomTokenSpec {
            address: "0x1234".to_string(),
            symbol: "WIDGET".to_string(),
            decimals: 6,
            chain_id: 137,
            name: None,
        };
        // 自定义定义优先于原生标记与标识符
        assert!(matches!(
            selector_for(&Some(spec), Some(true), &Some("BRZ".to_string())),
            TokenSelector::Custom(_)
        ));
        // 原生标记优先于标识符，tokenIn 被忽略
        assert!(matches!(
            selector_for(&None, Some(true), &Some("BRZ".to_string())),
            TokenSelector::Native
        ));
        match selector_for(&None, None, &Some("BRZ".to_string())) {
            TokenSelector::Id(id) => assert_eq!(id, "BRZ"),
            other => panic!("意外的选择子: {other:?}"),
        }
        // 什么都没给时落到空标识符，由解析器按未知代币处理
        assert!(matches!(
            selector_for(&None, None, &None),
            TokenSelector::Id(id) if id.is_empty()
        ));
    }
}
