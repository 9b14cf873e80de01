use std::sync::Arc;

use bento_core::common::Clock;
use bento_core::swap::entity::{
    DEADLINE_WINDOW_MINUTES, MAX_SLIPPAGE_BPS, SelectMode, SwapParams,
};
use bento_core::swap::error::SwapError;
use bento_core::token::entity::{Token, TokenAmount};

/// # Summary
/// 兑换参数构造器。纯校验与装配，不做网络调用。
///
/// # Invariants
/// - 滑点越界在执行路径之前直接拒绝，绝不静默截断
///   (截断只保留给执行引擎自身的升级逻辑)。
/// - deadline 在构造时一次性由注入时钟计算，重试期间不重算。
pub struct SwapParamsBuilder {
    clock: Arc<dyn Clock>,
}

impl SwapParamsBuilder {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// 人类可读金额 → 原始整数金额
    pub fn create_token_amount(
        &self,
        token: Token,
        human: &str,
    ) -> Result<TokenAmount, SwapError> {
        TokenAmount::from_human(token, human).map_err(Into::into)
    }

    /// # Summary
    /// 校验并装配一次兑换的参数集。
    ///
    /// # Logic
    /// 1. `slippage_bps > 300` → InvalidParameters。
    /// 2. `from` / `to` 为空 → InvalidParameters。
    /// 3. deadline = now + 20 分钟 (固定窗口)。
    pub fn build(
        &self,
        token_amount_in: TokenAmount,
        token_out: Token,
        from: &str,
        to: &str,
        slippage_bps: u32,
        select_mode: SelectMode,
    ) -> Result<SwapParams, SwapError> {
        if slippage_bps > MAX_SLIPPAGE_BPS {
            return Err(SwapError::InvalidParameters(format!(
                "滑点 {slippage_bps} bps 超过上限 {MAX_SLIPPAGE_BPS} bps (3%)"
            )));
        }
        if from.trim().is_empty() || to.trim().is_empty() {
            return Err(SwapError::InvalidParameters(
                "from/to 地址 (或 userAddress 回退) 不能为空".to_string(),
            ));
        }

        let deadline_epoch_seconds =
            self.clock.now_epoch_seconds() + DEADLINE_WINDOW_MINUTES * 60;

        Ok(SwapParams {
            token_amount_in,
            token_out,
            from: from.to_string(),
            to: to.to_string(),
            slippage_bps,
            deadline_epoch_seconds,
            select_mode,
        })
    }
}
