use std::sync::Arc;
use std::time::Duration;

use bento_core::config::RoutingConfig;
use bento_core::swap::entity::{MAX_SLIPPAGE_BPS, SelectMode, SwapParams, SwapResult};
use bento_core::swap::error::SwapError;
use bento_core::swap::port::{
    AttemptEvent, AttemptObserver, AttemptOutcome, AttemptTier, RoutingEngine,
    RoutingEngineFactory,
};

use crate::formatter::classify_routing_error;

/// 第一层重试的参数
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大轮数 (一轮 = 按旋转顺序遍历全部四种模式)
    pub max_rounds: u32,
    /// 轮间等待
    pub round_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            round_delay: Duration::from_secs(2),
        }
    }
}

impl From<&RoutingConfig> for RetryPolicy {
    fn from(config: &RoutingConfig) -> Self {
        Self {
            max_rounds: config.max_rounds,
            round_delay: Duration::from_millis(config.round_delay_ms),
        }
    }
}

/// # Summary
/// 执行引擎的成功产物：引擎结果加上实际成功的聚合器模式。
/// 响应体回显的 `selectMode` 是成功的模式，不一定是请求的模式。
#[derive(Debug, Clone)]
pub struct SwapOutcome {
    pub result: SwapResult,
    pub select_mode: SelectMode,
}

/// # Summary
/// 兑换执行引擎：以两层重试/回退策略调用外部路由能力，
/// 对聚合器为何失败不做任何假设。
///
/// # Invariants
/// - 尝试严格串行，轮内与轮间都不并发竞速——保证滑点升级与强制回退语义有序，
///   也避免放大可能已过载的外部聚合器的压力。
/// - 单次尝试的错误只进事件汇与日志，从不单独越过组件边界。
pub struct SwapExecutor {
    /// 主路由上下文 (携带配置的客户端身份)
    primary: Arc<dyn RoutingEngine>,
    /// 强制回退层用来构造中性身份上下文的工厂
    factory: Arc<dyn RoutingEngineFactory>,
    observer: Arc<dyn AttemptObserver>,
    policy: RetryPolicy,
}

impl SwapExecutor {
    pub fn new(
        primary: Arc<dyn RoutingEngine>,
        factory: Arc<dyn RoutingEngineFactory>,
        observer: Arc<dyn AttemptObserver>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            primary,
            factory,
            observer,
            policy,
        }
    }

    /// # Summary
    /// 单次引擎调用，不做重试 (供 /quote 与 /route 使用)。
    /// 引擎错误直接走边界分类映射后透传。
    pub async fn execute_once(&self, params: &SwapParams) -> Result<SwapOutcome, SwapError> {
        match self.primary.compute_swap(params).await {
            Ok(result) => Ok(SwapOutcome {
                result,
                select_mode: params.select_mode,
            }),
            Err(err) => Err(classify_routing_error(err)),
        }
    }

    /// # Summary
    /// 完整的两层策略 (供 /swap 使用)。
    ///
    /// # Logic
    /// 1. 第一层：最多 `max_rounds` 轮，按请求模式旋转后的顺序逐个尝试；
    ///    整轮失败后等待固定延迟，下一轮滑点升级 `(轮次-1)×100bps`，上限 300。
    /// 2. 第二层：以空客户端身份构造全新引擎上下文，按基准顺序每个模式各试一次，
    ///    使用原始 (未升级) 滑点，不等待——不同上下文不假定同样的瞬时过载。
    /// 3. 两层都穷尽 → 复合 RoutingFailure，同时嵌入两层摘要
    ///    (第一层说明不是偶发；第二层说明不是客户端身份限制)。
    pub async fn execute_with_fallback(
        &self,
        params: &SwapParams,
    ) -> Result<SwapOutcome, SwapError> {
        let primary_summary = match self.primary_rounds(params).await {
            Ok(outcome) => return Ok(outcome),
            Err(summary) => summary,
        };

        tracing::warn!("主流程所有轮次均失败，切换中性身份强制回退");

        let forced_summary = match self.forced_fallback(params).await {
            Ok(outcome) => return Ok(outcome),
            Err(summary) => summary,
        };

        Err(SwapError::RoutingFailure {
            primary: primary_summary,
            forced: forced_summary,
        })
    }

    /// 请求模式旋转到首位，其余保持基准相对顺序
    fn rotation_for(requested: SelectMode) -> [SelectMode; 4] {
        let base = SelectMode::ROTATION;
        let start = base.iter().position(|m| *m == requested).unwrap_or(0);
        [
            base[start % 4],
            base[(start + 1) % 4],
            base[(start + 2) % 4],
            base[(start + 3) % 4],
        ]
    }

    /// 第 `round` 轮 (1 起) 的滑点：只升不降，硬上限 300 bps
    fn escalated_slippage(original: u32, round: u32) -> u32 {
        original
            .saturating_add(round.saturating_sub(1).saturating_mul(100))
            .min(MAX_SLIPPAGE_BPS)
    }

    async fn primary_rounds(&self, params: &SwapParams) -> Result<SwapOutcome, String> {
        let rotation = Self::rotation_for(params.select_mode);
        let mut failures: Vec<String> = Vec::new();

        for round in 1..=self.policy.max_rounds {
            let slippage_bps = Self::escalated_slippage(params.slippage_bps, round);
            if slippage_bps != params.slippage_bps {
                tracing::info!(round, slippage_bps, "滑点升级后开始新一轮尝试");
            }

            for mode in rotation {
                let mut attempt = params.clone();
                attempt.select_mode = mode;
                attempt.slippage_bps = slippage_bps;

                match self.primary.compute_swap(&attempt).await {
                    Ok(result) => {
                        self.emit(AttemptTier::Primary, round, mode, slippage_bps, None);
                        if mode != params.select_mode {
                            tracing::info!(
                                requested = %params.select_mode,
                                succeeded = %mode,
                                "备选聚合器成功"
                            );
                        }
                        return Ok(SwapOutcome {
                            result,
                            select_mode: mode,
                        });
                    }
                    Err(err) => {
                        let message = err.to_string();
                        tracing::debug!(round, %mode, slippage_bps, error = %message, "聚合器尝试失败");
                        self.emit(
                            AttemptTier::Primary,
                            round,
                            mode,
                            slippage_bps,
                            Some(message.clone()),
                        );
                        failures.push(format!("第{round}轮 {mode}: {message}"));
                    }
                }
            }

            if round < self.policy.max_rounds {
                tokio::time::sleep(self.policy.round_delay).await;
            }
        }

        Err(format!(
            "{}轮共{}次尝试全部失败: {}",
            self.policy.max_rounds,
            failures.len(),
            failures.join("; ")
        ))
    }

    async fn forced_fallback(&self, params: &SwapParams) -> Result<SwapOutcome, String> {
        // 空身份 = 不受客户端范围的聚合器限制
        let clean = self.factory.connect("");
        let mut failures: Vec<String> = Vec::new();

        for mode in SelectMode::ROTATION {
            let mut attempt = params.clone();
            attempt.select_mode = mode;

            match clean.compute_swap(&attempt).await {
                Ok(result) => {
                    self.emit(AttemptTier::Forced, 1, mode, params.slippage_bps, None);
                    tracing::info!(succeeded = %mode, "强制回退成功");
                    return Ok(SwapOutcome {
                        result,
                        select_mode: mode,
                    });
                }
                Err(err) => {
                    let message = err.to_string();
                    self.emit(
                        AttemptTier::Forced,
                        1,
                        mode,
                        params.slippage_bps,
                        Some(message.clone()),
                    );
                    failures.push(format!("{mode}: {message}"));
                }
            }
        }

        Err(format!(
            "中性身份下全部模式失败: {}",
            failures.join("; ")
        ))
    }

    fn emit(
        &self,
        tier: AttemptTier,
        round: u32,
        mode: SelectMode,
        slippage_bps: u32,
        failure: Option<String>,
    ) {
        let outcome = match failure {
            None => AttemptOutcome::Succeeded,
            Some(message) => AttemptOutcome::Failed(message),
        };
        self.observer.on_attempt(&AttemptEvent {
            tier,
            round,
            mode,
            slippage_bps,
            outcome,
        });
    }
}
