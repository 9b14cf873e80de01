use bento_core::swap::port::{AttemptEvent, AttemptObserver, AttemptOutcome, AttemptTier};

/// # Summary
/// 缺省的尝试事件汇：把每次聚合器调用以结构化字段写入 `tracing`。
/// 测试用例注入自己的记录器即可对尝试序列做精确断言。
pub struct TracingAttemptObserver;

impl AttemptObserver for TracingAttemptObserver {
    fn on_attempt(&self, event: &AttemptEvent) {
        let tier = match event.tier {
            AttemptTier::Primary => "primary",
            AttemptTier::Forced => "forced",
        };
        match &event.outcome {
            AttemptOutcome::Succeeded => {
                tracing::info!(
                    tier,
                    round = event.round,
                    mode = %event.mode,
                    slippage_bps = event.slippage_bps,
                    "聚合器尝试成功"
                );
            }
            AttemptOutcome::Failed(message) => {
                tracing::warn!(
                    tier,
                    round = event.round,
                    mode = %event.mode,
                    slippage_bps = event.slippage_bps,
                    error = %message,
                    "聚合器尝试失败"
                );
            }
        }
    }
}
