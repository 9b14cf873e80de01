use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bento_core::swap::entity::{RouteLeg, SelectMode, SwapParams, SwapResult};
use bento_core::swap::error::SwapError;
use bento_core::swap::port::{
    AttemptEvent, AttemptObserver, AttemptOutcome, AttemptTier, RoutingEngine,
    RoutingEngineFactory, RoutingError,
};
use bento_core::token::entity::{ChainId, Token, TokenAmount};
use bento_swap::executor::{RetryPolicy, SwapExecutor};

// ============================================================
//  可编排的 Mock 路由引擎
// ============================================================

/// 一次 compute_swap 调用的记录
#[derive(Debug, Clone)]
struct CallRecord {
    client_id: String,
    mode: SelectMode,
    slippage_bps: u32,
}

type SuccessPredicate = dyn Fn(&CallRecord) -> bool + Send + Sync;

struct MockRouting {
    client_id: String,
    log: Arc<Mutex<Vec<CallRecord>>>,
    succeed_when: Arc<SuccessPredicate>,
}

fn dummy_result() -> SwapResult {
    let out = Token::erc20(
        8453,
        "0xE9185Ee218cae427aF7B9764A011bb89FeA761B4",
        "BRZ",
        18,
        "Brazilian Digital Token",
    );
    SwapResult {
        token_amount_out: TokenAmount::from_raw(out.clone(), 9_970_000_000_000_000_000),
        token_amount_out_min: TokenAmount::from_raw(out.clone(), 9_940_000_000_000_000_000),
        price_impact: rust_decimal::Decimal::ZERO,
        routes: vec![RouteLeg {
            provider: "mock".to_string(),
            tokens: vec![out],
        }],
        fees: vec![],
        transaction_request: serde_json::json!({"to": "0xrouter"}),
        approve_to: "0xapprove".to_string(),
        transaction_type: "evm".to_string(),
        estimated_time: None,
    }
}

#[async_trait]
impl RoutingEngine for MockRouting {
    async fn find_token(
        &self,
        _address: &str,
        _chain_id: ChainId,
    ) -> Result<Option<Token>, RoutingError> {
        Ok(None)
    }

    async fn tokens(&self) -> Result<Vec<Token>, RoutingError> {
        Ok(vec![])
    }

    async fn compute_swap(&self, params: &SwapParams) -> Result<SwapResult, RoutingError> {
        let record = CallRecord {
            client_id: self.client_id.clone(),
            mode: params.select_mode,
            slippage_bps: params.slippage_bps,
        };
        self.log.lock().unwrap().push(record.clone());
        if (self.succeed_when)(&record) {
            Ok(dummy_result())
        } else {
            Err(RoutingError::Aggregator("mock 聚合器不可用".to_string()))
        }
    }
}

struct MockFactory {
    log: Arc<Mutex<Vec<CallRecord>>>,
    succeed_when: Arc<SuccessPredicate>,
}

impl RoutingEngineFactory for MockFactory {
    fn connect(&self, client_id: &str) -> Arc<dyn RoutingEngine> {
        Arc::new(MockRouting {
            client_id: client_id.to_string(),
            log: self.log.clone(),
            succeed_when: self.succeed_when.clone(),
        })
    }
}

/// 记录型事件汇，供断言精确的尝试序列
#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<AttemptEvent>>,
}

impl AttemptObserver for RecordingObserver {
    fn on_attempt(&self, event: &AttemptEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ============================================================
//  测试装配
// ============================================================

fn params_with(mode: SelectMode, slippage_bps: u32) -> SwapParams {
    let token_in = Token::erc20(
        137,
        "0x4eD141110F6EeeAbA9A1df36d8c26f684d2475Dc",
        "BRZ",
        18,
        "Brazilian Digital Token",
    );
    let token_out = Token::erc20(
        8453,
        "0xE9185Ee218cae427aF7B9764A011bb89FeA761B4",
        "BRZ",
        18,
        "Brazilian Digital Token",
    );
    SwapParams {
        token_amount_in: TokenAmount::from_human(token_in, "10").unwrap(),
        token_out,
        from: "0xabc".to_string(),
        to: "0xdef".to_string(),
        slippage_bps,
        deadline_epoch_seconds: 1_700_001_200,
        select_mode: mode,
    }
}

struct Harness {
    executor: SwapExecutor,
    log: Arc<Mutex<Vec<CallRecord>>>,
    observer: Arc<RecordingObserver>,
}

fn harness(succeed_when: Arc<SuccessPredicate>) -> Harness {
    let log: Arc<Mutex<Vec<CallRecord>>> = Arc::new(Mutex::new(Vec::new()));
    let primary = Arc::new(MockRouting {
        client_id: "api-swap-bridge".to_string(),
        log: log.clone(),
        succeed_when: succeed_when.clone(),
    });
    let factory = Arc::new(MockFactory {
        log: log.clone(),
        succeed_when,
    });
    let observer = Arc::new(RecordingObserver::default());
    let executor = SwapExecutor::new(
        primary,
        factory,
        observer.clone(),
        RetryPolicy {
            max_rounds: 3,
            round_delay: Duration::from_secs(2),
        },
    );
    Harness {
        executor,
        log,
        observer,
    }
}

fn never() -> Arc<SuccessPredicate> {
    Arc::new(|_| false)
}

// ============================================================
//  用例
// ============================================================

#[tokio::test(start_paused = true)]
async fn test_round_rotation_starts_at_requested_mode() {
    let h = harness(never());
    let params = params_with(SelectMode::Fastest, 300);

    let err = h.executor.execute_with_fallback(&params).await.unwrap_err();
    assert_eq!(err.kind(), "SWAP_ROUTING_FAILED");

    // 请求 fastest：首轮顺序必须是 fastest → cheapest → best_price → best_return
    let events = h.observer.events.lock().unwrap();
    let first_round: Vec<SelectMode> = events.iter().take(4).map(|e| e.mode).collect();
    assert_eq!(
        first_round,
        vec![
            SelectMode::Fastest,
            SelectMode::Cheapest,
            SelectMode::BestPrice,
            SelectMode::BestReturn,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_slippage_escalates_per_round_and_caps() {
    let h = harness(never());
    let params = params_with(SelectMode::BestReturn, 200);

    let _ = h.executor.execute_with_fallback(&params).await;

    let events = h.observer.events.lock().unwrap();
    // 第一层 3 轮 × 4 模式 + 第二层 4 模式
    assert_eq!(events.len(), 16);

    let primary_slippages: Vec<u32> = events
        .iter()
        .filter(|e| e.tier == AttemptTier::Primary)
        .map(|e| e.slippage_bps)
        .collect();
    // 每轮 4 次：200 → 300 (200+100) → 300 (封顶)
    assert_eq!(
        primary_slippages,
        vec![200, 200, 200, 200, 300, 300, 300, 300, 300, 300, 300, 300]
    );

    // 第二层使用原始 (未升级) 滑点
    let forced: Vec<&AttemptEvent> = events
        .iter()
        .filter(|e| e.tier == AttemptTier::Forced)
        .collect();
    assert_eq!(forced.len(), 4);
    assert!(forced.iter().all(|e| e.slippage_bps == 200));
}

#[tokio::test(start_paused = true)]
async fn test_success_short_circuits_round() {
    // 第二次调用 (cheapest) 成功
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let h = harness(Arc::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst) + 1 == 2
    }));
    let params = params_with(SelectMode::Fastest, 300);

    let outcome = h.executor.execute_with_fallback(&params).await.unwrap();
    // 回显的是成功的模式，而不是请求的模式
    assert_eq!(outcome.select_mode, SelectMode::Cheapest);

    let events = h.observer.events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1].outcome, AttemptOutcome::Succeeded));
    assert!(events.iter().all(|e| e.tier == AttemptTier::Primary));
}

#[tokio::test(start_paused = true)]
async fn test_forced_fallback_uses_neutral_identity() {
    // 只有空客户端身份的上下文会成功
    let h = harness(Arc::new(|record: &CallRecord| {
        record.client_id.is_empty() && record.mode == SelectMode::BestReturn
    }));
    let params = params_with(SelectMode::BestReturn, 200);

    let outcome = h.executor.execute_with_fallback(&params).await.unwrap();
    assert_eq!(outcome.select_mode, SelectMode::BestReturn);

    // 第一层 12 次全败，第二层第 1 次即成功
    let log = h.log.lock().unwrap();
    assert_eq!(log.len(), 13);
    assert!(log[..12].iter().all(|r| r.client_id == "api-swap-bridge"));
    assert_eq!(log[12].client_id, "");
    assert_eq!(log[12].slippage_bps, 200);

    let events = h.observer.events.lock().unwrap();
    assert_eq!(events[12].tier, AttemptTier::Forced);
    assert!(matches!(events[12].outcome, AttemptOutcome::Succeeded));
}

#[tokio::test(start_paused = true)]
async fn test_total_failure_yields_single_composite_error() {
    let h = harness(never());
    let params = params_with(SelectMode::BestReturn, 300);

    let err = h.executor.execute_with_fallback(&params).await.unwrap_err();
    match &err {
        SwapError::RoutingFailure { primary, forced } => {
            // 两层摘要都保留，运维要同时看到两个信号
            assert!(primary.contains("3轮"));
            assert!(primary.contains("12次"));
            assert!(forced.contains("best_price"));
        }
        other => panic!("意外的错误类型: {other:?}"),
    }
    assert_eq!(err.kind(), "SWAP_ROUTING_FAILED");

    // 16 次尝试之外不再有多余调用
    assert_eq!(h.log.lock().unwrap().len(), 16);
}

#[tokio::test]
async fn test_execute_once_passes_through_classified_errors() {
    let log: Arc<Mutex<Vec<CallRecord>>> = Arc::new(Mutex::new(Vec::new()));
    let primary = Arc::new(FailingWithInsufficientFunds);
    let factory = Arc::new(MockFactory {
        log,
        succeed_when: never(),
    });
    let executor = SwapExecutor::new(
        primary,
        factory,
        Arc::new(RecordingObserver::default()),
        RetryPolicy::default(),
    );

    let err = executor
        .execute_once(&params_with(SelectMode::BestReturn, 300))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "INSUFFICIENT_FUNDS");
    match err {
        SwapError::InsufficientFunds { network, .. } => assert_eq!(network, "Base"),
        other => panic!("意外的错误类型: {other:?}"),
    }
}

struct FailingWithInsufficientFunds;

#[async_trait]
impl RoutingEngine for FailingWithInsufficientFunds {
    async fn find_token(
        &self,
        _address: &str,
        _chain_id: ChainId,
    ) -> Result<Option<Token>, RoutingError> {
        Ok(None)
    }

    async fn tokens(&self) -> Result<Vec<Token>, RoutingError> {
        Ok(vec![])
    }

    async fn compute_swap(&self, _params: &SwapParams) -> Result<SwapResult, RoutingError> {
        Err(RoutingError::InsufficientFunds {
            wallet: "0xabc".to_string(),
            network_url: "https://mainnet.base.org".to_string(),
            reason: "insufficient funds for gas".to_string(),
        })
    }
}
