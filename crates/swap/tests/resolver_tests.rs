use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bento_core::swap::entity::{SwapParams, SwapResult};
use bento_core::swap::error::SwapError;
use bento_core::swap::port::{RoutingEngine, RoutingError};
use bento_core::token::entity::{ChainId, CustomTokenSpec, Token};
use bento_core::token::registry::TokenRegistry;
use bento_swap::resolver::{TokenResolver, TokenSelector};

// ============================================================
//  带目录的 Mock 路由引擎
// ============================================================

/// 引擎目录 Mock：记录每个端口方法的调用次数，供断言解析
/// 早停 (命中高优先级来源后不再查询引擎)。
struct CatalogEngine {
    catalog: Vec<Token>,
    find_token_calls: AtomicUsize,
    tokens_calls: AtomicUsize,
    fail_lookups: bool,
}

impl CatalogEngine {
    fn new(catalog: Vec<Token>) -> Self {
        Self {
            catalog,
            find_token_calls: AtomicUsize::new(0),
            tokens_calls: AtomicUsize::new(0),
            fail_lookups: false,
        }
    }

    fn failing() -> Self {
        Self {
            catalog: vec![],
            find_token_calls: AtomicUsize::new(0),
            tokens_calls: AtomicUsize::new(0),
            fail_lookups: true,
        }
    }
}

#[async_trait]
impl RoutingEngine for CatalogEngine {
    async fn find_token(
        &self,
        address: &str,
        chain_id: ChainId,
    ) -> Result<Option<Token>, RoutingError> {
        self.find_token_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups {
            return Err(RoutingError::Network("mock 目录不可达".to_string()));
        }
        Ok(self
            .catalog
            .iter()
            .find(|t| t.chain_id == chain_id && t.address.eq_ignore_ascii_case(address))
            .cloned())
    }

    async fn tokens(&self) -> Result<Vec<Token>, RoutingError> {
        self.tokens_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups {
            return Err(RoutingError::Network("mock 目录不可达".to_string()));
        }
        Ok(self.catalog.clone())
    }

    async fn compute_swap(&self, _params: &SwapParams) -> Result<SwapResult, RoutingError> {
        Err(RoutingError::Unknown("目录 Mock 不做兑换".to_string()))
    }
}

fn resolver_with(engine: Arc<CatalogEngine>) -> TokenResolver {
    TokenResolver::new(Arc::new(TokenRegistry::mainnet()), engine)
}

// ============================================================
//  用例
// ============================================================

#[tokio::test]
async fn test_custom_spec_bypasses_all_lookups() {
    let engine = Arc::new(CatalogEngine::new(vec![]));
    let resolver = resolver_with(engine.clone());

    let spec = CustomTokenSpec {
        address: "0x1234000000000000000000000000000000005678".to_string(),
        symbol: "WIDGET".to_string(),
        decimals: 6,
        chain_id: 137,
        name: None,
    };
    let token = resolver
        .resolve(137, &TokenSelector::Custom(spec))
        .await
        .unwrap();

    assert_eq!(token.symbol, "WIDGET");
    assert_eq!(token.decimals, 6);
    // 自定义定义不触发任何引擎查询
    assert_eq!(engine.find_token_calls.load(Ordering::SeqCst), 0);
    assert_eq!(engine.tokens_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_native_selector_resolves_chain_native() {
    let engine = Arc::new(CatalogEngine::new(vec![]));
    let resolver = resolver_with(engine.clone());

    let token = resolver.resolve(137, &TokenSelector::Native).await.unwrap();
    assert_eq!(token.symbol, "MATIC");
    assert!(token.is_native);

    // 符号形式的原生标识同样早停，不触发引擎查询
    let by_symbol = resolver
        .resolve(43114, &TokenSelector::Id("avax".to_string()))
        .await
        .unwrap();
    assert_eq!(by_symbol.symbol, "AVAX");
    assert!(by_symbol.is_native);
    assert_eq!(engine.find_token_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_address_resolves_from_engine_catalog() {
    let usdc = Token::erc20(
        137,
        "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359",
        "USDC",
        6,
        "USD Coin",
    );
    let engine = Arc::new(CatalogEngine::new(vec![usdc]));
    let resolver = resolver_with(engine);

    let token = resolver
        .resolve(
            137,
            &TokenSelector::Id("0x3c499c542cef5e3811e1192ce70d8cc03d5c3359".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(token.symbol, "USDC");
    assert_eq!(token.decimals, 6);
}

#[tokio::test]
async fn test_regional_registry_beats_catalog_symbol() {
    // 目录里有一个同符号不同地址的 BRZ，注册表必须优先
    let impostor = Token::erc20(
        137,
        "0x00000000000000000000000000000000000000bad",
        "BRZ",
        4,
        "Not The Real One",
    );
    let engine = Arc::new(CatalogEngine::new(vec![impostor]));
    let resolver = resolver_with(engine.clone());

    let token = resolver
        .resolve(137, &TokenSelector::Id("BRZ".to_string()))
        .await
        .unwrap();
    assert_eq!(
        token.address,
        "0x4eD141110F6EeeAbA9A1df36d8c26f684d2475Dc"
    );
    assert_eq!(token.decimals, 18);
    // 命中注册表后不再扫描全量目录
    assert_eq!(engine.tokens_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_catalog_symbol_is_last_resolving_source() {
    let usdc = Token::erc20(
        137,
        "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359",
        "USDC",
        6,
        "USD Coin",
    );
    let engine = Arc::new(CatalogEngine::new(vec![usdc]));
    let resolver = resolver_with(engine.clone());

    let token = resolver
        .resolve(137, &TokenSelector::Id("usdc".to_string()))
        .await
        .unwrap();
    assert_eq!(token.symbol, "USDC");
    assert_eq!(engine.tokens_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_identifier_carries_example() {
    let engine = Arc::new(CatalogEngine::new(vec![]));
    let resolver = resolver_with(engine);

    let err = resolver
        .resolve(137, &TokenSelector::Id("DOGECOIN".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "UNKNOWN_TOKEN");
    match err {
        SwapError::UnknownToken {
            identifier,
            chain_id,
            example,
        } => {
            assert_eq!(identifier, "DOGECOIN");
            assert_eq!(chain_id, 137);
            // 示例是同链上一个可用代币，引导调用方提供 customToken 定义
            assert_eq!(example.symbol, "BRZ");
            assert_eq!(example.chain_id, 137);
        }
        other => panic!("意外的错误类型: {other:?}"),
    }
}

#[tokio::test]
async fn test_engine_outage_degrades_to_registry() {
    // 引擎目录不可达时，注册表来源仍要可解析
    let engine = Arc::new(CatalogEngine::failing());
    let resolver = resolver_with(engine);

    let token = resolver
        .resolve(8453, &TokenSelector::Id("brz".to_string()))
        .await
        .unwrap();
    assert_eq!(
        token.address,
        "0xE9185Ee218cae427aF7B9764A011bb89FeA761B4"
    );
    assert_eq!(token.chain_id, 8453);
}
