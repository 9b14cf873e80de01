use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bento_api::server::{AppState, start_server};
use bento_core::common::SystemClock;
use bento_core::config::AppConfig;
use bento_core::swap::port::RoutingEngineFactory;
use bento_core::token::registry::TokenRegistry;
use bento_swap::builder::SwapParamsBuilder;
use bento_swap::executor::{RetryPolicy, SwapExecutor};
use bento_swap::observer::TracingAttemptObserver;
use bento_swap::resolver::TokenResolver;
use bento_symbiosis::SymbiosisConnector;

/// # Summary
/// 读取应用配置：内置缺省值 + 可选的 `bento.toml` + `BENTO_*` 环境变量覆盖。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 为基底。
/// 2. 工作目录下存在 `bento.toml` 则叠加。
/// 3. 环境变量 (如 `BENTO_SERVER__PORT=8080`) 优先级最高。
fn load_config() -> Result<AppConfig, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Config::try_from(&AppConfig::default())?)
        .add_source(config::File::with_name("bento").required(false))
        .add_source(config::Environment::with_prefix("BENTO").separator("__"))
        .build()?;
    settings.try_deserialize()
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 API 层。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 加载配置。
/// 3. 实例化基础设施层（路由引擎连接器、注册表）。
/// 4. 实例化领域实现层（解析器、参数构造器、执行引擎）。
/// 5. 启动 HTTP 服务并阻塞运行。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("Bento Swap Service starting...");

    // 2. 加载配置
    let config = load_config()?;
    info!(
        engine = %config.routing.base_url,
        client_id = %config.routing.client_id,
        "配置加载完成"
    );

    // 3. 实例化基础设施层
    let registry = Arc::new(TokenRegistry::mainnet());
    let connector = Arc::new(SymbiosisConnector::new(&config.routing.base_url));
    let primary = connector.connect(&config.routing.client_id);

    // 4. 实例化领域实现层（注入 Core Trait 抽象）
    let resolver = Arc::new(TokenResolver::new(registry.clone(), primary.clone()));
    let builder = Arc::new(SwapParamsBuilder::new(Arc::new(SystemClock)));
    let executor = Arc::new(SwapExecutor::new(
        primary.clone(),
        connector,
        Arc::new(TracingAttemptObserver),
        RetryPolicy::from(&config.routing),
    ));

    // 5. 启动 HTTP 服务
    let state = AppState {
        registry,
        resolver,
        builder,
        executor,
        routing: primary,
    };
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    start_server(state, &bind_addr).await?;

    Ok(())
}
