//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use bento_core::swap::port::RoutingEngine;
use bento_core::token::registry::TokenRegistry;
use bento_swap::builder::SwapParamsBuilder;
use bento_swap::executor::SwapExecutor;
use bento_swap::resolver::TokenResolver;

use crate::routes::{brazilian, quote, route, swap, tokens};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 全部字段在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - `routing` 是主上下文句柄，与 `executor` 内部持有的是同一个。
#[derive(Clone)]
pub struct AppState {
    /// 静态代币注册表
    pub registry: Arc<TokenRegistry>,
    /// 代币解析器
    pub resolver: Arc<TokenResolver>,
    /// 兑换参数构造器
    pub builder: Arc<SwapParamsBuilder>,
    /// 兑换执行引擎 (两层重试/回退)
    pub executor: Arc<SwapExecutor>,
    /// 主路由引擎句柄 (目录查询用)
    pub routing: Arc<dyn RoutingEngine>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bento 跨链兑换 API",
        version = "0.1.0",
        description = "跨链代币兑换服务的 RESTful API 网关。提供报价、兑换交易构造、代币目录与受支持网络查询功能。路径发现与价格计算由外部路由引擎完成。",
        contact(name = "Bento Team"),
        license(name = "MIT")
    ),
    tags(
        (name = "兑换 (Swap)", description = "报价、路由查询与兑换交易构造"),
        (name = "代币 (Tokens)", description = "代币目录与区域稳定币注册表查询"),
        (name = "网络 (Chains)", description = "受支持链/网络列表")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// # Summary
/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
/// 测试用例用它配合自己的 listener 在随机端口起服务。
pub fn build_router(state: AppState) -> Router {
    let api_router = OpenApiRouter::new()
        .routes(routes!(quote::get_quote))
        .routes(routes!(swap::execute_swap))
        .routes(routes!(route::get_route))
        .routes(routes!(tokens::list_tokens))
        .routes(routes!(tokens::supported_chains))
        .routes(routes!(tokens::supported_networks))
        .routes(routes!(brazilian::list_brazilian_tokens))
        .routes(routes!(brazilian::get_brazilian_token));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(api_router)
        .with_state(state)
        .split_for_parts();

    // CORS: 前端直连场景，允许所有来源
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 构建路由树并启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:5000"`
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 Bento API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
