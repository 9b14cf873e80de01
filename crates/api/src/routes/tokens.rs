use std::collections::HashSet;

use axum::Json;
use axum::extract::{Path, State};

use bento_core::token::entity::ChainId;
use bento_core::token::registry::SUPPORTED_CHAINS;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, ChainResponse, TokenDetailResponse};

/// 列出指定链上的可用代币
///
/// 合并本地注册表 (原生资产 + 区域稳定币) 与引擎全量目录，
/// 按代币身份去重。引擎目录不可达时降级为仅注册表数据。
#[utoipa::path(
    get,
    path = "/api/tokens/{chain_id}",
    tag = "代币 (Tokens)",
    params(
        ("chain_id" = u32, Path, description = "链 ID (如 137 = Polygon)")
    ),
    responses(
        (status = 200, description = "代币列表获取成功", body = ApiResponse<Vec<TokenDetailResponse>>)
    )
)]
pub async fn list_tokens(
    State(state): State<AppState>,
    Path(chain_id): Path<ChainId>,
) -> Result<Json<ApiResponse<Vec<TokenDetailResponse>>>, ApiError> {
    let mut seen: HashSet<(ChainId, String)> = HashSet::new();
    let mut result: Vec<TokenDetailResponse> = Vec::new();

    // 注册表条目优先：原生资产与区域稳定币的定义以本地为准
    if let Some(native) = state.registry.lookup_native(chain_id)
        && seen.insert(native.identity())
    {
        result.push(TokenDetailResponse::from(native));
    }
    for (_, deployments) in state.registry.all_regional() {
        for token in deployments.iter().filter(|t| t.chain_id == chain_id) {
            if seen.insert(token.identity()) {
                result.push(TokenDetailResponse::from(token));
            }
        }
    }

    match state.routing.tokens().await {
        Ok(catalog) => {
            for token in catalog.into_iter().filter(|t| t.chain_id == chain_id) {
                if seen.insert(token.identity()) {
                    result.push(TokenDetailResponse::from(&token));
                }
            }
        }
        Err(err) => {
            tracing::warn!(chain_id, error = %err, "引擎目录不可达，仅返回注册表条目");
        }
    }

    Ok(Json(ApiResponse::ok(result)))
}

/// 列出受支持的链
#[utoipa::path(
    get,
    path = "/api/supported-chains",
    tag = "网络 (Chains)",
    responses(
        (status = 200, description = "链列表获取成功", body = ApiResponse<Vec<ChainResponse>>)
    )
)]
pub async fn supported_chains() -> Json<ApiResponse<Vec<ChainResponse>>> {
    let chains = SUPPORTED_CHAINS
        .iter()
        .map(|(name, chain_id)| ChainResponse {
            name: (*name).to_string(),
            chain_id: *chain_id,
        })
        .collect();
    Json(ApiResponse::ok(chains))
}

/// 列出受支持的网络名
///
/// `/supported-chains` 的轻量别名，只返回名称列表。
#[utoipa::path(
    get,
    path = "/api/supported-networks",
    tag = "网络 (Chains)",
    responses(
        (status = 200, description = "网络名列表获取成功", body = ApiResponse<Vec<String>>)
    )
)]
pub async fn supported_networks() -> Json<ApiResponse<Vec<String>>> {
    let names = SUPPORTED_CHAINS
        .iter()
        .map(|(name, _)| (*name).to_string())
        .collect();
    Json(ApiResponse::ok(names))
}
