use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use utoipa::ToSchema;

use bento_core::swap::error::SwapError;
use bento_core::token::entity::ChainId;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, TokenDetailResponse};

/// 列出全部区域稳定币及其各链部署
#[utoipa::path(
    get,
    path = "/api/brazilian-tokens",
    tag = "代币 (Tokens)",
    responses(
        (status = 200, description = "区域稳定币列表获取成功", body = ApiResponse<Vec<TokenDetailResponse>>)
    )
)]
pub async fn list_brazilian_tokens(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<TokenDetailResponse>>> {
    let tokens = state
        .registry
        .all_regional()
        .iter()
        .flat_map(|(_, deployments)| deployments.iter().map(TokenDetailResponse::from))
        .collect();
    Json(ApiResponse::ok(tokens))
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrazilianTokenQuery {
    /// 限定到指定链；缺省返回该符号的所有链部署
    pub chain_id: Option<ChainId>,
}

/// 按符号查询区域稳定币
///
/// 带 `chainId` 时返回该链上的唯一部署；不带时返回全部链部署。
/// 未收录的符号或链按未知代币处理，回复携带可照抄的示例定义。
#[utoipa::path(
    get,
    path = "/api/brazilian-tokens/{symbol}",
    tag = "代币 (Tokens)",
    params(
        ("symbol" = String, Path, description = "稳定币符号 (如 BRZ)"),
        ("chainId" = Option<u32>, Query, description = "限定链 ID")
    ),
    responses(
        (status = 200, description = "查询成功", body = ApiResponse<Vec<TokenDetailResponse>>),
        (status = 400, description = "符号未收录或该链上无部署")
    )
)]
pub async fn get_brazilian_token(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<BrazilianTokenQuery>,
) -> Result<Json<ApiResponse<Vec<TokenDetailResponse>>>, ApiError> {
    let unknown = |chain_id: ChainId| -> ApiError {
        SwapError::UnknownToken {
            identifier: symbol.clone(),
            chain_id,
            example: state.registry.example_token(chain_id),
        }
        .into()
    };

    if let Some(chain_id) = query.chain_id {
        let token = state
            .registry
            .lookup_regional(&symbol, chain_id)
            .ok_or_else(|| unknown(chain_id))?;
        return Ok(Json(ApiResponse::ok(vec![TokenDetailResponse::from(
            token,
        )])));
    }

    let deployments: Vec<TokenDetailResponse> = state
        .registry
        .all_regional()
        .iter()
        .filter(|(sym, _)| sym.eq_ignore_ascii_case(&symbol))
        .flat_map(|(_, tokens)| tokens.iter().map(TokenDetailResponse::from))
        .collect();

    if deployments.is_empty() {
        return Err(unknown(137));
    }
    Ok(Json(ApiResponse::ok(deployments)))
}
