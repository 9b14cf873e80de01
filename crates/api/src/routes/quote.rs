use axum::Json;
use axum::extract::State;

use bento_swap::formatter::{SwapSummary, format_swap_result};

use crate::error::ApiError;
use crate::routes::prepare_params;
use crate::server::AppState;
use crate::types::{ApiResponse, SwapRequest};

/// 获取兑换报价
///
/// 单次引擎调用，不做重试/回退。引擎错误 (含资金不足) 原样分类透传，
/// 供前端在用户确认前展示准确的失败原因。
#[utoipa::path(
    post,
    path = "/api/quote",
    tag = "兑换 (Swap)",
    request_body = SwapRequest,
    responses(
        (status = 200, description = "报价成功", body = ApiResponse<SwapSummary>),
        (status = 400, description = "参数错误 / 未知代币 / 资金不足"),
        (status = 500, description = "引擎内部错误")
    )
)]
pub async fn get_quote(
    State(state): State<AppState>,
    Json(req): Json<SwapRequest>,
) -> Result<Json<ApiResponse<SwapSummary>>, ApiError> {
    let params = prepare_params(&state, &req).await?;

    tracing::info!(
        from_chain = req.from_chain_id,
        to_chain = req.to_chain_id,
        amount = %req.amount,
        mode = %params.select_mode,
        "报价请求"
    );

    let outcome = state.executor.execute_once(&params).await?;
    Ok(Json(ApiResponse::ok(format_swap_result(
        outcome.result,
        outcome.select_mode,
    ))))
}
