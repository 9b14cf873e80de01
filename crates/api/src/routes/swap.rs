use axum::Json;
use axum::extract::State;

use bento_swap::formatter::{SwapSummary, format_swap_result};

use crate::error::ApiError;
use crate::routes::prepare_params;
use crate::server::AppState;
use crate::types::{ApiResponse, SwapRequest};

/// 构造兑换交易
///
/// 完整的两层重试/回退策略：主上下文多轮聚合器轮换 + 滑点升级，
/// 全部失败后切换中性身份强制回退。响应中的 `selectMode` 回显
/// 实际成功的聚合器模式，不一定等于请求的模式。
#[utoipa::path(
    post,
    path = "/api/swap",
    tag = "兑换 (Swap)",
    request_body = SwapRequest,
    responses(
        (status = 200, description = "兑换交易构造成功，载荷待钱包签名", body = ApiResponse<SwapSummary>),
        (status = 400, description = "参数错误 / 未知代币 / 所有聚合器均失败"),
        (status = 500, description = "引擎内部错误")
    )
)]
pub async fn execute_swap(
    State(state): State<AppState>,
    Json(req): Json<SwapRequest>,
) -> Result<Json<ApiResponse<SwapSummary>>, ApiError> {
    let params = prepare_params(&state, &req).await?;

    tracing::info!(
        from_chain = req.from_chain_id,
        to_chain = req.to_chain_id,
        amount = %req.amount,
        slippage_bps = params.slippage_bps,
        mode = %params.select_mode,
        "兑换请求"
    );

    let outcome = state.executor.execute_with_fallback(&params).await?;
    Ok(Json(ApiResponse::ok(format_swap_result(
        outcome.result,
        outcome.select_mode,
    ))))
}
