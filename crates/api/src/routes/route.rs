use axum::Json;
use axum::extract::State;

use bento_core::swap::error::SwapError;
use bento_swap::formatter::format_swap_result;

use crate::error::ApiError;
use crate::routes::prepare_params;
use crate::server::AppState;
use crate::types::{ApiResponse, RouteResponse, SwapRequest};

/// 从交易载荷中提取 gas 预估字段 (gas / gasLimit，数字或字符串形式)
fn estimated_gas(transaction_request: &serde_json::Value) -> Option<String> {
    let gas = transaction_request
        .get("gas")
        .or_else(|| transaction_request.get("gasLimit"))?;
    match gas {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 查询兑换路由详情
///
/// 与报价相同的单次引擎调用，但强制要求显式的 `from`/`to` 地址
/// (路由与 gas 预估依赖真实地址)，并额外返回 `estimatedGas`。
#[utoipa::path(
    post,
    path = "/api/route",
    tag = "兑换 (Swap)",
    request_body = SwapRequest,
    responses(
        (status = 200, description = "路由查询成功", body = ApiResponse<RouteResponse>),
        (status = 400, description = "参数错误 / 未知代币 / 资金不足"),
        (status = 500, description = "引擎内部错误")
    )
)]
pub async fn get_route(
    State(state): State<AppState>,
    Json(req): Json<SwapRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, ApiError> {
    // 地址缺失在任何解析之前拒绝，gas 预估对占位地址没有意义
    let fallback = req.user_address.clone().unwrap_or_default();
    let from = req.from.clone().unwrap_or_else(|| fallback.clone());
    let to = req.to.clone().unwrap_or(fallback);
    if from.trim().is_empty() || to.trim().is_empty() {
        return Err(SwapError::InvalidParameters(
            "路由查询必须给出 from/to 地址 (或 userAddress 回退)".to_string(),
        )
        .into());
    }

    let params = prepare_params(&state, &req).await?;
    let outcome = state.executor.execute_once(&params).await?;

    let gas = estimated_gas(&outcome.result.transaction_request);
    let summary = format_swap_result(outcome.result, outcome.select_mode);

    Ok(Json(ApiResponse::ok(RouteResponse {
        summary,
        estimated_gas: gas,
    })))
}
