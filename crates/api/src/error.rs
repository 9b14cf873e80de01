//! # API 统一错误处理
//!
//! 将领域层 `SwapError` 统一映射到 HTTP 状态码与 JSON 响应体，
//! 并在此处装配修复建议、自定义代币示例与可用链列表。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use bento_core::swap::entity::SelectMode;
use bento_core::swap::error::SwapError;
use bento_core::token::entity::{CustomTokenSpec, Token};
use bento_core::token::registry::TokenRegistry;
use bento_swap::formatter::suggestion_for;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 领域层错误，HTTP 状态与响应体按分类装配
    #[error(transparent)]
    Swap(#[from] SwapError),
}

/// Token → 可直接照抄的 customToken 定义示例
fn example_spec(token: &Token) -> CustomTokenSpec {
    CustomTokenSpec {
        address: token.address.clone(),
        symbol: token.symbol.clone(),
        decimals: token.decimals,
        chain_id: token.chain_id,
        name: Some(token.name.clone()),
    }
}

impl ApiError {
    /// # Summary
    /// 领域错误 → 响应体。
    ///
    /// # Logic
    /// 1. `kind` 与 `suggestion` 直接取自领域层的分类与建议表。
    /// 2. 未知代币额外装配示例定义与该符号的可用链列表。
    /// 3. 参数错误附上合法的聚合器模式取值。
    /// 4. Unknown 不向客户端透传细节，只记日志。
    fn body(&self) -> (StatusCode, ApiErrorResponse) {
        let ApiError::Swap(err) = self;
        let suggestion = suggestion_for(err).to_string();

        match err {
            SwapError::UnknownToken { example, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse {
                    success: false,
                    kind: err.kind().to_string(),
                    error: err.to_string(),
                    suggestion,
                    example: Some(example_spec(example)),
                    available_chains: Some(
                        TokenRegistry::mainnet().chains_for(&example.symbol),
                    ),
                    available_select_modes: None,
                },
            ),
            SwapError::InvalidParameters(_) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse {
                    success: false,
                    kind: err.kind().to_string(),
                    error: err.to_string(),
                    suggestion,
                    example: None,
                    available_chains: None,
                    available_select_modes: Some(
                        SelectMode::ROTATION
                            .iter()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                    ),
                },
            ),
            SwapError::InsufficientFunds { .. } | SwapError::RoutingFailure { .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse {
                    success: false,
                    kind: err.kind().to_string(),
                    error: err.to_string(),
                    suggestion,
                    example: None,
                    available_chains: None,
                    available_select_modes: None,
                },
            ),
            SwapError::Unknown(message) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!(error = %message, "未分类的内部错误");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse {
                        success: false,
                        kind: err.kind().to_string(),
                        error: "服务器内部错误".to_string(),
                        suggestion,
                        example: None,
                        available_chains: None,
                        available_select_modes: None,
                    },
                )
            }
        }
    }
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.body();
        (status, Json(body)).into_response()
    }
}
