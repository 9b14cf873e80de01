use std::sync::Arc;

use bento_core::swap::error::SwapError;
use bento_core::swap::port::RoutingEngine;
use bento_core::token::entity::{ChainId, CustomTokenSpec, Token};
use bento_core::token::registry::TokenRegistry;

/// # Summary
/// 请求侧指定代币的三种方式，解析优先级由高到低：
/// 自定义定义 > 原生资产请求 > 普通标识符。
#[derive(Debug, Clone)]
pub enum TokenSelector {
    /// 调用方完整给出的定义，绕过一切注册表与目录
    Custom(CustomTokenSpec),
    /// 显式请求链的原生资产，忽略任何标识符
    Native,
    /// 地址或符号字符串
    Id(String),
}

/// # Summary
/// 代币解析器：把 `(chainId, 标识符)` 或自定义定义归一为规范 Token。
/// 依次咨询注册表、外部引擎目录与原生资产规则，固定优先级，首个命中即返回。
pub struct TokenResolver {
    registry: Arc<TokenRegistry>,
    routing: Arc<dyn RoutingEngine>,
}

impl TokenResolver {
    pub fn new(registry: Arc<TokenRegistry>, routing: Arc<dyn RoutingEngine>) -> Self {
        Self { registry, routing }
    }

    /// # Summary
    /// 解析入口。
    ///
    /// # Logic
    /// 1. 自定义定义直接构造，永远优先。
    /// 2. 原生资产请求走注册表的原生表，找不到则按未知代币处理。
    /// 3. 普通标识符进入 `resolve_identifier` 的五级优先序。
    pub async fn resolve(
        &self,
        chain_id: ChainId,
        selector: &TokenSelector,
    ) -> Result<Token, SwapError> {
        match selector {
            TokenSelector::Custom(spec) => Ok(Token::custom(spec.clone())),
            TokenSelector::Native => self
                .registry
                .lookup_native(chain_id)
                .cloned()
                .ok_or_else(|| self.unknown("native", chain_id)),
            TokenSelector::Id(identifier) => {
                self.resolve_identifier(chain_id, identifier).await
            }
        }
    }

    /// # Logic
    /// 固定优先序，首个命中即返回：
    /// 1. 标识符大小写不敏感命中链的原生符号 → 原生 Token (原生资产从不按地址查)。
    /// 2. 非空地址在引擎目录中的精确匹配 (地址查找优先于任何符号表)。
    /// 3. 区域注册表按符号匹配。
    /// 4. 引擎全量目录按符号匹配，过滤到请求链。
    /// 5. 全部落空 → UnknownToken，携带已知可用的示例代币指导纠错。
    async fn resolve_identifier(
        &self,
        chain_id: ChainId,
        identifier: &str,
    ) -> Result<Token, SwapError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(self.unknown(identifier, chain_id));
        }

        if self.registry.is_native_symbol(identifier, chain_id)
            && let Some(native) = self.registry.lookup_native(chain_id)
        {
            return Ok(native.clone());
        }

        match self.routing.find_token(identifier, chain_id).await {
            Ok(Some(token)) => return Ok(token),
            Ok(None) => {}
            // 目录不可达时降级到本地注册表，不让解析整体失败
            Err(err) => {
                tracing::warn!(%identifier, chain_id, error = %err, "引擎目录地址查找失败，降级到符号表");
            }
        }

        if let Some(token) = self.registry.lookup_regional(identifier, chain_id) {
            return Ok(token.clone());
        }

        match self.routing.tokens().await {
            Ok(tokens) => {
                if let Some(token) = tokens
                    .into_iter()
                    .find(|t| t.chain_id == chain_id && t.symbol_matches(identifier))
                {
                    return Ok(token);
                }
            }
            Err(err) => {
                tracing::warn!(%identifier, chain_id, error = %err, "引擎目录符号查找失败");
            }
        }

        Err(self.unknown(identifier, chain_id))
    }

    fn unknown(&self, identifier: &str, chain_id: ChainId) -> SwapError {
        SwapError::UnknownToken {
            identifier: identifier.to_string(),
            chain_id,
            example: self.registry.example_token(chain_id),
        }
    }
}
