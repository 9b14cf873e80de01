use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bento_core::swap::entity::{FeeItem, RouteLeg, SwapParams, SwapResult};
use bento_core::swap::port::{RoutingEngine, RoutingEngineFactory, RoutingError};
use bento_core::token::entity::{ChainId, Token, TokenAmount};

/// # Summary
/// Symbiosis 路由引擎 HTTP 实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，固定 10 秒超时。
/// - `client_id` 为空串时请求不携带客户端身份，引擎按不受限上下文处理。
#[derive(Clone)]
pub struct SymbiosisClient {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 引擎 API 根地址 (不含尾部斜杠)
    base_url: String,
    /// 客户端身份标识，参与引擎侧的聚合器范围判定
    client_id: String,
}

impl SymbiosisClient {
    /// # Summary
    /// 创建一个新的 SymbiosisClient 实例。
    ///
    /// # Logic
    /// 1. 配置 10 秒超时。
    /// 2. 归一化根地址 (去除尾部斜杠)。
    ///
    /// # Arguments
    /// * `base_url`: 引擎 API 根地址。
    /// * `client_id`: 客户端身份，空串 = 中性身份。
    ///
    /// # Returns
    /// 返回初始化后的 SymbiosisClient。
    pub fn new(base_url: &str, client_id: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
        }
    }
}

// ============================================================
//  Wire 结构
// ============================================================

/// Symbiosis 目录中的代币条目
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct WireToken {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    decimals: u8,
    chain_id: ChainId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    is_native: Option<bool>,
    /// 引擎在中转链上铸造的合成代币标记
    #[serde(default)]
    synthetic: Option<bool>,
}

impl WireToken {
    /// 目录条目 → 规范 Token。空地址条目按原生资产处理。
    fn into_token(self) -> Token {
        let address = self.address.unwrap_or_default();
        let is_native = self.is_native.unwrap_or(false) || address.is_empty();
        Token {
            chain_id: self.chain_id,
            address,
            symbol: self.symbol.unwrap_or_default(),
            decimals: self.decimals,
            name: self.name.unwrap_or_default(),
            icon: self.icon,
            is_native,
            is_synthetic: self.synthetic.unwrap_or(false),
        }
    }
}

/// 兑换请求里的代币引用
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct WireTokenRef<'a> {
    chain_id: ChainId,
    /// 空串 = 原生资产 (与目录侧哨兵约定一致)
    address: &'a str,
    symbol: &'a str,
    decimals: u8,
}

impl<'a> From<&'a Token> for WireTokenRef<'a> {
    fn from(token: &'a Token) -> Self {
        Self {
            chain_id: token.chain_id,
            address: &token.address,
            symbol: &token.symbol,
            decimals: token.decimals,
        }
    }
}

/// 兑换请求里带金额的代币引用
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct WireAmountIn<'a> {
    #[serde(flatten)]
    token: WireTokenRef<'a>,
    /// 原始整数金额的十进制字符串
    amount: String,
}

/// POST v1/swap 的请求体
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SwapRequestBody<'a> {
    token_amount_in: WireAmountIn<'a>,
    token_out: WireTokenRef<'a>,
    from: &'a str,
    to: &'a str,
    /// 滑点 (基点)
    slippage: u32,
    /// 过期时刻 (epoch 秒)
    deadline: i64,
    select_mode: &'a str,
    /// 跨链失败时的退款地址，本系统不管理退款，固定空串
    refund_address: &'a str,
    client_id: &'a str,
}

/// 响应中带金额的代币
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct WireAmountOut {
    #[serde(flatten)]
    token: WireToken,
    amount: String,
}

impl WireAmountOut {
    fn into_amount(self) -> Result<TokenAmount, RoutingError> {
        let token = self.token.into_token();
        TokenAmount::from_raw_str(token, &self.amount)
            .map_err(|e| RoutingError::Parse(e.to_string()))
    }
}

/// 响应中的单段路由
#[derive(Deserialize, Debug)]
struct WireRoute {
    provider: String,
    #[serde(default)]
    tokens: Vec<WireToken>,
}

/// 响应中的单项手续费
#[derive(Deserialize, Debug)]
struct WireFee {
    provider: String,
    value: WireAmountOut,
}

/// POST v1/swap 的成功响应
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SwapResponseBody {
    token_amount_out: WireAmountOut,
    token_amount_out_min: WireAmountOut,
    #[serde(default)]
    price_impact: Option<String>,
    #[serde(default)]
    routes: Vec<WireRoute>,
    #[serde(default)]
    fees: Vec<WireFee>,
    /// 待钱包签名的交易载荷，形状由目标链决定，原样透传
    tx: serde_json::Value,
    #[serde(default)]
    approve_to: Option<String>,
    #[serde(rename = "type", default)]
    transaction_type: Option<String>,
    #[serde(default)]
    estimated_time: Option<u64>,
}

/// 引擎错误响应的松散形状
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
struct WireErrorBody {
    code: Option<i64>,
    message: Option<String>,
    reason: Option<String>,
    wallet: Option<String>,
    network_url: Option<String>,
}

/// # Summary
/// 引擎错误体 → 封闭的 `RoutingError` 分类。
///
/// # Logic
/// 1. 尽力解析 JSON 错误体，解析不了就用原始文本。
/// 2. 按消息子串匹配已知形态 (资金不足 / gas 预估失败 / 金额低于手续费 /
///    聚合器失败)，大小写不敏感。
/// 3. 未识别的形态落入 Unknown，携带 HTTP 状态码与原始消息。
fn decode_error(status: reqwest::StatusCode, body: &str) -> RoutingError {
    let wire: WireErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = wire
        .message
        .or(wire.reason)
        .unwrap_or_else(|| body.trim().to_string());
    let haystack = message.to_lowercase();

    if haystack.contains("insufficient funds") {
        return RoutingError::InsufficientFunds {
            wallet: wire.wallet.unwrap_or_default(),
            network_url: wire.network_url.unwrap_or_default(),
            reason: message,
        };
    }
    if haystack.contains("unpredictable gas limit")
        || haystack.contains("unpredictable_gas_limit")
    {
        return RoutingError::UnpredictableGasLimit(message);
    }
    if haystack.contains("less than fee") {
        return RoutingError::AmountLessThanFee(message);
    }
    if haystack.contains("aggregator")
        || haystack.contains("route not found")
        || haystack.contains("cannot build route")
        || haystack.contains("no transit token")
    {
        return RoutingError::Aggregator(message);
    }

    match wire.code {
        Some(code) => RoutingError::Unknown(format!("HTTP {status} code {code}: {message}")),
        None => RoutingError::Unknown(format!("HTTP {status}: {message}")),
    }
}

// ============================================================
//  RoutingEngine 实现
// ============================================================

#[async_trait]
impl RoutingEngine for SymbiosisClient {
    /// # Summary
    /// 按地址在引擎全量目录中精确查找代币 (地址大小写不敏感)。
    async fn find_token(
        &self,
        address: &str,
        chain_id: ChainId,
    ) -> Result<Option<Token>, RoutingError> {
        let tokens = self.tokens().await?;
        Ok(tokens
            .into_iter()
            .find(|t| t.chain_id == chain_id && t.address.eq_ignore_ascii_case(address)))
    }

    /// # Summary
    /// 拉取引擎的全量代币目录。
    ///
    /// # Logic
    /// 1. GET `{base_url}/v1/tokens`。
    /// 2. 非 2xx 进入错误解码。
    /// 3. 目录条目逐个归一为规范 Token。
    async fn tokens(&self) -> Result<Vec<Token>, RoutingError> {
        let url = format!("{}/v1/tokens", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RoutingError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(decode_error(status, &body));
        }

        let wire: Vec<WireToken> = resp
            .json()
            .await
            .map_err(|e| RoutingError::Parse(e.to_string()))?;

        Ok(wire.into_iter().map(WireToken::into_token).collect())
    }

    /// # Summary
    /// 计算一次兑换：报价、路径与待签名的交易载荷。
    ///
    /// # Logic
    /// 1. 参数集装配为 POST `{base_url}/v1/swap` 的请求体。
    /// 2. 非 2xx 响应进入错误解码，绝不让原始错误对象穿透边界。
    /// 3. 成功响应中的金额以原始整数字符串解析，价格影响解析失败时取 0。
    async fn compute_swap(&self, params: &SwapParams) -> Result<SwapResult, RoutingError> {
        let url = format!("{}/v1/swap", self.base_url);
        let body = SwapRequestBody {
            token_amount_in: WireAmountIn {
                token: WireTokenRef::from(&params.token_amount_in.token),
                amount: params.token_amount_in.raw_string(),
            },
            token_out: WireTokenRef::from(&params.token_out),
            from: &params.from,
            to: &params.to,
            slippage: params.slippage_bps,
            deadline: params.deadline_epoch_seconds,
            select_mode: params.select_mode.as_str(),
            refund_address: "",
            client_id: &self.client_id,
        };

        tracing::debug!(
            url = %url,
            from_chain = params.token_amount_in.token.chain_id,
            to_chain = params.token_out.chain_id,
            mode = %params.select_mode,
            "请求引擎计算兑换"
        );

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RoutingError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(decode_error(status, &body));
        }

        let wire: SwapResponseBody = resp
            .json()
            .await
            .map_err(|e| RoutingError::Parse(e.to_string()))?;

        let price_impact = wire
            .price_impact
            .as_deref()
            .and_then(|s| Decimal::from_str(s).ok())
            .unwrap_or(Decimal::ZERO);

        let routes = wire
            .routes
            .into_iter()
            .map(|leg| RouteLeg {
                provider: leg.provider,
                tokens: leg.tokens.into_iter().map(WireToken::into_token).collect(),
            })
            .collect();

        let mut fees = Vec::new();
        for fee in wire.fees {
            fees.push(FeeItem {
                provider: fee.provider,
                value: fee.value.into_amount()?,
            });
        }

        Ok(SwapResult {
            token_amount_out: wire.token_amount_out.into_amount()?,
            token_amount_out_min: wire.token_amount_out_min.into_amount()?,
            price_impact,
            routes,
            fees,
            transaction_request: wire.tx,
            approve_to: wire.approve_to.unwrap_or_default(),
            transaction_type: wire.transaction_type.unwrap_or_else(|| "evm".to_string()),
            estimated_time: wire.estimated_time,
        })
    }
}

// ============================================================
//  工厂
// ============================================================

/// # Summary
/// Symbiosis 上下文工厂。执行引擎的强制回退层通过它以空身份
/// 构造不受客户端范围限制的全新上下文。
pub struct SymbiosisConnector {
    base_url: String,
}

impl SymbiosisConnector {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl RoutingEngineFactory for SymbiosisConnector {
    fn connect(&self, client_id: &str) -> Arc<dyn RoutingEngine> {
        Arc::new(SymbiosisClient::new(&self.base_url, client_id))
    }
}
