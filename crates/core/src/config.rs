use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 外部路由引擎相关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// 引擎 REST 端点
    pub base_url: String,
    /// 主上下文的客户端身份；空串 = 不受限
    pub client_id: String,
    /// 第一层重试的最大轮数
    pub max_rounds: u32,
    /// 轮间等待 (毫秒)
    pub round_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            routing: RoutingConfig {
                base_url: "https://api.symbiosis.finance/crosschain".to_string(),
                client_id: "api-swap-bridge".to_string(),
                max_rounds: 3,
                round_delay_ms: 2000,
            },
        }
    }
}
