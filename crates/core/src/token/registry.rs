use super::entity::{ChainId, Token};

/// BRZ 在 CoinGecko 上的图标，注册表与目录列表共用
const BRZ_ICON: &str =
    "https://assets.coingecko.com/coins/images/8472/standard/MicrosoftTeams-image_%286%29.png";

/// 对外公布的受支持链列表 (名称, chainId)
pub const SUPPORTED_CHAINS: &[(&str, ChainId)] = &[
    ("ETHEREUM", 1),
    ("POLYGON", 137),
    ("TON", 85918),
    ("ARBITRUM", 42161),
    ("OPTIMISM", 10),
    ("AVALANCHE", 43114),
    ("BASE", 8453),
];

/// chainId → 可读链名，未收录的链返回 "Unknown"
pub fn chain_name(chain_id: ChainId) -> &'static str {
    match chain_id {
        1 => "Ethereum",
        10 => "Optimism",
        56 => "BSC",
        137 => "Polygon",
        8453 => "Base",
        42161 => "Arbitrum",
        43114 => "Avalanche",
        85918 => "TON",
        _ => "Unknown",
    }
}

/// # Summary
/// 静态代币注册表：按链收录区域性稳定币定义与各链的原生资产定义。
/// 纯数据，除查找外无任何行为。
///
/// # Invariants
/// - 所有条目 `symbol` 非空、`decimals` 合理，这是装载期约束，运行期不再检查。
/// - `chains_for` 返回注册表的插入顺序，供 "可用网络" 列表使用。
pub struct TokenRegistry {
    // 符号 → 各链上的定义，外层 Vec 保持插入顺序
    regional: Vec<(String, Vec<Token>)>,
    natives: Vec<Token>,
}

impl TokenRegistry {
    /// # Summary
    /// 构建主网注册表：BRZ (巴西数字代币) 的五条链部署与六条链的原生资产。
    pub fn mainnet() -> Self {
        let brz_name = "Brazilian Digital Token";
        let brz = |chain_id: ChainId, address: &str| {
            let mut token = Token::erc20(chain_id, address, "BRZ", 18, brz_name);
            token.icon = Some(BRZ_ICON.to_string());
            token
        };

        let regional = vec![(
            "BRZ".to_string(),
            vec![
                brz(137, "0x4eD141110F6EeeAbA9A1df36d8c26f684d2475Dc"),
                brz(8453, "0xE9185Ee218cae427aF7B9764A011bb89FeA761B4"),
                brz(43114, "0x05539F021b66Fd01d1FB1ff8E167CdD09bf7c2D0"),
                brz(10, "0xE9185Ee218cae427aF7B9764A011bb89FeA761B4"),
                brz(1, "0x01d33fd36ec67c6ada32cf36b31e88ee190b1839"),
            ],
        )];

        let natives = vec![
            Token::native(1, "ETH", 18, "Ethereum"),
            Token::native(8453, "ETH", 18, "Ethereum"),
            Token::native(137, "MATIC", 18, "Polygon"),
            Token::native(42161, "ETH", 18, "Ethereum"),
            Token::native(10, "ETH", 18, "Ethereum"),
            Token::native(43114, "AVAX", 18, "Avalanche"),
        ];

        Self { regional, natives }
    }

    /// 按符号 (大小写不敏感) 与链查找区域稳定币
    pub fn lookup_regional(&self, symbol: &str, chain_id: ChainId) -> Option<&Token> {
        self.regional
            .iter()
            .find(|(sym, _)| sym.eq_ignore_ascii_case(symbol))
            .and_then(|(_, tokens)| tokens.iter().find(|t| t.chain_id == chain_id))
    }

    /// 符号是否为受支持的区域稳定币
    pub fn is_regional(&self, symbol: &str) -> bool {
        self.regional
            .iter()
            .any(|(sym, _)| sym.eq_ignore_ascii_case(symbol))
    }

    /// 查找链的原生资产
    pub fn lookup_native(&self, chain_id: ChainId) -> Option<&Token> {
        self.natives.iter().find(|t| t.chain_id == chain_id)
    }

    /// 标识符是否 (大小写不敏感) 命中链的原生资产符号
    pub fn is_native_symbol(&self, symbol: &str, chain_id: ChainId) -> bool {
        self.lookup_native(chain_id)
            .is_some_and(|t| t.symbol_matches(symbol))
    }

    /// 区域稳定币可用的链列表，保持注册表插入顺序
    pub fn chains_for(&self, symbol: &str) -> Vec<ChainId> {
        self.regional
            .iter()
            .find(|(sym, _)| sym.eq_ignore_ascii_case(symbol))
            .map(|(_, tokens)| tokens.iter().map(|t| t.chain_id).collect())
            .unwrap_or_default()
    }

    /// # Summary
    /// 面向纠错回复的示例代币：优先取请求链上的 BRZ，否则回退到 Polygon 上的 BRZ。
    /// UnknownToken 错误必须携带此示例，这是可用性契约而非可选项。
    pub fn example_token(&self, chain_id: ChainId) -> Token {
        self.lookup_regional("BRZ", chain_id)
            .or_else(|| self.lookup_regional("BRZ", 137))
            .cloned()
            .unwrap_or_else(|| {
                Token::erc20(
                    137,
                    "0x4eD141110F6EeeAbA9A1df36d8c26f684d2475Dc",
                    "BRZ",
                    18,
                    "Brazilian Digital Token",
                )
            })
    }

    /// 所有区域稳定币符号
    pub fn regional_symbols(&self) -> Vec<&str> {
        self.regional.iter().map(|(sym, _)| sym.as_str()).collect()
    }

    /// 全量区域稳定币数据 (符号 → 各链定义)
    pub fn all_regional(&self) -> &[(String, Vec<Token>)] {
        &self.regional
    }
}
