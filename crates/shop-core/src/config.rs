//! 引擎配置

use serde::{Deserialize, Serialize};

use crate::{Result, ShopError};

/// 讀取比對策略的環境變數
pub const MATCH_POLICY_ENV: &str = "SHOP_MATCH_POLICY";

/// 懸空參照（找不到的產品或原料）的處理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// 記錄警告並略過（預設）
    #[default]
    WarnAndSkip,
    /// 整個操作失敗，資料不變
    Strict,
}

impl std::str::FromStr for MatchPolicy {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" | "warn_and_skip" | "skip" => Ok(MatchPolicy::WarnAndSkip),
            "strict" => Ok(MatchPolicy::Strict),
            other => Err(ShopError::InvalidConfig(format!("未知的比對策略: {}", other))),
        }
    }
}

/// 對帳引擎配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// 懸空參照的處理策略
    pub match_policy: MatchPolicy,
}

impl EngineConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置比對策略
    ///
    /// # 範例
    /// ```
    /// # use shop_core::{EngineConfig, MatchPolicy};
    /// let config = EngineConfig::new().with_match_policy(MatchPolicy::Strict);
    /// assert!(config.is_strict());
    /// ```
    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// 從 JSON 字串載入
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ShopError::InvalidConfig(e.to_string()))
    }

    /// 從環境變數載入，未設置時使用預設值
    pub fn from_env() -> Result<Self> {
        match std::env::var(MATCH_POLICY_ENV) {
            Ok(value) => Ok(Self::new().with_match_policy(value.parse()?)),
            Err(_) => Ok(Self::default()),
        }
    }

    /// 是否為嚴格模式
    pub fn is_strict(&self) -> bool {
        self.match_policy == MatchPolicy::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::new();
        assert_eq!(config.match_policy, MatchPolicy::WarnAndSkip);
        assert!(!config.is_strict());
    }

    #[rstest]
    #[case("strict", MatchPolicy::Strict)]
    #[case(" STRICT ", MatchPolicy::Strict)]
    #[case("warn", MatchPolicy::WarnAndSkip)]
    #[case("warn_and_skip", MatchPolicy::WarnAndSkip)]
    fn test_parse_policy(#[case] text: &str, #[case] expected: MatchPolicy) {
        assert_eq!(text.parse::<MatchPolicy>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_policy() {
        assert!(matches!("lenient".parse::<MatchPolicy>(), Err(ShopError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json() {
        let config = EngineConfig::from_json_str(r#"{"matchPolicy": "strict"}"#).unwrap();
        assert!(config.is_strict());

        let config = EngineConfig::from_json_str("{}").unwrap();
        assert!(!config.is_strict());
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(MATCH_POLICY_ENV, "Strict");
        assert!(EngineConfig::from_env().unwrap().is_strict());

        std::env::set_var(MATCH_POLICY_ENV, "bogus");
        assert!(matches!(EngineConfig::from_env(), Err(ShopError::InvalidConfig(_))));

        std::env::remove_var(MATCH_POLICY_ENV);
        assert_eq!(EngineConfig::from_env().unwrap(), EngineConfig::default());
    }
}
