use crate::common::Lookback;
use crate::screen::entity::{ScreenRequest, Thresholds};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub screen: ScreenConfig,
    pub feed: FeedConfig,
    pub log: LogConfig,
}

/// 筛选参数默认值，命令行参数可逐项覆盖
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub capital: Decimal,
    pub min_deviation_pct: f64,
    pub min_volume_ratio: f64,
    pub max_volatility_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    // 筛选时回溯的自然日数
    pub screen_lookback_days: u32,
    // 详情视图回溯的月数
    pub history_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    // 设置后额外按天滚动写入该目录
    pub dir: Option<String>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        let request = ScreenRequest::default();
        Self {
            capital: request.capital,
            min_deviation_pct: request.thresholds.min_deviation_pct,
            min_volume_ratio: request.thresholds.min_volume_ratio,
            max_volatility_pct: request.thresholds.max_volatility_pct,
        }
    }
}

impl ScreenConfig {
    /// 转换为一次筛选请求
    pub fn to_request(&self) -> ScreenRequest {
        ScreenRequest {
            capital: self.capital,
            thresholds: Thresholds {
                min_deviation_pct: self.min_deviation_pct,
                min_volume_ratio: self.min_volume_ratio,
                max_volatility_pct: self.max_volatility_pct,
            },
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
            screen_lookback_days: 30,
            history_months: 6,
        }
    }
}

impl FeedConfig {
    pub fn screen_lookback(&self) -> Lookback {
        Lookback::Days(self.screen_lookback_days)
    }

    pub fn history_lookback(&self) -> Lookback {
        Lookback::Months(self.history_months)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}
