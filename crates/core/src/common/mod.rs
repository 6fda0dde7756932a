use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod time;

/// NSE 代码后缀，展示时去除
pub const NSE_SUFFIX: &str = ".NS";

/// # Summary
/// 证券标的实体，代表筛选范围内的某一只股票。
///
/// # Invariants
/// - `symbol` 必须是 Yahoo 可识别的交易代码 (例如 `RELIANCE.NS`)。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stock {
    // 股票代码 (例如: TCS.NS)
    pub symbol: String,
    // 交易所代码 (可选，例如: NSE)
    pub exchange: Option<String>,
}

impl Stock {
    /// # Summary
    /// 以 NSE 交易所身份创建证券实体。
    pub fn nse(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            exchange: Some("NSE".to_string()),
        }
    }

    /// # Summary
    /// 用于展示的简称。
    ///
    /// # Logic
    /// 1. 去除 `.NS` 后缀，其余部分原样返回。
    ///
    /// # Returns
    /// 例如 `RELIANCE.NS` 返回 `RELIANCE`。
    pub fn display_name(&self) -> &str {
        self.symbol
            .strip_suffix(NSE_SUFFIX)
            .unwrap_or(self.symbol.as_str())
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// # Summary
/// 交易时间周期枚举，定义 K 线的时间跨度。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    // 1日
    Day1,
}

impl std::fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeFrame::Day1 => write!(f, "1d"),
        }
    }
}

/// # Summary
/// 回溯窗口，描述从当前时刻向前抓取多长的历史。
///
/// # Invariants
/// - 按自然日/自然月计算，而非交易日。30 个自然日通常只包含 20 余根日线。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lookback {
    Days(u32),
    Months(u32),
}

impl Lookback {
    /// # Summary
    /// 计算窗口起点。
    ///
    /// # Arguments
    /// * `end`: 窗口终点 (通常为当前时间)。
    ///
    /// # Returns
    /// 窗口起始时间；超出日期范围时退化为 `end`。
    pub fn start_from(&self, end: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Lookback::Days(days) => end
                .checked_sub_signed(chrono::Duration::days(i64::from(days)))
                .unwrap_or(end),
            Lookback::Months(months) => end.checked_sub_months(Months::new(months)).unwrap_or(end),
        }
    }
}

impl FromStr for Lookback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (digits, unit) = s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len()));
        let n: u32 = digits
            .parse()
            .map_err(|_| format!("Invalid lookback: {}", s))?;
        match unit {
            "d" => Ok(Lookback::Days(n)),
            "mo" => Ok(Lookback::Months(n)),
            _ => Err(format!("Invalid lookback: {}", s)),
        }
    }
}

impl std::fmt::Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookback::Days(n) => write!(f, "{}d", n),
            Lookback::Months(n) => write!(f, "{}mo", n),
        }
    }
}
