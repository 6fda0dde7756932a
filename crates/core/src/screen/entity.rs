use crate::common::Stock;
use crate::screen::error::ScreenError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 进入推荐列表的候选数量上限
pub const TOP_PICKS: usize = 5;

/// 每个推荐标的独立分配的资金比例 (20%)
pub const POSITION_FRACTION: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// 可投入资金下限 (INR)
pub const CAPITAL_MIN: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);
/// 可投入资金上限 (INR)
pub const CAPITAL_MAX: Decimal = Decimal::from_parts(5_000_000, 0, 0, false, 0);

/// 偏离度阈值允许范围 (%)
pub const DEVIATION_RANGE: (f64, f64) = (-20.0, 0.0);
/// 量比阈值允许范围
pub const VOLUME_RATIO_RANGE: (f64, f64) = (0.5, 2.0);
/// 波动率阈值允许范围 (%)
pub const VOLATILITY_RANGE: (f64, f64) = (20.0, 80.0);

/// # Summary
/// 单个标的在一次筛选中计算出的指标快照。
///
/// # Invariants
/// - 所有数值字段均为有限值；无法得到有限值的标的不会产生该记录。
/// - `price < ma20` 当且仅当 `deviation_pct < 0`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub stock: Stock,
    // 最新收盘价
    pub price: f64,
    // 最近 20 根收盘价均值
    pub ma20: f64,
    // (price - ma20) / ma20 * 100
    pub deviation_pct: f64,
    // 最新成交量 / 最近 10 根平均成交量
    pub volume_ratio: f64,
    // 年化波动率 (%)
    pub volatility_pct: f64,
}

/// # Summary
/// 筛选阈值。四个条件是合取关系，见 `dipscan_screener::filter`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    // 偏离度必须严格大于该值 (负数，限制回调深度)
    pub min_deviation_pct: f64,
    // 量比必须严格大于该值
    pub min_volume_ratio: f64,
    // 年化波动率必须严格小于该值
    pub max_volatility_pct: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_deviation_pct: -10.0,
            min_volume_ratio: 0.8,
            max_volatility_pct: 50.0,
        }
    }
}

/// # Summary
/// 已分配仓位的推荐标的。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub metrics: Metrics,
    // floor(预算 / 价格)
    pub quantity: u64,
    // quantity * price
    pub amount: Decimal,
}

/// # Summary
/// 一次筛选的输入参数。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRequest {
    // 可投入资金 (INR)
    pub capital: Decimal,
    pub thresholds: Thresholds,
}

impl Default for ScreenRequest {
    fn default() -> Self {
        Self {
            capital: Decimal::from(100_000),
            thresholds: Thresholds::default(),
        }
    }
}

impl ScreenRequest {
    /// # Summary
    /// 校验参数是否落在允许范围内 (闭区间)。
    ///
    /// # Logic
    /// 1. 检查资金上下限。
    /// 2. 依次检查偏离度、量比、波动率阈值；NaN 视为越界。
    ///
    /// # Returns
    /// 全部合法返回 `Ok(())`，否则返回第一个越界项。
    pub fn validate(&self) -> Result<(), ScreenError> {
        if self.capital < CAPITAL_MIN || self.capital > CAPITAL_MAX {
            return Err(ScreenError::CapitalOutOfRange {
                value: self.capital,
                min: CAPITAL_MIN,
                max: CAPITAL_MAX,
            });
        }

        let t = &self.thresholds;
        check_range("min_deviation_pct", t.min_deviation_pct, DEVIATION_RANGE)?;
        check_range("min_volume_ratio", t.min_volume_ratio, VOLUME_RATIO_RANGE)?;
        check_range("max_volatility_pct", t.max_volatility_pct, VOLATILITY_RANGE)?;
        Ok(())
    }
}

fn check_range(name: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), ScreenError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ScreenError::ThresholdOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// # Summary
/// 一次筛选的完整结果，交给展示层渲染。
///
/// # Invariants
/// - `candidates` 按偏离度升序排列。
/// - `picks` 是 `candidates` 的前 `TOP_PICKS` 个，顺序一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenReport {
    pub capital: Decimal,
    pub candidates: Vec<Metrics>,
    pub picks: Vec<Pick>,
}

impl ScreenReport {
    /// 没有任何标的通过筛选
    pub fn is_no_match(&self) -> bool {
        self.candidates.is_empty()
    }

    /// 所有推荐仓位金额之和，可能超过 `capital`
    pub fn total_amount(&self) -> Decimal {
        self.picks.iter().map(|p| p.amount).sum()
    }
}
