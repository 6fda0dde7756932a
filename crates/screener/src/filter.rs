use dipscan_core::screen::entity::{Metrics, Thresholds};

/// # Summary
/// 判断指标是否满足"回调买入"条件。
///
/// # Logic
/// 四个条件全部成立才通过：
/// 1. 价格低于 20 日均线；
/// 2. 偏离度严格大于 `min_deviation_pct` (回调不能过深)；
/// 3. 量比严格大于 `min_volume_ratio`；
/// 4. 年化波动率严格小于 `max_volatility_pct`。
pub fn passes_filter(metrics: &Metrics, thresholds: &Thresholds) -> bool {
    metrics.price < metrics.ma20
        && metrics.deviation_pct > thresholds.min_deviation_pct
        && metrics.volume_ratio > thresholds.min_volume_ratio
        && metrics.volatility_pct < thresholds.max_volatility_pct
}
