use dipscan_core::common::Stock;
use dipscan_core::market::entity::Candle;
use dipscan_core::screen::entity::Metrics;

/// 均线窗口 (根)
pub const MA_WINDOW: usize = 20;
/// 平均成交量窗口 (根)
pub const VOLUME_WINDOW: usize = 10;
/// 年化使用的交易日数
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// # Summary
/// 由日线历史计算单个标的的筛选指标。
///
/// # Logic
/// 1. 历史不足 `MA_WINDOW` 根时视为数据不足，返回 None。
/// 2. price 取最新收盘价，ma20 取最近 20 根收盘均值。
/// 3. 量比 = 最新成交量 / 最近 10 根平均成交量；均量为 0 时量比为 0。
/// 4. 波动率 = 整段历史日收益率的样本标准差 × √252 × 100。
/// 5. 任一结果不是有限值 (例如均线为 0) 时返回 None。
///
/// # Arguments
/// * `stock`: 证券身份。
/// * `history`: 按时间升序的日线。
///
/// # Returns
/// 指标记录，或 None 表示该标的不可用。
pub fn compute_metrics(stock: &Stock, history: &[Candle]) -> Option<Metrics> {
    if history.len() < MA_WINDOW {
        return None;
    }
    let latest = history.last()?;

    let price = latest.close;
    let ma20 = mean(history.iter().rev().take(MA_WINDOW).map(|c| c.close))?;
    let deviation_pct = (price - ma20) / ma20 * 100.0;

    let volume_avg = mean(history.iter().rev().take(VOLUME_WINDOW).map(|c| c.volume))?;
    let volume_ratio = if volume_avg == 0.0 {
        0.0
    } else {
        latest.volume / volume_avg
    };

    let returns: Vec<f64> = daily_returns(history).collect();
    let volatility_pct = sample_std(&returns)? * TRADING_DAYS_PER_YEAR.sqrt() * 100.0;

    let all_finite = [price, ma20, deviation_pct, volume_ratio, volatility_pct]
        .iter()
        .all(|v| v.is_finite());

    all_finite.then(|| Metrics {
        stock: stock.clone(),
        price,
        ma20,
        deviation_pct,
        volume_ratio,
        volatility_pct,
    })
}

/// 相邻收盘价的百分比变化
fn daily_returns(history: &[Candle]) -> impl Iterator<Item = f64> + '_ {
    history
        .windows(2)
        .map(|w| (w[1].close - w[0].close) / w[0].close)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0.0), |(sum, count), v| (sum + v, count + 1.0));
    (count > 0.0).then(|| sum / count)
}

/// 样本标准差 (分母 n - 1)，少于两个样本时无定义
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values.iter().copied())?;
    let (sq_sum, count) = values
        .iter()
        .fold((0.0, 0.0), |(acc, n), v| (acc + (v - avg).powi(2), n + 1.0));
    Some((sq_sum / (count - 1.0)).sqrt())
}
