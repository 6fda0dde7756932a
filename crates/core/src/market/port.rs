use crate::common::{Lookback, Stock, TimeFrame};
use crate::market::entity::Candle;
use crate::market::error::MarketError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// # Summary
/// 市场行情数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 返回的 K 线必须按时间升序排列。
/// - 实现者不做重试，失败直接以 `MarketError` 返回。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 获取特定证券在指定时间范围内的 K 线数据。
    ///
    /// # Logic
    /// 1. 构建数据源请求。
    /// 2. 执行网络请求并解析响应数据。
    ///
    /// # Arguments
    /// * `stock`: 证券身份。
    /// * `timeframe`: K 线周期。
    /// * `start`: 开始时间。
    /// * `end`: 结束时间。
    ///
    /// # Returns
    /// 成功返回 K 线列表。
    async fn fetch_candles(
        &self,
        stock: &Stock,
        timeframe: TimeFrame,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, MarketError>;

    /// # Summary
    /// 按回溯窗口抓取截至 `end` 的日线数据。
    ///
    /// # Logic
    /// 1. 由 `lookback` 推算窗口起点。
    /// 2. 委托 `fetch_candles` 获取日线。
    async fn fetch_daily(
        &self,
        stock: &Stock,
        lookback: Lookback,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, MarketError> {
        self.fetch_candles(stock, TimeFrame::Day1, lookback.start_from(end), end)
            .await
    }
}
