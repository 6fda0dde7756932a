use crate::filter::passes_filter;
use crate::metrics::compute_metrics;
use crate::rank::{rank, size_positions, top_picks};
use crate::universe::nifty50;
use async_trait::async_trait;
use dipscan_core::common::time::{RealTimeProvider, TimeProvider};
use dipscan_core::common::{Lookback, Stock};
use dipscan_core::market::entity::Candle;
use dipscan_core::market::error::MarketError;
use dipscan_core::market::port::MarketDataProvider;
use dipscan_core::screen::entity::{Metrics, ScreenReport, ScreenRequest};
use dipscan_core::screen::port::ScreeningEngine;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// # Summary
/// 筛选引擎的默认实现。
///
/// # Invariants
/// - 标的按 `universe` 顺序逐个抓取并计算，前一个完成才开始下一个。
/// - 单个标的的失败只记录日志，不影响其他标的，也不出现在报告里。
pub struct ScreeningService {
    provider: Arc<dyn MarketDataProvider>,
    clock: Arc<dyn TimeProvider>,
    universe: Vec<Stock>,
    lookback: Lookback,
}

impl ScreeningService {
    /// # Summary
    /// 以 NIFTY 50 标的池和 30 日回溯窗口创建引擎。
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            clock: Arc::new(RealTimeProvider),
            universe: nifty50(),
            lookback: Lookback::Days(30),
        }
    }

    /// 替换时钟，用于固定回溯窗口
    pub fn with_clock(mut self, clock: Arc<dyn TimeProvider>) -> Self {
        self.clock = clock;
        self
    }

    /// 替换标的池
    pub fn with_universe(mut self, universe: Vec<Stock>) -> Self {
        self.universe = universe;
        self
    }

    /// 替换筛选使用的回溯窗口
    pub fn with_lookback(mut self, lookback: Lookback) -> Self {
        self.lookback = lookback;
        self
    }

    /// # Summary
    /// 抓取单个标的并计算指标。
    ///
    /// # Logic
    /// 1. 抓取失败记 warn 并返回 None。
    /// 2. 数据不足或数值异常记 debug 并返回 None。
    async fn evaluate(&self, stock: &Stock) -> Option<Metrics> {
        let end = self.clock.now();
        let history = match self.provider.fetch_daily(stock, self.lookback, end).await {
            Ok(history) => history,
            Err(e) => {
                warn!(symbol = %stock, error = %e, "skipping symbol: fetch failed");
                return None;
            }
        };

        let metrics = compute_metrics(stock, &history);
        if metrics.is_none() {
            debug!(symbol = %stock, candles = history.len(), "skipping symbol: unusable history");
        }
        metrics
    }
}

#[async_trait]
impl ScreeningEngine for ScreeningService {
    /// # Summary
    /// 对整个标的池执行一次筛选。
    ///
    /// # Logic
    /// 1. 逐个标的计算指标，保留通过阈值的候选。
    /// 2. 按偏离度升序排列。
    /// 3. 取前 5 个按资金的 20% 分配仓位。
    async fn run(&self, request: &ScreenRequest) -> ScreenReport {
        let mut candidates = Vec::new();
        let mut evaluated = 0usize;

        for stock in &self.universe {
            let Some(metrics) = self.evaluate(stock).await else {
                continue;
            };
            evaluated += 1;
            if passes_filter(&metrics, &request.thresholds) {
                debug!(symbol = %stock, deviation = metrics.deviation_pct, "candidate accepted");
                candidates.push(metrics);
            }
        }

        let candidates = rank(candidates);
        let picks = size_positions(top_picks(&candidates), request.capital);

        info!(
            universe = self.universe.len(),
            evaluated,
            candidates = candidates.len(),
            picks = picks.len(),
            "screening run finished"
        );

        ScreenReport {
            capital: request.capital,
            candidates,
            picks,
        }
    }

    async fn history(&self, stock: &Stock, lookback: Lookback) -> Result<Vec<Candle>, MarketError> {
        let candles = self
            .provider
            .fetch_daily(stock, lookback, self.clock.now())
            .await?;
        if candles.is_empty() {
            return Err(MarketError::NotFound(stock.symbol.clone()));
        }
        Ok(candles)
    }

    fn universe(&self) -> &[Stock] {
        &self.universe
    }
}
