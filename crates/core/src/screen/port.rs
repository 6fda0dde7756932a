use crate::common::{Lookback, Stock};
use crate::market::entity::Candle;
use crate::market::error::MarketError;
use crate::screen::entity::{ScreenReport, ScreenRequest};
use async_trait::async_trait;
use std::io::Write;

/// # Summary
/// 筛选引擎契约。
///
/// # Invariants
/// - `run` 永不失败：单个标的的任何错误都只会让它从候选中消失。
/// - 标的按固定顺序逐个处理，前一个完成后才开始下一个。
#[async_trait]
pub trait ScreeningEngine: Send + Sync {
    /// # Summary
    /// 对整个标的池执行一次筛选。
    ///
    /// # Arguments
    /// * `request`: 资金与阈值。
    ///
    /// # Returns
    /// 候选列表与分配好仓位的推荐列表。
    async fn run(&self, request: &ScreenRequest) -> ScreenReport;

    /// # Summary
    /// 获取单个标的较长周期的日线，用于详情视图。
    async fn history(&self, stock: &Stock, lookback: Lookback) -> Result<Vec<Candle>, MarketError>;

    /// 当前标的池
    fn universe(&self) -> &[Stock];
}

/// # Summary
/// 展示层契约，负责把筛选结果输出给用户。
pub trait ScreenPresenter: Send + Sync {
    /// # Summary
    /// 渲染筛选结果。
    ///
    /// # Logic
    /// 1. 输出推荐数量与资金标题。
    /// 2. 有推荐时输出表格，否则输出"无匹配"提示。
    /// 3. 输出通过规则的候选数量。
    fn present_report(&self, report: &ScreenReport, out: &mut dyn Write) -> std::io::Result<()>;

    /// 渲染单个标的的历史日线
    fn present_history(
        &self,
        stock: &Stock,
        candles: &[Candle],
        out: &mut dyn Write,
    ) -> std::io::Result<()>;
}
