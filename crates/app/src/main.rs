use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use dipscan_core::common::{Lookback, Stock};
use dipscan_core::screen::port::{ScreenPresenter, ScreeningEngine};
use dipscan_feed::yahoo::YahooProvider;
use dipscan_screener::service::ScreeningService;
use dipscan_screener::universe;
use tracing::info;

mod cli;
mod logging;
mod render;
mod settings;

use cli::{Cli, Command, ScreenArgs};
use render::{JsonPresenter, TablePresenter};

fn presenter(json: bool, show_candidates: bool) -> Box<dyn ScreenPresenter> {
    if json {
        Box::new(JsonPresenter)
    } else {
        Box::new(TablePresenter { show_candidates })
    }
}

/// # Summary
/// 应用启动入口，负责组装各层实现。
///
/// # Logic
/// 1. 解析命令行并加载配置。
/// 2. 初始化全局日志。
/// 3. 实例化行情源 (Yahoo) 与筛选引擎。
/// 4. 按子命令执行筛选、历史查询或列出标的池。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = settings::load(cli.config.as_deref())?;
    let _log_guard = logging::init(&config.log);
    info!("dipscan starting...");

    let feed = Arc::new(YahooProvider::with_config(&config.feed)?);
    let engine = ScreeningService::new(feed).with_lookback(config.feed.screen_lookback());

    match cli.command.unwrap_or_else(|| Command::Screen(ScreenArgs::default())) {
        Command::Screen(args) => {
            let request = args.apply(&config.screen).to_request();
            request.validate()?;
            info!(capital = %request.capital, thresholds = ?request.thresholds, "Analyzing NIFTY 50...");

            let report = engine.run(&request).await;
            presenter(args.json, args.all).present_report(&report, &mut std::io::stdout().lock())?;
        }
        Command::History {
            symbol,
            months,
            json,
        } => {
            let stock = universe::lookup(&symbol).unwrap_or_else(|| Stock::nse(&symbol.to_uppercase()));
            let lookback = months
                .map(Lookback::Months)
                .unwrap_or_else(|| config.feed.history_lookback());

            let candles = engine.history(&stock, lookback).await?;
            presenter(json, false).present_history(&stock, &candles, &mut std::io::stdout().lock())?;
        }
        Command::Universe => {
            let mut out = std::io::stdout().lock();
            for stock in engine.universe() {
                writeln!(out, "{:<12} {}", stock.display_name(), stock.symbol)?;
            }
        }
    }

    Ok(())
}
