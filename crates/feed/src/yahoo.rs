use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use dipscan_core::common::{Stock, TimeFrame};
use dipscan_core::config::FeedConfig;
use dipscan_core::market::entity::Candle;
use dipscan_core::market::error::MarketError;
use dipscan_core::market::port::MarketDataProvider;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Once;
use std::time::Duration;
use tracing::debug;

static CRYPTO_PROVIDER: Once = Once::new();

/// # Summary
/// 安装 rustls 使用的 ring 加密后端。
///
/// # Invariants
/// - 进程内只尝试一次；已有其他后端时保留原后端。
fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }
    });
}

/// # Summary
/// Yahoo Finance 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，不做重试。
#[derive(Clone)]
pub struct YahooProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 接口根地址，测试时可指向本地服务
    base_url: String,
}

impl YahooProvider {
    /// # Summary
    /// 以默认配置创建 YahooProvider。
    pub fn new() -> Result<Self, MarketError> {
        Self::with_config(&FeedConfig::default())
    }

    /// # Summary
    /// 按配置创建 YahooProvider。
    ///
    /// # Logic
    /// 1. 安装 TLS 加密后端。
    /// 2. 设置伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    /// 3. 按配置的超时时间初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: 行情源配置。
    ///
    /// # Returns
    /// 客户端构建失败时返回 `MarketError::Network`。
    pub fn with_config(config: &FeedConfig) -> Result<Self, MarketError> {
        install_crypto_provider();

        let mut headers = reqwest::header::HeaderMap::new();
        let user_agent = config
            .user_agent
            .parse()
            .map_err(|e| MarketError::Network(format!("invalid user agent: {e}")))?;
        headers.insert(reqwest::header::USER_AGENT, user_agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| MarketError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// # Summary
/// Yahoo API 响应顶层结构。
///
/// # Invariants
/// - 映射自 Yahoo v8 chart 接口。
#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Deserialize, Debug)]
struct YahooError {
    description: String,
}

/// # Summary
/// Yahoo API 单个时间序列结果。
///
/// # Invariants
/// - 区间内没有成交时 `timestamp` 字段缺失。
#[derive(Deserialize, Debug)]
struct YahooResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Deserialize, Debug)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
    adjclose: Option<Vec<YahooAdjClose>>,
}

#[derive(Deserialize, Debug)]
struct YahooAdjClose {
    adjclose: Vec<Option<f64>>,
}

/// # Summary
/// Yahoo API 原始报价数据，停牌或缺失的位置为 null。
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct YahooQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

/// # Summary
/// 将 TimeFrame 映射为 Yahoo 识别的 interval。
fn interval(timeframe: TimeFrame) -> &'static str {
    match timeframe {
        TimeFrame::Day1 => "1d",
    }
}

/// # Summary
/// 把 chart 响应展开为 K 线序列。
///
/// # Logic
/// 1. 响应中带 error 时返回 `Rejected`。
/// 2. 取第一个 result 与第一组 quote。
/// 3. 逐个时间戳组装 K 线，OHLCV 任一缺失的行直接跳过。
/// 4. 按时间升序返回。
fn into_candles(symbol: &str, response: YahooResponse) -> Result<Vec<Candle>, MarketError> {
    if let Some(err) = response.chart.error {
        return Err(MarketError::Rejected(err.description));
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| MarketError::NotFound(symbol.to_string()))?;

    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| MarketError::Parse("No quote data".into()))?;

    let adj_close_list = result
        .indicators
        .adjclose
        .as_ref()
        .and_then(|v| v.first())
        .map(|v| &v.adjclose);

    let mut candles = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let Some(time) = Utc.timestamp_opt(ts, 0).single() else {
            continue;
        };
        if let (Some(o), Some(h), Some(l), Some(c), Some(v)) = (
            quote.open.get(i).and_then(|x| *x),
            quote.high.get(i).and_then(|x| *x),
            quote.low.get(i).and_then(|x| *x),
            quote.close.get(i).and_then(|x| *x),
            quote.volume.get(i).and_then(|x| *x),
        ) {
            candles.push(Candle {
                time,
                open: o,
                high: h,
                low: l,
                close: c,
                adj_close: adj_close_list.and_then(|list| list.get(i)).and_then(|x| *x),
                volume: v,
            });
        }
    }

    candles.sort_by_key(|c| c.time);
    Ok(candles)
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    /// # Summary
    /// 从 Yahoo Finance 抓取 K 线历史数据。
    ///
    /// # Logic
    /// 1. 构建包含 period1, period2, interval 的 API URL。
    /// 2. 发起异步请求，非 2xx 状态码返回 `Status`。
    /// 3. 解析嵌套的 JSON 数据并展开为 K 线。
    async fn fetch_candles(
        &self,
        stock: &Stock,
        timeframe: TimeFrame,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, MarketError> {
        let symbol = &stock.symbol;
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        debug!(%symbol, %timeframe, %start, %end, "fetching candles");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("period1", start.timestamp().to_string().as_str()),
                ("period2", end.timestamp().to_string().as_str()),
                ("interval", interval(timeframe)),
                ("events", "div,splits"),
            ])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MarketError::Status(status.as_u16()));
        }

        let json: YahooResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        into_candles(symbol, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Vec<Candle>, MarketError> {
        let response: YahooResponse = serde_json::from_str(body).map_err(|e| MarketError::Parse(e.to_string()))?;
        into_candles("TCS.NS", response)
    }

    #[test]
    fn test_into_candles_skips_incomplete_rows() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1717372800, 1717459200, 1717545600],
                    "indicators": {
                        "quote": [{
                            "open":   [3800.0, 3810.0, 3790.0],
                            "high":   [3850.0, 3860.0, 3820.0],
                            "low":    [3780.0, 3790.0, 3750.0],
                            "close":  [3820.5, null,   3801.25],
                            "volume": [1200000, 900000, 1500000]
                        }],
                        "adjclose": [{ "adjclose": [3815.0, null, 3801.25] }]
                    }
                }],
                "error": null
            }
        }"#;

        let candles = parse(body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, 3820.5);
        assert_eq!(candles[0].adj_close, Some(3815.0));
        assert_eq!(candles[1].close, 3801.25);
        assert_eq!(candles[1].volume, 1_500_000.0);
        assert!(candles[0].time < candles[1].time);
    }

    #[test]
    fn test_into_candles_reports_provider_error() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        }"#;

        assert_eq!(
            parse(body),
            Err(MarketError::Rejected(
                "No data found, symbol may be delisted".to_string()
            ))
        );
    }

    #[test]
    fn test_into_candles_empty_range() {
        let body = r#"{
            "chart": {
                "result": [{ "indicators": { "quote": [{}] } }],
                "error": null
            }
        }"#;

        assert_eq!(parse(body), Ok(vec![]));
    }

    #[test]
    fn test_into_candles_uses_first_result() {
        let body = r#"{
            "chart": {
                "result": [
                    {
                        "timestamp": [1717372800],
                        "indicators": { "quote": [{
                            "open": [10.0], "high": [11.0], "low": [9.0], "close": [10.5], "volume": [100]
                        }] }
                    },
                    {
                        "timestamp": [1717459200],
                        "indicators": { "quote": [{
                            "open": [20.0], "high": [21.0], "low": [19.0], "close": [20.5], "volume": [200]
                        }] }
                    }
                ],
                "error": null
            }
        }"#;

        let candles = parse(body).unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].close, 10.5);
    }

    #[test]
    fn test_interval_mapping() {
        assert_eq!(interval(TimeFrame::Day1), "1d");
    }
}
