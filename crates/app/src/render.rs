use dipscan_core::common::Stock;
use dipscan_core::market::entity::Candle;
use dipscan_core::screen::entity::{Metrics, ScreenReport};
use dipscan_core::screen::port::ScreenPresenter;
use rust_decimal::Decimal;
use std::io::Write;

const NO_MATCH_NOTICE: &str = "No NIFTY stocks meet today's criteria. Try again later.";

/// # Summary
/// 终端表格输出。
pub struct TablePresenter {
    // 额外列出全部候选 (不含仓位列)
    pub show_candidates: bool,
}

/// # Summary
/// JSON 输出，字段与 `ScreenReport` 一致。
pub struct JsonPresenter;

/// # Summary
/// 按千分位格式化金额，例如 `100000` 输出 `100,000`。
///
/// # Logic
/// 1. 整数部分每三位插入逗号。
/// 2. 小数部分去掉末尾 0 后原样保留。
pub fn format_inr(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn write_metrics_header(out: &mut dyn Write, with_position: bool) -> std::io::Result<()> {
    write!(
        out,
        "{:<12} {:>10} {:>10} {:>7} {:>9} {:>10}",
        "Stock", "Price", "MA-20", "Dev%", "Vol Ratio", "Volatility"
    )?;
    if with_position {
        write!(out, " {:>6} {:>12}", "Qty", "Amount")?;
    }
    writeln!(out)
}

fn write_metrics_row(out: &mut dyn Write, m: &Metrics) -> std::io::Result<()> {
    write!(
        out,
        "{:<12} {:>10.2} {:>10.2} {:>7.2} {:>9.2} {:>10.1}",
        m.stock.display_name(),
        m.price,
        m.ma20,
        m.deviation_pct,
        m.volume_ratio,
        m.volatility_pct
    )
}

impl ScreenPresenter for TablePresenter {
    fn present_report(&self, report: &ScreenReport, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            out,
            "### {} Recommendations for ₹{}",
            report.picks.len(),
            format_inr(report.capital)
        )?;
        writeln!(out)?;

        if report.picks.is_empty() {
            writeln!(out, "{NO_MATCH_NOTICE}")?;
        } else {
            write_metrics_header(out, true)?;
            for pick in &report.picks {
                write_metrics_row(out, &pick.metrics)?;
                writeln!(
                    out,
                    " {:>6} {:>12.2}",
                    pick.quantity,
                    pick.amount.round_dp(2)
                )?;
            }
            writeln!(out)?;
            writeln!(out, "Total: ₹{}", format_inr(report.total_amount().round_dp(2)))?;
        }

        if self.show_candidates && !report.candidates.is_empty() {
            writeln!(out)?;
            writeln!(out, "All candidates (deepest dip first):")?;
            write_metrics_header(out, false)?;
            for m in &report.candidates {
                write_metrics_row(out, m)?;
                writeln!(out)?;
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "Analyzed {} stocks that passed MA/volume/volatility rules.",
            report.candidates.len()
        )
    }

    fn present_history(
        &self,
        stock: &Stock,
        candles: &[Candle],
        out: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(out, "### {} daily history", stock.display_name())?;
        writeln!(out)?;
        writeln!(out, "{:<10} {:>10} {:>14}", "Date", "Close", "Volume")?;
        for c in candles {
            writeln!(
                out,
                "{:<10} {:>10.2} {:>14.0}",
                c.time.format("%Y-%m-%d"),
                c.close,
                c.volume
            )?;
        }

        if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
            let high = candles.iter().map(|c| c.close).fold(f64::MIN, f64::max);
            let low = candles.iter().map(|c| c.close).fold(f64::MAX, f64::min);
            writeln!(out)?;
            writeln!(
                out,
                "{} sessions, close range {:.2} - {:.2}, change {:+.2}%",
                candles.len(),
                low,
                high,
                (last.close - first.close) / first.close * 100.0
            )?;
        }
        Ok(())
    }
}

impl ScreenPresenter for JsonPresenter {
    fn present_report(&self, report: &ScreenReport, out: &mut dyn Write) -> std::io::Result<()> {
        let value = serde_json::json!({
            "capital": report.capital,
            "no_match": report.is_no_match(),
            "candidates": report.candidates,
            "picks": report.picks,
        });
        serde_json::to_writer_pretty(&mut *out, &value)?;
        writeln!(out)
    }

    fn present_history(
        &self,
        stock: &Stock,
        candles: &[Candle],
        out: &mut dyn Write,
    ) -> std::io::Result<()> {
        let value = serde_json::json!({
            "stock": stock,
            "candles": candles,
        });
        serde_json::to_writer_pretty(&mut *out, &value)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dipscan_core::screen::entity::Pick;
    use rust_decimal_macros::dec;

    fn metrics(symbol: &str, price: f64, ma20: f64) -> Metrics {
        Metrics {
            stock: Stock::nse(symbol),
            price,
            ma20,
            deviation_pct: (price - ma20) / ma20 * 100.0,
            volume_ratio: 1.234,
            volatility_pct: 28.76,
        }
    }

    fn render(presenter: &dyn ScreenPresenter, report: &ScreenReport) -> String {
        let mut buf = Vec::new();
        presenter.present_report(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(dec!(100000)), "100,000");
        assert_eq!(format_inr(dec!(5000000)), "5,000,000");
        assert_eq!(format_inr(dec!(999)), "999");
        assert_eq!(format_inr(dec!(20000.00)), "20,000");
        assert_eq!(format_inr(dec!(1234567.5)), "1,234,567.5");
        assert_eq!(format_inr(dec!(-1234)), "-1,234");
    }

    #[test]
    fn test_table_with_picks() {
        let tcs = metrics("TCS.NS", 2500.0, 2600.0);
        let report = ScreenReport {
            capital: dec!(100000),
            candidates: vec![tcs.clone()],
            picks: vec![Pick {
                metrics: tcs,
                quantity: 8,
                amount: dec!(20000),
            }],
        };

        let text = render(&TablePresenter { show_candidates: false }, &report);
        assert!(text.starts_with("### 1 Recommendations for ₹100,000"));
        assert!(text.contains("Vol Ratio"));
        assert!(text.contains("TCS "));
        assert!(!text.contains("TCS.NS"));
        assert!(text.contains("2500.00"));
        assert!(text.contains("-3.85"));
        assert!(text.contains("1.23"));
        assert!(text.contains("28.8"));
        assert!(text.contains("20000.00"));
        assert!(text.contains("Analyzed 1 stocks that passed MA/volume/volatility rules."));
        assert!(!text.contains(NO_MATCH_NOTICE));
    }

    #[test]
    fn test_table_no_match() {
        let report = ScreenReport {
            capital: dec!(250000),
            candidates: vec![],
            picks: vec![],
        };
        let text = render(&TablePresenter { show_candidates: true }, &report);
        assert!(text.starts_with("### 0 Recommendations for ₹250,000"));
        assert!(text.contains(NO_MATCH_NOTICE));
        assert!(text.contains("Analyzed 0 stocks"));
    }

    #[test]
    fn test_json_report() {
        let report = ScreenReport {
            capital: dec!(100000),
            candidates: vec![metrics("ITC.NS", 420.0, 440.0)],
            picks: vec![],
        };
        let text = render(&JsonPresenter, &report);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["no_match"], false);
        assert_eq!(value["candidates"][0]["stock"]["symbol"], "ITC.NS");
        assert_eq!(value["picks"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_history_table() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let candles: Vec<Candle> = [100.0, 110.0, 105.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                time: start + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                adj_close: None,
                volume: 12345.0,
            })
            .collect();

        let mut buf = Vec::new();
        TablePresenter { show_candidates: false }
            .present_history(&Stock::nse("WIPRO.NS"), &candles, &mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("### WIPRO daily history"));
        assert!(text.contains("2024-01-02"));
        assert!(text.contains("3 sessions, close range 100.00 - 110.00, change +5.00%"));
    }
}
