use dipscan_core::screen::entity::{Metrics, POSITION_FRACTION, Pick, TOP_PICKS};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// # Summary
/// 按偏离度升序排列候选 (回调最深的排在最前)。
///
/// # Invariants
/// - 稳定排序：偏离度相同的候选保持输入顺序。
pub fn rank(mut candidates: Vec<Metrics>) -> Vec<Metrics> {
    candidates.sort_by(|a, b| a.deviation_pct.total_cmp(&b.deviation_pct));
    candidates
}

/// 取排序后的前 `TOP_PICKS` 个候选
pub fn top_picks(ranked: &[Metrics]) -> &[Metrics] {
    &ranked[..ranked.len().min(TOP_PICKS)]
}

/// # Summary
/// 为每个推荐标的独立分配仓位。
///
/// # Logic
/// 1. 每个标的的预算都是 `capital × 20%`，互不占用。
/// 2. quantity = floor(预算 / 价格)，amount = quantity × 价格。
/// 3. 价格非正或无法表示为十进制时数量为 0。
///
/// # Arguments
/// * `picks`: 已排序的推荐标的。
/// * `capital`: 可投入资金 (INR)。
///
/// # Returns
/// 与输入顺序一致的仓位列表。推荐数超过 5 个时总金额可能超过 `capital`。
pub fn size_positions(picks: &[Metrics], capital: Decimal) -> Vec<Pick> {
    let budget = capital * POSITION_FRACTION;
    picks.iter().map(|m| size_one(m, budget)).collect()
}

fn size_one(metrics: &Metrics, budget: Decimal) -> Pick {
    let price = Decimal::from_f64(metrics.price).filter(|p| *p > Decimal::ZERO);

    let (quantity, amount) = match price {
        Some(price) => {
            let mut quantity = budget
                .checked_div(price)
                .and_then(|q| q.floor().to_u64())
                .unwrap_or(0);
            // 除法在第 28 位舍入可能让 floor 多出一股
            if quantity > 0 && Decimal::from(quantity) * price > budget {
                quantity -= 1;
            }
            (quantity, Decimal::from(quantity) * price)
        }
        None => (0, Decimal::ZERO),
    };

    Pick {
        metrics: metrics.clone(),
        quantity,
        amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dipscan_core::common::Stock;
    use rust_decimal_macros::dec;

    fn candidate(symbol: &str, price: f64, deviation_pct: f64) -> Metrics {
        Metrics {
            stock: Stock::nse(symbol),
            price,
            ma20: price / (1.0 + deviation_pct / 100.0),
            deviation_pct,
            volume_ratio: 1.0,
            volatility_pct: 30.0,
        }
    }

    fn symbols(list: &[Metrics]) -> Vec<&str> {
        list.iter().map(|m| m.stock.symbol.as_str()).collect()
    }

    #[test]
    fn test_rank_ascending_and_stable() {
        let ranked = rank(vec![
            candidate("A.NS", 100.0, -2.0),
            candidate("B.NS", 100.0, -7.5),
            candidate("C.NS", 100.0, -2.0),
            candidate("D.NS", 100.0, -9.1),
            candidate("E.NS", 100.0, -2.0),
        ]);

        assert_eq!(symbols(&ranked), vec!["D.NS", "B.NS", "A.NS", "C.NS", "E.NS"]);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].deviation_pct <= w[1].deviation_pct));
    }

    #[test]
    fn test_top_picks_caps_at_five() {
        let ranked: Vec<Metrics> = (0..8)
            .map(|i| candidate(&format!("S{i}.NS"), 100.0, -f64::from(8 - i)))
            .collect();
        let ranked = rank(ranked);
        assert_eq!(top_picks(&ranked).len(), 5);
        assert_eq!(top_picks(&ranked[..3]).len(), 3);
        assert!(top_picks(&[]).is_empty());
    }

    #[test]
    fn test_size_position_reference_case() {
        let picks = size_positions(&[candidate("TCS.NS", 2500.0, -4.0)], dec!(100000));
        assert_eq!(picks[0].quantity, 8);
        assert_eq!(picks[0].amount, dec!(20000));
    }

    #[test]
    fn test_each_pick_gets_full_twenty_percent() {
        let capital = dec!(100000);
        let list: Vec<Metrics> = [1999.5, 333.0, 20001.0, 47.35, 812.9, 153.3]
            .iter()
            .enumerate()
            .map(|(i, p)| candidate(&format!("S{i}.NS"), *p, -3.0))
            .collect();

        let picks = size_positions(&list, capital);
        let budget = capital * dec!(0.20);
        for pick in &picks {
            let price = Decimal::from_f64(pick.metrics.price).unwrap();
            assert_eq!(Decimal::from(pick.quantity), (budget / price).floor());
            assert!(pick.amount <= budget);
            assert_eq!(pick.amount, Decimal::from(pick.quantity) * price);
        }
        // 单价超过预算时买不到
        assert_eq!(picks[2].quantity, 0);
        assert_eq!(picks[2].amount, Decimal::ZERO);
    }

    #[test]
    fn test_budgets_are_not_split_across_picks() {
        let list: Vec<Metrics> = [2500.0, 1000.0, 500.0, 250.0, 125.0, 400.0]
            .iter()
            .enumerate()
            .map(|(i, p)| candidate(&format!("S{i}.NS"), *p, -3.0))
            .collect();

        let picks = size_positions(&list, dec!(100000));
        assert!(picks.iter().all(|p| p.amount == dec!(20000)));
        // 六个仓位各自占用 20%，总额超过本金
        assert_eq!(picks.iter().map(|p| p.amount).sum::<Decimal>(), dec!(120000));
    }

    #[test]
    fn test_non_positive_price_sizes_to_zero() {
        let picks = size_positions(&[candidate("X.NS", 0.0, -1.0)], dec!(100000));
        assert_eq!(picks[0].quantity, 0);
        assert_eq!(picks[0].amount, Decimal::ZERO);
    }
}
