use rust_decimal::Decimal;
use thiserror::Error;

/// # Summary
/// 筛选参数校验错误。
///
/// # Invariants
/// - 只在参数层产生，筛选引擎本身不做校验。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScreenError {
    #[error("Capital {value} outside allowed range [{min}, {max}]")]
    CapitalOutOfRange {
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },
    #[error("{name} = {value} outside allowed range [{min}, {max}]")]
    ThresholdOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
