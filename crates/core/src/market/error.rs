use thiserror::Error;

/// # Summary
/// 行情数据域错误枚举。
///
/// # Invariants
/// - 筛选流程中任何一种错误都只意味着"该标的不可用"，不会向上传播。
/// - 详情视图 (`history`) 会把错误原样交给调用方。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    // 连接失败、超时等传输层错误
    #[error("Network error: {0}")]
    Network(String),
    // 数据源返回了非 2xx 状态码
    #[error("HTTP status {0}")]
    Status(u16),
    // 响应体无法解析
    #[error("Parse error: {0}")]
    Parse(String),
    // 数据源明确拒绝了请求 (例如无效代码)
    #[error("Provider rejected request: {0}")]
    Rejected(String),
    // 请求的数据未找到或为空
    #[error("No data for {0}")]
    NotFound(String),
}
