use dipscan_core::common::Stock;

/// NIFTY 50 成分股 (Yahoo 代码)，按指数权重大致排序
pub const NIFTY50: &[&str] = &[
    "RELIANCE.NS",
    "TCS.NS",
    "HDFCBANK.NS",
    "BHARTIARTL.NS",
    "ICICIBANK.NS",
    "INFOSYS.NS",
    "SBIN.NS",
    "HINDUNILVR.NS",
    "ITC.NS",
    "KOTAKBANK.NS",
    "LT.NS",
    "HCLTECH.NS",
    "AXISBANK.NS",
    "ASIANPAINT.NS",
    "MARUTI.NS",
    "SUNPHARMA.NS",
    "TITAN.NS",
    "ULTRACEMCO.NS",
    "WIPRO.NS",
    "NESTLEIND.NS",
    "POWERGRID.NS",
    "NTPC.NS",
    "TECHM.NS",
    "ONGC.NS",
    "TATAMOTORS.NS",
    "BAJFINANCE.NS",
    "M&M.NS",
    "TATASTEEL.NS",
    "COALINDIA.NS",
    "INDUSINDBK.NS",
    "ADANIPORTS.NS",
    "DRREDDY.NS",
    "GRASIM.NS",
    "JSWSTEEL.NS",
    "CIPLA.NS",
    "TATACONSUM.NS",
    "BPCL.NS",
    "EICHERMOT.NS",
    "BRITANNIA.NS",
    "HEROMOTOCO.NS",
    "UPL.NS",
    "APOLLOHOSP.NS",
    "DIVISLAB.NS",
    "HINDALCO.NS",
    "SBILIFE.NS",
    "BAJAJFINSV.NS",
    "HDFCLIFE.NS",
    "SHREECEM.NS",
    "IOC.NS",
    "ADANIENT.NS",
];

/// # Summary
/// 构建固定的 NIFTY 50 标的池。
///
/// # Returns
/// 50 个 NSE 证券实体，顺序与 `NIFTY50` 一致。
pub fn nifty50() -> Vec<Stock> {
    NIFTY50.iter().map(|symbol| Stock::nse(symbol)).collect()
}

/// # Summary
/// 在标的池中查找证券，接受带或不带 `.NS` 后缀、大小写不敏感的输入。
pub fn lookup(symbol: &str) -> Option<Stock> {
    let wanted = symbol.trim().to_uppercase();
    NIFTY50
        .iter()
        .find(|s| **s == wanted || s.strip_suffix(dipscan_core::common::NSE_SUFFIX) == Some(wanted.as_str()))
        .map(|s| Stock::nse(s))
}
