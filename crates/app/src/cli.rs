use clap::{Args, Parser, Subcommand};
use dipscan_core::config::ScreenConfig;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dipscan")]
#[command(version)]
#[command(about = "Screen NIFTY 50 stocks for a buy-the-dip setup and size positions.", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./dipscan.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the screen and print recommendations (default)
    Screen(ScreenArgs),
    /// Print the daily history of one stock
    History {
        /// Symbol, with or without the .NS suffix
        symbol: String,
        /// Lookback in months (defaults to feed.history_months)
        #[arg(long)]
        months: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// List the screened universe
    Universe,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ScreenArgs {
    /// Capital to invest, INR
    #[arg(long)]
    pub capital: Option<Decimal>,
    /// Deviation from MA-20 must be above this (percent, negative)
    #[arg(long, allow_negative_numbers = true)]
    pub min_deviation: Option<f64>,
    /// Latest volume / 10-day average must be above this
    #[arg(long)]
    pub min_volume_ratio: Option<f64>,
    /// Annualized volatility must be below this (percent)
    #[arg(long)]
    pub max_volatility: Option<f64>,
    /// Also list every candidate that passed the rules
    #[arg(long)]
    pub all: bool,
    #[arg(long)]
    pub json: bool,
}

impl ScreenArgs {
    /// 用命令行参数逐项覆盖配置中的默认值
    pub fn apply(&self, base: &ScreenConfig) -> ScreenConfig {
        ScreenConfig {
            capital: self.capital.unwrap_or(base.capital),
            min_deviation_pct: self.min_deviation.unwrap_or(base.min_deviation_pct),
            min_volume_ratio: self.min_volume_ratio.unwrap_or(base.min_volume_ratio),
            max_volatility_pct: self.max_volatility.unwrap_or(base.max_volatility_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_screen_flags_override_config() {
        let cli = Cli::try_parse_from([
            "dipscan",
            "screen",
            "--capital",
            "250000",
            "--min-deviation",
            "-5",
            "--json",
        ])
        .unwrap();

        let Some(Command::Screen(args)) = cli.command else {
            panic!("expected screen command");
        };
        assert!(args.json);

        let merged = args.apply(&ScreenConfig::default());
        assert_eq!(merged.capital, dec!(250000));
        assert_eq!(merged.min_deviation_pct, -5.0);
        assert_eq!(merged.min_volume_ratio, 0.8);
        assert_eq!(merged.max_volatility_pct, 50.0);
    }

    #[test]
    fn test_no_subcommand_is_accepted() {
        let cli = Cli::try_parse_from(["dipscan", "--config", "custom.toml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_history_arguments() {
        let cli = Cli::try_parse_from(["dipscan", "history", "tcs", "--months", "3"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::History {
                symbol: "tcs".to_string(),
                months: Some(3),
                json: false,
            })
        );
    }
}
