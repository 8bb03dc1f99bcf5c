//! Portfolio command.

use anyhow::Result;
use league_app::{AppContext, PortfolioView};

use super::format_age;
use crate::cli::PortfolioArgs;

pub async fn run(ctx: &AppContext, args: PortfolioArgs) -> Result<()> {
    let mut view = PortfolioView::for_selected(ctx)?;
    let cached = view.load().await?;
    let holdings = &cached.value;

    if cached.is_cached() {
        println!(
            "(cached {} ago, refreshes in {})",
            format_age(cached.age),
            format_age(cached.remaining)
        );
    }
    println!("Net worth:      ${:.2}", holdings.net_worth());
    println!("Cash:           ${:.2}", holdings.current_balance);
    println!("Stock value:    ${:.2}", holdings.stock_value());
    println!("All-time P/L:   ${:+.2}", holdings.total_all_time_profit());
    println!();

    if holdings.is_empty() {
        println!("You don't own any stocks in this league yet");
        return Ok(());
    }

    println!(
        "{:<8} {:>10} {:>10} {:>10} {:>12} {:>12} {:>9}",
        "Ticker", "Shares", "Avg", "Current", "Value", "Profit", "Profit %"
    );
    let page = view.page(args.page);
    for h in page.items {
        let (profit, percent) = match (h.all_time_profit(), h.all_time_profit_percent()) {
            (Some(p), Some(pct)) => (format!("{:+.2}", p), format!("{:+.2}%", pct)),
            _ => ("n/a".to_string(), "n/a".to_string()),
        };
        println!(
            "{:<8} {:>10} {:>10.2} {:>10.2} {:>12.2} {:>12} {:>9}",
            h.ticker,
            h.shares.normalize().to_string(),
            h.avg_price_per_share,
            h.current_price,
            h.market_value(),
            profit,
            percent
        );
    }
    let nav = page.render_nav();
    if !nav.is_empty() {
        println!();
        println!("{}", nav);
    }
    Ok(())
}
