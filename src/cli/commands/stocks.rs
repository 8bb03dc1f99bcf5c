//! Stock listing, stock info and trading commands.

use anyhow::Result;
use league_app::catalog::{popular, search};
use league_app::{paginate, AppContext, TradeOutcome, STOCKS_PER_PAGE};
use league_core::types::{StockInfo, StockSnapshot};
use rust_decimal::Decimal;

use super::format_age;
use crate::cli::{StocksArgs, TickerArgs, TradeArgs};

fn print_snapshot(s: &StockSnapshot) {
    let arrow = if s.is_up() { "▲" } else { "▼" };
    println!(
        "{:<8} {:<32} ${:>10.2}  {} {:>+9.2} ({:+.2}%)",
        s.ticker, s.name, s.current_price, arrow, s.change, s.change_percent
    );
}

fn print_info(ticker: &str, info: &StockInfo) {
    println!("{}", ticker);
    println!("  Price:        ${:.2}", info.current_price);
    println!("  Owned shares: {}", info.owned_shares.normalize());
    println!("  Balance:      ${:.2}", info.balance);
}

pub async fn list(ctx: &AppContext, args: StocksArgs) -> Result<()> {
    let cached = ctx.catalog().stocks().await?;
    if cached.is_cached() {
        println!(
            "(cached {} ago, refreshes in {})",
            format_age(cached.age),
            format_age(cached.remaining)
        );
    }

    if args.popular {
        for stock in popular(&cached.value) {
            print_snapshot(&stock.snapshot());
        }
        return Ok(());
    }

    let matches = search(&cached.value, args.search.as_deref().unwrap_or(""));
    if matches.is_empty() {
        println!("No stocks found");
        return Ok(());
    }

    let page = paginate(&matches, STOCKS_PER_PAGE, args.page);
    for stock in page.items {
        print_snapshot(&stock.snapshot());
    }
    let nav = page.render_nav();
    if !nav.is_empty() {
        println!();
        println!("{}", nav);
    }
    Ok(())
}

pub async fn info(ctx: &AppContext, args: TickerArgs) -> Result<()> {
    let ticker = args.ticker.trim().to_uppercase();
    if let Some(stock) = ctx.catalog().find(&ticker).await? {
        print_snapshot(&stock.snapshot());
    }
    let info = ctx.trading().stock_info(&ticker).await?;
    print_info(&ticker, &info);
    Ok(())
}

/// Unparseable counts become zero and fail the trade's share check.
fn parse_shares(input: &str) -> Decimal {
    input.trim().parse().unwrap_or(Decimal::ZERO)
}

fn print_outcome(outcome: &TradeOutcome) {
    println!("{}", outcome.message());
    if let Some(info) = &outcome.info {
        print_info(&outcome.ticker, info);
    }
}

pub async fn buy(ctx: &AppContext, args: TradeArgs) -> Result<()> {
    let outcome = ctx
        .trading()
        .buy(&args.ticker, parse_shares(&args.shares))
        .await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn sell(ctx: &AppContext, args: TradeArgs) -> Result<()> {
    let outcome = ctx
        .trading()
        .sell(&args.ticker, parse_shares(&args.shares))
        .await?;
    print_outcome(&outcome);
    Ok(())
}
