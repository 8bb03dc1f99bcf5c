//! Leaderboard, schedule and matchup commands.

use anyhow::Result;
use league_app::AppContext;
use league_core::types::TeamSummary;

pub async fn leaderboard(ctx: &AppContext) -> Result<()> {
    let board = ctx.standings().leaderboard().await?;
    if board.leaderboard.is_empty() {
        println!("No standings yet");
        return Ok(());
    }
    println!("{:<5} {:<20} {:>7} {:>14}", "Rank", "Player", "Record", "Net worth");
    for (i, entry) in board.leaderboard.iter().enumerate() {
        let name = if entry.is_current_user {
            format!("{} (you)", entry.username)
        } else {
            entry.username.clone()
        };
        println!(
            "{:<5} {:<20} {:>7} {:>14.2}",
            i + 1,
            name,
            entry.record(),
            entry.net_worth
        );
    }
    Ok(())
}

pub async fn schedule(ctx: &AppContext) -> Result<()> {
    let lines = ctx.standings().schedule_lines().await?;
    if lines.is_empty() {
        println!("No matchups scheduled yet");
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn print_team(team: &TeamSummary) {
    println!(
        "{} ({})  net worth ${:.2}  week profit ${:+.2}",
        team.name, team.record, team.value, team.profit
    );
    for stock in &team.stocks {
        println!("    {:<8} {:+.2}", stock.ticker, stock.profit);
    }
}

pub async fn matchup(ctx: &AppContext) -> Result<()> {
    let matchup = ctx.standings().matchup().await?;
    if let Some(week) = matchup.week_number {
        println!("Week {}", week);
    }
    print_team(&matchup.player1);
    println!("  vs");
    print_team(&matchup.player2);
    match matchup.leader() {
        Some(team) => println!("{} is ahead", team.name),
        None => println!("All square"),
    }
    Ok(())
}
