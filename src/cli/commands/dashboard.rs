//! Dashboard command.

use anyhow::Result;
use league_app::{AppContext, PortfolioView};
use league_core::types::Holdings;
use league_monitor::{Dashboard, DashboardState, Tick};
use league_store::{CacheKey, Cached};
use tokio::runtime::Handle;
use tokio::task;
use tracing::{debug, warn};

use super::format_age;
use crate::cli::DashboardArgs;

const MAX_MESSAGES: usize = 50;

fn holdings_note(cached: &Cached<Holdings>) -> String {
    if cached.is_cached() {
        format!(
            "cached {} ago, refreshes in {}",
            format_age(cached.age),
            format_age(cached.remaining)
        )
    } else {
        "fresh from the server".to_string()
    }
}

async fn update(
    ctx: &AppContext,
    view: &mut PortfolioView<'_>,
    state: &mut DashboardState,
    tick: Tick,
) {
    let forced = tick == Tick::Refresh;
    if forced {
        ctx.cache().invalidate(&CacheKey::owned_stocks(view.league()));
        state.messages.push("Refreshing".to_string());
    }

    if forced || view.is_stale() {
        match view.load().await {
            Ok(cached) => {
                state.holdings = cached.value.clone();
                state.holdings_note = holdings_note(cached);
            }
            Err(e) => {
                warn!("Holdings refresh failed: {}", e);
                state.messages.push(e.user_message());
            }
        }
    }

    if forced || state.league.is_none() {
        let standings = ctx.standings();
        match standings.leaderboard().await {
            Ok(board) => state.leaderboard = board,
            Err(e) => state.messages.push(e.user_message()),
        }
        match standings.schedule_lines().await {
            Ok(lines) => state.schedule = lines,
            Err(e) => state.messages.push(e.user_message()),
        }
        let name = match ctx.leagues().list().await {
            Ok(listing) => listing.find(view.league()).map(|m| m.league.name.clone()),
            Err(_) => None,
        };
        state.league = Some(name.unwrap_or_else(|| view.league().to_string()));
    }

    let excess = state.messages.len().saturating_sub(MAX_MESSAGES);
    state.messages.drain(..excess);
}

pub fn run(ctx: &AppContext, args: DashboardArgs) -> Result<()> {
    let (_, league) = ctx.require_league_session()?;
    let handle = Handle::current();

    let mut view = PortfolioView::new(ctx, league);
    view.attach();
    let mut state = DashboardState {
        username: ctx.current_session().display_name().to_string(),
        ..Default::default()
    };

    let dashboard = Dashboard::new(args.refresh_ms);
    task::block_in_place(|| {
        dashboard.run(|tick| {
            handle.block_on(update(ctx, &mut view, &mut state, tick));
            state.clone()
        })
    })?;

    debug!("Dashboard closed");
    Ok(())
}
