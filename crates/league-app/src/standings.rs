//! Leaderboard, schedule and matchup of the selected league.

use league_core::error::LeagueResult;
use league_core::types::{Leaderboard, Matchup, Schedule};

use crate::context::AppContext;

pub struct Standings<'a> {
    ctx: &'a AppContext,
}

impl<'a> Standings<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub async fn leaderboard(&self) -> LeagueResult<Leaderboard> {
        let (token, league) = self.ctx.require_league_session()?;
        let result = self.ctx.api().leaderboard(&token, &league).await;
        self.ctx.check(result)
    }

    pub async fn schedule(&self) -> LeagueResult<Schedule> {
        let (token, league) = self.ctx.require_league_session()?;
        let result = self.ctx.api().schedule(&token, &league).await;
        self.ctx.check(result)
    }

    /// Schedule rendered one line per week from the user's point of view.
    pub async fn schedule_lines(&self) -> LeagueResult<Vec<String>> {
        let schedule = self.schedule().await?;
        let session = self.ctx.current_session();
        Ok(schedule
            .schedule
            .iter()
            .map(|week| week.describe(session.display_name()))
            .collect())
    }

    pub async fn matchup(&self) -> LeagueResult<Matchup> {
        let (token, league) = self.ctx.require_league_session()?;
        let result = self.ctx.api().matchup(&token, &league).await;
        self.ctx.check(result)
    }
}
