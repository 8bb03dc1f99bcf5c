//! League listing, membership and administration.

use league_core::error::{DomainError, LeagueResult};
use league_core::types::{
    parse_start_date, validate_start_date, League, LeagueId, LeagueListing, LeagueMembership,
};
use league_store::CacheKey;
use tracing::info;

use crate::context::AppContext;

pub struct Leagues<'a> {
    ctx: &'a AppContext,
}

impl<'a> Leagues<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Leagues visible to the user, with the superuser flag.
    pub async fn list(&self) -> LeagueResult<LeagueListing> {
        let token = self.ctx.require_token()?;
        let result = self.ctx.api().list_leagues(&token).await;
        self.ctx.check(result)
    }

    pub async fn create(&self, name: &str) -> LeagueResult<League> {
        let token = self.ctx.require_token()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Required("League name").into());
        }
        let result = self.ctx.api().create_league(&token, name).await;
        let league = self.ctx.check(result)?;
        info!("Created league {} ({})", league.name, league.league_id);
        Ok(league)
    }

    /// Join by id and make the joined league the active one.
    pub async fn join(&self, league_id: &str) -> LeagueResult<League> {
        let token = self.ctx.require_token()?;
        let id: LeagueId = league_id.parse()?;
        let result = self.ctx.api().join_league(&token, &id).await;
        let league = self.ctx.check(result)?;
        self.ctx.session().select_league(&league.league_id)?;
        info!("Joined league {}", league.league_id);
        Ok(league)
    }

    /// Make `league_id` the active league.
    ///
    /// Only full leagues can be selected, and superusers only pick leagues they
    /// play in.
    pub async fn select(&self, league_id: &str) -> LeagueResult<LeagueMembership> {
        let id: LeagueId = league_id.parse()?;
        let listing = self.list().await?;
        let membership = listing
            .find(&id)
            .cloned()
            .ok_or_else(|| DomainError::UnknownLeague(id.to_string()))?;
        membership.selectability(listing.is_superuser).into_result()?;
        self.ctx.session().select_league(&id)?;
        Ok(membership)
    }

    /// Set the first day of play. The date is checked before anything is sent.
    pub async fn set_start_date(&self, league_id: &str, date: &str) -> LeagueResult<League> {
        let token = self.ctx.require_token()?;
        let id: LeagueId = league_id.parse()?;
        let date = parse_start_date(date)?;
        validate_start_date(date, self.ctx.clock().today())?;

        let listing = self.list().await?;
        if let Some(membership) = listing.find(&id) {
            if !membership.league.is_full() {
                return Err(DomainError::LeagueNotFull {
                    count: membership.league.participant_count,
                }
                .into());
            }
        }

        let result = self.ctx.api().set_start_date(&token, &id, date).await;
        let league = self.ctx.check(result)?;
        info!("League {} starts {}", id, date);
        Ok(league)
    }

    /// Delete a league. Deleting the active league clears the selection.
    pub async fn delete(&self, league_id: &str) -> LeagueResult<()> {
        let token = self.ctx.require_token()?;
        let id: LeagueId = league_id.parse()?;
        let result = self.ctx.api().delete_league(&token, &id).await;
        self.ctx.check(result)?;

        if self.ctx.session().selected_league() == Some(id) {
            self.ctx.session().clear_selection();
        }
        self.ctx.cache().invalidate(&CacheKey::owned_stocks(&id));
        info!("Deleted league {}", id);
        Ok(())
    }
}
