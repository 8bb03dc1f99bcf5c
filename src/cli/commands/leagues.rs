//! League management commands.

use anyhow::Result;
use league_app::AppContext;
use league_core::types::{League, LeagueMembership};

use crate::cli::LeagueCommands;

fn describe(league: &League) -> String {
    let start = match league.start_date {
        Some(date) => format!("starts {}", date),
        None => "no start date".to_string(),
    };
    format!(
        "{} ({}) {}/8 participants, {}",
        league.name, league.league_id, league.participant_count, start
    )
}

fn print_membership(m: &LeagueMembership, is_superuser: bool, selected: bool) {
    let mut tags = Vec::new();
    if selected {
        tags.push("active".to_string());
    }
    if m.league_admin {
        tags.push("admin".to_string());
    }
    if !m.is_participant {
        tags.push("not playing".to_string());
    }
    let selectability = m.selectability(is_superuser);
    if !selectability.is_selectable() {
        tags.push("not selectable".to_string());
    }
    if m.league.can_set_start_date {
        tags.push("start date can be set".to_string());
    }

    let marker = if selected { "*" } else { " " };
    if tags.is_empty() {
        println!("{} {}", marker, describe(&m.league));
    } else {
        println!("{} {} [{}]", marker, describe(&m.league), tags.join(", "));
    }
}

pub async fn run(ctx: &AppContext, command: LeagueCommands) -> Result<()> {
    let leagues = ctx.leagues();
    match command {
        LeagueCommands::List => {
            let listing = leagues.list().await?;
            if listing.leagues.is_empty() {
                println!("You are not in any league yet. Create one or join with an id.");
                return Ok(());
            }
            let selected = ctx.session().selected_league();
            for m in &listing.leagues {
                print_membership(m, listing.is_superuser, selected == Some(m.league.league_id));
            }
        }
        LeagueCommands::Create { name } => {
            let league = leagues.create(&name).await?;
            println!("Created {}", describe(&league));
            println!("Share the id {} so others can join", league.league_id);
        }
        LeagueCommands::Join { league_id } => {
            let league = leagues.join(&league_id).await?;
            println!("Joined {}", describe(&league));
        }
        LeagueCommands::Select { league_id } => {
            let membership = leagues.select(&league_id).await?;
            println!("Active league: {}", describe(&membership.league));
        }
        LeagueCommands::SetStartDate { league_id, date } => {
            let league = leagues.set_start_date(&league_id, &date).await?;
            println!("Updated {}", describe(&league));
        }
        LeagueCommands::Delete { league_id } => {
            leagues.delete(&league_id).await?;
            println!("League deleted");
        }
    }
    Ok(())
}
