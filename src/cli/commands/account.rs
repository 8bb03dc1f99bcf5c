//! Login, signup, logout and rename.

use anyhow::Result;
use league_app::AppContext;
use tracing::info;

use crate::cli::{LoginArgs, RenameArgs, SignupArgs};

pub async fn login(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    let session = ctx.auth().login(&args.username, &args.password).await?;
    println!("Logged in as {}", session.display_name());
    if session.selected_league_id.is_none() {
        println!("No league selected. Use `league leagues list` to pick one.");
    }
    Ok(())
}

pub async fn signup(ctx: &AppContext, args: SignupArgs) -> Result<()> {
    let session = ctx
        .auth()
        .register(&args.username, &args.password, &args.confirm)
        .await?;
    println!("Account created. Logged in as {}", session.display_name());
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.auth().logout();
    info!("Session cleared");
    println!("Logged out");
    Ok(())
}

pub async fn rename(ctx: &AppContext, args: RenameArgs) -> Result<()> {
    let username = ctx.auth().rename(&args.username).await?;
    println!("Username changed to {}", username);
    Ok(())
}
