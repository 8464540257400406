//! Leaderboard and rank commands

use anyhow::Result;

use arcade_progress::leaderboard::PlayerStanding;

use super::Context;

pub fn leaderboard_command(ctx: &Context, top: Option<usize>) -> Result<()> {
    let n = top.unwrap_or(ctx.config.leaderboard.size);
    let store = ctx.config.open_store();
    let board = arcade_progress::leaderboard::Leaderboard::new(store.as_ref());
    let standings = board.top(n)?;

    if standings.is_empty() {
        println!("No players yet.");
        return Ok(());
    }

    println!("{:>4}  {:<20} {:>8}", "#", "Player", "Points");
    for s in &standings {
        let bar = "█".repeat((s.share_of_leader * 20.0).round() as usize);
        println!("{:>4}  {:<20} {:>8}  {}", s.position, s.name, s.points, bar);
    }
    Ok(())
}

pub fn rank_command(ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let name = session
        .snapshot()
        .map(|p| p.name.clone())
        .unwrap_or_default();
    let standing = session.leaderboard().standing(&name)?;
    println!("{}", standing_line(&name, &standing));
    Ok(())
}

fn standing_line(name: &str, standing: &PlayerStanding) -> String {
    format!(
        "{} is #{} of {}, level with or ahead of {:.0}% of players",
        name, standing.rank, standing.total_players, standing.percentile
    )
}
