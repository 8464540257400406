//! Gameplay commands: wins, awards, consumables, companion care

use anyhow::{Result, anyhow};

use arcade_progress::domain::ConsumableKind;
use arcade_progress::games::MiniGame;
use arcade_progress::session::GameEvent;

use super::{Context, print_outcome};

fn apply(ctx: &Context, event: GameEvent) -> Result<()> {
    let mut session = ctx.session()?;
    let outcome = session.apply(event)?;
    ctx.save_tally(&session);
    print_outcome(&outcome);
    Ok(())
}

pub fn win_command(ctx: &Context, game: &str) -> Result<()> {
    let game = MiniGame::parse(game).ok_or_else(|| {
        let known: Vec<&str> = MiniGame::ALL.iter().map(|g| g.as_str()).collect();
        anyhow!("Unknown game '{}'. Known games: {}", game, known.join(", "))
    })?;
    apply(ctx, GameEvent::GameWon(game))
}

pub fn award_command(ctx: &Context, amount: i64, reason: &str) -> Result<()> {
    apply(ctx, GameEvent::award(amount, reason))
}

pub fn use_command(ctx: &Context, item: &str) -> Result<()> {
    let kind = ConsumableKind::parse(item).ok_or_else(|| anyhow!("Unknown item '{}'", item))?;
    if kind == ConsumableKind::CompanionBoost {
        return boost_command(ctx);
    }
    apply(ctx, GameEvent::ConsumeItem(kind))
}

pub fn boost_command(ctx: &Context) -> Result<()> {
    apply(ctx, GameEvent::UseCompanionBoost)
}

pub fn pet_command(ctx: &Context) -> Result<()> {
    apply(ctx, GameEvent::PetCompanion)
}

/// Close the running session: win counters and streak start over
pub fn end_command(ctx: &Context) -> Result<()> {
    let name = ctx.player_name()?;
    let tally_file = ctx.config.tally_file();
    let tally = tally_file.load(&name);
    if tally_file.clear(&name)? {
        println!(
            "Session over for {}: {} win(s), current streak {}.",
            name.trim(),
            tally.total_wins,
            tally.consecutive_wins
        );
    } else {
        println!("No running session for {}.", name.trim());
    }
    Ok(())
}
