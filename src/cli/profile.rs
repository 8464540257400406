//! Profile command

use anyhow::Result;

use arcade_progress::domain::{Achievement, AchievementCategory};

use super::Context;

pub fn profile_command(ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let Some(profile) = session.snapshot() else {
        return Ok(());
    };

    println!("{}", profile.name);
    println!("  Points:     {}", profile.points);
    println!("  Store:      {}", session.backend());

    let inventory = profile.inventory_lines();
    if inventory.is_empty() {
        println!("  Inventory:  (empty)");
    } else {
        println!("  Inventory:");
        for line in inventory {
            println!("    {}", line);
        }
    }

    if profile.companion_stage.is_owned() {
        match profile.companion_stage.evolution() {
            Some((required, next)) => println!(
                "  Companion:  {} XP (next: {} at {})",
                profile.companion_xp, next, required
            ),
            None => println!("  Companion:  {} XP", profile.companion_xp),
        }
    }

    println!(
        "  Achievements ({}/{}):",
        profile.achievements.len(),
        Achievement::total_count()
    );
    for category in [
        AchievementCategory::Wins,
        AchievementCategory::Companion,
        AchievementCategory::Games,
    ] {
        let unlocked: Vec<String> = profile
            .achievements
            .iter()
            .filter_map(|id| Achievement::lookup(id))
            .filter(|a| a.category == category)
            .map(|a| format!("{} {}", a.icon, a.name))
            .collect();
        if !unlocked.is_empty() {
            println!("    {}: {}", category.label(), unlocked.join(", "));
        }
    }

    if session.is_degraded() {
        println!("  (not saved: store unavailable)");
    }
    Ok(())
}
