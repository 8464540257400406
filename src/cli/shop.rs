//! Shop commands

use anyhow::{Result, anyhow};

use arcade_progress::domain::ItemKind;
use arcade_progress::shop::CATALOG;

use super::{Context, print_outcome};

pub fn shop_command() {
    println!("{:<14} {:<18} {:>6}  Description", "Key", "Item", "Price");
    for entry in CATALOG {
        println!(
            "{:<14} {:<18} {:>6}  {}",
            entry.item.as_str(),
            entry.item.display_name(),
            entry.price,
            entry.description
        );
    }
}

pub fn buy_command(ctx: &Context, item: &str) -> Result<()> {
    let item = ItemKind::parse(item)
        .ok_or_else(|| anyhow!("Unknown item '{}'. Run `arcade shop` for the list.", item))?;
    let mut session = ctx.session()?;
    let outcome = session.purchase(item)?;
    ctx.save_tally(&session);
    print_outcome(&outcome);
    Ok(())
}
