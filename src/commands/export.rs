//! Inventory export command

use std::path::PathBuf;

use anyhow::Result;

use crate::config::RuntimeContext;
use crate::export::export_inventory;
use crate::store::Inventory;

pub fn run(ctx: &RuntimeContext, path: Option<PathBuf>) -> Result<()> {
    let inventory = Inventory::open(&ctx.store_path()?)?;
    let path = path.unwrap_or_else(|| PathBuf::from(&ctx.config.export.inventory_file));

    let rows = export_inventory(&path, inventory.paints())?;
    println!("{rows} paints exported to '{}'.", path.display());
    Ok(())
}
