//! Add / update command

use anyhow::Result;

use crate::cli::AddCommand;
use crate::config::RuntimeContext;
use crate::output::output_for_format;
use crate::store::{Inventory, NewPaint, Upsert};

pub fn run(ctx: &RuntimeContext, cmd: AddCommand) -> Result<()> {
    let path = ctx.store_path()?;
    let mut inventory = Inventory::open(&path)?;

    let outcome = inventory.upsert(NewPaint {
        brand: cmd.brand,
        name: cmd.name,
        paint_type: cmd.paint_type,
        status: cmd.status,
        quantity: cmd.quantity,
    })?;
    inventory.save()?;

    output_for_format(ctx, &outcome, || {
        println!("{}", describe(&outcome));
        Ok(())
    })
}

fn describe(outcome: &Upsert) -> String {
    match outcome {
        Upsert::Added { name, .. } => format!("Paint '{name}' added!"),
        Upsert::Updated { name, quantity } => {
            format!("Updated quantity for {name} (now {quantity}).")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let added = Upsert::Added {
            name: "Wraithbone".to_string(),
            quantity: 1,
        };
        assert_eq!(describe(&added), "Paint 'Wraithbone' added!");

        let updated = Upsert::Updated {
            name: "Nuln Oil".to_string(),
            quantity: 3,
        };
        assert_eq!(describe(&updated), "Updated quantity for Nuln Oil (now 3).");
    }
}
