//! List command implementation

use anyhow::Result;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tabled::Tabled;

use crate::cli::ListCommand;
use crate::config::RuntimeContext;
use crate::output::{output_for_format, print_table};
use crate::store::{sort_paints, Field, Inventory, Paint};

#[derive(Debug, Tabled)]
struct PaintRow {
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    paint_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Quantity")]
    quantity: u32,
}

impl From<&Paint> for PaintRow {
    fn from(paint: &Paint) -> Self {
        Self {
            brand: paint.brand.clone(),
            name: paint.name.clone(),
            paint_type: paint.paint_type.to_string(),
            status: paint.status.to_string(),
            quantity: paint.quantity,
        }
    }
}

pub fn run(ctx: &RuntimeContext, cmd: ListCommand) -> Result<()> {
    let inventory = Inventory::open(&ctx.store_path()?)?;

    let mut paints = match cmd.filter.as_deref() {
        Some(value) if cmd.fuzzy => fuzzy_filter(&inventory, cmd.field, value),
        Some(value) => inventory.filter(cmd.field, value),
        None => inventory.paints().iter().collect(),
    };

    if let Some(key) = cmd.sort_by {
        sort_paints(&mut paints, key, cmd.desc);
    }
    log::debug!("{} of {} paints shown", paints.len(), inventory.paints().len());

    output_for_format(ctx, &paints, || {
        if paints.is_empty() {
            if cmd.filter.is_some() {
                println!("No paints found matching filter");
            } else {
                println!("No paints in inventory");
            }
            return Ok(());
        }
        let rows: Vec<PaintRow> = paints.iter().map(|p| PaintRow::from(*p)).collect();
        print_table(ctx, &rows)
    })
}

/// Keep paints whose field fuzzy-matches `value`, best match first
fn fuzzy_filter<'a>(inventory: &'a Inventory, field: Field, value: &str) -> Vec<&'a Paint> {
    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &Paint)> = inventory
        .paints()
        .iter()
        .filter_map(|p| matcher.fuzzy_match(p.field(field), value).map(|s| (s, p)))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, p)| p).collect()
}
