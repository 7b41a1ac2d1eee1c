//! CSV export of the inventory and of unresolved reconciliation rows

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::reconcile::ReconciliationResult;
use crate::store::Paint;

pub const INVENTORY_HEADER: [&str; 5] = ["Brand", "Name", "Type", "Status", "Quantity"];
pub const UNRESOLVED_HEADER: [&str; 2] = ["Missing Paint Name", "Suggestion (if any)"];

/// Write one row per Ambiguous or Missing result; returns the row count
pub fn write_unresolved<'a, W, I>(writer: W, results: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ReconciliationResult>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(UNRESOLVED_HEADER)?;

    let mut rows = 0;
    for result in results
        .into_iter()
        .filter(|r| !matches!(r, ReconciliationResult::Found { .. }))
    {
        csv.write_record([result.name().as_str(), result.suggestion().unwrap_or_default()])?;
        rows += 1;
    }

    csv.flush()?;
    Ok(rows)
}

/// Write the whole inventory, one row per paint in store order
pub fn write_inventory<W: Write>(writer: W, paints: &[Paint]) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(INVENTORY_HEADER)?;

    for paint in paints {
        let quantity = paint.quantity.to_string();
        csv.write_record([
            paint.brand.as_str(),
            paint.name.as_str(),
            paint.paint_type.as_str(),
            paint.status.as_str(),
            quantity.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(paints.len())
}

pub fn export_unresolved<'a, I>(path: &Path, results: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a ReconciliationResult>,
{
    let file = create(path)?;
    let rows = write_unresolved(file, results)
        .with_context(|| format!("writing unresolved names to {}", path.display()))?;
    log::info!("wrote {rows} unresolved names to {}", path.display());
    Ok(rows)
}

pub fn export_inventory(path: &Path, paints: &[Paint]) -> Result<usize> {
    let file = create(path)?;
    let rows = write_inventory(file, paints)
        .with_context(|| format!("writing inventory to {}", path.display()))?;
    log::info!("wrote {rows} paints to {}", path.display());
    Ok(rows)
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating export directory {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("creating {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::CanonicalName;
    use crate::store::{NewPaint, PaintStatus, PaintType};

    #[test]
    fn test_write_unresolved() {
        let results = vec![
            ReconciliationResult::Found {
                name: CanonicalName::new("Abaddon Black"),
            },
            ReconciliationResult::Ambiguous {
                name: CanonicalName::new("Wraithboen"),
                suggestion: "Wraithbone".to_string(),
                score: 0.9,
            },
            ReconciliationResult::Missing {
                name: CanonicalName::new("Khemri Brown"),
            },
        ];

        let mut buf = Vec::new();
        let rows = write_unresolved(&mut buf, &results).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Missing Paint Name,Suggestion (if any)\nWraithboen,Wraithbone\nKhemri Brown,\n"
        );
    }

    #[test]
    fn test_write_inventory() {
        let paint = NewPaint {
            brand: "citadel".to_string(),
            name: "nuln oil".to_string(),
            paint_type: PaintType::Shade,
            status: PaintStatus::Owned,
            quantity: 2,
        }
        .into_paint()
        .unwrap();

        let mut buf = Vec::new();
        write_inventory(&mut buf, &[paint]).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Brand,Name,Type,Status,Quantity\nCitadel,Nuln Oil,Shade,Owned,2\n"
        );
    }

    #[test]
    fn test_export_unresolved_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("missing_paints.csv");
        let results = vec![ReconciliationResult::Missing {
            name: CanonicalName::new("Leadbelcher"),
        }];

        let rows = export_unresolved(&path, &results).unwrap();

        assert_eq!(rows, 1);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("Leadbelcher,\n"));
    }
}
