//! Paint inventory store
//!
//! The inventory is a single JSON document holding every paint record.
//! It lives at XDG_DATA_HOME/paintbox/paints.json unless overridden.
//!
//! Records are keyed by their canonical (brand, name) pair.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Current document layout version
pub const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PaintType {
    Base,
    Layer,
    Shade,
    Contrast,
    Technical,
    Dry,
    Texture,
    Airbrush,
}

impl PaintType {
    pub fn as_str(self) -> &'static str {
        match self {
            PaintType::Base => "Base",
            PaintType::Layer => "Layer",
            PaintType::Shade => "Shade",
            PaintType::Contrast => "Contrast",
            PaintType::Technical => "Technical",
            PaintType::Dry => "Dry",
            PaintType::Texture => "Texture",
            PaintType::Airbrush => "Airbrush",
        }
    }
}

impl fmt::Display for PaintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PaintStatus {
    Owned,
    Empty,
    Wishlist,
}

impl PaintStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaintStatus::Owned => "Owned",
            PaintStatus::Empty => "Empty",
            PaintStatus::Wishlist => "Wishlist",
        }
    }
}

impl fmt::Display for PaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored paint record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub brand: String,
    pub name: String,
    #[serde(rename = "type")]
    pub paint_type: PaintType,
    pub status: PaintStatus,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Paint {
    /// Value of a filterable field
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Brand => &self.brand,
            Field::Name => &self.name,
            Field::Type => self.paint_type.as_str(),
            Field::Status => self.status.as_str(),
        }
    }

    fn is_same(&self, brand: &str, name: &str) -> bool {
        self.brand == brand && self.name == name
    }
}

/// Input for adding or updating a paint
#[derive(Debug, Clone)]
pub struct NewPaint {
    pub brand: String,
    pub name: String,
    pub paint_type: PaintType,
    pub status: PaintStatus,
    pub quantity: u32,
}

impl NewPaint {
    /// Normalize brand and name and stamp a fresh record
    pub fn into_paint(self) -> Result<Paint> {
        let brand = normalize(&self.brand);
        let name = normalize(&self.name);
        if brand.is_empty() || name.is_empty() {
            bail!("brand and name are required");
        }

        let now = Utc::now();
        Ok(Paint {
            brand,
            name,
            paint_type: self.paint_type,
            status: self.status,
            quantity: self.quantity,
            added_at: now,
            updated_at: now,
        })
    }
}

/// What an upsert did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Upsert {
    Added { name: String, quantity: u32 },
    Updated { name: String, quantity: u32 },
}

/// Filterable record fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Field {
    Brand,
    #[default]
    Name,
    Type,
    Status,
}

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Brand,
    Name,
    Type,
    Status,
    Quantity,
}

/// On-disk inventory document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryFile {
    pub version: u32,
    pub updated_at: Option<DateTime<Utc>>,
    pub paints: Vec<Paint>,
}

impl Default for InventoryFile {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            updated_at: None,
            paints: Vec::new(),
        }
    }
}

/// The paint inventory backed by a JSON document file
#[derive(Debug)]
pub struct Inventory {
    path: PathBuf,
    file: InventoryFile,
}

impl Inventory {
    /// Open the inventory at `path`; a missing file is an empty inventory
    pub fn open(path: &Path) -> Result<Self> {
        let file = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading inventory {}", path.display()))?;
            let file: InventoryFile = serde_json::from_str(&content)
                .with_context(|| format!("parsing inventory {}", path.display()))?;
            if file.version > STORE_VERSION {
                bail!(
                    "inventory {} has version {}, newer than supported {}",
                    path.display(),
                    file.version,
                    STORE_VERSION
                );
            }
            file
        } else {
            log::debug!("No inventory at {}, starting empty", path.display());
            InventoryFile::default()
        };

        log::debug!("Loaded {} paints from {}", file.paints.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Save the inventory to disk
    pub fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating store directory {}", parent.display()))?;
        }

        self.file.updated_at = Some(Utc::now());
        let content = serde_json::to_string_pretty(&self.file)?;
        fs::write(&self.path, content)
            .with_context(|| format!("writing inventory to {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All paints in store order
    pub fn paints(&self) -> &[Paint] {
        &self.file.paints
    }

    /// Add a paint, or update status and type and add to the quantity of an
    /// existing one with the same brand and name
    pub fn upsert(&mut self, new: NewPaint) -> Result<Upsert> {
        let paint = new.into_paint()?;

        if let Some(existing) = self
            .file
            .paints
            .iter_mut()
            .find(|p| p.is_same(&paint.brand, &paint.name))
        {
            let quantity = existing
                .quantity
                .checked_add(paint.quantity)
                .ok_or_else(|| anyhow!("quantity overflow for {}", existing.name))?;
            existing.quantity = quantity;
            existing.status = paint.status;
            existing.paint_type = paint.paint_type;
            existing.updated_at = paint.updated_at;

            log::info!("Updated {} {} to {}", existing.brand, existing.name, existing.quantity);
            return Ok(Upsert::Updated {
                name: existing.name.clone(),
                quantity: existing.quantity,
            });
        }

        log::info!("Added {} {}", paint.brand, paint.name);
        let outcome = Upsert::Added {
            name: paint.name.clone(),
            quantity: paint.quantity,
        };
        self.file.paints.push(paint);
        Ok(outcome)
    }

    /// Paints whose `field` starts with `value`, ignoring case
    ///
    /// The value is normalized first; an empty value matches everything.
    pub fn filter(&self, field: Field, value: &str) -> Vec<&Paint> {
        let prefix = normalize(value).to_lowercase();
        self.file
            .paints
            .iter()
            .filter(|p| p.field(field).to_lowercase().starts_with(&prefix))
            .collect()
    }

    /// Snapshot of every paint name, for reconciliation
    pub fn names(&self) -> Vec<String> {
        self.file.paints.iter().map(|p| p.name.clone()).collect()
    }
}

/// Sort paints by a column; quantity sorts numerically, the rest by text
/// ignoring case
pub fn sort_paints(paints: &mut [&Paint], key: SortKey, descending: bool) {
    paints.sort_by(|a, b| {
        let ord = match key {
            SortKey::Quantity => a.quantity.cmp(&b.quantity),
            SortKey::Brand => cmp_text(&a.brand, &b.brand),
            SortKey::Name => cmp_text(&a.name, &b.name),
            SortKey::Type => cmp_text(a.paint_type.as_str(), b.paint_type.as_str()),
            SortKey::Status => cmp_text(a.status.as_str(), b.status.as_str()),
        };
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

fn cmp_text(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Get the default data directory path
pub fn data_dir() -> Result<PathBuf> {
    // Check XDG_DATA_HOME first
    if let Some(dir) = env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir).join(APP_NAME));
    }

    // Use platform-specific data directory
    if let Some(mut dir) = dirs::data_dir() {
        dir.push(APP_NAME);
        return Ok(dir);
    }

    // Fallback to ~/.local/share
    dirs::home_dir()
        .map(|home| home.join(".local").join("share").join(APP_NAME))
        .ok_or_else(|| anyhow!("unable to determine data directory"))
}

/// Default inventory file location
pub fn default_store_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("paints.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_paint(brand: &str, name: &str, quantity: u32) -> NewPaint {
        NewPaint {
            brand: brand.to_string(),
            name: name.to_string(),
            paint_type: PaintType::Base,
            status: PaintStatus::Owned,
            quantity,
        }
    }

    fn sample_inventory() -> Inventory {
        let mut inv = Inventory {
            path: PathBuf::from("unused.json"),
            file: InventoryFile::default(),
        };
        inv.upsert(new_paint("Citadel", "Abaddon Black", 2)).unwrap();
        inv.upsert(new_paint("Vallejo", "Black", 10)).unwrap();
        inv.upsert(new_paint("Citadel", "Mephiston Red", 1)).unwrap();
        inv.upsert(NewPaint {
            paint_type: PaintType::Shade,
            status: PaintStatus::Wishlist,
            ..new_paint("Army Painter", "Dark Tone", 0)
        })
        .unwrap();
        inv
    }

    #[test]
    fn test_upsert_adds_normalized() {
        let mut inv = Inventory {
            path: PathBuf::from("unused.json"),
            file: InventoryFile::default(),
        };
        let outcome = inv.upsert(new_paint("  citadel ", "nuln   OIL", 1)).unwrap();

        assert_eq!(
            outcome,
            Upsert::Added {
                name: "Nuln Oil".to_string(),
                quantity: 1
            }
        );
        assert_eq!(inv.paints()[0].brand, "Citadel");
    }

    #[test]
    fn test_upsert_updates_existing() {
        let mut inv = sample_inventory();
        let outcome = inv
            .upsert(NewPaint {
                paint_type: PaintType::Layer,
                status: PaintStatus::Empty,
                ..new_paint("citadel", "abaddon black", 3)
            })
            .unwrap();

        assert_eq!(
            outcome,
            Upsert::Updated {
                name: "Abaddon Black".to_string(),
                quantity: 5
            }
        );
        assert_eq!(inv.paints().len(), 4);
        let paint = &inv.paints()[0];
        assert_eq!(paint.paint_type, PaintType::Layer);
        assert_eq!(paint.status, PaintStatus::Empty);
    }

    #[test]
    fn test_upsert_same_name_other_brand_is_new() {
        let mut inv = sample_inventory();
        let outcome = inv.upsert(new_paint("Vallejo", "Abaddon Black", 1)).unwrap();
        assert!(matches!(outcome, Upsert::Added { .. }));
        assert_eq!(inv.paints().len(), 5);
    }

    #[test]
    fn test_upsert_requires_brand_and_name() {
        let mut inv = sample_inventory();
        assert!(inv.upsert(new_paint("   ", "Wraithbone", 1)).is_err());
        assert!(inv.upsert(new_paint("Citadel", "", 1)).is_err());
        assert_eq!(inv.paints().len(), 4);
    }

    #[test]
    fn test_upsert_quantity_overflow() {
        let mut inv = sample_inventory();
        let err = inv.upsert(new_paint("Citadel", "Abaddon Black", u32::MAX)).unwrap_err();
        assert!(err.to_string().contains("overflow"));
        assert_eq!(inv.paints()[0].quantity, 2);
    }

    #[test]
    fn test_filter_prefix_ignores_case() {
        let inv = sample_inventory();

        let by_name: Vec<&str> = inv
            .filter(Field::Name, "  abaddon")
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(by_name, vec!["Abaddon Black"]);

        assert_eq!(inv.filter(Field::Brand, "CITA").len(), 2);
        assert_eq!(inv.filter(Field::Type, "shade").len(), 1);
        assert_eq!(inv.filter(Field::Status, "wish").len(), 1);
        assert_eq!(inv.filter(Field::Name, "black").len(), 1);
        assert_eq!(inv.filter(Field::Name, "").len(), 4);
    }

    #[test]
    fn test_sort_quantity_numeric() {
        let inv = sample_inventory();
        let mut paints: Vec<&Paint> = inv.paints().iter().collect();

        sort_paints(&mut paints, SortKey::Quantity, false);
        let quantities: Vec<u32> = paints.iter().map(|p| p.quantity).collect();
        assert_eq!(quantities, vec![0, 1, 2, 10]);

        sort_paints(&mut paints, SortKey::Brand, true);
        assert_eq!(paints[0].brand, "Vallejo");
        assert_eq!(paints[3].brand, "Army Painter");
    }

    #[test]
    fn test_names_snapshot() {
        let inv = sample_inventory();
        assert_eq!(
            inv.names(),
            vec!["Abaddon Black", "Black", "Mephiston Red", "Dark Tone"]
        );
    }

    #[test]
    fn test_save_and_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("paints.json");

        let mut inv = Inventory::open(&path).unwrap();
        assert!(inv.paints().is_empty());
        inv.upsert(new_paint("Citadel", "Wraithbone", 1)).unwrap();
        inv.save().unwrap();

        let reopened = Inventory::open(&path).unwrap();
        assert_eq!(reopened.paints(), inv.paints());
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"type\": \"Base\""));
    }

    #[test]
    fn test_open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paints.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Inventory::open(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing inventory"));
    }

    #[test]
    fn test_default_store_path() {
        let path = default_store_path().unwrap();
        assert!(path.to_string_lossy().contains("paintbox"));
        assert!(path.ends_with("paints.json"));
    }
}
