//! Load rule tables from TOML files
//!
//! Tables ship with compiled-in defaults; loading replaces a table wholesale.
//! Format per table:
//!
//! ```toml
//! [[movement]]
//! id = "root-whisper"
//! name = "Root Whisper"
//! start = "01-15"
//! end = "03-15"
//! allowed = ["garlic"]
//! blocked = ["watermelon"]
//! block_message = "The soil still sleeps."
//!
//! [[dependency]]
//! id = "root-sustain"
//! source = 396
//! target = 528        # or "all"
//! template = "{source} off pitch ({value} of {threshold})"
//!
//! [[recipe]]
//! band = 528
//! role = "third"
//! crop = "Basil"
//! ```

use std::fs;
use std::path::Path;

use crate::beds::chord::ChordRole;
use crate::core::error::{AlmanacError, Result};
use crate::core::types::{FrequencyBand, MonthDay};
use crate::rules::dependencies::{DependencyTable, HarmonicDependency, ZoneTarget};
use crate::rules::movements::{MovementTable, SeasonalMovement};
use crate::rules::recipes::{RecipeEntry, RecipeTable};

/// Load a movement table from a TOML file
pub fn load_movements(path: &Path) -> Result<MovementTable> {
    let content = fs::read_to_string(path)?;
    parse_movements(&content).map_err(AlmanacError::RuleTable)
}

/// Load a dependency table from a TOML file
pub fn load_dependencies(path: &Path) -> Result<DependencyTable> {
    let content = fs::read_to_string(path)?;
    parse_dependencies(&content).map_err(AlmanacError::RuleTable)
}

/// Load a recipe table from a TOML file
pub fn load_recipes(path: &Path) -> Result<RecipeTable> {
    let content = fs::read_to_string(path)?;
    parse_recipes(&content).map_err(AlmanacError::RuleTable)
}

pub(crate) fn parse_movements(content: &str) -> std::result::Result<MovementTable, String> {
    let toml: toml::Value = content
        .parse()
        .map_err(|e| format!("Invalid TOML: {}", e))?;

    let mut movements = Vec::new();
    if let Some(entries) = toml.get("movement").and_then(|v| v.as_array()) {
        for (i, entry) in entries.iter().enumerate() {
            let table = entry
                .as_table()
                .ok_or_else(|| format!("movement[{}] is not a table", i))?;

            let id = str_field(table, "id", i)?;
            let name = str_field(table, "name", i)?;
            let start = parse_month_day(&str_field(table, "start", i)?)?;
            let end = parse_month_day(&str_field(table, "end", i)?)?;
            let block_message = str_field(table, "block_message", i)?;

            movements.push(SeasonalMovement {
                id,
                name,
                start,
                end,
                allowed_crops: str_list(table, "allowed"),
                blocked_crops: str_list(table, "blocked"),
                block_message,
            });
        }
    }

    if movements.is_empty() {
        return Err("no [[movement]] entries found".into());
    }
    Ok(MovementTable::new(movements))
}

pub(crate) fn parse_dependencies(content: &str) -> std::result::Result<DependencyTable, String> {
    let toml: toml::Value = content
        .parse()
        .map_err(|e| format!("Invalid TOML: {}", e))?;

    let mut rules = Vec::new();
    if let Some(entries) = toml.get("dependency").and_then(|v| v.as_array()) {
        for (i, entry) in entries.iter().enumerate() {
            let table = entry
                .as_table()
                .ok_or_else(|| format!("dependency[{}] is not a table", i))?;

            let source = table
                .get("source")
                .and_then(|v| v.as_integer())
                .ok_or_else(|| format!("dependency[{}]: missing integer 'source'", i))?;

            let target = match table.get("target") {
                Some(v) if v.as_str() == Some("all") => ZoneTarget::All,
                Some(v) => v
                    .as_integer()
                    .map(|n| ZoneTarget::Zone(FrequencyBand(n as u16)))
                    .ok_or_else(|| {
                        format!("dependency[{}]: 'target' must be a band or \"all\"", i)
                    })?,
                None => return Err(format!("dependency[{}]: missing 'target'", i)),
            };

            rules.push(HarmonicDependency {
                id: str_field(table, "id", i)?,
                name: table
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                rule: table
                    .get("rule")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                source_zone: FrequencyBand(source as u16),
                target_zone: target,
                alert_template: str_field(table, "template", i)?,
                trigger_event: table
                    .get("event")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
            });
        }
    }

    Ok(DependencyTable::new(rules))
}

pub(crate) fn parse_recipes(content: &str) -> std::result::Result<RecipeTable, String> {
    let toml: toml::Value = content
        .parse()
        .map_err(|e| format!("Invalid TOML: {}", e))?;

    let mut recipes: ahash::AHashMap<FrequencyBand, Vec<RecipeEntry>> = ahash::AHashMap::new();
    if let Some(entries) = toml.get("recipe").and_then(|v| v.as_array()) {
        for (i, entry) in entries.iter().enumerate() {
            let table = entry
                .as_table()
                .ok_or_else(|| format!("recipe[{}] is not a table", i))?;

            let band = table
                .get("band")
                .and_then(|v| v.as_integer())
                .ok_or_else(|| format!("recipe[{}]: missing integer 'band'", i))?;
            let role = parse_role(&str_field(table, "role", i)?)
                .ok_or_else(|| format!("recipe[{}]: unknown role", i))?;

            recipes
                .entry(FrequencyBand(band as u16))
                .or_default()
                .push(RecipeEntry {
                    role,
                    crop: str_field(table, "crop", i)?,
                });
        }
    }

    Ok(RecipeTable::new(recipes))
}

fn str_field(
    table: &toml::value::Table,
    key: &str,
    index: usize,
) -> std::result::Result<String, String> {
    table
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| format!("entry[{}]: missing string '{}'", index, key))
}

fn str_list(table: &toml::value::Table, key: &str) -> Vec<String> {
    table
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn parse_month_day(s: &str) -> std::result::Result<MonthDay, String> {
    let (month, day) = s
        .split_once('-')
        .ok_or_else(|| format!("bad month-day '{}', expected MM-DD", s))?;
    let month: u32 = month
        .parse()
        .map_err(|_| format!("bad month in '{}'", s))?;
    let day: u32 = day.parse().map_err(|_| format!("bad day in '{}'", s))?;
    MonthDay::new(month, day).map_err(|e| e.to_string())
}

fn parse_role(s: &str) -> Option<ChordRole> {
    match s.to_lowercase().as_str() {
        "root" => Some(ChordRole::Root),
        "third" => Some(ChordRole::Third),
        "fifth" => Some(ChordRole::Fifth),
        "seventh" => Some(ChordRole::Seventh),
        _ => None,
    }
}
