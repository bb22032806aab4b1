use std::path::Path;

use anyhow::{Context, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::weight::Weighted;

/// A dashboard tile: a coin, collection or sector with the raw magnitude it
/// is sized by and the change figure renderers color it by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub label: CompactString,
    /// Raw size figure (market cap, volume, ...) before any transform
    pub magnitude: f64,
    /// Percent change over the dashboard's window, if known
    #[serde(default, alias = "change", skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
    /// Image URL for image-filled tiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Sign of a tile's change figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
    Unknown,
}

impl Tile {
    pub fn new(label: &str, magnitude: f64) -> Self {
        Self {
            label: CompactString::new(label),
            magnitude,
            change_pct: None,
            image: None,
        }
    }

    pub fn with_change(mut self, change_pct: f64) -> Self {
        self.change_pct = Some(change_pct);
        self
    }

    pub fn change_direction(&self) -> Direction {
        match self.change_pct {
            Some(c) if c > 0.0 => Direction::Up,
            Some(c) if c < 0.0 => Direction::Down,
            Some(c) if c == 0.0 => Direction::Flat,
            _ => Direction::Unknown,
        }
    }
}

impl Weighted for Tile {
    fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

/// A small fixed market snapshot, for diagnostics when no tile file is given.
pub fn sample_tiles() -> Vec<Tile> {
    vec![
        Tile::new("BTC", 1.21e12).with_change(1.8),
        Tile::new("ETH", 4.05e11).with_change(-0.6),
        Tile::new("USDT", 1.10e11).with_change(0.0),
        Tile::new("BNB", 8.70e10).with_change(2.9),
        Tile::new("SOL", 6.40e10).with_change(-4.2),
        Tile::new("XRP", 3.10e10).with_change(0.4),
        Tile::new("USDC", 3.20e10).with_change(0.0),
        Tile::new("ADA", 1.60e10).with_change(-1.1),
        Tile::new("DOGE", 1.40e10).with_change(6.3),
        Tile::new("AVAX", 1.30e10).with_change(-2.7),
        Tile::new("DOT", 9.00e9).with_change(0.9),
        Tile::new("LINK", 8.50e9),
    ]
}

/// Parse a JSON array of tiles.
pub fn parse_tiles(json: &str) -> Result<Vec<Tile>> {
    let tiles: Vec<Tile> = serde_json::from_str(json).context("Invalid tile JSON")?;
    tracing::debug!("Parsed {} tiles", tiles.len());
    Ok(tiles)
}

/// Load a JSON array of tiles from disk.
pub fn load_tiles(path: &Path) -> Result<Vec<Tile>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tile file {}", path.display()))?;
    parse_tiles(&json).with_context(|| format!("Failed to load tiles from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::validate::validate;
    use crate::layout::{layout_with_config, LayoutConfig, Viewport};
    use crate::weight::{weighted_refs, WeightTransform};
    use std::io::Write;

    #[test]
    fn parses_optional_fields() {
        let tiles = parse_tiles(
            r#"[
                {"label": "BTC", "magnitude": 1.2e12, "change": 2.5, "image": "btc.png"},
                {"label": "DOGE", "magnitude": 1.0e10}
            ]"#,
        )
        .unwrap();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].change_pct, Some(2.5));
        assert_eq!(tiles[0].image.as_deref(), Some("btc.png"));
        assert_eq!(tiles[1].change_direction(), Direction::Unknown);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_tiles(r#"[{"label": "X"}]"#).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid tile JSON"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"label": "ETH", "magnitude": 4.0e11, "change_pct": -1.0}}]"#).unwrap();
        let tiles = load_tiles(file.path()).unwrap();
        assert_eq!(tiles, vec![Tile::new("ETH", 4.0e11).with_change(-1.0)]);
        assert_eq!(tiles[0].change_direction(), Direction::Down);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_tiles(&path).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }

    #[test]
    fn sample_snapshot_tiles_a_dashboard() {
        let tiles = sample_tiles();
        let items = weighted_refs(&tiles, WeightTransform::Sqrt);
        let viewport = Viewport::new(1200.0, 600.0);
        let placements = layout_with_config(items, viewport, &LayoutConfig::default());
        assert_eq!(placements.len(), 12);
        assert_eq!(placements[0].payload.label.as_str(), "BTC");
        assert!(validate(&placements, viewport).is_exact_tiling());
    }

    #[test]
    fn directions() {
        assert_eq!(Tile::new("a", 1.0).with_change(0.1).change_direction(), Direction::Up);
        assert_eq!(Tile::new("a", 1.0).with_change(0.0).change_direction(), Direction::Flat);
        assert_eq!(Tile::new("a", 1.0).with_change(f64::NAN).change_direction(), Direction::Unknown);
    }
}
