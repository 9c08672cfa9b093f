use crate::{
    error::{LayoutError, Result},
    grid::{CellType, Grid},
    symbols::build_grid,
};

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

/// Names a terrain type understood by the world collaborator.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TerrainId(pub String);

impl From<&str> for TerrainId {
    fn from(s: &str) -> Self {
        TerrainId(s.to_owned())
    }
}

/// One room layer: rows of symbols, top row = north.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct RoomLayout {
    pub rows: Vec<String>,
}

/// A structure variant. Its room layers share dimensions and are materialized in order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct LayoutVariant {
    pub rooms: Vec<RoomLayout>,
}

impl LayoutVariant {
    pub fn single(rows: Vec<String>) -> Self {
        LayoutVariant {
            rooms: vec![RoomLayout { rows }],
        }
    }
}

/// Rows of terrain tokens painted over the placement region before any room pass. `.` leaves
/// the cell alone.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct TerrainOverlay {
    pub rows: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LayoutDef {
    pub symbols: FnvHashMap<String, CellType>,
    pub variants: Vec<LayoutVariant>,
    #[serde(default)]
    pub terrain_overlay: Option<TerrainOverlay>,
    pub road: TerrainId,
    pub main_road: TerrainId,
    /// Registry names run against the finished structure, in order.
    #[serde(default)]
    pub resolvers: Vec<String>,
}

impl LayoutDef {
    pub fn from_ron_str(s: &str) -> Result<Self> {
        ron::de::from_str(s).map_err(|e| LayoutError::Config(e.to_string()))
    }

    pub fn variant(&self, index: usize) -> Result<&LayoutVariant> {
        self.variants.get(index).ok_or(LayoutError::MissingVariant(index))
    }

    /// Builds one grid per room layer of the variant. Every layer must match the first one's
    /// dimensions.
    pub fn build_variant(&self, index: usize) -> Result<Vec<Grid>> {
        let variant = self.variant(index)?;
        if variant.rooms.is_empty() {
            return Err(LayoutError::EmptyVariant(index));
        }

        let mut grids: Vec<Grid> = Vec::with_capacity(variant.rooms.len());
        for (layer, room) in variant.rooms.iter().enumerate() {
            let grid = build_grid(room.rows.as_slice(), &self.symbols)?;
            if let Some(first) = grids.first() {
                if first.dims() != grid.dims() {
                    return Err(LayoutError::LayerSizeMismatch {
                        layer,
                        expected: first.dims(),
                        found: grid.dims(),
                    });
                }
            }
            grids.push(grid);
        }

        Ok(grids)
    }
}

/// Knobs read from the hosting generation pipeline.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct GenerationSettings {
    /// Log each completed pipeline stage at info level.
    #[serde(default)]
    pub verbose: bool,
}

impl GenerationSettings {
    pub fn from_ron_str(s: &str) -> Result<Self> {
        ron::de::from_str(s).map_err(|e| LayoutError::Config(e.to_string()))
    }
}
