pub mod context;
pub mod error;
pub mod gen_step;
pub mod graph;
pub mod grid;
pub mod layout;
pub mod materialize;
pub mod region;
pub mod resolver;
pub mod roads;
pub mod sampling;
pub mod symbols;


#[cfg(test)]
mod test_util;

pub use context::GenerationContext;
pub use error::{LayoutError, Result};
pub use gen_step::{GenerationReport, Stage, StructureGenStep};
pub use grid::{Cell, CellType, Grid, GridPos};
pub use layout::{GenerationSettings, LayoutDef, LayoutVariant, TerrainId};
pub use region::PlacementRegion;
pub use resolver::{GenerateRoads, ResolverRegistry, SymbolResolver};

use ilattice3::Point;
use serde::{Deserialize, Serialize};

/// Owner of spawned objects.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Faction(pub String);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ObjectKind {
    /// Links the structure into a surrounding utility network.
    Conduit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum PlacementPolicy {
    /// Move to the nearest free neighbor when the cell is taken.
    DisplaceIfOccupied,
}

/// Implement this to let the generators write into your map.
pub trait WorldMutator {
    fn paint_terrain(&mut self, cell: &Point, terrain: &TerrainId);

    /// Returns where the object actually landed, or `None` if it could not be placed.
    fn spawn_object(
        &mut self,
        kind: ObjectKind,
        cell: &Point,
        faction: Option<&Faction>,
        policy: PlacementPolicy,
    ) -> Option<Point>;

    fn is_walkable(&self, cell: &Point) -> bool;

    /// Faction that owns the map being generated, if any.
    fn governing_faction(&self) -> Option<Faction>;
}

/// The collaborator that paints a room layer's non-road content.
pub trait RoomMaterializer {
    fn materialize_room(
        &mut self,
        room: &Grid,
        region: &PlacementRegion,
        def: &LayoutDef,
        world: &mut dyn WorldMutator,
    );
}
