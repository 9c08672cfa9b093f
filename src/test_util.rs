use crate::{
    grid::Grid,
    layout::{LayoutDef, LayoutVariant, TerrainId},
    region::PlacementRegion,
    Faction, ObjectKind, PlacementPolicy, RoomMaterializer, WorldMutator,
};

use fnv::FnvHashMap;
use ilattice3::Point;

#[derive(Clone, Debug, PartialEq)]
pub enum WorldOp {
    Paint {
        cell: Point,
        terrain: TerrainId,
    },
    Spawn {
        kind: ObjectKind,
        requested: Point,
        placed: Point,
        faction: Option<String>,
    },
}

/// Records every mutation. Displaced objects slide east until they find a free cell.
#[derive(Default)]
pub struct MockWorld {
    pub ops: Vec<WorldOp>,
    pub blocked: Vec<Point>,
    pub occupied: Vec<Point>,
    pub faction: Option<Faction>,
}

impl MockWorld {
    pub fn painted(&self) -> Vec<(Point, TerrainId)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                WorldOp::Paint { cell, terrain } => Some((*cell, terrain.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn spawned(&self) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                WorldOp::Spawn { placed, .. } => Some(*placed),
                _ => None,
            })
            .collect()
    }
}

impl WorldMutator for MockWorld {
    fn paint_terrain(&mut self, cell: &Point, terrain: &TerrainId) {
        self.ops.push(WorldOp::Paint {
            cell: *cell,
            terrain: terrain.clone(),
        });
    }

    fn spawn_object(
        &mut self,
        kind: ObjectKind,
        cell: &Point,
        faction: Option<&Faction>,
        policy: PlacementPolicy,
    ) -> Option<Point> {
        assert_eq!(policy, PlacementPolicy::DisplaceIfOccupied);
        let step: Point = [1, 0, 0].into();
        let mut placed = *cell;
        while self.occupied.contains(&placed) {
            placed = placed + step;
        }
        self.occupied.push(placed);
        self.ops.push(WorldOp::Spawn {
            kind,
            requested: *cell,
            placed,
            faction: faction.map(|f| f.0.clone()),
        });

        Some(placed)
    }

    fn is_walkable(&self, cell: &Point) -> bool {
        !self.blocked.contains(cell)
    }

    fn governing_faction(&self) -> Option<Faction> {
        self.faction.clone()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomCall {
    pub dims: (usize, usize),
    pub region: PlacementRegion,
}

/// Remembers each call and paints a `room<N>` marker on the region anchor, so tests can see
/// the order of writes in the world log.
#[derive(Default)]
pub struct RecordingRooms {
    pub calls: Vec<RoomCall>,
}

impl RoomMaterializer for RecordingRooms {
    fn materialize_room(
        &mut self,
        room: &Grid,
        region: &PlacementRegion,
        _def: &LayoutDef,
        world: &mut dyn WorldMutator,
    ) {
        let marker = TerrainId(format!("room{}", self.calls.len()));
        world.paint_terrain(&region.anchor(), &marker);
        self.calls.push(RoomCall {
            dims: room.dims(),
            region: *region,
        });
    }
}

pub fn test_def() -> LayoutDef {
    let mut symbols = FnvHashMap::default();
    symbols.insert("#".to_owned(), crate::CellType::Room);
    symbols.insert(".".to_owned(), crate::CellType::None);
    symbols.insert("D".to_owned(), crate::CellType::Door);

    LayoutDef {
        symbols,
        variants: vec![LayoutVariant::single(vec![
            "###".to_owned(),
            "#.#".to_owned(),
            "###".to_owned(),
        ])],
        terrain_overlay: None,
        road: TerrainId::from("Gravel"),
        main_road: TerrainId::from("Concrete"),
        resolvers: Vec::new(),
    }
}
