use crate::{
    grid::{CellType, Grid, GridPos},
    layout::{LayoutDef, TerrainId, TerrainOverlay},
    region::{grid_to_world, PlacementRegion},
    symbols::tokenize_row,
    ObjectKind, PlacementPolicy, WorldMutator,
};

use ilattice3::Point;

/// Places a conduit owned by the map's faction on `cell`, if it is walkable. The world may
/// move the conduit to a free neighbor, so the returned cell can differ from `cell`.
pub fn spawn_conduit<W: WorldMutator + ?Sized>(world: &mut W, cell: &Point) -> Option<Point> {
    if !world.is_walkable(cell) {
        return None;
    }

    let faction = world.governing_faction();
    world.spawn_object(
        ObjectKind::Conduit,
        cell,
        faction.as_ref(),
        PlacementPolicy::DisplaceIfOccupied,
    )
}

/// Paints road terrain for every road cell of `grid`, with grid `(0, 0)` at `anchor`, and
/// lays a conduit on each.
pub fn paint_roads<W: WorldMutator + ?Sized>(
    grid: &Grid,
    anchor: &Point,
    def: &LayoutDef,
    world: &mut W,
) {
    for cell in grid.cells() {
        let terrain = match cell.cell_type {
            CellType::Road => &def.road,
            CellType::MainRoad => &def.main_road,
            _ => continue,
        };
        let p = grid_to_world(anchor, cell.pos);
        world.paint_terrain(&p, terrain);
        spawn_conduit(world, &p);
    }
}

/// Tries a conduit on every perimeter cell so the structure can tie into outside networks.
pub fn spawn_conduits_on_edges<W: WorldMutator + ?Sized>(region: &PlacementRegion, world: &mut W) {
    for p in region.edge_cells().iter() {
        spawn_conduit(world, p);
    }
}

/// Road terrain and conduits for the whole grid, then the perimeter sweep.
pub fn materialize_roads<W: WorldMutator + ?Sized>(
    grid: &Grid,
    region: &PlacementRegion,
    def: &LayoutDef,
    world: &mut W,
) {
    paint_roads(grid, &region.anchor(), def, world);
    spawn_conduits_on_edges(region, world);
}

/// Paints overlay terrain across the region. `.` and blank tokens are skipped, as is anything
/// falling outside the region.
pub fn apply_terrain_overlay<W: WorldMutator + ?Sized>(
    overlay: &TerrainOverlay,
    region: &PlacementRegion,
    world: &mut W,
) {
    for (y, row) in overlay.rows.iter().enumerate() {
        for (x, token) in tokenize_row(row).into_iter().enumerate() {
            if token.is_empty() || token == "." {
                continue;
            }
            let p = region.to_world(GridPos::new(x as i32, y as i32));
            if region.contains(&p) {
                world.paint_terrain(&p, &TerrainId(token));
            }
        }
    }
}
