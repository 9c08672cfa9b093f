use crate::{
    error::{LayoutError, Result},
    grid::{Grid, GridPos},
    layout::LayoutDef,
    region::PlacementRegion,
};

/// Mutable state for one structure generation. Built by the invocation that owns it and lent to
/// each resolver in turn; it never outlives that invocation.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    pub def: &'a LayoutDef,
    pub grid: Grid,
    /// Door cells of `grid`. Resolvers may drop entries but never add them.
    pub doors: Vec<GridPos>,
    pub region: PlacementRegion,
}

impl<'a> GenerationContext<'a> {
    pub fn new(def: &'a LayoutDef, grid: Grid, region: PlacementRegion) -> Self {
        let doors = grid.doors();

        GenerationContext {
            def,
            grid,
            doors,
            region,
        }
    }

    /// Context for the first room layer of `variant`, stamped into `region`.
    pub fn for_variant(
        def: &'a LayoutDef,
        variant: usize,
        region: PlacementRegion,
    ) -> Result<Self> {
        let grid = def
            .build_variant(variant)?
            .into_iter()
            .next()
            .ok_or(LayoutError::EmptyVariant(variant))?;

        Ok(Self::new(def, grid, region))
    }
}
