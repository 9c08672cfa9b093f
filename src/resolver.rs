use crate::{
    context::GenerationContext,
    error::{LayoutError, Result},
    materialize::{paint_roads, spawn_conduits_on_edges},
    roads::{carve_roads, prune_doors, RoadNetwork},
    WorldMutator,
};

use fnv::FnvHashMap;

/// A generation behavior that can be run against a live context by name.
pub trait SymbolResolver {
    fn resolve(&self, ctx: &mut GenerationContext, world: &mut dyn WorldMutator);
}

/// Stitches the context's road network straight into its region: prune doors, carve roads,
/// paint them, then sweep the region edge with conduits.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenerateRoads;

impl GenerateRoads {
    pub const NAME: &'static str = "generate_road";

    pub fn run<W: WorldMutator + ?Sized>(
        &self,
        ctx: &mut GenerationContext,
        world: &mut W,
    ) -> RoadNetwork {
        let pruned = prune_doors(&ctx.grid, &mut ctx.doors);
        log::debug!("Pruned {} doors with no exit", pruned);

        let network = carve_roads(&mut ctx.grid, &ctx.doors);

        paint_roads(&ctx.grid, &ctx.region.anchor(), ctx.def, world);
        spawn_conduits_on_edges(&ctx.region, world);

        network
    }
}

impl SymbolResolver for GenerateRoads {
    fn resolve(&self, ctx: &mut GenerationContext, world: &mut dyn WorldMutator) {
        self.run(ctx, world);
    }
}

/// Maps resolver names to behaviors. New behaviors register here instead of being matched on
/// by the driver.
pub struct ResolverRegistry {
    resolvers: FnvHashMap<String, Box<dyn SymbolResolver>>,
}

impl ResolverRegistry {
    pub fn empty() -> Self {
        ResolverRegistry {
            resolvers: FnvHashMap::default(),
        }
    }

    /// Replaces any resolver already registered under `name`.
    pub fn register(&mut self, name: impl Into<String>, resolver: Box<dyn SymbolResolver>) {
        self.resolvers.insert(name.into(), resolver);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    pub fn resolve(
        &self,
        name: &str,
        ctx: &mut GenerationContext,
        world: &mut dyn WorldMutator,
    ) -> Result<()> {
        let resolver = self
            .resolvers
            .get(name)
            .ok_or_else(|| LayoutError::UnknownResolver(name.to_owned()))?;
        resolver.resolve(ctx, world);

        Ok(())
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(GenerateRoads::NAME, Box::new(GenerateRoads));

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::{CellType, GridPos},
        layout::LayoutVariant,
        region::PlacementRegion,
        test_util::{test_def, MockWorld},
    };

    use ilattice3::Point;
    use std::cell::Cell;
    use std::rc::Rc;

    fn road_def() -> crate::LayoutDef {
        let mut def = test_def();
        def.variants = vec![LayoutVariant::single(
            vec!["#####", "#D#D#", "#.#.#", "#####", "#D###"]
                .into_iter()
                .map(String::from)
                .collect(),
        )];

        def
    }

    #[test]
    fn test_generate_roads_end_to_end() {
        let def = road_def();
        let region = PlacementRegion::from_min_and_size(100, 200, 5, 5);
        let mut ctx = GenerationContext::for_variant(&def, 0, region).unwrap();
        let mut world = MockWorld::default();

        let network = GenerateRoads.run(&mut ctx, &mut world);

        // The two upper doors only open into sealed pockets; the bottom one is on the edge.
        assert_eq!(ctx.doors.len(), 3);
        assert_eq!(network.connected, vec![GridPos::new(1, 4)]);
        assert_eq!(network.disconnected.len(), 2);
        assert_eq!(ctx.grid.cell(1, 2), CellType::None);
        assert!(world.painted().is_empty());
        assert_eq!(world.spawned().len(), region.edge_cells().len());
    }

    #[test]
    fn test_generate_roads_paints_carved_cells_at_region_anchor() {
        let mut def = test_def();
        def.variants = vec![LayoutVariant::single(
            vec!["###", "#D#", "#.#"].into_iter().map(String::from).collect(),
        )];
        let region = PlacementRegion::from_min_and_size(10, 20, 3, 3);
        let mut ctx = GenerationContext::for_variant(&def, 0, region).unwrap();
        let mut world = MockWorld::default();

        GenerateRoads.run(&mut ctx, &mut world);

        assert_eq!(ctx.grid.cell(1, 2), CellType::MainRoad);
        // Grid (1, 2) sits two rows south of the north-west anchor (10, 0, 22).
        assert_eq!(
            world.painted(),
            vec![(Point::from([11, 0, 20]), def.main_road.clone())]
        );
        // The road cell is on the edge too, so its second conduit gets displaced.
        assert_eq!(world.spawned().len(), 1 + region.edge_cells().len());
    }

    struct Counting(Rc<Cell<usize>>);

    impl SymbolResolver for Counting {
        fn resolve(&self, ctx: &mut GenerationContext, _world: &mut dyn WorldMutator) {
            self.0.set(self.0.get() + 1);
            ctx.doors.clear();
        }
    }

    #[test]
    fn test_registry_dispatch() {
        let def = test_def();
        let region = PlacementRegion::from_min_and_size(0, 0, 3, 3);
        let mut ctx = GenerationContext::for_variant(&def, 0, region).unwrap();
        let mut world = MockWorld::default();

        let count = Rc::new(Cell::new(0));
        let mut registry = ResolverRegistry::default();
        assert!(registry.contains(GenerateRoads::NAME));
        registry.register("count", Box::new(Counting(count.clone())));

        registry.resolve("count", &mut ctx, &mut world).unwrap();
        registry.resolve("count", &mut ctx, &mut world).unwrap();
        assert_eq!(count.get(), 2);

        assert_eq!(
            registry.resolve("missing", &mut ctx, &mut world),
            Err(LayoutError::UnknownResolver("missing".to_owned()))
        );
    }
}
