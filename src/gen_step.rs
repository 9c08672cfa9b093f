use crate::{
    context::GenerationContext,
    error::{LayoutError, Result},
    layout::{GenerationSettings, LayoutDef},
    materialize::apply_terrain_overlay,
    region::PlacementRegion,
    resolver::ResolverRegistry,
    sampling::{choose_index, seed_for_step, small_rng},
    RoomMaterializer, WorldMutator,
};

use ilattice3::Point;
use rand::Rng;

/// Stages write straight into the world in this order, so later ones win where they overlap.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Stage {
    TerrainOverlay,
    Room(usize),
    Resolver(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationReport {
    pub variant: usize,
    pub region: PlacementRegion,
    /// Stages in the order they ran.
    pub stages: Vec<Stage>,
}

pub struct StructureGenStep {
    pub def: LayoutDef,
    pub settings: GenerationSettings,
    registry: ResolverRegistry,
}

impl StructureGenStep {
    /// Distinguishes this step's random stream from other steps sharing the world seed.
    pub const SEED_PART: u64 = 916_516_155;

    pub fn new(def: LayoutDef, settings: GenerationSettings) -> Self {
        Self::with_registry(def, settings, ResolverRegistry::default())
    }

    pub fn with_registry(
        def: LayoutDef,
        settings: GenerationSettings,
        registry: ResolverRegistry,
    ) -> Self {
        StructureGenStep {
            def,
            settings,
            registry,
        }
    }

    /// The stages a variant with `num_rooms` room layers will run, in order.
    pub fn plan(&self, num_rooms: usize) -> Vec<Stage> {
        let mut stages = Vec::new();
        if self.def.terrain_overlay.is_some() {
            stages.push(Stage::TerrainOverlay);
        }
        stages.extend((0..num_rooms).map(Stage::Room));
        stages.extend(self.def.resolvers.iter().cloned().map(Stage::Resolver));

        stages
    }

    /// Generates with an rng derived from `world_seed`, so the same seed always picks the same
    /// variant.
    pub fn generate_seeded<W: WorldMutator>(
        &self,
        world_seed: u64,
        center: &Point,
        world: &mut W,
        rooms: &mut impl RoomMaterializer,
    ) -> Result<GenerationReport> {
        let mut rng = small_rng(seed_for_step(world_seed, Self::SEED_PART));

        self.generate(center, world, rooms, &mut rng)
    }

    /// Places one variant of the layout centered on `center`. Nothing is written to the world if
    /// the chosen variant is malformed or names an unregistered resolver.
    pub fn generate<W: WorldMutator>(
        &self,
        center: &Point,
        world: &mut W,
        rooms: &mut impl RoomMaterializer,
        rng: &mut impl Rng,
    ) -> Result<GenerationReport> {
        let variant =
            choose_index(rng, self.def.variants.len()).ok_or(LayoutError::NoVariants)?;
        let grids = self.def.build_variant(variant)?;
        let (width, height) = grids
            .first()
            .map(|g| g.dims())
            .ok_or(LayoutError::EmptyVariant(variant))?;
        for name in self.def.resolvers.iter() {
            if !self.registry.contains(name) {
                return Err(LayoutError::UnknownResolver(name.clone()));
            }
        }

        let region = PlacementRegion::centered_on(center, width, height);
        log::debug!(
            "Placing variant {} ({}x{}) at {:?}",
            variant,
            width,
            height,
            region.anchor()
        );

        let stages = self.plan(grids.len());
        let mut ctx: Option<GenerationContext> = None;
        for stage in stages.iter() {
            match stage {
                Stage::TerrainOverlay => {
                    if let Some(overlay) = self.def.terrain_overlay.as_ref() {
                        apply_terrain_overlay(overlay, &region, world);
                    }
                    if self.settings.verbose {
                        log::info!("Terrain generation - PASS");
                    }
                }
                Stage::Room(i) => {
                    rooms.materialize_room(&grids[*i], &region, &self.def, world);
                    if self.settings.verbose {
                        log::info!("Layout {} generation - PASS", i + 1);
                    }
                }
                Stage::Resolver(name) => {
                    let def = &self.def;
                    let ctx = ctx.get_or_insert_with(|| {
                        GenerationContext::new(def, grids[0].clone(), region)
                    });
                    self.registry.resolve(name, ctx, world)?;
                    if self.settings.verbose {
                        log::info!("Resolver {} - PASS", name);
                    }
                }
            }
        }

        Ok(GenerationReport {
            variant,
            region,
            stages,
        })
    }
}
