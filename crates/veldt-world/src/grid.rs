//! The logical grid of generated tile instances.

use std::sync::Arc;
use tracing::info;

use veldt_common::{GridCoord, WorldError};
use veldt_worldgen::{TileCatalog, TileGenerator, TileInstance};

/// A rectangular grid of generated tiles.
///
/// Authored as a grid of template ids; every id is validated against the
/// catalog before any generation happens, and all tiles are generated
/// eagerly (the authored grid is bounded, and generation is cheap and
/// deterministic). Coordinates outside the grid are simply not present.
#[derive(Debug, Clone)]
pub struct WorldGrid {
    tiles: Vec<Arc<TileInstance>>,
    width: usize,
    height: usize,
    world_seed: u32,
}

impl WorldGrid {
    /// Validates an authored id grid and generates every tile.
    ///
    /// `rows[y][x]` is the template id at grid coordinate `(x, y)`. An
    /// unknown id is a fatal configuration error for the whole load, named
    /// with its offending coordinates.
    pub fn generate(
        catalog: &TileCatalog,
        generator: &TileGenerator,
        rows: &[Vec<String>],
        world_seed: u32,
    ) -> Result<Self, WorldError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(WorldError::EmptyGrid);
        }
        let width = rows[0].len();
        let height = rows.len();

        // Validate everything before generating anything.
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(WorldError::RaggedGrid {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
            for (x, id) in row.iter().enumerate() {
                if catalog.get(id).is_none() {
                    return Err(WorldError::UnknownTemplate {
                        template: id.clone(),
                        x: x as i32,
                        y: y as i32,
                    });
                }
            }
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            for (x, id) in row.iter().enumerate() {
                let template = catalog
                    .get(id)
                    .ok_or_else(|| WorldError::UnknownTemplate {
                        template: id.clone(),
                        x: x as i32,
                        y: y as i32,
                    })?;
                let coord = GridCoord::new(x as i32, y as i32);
                tiles.push(Arc::new(generator.generate(template, coord, world_seed)));
            }
        }

        info!(width, height, world_seed, "world grid generated");
        Ok(Self {
            tiles,
            width,
            height,
            world_seed,
        })
    }

    /// Gets the tile at a grid coordinate, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, coord: GridCoord) -> Option<&Arc<TileInstance>> {
        if !self.contains(coord) {
            return None;
        }
        let index = coord.y as usize * self.width + coord.x as usize;
        self.tiles.get(index)
    }

    /// Checks whether a coordinate lies within the grid bounds.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The world seed the grid was generated with.
    #[must_use]
    pub const fn world_seed(&self) -> u32 {
        self.world_seed
    }

    /// Total number of generated tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[&[&str]]) -> Vec<Vec<String>> {
        ids.iter()
            .map(|row| row.iter().map(|&s| s.to_owned()).collect())
            .collect()
    }

    #[test]
    fn test_generate_valid_grid() {
        let catalog = TileCatalog::builtin();
        let generator = TileGenerator::default();
        let grid = WorldGrid::generate(
            &catalog,
            &generator,
            &rows(&[
                &["meadow", "forest"],
                &["forest", "rock_field"],
                &["meadow", "walled_yard"],
            ]),
            77,
        )
        .expect("valid grid");

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.tile_count(), 6);
        assert_eq!(grid.world_seed(), 77);

        let tile = grid.get(GridCoord::new(1, 2)).expect("tile present");
        assert_eq!(tile.key.template, "walled_yard");
    }

    #[test]
    fn test_unknown_template_is_fatal() {
        let catalog = TileCatalog::builtin();
        let generator = TileGenerator::default();
        let err = WorldGrid::generate(
            &catalog,
            &generator,
            &rows(&[&["meadow", "swampland"]]),
            0,
        )
        .expect_err("unknown template");

        match err {
            WorldError::UnknownTemplate { template, x, y } => {
                assert_eq!(template, "swampland");
                assert_eq!((x, y), (1, 0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_and_ragged_grids() {
        let catalog = TileCatalog::builtin();
        let generator = TileGenerator::default();

        assert!(matches!(
            WorldGrid::generate(&catalog, &generator, &[], 0),
            Err(WorldError::EmptyGrid)
        ));

        let err = WorldGrid::generate(
            &catalog,
            &generator,
            &rows(&[&["meadow", "meadow"], &["meadow"]]),
            0,
        )
        .expect_err("ragged grid");
        assert!(matches!(err, WorldError::RaggedGrid { row: 1, .. }));
    }

    #[test]
    fn test_out_of_bounds_is_not_present() {
        let catalog = TileCatalog::builtin();
        let generator = TileGenerator::default();
        let grid =
            WorldGrid::generate(&catalog, &generator, &rows(&[&["meadow"]]), 0).expect("grid");

        assert!(grid.get(GridCoord::new(-1, 0)).is_none());
        assert!(grid.get(GridCoord::new(0, 1)).is_none());
        assert!(grid.get(GridCoord::new(0, 0)).is_some());
    }

    #[test]
    fn test_regeneration_is_identical() {
        let catalog = TileCatalog::builtin();
        let generator = TileGenerator::default();
        let layout = rows(&[&["forest", "forest"]]);

        let a = WorldGrid::generate(&catalog, &generator, &layout, 1234).expect("grid");
        let b = WorldGrid::generate(&catalog, &generator, &layout, 1234).expect("grid");

        for x in 0..2 {
            let coord = GridCoord::new(x, 0);
            assert_eq!(a.get(coord), b.get(coord));
        }
    }
}
