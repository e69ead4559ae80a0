//! Terrain collection and collision queries
//!
//! The level's tiles live here behind a uniform grid hash so that per-tick
//! contact queries stay cheap as worlds stretch into tens of thousands of
//! units. The query itself is pure: it never mutates tiles or the grid.

use std::collections::HashMap;

use glam::Vec2;

use super::tile::{Aabb, TerrainTile};

/// Grid cell edge length. Tiles are ~64 units long, so one cell holds a
/// handful of tiles at most.
const CELL_SIZE: f32 = 128.0;

/// A detected overlap between the actor and one terrain tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the touched tile in the terrain's tile list
    pub tile: usize,
    /// The tile's signed surface angle (degrees)
    pub angle_deg: f32,
    /// Half the tile's thickness, for underside checks in tile-local space
    pub half_height: f32,
}

/// Static level terrain: tile store plus spatial index
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    tiles: Vec<TerrainTile>,
    cells: HashMap<(i32, i32), Vec<u32>>,
}

impl Terrain {
    /// Build the terrain and its grid index from a finished tile list
    pub fn new(tiles: Vec<TerrainTile>) -> Self {
        let mut cells: HashMap<(i32, i32), Vec<u32>> = HashMap::new();
        for (index, tile) in tiles.iter().enumerate() {
            let aabb = tile.aabb();
            let (x0, y0) = cell_of(aabb.min);
            let (x1, y1) = cell_of(aabb.max);
            for cx in x0..=x1 {
                for cy in y0..=y1 {
                    cells.entry((cx, cy)).or_default().push(index as u32);
                }
            }
        }
        Self { tiles, cells }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn tiles(&self) -> &[TerrainTile] {
        &self.tiles
    }

    #[inline]
    pub fn tile(&self, index: usize) -> Option<&TerrainTile> {
        self.tiles.get(index)
    }

    /// All tiles currently overlapping `aabb`, in ascending tile order.
    ///
    /// Zero contacts means the actor is airborne.
    pub fn contacts(&self, aabb: &Aabb) -> Vec<Contact> {
        let mut candidates: Vec<u32> = Vec::new();
        let (x0, y0) = cell_of(aabb.min);
        let (x1, y1) = cell_of(aabb.max);
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                if let Some(indices) = self.cells.get(&(cx, cy)) {
                    candidates.extend_from_slice(indices);
                }
            }
        }
        // Tiles spanning several cells show up once per cell
        candidates.sort_unstable();
        candidates.dedup();

        candidates
            .into_iter()
            .filter_map(|index| {
                let tile = &self.tiles[index as usize];
                tile.overlaps_aabb(aabb).then(|| Contact {
                    tile: index as usize,
                    angle_deg: tile.angle_deg,
                    half_height: tile.half_height(),
                })
            })
            .collect()
    }

    /// Precise overlap re-check for a single tile (the nudge loop's probe)
    pub fn tile_overlaps(&self, index: usize, aabb: &Aabb) -> bool {
        self.tiles
            .get(index)
            .is_some_and(|tile| tile.overlaps_aabb(aabb))
    }
}

#[inline]
fn cell_of(p: Vec2) -> (i32, i32) {
    (
        (p.x / CELL_SIZE).floor() as i32,
        (p.y / CELL_SIZE).floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(count: usize) -> Vec<TerrainTile> {
        (0..count)
            .map(|i| {
                TerrainTile::new(
                    Vec2::new(i as f32 * 64.0, 0.0),
                    if i % 3 == 0 { 0.0 } else { 20.0 },
                    Vec2::new(64.0, 16.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_contacts_empty_far_away() {
        let terrain = Terrain::new(strip(100));
        let aabb = Aabb::from_center(Vec2::new(3200.0, 5000.0), Vec2::new(32.0, 32.0));
        assert!(terrain.contacts(&aabb).is_empty());
    }

    #[test]
    fn test_contacts_on_surface() {
        let terrain = Terrain::new(strip(100));
        let aabb = Aabb::from_center(Vec2::new(0.0, 10.0), Vec2::new(32.0, 32.0));
        let contacts = terrain.contacts(&aabb);
        assert!(!contacts.is_empty());
        assert_eq!(contacts[0].tile, 0);
        assert_eq!(contacts[0].angle_deg, 0.0);
        assert!((contacts[0].half_height - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_contacts_sorted_and_unique() {
        let terrain = Terrain::new(strip(100));
        // Straddle two tiles
        let aabb = Aabb::from_center(Vec2::new(32.0, 5.0), Vec2::new(48.0, 32.0));
        let contacts = terrain.contacts(&aabb);
        assert!(contacts.len() >= 2);
        for pair in contacts.windows(2) {
            assert!(pair[0].tile < pair[1].tile);
        }
    }

    #[test]
    fn test_grid_matches_exhaustive_scan() {
        let tiles = strip(200);
        let terrain = Terrain::new(tiles.clone());

        for probe_x in [0.0, 640.0, 3201.5, 6400.0, 12790.0] {
            let aabb = Aabb::from_center(Vec2::new(probe_x, 4.0), Vec2::new(32.0, 32.0));
            let fast: Vec<usize> = terrain.contacts(&aabb).iter().map(|c| c.tile).collect();
            let slow: Vec<usize> = tiles
                .iter()
                .enumerate()
                .filter(|(_, t)| t.overlaps_aabb(&aabb))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(fast, slow, "probe at x={probe_x}");
        }
    }

    #[test]
    fn test_tile_overlaps_out_of_range() {
        let terrain = Terrain::new(strip(3));
        let aabb = Aabb::from_center(Vec2::ZERO, Vec2::new(32.0, 32.0));
        assert!(!terrain.tile_overlaps(99, &aabb));
    }
}
