//! Maze generator
//!
//! Generation runs four passes over the grid:
//!
//! 1. Wall perimeter, floor interior
//! 2. Room carving: each interior cell may stamp a `room_size` square of walls
//! 3. Obstacle removal: each interior cell may be forced back to floor
//! 4. Connectivity repair: floor cells boxed in by four walls become walls
//!
//! Passes 2 and 3 draw exactly one `f32` per interior cell in row-major
//! order, so a seeded RNG always reproduces the same grid.

use crate::config::MazeConfig;
use crate::error::MazeResult;
use crate::grid::{Cell, Grid, GridPos};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates maze grids from a validated config
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    config: MazeConfig,
}

impl MazeGenerator {
    /// Create a generator, rejecting invalid configs
    pub fn new(config: MazeConfig) -> MazeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the config
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// RNG for this run: seeded when the config fixes a seed, entropy otherwise
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Run all generation passes
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        log::info!(
            "Generating {}x{} maze (room size {}, obstacle removal {:.2})",
            self.config.width,
            self.config.height,
            self.config.room_size,
            self.config.obstacle_removal_probability
        );

        let mut grid = Grid::walled(self.config.width, self.config.height);
        self.carve_rooms(&mut grid, rng);
        self.remove_obstacles(&mut grid, rng);
        let repaired = repair_isolated_cells(&mut grid);

        log::debug!(
            "Maze generation complete: {} floor, {} wall, {} isolated cells repaired",
            grid.count(Cell::Floor),
            grid.count(Cell::Wall),
            repaired
        );
        grid
    }

    fn carve_rooms<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        let centers: Vec<GridPos> = grid.interior().collect();
        for center in centers {
            if rng.gen::<f32>() < self.config.room_probability {
                carve_room(grid, center, self.config.room_size);
            }
        }
    }

    fn remove_obstacles<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        let cells: Vec<GridPos> = grid.interior().collect();
        for pos in cells {
            if rng.gen::<f32>() < self.config.obstacle_removal_probability {
                grid.set(pos, Cell::Floor);
            }
        }
    }
}

/// Fill a `room_size` square centered on `center` with walls, clipped to the interior
pub fn carve_room(grid: &mut Grid, center: GridPos, room_size: usize) {
    let (width, height) = (grid.width(), grid.height());
    if width < 3 || height < 3 {
        return;
    }

    let half = room_size / 2;
    let x_min = center.x.saturating_sub(half).max(1);
    let x_max = center.x.saturating_add(half).min(width - 2);
    let y_min = center.y.saturating_sub(half).max(1);
    let y_max = center.y.saturating_add(half).min(height - 2);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            grid.set(GridPos::new(x, y), Cell::Wall);
        }
    }
}

/// Wall off interior floor cells whose four neighbours are all walls.
///
/// Neighbours are read from a snapshot taken before the pass, so the result
/// does not depend on scan order. Returns the number of cells changed.
pub fn repair_isolated_cells(grid: &mut Grid) -> usize {
    let snapshot = grid.clone();
    let isolated: Vec<GridPos> = snapshot
        .interior()
        .filter(|&pos| snapshot.is_floor(pos) && snapshot.is_surrounded_by_walls(pos))
        .collect();

    for &pos in &isolated {
        grid.set(pos, Cell::Wall);
    }
    isolated.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(config: MazeConfig) -> MazeGenerator {
        MazeGenerator::new(config).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(MazeGenerator::new(MazeConfig::new(0, 0)).is_err());
    }

    #[test]
    fn test_no_rooms_no_removal_keeps_open_interior() {
        let config = MazeConfig::new(6, 5)
            .with_room_probability(0.0)
            .with_obstacle_removal(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let grid = generator(config).generate(&mut rng);

        assert_eq!(grid, Grid::walled(6, 5));
    }

    #[test]
    fn test_all_rooms_no_removal_walls_everything() {
        let config = MazeConfig::new(8, 8)
            .with_room_probability(1.0)
            .with_obstacle_removal(0.0);
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generator(config).generate(&mut rng);

        assert_eq!(grid.count(Cell::Floor), 0);
    }

    #[test]
    fn test_full_removal_restores_interior() {
        let config = MazeConfig::new(8, 8)
            .with_room_probability(1.0)
            .with_obstacle_removal(1.0);
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generator(config).generate(&mut rng);

        assert_eq!(grid, Grid::walled(8, 8));
    }

    #[test]
    fn test_carve_room_clips_to_interior() {
        let mut grid = Grid::walled(7, 7);
        carve_room(&mut grid, GridPos::new(1, 1), 5);

        // Rows/cols 1..=3 are walled, the rest of the interior is untouched
        for y in 1..=3 {
            for x in 1..=3 {
                assert!(grid.is_wall(GridPos::new(x, y)));
            }
        }
        assert!(grid.is_floor(GridPos::new(4, 1)));
        assert!(grid.is_floor(GridPos::new(1, 4)));
        assert!(grid.is_floor(GridPos::new(5, 5)));
    }

    #[test]
    fn test_carve_even_room_size() {
        let mut grid = Grid::walled(9, 9);
        // half = 1, so an even size still stamps a 3x3 block
        carve_room(&mut grid, GridPos::new(4, 4), 2);

        assert_eq!(grid.count(Cell::Floor), 49 - 9);
        assert!(grid.is_wall(GridPos::new(3, 3)));
        assert!(grid.is_wall(GridPos::new(5, 5)));
        assert!(grid.is_floor(GridPos::new(2, 4)));
    }

    #[test]
    fn test_carve_huge_room_clips_without_overflow() {
        let mut grid = Grid::walled(5, 5);
        carve_room(&mut grid, GridPos::new(2, 2), usize::MAX);
        assert_eq!(grid.count(Cell::Floor), 0);

        let mut grid = Grid::walled(5, 5);
        carve_room(&mut grid, GridPos::new(usize::MAX, usize::MAX), 3);
        assert_eq!(grid.count(Cell::Floor), 9);
    }

    #[test]
    fn test_carve_room_size_one() {
        let mut grid = Grid::walled(5, 5);
        carve_room(&mut grid, GridPos::new(2, 2), 1);

        assert!(grid.is_wall(GridPos::new(2, 2)));
        assert_eq!(grid.count(Cell::Floor), 8);
    }

    #[test]
    fn test_repair_walls_isolated_cell() {
        let mut grid = Grid::from_ascii(&["#####", "#.#.#", "###.#", "#####"]).unwrap();
        let repaired = repair_isolated_cells(&mut grid);

        assert_eq!(repaired, 1);
        assert!(grid.is_wall(GridPos::new(1, 1)));
        assert!(grid.is_floor(GridPos::new(3, 1)));
        assert!(grid.is_floor(GridPos::new(3, 2)));
    }

    #[test]
    fn test_repair_walls_off_diagonal_isolated_cells() {
        let mut grid = Grid::from_ascii(&["#####", "#.###", "##.##", "#####"]).unwrap();
        let repaired = repair_isolated_cells(&mut grid);

        assert_eq!(repaired, 2);
        assert_eq!(grid.count(Cell::Floor), 0);
    }

    #[test]
    fn test_rng_is_seeded_from_config() {
        let generator = generator(MazeConfig::default().with_seed(99));
        let a = generator.generate(&mut generator.rng());
        let b = generator.generate(&mut generator.rng());

        assert_eq!(a, b);
    }
}
