//! Lumen Maze - Procedural Maze Generation
//!
//! This crate produces the wall/floor grid the game is played on and decides
//! where the player, key, exit and enemy spawn.
//!
//! # Features
//!
//! - Perimeter-walled grids with random room carving
//! - Obstacle pruning and local connectivity repair
//! - Seeded, deterministic generation through an injected RNG
//! - Valid-position sampling with a visited set
//! - Block descriptors for the external maze builder
//!
//! # Example
//!
//! ```ignore
//! use lumen_maze::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let config = MazeConfig::default().with_seed(42);
//! let mut rng = StdRng::seed_from_u64(42);
//! let grid = MazeGenerator::new(config.clone())?.generate(&mut rng);
//! let placements = place_entities(&grid, &mut rng);
//! let player = placements.world_position(EntityKind::Player, &config);
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod layout;
pub mod placement;

pub mod prelude {
    pub use crate::config::MazeConfig;
    pub use crate::error::{MazeError, MazeResult};
    pub use crate::generator::MazeGenerator;
    pub use crate::grid::{Cell, Grid, GridPos};
    pub use crate::layout::{Block, BlockKind, MazeLayout};
    pub use crate::placement::{
        find_valid_position, place_entities, EntityKind, Placements, VisitedSet,
    };
}

pub use prelude::*;
