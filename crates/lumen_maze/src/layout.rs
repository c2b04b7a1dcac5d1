//! Block descriptors for the external maze builder
//!
//! The builder turns each [`Block`] into a physical box. Walls are registered
//! as navigation obstacles; floors are thin slabs the baker walks on.

use crate::config::MazeConfig;
use crate::grid::{Cell, Grid, GridPos};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Thickness of floor slabs
pub const FLOOR_THICKNESS: f32 = 0.1;

/// What a block represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Wall,
    Floor,
}

impl BlockKind {
    /// Physics/render layer name
    pub fn layer(&self) -> &'static str {
        match self {
            Self::Wall => "Obstacle",
            Self::Floor => "Floor",
        }
    }
}

/// An axis-aligned box to be built by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Source cell
    pub cell: GridPos,
    /// Wall or floor
    pub kind: BlockKind,
    /// Box center in world space
    pub center: Vec3,
    /// Full box extents
    pub size: Vec3,
    /// Whether the block carves the navigation surface
    pub nav_obstacle: bool,
}

impl Block {
    /// Build the descriptor for one cell
    pub fn for_cell(pos: GridPos, cell: Cell, config: &MazeConfig) -> Self {
        let x = pos.x as f32 * config.cell_width;
        let z = pos.y as f32 * config.cell_height;
        match cell {
            Cell::Wall => Self {
                cell: pos,
                kind: BlockKind::Wall,
                center: Vec3::new(x, config.wall_height / 2.0, z),
                size: Vec3::new(config.cell_width, config.wall_height, config.cell_height),
                nav_obstacle: true,
            },
            Cell::Floor => Self {
                cell: pos,
                kind: BlockKind::Floor,
                center: Vec3::new(x, 0.0, z),
                size: Vec3::new(config.cell_width, FLOOR_THICKNESS, config.cell_height),
                nav_obstacle: false,
            },
        }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.center - self.size * 0.5
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.center + self.size * 0.5
    }
}

/// Every block of a maze, in row-major order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MazeLayout {
    pub blocks: Vec<Block>,
}

impl MazeLayout {
    /// Describe a grid as blocks
    pub fn from_grid(grid: &Grid, config: &MazeConfig) -> Self {
        let blocks: Vec<Block> = grid
            .iter()
            .map(|(pos, cell)| Block::for_cell(pos, cell, config))
            .collect();

        let layout = Self { blocks };
        log::debug!(
            "Maze layout: {} walls, {} floors",
            layout.walls().count(),
            layout.floors().count()
        );
        layout
    }

    /// Wall blocks
    pub fn walls(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.kind == BlockKind::Wall)
    }

    /// Floor blocks
    pub fn floors(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.kind == BlockKind::Floor)
    }

    /// Check if a world-space point (ignoring height) falls inside any wall
    pub fn blocked_at(&self, point: Vec3) -> bool {
        self.walls().any(|b| {
            let (min, max) = (b.min(), b.max());
            point.x >= min.x && point.x <= max.x && point.z >= min.z && point.z <= max.z
        })
    }
}
