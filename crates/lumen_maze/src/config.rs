//! Maze generation parameters

use crate::error::{MazeError, MazeResult};
use serde::{Deserialize, Serialize};

/// Chance that an interior cell seeds a carved room
pub const DEFAULT_ROOM_PROBABILITY: f32 = 0.2;

/// Largest grid a config may ask for (4096 x 4096)
pub const MAX_CELLS: usize = 1 << 24;

/// Parameters for a single generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Grid columns
    pub width: usize,
    /// Grid rows
    pub height: usize,
    /// World-space size of a cell along X
    pub cell_width: f32,
    /// World-space size of a cell along Z
    pub cell_height: f32,
    /// Height of wall blocks
    pub wall_height: f32,
    /// Side length of carved rooms, in cells
    pub room_size: usize,
    /// Chance per interior cell to carve a room around it
    pub room_probability: f32,
    /// Chance per interior cell to be forced back to floor
    pub obstacle_removal_probability: f32,
    /// Fixed seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            cell_width: 2.0,
            cell_height: 2.0,
            wall_height: 3.0,
            room_size: 5,
            room_probability: DEFAULT_ROOM_PROBABILITY,
            obstacle_removal_probability: 0.3,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Create a config with the given grid dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set room size
    pub fn with_room_size(mut self, room_size: usize) -> Self {
        self.room_size = room_size;
        self
    }

    /// Set obstacle removal probability
    pub fn with_obstacle_removal(mut self, probability: f32) -> Self {
        self.obstacle_removal_probability = probability;
        self
    }

    /// Set room probability
    pub fn with_room_probability(mut self, probability: f32) -> Self {
        self.room_probability = probability;
        self
    }

    /// Set cell footprint
    pub fn with_cell_size(mut self, cell_width: f32, cell_height: f32) -> Self {
        self.cell_width = cell_width;
        self.cell_height = cell_height;
        self
    }

    /// Fix the seed for a reproducible run
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter, reporting the first problem found
    pub fn validate(&self) -> MazeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(MazeError::TooLarge {
                    width: self.width,
                    height: self.height,
                    max: MAX_CELLS,
                })
            }
        }
        if self.room_size == 0 {
            return Err(MazeError::InvalidRoomSize(self.room_size));
        }
        check_probability("room_probability", self.room_probability)?;
        check_probability(
            "obstacle_removal_probability",
            self.obstacle_removal_probability,
        )?;
        check_positive("cell_width", self.cell_width)?;
        check_positive("cell_height", self.cell_height)?;
        check_positive("wall_height", self.wall_height)?;
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f32) -> MazeResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MazeError::InvalidProbability { name, value })
    }
}

fn check_positive(name: &'static str, value: f32) -> MazeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MazeError::InvalidFootprint { name, value })
    }
}
