//! Entity placement on generated grids

use crate::config::MazeConfig;
use crate::grid::{Grid, GridPos};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Kinds of entities spawned into the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Key,
    Exit,
    Enemy,
}

impl EntityKind {
    /// Placement order
    pub const ORDER: [EntityKind; 4] = [Self::Player, Self::Key, Self::Exit, Self::Enemy];

    /// World-space Y used when spawning this entity
    pub fn spawn_height(&self) -> f32 {
        match self {
            Self::Enemy => 0.5,
            Self::Player | Self::Key | Self::Exit => 1.0,
        }
    }

    /// Whether a placed entity of this kind claims its cell
    pub fn claims_cell(&self) -> bool {
        // The player never reserves its spawn cell
        !matches!(self, Self::Player)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Key => write!(f, "key"),
            Self::Exit => write!(f, "exit"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

/// Cells already claimed by placed entities. Only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet {
    cells: HashSet<GridPos>,
}

impl VisitedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a cell; returns false if it was already claimed
    pub fn insert(&mut self, pos: GridPos) -> bool {
        self.cells.insert(pos)
    }

    /// Check if a cell is claimed
    pub fn contains(&self, pos: GridPos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Pick a uniformly random interior floor cell that is not yet claimed.
///
/// Candidates are gathered in row-major order before the single draw, so a
/// seeded RNG picks the same cell every time. Returns `None` when nothing is
/// free; the RNG is not advanced in that case.
pub fn find_valid_position<R: Rng + ?Sized>(
    grid: &Grid,
    visited: &VisitedSet,
    rng: &mut R,
) -> Option<GridPos> {
    let candidates: Vec<GridPos> = grid
        .interior()
        .filter(|&pos| grid.is_floor(pos) && !visited.contains(pos))
        .collect();

    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Where each entity ended up; `None` means the placement was skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placements {
    pub player: Option<GridPos>,
    pub key: Option<GridPos>,
    pub exit: Option<GridPos>,
    pub enemy: Option<GridPos>,
}

impl Placements {
    /// Get the cell for an entity kind
    pub fn get(&self, kind: EntityKind) -> Option<GridPos> {
        match kind {
            EntityKind::Player => self.player,
            EntityKind::Key => self.key,
            EntityKind::Exit => self.exit,
            EntityKind::Enemy => self.enemy,
        }
    }

    fn slot_mut(&mut self, kind: EntityKind) -> &mut Option<GridPos> {
        match kind {
            EntityKind::Player => &mut self.player,
            EntityKind::Key => &mut self.key,
            EntityKind::Exit => &mut self.exit,
            EntityKind::Enemy => &mut self.enemy,
        }
    }

    /// World-space spawn point for an entity, if it was placed
    pub fn world_position(&self, kind: EntityKind, config: &MazeConfig) -> Option<Vec3> {
        self.get(kind)
            .map(|pos| cell_to_world(pos, kind.spawn_height(), config))
    }

    /// Check if every entity was placed
    pub fn is_complete(&self) -> bool {
        EntityKind::ORDER.iter().all(|&k| self.get(k).is_some())
    }
}

/// Map a grid cell to world space at the given height
pub fn cell_to_world(pos: GridPos, y: f32, config: &MazeConfig) -> Vec3 {
    Vec3::new(
        pos.x as f32 * config.cell_width,
        y,
        pos.y as f32 * config.cell_height,
    )
}

/// Place player, key, exit and enemy in that order.
///
/// Each step is all-or-nothing: a step that finds no free cell is logged and
/// skipped, and the remaining steps still run.
pub fn place_entities<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Placements {
    let mut visited = VisitedSet::new();
    place_entities_with(grid, &mut visited, rng)
}

/// Same as [`place_entities`], starting from an existing visited set
pub fn place_entities_with<R: Rng + ?Sized>(
    grid: &Grid,
    visited: &mut VisitedSet,
    rng: &mut R,
) -> Placements {
    let mut placements = Placements::default();

    for kind in EntityKind::ORDER {
        let Some(pos) = find_valid_position(grid, visited, rng) else {
            log::warn!("Unable to find suitable {} position, skipping", kind);
            continue;
        };

        if kind.claims_cell() {
            visited.insert(pos);
        }
        *placements.slot_mut(kind) = Some(pos);
        log::info!("{} position: {}", kind, pos);
    }

    placements
}
