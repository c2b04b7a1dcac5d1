//! Headless game session
//!
//! Owns one generated level and steps the enemy, interaction and exit zone
//! each frame. The player's position and gaze come in from outside.

use crate::boot_config::BootConfig;
use glam::Vec3;
use lumen_ai::{KinematicAgent, NavAgent, PursuitBrain, PursuitState, StateChange};
use lumen_maze::{
    EntityKind, Grid, MazeConfig, MazeGenerator, MazeLayout, MazeResult, Placements,
};
use lumen_mesh::{uv_sphere, MeshResult, SphereMesh, SphereOrientation};
use lumen_player::{
    ExitEvent, ExitZone, GazeHit, InteractableId, InteractableKind, InteractionEvent,
    InteractionInput, Interactor,
};
use rand::Rng;

/// Host id of the key pickup
pub const KEY_ID: InteractableId = 1;
/// Host id of the exit door
pub const EXIT_ID: InteractableId = 2;
/// Radius of the key's pickup sphere
pub const KEY_RADIUS: f32 = 0.25;

/// Player state supplied for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerFrame {
    pub position: Vec3,
    pub gaze: Option<GazeHit>,
    pub hold: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Pursuit(StateChange<PursuitState>),
    Interaction(InteractionEvent),
    Exit(ExitEvent),
}

/// Enemy brain plus the body it drives
struct Enemy {
    brain: PursuitBrain,
    agent: KinematicAgent,
}

/// One generated level and its live state
pub struct Session {
    maze: MazeConfig,
    grid: Grid,
    layout: MazeLayout,
    placements: Placements,
    interactor: Interactor,
    enemy: Option<Enemy>,
    exit_zone: Option<ExitZone>,
    key_position: Option<Vec3>,
    key_mesh: SphereMesh,
    elapsed: f32,
}

impl Session {
    /// Generate a level with the RNG the maze config asks for
    pub fn new(config: &BootConfig) -> MazeResult<Self> {
        let generator = MazeGenerator::new(config.maze.clone())?;
        let mut rng = generator.rng();
        Ok(Self::generate(config, &generator, &mut rng))
    }

    /// Generate a level drawing from the given RNG
    pub fn with_rng<R: Rng + ?Sized>(config: &BootConfig, rng: &mut R) -> MazeResult<Self> {
        let generator = MazeGenerator::new(config.maze.clone())?;
        Ok(Self::generate(config, &generator, rng))
    }

    fn generate<R: Rng + ?Sized>(
        config: &BootConfig,
        generator: &MazeGenerator,
        rng: &mut R,
    ) -> Self {
        let grid = generator.generate(rng);
        let layout = MazeLayout::from_grid(&grid, &config.maze);
        let placements = lumen_maze::place_entities(&grid, rng);
        Self::from_parts(config, grid, layout, placements)
    }

    fn from_parts(
        config: &BootConfig,
        grid: Grid,
        layout: MazeLayout,
        placements: Placements,
    ) -> Self {
        let maze = config.maze.clone();

        let enemy = placements
            .world_position(EntityKind::Enemy, &maze)
            .map(|spawn| {
                let mut agent = KinematicAgent::new(spawn, 0.0);
                let brain = PursuitBrain::new(config.pursuit.clone(), &mut agent);
                Enemy { brain, agent }
            });

        let exit_zone = placements
            .world_position(EntityKind::Exit, &maze)
            .map(|center| ExitZone::for_cell(center, maze.cell_width, maze.cell_height));

        let key_position = placements.world_position(EntityKind::Key, &maze);

        log::info!(
            "Session ready: {} walls, {} floors, placements complete: {}",
            layout.walls().count(),
            layout.floors().count(),
            placements.is_complete()
        );

        Self {
            maze,
            grid,
            layout,
            placements,
            interactor: Interactor::new(config.interaction.clone()),
            enemy,
            exit_zone,
            key_position,
            key_mesh: key_mesh(),
            elapsed: 0.0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    pub fn placements(&self) -> &Placements {
        &self.placements
    }

    pub fn interactor(&self) -> &Interactor {
        &self.interactor
    }

    pub fn key_mesh(&self) -> &SphereMesh {
        &self.key_mesh
    }

    /// Key position while it is still in the world
    pub fn key_position(&self) -> Option<Vec3> {
        self.key_position
    }

    pub fn enemy_position(&self) -> Option<Vec3> {
        self.enemy.as_ref().map(|e| e.agent.position())
    }

    pub fn enemy_state(&self) -> Option<PursuitState> {
        self.enemy.as_ref().map(|e| e.brain.state())
    }

    /// Where the player spawns, if a cell was found
    pub fn player_spawn(&self) -> Option<Vec3> {
        self.placements.world_position(EntityKind::Player, &self.maze)
    }

    /// Seconds simulated so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn has_won(&self) -> bool {
        self.interactor.has_won()
    }

    /// Cast a gaze ray from the eye and report the closest interactable hit.
    ///
    /// The key is a sphere of `KEY_RADIUS`; the exit is its trigger box.
    pub fn gaze(&self, eye: Vec3, direction: Vec3) -> Option<GazeHit> {
        let direction = direction.try_normalize()?;
        let key = self
            .key_position
            .and_then(|center| ray_sphere(eye, direction, center, KEY_RADIUS))
            .map(|distance| GazeHit {
                target: KEY_ID,
                kind: InteractableKind::Key,
                distance,
            });
        let exit = self
            .exit_zone
            .as_ref()
            .and_then(|zone| ray_box(eye, direction, zone.center, zone.half_extents))
            .map(|distance| GazeHit {
                target: EXIT_ID,
                kind: InteractableKind::Exit,
                distance,
            });

        match (key, exit) {
            (Some(k), Some(e)) => Some(if k.distance <= e.distance { k } else { e }),
            (hit, None) | (None, hit) => hit,
        }
    }

    /// Advance the level by one frame
    pub fn tick(&mut self, frame: &PlayerFrame, delta_time: f32) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.elapsed += delta_time;

        if let Some(enemy) = self.enemy.as_mut() {
            if let Some(change) = enemy.brain.update(frame.position, &mut enemy.agent, delta_time) {
                events.push(SessionEvent::Pursuit(change));
            }
            enemy.agent.update(delta_time);
        }

        let input = InteractionInput {
            gaze: frame.gaze,
            hold: frame.hold,
            delta_time,
        };
        if let Some(event) = self.interactor.update(&input) {
            if let InteractionEvent::KeyCollected(id) = event {
                log::info!("Key {} collected", id);
                self.key_position = None;
            }
            events.push(SessionEvent::Interaction(event));
        }

        if let Some(zone) = self.exit_zone.as_mut() {
            let has_key = self.interactor.has_key();
            events.extend(zone.update(frame.position, has_key).into_iter().map(SessionEvent::Exit));
        }

        events
    }
}

fn key_mesh() -> SphereMesh {
    match build_key_mesh() {
        Ok(mesh) => mesh,
        Err(e) => {
            log::warn!("Key mesh unavailable: {}", e);
            SphereMesh {
                positions: Vec::new(),
                normals: Vec::new(),
                indices: Vec::new(),
            }
        }
    }
}

fn build_key_mesh() -> MeshResult<SphereMesh> {
    uv_sphere(KEY_RADIUS, 16, 16, SphereOrientation::PolesY)
}

/// Distance along a normalized ray to a sphere, if it is hit in front
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let along = to_center.dot(direction);
    let closest_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if far < 0.0 {
        None
    } else if near < 0.0 {
        Some(0.0)
    } else {
        Some(near)
    }
}

/// Slab test against an axis-aligned box
fn ray_box(origin: Vec3, direction: Vec3, center: Vec3, half_extents: Vec3) -> Option<f32> {
    let min = center - half_extents;
    let max = center + half_extents;
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_maze::GridPos;

    // ######
    // #....#
    // #....#
    // ######
    fn corridor() -> Grid {
        Grid::from_ascii(&["######", "#....#", "#....#", "######"]).unwrap()
    }

    fn corridor_session(placements: Placements) -> Session {
        let config = BootConfig::default();
        let grid = corridor();
        let layout = MazeLayout::from_grid(&grid, &config.maze);
        Session::from_parts(&config, grid, layout, placements)
    }

    fn full_placements() -> Placements {
        Placements {
            player: Some(GridPos::new(1, 1)),
            key: Some(GridPos::new(2, 1)),
            exit: Some(GridPos::new(4, 2)),
            enemy: Some(GridPos::new(3, 2)),
        }
    }

    #[test]
    fn test_seeded_session_is_deterministic() {
        let mut config = BootConfig::default();
        config.maze.seed = Some(5);

        let a = Session::new(&config).unwrap();
        let b = Session::new(&config).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.placements(), b.placements());
    }

    #[test]
    fn test_new_matches_seeded_with_rng() {
        let mut config = BootConfig::default();
        config.maze.seed = Some(11);
        let mut rng = MazeGenerator::new(config.maze.clone()).unwrap().rng();

        let a = Session::new(&config).unwrap();
        let b = Session::with_rng(&config, &mut rng).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.placements(), b.placements());
    }

    #[test]
    fn test_oversized_maze_is_error() {
        let mut config = BootConfig::default();
        config.maze.width = usize::MAX / 2 + 1;
        config.maze.height = 3;

        assert!(Session::new(&config).is_err());
    }

    #[test]
    fn test_invalid_maze_is_error() {
        let mut config = BootConfig::default();
        config.maze.width = 0;

        assert!(Session::new(&config).is_err());
    }

    #[test]
    fn test_enemy_chases_nearby_player() {
        let mut session = corridor_session(full_placements());
        let player = session.player_spawn().unwrap();
        assert_eq!(session.enemy_state(), Some(PursuitState::Patrol));

        let events = session.tick(
            &PlayerFrame {
                position: player,
                ..Default::default()
            },
            0.1,
        );
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::Pursuit(StateChange {
                to: PursuitState::Chasing,
                ..
            })
        )));

        let start = session.enemy_position().unwrap();
        session.tick(
            &PlayerFrame {
                position: player,
                ..Default::default()
            },
            0.1,
        );
        assert!(session.enemy_position().unwrap().distance(player) < start.distance(player));
    }

    #[test]
    fn test_gaze_picks_closest() {
        let session = corridor_session(full_placements());
        let eye = session.player_spawn().unwrap();
        let key = session.key_position().unwrap();

        let hit = session.gaze(eye, key - eye).unwrap();
        assert_eq!(hit.kind, InteractableKind::Key);
        assert!((hit.distance - (eye.distance(key) - KEY_RADIUS)).abs() < 1e-4);

        assert!(session.gaze(eye, Vec3::NEG_X).is_none());
        assert!(session.gaze(eye, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_collect_key_then_escape() {
        let mut session = corridor_session(full_placements());
        let player = session.player_spawn().unwrap();
        let key = session.key_position().unwrap();
        let dt = 0.5;

        let mut collected = false;
        for _ in 0..4 {
            let frame = PlayerFrame {
                position: player,
                gaze: session.gaze(player, key - player),
                hold: true,
            };
            collected |= session
                .tick(&frame, dt)
                .contains(&SessionEvent::Interaction(InteractionEvent::KeyCollected(KEY_ID)));
        }
        assert!(collected);
        assert!(session.interactor().has_key());
        assert!(session.key_position().is_none());

        let exit = session
            .placements()
            .world_position(EntityKind::Exit, &MazeConfig::default())
            .unwrap();
        let events = session.tick(
            &PlayerFrame {
                position: exit,
                ..Default::default()
            },
            dt,
        );
        assert!(events.contains(&SessionEvent::Exit(ExitEvent::LevelComplete)));

        let stand = exit - Vec3::X * 2.0;
        let mut escaped = false;
        for _ in 0..4 {
            let frame = PlayerFrame {
                position: stand,
                gaze: session.gaze(stand, Vec3::X),
                hold: true,
            };
            escaped |= session
                .tick(&frame, dt)
                .contains(&SessionEvent::Interaction(InteractionEvent::Escaped));
        }
        assert!(escaped);
        assert!(session.has_won());
    }

    #[test]
    fn test_missing_placements_leave_session_inert() {
        let mut session = corridor_session(Placements::default());

        assert!(session.enemy_state().is_none());
        assert!(session.gaze(Vec3::ZERO, Vec3::X).is_none());
        assert!(session.tick(&PlayerFrame::default(), 0.1).is_empty());
        assert!((session.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_key_mesh_built() {
        let session = corridor_session(Placements::default());
        assert_eq!(session.key_mesh().triangle_count(), 2 * 16 * 16);
    }

    #[test]
    fn test_ray_box_from_inside() {
        assert_eq!(ray_box(Vec3::ZERO, Vec3::X, Vec3::ZERO, Vec3::ONE), Some(0.0));
        assert_eq!(
            ray_box(Vec3::new(-3.0, 0.0, 0.0), Vec3::X, Vec3::ZERO, Vec3::ONE),
            Some(2.0)
        );
        assert!(ray_box(Vec3::new(-3.0, 5.0, 0.0), Vec3::X, Vec3::ZERO, Vec3::ONE).is_none());
    }
}
