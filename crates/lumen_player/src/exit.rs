//! Exit trigger zone

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Edge-triggered events from the exit zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitEvent {
    /// Player walked into the zone
    Approached,
    /// Player walked into the zone carrying the key
    LevelComplete,
    /// Player walked out of the zone
    Left,
}

/// Box volume around the exit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitZone {
    /// Zone center
    pub center: Vec3,
    /// Half-extents (width/2, height/2, depth/2)
    pub half_extents: Vec3,
    #[serde(skip)]
    player_inside: bool,
}

impl ExitZone {
    /// Create a zone
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
            player_inside: false,
        }
    }

    /// Create a zone covering one maze cell
    pub fn for_cell(center: Vec3, cell_width: f32, cell_height: f32) -> Self {
        Self::new(center, Vec3::new(cell_width / 2.0, 1.0, cell_height / 2.0))
    }

    /// Check if a point is inside the zone
    pub fn contains(&self, point: Vec3) -> bool {
        let local = (point - self.center).abs();
        local.x <= self.half_extents.x
            && local.y <= self.half_extents.y
            && local.z <= self.half_extents.z
    }

    /// Whether the player was inside on the last update
    pub fn player_inside(&self) -> bool {
        self.player_inside
    }

    /// Track the player; events fire only when inside/outside flips
    pub fn update(&mut self, player_position: Vec3, has_key: bool) -> Vec<ExitEvent> {
        let inside = self.contains(player_position);
        let mut events = Vec::new();

        match (self.player_inside, inside) {
            (false, true) => {
                log::info!("Approached the exit.");
                events.push(ExitEvent::Approached);
                if has_key {
                    log::info!("Level Complete!");
                    events.push(ExitEvent::LevelComplete);
                }
            }
            (true, false) => events.push(ExitEvent::Left),
            _ => {}
        }

        self.player_inside = inside;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> ExitZone {
        ExitZone::for_cell(Vec3::new(4.0, 1.0, 4.0), 2.0, 2.0)
    }

    #[test]
    fn test_contains() {
        let zone = zone();

        assert!(zone.contains(Vec3::new(4.0, 1.0, 4.0)));
        assert!(zone.contains(Vec3::new(5.0, 0.5, 3.0)));
        assert!(!zone.contains(Vec3::new(5.5, 1.0, 4.0)));
    }

    #[test]
    fn test_enter_without_key() {
        let mut zone = zone();

        assert_eq!(zone.update(Vec3::new(4.0, 1.0, 4.0), false), vec![ExitEvent::Approached]);
        assert!(zone.update(Vec3::new(4.2, 1.0, 4.0), false).is_empty());
        assert_eq!(zone.update(Vec3::new(9.0, 1.0, 4.0), false), vec![ExitEvent::Left]);
    }

    #[test]
    fn test_enter_with_key() {
        let mut zone = zone();

        assert_eq!(
            zone.update(Vec3::new(4.0, 1.0, 4.0), true),
            vec![ExitEvent::Approached, ExitEvent::LevelComplete]
        );
        assert!(zone.player_inside());
    }

    #[test]
    fn test_picking_key_inside_needs_reentry() {
        let mut zone = zone();

        zone.update(Vec3::new(4.0, 1.0, 4.0), false);
        assert!(zone.update(Vec3::new(4.0, 1.0, 4.0), true).is_empty());
    }
}
