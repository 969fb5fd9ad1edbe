//! Hit testing for the aim point
//!
//! Targets live in percent space but their radius is in pixels, so picking
//! happens in pixel space against the reported arena size. The topmost
//! (latest in render order) target whose circle contains the point wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::target::TargetEntity;
use crate::consts::BULLSEYE_RATIO;

/// Pixel size of the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A surface with no area cannot be hit tested
    pub fn is_measurable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Percent-space position to pixels
    pub fn to_pixels(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x / 100.0 * self.width, pos.y / 100.0 * self.height)
    }
}

/// Classification of a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    Normal,
    Bullseye,
}

/// Result of picking a target under the aim point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub target_id: u32,
    /// Pixel distance from aim point to target centre
    pub distance: f32,
    pub kind: HitKind,
}

/// Bullseye when within `radius * BULLSEYE_RATIO` of the centre
pub fn classify(distance: f32, radius: f32) -> HitKind {
    if distance <= radius * BULLSEYE_RATIO {
        HitKind::Bullseye
    } else {
        HitKind::Normal
    }
}

/// Find the topmost non-hit target containing `aim` (pixels)
pub fn pick_target(aim: Vec2, targets: &[TargetEntity], arena: &Arena) -> Option<Pick> {
    targets.iter().rev().filter(|t| !t.hit).find_map(|t| {
        let distance = aim.distance(arena.to_pixels(t.pos));
        (distance <= t.radius).then(|| Pick {
            target_id: t.id,
            distance,
            kind: classify(distance, t.radius),
        })
    })
}
