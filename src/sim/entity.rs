//! Obstacles, pickups and the player's footprint
//!
//! Each kind has a fixed base size (the source artwork dimensions) plus a
//! visual scale and a collider scale. The player is not an `Entity`; it is
//! anchored at `PLAYER_X` and only moves vertically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, centered_hitbox, scaled_size};
use crate::consts::PLAYER_X;

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Low, wide obstacle
    Rock,
    /// Tall, narrow obstacle
    Crate,
    /// Collectible
    Egg,
}

/// Base dimensions and scales for one kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    pub base: Vec2,
    pub size_scale: f32,
    pub collider_scale: f32,
}

impl EntityKind {
    pub const fn spec(self) -> KindSpec {
        match self {
            EntityKind::Rock => KindSpec {
                base: Vec2::new(179.0, 108.0),
                size_scale: 0.32,
                collider_scale: 0.70,
            },
            EntityKind::Crate => KindSpec {
                base: Vec2::new(152.0, 254.0),
                size_scale: 0.32,
                collider_scale: 0.80,
            },
            EntityKind::Egg => KindSpec {
                base: Vec2::new(146.0, 179.0),
                size_scale: 0.23,
                collider_scale: 1.00,
            },
        }
    }

    pub fn is_obstacle(self) -> bool {
        !matches!(self, EntityKind::Egg)
    }

    /// Rendered width with the default scale
    pub fn width(self) -> f32 {
        let spec = self.spec();
        spec.base.x * spec.size_scale
    }
}

/// Player sprite constants
pub const PLAYER_SPEC: KindSpec = KindSpec {
    base: Vec2::new(142.0, 154.0),
    size_scale: 0.45,
    collider_scale: 0.70,
};

/// An obstacle or pickup instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable key for diffing; no gameplay meaning
    pub id: u32,
    pub kind: EntityKind,
    /// Left edge in world units
    pub x: f32,
    /// Height above the ground baseline (0 = grounded)
    pub y: f32,
    pub size_scale: f32,
    pub collider_scale: f32,
}

impl Entity {
    /// Create an entity with its kind's default scales
    pub fn new(id: u32, kind: EntityKind, x: f32, y: f32) -> Self {
        let spec = kind.spec();
        Self {
            id,
            kind,
            x,
            y,
            size_scale: spec.size_scale,
            collider_scale: spec.collider_scale,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn sprite_size(&self) -> Vec2 {
        scaled_size(self.kind.spec().base, self.size_scale)
    }

    pub fn width(&self) -> f32 {
        self.sprite_size().x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width()
    }

    pub fn sprite_rect(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.sprite_size())
    }

    pub fn hitbox_rect(&self) -> Rect {
        centered_hitbox(
            self.origin(),
            self.kind.spec().base,
            self.size_scale,
            self.collider_scale,
        )
    }

    /// Fully scrolled past the left edge of the world
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

pub fn player_sprite_size() -> Vec2 {
    scaled_size(PLAYER_SPEC.base, PLAYER_SPEC.size_scale)
}

pub fn player_sprite_rect(offset: f32) -> Rect {
    Rect::from_origin_size(Vec2::new(PLAYER_X, offset), player_sprite_size())
}

/// Player collider at the given height above the ground
pub fn player_hitbox_rect(offset: f32) -> Rect {
    centered_hitbox(
        Vec2::new(PLAYER_X, offset),
        PLAYER_SPEC.base,
        PLAYER_SPEC.size_scale,
        PLAYER_SPEC.collider_scale,
    )
}
