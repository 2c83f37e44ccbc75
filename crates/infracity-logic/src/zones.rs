//! Spatial zones: one axis-aligned bounding box per environment.
//!
//! ```text
//!        z=50 ┌──────┐
//!             │  qa  │
//!  ┌────────┐ └──────┘ ┌────────┐
//!  │  dev   │ ┌──────┐ │  prod  │ ┌──┐
//!  │        │ │ ctrl │ │        │ │dr│
//!  │        │ └──────┘ │        │ └──┘
//!  └────────┘          └────────┘
//! x=-70                         x=70 x=90
//! ```

use crate::model::{Env, Position};
use rand::Rng;

/// Axis-aligned bounding box on the ground plane. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub x: (f32, f32),
    pub z: (f32, f32),
}

impl Zone {
    pub const fn new(x: (f32, f32), z: (f32, f32)) -> Self {
        Self { x, z }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x.0 && pos.x <= self.x.1 && pos.z >= self.z.0 && pos.z <= self.z.1
    }

    pub fn width(&self) -> f32 {
        self.x.1 - self.x.0
    }

    pub fn depth(&self) -> f32 {
        self.z.1 - self.z.0
    }

    pub fn center(&self) -> Position {
        Position::new((self.x.0 + self.x.1) / 2.0, (self.z.0 + self.z.1) / 2.0)
    }

    /// Uniformly sample a point inside the box.
    pub fn sample(&self, rng: &mut impl Rng) -> Position {
        Position::new(
            self.x.0 + rng.gen::<f32>() * self.width(),
            self.z.0 + rng.gen::<f32>() * self.depth(),
        )
    }
}

const PROD_ZONE: Zone = Zone::new((20.0, 70.0), (-40.0, 40.0));
const DEV_ZONE: Zone = Zone::new((-70.0, -20.0), (-40.0, 40.0));
const QA_ZONE: Zone = Zone::new((-15.0, 15.0), (20.0, 50.0));
const CENTRAL_ZONE: Zone = Zone::new((-10.0, 10.0), (-10.0, 10.0));
const DR_ZONE: Zone = Zone::new((80.0, 90.0), (-10.0, 10.0));

/// Zone an environment's buildings must be placed in.
pub fn zone_for(env: Env) -> Zone {
    match env {
        Env::Prod => PROD_ZONE,
        Env::Dev => DEV_ZONE,
        Env::Qa => QA_ZONE,
        Env::Central => CENTRAL_ZONE,
        Env::Dr => DR_ZONE,
    }
}
