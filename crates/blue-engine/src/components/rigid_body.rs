//! Rigid body: accumulates force vectors and integrates them into motion.

use std::fmt;

use heapless::Vec as BoundedVec;
use tracing::warn;

use blue_core::constants::{RIGID_BODY_DEFAULT_MASS, RIGID_BODY_FORCES_MAX};
use blue_core::{Fix16, Fix16Vec2};

use crate::component::{Component, ComponentContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigidBodyError {
    /// The force list already holds `RIGID_BODY_FORCES_MAX` forces.
    ForceListFull,
    /// Mass must be strictly positive.
    InvalidMass(Fix16),
}

impl fmt::Display for RigidBodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RigidBodyError::ForceListFull => {
                write!(f, "force list full ({RIGID_BODY_FORCES_MAX} forces)")
            }
            RigidBodyError::InvalidMass(mass) => write!(f, "invalid mass {mass}"),
        }
    }
}

impl std::error::Error for RigidBodyError {}

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    mass: Fix16,
    pub displacement: Fix16Vec2,
    pub velocity: Fix16Vec2,
    pub acceleration: Fix16Vec2,
    forces: BoundedVec<Fix16Vec2, RIGID_BODY_FORCES_MAX>,
    /// Integrate forces into motion on each update.
    pub integrate: bool,
    bounds: Option<(Fix16Vec2, Fix16Vec2)>,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            mass: RIGID_BODY_DEFAULT_MASS,
            displacement: Fix16Vec2::ZERO,
            velocity: Fix16Vec2::ZERO,
            acceleration: Fix16Vec2::ZERO,
            forces: BoundedVec::new(),
            integrate: true,
            bounds: None,
        }
    }
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confine the displacement to the box `[min, max]`. Hitting a side stops
    /// the velocity along that axis.
    pub fn with_bounds(mut self, min: Fix16Vec2, max: Fix16Vec2) -> Self {
        self.bounds = Some((min, max));
        self
    }

    pub fn bounds(&self) -> Option<(Fix16Vec2, Fix16Vec2)> {
        self.bounds
    }

    pub fn mass(&self) -> Fix16 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: Fix16) -> Result<(), RigidBodyError> {
        if mass <= Fix16::ZERO {
            return Err(RigidBodyError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    /// Append a copy of `force`. Fails without touching the list when full.
    pub fn forces_add(&mut self, force: &Fix16Vec2) -> Result<(), RigidBodyError> {
        self.forces.push(*force).map_err(|_| {
            warn!(count = self.forces.len(), "force rejected, list full");
            RigidBodyError::ForceListFull
        })
    }

    pub fn forces_clear(&mut self) {
        self.forces.clear();
    }

    /// Component-wise sum of the accumulated forces; zero when empty.
    /// Partial sums may leave the 16.16 range, only the total saturates.
    pub fn forces_sum(&self) -> Fix16Vec2 {
        Fix16Vec2::new(
            Fix16::exact_sum(self.forces.iter().map(|f| f.x)),
            Fix16::exact_sum(self.forces.iter().map(|f| f.y)),
        )
    }

    pub fn forces_count(&self) -> usize {
        self.forces.len()
    }

    pub fn forces(&self) -> &[Fix16Vec2] {
        &self.forces
    }

    /// One explicit Euler step: a = F/m, v += a·dt, x += v·dt, then confine
    /// to the bounds if any.
    pub fn step(&mut self, dt: Fix16) {
        self.acceleration = self.forces_sum() / self.mass;
        self.velocity += self.acceleration * dt;
        self.displacement += self.velocity * dt;
        self.forces_clear();
        self.confine();
    }

    fn confine(&mut self) {
        let Some((min, max)) = self.bounds else {
            return;
        };
        let x = self.displacement.x.clamp(min.x, max.x);
        if x != self.displacement.x {
            self.displacement.x = x;
            self.velocity.x = Fix16::ZERO;
        }
        let y = self.displacement.y.clamp(min.y, max.y);
        if y != self.displacement.y {
            self.displacement.y = y;
            self.velocity.y = Fix16::ZERO;
        }
    }
}

impl Component for RigidBody {
    fn name(&self) -> &'static str {
        "rigid_body"
    }

    fn on_init(&mut self, ctx: &mut ComponentContext<'_>) {
        *self = RigidBody {
            integrate: self.integrate,
            bounds: self.bounds,
            displacement: ctx.transform.position,
            ..RigidBody::default()
        };
    }

    fn on_update(&mut self, ctx: &mut ComponentContext<'_>) {
        if !self.integrate {
            return;
        }
        self.step(ctx.dt);
        ctx.transform.position = self.displacement;
    }

    fn on_destroy(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.forces_clear();
    }
}
