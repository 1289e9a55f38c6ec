//! Position-Verlet particle physics for round bodies.
//!
//! Bodies store their current and previous position; velocity is implied by
//! the difference. This keeps constraint handling trivial: moving a body to
//! resolve a collision automatically adjusts its velocity on the next
//! update.
//!
//! # Example
//!
//! ```rust
//! use kinema::{BodyOptions, Bounds, Vec2, VerletPhysics, fps};
//!
//! let mut physics = VerletPhysics::new()
//!     .with_gravity(Vec2::new(0.0, 500.0))
//!     .with_bounds(Bounds::floor(600.0));
//!
//! let ball = physics.create_body(BodyOptions::new(Vec2::new(100.0, 0.0), 10.0));
//!
//! for _ in 0..600 {
//!     physics.update(fps(60));
//!     physics.resolve_overlaps();
//! }
//!
//! let body = physics.body(ball).unwrap();
//! assert!(body.position.y <= 590.0 + 1e-9);
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::vector::Vec2;

/// Gravity for canvas coordinates, in pixels per second squared.
///
/// The origin is the top-left corner and `y` grows downward, so gravity
/// points toward positive `y`.
pub const CANVAS_GRAVITY: Vec2 = Vec2 { x: 0.0, y: 981.0 };

/// Handle to a body inside a [`VerletPhysics`] world.
///
/// Slots of removed bodies are recycled, but each reuse bumps the slot's
/// generation, so a handle to a removed body never resolves to a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId {
    index: usize,
    generation: u32,
}

impl BodyId {
    /// Index of the body's slot.
    pub fn index(self) -> usize {
        self.index
    }

    /// How many times the slot had been vacated when this body moved in.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// A round body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Current position.
    pub position: Vec2,
    /// Position at the previous update.
    pub last_position: Vec2,
    /// Collision radius.
    pub radius: f64,
    /// Pinned bodies are never moved by the world.
    pub pinned: bool,
}

impl Body {
    /// Displacement over the last update.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.position - self.last_position
    }

    /// Sets the displacement the next update will carry forward.
    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.last_position = self.position - velocity;
    }

    /// Moves the body without giving it any velocity.
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.last_position = position;
    }
}

/// Options for [`VerletPhysics::create_body`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyOptions {
    /// Starting position.
    pub position: Vec2,
    /// Starting displacement per update.
    pub velocity: Vec2,
    /// Collision radius.
    pub radius: f64,
    /// Whether the body is pinned in place.
    pub pinned: bool,
}

impl BodyOptions {
    /// A body at rest.
    pub fn new(position: Vec2, radius: f64) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            pinned: false,
        }
    }

    /// Sets the starting displacement per update.
    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Pins the body.
    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }
}

/// Walls that keep bodies inside the canvas. Each side is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Bounds {
    /// Smallest allowed `x`.
    pub left: Option<f64>,
    /// Largest allowed `x`.
    pub right: Option<f64>,
    /// Smallest allowed `y`.
    pub top: Option<f64>,
    /// Largest allowed `y`.
    pub bottom: Option<f64>,
}

impl Bounds {
    /// Only a floor at `bottom`.
    pub fn floor(bottom: f64) -> Self {
        Self {
            bottom: Some(bottom),
            ..Self::default()
        }
    }

    /// A box with all four walls.
    pub fn rect(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            top: Some(top),
            bottom: Some(bottom),
        }
    }

    /// Pushes `body` back inside, reflecting its velocity scaled by
    /// `restitution` along the axis it hit.
    fn constrain(&self, body: &mut Body, restitution: f64) {
        let velocity = body.velocity();
        let r = body.radius;

        if let Some(left) = self.left {
            if body.position.x - r < left {
                body.position.x = left + r;
                body.last_position.x = body.position.x + velocity.x * restitution;
            }
        }
        if let Some(right) = self.right {
            if body.position.x + r > right {
                body.position.x = right - r;
                body.last_position.x = body.position.x + velocity.x * restitution;
            }
        }
        if let Some(top) = self.top {
            if body.position.y - r < top {
                body.position.y = top + r;
                body.last_position.y = body.position.y + velocity.y * restitution;
            }
        }
        if let Some(bottom) = self.bottom {
            if body.position.y + r > bottom {
                body.position.y = bottom - r;
                body.last_position.y = body.position.y + velocity.y * restitution;
            }
        }
    }
}

/// A world of round bodies under constant gravity.
#[derive(Debug, Clone, PartialEq)]
pub struct VerletPhysics {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
    gravity: Vec2,
    bounds: Option<Bounds>,
    drag: f64,
    restitution: f64,
}

impl VerletPhysics {
    /// An empty world with [`CANVAS_GRAVITY`], no walls and no drag.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            gravity: CANVAS_GRAVITY,
            bounds: None,
            drag: 0.0,
            restitution: 0.3,
        }
    }

    /// Sets gravity.
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets the walls.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets the fraction of velocity lost per update, clamped to `[0, 1]`.
    pub fn with_drag(mut self, drag: f64) -> Self {
        self.drag = drag.clamp(0.0, 1.0);
        self
    }

    /// Sets how much velocity survives a wall hit, clamped to `[0, 1]`.
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Current gravity.
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Replaces gravity.
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Current walls.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Replaces the walls.
    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    /// Adds a body and returns its handle.
    ///
    /// Reuses the slot of a removed body when one is free.
    pub fn create_body(&mut self, options: BodyOptions) -> BodyId {
        let body = Body {
            position: options.position,
            last_position: options.position - options.velocity,
            radius: options.radius,
            pinned: options.pinned,
        };
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.body = Some(body);
            return BodyId {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            body: Some(body),
        });
        BodyId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Removes a body, returning it if it was still present.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let body = slot.body.take()?;
        self.vacate(id.index);
        Some(body)
    }

    /// Removes every body for which `keep` returns false.
    ///
    /// Returns how many were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(BodyId, &Body) -> bool,
    {
        let mut removed = 0;
        for index in 0..self.slots.len() {
            let slot = &mut self.slots[index];
            let Some(body) = &slot.body else {
                continue;
            };
            let id = BodyId {
                index,
                generation: slot.generation,
            };
            if !keep(id, body) {
                slot.body = None;
                self.vacate(index);
                removed += 1;
            }
        }
        removed
    }

    fn vacate(&mut self, index: usize) {
        self.live -= 1;
        let slot = &mut self.slots[index];
        // A slot whose generation would wrap is retired instead of reused
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(index);
        }
    }

    /// Looks up a body.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.body.as_ref())
    }

    /// Looks up a body mutably.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.body.as_mut())
    }

    /// Iterates over live bodies.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.body.as_ref().map(|body| {
                let id = BodyId {
                    index,
                    generation: slot.generation,
                };
                (id, body)
            })
        })
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the world has no live bodies.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of allocated slots, live or free.
    ///
    /// Bounded by the largest number of bodies alive at once.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Integrates every unpinned body over `dt` seconds, then applies walls.
    ///
    /// Non-positive or NaN `dt` does nothing.
    pub fn update(&mut self, dt: f64) {
        if !(dt > 0.0) {
            return;
        }
        let acceleration = self.gravity * (dt * dt);
        let keep = 1.0 - self.drag;

        for body in self.slots.iter_mut().filter_map(|slot| slot.body.as_mut()) {
            if body.pinned {
                continue;
            }
            let velocity = body.velocity() * keep;
            body.last_position = body.position;
            body.position += velocity + acceleration;

            if let Some(bounds) = &self.bounds {
                bounds.constrain(body, self.restitution);
            }
        }
    }

    /// Separates overlapping bodies.
    ///
    /// Each pair is pushed apart along the line between centres; the overlap
    /// is split evenly, or taken entirely by the free body when the other is
    /// pinned. Bodies sharing a centre are left alone since no direction is
    /// defined. Returns the number of pairs that were touching.
    pub fn resolve_overlaps(&mut self) -> usize {
        let mut contacts = 0;
        let n = self.slots.len();

        for j in 1..n {
            let (head, tail) = self.slots.split_at_mut(j);
            let Some(b) = tail[0].body.as_mut() else {
                continue;
            };
            for a in head.iter_mut().filter_map(|slot| slot.body.as_mut()) {
                let delta = b.position - a.position;
                let distance = delta.length();
                let min_distance = a.radius + b.radius;
                if distance >= min_distance || distance <= 0.0 {
                    continue;
                }
                contacts += 1;

                let normal = delta * (1.0 / distance);
                let overlap = min_distance - distance;
                match (a.pinned, b.pinned) {
                    (true, true) => {}
                    (true, false) => b.position += normal * overlap,
                    (false, true) => a.position -= normal * overlap,
                    (false, false) => {
                        let half = normal * (overlap / 2.0);
                        a.position -= half;
                        b.position += half;
                    }
                }
            }
        }
        contacts
    }

    /// Softly pushes bodies out of a circle, e.g. around a moving pointer.
    ///
    /// Each touching body moves away from `center` by `overlap * strength`,
    /// capped at `max_push`. Returns how many bodies were pushed.
    pub fn repel(&mut self, center: Vec2, radius: f64, strength: f64, max_push: f64) -> usize {
        let mut pushed = 0;
        for body in self.slots.iter_mut().filter_map(|slot| slot.body.as_mut()) {
            if body.pinned {
                continue;
            }
            let delta = body.position - center;
            let distance = delta.length();
            let min_distance = body.radius + radius;
            if distance >= min_distance || distance <= 0.0 {
                continue;
            }
            let push = ((min_distance - distance) * strength).min(max_push);
            body.position += delta * (push / distance);
            pushed += 1;
        }
        pushed
    }
}

impl Default for VerletPhysics {
    fn default() -> Self {
        Self::new()
    }
}
