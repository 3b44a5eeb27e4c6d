//! Body registry.
//!
//! [`BodySet`] owns every body and hands out [`BodyId`] handles. Shapes and
//! constraints refer to bodies only through these handles. Slots of removed
//! bodies are left empty and ids are never reused, so a stale handle can
//! never resolve to a different body.

use planar_types::{BodyId, PhysicsError, Result, SimulationConfig};

use crate::{Body, Shape, ShapeKey};

/// Owns the bodies of a simulation.
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    bodies: Vec<Option<Body>>,
    len: usize,
}

impl BodySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body, assigning it and its shapes a fresh id.
    pub fn insert(&mut self, mut body: Body) -> BodyId {
        let id = BodyId::new(self.bodies.len() as u64);
        body.assign_id(id);
        self.bodies.push(Some(body));
        self.len += 1;
        id
    }

    /// Remove a body. The id stays retired.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let body = self.bodies.get_mut(Self::slot(id)?)?.take()?;
        self.len -= 1;
        Some(body)
    }

    fn slot(id: BodyId) -> Option<usize> {
        usize::try_from(id.raw()).ok()
    }

    /// Look up a body.
    #[must_use]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(Self::slot(id)?)?.as_ref()
    }

    /// Look up a body mutably.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(Self::slot(id)?)?.as_mut()
    }

    /// Whether the id refers to a live body.
    #[must_use]
    pub fn contains(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    /// Borrow two distinct bodies mutably at once.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::SameBody`] if `a == b` and
    /// [`PhysicsError::InvalidBodyId`] if either body does not exist.
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Result<(&mut Body, &mut Body)> {
        if a == b {
            return Err(PhysicsError::SameBody(a));
        }
        let ia = Self::slot(a)
            .filter(|&i| i < self.bodies.len())
            .ok_or(PhysicsError::InvalidBodyId(a))?;
        let ib = Self::slot(b)
            .filter(|&i| i < self.bodies.len())
            .ok_or(PhysicsError::InvalidBodyId(b))?;

        let (first, second) = if ia < ib {
            let (lo, hi) = self.bodies.split_at_mut(ib);
            (&mut lo[ia], &mut hi[0])
        } else {
            let (lo, hi) = self.bodies.split_at_mut(ia);
            (&mut hi[0], &mut lo[ib])
        };

        match (first.as_mut(), second.as_mut()) {
            (Some(body_a), Some(body_b)) => Ok((body_a, body_b)),
            (None, _) => Err(PhysicsError::InvalidBodyId(a)),
            (_, None) => Err(PhysicsError::InvalidBodyId(b)),
        }
    }

    /// Look up a shape by key.
    #[must_use]
    pub fn shape(&self, key: ShapeKey) -> Option<&Shape> {
        self.get(key.body)?.shapes().get(key.index)
    }

    /// Iterate over live bodies.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|body| (BodyId::new(i as u64), body)))
    }

    /// Iterate mutably over live bodies.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut Body)> {
        self.bodies
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|body| (BodyId::new(i as u64), body)))
    }

    /// Ids of live bodies in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.iter().map(|(id, _)| id)
    }

    /// Number of live bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Run the velocity phase for every body.
    ///
    /// Gravity comes from `config`; the per-second damping is converted to
    /// per-step factors for `dt`.
    pub fn update_velocities(&mut self, config: &SimulationConfig, dt: f64) {
        let (linear, angular) = config.damping_factors(dt);
        for (_, body) in self.iter_mut() {
            body.update_velocity(config.gravity, linear, angular, dt);
        }
    }

    /// Run the position phase for every body.
    pub fn update_positions(&mut self, dt: f64) {
        for (_, body) in self.iter_mut() {
            body.update_position(dt);
        }
    }

    /// Re-project every body's shapes into world space.
    pub fn update_shapes(&mut self) {
        for (_, body) in self.iter_mut() {
            body.update_shapes();
        }
    }

    /// Sum of every body's kinetic energy.
    #[must_use]
    pub fn total_kinetic_energy(&self) -> f64 {
        self.iter().map(|(_, body)| body.kinetic_energy()).sum()
    }
}
