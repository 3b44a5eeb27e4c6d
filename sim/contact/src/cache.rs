//! Per-pair contact bookkeeping across steps.
//!
//! The narrow phase reports contacts per shape pair every step. The cache
//! keeps one [`ContactGroup`] per pair so warm-start impulses survive, and
//! drives the collision handlers of both bodies:
//!
//! ```text
//! begin_step()
//! update(pair, points)   on_enter (first step only), on_pre_solve (every step)
//! active_groups_mut()    → solver
//! post_solve()           on_post_solve
//! end_step()             on_exit for pairs not updated this step
//! ```
//!
//! Groups and callbacks are visited in ascending [`CollisionPair`] order, so
//! identical inputs relax contacts in the same order on every run.

use std::sync::Arc;

use hashbrown::HashMap;
use planar_core::{Body, BodySet, CollisionHandler, CollisionPair};
use planar_types::{PhysicsError, Result, SolverConfig};

use crate::{ContactGroup, ContactPoint};

#[derive(Debug)]
struct CacheEntry {
    group: ContactGroup,
    stamp: u64,
    /// Rejected by `on_enter`; ignored until it separates.
    rejected: bool,
    /// Accepted by `on_pre_solve` this step.
    solve: bool,
}

impl CacheEntry {
    fn is_active(&self, stamp: u64) -> bool {
        self.stamp == stamp && self.solve && !self.group.is_sensor()
    }
}

/// Contact groups keyed by shape pair.
#[derive(Debug, Default)]
pub struct ContactCache {
    entries: HashMap<CollisionPair, CacheEntry>,
    stamp: u64,
    config: SolverConfig,
}

impl ContactCache {
    /// Create an empty cache whose groups use `config`'s slop and bias.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            entries: HashMap::new(),
            stamp: 0,
            config,
        }
    }

    /// Start a new step.
    pub fn begin_step(&mut self) {
        self.stamp += 1;
    }

    /// Record this step's contacts for `pair`.
    ///
    /// Returns whether the pair will be solved this step. A pair is skipped
    /// when either handler rejected it on entry (for as long as it keeps
    /// touching), declined it in `on_pre_solve` (for this step only), or
    /// involves a sensor.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::SameBody`] for two shapes of one body, and
    /// [`PhysicsError::InvalidBodyId`] if a shape cannot be found.
    pub fn update(
        &mut self,
        pair: CollisionPair,
        points: &[ContactPoint],
        bodies: &BodySet,
    ) -> Result<bool> {
        if pair.is_self_pair() {
            return Err(PhysicsError::SameBody(pair.body_a()));
        }
        let callbacks = handlers(bodies, &pair);

        let entry = match self.entries.entry(pair) {
            hashbrown::hash_map::Entry::Occupied(occupied) => occupied.into_mut(),
            hashbrown::hash_map::Entry::Vacant(vacant) => {
                let group = ContactGroup::new(pair, bodies)?.with_solver_config(&self.config);
                let rejected = !callbacks.iter().all(|h| h.on_enter(&pair));
                if rejected {
                    tracing::debug!(?pair, "pair rejected on enter");
                }
                vacant.insert(CacheEntry {
                    group,
                    stamp: self.stamp,
                    rejected,
                    solve: false,
                })
            }
        };

        entry.stamp = self.stamp;
        entry.group.refresh_material(bodies)?;
        entry.group.update(points);

        entry.solve = !entry.rejected && callbacks.iter().all(|h| h.on_pre_solve(&pair));
        Ok(entry.is_active(self.stamp))
    }

    /// Groups to hand to the solver this step.
    ///
    /// Sensor pairs report to their handlers but are never solved.
    pub fn active_groups_mut(&mut self) -> impl Iterator<Item = &mut ContactGroup> {
        let stamp = self.stamp;
        let mut active: Vec<(&CollisionPair, &mut CacheEntry)> = self
            .entries
            .iter_mut()
            .filter(|(_, entry)| entry.is_active(stamp))
            .collect();
        active.sort_unstable_by_key(|(pair, _)| **pair);
        active.into_iter().map(|(_, entry)| &mut entry.group)
    }

    /// Groups solved this step.
    pub fn active_groups(&self) -> impl Iterator<Item = &ContactGroup> {
        let stamp = self.stamp;
        let mut active: Vec<(&CollisionPair, &CacheEntry)> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_active(stamp))
            .collect();
        active.sort_unstable_by_key(|(pair, _)| **pair);
        active.into_iter().map(|(_, entry)| &entry.group)
    }

    /// Notify handlers of every pair solved this step.
    pub fn post_solve(&self, bodies: &BodySet) {
        for group in self.active_groups() {
            let pair = group.pair();
            for handler in handlers(bodies, &pair) {
                handler.on_post_solve(&pair);
            }
        }
    }

    /// Drop every pair that was not updated this step, notifying handlers.
    ///
    /// Returns the number of pairs removed.
    pub fn end_step(&mut self, bodies: &BodySet) -> usize {
        let stamp = self.stamp;
        let mut stale: Vec<CollisionPair> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.stamp != stamp)
            .map(|(pair, _)| *pair)
            .collect();
        stale.sort_unstable();

        for pair in &stale {
            self.entries.remove(pair);
            for handler in handlers(bodies, pair) {
                handler.on_exit(pair);
            }
        }

        let removed = stale.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.entries.len(), "separated pairs dropped");
        }
        removed
    }

    /// The group for `pair`, if it is being tracked.
    #[must_use]
    pub fn get(&self, pair: &CollisionPair) -> Option<&ContactGroup> {
        self.entries.get(pair).map(|entry| &entry.group)
    }

    /// Whether `pair` is being tracked.
    #[must_use]
    pub fn contains(&self, pair: &CollisionPair) -> bool {
        self.entries.contains_key(pair)
    }

    /// Number of tracked pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pair is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every pair without notifying handlers.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn handlers(bodies: &BodySet, pair: &CollisionPair) -> Vec<Arc<dyn CollisionHandler>> {
    [pair.body_a(), pair.body_b()]
        .into_iter()
        .filter_map(|id| bodies.get(id).and_then(Body::handler).cloned())
        .collect()
}
