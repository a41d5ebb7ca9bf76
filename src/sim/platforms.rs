//! Platform generation and recycling
//!
//! Platforms live in a deque ordered by creation, which is also vertical
//! order: new ones are pushed at the top (back), old ones leave from the
//! bottom (front). Only the frontier platform is used to place the next one.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use super::physics::{Body, BodyId, Category, PhysicsWorld};

/// A platform body and its (static) position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub body: BodyId,
    pub pos: Vec2,
}

/// What one recycling pass did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Recycle {
    pub spawned: Option<BodyId>,
    pub despawned: Option<BodyId>,
}

/// Owns the platform sequence
#[derive(Debug, Clone)]
pub struct PlatformField {
    platforms: VecDeque<Platform>,
    /// Vertical step between platforms
    interval: f32,
    size: Vec2,
}

impl PlatformField {
    pub fn new(interval: f32, size: Vec2) -> Self {
        Self {
            platforms: VecDeque::new(),
            interval,
            size,
        }
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    /// Lowest platform
    pub fn first(&self) -> Option<&Platform> {
        self.platforms.front()
    }

    /// Frontier (highest) platform
    pub fn last(&self) -> Option<&Platform> {
        self.platforms.back()
    }

    /// True if y never decreases from front to back
    pub fn is_sorted(&self) -> bool {
        self.platforms
            .iter()
            .zip(self.platforms.iter().skip(1))
            .all(|(lower, upper)| lower.pos.y <= upper.pos.y)
    }

    /// Fill from one interval above the ground up to (excluding) `upper`
    ///
    /// Returns the number of platforms created.
    pub fn populate(
        &mut self,
        world: &mut PhysicsWorld,
        rng: &mut impl Rng,
        ground_y: f32,
        x_range: (f32, f32),
        upper: f32,
    ) -> usize {
        let mut y = ground_y + self.interval;
        let mut created = 0;
        while y < upper {
            let x = random_x(rng, x_range);
            self.spawn(world, Vec2::new(x, y));
            y += self.interval;
            created += 1;
        }
        log::debug!("Populated {} platforms below y={:.1}", created, upper);
        created
    }

    /// One recycling pass: at most one spawn at the top, one despawn at the bottom
    ///
    /// A platform is spawned when the frontier is below `upper`; the lowest
    /// platform is removed when it is below `lower`.
    pub fn recycle(
        &mut self,
        world: &mut PhysicsWorld,
        rng: &mut impl Rng,
        x_range: (f32, f32),
        upper: f32,
        lower: f32,
    ) -> Recycle {
        let mut outcome = Recycle::default();

        // Placement is relative to the frontier; an empty field stays empty
        if let Some(frontier_y) = self.last().map(|p| p.pos.y)
            && frontier_y < upper
        {
            let x = random_x(rng, x_range);
            let y = frontier_y + self.interval;
            outcome.spawned = Some(self.spawn(world, Vec2::new(x, y)));
            log::debug!("Spawned platform at ({:.1}, {:.1})", x, y);
        }

        if let Some(first) = self.first().copied() {
            if first.pos.y < lower {
                self.platforms.pop_front();
                world.remove(first.body);
                outcome.despawned = Some(first.body);
                log::debug!("Despawned platform at y={:.1}", first.pos.y);
            }
        }

        debug_assert!(self.is_sorted());
        outcome
    }

    fn spawn(&mut self, world: &mut PhysicsWorld, pos: Vec2) -> BodyId {
        let body = world.insert(Body::static_rect(Category::Platform, self.size, pos));
        self.platforms.push_back(Platform { body, pos });
        body
    }
}

fn random_x(rng: &mut impl Rng, (min_x, max_x): (f32, f32)) -> f32 {
    if min_x < max_x {
        rng.random_range(min_x..=max_x)
    } else {
        min_x
    }
}
