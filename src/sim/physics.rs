//! Physics world: bodies, collision categories and contact reporting
//!
//! Every body belongs to exactly one [`Category`]. A [`CollisionMatrix`]
//! decides what happens when two categories overlap: nothing, a physical
//! bounce, or a contact notification that leaves motion untouched.

use std::collections::BTreeSet;

use glam::Vec2;

use super::collision::{
    CollisionResult, bounce_velocity, circle_aabb_collision, circle_edge_loop_collisions,
};
use super::geometry::Aabb;

/// Stable handle to a body inside a [`PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(u32);

impl BodyId {
    /// Id carried by a body that has not been inserted yet
    pub const UNASSIGNED: BodyId = BodyId(0);
}

/// Collision categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ball,
    Platform,
    Boundary,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Ball, Category::Platform, Category::Boundary];

    /// 32-bit category mask
    pub const fn bit(self) -> u32 {
        match self {
            Category::Ball => 1 << 0,
            Category::Platform => 1 << 1,
            Category::Boundary => 1 << 2,
        }
    }

    const fn index(self) -> usize {
        match self {
            Category::Ball => 0,
            Category::Platform => 1,
            Category::Boundary => 2,
        }
    }
}

/// What happens when two categories overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    /// Bodies ignore each other
    #[default]
    None,
    /// Bodies cannot interpenetrate; the dynamic one bounces
    Collide,
    /// Bodies pass through each other; the first overlap is reported
    ContactOnly,
}

/// Symmetric category × category interaction table
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionMatrix {
    table: [[Interaction; 3]; 3],
}

impl CollisionMatrix {
    /// Every pair ignores every other
    pub fn empty() -> Self {
        Self {
            table: [[Interaction::None; 3]; 3],
        }
    }

    pub fn set(&mut self, a: Category, b: Category, interaction: Interaction) -> &mut Self {
        self.table[a.index()][b.index()] = interaction;
        self.table[b.index()][a.index()] = interaction;
        self
    }

    pub fn interaction(&self, a: Category, b: Category) -> Interaction {
        self.table[a.index()][b.index()]
    }
}

impl Default for CollisionMatrix {
    /// Ball bounces off the boundary and passes through platforms
    fn default() -> Self {
        let mut matrix = Self::empty();
        matrix
            .set(Category::Ball, Category::Boundary, Interaction::Collide)
            .set(Category::Ball, Category::Platform, Interaction::ContactOnly);
        matrix
    }
}

/// Collider geometry, relative to the body position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    /// Solid box
    Rect { half_extents: Vec2 },
    /// Hollow frame; collides on its inside walls
    EdgeLoop { half_extents: Vec2 },
}

/// A simulated body
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: BodyId,
    pub category: Category,
    pub shape: Shape,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Dynamic bodies feel gravity and forces; static ones never move on their own
    pub dynamic: bool,
    pub restitution: f32,
    pub mass: f32,
    /// Force accumulated since the last step
    force: Vec2,
}

impl Body {
    /// Gravity-driven circle
    pub fn dynamic_circle(
        category: Category,
        radius: f32,
        mass: f32,
        restitution: f32,
        pos: Vec2,
    ) -> Self {
        Self {
            id: BodyId::UNASSIGNED,
            category,
            shape: Shape::Circle { radius },
            pos,
            vel: Vec2::ZERO,
            dynamic: true,
            restitution,
            mass,
            force: Vec2::ZERO,
        }
    }

    /// Immovable solid box of the given full size
    pub fn static_rect(category: Category, size: Vec2, pos: Vec2) -> Self {
        Self::fixed(category, Shape::Rect { half_extents: size * 0.5 }, pos)
    }

    /// Immovable hollow frame of the given full size
    pub fn edge_loop(category: Category, size: Vec2, pos: Vec2) -> Self {
        Self::fixed(category, Shape::EdgeLoop { half_extents: size * 0.5 }, pos)
    }

    fn fixed(category: Category, shape: Shape, pos: Vec2) -> Self {
        Self {
            id: BodyId::UNASSIGNED,
            category,
            shape,
            pos,
            vel: Vec2::ZERO,
            dynamic: false,
            restitution: 0.0,
            mass: f32::INFINITY,
            force: Vec2::ZERO,
        }
    }

    /// Queue a force for the next step (cleared afterwards)
    pub fn apply_force(&mut self, force: Vec2) {
        if self.dynamic {
            self.force += force;
        }
    }

    pub fn pending_force(&self) -> Vec2 {
        self.force
    }

    /// World-space bounding box
    pub fn aabb(&self) -> Aabb {
        match self.shape {
            Shape::Circle { radius } => Aabb::square(self.pos, radius * 2.0),
            Shape::Rect { half_extents } | Shape::EdgeLoop { half_extents } => Aabb {
                center: self.pos,
                half_extents,
            },
        }
    }
}

/// A begin-contact notification between a dynamic body and another body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    /// The dynamic body
    pub a: BodyId,
    pub a_category: Category,
    /// The body it touched
    pub b: BodyId,
    pub b_category: Category,
    /// Points from `b` toward `a`
    pub normal: Vec2,
}

/// Owns all bodies and advances them
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    pub gravity: Vec2,
    matrix: CollisionMatrix,
    /// Sorted by id for deterministic iteration
    bodies: Vec<Body>,
    /// Contact-only pairs overlapping at the end of the last step
    touching: BTreeSet<(BodyId, BodyId)>,
    next_id: u32,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2, matrix: CollisionMatrix) -> Self {
        Self {
            gravity,
            matrix,
            bodies: Vec::new(),
            touching: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Add a body and return its handle
    pub fn insert(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        // Ids only grow, so pushing keeps the vec sorted
        self.bodies.push(body);
        id
    }

    /// Detach a body from the simulation
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let index = self.index_of(id)?;
        self.touching.retain(|&(a, b)| a != id && b != id);
        Some(self.bodies.remove(index))
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.index_of(id).map(|i| &mut self.bodies[i])
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of bodies in a category
    pub fn count(&self, category: Category) -> usize {
        self.bodies.iter().filter(|b| b.category == category).count()
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.binary_search_by_key(&id, |b| b.id).ok()
    }

    /// Advance by `dt` and return the contacts that began during this step
    pub fn step(&mut self, dt: f32) -> Vec<ContactEvent> {
        // Integrate: semi-implicit Euler, forces last one step
        for body in self.bodies.iter_mut().filter(|b| b.dynamic) {
            let accel = self.gravity + body.force / body.mass;
            body.vel += accel * dt;
            body.pos += body.vel * dt;
            body.force = Vec2::ZERO;
        }

        let mut events = Vec::new();
        let mut touching = BTreeSet::new();

        for i in 0..self.bodies.len() {
            if !self.bodies[i].dynamic {
                continue;
            }

            for j in 0..self.bodies.len() {
                if i == j {
                    continue;
                }
                let other = self.bodies[j];
                let body = self.bodies[i];
                let interaction = self.matrix.interaction(body.category, other.category);
                if interaction == Interaction::None {
                    continue;
                }

                let Shape::Circle { radius } = body.shape else {
                    continue;
                };
                let hits = overlaps(body.pos, radius, &other);

                match interaction {
                    Interaction::None => {}
                    Interaction::Collide => {
                        let body = &mut self.bodies[i];
                        for hit in hits {
                            body.pos += hit.normal * hit.penetration;
                            body.vel = bounce_velocity(body.vel, hit.normal, body.restitution);
                        }
                    }
                    Interaction::ContactOnly => {
                        let Some(hit) = hits.first() else {
                            continue;
                        };
                        let pair = (body.id, other.id);
                        touching.insert(pair);
                        if !self.touching.contains(&pair) {
                            events.push(ContactEvent {
                                a: body.id,
                                a_category: body.category,
                                b: other.id,
                                b_category: other.category,
                                normal: hit.normal,
                            });
                        }
                    }
                }
            }
        }

        self.touching = touching;
        events
    }
}

/// Every overlap between a circle and another body's shape
fn overlaps(center: Vec2, radius: f32, other: &Body) -> Vec<CollisionResult> {
    match other.shape {
        // Circle pairs are not simulated; the ball is the only circle
        Shape::Circle { .. } => Vec::new(),
        Shape::Rect { .. } => {
            let hit = circle_aabb_collision(center, radius, &other.aabb());
            if hit.hit { vec![hit] } else { Vec::new() }
        }
        Shape::EdgeLoop { .. } => circle_edge_loop_collisions(center, radius, &other.aabb()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 120.0;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::new(0.0, -980.0), CollisionMatrix::default())
    }

    fn ball(pos: Vec2) -> Body {
        Body::dynamic_circle(Category::Ball, 16.0, 0.05, 0.75, pos)
    }

    #[test]
    fn test_category_bits_are_exclusive() {
        let mut seen = 0u32;
        for category in Category::ALL {
            assert_eq!(seen & category.bit(), 0);
            seen |= category.bit();
        }
        assert_eq!(seen, 0b111);
    }

    #[test]
    fn test_default_matrix() {
        let m = CollisionMatrix::default();
        assert_eq!(
            m.interaction(Category::Ball, Category::Boundary),
            Interaction::Collide
        );
        assert_eq!(
            m.interaction(Category::Platform, Category::Ball),
            Interaction::ContactOnly
        );
        assert_eq!(
            m.interaction(Category::Platform, Category::Boundary),
            Interaction::None
        );
        assert_eq!(
            m.interaction(Category::Ball, Category::Ball),
            Interaction::None
        );
    }

    #[test]
    fn test_gravity_only_moves_dynamic_bodies() {
        let mut w = world();
        let b = w.insert(ball(Vec2::new(0.0, 100.0)));
        let p = w.insert(Body::static_rect(
            Category::Platform,
            Vec2::new(96.0, 16.0),
            Vec2::new(300.0, 0.0),
        ));
        w.step(DT);
        assert!(w.get(b).unwrap().vel.y < 0.0);
        assert!(w.get(b).unwrap().pos.y < 100.0);
        assert_eq!(w.get(p).unwrap().pos, Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_force_lasts_one_step() {
        let mut w = PhysicsWorld::new(Vec2::ZERO, CollisionMatrix::default());
        let b = w.insert(ball(Vec2::ZERO));
        w.get_mut(b).unwrap().apply_force(Vec2::new(500.0, 0.0));
        w.step(DT);
        let vx = w.get(b).unwrap().vel.x;
        assert!((vx - 500.0 / 0.05 * DT).abs() < 1e-3);
        assert_eq!(w.get(b).unwrap().pending_force(), Vec2::ZERO);
        w.step(DT);
        assert!((w.get(b).unwrap().vel.x - vx).abs() < 1e-6);
    }

    #[test]
    fn test_ball_passes_through_platform_and_reports_once() {
        let mut w = world();
        let b = w.insert(ball(Vec2::new(0.0, 30.0)));
        let p = w.insert(Body::static_rect(
            Category::Platform,
            Vec2::new(96.0, 16.0),
            Vec2::ZERO,
        ));
        w.get_mut(b).unwrap().vel = Vec2::new(0.0, -600.0);

        let mut events = Vec::new();
        for _ in 0..20 {
            events.extend(w.step(DT));
        }

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].a, b);
        assert_eq!(events[0].b, p);
        assert!(events[0].normal.y > 0.0);
        // Contact does not stop the ball
        assert!(w.get(b).unwrap().pos.y < -30.0);
    }

    #[test]
    fn test_boundary_bounce_loses_a_quarter() {
        let mut w = PhysicsWorld::new(Vec2::ZERO, CollisionMatrix::default());
        w.insert(Body::edge_loop(
            Category::Boundary,
            Vec2::new(400.0, 800.0),
            Vec2::ZERO,
        ));
        let b = w.insert(ball(Vec2::new(182.0, 0.0)));
        w.get_mut(b).unwrap().vel = Vec2::new(400.0, 0.0);

        w.step(DT);

        let body = w.get(b).unwrap();
        assert!((body.vel.x + 300.0).abs() < 1e-3);
        assert!(body.pos.x + 16.0 <= 200.0 + 1e-3);
    }

    #[test]
    fn test_remove_detaches_body() {
        let mut w = world();
        let b = w.insert(ball(Vec2::ZERO));
        let p = w.insert(Body::static_rect(
            Category::Platform,
            Vec2::new(96.0, 16.0),
            Vec2::ZERO,
        ));
        assert!(w.remove(p).is_some());
        assert!(!w.contains(p));
        assert!(w.remove(p).is_none());
        assert!(w.step(DT).is_empty());
        assert_eq!(w.count(Category::Ball), 1);
        assert!(w.contains(b));
    }

    #[test]
    fn test_ids_stay_sorted_after_removal() {
        let mut w = world();
        let ids: Vec<_> = (0..5)
            .map(|i| {
                w.insert(Body::static_rect(
                    Category::Platform,
                    Vec2::ONE,
                    Vec2::new(0.0, i as f32),
                ))
            })
            .collect();
        w.remove(ids[2]);
        let late = w.insert(ball(Vec2::ZERO));
        assert!(w.bodies().zip(w.bodies().skip(1)).all(|(a, b)| a.id < b.id));
        assert!(w.get(ids[4]).is_some());
        assert!(w.get(late).is_some());
    }
}
