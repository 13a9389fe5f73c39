//! Body store: live bodies in insertion order with a population cap

use glam::Vec2;
use rand::Rng;

use super::body::{Body, random_velocity};
use crate::consts::*;

/// Ordered collection of live bodies.
///
/// Insertion order is iteration order; when the store grows past `cap` the
/// oldest bodies are evicted from the front.
#[derive(Debug, Clone)]
pub struct BodyStore {
    bodies: Vec<Body>,
    cap: usize,
    next_id: u32,
}

impl BodyStore {
    /// Create an empty store. A zero cap is raised to 1.
    pub fn new(cap: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(cap.max(1) + 1),
            cap: cap.max(1),
            next_id: 1,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Append a body, assigning it the next id, then evict from the front until
    /// the store is back within its cap. Returns the evicted bodies (oldest first).
    pub fn add(&mut self, mut body: Body) -> Vec<Body> {
        body.id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        log::debug!("Adding body {} at ({:.1}, {:.1})", body.id, body.pos.x, body.pos.y);
        self.bodies.push(body);

        let excess = self.bodies.len().saturating_sub(self.cap);
        let evicted: Vec<Body> = self.bodies.drain(..excess).collect();
        for body in &evicted {
            log::debug!("Evicted body {} (cap {})", body.id, self.cap);
        }
        evicted
    }

    /// Move every body to its index-derived home position with a fresh random
    /// velocity. Radius, color and count are untouched.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, max_speed: f32) {
        for (index, body) in self.bodies.iter_mut().enumerate() {
            body.pos = reset_position(index);
            body.vel = random_velocity(rng, max_speed);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Body> {
        self.bodies.iter_mut()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }
}

impl Default for BodyStore {
    fn default() -> Self {
        Self::new(POPULATION_CAP)
    }
}

impl<'a> IntoIterator for &'a BodyStore {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Home position of the body at `index` after a reset
pub fn reset_position(index: usize) -> Vec2 {
    Vec2::new(
        RESET_ORIGIN + RESET_STEP_X * index as f32,
        RESET_ORIGIN + RESET_STEP_Y * (index % RESET_ROWS) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Color;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::ZERO, 10.0, Color::WHITE, 0.8).unwrap()
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = BodyStore::new(15);
        for i in 0..3 {
            let evicted = store.add(body_at(i as f32 * 10.0, 0.0));
            assert!(evicted.is_empty());
        }
        let ids: Vec<u32> = store.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.get(2).map(|b| b.pos.x), Some(20.0));
    }

    #[test]
    fn test_add_evicts_oldest_at_cap() {
        let mut store = BodyStore::new(3);
        for i in 0..5 {
            store.add(body_at(i as f32, 0.0));
        }
        assert_eq!(store.len(), 3);
        let ids: Vec<u32> = store.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn test_add_returns_evicted() {
        let mut store = BodyStore::new(1);
        store.add(body_at(1.0, 0.0));
        let evicted = store.add(body_at(2.0, 0.0));
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].id, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_zero_cap_is_raised() {
        let mut store = BodyStore::new(0);
        assert_eq!(store.cap(), 1);
        store.add(body_at(1.0, 0.0));
        store.add(body_at(2.0, 0.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reset_layout() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut store = BodyStore::new(15);
        let radii = [20.0, 25.0, 30.0];
        let colors = [Color::WHITE, Color::BLUE, Color::RED];
        for (r, c) in radii.iter().zip(colors) {
            let body = Body::new(Vec2::new(333.0, 444.0), Vec2::new(9.0, 9.0), *r, c, 0.8).unwrap();
            store.add(body);
        }

        store.reset(&mut rng, 4.0);

        let positions: Vec<Vec2> = store.iter().map(|b| b.pos).collect();
        assert_eq!(
            positions,
            vec![Vec2::new(100.0, 100.0), Vec2::new(200.0, 150.0), Vec2::new(300.0, 200.0)]
        );
        for (i, body) in store.iter().enumerate() {
            assert_eq!(body.radius, radii[i]);
            assert_eq!(body.color, colors[i]);
            assert!(body.vel.x.abs() <= 4.0 && body.vel.y.abs() <= 4.0);
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_reset_with_non_finite_speed_stops_bodies() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut store = BodyStore::new(15);
        store.add(Body::new(Vec2::new(333.0, 444.0), Vec2::new(9.0, 9.0), 20.0, Color::WHITE, 0.8).unwrap());
        store.add(Body::new(Vec2::new(50.0, 60.0), Vec2::new(-1.0, 2.0), 25.0, Color::BLUE, 0.8).unwrap());

        for speed in [f32::NAN, f32::INFINITY] {
            store.reset(&mut rng, speed);
            assert!(store.iter().all(|b| b.vel == Vec2::ZERO));
            assert_eq!(store.get(1).map(|b| b.pos), Some(Vec2::new(200.0, 150.0)));
        }
    }

    #[test]
    fn test_reset_position_wraps_rows() {
        assert_eq!(reset_position(3), Vec2::new(400.0, 100.0));
        assert_eq!(reset_position(4), Vec2::new(500.0, 150.0));
    }
}
