//! Simulation session
//!
//! Owns the body store, arena, RNG and pause state. Hosts drive it with
//! [`Session::tick`] once per animation frame and forward input through
//! [`Session::toggle`], [`Session::reset`] and [`Session::add_body_at`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::body::{Arena, Body};
use super::store::BodyStore;
use super::tick::{StepReport, step};
use crate::error::Result;
use crate::settings::{Color, SimConfig};

/// Whether ticks currently advance the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Running,
    Paused,
}

/// Result of a tick request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The store advanced; the host should draw and schedule the next tick
    Stepped(StepReport),
    /// Paused: nothing happened and the tick chain ends here
    Skipped,
}

impl TickOutcome {
    pub fn should_reschedule(&self) -> bool {
        matches!(self, TickOutcome::Stepped(_))
    }
}

/// Bodies placed at startup: (x, y, radius, color)
pub const INITIAL_BODIES: [(f32, f32, f32, Color); 8] = [
    (100.0, 100.0, 20.0, Color::WHITE),
    (200.0, 150.0, 25.0, Color::BLUE),
    (300.0, 200.0, 30.0, Color::RED),
    (400.0, 100.0, 22.0, Color::WHITE),
    (500.0, 250.0, 28.0, Color::BLUE),
    (150.0, 300.0, 26.0, Color::RED),
    (250.0, 400.0, 24.0, Color::GREEN),
    (600.0, 350.0, 27.0, Color::GREEN),
];

/// Serializable view of the session for hosts and tooling
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub tick: u64,
    pub phase: SessionPhase,
    pub arena: Arena,
    pub bodies: &'a [Body],
}

/// A running simulation
#[derive(Debug, Clone)]
pub struct Session {
    config: SimConfig,
    arena: Arena,
    store: BodyStore,
    phase: SessionPhase,
    rng: Pcg32,
    seed: u64,
    time_ticks: u64,
}

impl Session {
    /// Create a session seeded with [`INITIAL_BODIES`]
    pub fn new(config: SimConfig) -> Result<Self> {
        let mut session = Self::empty(config)?;
        for (x, y, radius, color) in INITIAL_BODIES {
            let body = Body::spawn(
                Vec2::new(x, y),
                radius,
                color,
                session.config.restitution,
                session.config.max_speed,
                &mut session.rng,
            )?;
            session.add_body(body)?;
        }
        log::info!(
            "Session started: {} bodies, arena {}x{}, seed {}",
            session.store.len(),
            session.arena.width,
            session.arena.height,
            session.seed
        );
        Ok(session)
    }

    /// Create a session with no bodies
    pub fn empty(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let arena = Arena::new(config.arena_width, config.arena_height)?;
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        Ok(Self {
            store: BodyStore::new(config.population_cap),
            arena,
            phase: SessionPhase::Running,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            time_ticks: 0,
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of ticks that actually stepped
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Current bodies in store order, for drawing
    pub fn bodies(&self) -> &[Body] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &BodyStore {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            arena: self.arena,
            bodies: self.store.as_slice(),
        }
    }

    /// Run one frame. The pause flag is checked once, up front.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_paused() {
            return TickOutcome::Skipped;
        }
        let report = step(&mut self.store, &self.arena);
        self.time_ticks += 1;
        if report.contacts > 0 {
            log::trace!("Tick {}: {} contacts", self.time_ticks, report.contacts);
        }
        TickOutcome::Stepped(report)
    }

    /// Flip between running and paused.
    ///
    /// Returns `true` when the session just resumed, meaning the host has to
    /// restart its tick chain.
    pub fn toggle(&mut self) -> bool {
        self.phase = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
        };
        log::info!("Session {:?}", self.phase);
        self.phase == SessionPhase::Running
    }

    /// Return every body to its home position with a fresh velocity and resume.
    ///
    /// The host cancels its pending frame before calling this, then clears the
    /// surface and starts a new tick chain.
    pub fn reset(&mut self) {
        self.store.reset(&mut self.rng, self.config.max_speed);
        self.phase = SessionPhase::Running;
        log::info!("Session reset ({} bodies)", self.store.len());
    }

    /// Spawn a body at `(x, y)` with a random radius, palette color and
    /// velocity. Returns the new body's id.
    pub fn add_body_at(&mut self, x: f32, y: f32) -> Result<u32> {
        let radius = self
            .rng
            .random_range(self.config.spawn_radius_min..self.config.spawn_radius_max);
        let color = self.config.palette[self.rng.random_range(0..self.config.palette.len())];
        let body = Body::spawn(
            Vec2::new(x, y),
            radius,
            color,
            self.config.restitution,
            self.config.max_speed,
            &mut self.rng,
        )?;
        let id = self.add_body(body)?;
        log::debug!("Spawned body {} at ({:.0}, {:.0}), r={:.1}", id, x, y, radius);
        Ok(id)
    }

    /// Insert a prepared body, evicting the oldest past the population cap.
    /// Returns the id the store assigned.
    pub fn add_body(&mut self, body: Body) -> Result<u32> {
        self.arena.check_fits(body.radius)?;
        self.store.add(body);
        Ok(self.store.as_slice().last().map(|b| b.id).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimConfig {
        SimConfig {
            seed: Some(12345),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_seeds_initial_bodies() {
        let session = Session::new(config()).unwrap();
        assert_eq!(session.bodies().len(), INITIAL_BODIES.len());
        assert_eq!(session.phase(), SessionPhase::Running);
        for (body, (x, y, r, c)) in session.bodies().iter().zip(INITIAL_BODIES) {
            assert_eq!(body.pos, Vec2::new(x, y));
            assert_eq!(body.radius, r);
            assert_eq!(body.color, c);
            assert_eq!(body.restitution, 0.8);
        }
    }

    #[test]
    fn test_new_rejects_arena_too_small_for_seeds() {
        let cfg = SimConfig {
            arena_width: 55.0,
            arena_height: 55.0,
            spawn_radius_min: 5.0,
            spawn_radius_max: 10.0,
            ..config()
        };
        assert!(matches!(
            Session::new(cfg),
            Err(crate::Error::BodyTooLarge { .. })
        ));
    }

    #[test]
    fn test_paused_tick_is_skipped() {
        let mut session = Session::new(config()).unwrap();
        assert!(!session.toggle());
        assert!(session.is_paused());

        let before = session.bodies().to_vec();
        let outcome = session.tick();
        assert_eq!(outcome, TickOutcome::Skipped);
        assert!(!outcome.should_reschedule());
        assert_eq!(session.bodies(), before.as_slice());
        assert_eq!(session.time_ticks(), 0);

        assert!(session.toggle());
        assert!(session.tick().should_reschedule());
        assert_eq!(session.time_ticks(), 1);
    }

    #[test]
    fn test_reset_resumes_and_relayouts() {
        let mut session = Session::new(config()).unwrap();
        for _ in 0..50 {
            session.tick();
        }
        session.toggle();
        session.reset();
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.bodies()[1].pos, Vec2::new(200.0, 150.0));
        assert_eq!(session.bodies()[5].pos, Vec2::new(600.0, 200.0));
        assert_eq!(session.bodies()[1].radius, 25.0);
    }

    #[test]
    fn test_add_body_at_uses_spawn_ranges() {
        let mut session = Session::empty(config()).unwrap();
        for i in 0..40 {
            session.add_body_at(50.0 + i as f32, 60.0).unwrap();
        }
        assert_eq!(session.bodies().len(), 15);
        for body in session.bodies() {
            assert!((15.0..30.0).contains(&body.radius));
            assert!(session.config().palette.contains(&body.color));
            assert!(body.vel.x.abs() <= 4.0 && body.vel.y.abs() <= 4.0);
        }
        // Newest bodies survive
        assert_eq!(session.bodies().last().map(|b| b.id), Some(40));
        assert_eq!(session.bodies()[0].id, 26);
    }

    #[test]
    fn test_add_body_rejects_non_finite_position() {
        let mut session = Session::empty(config()).unwrap();
        assert!(session.add_body_at(f32::NAN, 10.0).is_err());
        assert!(session.bodies().is_empty());
    }

    #[test]
    fn test_add_body_rejects_body_larger_than_arena() {
        let cfg = SimConfig {
            arena_width: 640.0,
            arena_height: 480.0,
            ..config()
        };
        let mut session = Session::new(cfg).unwrap();
        let before = session.bodies().to_vec();

        let huge = Body::new(Vec2::new(320.0, 240.0), Vec2::new(3.0, 0.0), 500.0, Color::WHITE, 0.8).unwrap();
        assert!(matches!(
            session.add_body(huge),
            Err(crate::Error::BodyTooLarge { radius, .. }) if radius == 500.0
        ));
        assert_eq!(session.bodies(), before.as_slice());

        // A body that does fit goes through and containment still holds
        let fits = Body::new(Vec2::new(5.0, 5.0), Vec2::new(-2.0, -2.0), 240.0, Color::RED, 0.8).unwrap();
        let id = session.add_body(fits).unwrap();
        assert_eq!(session.bodies().last().map(|b| b.id), Some(id));
        for _ in 0..20 {
            session.tick();
            for b in session.bodies() {
                assert!(b.pos.x >= b.radius && b.pos.x <= 640.0 - b.radius);
                assert!(b.pos.y >= b.radius && b.pos.y <= 480.0 - b.radius);
            }
        }
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let mut a = Session::new(config()).unwrap();
        let mut b = Session::new(config()).unwrap();
        for _ in 0..200 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.bodies(), b.bodies());
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = Session::new(config()).unwrap();
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        assert!(json.contains("\"#0066FF\""));
    }
}
