//! Cosmetic Particles
//!
//! Bounded pool of decorative sparks. Particles are never read by combat
//! logic; they only share the tick so their motion lines up with projectiles.
//!
//! When a burst would overflow the pool it is truncated to the remaining
//! headroom. Existing particles are never evicted.

use bevy::math::Vec2;
use std::f32::consts::TAU;

use super::constants::{PARTICLE_DAMPING, PARTICLE_LIMIT};
use super::rng::RandomSource;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Units per tick
    pub velocity: Vec2,
    /// Seconds left
    pub lifetime: f32,
    pub color: [u8; 3],
    pub size: f32,
}

/// Shape of a spray of particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Burst {
    pub count: usize,
    /// Upper bound of the per-particle speed (units per tick)
    pub speed: f32,
    pub lifetime: f32,
}

impl Burst {
    /// A standard spray of `count` sparks.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            speed: 3.0,
            lifetime: 0.9,
        }
    }

    /// A single slow, short-lived ember.
    pub fn ember() -> Self {
        Self {
            count: 1,
            speed: 1.4,
            lifetime: 0.6,
        }
    }

    /// A single drop of blood.
    pub fn drip() -> Self {
        Self {
            count: 1,
            speed: 1.2,
            lifetime: 0.6,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::new(),
            capacity,
        }
    }

    /// Room left before the cap.
    pub fn headroom(&self) -> usize {
        self.capacity.saturating_sub(self.particles.len())
    }

    /// Spray a burst from `origin` in random directions.
    ///
    /// Returns how many particles were actually added.
    pub fn spawn_burst(
        &mut self,
        origin: Vec2,
        color: [u8; 3],
        burst: Burst,
        rng: &mut impl RandomSource,
    ) -> usize {
        let count = burst.count.min(self.headroom());

        for _ in 0..count {
            let angle = rng.next_f32() * TAU;
            let speed = rng.next_f32() * burst.speed;
            self.particles.push(Particle {
                position: origin,
                velocity: Vec2::from_angle(angle) * speed,
                lifetime: burst.lifetime,
                color,
                size: rng.range(2.0, 5.0),
            });
        }

        count
    }

    /// Advance every particle by one tick.
    ///
    /// Positions move by the undamped velocity, then velocity decays.
    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.position += particle.velocity;
            particle.lifetime -= dt;
            particle.velocity *= PARTICLE_DAMPING;
        }
        self.particles.retain(|particle| particle.lifetime > 0.0);
        self.particles.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(PARTICLE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::rng::SequenceRng;

    #[test]
    fn test_burst_is_truncated_to_headroom() {
        let mut pool = ParticlePool::default();
        let mut rng = SequenceRng::new(vec![0.1, 0.5, 0.9]);

        assert_eq!(pool.spawn_burst(Vec2::ZERO, [255, 255, 255], Burst::new(1380), &mut rng), 1380);
        assert_eq!(pool.spawn_burst(Vec2::ZERO, [255, 255, 255], Burst::new(50), &mut rng), 20);
        assert_eq!(pool.len(), PARTICLE_LIMIT);

        // A full pool silently accepts nothing
        assert_eq!(pool.spawn_burst(Vec2::ZERO, [255, 255, 255], Burst::new(5), &mut rng), 0);
        assert_eq!(pool.len(), PARTICLE_LIMIT);
    }

    #[test]
    fn test_particles_move_then_damp() {
        let mut pool = ParticlePool::new(4);
        // angle 0 (straight right), full speed, size roll
        let mut rng = SequenceRng::new(vec![0.0, 0.999_999, 0.5]);
        pool.spawn_burst(Vec2::new(10.0, 10.0), [1, 2, 3], Burst::new(1), &mut rng);

        let speed = pool.as_slice()[0].velocity.x;
        pool.update(1.0 / 60.0);

        let particle = &pool.as_slice()[0];
        assert!((particle.position.x - (10.0 + speed)).abs() < 1e-4);
        assert!((particle.velocity.x - speed * PARTICLE_DAMPING).abs() < 1e-4);
        assert!((particle.lifetime - (0.9 - 1.0 / 60.0)).abs() < 1e-6);
    }

    #[test]
    fn test_expired_particles_are_dropped() {
        let mut pool = ParticlePool::default();
        let mut rng = SequenceRng::constant(0.3);
        pool.spawn_burst(Vec2::ZERO, [0, 0, 0], Burst::ember(), &mut rng);
        pool.spawn_burst(Vec2::ZERO, [0, 0, 0], Burst::new(3), &mut rng);

        pool.update(0.7);
        assert_eq!(pool.len(), 3, "the ember outlives only 0.6s");

        pool.update(0.3);
        assert!(pool.is_empty());
    }
}
