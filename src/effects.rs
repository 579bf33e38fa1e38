/// Presentation-only particle bursts and fireworks.
///
/// Fed from `FrameEvent`s after each tick.  Nothing here is read back by the
/// simulation, so it draws from its own RNG.

use rand::Rng;

use crate::events::{EffectColor, FrameEvent};

pub const PARTICLE_LIFETIME: u32 = 30;
pub const FIREWORK_FRAMES: u32 = 30;
pub const FIREWORK_SPARKS: u32 = 12;
const PARTICLE_MIN_SIZE: u32 = 3;
const PARTICLE_MAX_SPEED: f32 = 4.0;

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: u32,
    pub color: EffectColor,
    pub lifetime: u32,
}

impl Particle {
    /// Remaining opacity in `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        self.lifetime as f32 / PARTICLE_LIFETIME as f32
    }
}

#[derive(Clone, Debug)]
pub struct Firework {
    pub x: f32,
    pub y: f32,
    pub color: EffectColor,
    pub frame: u32,
}

impl Firework {
    /// `(x, y, size)` of every spark: a ring that spins and widens with time.
    pub fn sparks(&self) -> impl Iterator<Item = (f32, f32, u32)> + '_ {
        (0..FIREWORK_SPARKS).map(move |i| {
            let angle = ((i * 30 + self.frame * 3) % 360) as f32;
            let dist = (self.frame * 2) as f32;
            let (sin, cos) = angle.to_radians().sin_cos();
            let size = 4u32.saturating_sub(self.frame / 10).max(1);
            (self.x + cos * dist, self.y + sin * dist, size)
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct EffectField {
    pub particles: Vec<Particle>,
    pub fireworks: Vec<Firework>,
}

impl EffectField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn visual events into live effects; other events are ignored.
    pub fn absorb(&mut self, events: &[FrameEvent], rng: &mut impl Rng) {
        for event in events {
            match *event {
                FrameEvent::Explosion {
                    x,
                    y,
                    color,
                    count,
                    size,
                } => {
                    let max_size = size.max(PARTICLE_MIN_SIZE);
                    for _ in 0..count {
                        self.particles.push(Particle {
                            x,
                            y,
                            vx: rng.gen_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
                            vy: rng.gen_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
                            size: rng.gen_range(PARTICLE_MIN_SIZE..=max_size),
                            color,
                            lifetime: PARTICLE_LIFETIME,
                        });
                    }
                }
                FrameEvent::Firework { x, y, color } => {
                    self.fireworks.push(Firework {
                        x,
                        y,
                        color,
                        frame: 0,
                    });
                }
                _ => {}
            }
        }
    }

    /// Advance every effect by one frame and drop the expired ones.
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.lifetime = p.lifetime.saturating_sub(1);
        }
        self.particles.retain(|p| p.lifetime > 0);

        for fw in &mut self.fireworks {
            fw.frame += 1;
        }
        self.fireworks.retain(|fw| fw.frame <= FIREWORK_FRAMES);
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.fireworks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn explosion(count: u32, size: u32) -> FrameEvent {
        FrameEvent::Explosion {
            x: 100.0,
            y: 200.0,
            color: EffectColor::Gold,
            count,
            size,
        }
    }

    #[test]
    fn explosion_spawns_requested_particles() {
        let mut field = EffectField::new();
        field.absorb(&[explosion(18, 5)], &mut StdRng::seed_from_u64(1));
        assert_eq!(field.particles.len(), 18);
        for p in &field.particles {
            assert!((3..=5).contains(&p.size));
            assert!(p.vx.abs() <= 4.0 && p.vy.abs() <= 4.0);
            assert_eq!(p.lifetime, PARTICLE_LIFETIME);
        }
    }

    #[test]
    fn undersized_explosion_still_uses_minimum_size() {
        let mut field = EffectField::new();
        field.absorb(&[explosion(4, 1)], &mut StdRng::seed_from_u64(2));
        assert!(field.particles.iter().all(|p| p.size == 3));
    }

    #[test]
    fn particles_expire_after_lifetime() {
        let mut field = EffectField::new();
        field.absorb(&[explosion(5, 4)], &mut StdRng::seed_from_u64(3));
        for _ in 0..PARTICLE_LIFETIME - 1 {
            field.update();
        }
        assert_eq!(field.particles.len(), 5);
        field.update();
        assert!(field.particles.is_empty());
    }

    #[test]
    fn firework_lives_thirty_one_frames() {
        let mut field = EffectField::new();
        let fw = FrameEvent::Firework {
            x: 0.0,
            y: 0.0,
            color: EffectColor::Gold,
        };
        field.absorb(&[fw], &mut StdRng::seed_from_u64(4));
        for _ in 0..FIREWORK_FRAMES {
            field.update();
        }
        assert_eq!(field.fireworks.len(), 1);
        field.update();
        assert!(field.is_empty());
    }

    #[test]
    fn firework_sparks_start_at_centre() {
        let fw = Firework {
            x: 10.0,
            y: 20.0,
            color: EffectColor::Gold,
            frame: 0,
        };
        let sparks: Vec<_> = fw.sparks().collect();
        assert_eq!(sparks.len(), FIREWORK_SPARKS as usize);
        for (x, y, size) in sparks {
            assert!((x - 10.0).abs() < 1e-4 && (y - 20.0).abs() < 1e-4);
            assert_eq!(size, 4);
        }
    }

    #[test]
    fn non_visual_events_are_ignored() {
        let mut field = EffectField::new();
        field.absorb(
            &[FrameEvent::LevelUp { level: 2 }, FrameEvent::BossSpawned { hp: 1060 }],
            &mut StdRng::seed_from_u64(5),
        );
        assert!(field.is_empty());
    }
}
