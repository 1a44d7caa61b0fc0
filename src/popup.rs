use glam::Vec2;

/// How long a popup stays on screen (seconds).
const LIFE_SPAN: f64 = 1.5;
/// Sparks launched per popup.
const NUM_PARTICLES: usize = 12;
/// Initial particle speed (cells/second).
const BURST_SPEED: f32 = 15.0;
/// Terminal cells are taller than wide; squash the vertical component.
const VERTICAL_SCALE: f32 = 0.7;
/// Constant upward kick at launch (rows grow downward).
const UPWARD_BIAS: f32 = 10.0;
/// Downward acceleration (cells/second^2).
const GRAVITY: f32 = 19.6;
/// Rows 1..=6 belong to the consumer's HUD; particles never render there.
const FLOOR_ROW: f32 = 7.0;
const GLYPHS: [char; 4] = ['*', '+', '.', '\''];
/// ANSI color codes: red, yellow, cyan, white.
const PALETTE: [u8; 4] = [91, 93, 96, 97];

/// One draw primitive: a colored character at a 1-based terminal cell.
/// The consumer's terminal layer owns turning these into escape codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub col: u16,
    pub row: u16,
    /// ANSI SGR color code.
    pub color: u8,
    pub ch: char,
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    vel: Vec2,
    glyph: char,
    color: u8,
    /// Fixed per-particle seed for the deterministic fade flicker.
    seed: u32,
}

/// A `+N!` score burst: a label plus a ring of ballistic sparks.
///
/// Everything is fixed at construction — birth time, velocities, glyphs,
/// colors. Rendering only derives positions from `now`, so the popup is
/// freely re-renderable and owns no heap resources.
#[derive(Debug)]
pub struct ScorePopup {
    col: u16,
    row: u16,
    value: u64,
    birth: f64,
    particles: [Particle; NUM_PARTICLES],
}

impl ScorePopup {
    /// `now` is monotonic seconds from the caller's clock; it becomes the
    /// birth time. Particle *i* launches at angle `TAU*i/12` with a
    /// uniform 1.0..1.5x speed jitter and an upward kick.
    pub fn new(col: u16, row: u16, value: u64, now: f64, rng: &mut fastrand::Rng) -> Self {
        let particles = std::array::from_fn(|i| {
            let angle = std::f32::consts::TAU * i as f32 / NUM_PARTICLES as f32;
            let jitter = 1.0 + rng.f32() * 0.5;
            Particle {
                vel: Vec2::new(
                    angle.cos() * BURST_SPEED * jitter,
                    angle.sin() * BURST_SPEED * VERTICAL_SCALE * jitter - UPWARD_BIAS,
                ),
                glyph: GLYPHS[rng.usize(0..GLYPHS.len())],
                color: PALETTE[rng.usize(0..PALETTE.len())],
                seed: rng.u32(..),
            }
        });
        Self {
            col,
            row,
            value,
            birth: now,
            particles,
        }
    }

    /// True once the popup has outlived its lifespan.
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.birth > LIFE_SPAN
    }

    /// Push draw primitives for the popup at time `now`: the label, then
    /// every visible particle at its ballistic position. Mutates nothing,
    /// so equal `now` values always produce equal output.
    pub fn render(&self, now: f64, out: &mut Vec<Glyph>) {
        let life_ratio = ((now - self.birth) / LIFE_SPAN) as f32;
        // Label cools off white -> yellow -> red over the lifespan.
        let label_color = if life_ratio < 0.33 {
            97
        } else if life_ratio < 0.67 {
            93
        } else {
            91
        };
        self.push_label(label_color, out);

        let t = (now - self.birth) as f32;
        let origin = Vec2::new(self.col as f32 + 1.0, self.row as f32 + 1.0);
        for p in &self.particles {
            let pos = origin + p.vel * t + Vec2::new(0.0, 0.5 * GRAVITY * t * t);
            if pos.x < 1.0 || pos.y < FLOOR_ROW {
                continue;
            }
            // Past half life, drop a particle for this frame with a chance
            // ramping linearly to 1.0 at end of life. The roll hashes the
            // particle seed with the timestamp bits so it flickers across
            // frames but repeats exactly for the same `now`.
            if life_ratio > 0.5 && flicker(p.seed, now) < (life_ratio - 0.5) * 2.0 {
                continue;
            }
            out.push(Glyph {
                col: pos.x as u16,
                row: pos.y as u16,
                color: p.color,
                ch: p.glyph,
            });
        }
    }

    /// Emit `+N!` one character per cell, starting at the popup origin.
    fn push_label(&self, color: u8, out: &mut Vec<Glyph>) {
        let mut digits = [0u8; 20];
        let mut n = self.value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        let mut col = self.col;
        out.push(Glyph {
            col,
            row: self.row,
            color,
            ch: '+',
        });
        for i in (0..len).rev() {
            col += 1;
            out.push(Glyph {
                col,
                row: self.row,
                color,
                ch: digits[i] as char,
            });
        }
        out.push(Glyph {
            col: col + 1,
            row: self.row,
            color,
            ch: '!',
        });
    }
}

/// Deterministic per-(particle, frame) roll in [0, 1).
fn flicker(seed: u32, now: f64) -> f32 {
    let bits = now.to_bits();
    let h = seed
        .wrapping_mul(73856093)
        .wrapping_add((bits as u32).wrapping_mul(19349663))
        ^ ((bits >> 32) as u32).wrapping_mul(83492791);
    (h >> 8) as f32 / (1u32 << 24) as f32
}
