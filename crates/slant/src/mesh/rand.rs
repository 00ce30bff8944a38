//! Reproducible random band templates (replay tokens).
//!
//! Model
//! - Pick the band family, the band count, cells per band, and a tilt from
//!   one RNG seeded by a `(seed, index)` token, then defer to
//!   `LayoutTemplate::bands`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::template::LayoutTemplate;
use super::types::Direction;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RandomCfg {
    pub max_bands: usize,
    pub max_cells_per_band: usize,
    /// Upper bound for the tilt fraction; clamped to [0, 0.95].
    pub max_slant: f64,
    /// Allow full-height (column) bands in addition to rows.
    pub allow_columns: bool,
}

impl Default for RandomCfg {
    fn default() -> Self {
        Self {
            max_bands: 3,
            max_cells_per_band: 3,
            max_slant: 0.6,
            allow_columns: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random band template. Equal tokens give equal templates.
pub fn draw_template(cfg: RandomCfg, tok: ReplayToken) -> LayoutTemplate {
    let mut rng = tok.to_std_rng();
    let major = if cfg.allow_columns && rng.gen_bool(0.5) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let bands = rng.gen_range(1..=cfg.max_bands.max(1));
    let max_cells = cfg.max_cells_per_band.max(1);
    let counts: Vec<usize> = (0..bands).map(|_| rng.gen_range(1..=max_cells)).collect();
    let max_slant = if cfg.max_slant.is_finite() {
        cfg.max_slant.clamp(0.0, 0.95)
    } else {
        0.0
    };
    let slant = rng.gen::<f64>() * max_slant;
    LayoutTemplate::bands(major, &counts, slant)
}
