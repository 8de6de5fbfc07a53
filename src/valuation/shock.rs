//! Market-rate shock sources.
//!
//! A shock is a fractional deviation applied multiplicatively to the quoted
//! rate: `market_rate = fx_rate * (1 + shock)`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Default half-width of the uniform shock band (2%).
pub const DEFAULT_SHOCK_BOUND: Decimal = dec!(0.02);

/// Decimal places kept when converting a sampled `f64` shock.
const SHOCK_SCALE: u32 = 8;

/// Produces one shock per trade.
pub trait ShockSource {
    fn next_shock(&mut self) -> Decimal;
}

impl<S: ShockSource + ?Sized> ShockSource for &mut S {
    fn next_shock(&mut self) -> Decimal {
        (**self).next_shock()
    }
}

/// Independent draws from a continuous uniform distribution over
/// `[-bound, +bound]`.
#[derive(Debug, Clone)]
pub struct UniformShock<R = StdRng> {
    rng: R,
    bound: Decimal,
}

impl UniformShock<StdRng> {
    /// Fresh OS entropy: not reproducible between runs.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible sequence for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> UniformShock<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            bound: DEFAULT_SHOCK_BOUND,
        }
    }

    /// Use a different band half-width.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is negative.
    pub fn with_bound(mut self, bound: Decimal) -> Self {
        assert!(
            bound >= Decimal::ZERO,
            "Shock bound must be non-negative, got {}",
            bound
        );
        self.bound = bound;
        self
    }
}

impl<R: Rng> ShockSource for UniformShock<R> {
    fn next_shock(&mut self) -> Decimal {
        let width = match self.bound.to_f64() {
            Some(width) if width > 0.0 => width,
            _ => return Decimal::ZERO,
        };
        let sample = self.rng.gen_range(-width..=width);
        // Rounding may nudge a sample past the bound by one ulp of the scale.
        Decimal::from_f64_retain(sample)
            .unwrap_or(Decimal::ZERO)
            .round_dp(SHOCK_SCALE)
            .clamp(-self.bound, self.bound)
    }
}

/// The same shock for every trade. `FixedShock(Decimal::ZERO)` leaves
/// market rates equal to quoted rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedShock(pub Decimal);

impl ShockSource for FixedShock {
    fn next_shock(&mut self) -> Decimal {
        self.0
    }
}

/// Replays a fixed list of shocks, then zero once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedShock {
    shocks: std::collections::VecDeque<Decimal>,
}

impl ScriptedShock {
    pub fn new(shocks: impl IntoIterator<Item = Decimal>) -> Self {
        Self {
            shocks: shocks.into_iter().collect(),
        }
    }
}

impl ShockSource for ScriptedShock {
    fn next_shock(&mut self) -> Decimal {
        self.shocks.pop_front().unwrap_or(Decimal::ZERO)
    }
}
