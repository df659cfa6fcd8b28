//! Random number generation
//!
//! Uses a seeded ChaCha RNG for reproducibility, exposing the dice
//! primitives the combat rules are written in.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Game random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: RNG state is not serialized - games restore with a new seed derived from the original.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

/// How a random value is resolved
///
/// `Minimise`/`Maximise` pin every die to its lowest/highest face,
/// `Average` uses the rounded-down mean.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Aspect {
    Minimise,
    Average,
    Maximise,
    #[default]
    Randomise,
}

impl Aspect {
    /// The aspect that produces the opposite extreme
    pub const fn inverted(self) -> Self {
        match self {
            Aspect::Minimise => Aspect::Maximise,
            Aspect::Maximise => Aspect::Minimise,
            other => other,
        }
    }
}

/// A `base + XdY` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RandomValue {
    pub base: i32,
    pub dice: i32,
    pub sides: i32,
}

impl RandomValue {
    pub const fn fixed(base: i32) -> Self {
        Self {
            base,
            dice: 0,
            sides: 0,
        }
    }

    pub const fn new(base: i32, dice: i32, sides: i32) -> Self {
        Self { base, dice, sides }
    }
}

/// A probability expressed as `numerator / denominator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomChance {
    pub numerator: i32,
    pub denominator: i32,
}

impl RandomChance {
    /// Chance as a float in `0.0..=1.0`
    pub fn as_fraction(&self) -> f64 {
        if self.denominator <= 0 {
            return 0.0;
        }
        self.numerator as f64 / self.denominator as f64
    }
}

fn dice_calc(num: i32, sides: i32, aspect: Aspect, rng: &mut GameRng) -> i32 {
    if num <= 0 || sides <= 0 {
        return 0;
    }
    match aspect {
        Aspect::Maximise => num * sides,
        Aspect::Minimise => num,
        Aspect::Average => num * (1 + sides) / 2,
        Aspect::Randomise => rng.damroll(num, sides),
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `0..n`
    ///
    /// Returns 0 if n is not positive.
    pub fn randint0(&mut self, n: i32) -> i32 {
        if n <= 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform value in `1..=n`
    ///
    /// Returns 0 if n is not positive.
    pub fn randint1(&mut self, n: i32) -> i32 {
        if n <= 0 {
            return 0;
        }
        self.rng.gen_range(1..=n)
    }

    /// Returns true with probability 1/n
    pub fn one_in(&mut self, n: i32) -> bool {
        self.randint0(n) == 0
    }

    /// Returns true with probability percent/100
    pub fn magik(&mut self, percent: i32) -> bool {
        self.randint0(100) < percent
    }

    /// Returns true with probability num/denom
    pub fn chance(&mut self, num: i32, denom: i32) -> bool {
        self.randint0(denom) < num
    }

    /// Check a [`RandomChance`]
    pub fn check(&mut self, chance: RandomChance) -> bool {
        self.chance(chance.numerator, chance.denominator)
    }

    /// Roll `num` dice with `sides` sides
    pub fn damroll(&mut self, num: i32, sides: i32) -> i32 {
        if sides <= 0 {
            return 0;
        }
        (0..num.max(0)).map(|_| self.randint1(sides)).sum()
    }

    /// Resolve a random value under the given aspect
    pub fn randcalc(&mut self, value: RandomValue, aspect: Aspect) -> i32 {
        value.base + dice_calc(value.dice, value.sides, aspect, self)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randint0_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let n = rng.randint0(10);
            assert!((0..10).contains(&n));
        }
    }

    #[test]
    fn test_randint1_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let n = rng.randint1(6);
            assert!((1..=6).contains(&n));
        }
    }

    #[test]
    fn test_damroll() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let n = rng.damroll(2, 6);
            assert!((2..=12).contains(&n));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.randint0(100), rng2.randint0(100));
        }
    }

    #[test]
    fn test_zero_inputs() {
        let mut rng = GameRng::new(42);
        assert_eq!(rng.randint0(0), 0);
        assert_eq!(rng.randint1(0), 0);
        assert_eq!(rng.damroll(0, 6), 0);
        assert_eq!(rng.damroll(2, 0), 0);
        assert!(rng.one_in(1));
        assert!(!rng.magik(0));
    }

    #[test]
    fn test_randcalc_aspects() {
        let mut rng = GameRng::new(7);
        let v = RandomValue::new(6, 1, 6);
        assert_eq!(rng.randcalc(v, Aspect::Minimise), 7);
        assert_eq!(rng.randcalc(v, Aspect::Maximise), 12);
        assert_eq!(rng.randcalc(v, Aspect::Average), 9);
        for _ in 0..100 {
            let r = rng.randcalc(v, Aspect::Randomise);
            assert!((7..=12).contains(&r));
        }
    }

    #[test]
    fn test_aspect_inversion() {
        assert_eq!(Aspect::Minimise.inverted(), Aspect::Maximise);
        assert_eq!(Aspect::Maximise.inverted(), Aspect::Minimise);
        assert_eq!(Aspect::Average.inverted(), Aspect::Average);
    }
}
