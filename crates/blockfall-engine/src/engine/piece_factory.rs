use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{BlockStyles, ShapeKind, Tetromino};

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator for piece generation. Using the same seed will produce the same
/// sequence of pieces, which makes a game reproducible for debugging.
///
/// Seeds are written as 32 hex digits, both by [`Display`](fmt::Display) and
/// by serde.
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceSeed;
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    Length { len: usize },
    #[display("invalid hex: unexpected character {digit:?}")]
    Digit { digit: char },
}

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl From<u128> for PieceSeed {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::Length { len: s.len() });
        }
        let num = s.chars().try_fold(0_u128, |acc, digit| {
            let value = digit.to_digit(16).ok_or(ParseSeedError::Digit { digit })?;
            Ok((acc << 4) | u128::from(value))
        })?;
        Ok(Self::from(num))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Where pieces spawn and how their blocks are styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceConfig<S> {
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub styles: BlockStyles<S>,
}

/// Builds pieces from an injected [`PieceConfig`].
///
/// Random pieces are drawn uniformly from the seven kinds; there is no bag.
#[derive(Debug, Clone)]
pub struct PieceFactory<S> {
    rng: Pcg32,
    config: PieceConfig<S>,
}

impl<S> PieceFactory<S>
where
    S: Clone,
{
    #[must_use]
    pub fn new(config: PieceConfig<S>, seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PieceConfig<S> {
        &self.config
    }

    /// Replaces the configuration. Pieces built earlier keep their position
    /// and styles.
    pub fn set_config(&mut self, config: PieceConfig<S>) {
        self.config = config;
    }

    #[must_use]
    pub fn spawn(&self, kind: ShapeKind) -> Tetromino<S> {
        let anchor = (self.config.spawn_x, self.config.spawn_y);
        Tetromino::spawn(kind, anchor, self.config.styles.get(kind))
    }

    pub fn random(&mut self) -> Tetromino<S> {
        let kind = self.rng.random();
        self.spawn(kind)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Block, ShapeStyle};

    use super::*;

    fn config(spawn_x: i32) -> PieceConfig<char> {
        PieceConfig {
            spawn_x,
            spawn_y: 0,
            styles: BlockStyles::from_fn(|kind| ShapeStyle::Uniform(kind.as_char())),
        }
    }

    fn seed() -> PieceSeed {
        PieceSeed::from(0x1234_5678_9abc_def0_1122_3344_5566_7788)
    }

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = PieceSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_parse_uppercase_hex() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.as_bytes()[..2], [0x01, 0x23]);
        }

        #[test]
        fn test_errors() {
            for input in [
                "",
                "0123456789abcdef0123456789abcde",
                "0123456789abcdef0123456789abcdef0",
                "ghijklmnopqrstuvwxyzghijklmnopqr",
                "+123456789abcdef0123456789abcdef",
            ] {
                let err = input.parse::<PieceSeed>().unwrap_err();
                assert!(err.to_string().contains("invalid hex"), "{input}: {err}");
                let json = format!("\"{input}\"");
                assert!(serde_json::from_str::<PieceSeed>(&json).is_err());
            }
        }
    }

    #[test]
    fn test_spawn_uses_config() {
        let factory = PieceFactory::new(config(5), seed());
        let piece = factory.spawn(ShapeKind::O);
        assert_eq!(piece.anchor(), (5, 0));
        assert!(piece.blocks().iter().all(|b| *b.style() == 'O'));
    }

    #[test]
    fn test_set_config_affects_only_new_pieces() {
        let mut factory = PieceFactory::new(config(5), seed());
        let before = factory.spawn(ShapeKind::T);
        factory.set_config(config(2));
        let after = factory.spawn(ShapeKind::T);
        assert_eq!(before.anchor(), (5, 0));
        assert_eq!(after.anchor(), (2, 0));
        assert_eq!(factory.config().spawn_x, 2);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceFactory::new(config(5), seed());
        let mut b = PieceFactory::new(config(5), seed());
        for _ in 0..20 {
            let (pa, pb) = (a.random(), b.random());
            assert_eq!(pa.kind(), pb.kind());
            let positions = |p: &Tetromino<char>| -> Vec<(i32, i32)> {
                p.blocks().iter().map(Block::position).collect()
            };
            assert_eq!(positions(&pa), positions(&pb));
        }
    }
}
