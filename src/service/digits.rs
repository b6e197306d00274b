//! Seed expansion into raw key positions.
//!
//! A working value expands into one [`RawPosition`] per generated character:
//! a decimal digit and the map class (digit or letter) that renders it.
//!
//! The class pattern over the first `min(n, 64)` positions is a bijection of
//! the working value modulo `2^min(n, 64)`. Consecutive working values are
//! never congruent, so two adjacent keys in a chain always disagree on the
//! class of at least one position. Digit and letter alphabets are disjoint,
//! which makes the rendered keys differ whatever the maps contain.

const STREAM_KEY: u64 = 0x6A09_E667_F3BC_C908;
const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const CLASS_OFFSET: u64 = 0xBB67_AE85_84CA_A73B;
const MIX_MULTIPLIER_A: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_MULTIPLIER_B: u64 = 0x94D0_49BB_1331_11EB;

/// One generated character before map lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPosition {
    /// Raw decimal digit, `0..=9`.
    pub digit: u8,
    /// Render through the digit to letter map instead of digit to digit.
    pub letter: bool,
}

/// SplitMix64 stream keyed by a working value.
#[derive(Debug, Clone)]
pub struct DigitStream {
    state: u64,
}

impl DigitStream {
    /// Create the stream for `working`.
    #[must_use]
    pub const fn new(working: u64) -> Self {
        Self {
            state: working ^ STREAM_KEY,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(MIX_MULTIPLIER_A);
        z = (z ^ (z >> 27)).wrapping_mul(MIX_MULTIPLIER_B);
        z ^ (z >> 31)
    }

    /// Next decimal digit.
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_digit(&mut self) -> u8 {
        (self.next_u64() % 10) as u8
    }

    /// Next coin flip.
    pub fn next_bit(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }
}

impl Iterator for DigitStream {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_digit())
    }
}

/// Class mask over the low `width` bits: bit `i` set means position `i`
/// renders as a letter.
///
/// For a fixed `width` in `1..=64` this is a bijection on
/// `working mod 2^width`.
#[must_use]
pub const fn class_mask(working: u64, width: u32) -> u64 {
    let mask = if width >= 64 {
        u64::MAX
    } else {
        (1_u64 << width) - 1
    };
    let shift = width.div_ceil(2);

    // Each step permutes the `width`-bit values: addition and odd
    // multiplication modulo 2^width, and x ^ (x >> s) for s >= 1.
    let mut x = working.wrapping_add(CLASS_OFFSET) & mask;
    x = x.wrapping_mul(MIX_MULTIPLIER_A) & mask;
    x ^= x >> shift;
    x = x.wrapping_mul(MIX_MULTIPLIER_B) & mask;
    x ^= x >> shift;
    x
}

/// Expand `working` into `count` raw positions.
#[must_use]
pub fn expand(working: u64, count: usize) -> Vec<RawPosition> {
    let width = u32::try_from(count.min(64)).unwrap_or(64);
    let mask = class_mask(working, width);
    let mut stream = DigitStream::new(working);

    (0..count)
        .map(|i| {
            let digit = stream.next_digit();
            let letter = if i < 64 {
                (mask >> i) & 1 == 1
            } else {
                stream.next_bit()
            };
            RawPosition { digit, letter }
        })
        .collect()
}
