//! UTF-16 surrogate handling.
//!
//! The translator scans 16-bit code units while the source dialect talks
//! about scalar values. Supplementary characters enter the translation only
//! through [`TranslationSession::absorb_surrogate_pair`], and engines that
//! match code units pairwise get their classes split by
//! [`high_surrogate_ranges`] and [`low_surrogate_ranges`].

use super::range::Range;
use super::session::TranslationSession;
use super::Result;

pub const HIGH_SURROGATE_MIN: u16 = 0xD800;
pub const HIGH_SURROGATE_MAX: u16 = 0xDBFF;
pub const LOW_SURROGATE_MIN: u16 = 0xDC00;
pub const LOW_SURROGATE_MAX: u16 = 0xDFFF;
pub const SUPPLEMENTARY_MIN: u32 = 0x10000;

pub fn is_surrogate(unit: u16) -> bool {
    (HIGH_SURROGATE_MIN..=LOW_SURROGATE_MAX).contains(&unit)
}

pub fn is_high_surrogate(unit: u16) -> bool {
    (HIGH_SURROGATE_MIN..=HIGH_SURROGATE_MAX).contains(&unit)
}

pub fn is_low_surrogate(unit: u16) -> bool {
    (LOW_SURROGATE_MIN..=LOW_SURROGATE_MAX).contains(&unit)
}

pub fn combine_pair(high: u16, low: u16) -> u32 {
    SUPPLEMENTARY_MIN
        + ((u32::from(high - HIGH_SURROGATE_MIN)) << 10)
        + u32::from(low - LOW_SURROGATE_MIN)
}

/// High surrogate of a supplementary scalar value.
pub fn high_surrogate(value: u32) -> u16 {
    debug_assert!(value >= SUPPLEMENTARY_MIN);
    HIGH_SURROGATE_MIN + ((value - SUPPLEMENTARY_MIN) >> 10) as u16
}

/// Low surrogate of a supplementary scalar value.
pub fn low_surrogate(value: u32) -> u16 {
    debug_assert!(value >= SUPPLEMENTARY_MIN);
    LOW_SURROGATE_MIN + ((value - SUPPLEMENTARY_MIN) & 0x3FF) as u16
}

/// A run of high surrogates; every low surrogate may follow any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighSurrogateRange {
    pub min: u16,
    pub max: u16,
}

/// One high surrogate followed by a run of low surrogates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowSurrogateRange {
    pub high: u16,
    pub low_min: u16,
    pub low_max: u16,
}

/// High-surrogate runs whose every pairing with a low surrogate falls
/// inside one of `ranges`.
///
/// `ranges` must lie above the BMP. Partially covered high units at either
/// end of a range are left to [`low_surrogate_ranges`].
pub fn high_surrogate_ranges(ranges: &[Range]) -> Vec<HighSurrogateRange> {
    let mut out = Vec::with_capacity(ranges.len());
    for range in ranges {
        let mut min = i32::from(high_surrogate(range.min()));
        let mut max = i32::from(high_surrogate(range.max()));
        if low_surrogate(range.min()) != LOW_SURROGATE_MIN {
            min += 1;
        }
        if low_surrogate(range.max()) != LOW_SURROGATE_MAX {
            max -= 1;
        }
        if max >= min {
            out.push(HighSurrogateRange {
                min: min as u16,
                max: max as u16,
            });
        }
    }
    out
}

/// Pairings for the high units that [`high_surrogate_ranges`] leaves out
/// because a range only covers part of their low-surrogate span.
pub fn low_surrogate_ranges(ranges: &[Range]) -> Vec<LowSurrogateRange> {
    let mut out = Vec::new();
    for range in ranges {
        let min_high = high_surrogate(range.min());
        let min_low = low_surrogate(range.min());
        let max_high = high_surrogate(range.max());
        let max_low = low_surrogate(range.max());
        if min_high == max_high {
            if min_low != LOW_SURROGATE_MIN || max_low != LOW_SURROGATE_MAX {
                out.push(LowSurrogateRange {
                    high: min_high,
                    low_min: min_low,
                    low_max: max_low,
                });
            }
            continue;
        }
        if min_low != LOW_SURROGATE_MIN {
            out.push(LowSurrogateRange {
                high: min_high,
                low_min: min_low,
                low_max: LOW_SURROGATE_MAX,
            });
        }
        if max_low != LOW_SURROGATE_MAX {
            out.push(LowSurrogateRange {
                high: max_high,
                low_min: LOW_SURROGATE_MIN,
                low_max: max_low,
            });
        }
    }
    out
}

impl TranslationSession<'_> {
    /// Decodes the scalar value starting at the current unit.
    ///
    /// On a valid pair the cursor is left on the low surrogate, so callers
    /// advance past the whole character exactly as for a BMP unit.
    pub fn absorb_surrogate_pair(&mut self) -> Result<u32> {
        let first = self.cur();
        if !is_surrogate(first) || self.is_eos() {
            return Ok(u32::from(first));
        }
        if !is_high_surrogate(first) {
            return Err(self.error("invalid surrogate pair"));
        }
        self.advance();
        let second = self.cur();
        if self.is_eos() || !is_low_surrogate(second) {
            return Err(self.error("invalid surrogate pair"));
        }
        Ok(combine_pair(first, second))
    }
}
