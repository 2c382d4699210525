use std::cmp::Ordering;

/// A closed interval of Unicode scalar values.
///
/// Ranges order by start ascending, then by end descending, so a wider range
/// sorts before a narrower one sharing its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    min: u32,
    max: u32,
}

impl Range {
    pub fn new(min: u32, max: u32) -> Self {
        debug_assert!(min <= max, "range start {min:#x} exceeds end {max:#x}");
        Self { min, max }
    }

    pub fn single(value: u32) -> Self {
        Self::new(value, value)
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Ord for Range {
    fn cmp(&self, other: &Self) -> Ordering {
        self.min
            .cmp(&other.min)
            .then_with(|| other.max.cmp(&self.max))
    }
}

impl PartialOrd for Range {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wider_range_sorts_first_on_equal_start() {
        let mut ranges = vec![
            Range::new(0x41, 0x42),
            Range::new(0x30, 0x39),
            Range::new(0x41, 0x5A),
        ];
        ranges.sort();
        assert_eq!(
            ranges,
            vec![
                Range::new(0x30, 0x39),
                Range::new(0x41, 0x5A),
                Range::new(0x41, 0x42),
            ]
        );
    }

    #[test]
    fn equality_follows_both_ends() {
        assert_eq!(Range::new(1, 5), Range::new(1, 5));
        assert_ne!(Range::new(1, 5), Range::new(1, 6));
        assert!(Range::single(7).contains(7));
        assert!(!Range::single(7).contains(8));
    }
}
