//! Age-indexed husbandry reference ranges.
//!
//! The figures are transcribed from the broiler management guide the farm
//! operates against and are fixed at compile time. Ages missing from a
//! table fall back to [`ReferenceRange::DEFAULT`], an unbounded range that
//! classifies any non-negative value as normal.

/// Inclusive-ish `(low, high)` bound pair for one age and one metric.
/// Boundary handling (strict vs. inclusive) is the classifier's concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
}

impl ReferenceRange {
    /// Fallback for ages a table does not cover.
    pub const DEFAULT: ReferenceRange = ReferenceRange {
        low: 0.0,
        high: f64::INFINITY,
    };

    const fn new(low: f64, high: f64) -> Self {
        ReferenceRange { low, high }
    }
}

/// Mapping from flock age (days) to a reference range, with entries
/// sorted by age. Tables may be dense (every age) or sparse (guide
/// checkpoints only).
#[derive(Debug)]
pub struct ReferenceTable {
    entries: &'static [(u32, ReferenceRange)],
}

impl ReferenceTable {
    /// Range defined for exactly this age, if any.
    pub fn get(&self, age: u32) -> Option<ReferenceRange> {
        self.entries
            .binary_search_by_key(&age, |(a, _)| *a)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Range for this age, or the unbounded default when the table has
    /// no entry for it.
    pub fn range_or_default(&self, age: u32) -> ReferenceRange {
        self.get(age).unwrap_or(ReferenceRange::DEFAULT)
    }

    /// Ages the table explicitly covers, ascending.
    pub fn ages(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|(a, _)| *a)
    }
}

const fn r(low: f64, high: f64) -> ReferenceRange {
    ReferenceRange::new(low, high)
}

/// Expected daily water intake per bird, litres, ages 0-45.
pub static WATER_INTAKE: ReferenceTable = ReferenceTable {
    entries: &[
        (0, r(0.0059, 0.0118)),
        (1, r(0.0059, 0.0118)),
        (2, r(0.0118, 0.0177)),
        (3, r(0.0177, 0.0237)),
        (4, r(0.0237, 0.0296)),
        (5, r(0.0296, 0.0355)),
        (6, r(0.0355, 0.0414)),
        (7, r(0.0414, 0.0473)),
        (8, r(0.0473, 0.0532)),
        (9, r(0.0532, 0.0591)),
        (10, r(0.0591, 0.0650)),
        (11, r(0.0650, 0.0709)),
        (12, r(0.0709, 0.0768)),
        (13, r(0.0768, 0.0827)),
        (14, r(0.0827, 0.0887)),
        (15, r(0.0887, 0.0946)),
        (16, r(0.0946, 0.1005)),
        (17, r(0.1005, 0.1064)),
        (18, r(0.1064, 0.1123)),
        (19, r(0.1123, 0.1182)),
        (20, r(0.1182, 0.1241)),
        (21, r(0.1241, 0.1300)),
        (22, r(0.1300, 0.1359)),
        (23, r(0.1359, 0.1419)),
        (24, r(0.1419, 0.1478)),
        (25, r(0.1478, 0.1537)),
        (26, r(0.1537, 0.1596)),
        (27, r(0.1596, 0.1655)),
        (28, r(0.1655, 0.1714)),
        (29, r(0.1714, 0.1773)),
        (30, r(0.1773, 0.1832)),
        (31, r(0.1832, 0.1891)),
        (32, r(0.1891, 0.1951)),
        (33, r(0.1951, 0.2010)),
        (34, r(0.2010, 0.2069)),
        (35, r(0.2069, 0.2128)),
        (36, r(0.2128, 0.2187)),
        (37, r(0.2187, 0.2246)),
        (38, r(0.2246, 0.2305)),
        (39, r(0.2305, 0.2364)),
        (40, r(0.2364, 0.2423)),
        (41, r(0.2423, 0.2483)),
        (42, r(0.2483, 0.2542)),
        (43, r(0.2542, 0.2601)),
        (44, r(0.2601, 0.2660)),
        (45, r(0.2660, 0.2719)),
    ],
};

/// Expected daily feed intake per bird, kilograms. The guide only lists
/// weekly checkpoints; intermediate ages use the default range.
pub static FEED_INTAKE: ReferenceTable = ReferenceTable {
    entries: &[
        (0, r(0.005, 0.02)),
        (1, r(0.005, 0.02)),
        (8, r(0.035, 0.5)),
        (15, r(0.075, 0.90)),
        (22, r(0.125, 0.140)),
        (29, r(0.155, 0.17)),
        (36, r(0.185, 0.200)),
        (43, r(0.215, 0.230)),
    ],
};

/// Expected average bird weight, kilograms, ages 0-45.
///
/// The entries at ages 15 and 16 carry a transcription slip from the
/// production sheet (0.0919429 where the progression suggests 0.919429).
/// They are kept as-is so classifications match what the farm has been
/// shown historically.
pub static AVERAGE_WEIGHT: ReferenceTable = ReferenceTable {
    entries: &[
        (0, r(0.026429, 0.052857)),
        (1, r(0.026429, 0.052857)),
        (2, r(0.052857, 0.079286)),
        (3, r(0.072986, 0.105714)),
        (4, r(0.105714, 0.132143)),
        (5, r(0.132143, 0.158571)),
        (6, r(0.158571, 0.185)),
        (7, r(0.185, 0.251429)),
        (8, r(0.251429, 0.317857)),
        (9, r(0.317857, 0.384286)),
        (10, r(0.384286, 0.450714)),
        (11, r(0.450714, 0.517143)),
        (12, r(0.517143, 0.583571)),
        (13, r(0.583571, 0.65)),
        (14, r(0.65, 0.784714)),
        (15, r(0.784714, 0.0919429)),
        (16, r(0.0919429, 1.054143)),
        (17, r(1.054143, 1.188857)),
        (18, r(1.188857, 1.323571)),
        (19, r(1.323571, 1.458286)),
        (20, r(1.458286, 1.593)),
        (21, r(1.593, 1.810714)),
        (22, r(1.810714, 2.028429)),
        (23, r(2.028429, 2.246143)),
        (24, r(2.246143, 2.463857)),
        (25, r(2.463857, 2.681571)),
        (26, r(2.681571, 2.899286)),
        (27, r(2.899286, 3.117)),
        (28, r(3.117, 3.43)),
        (29, r(3.43, 3.743)),
        (30, r(3.743, 4.056)),
        (31, r(4.056, 4.369)),
        (32, r(4.369, 4.682)),
        (33, r(4.682, 4.995)),
        (34, r(4.995, 5.308)),
        (35, r(5.308, 5.716143)),
        (36, r(5.716143, 6.124286)),
        (37, r(6.124286, 6.532429)),
        (38, r(6.532429, 6.940571)),
        (39, r(6.940571, 7.348714)),
        (40, r(7.348714, 7.756857)),
        (41, r(7.756857, 8.165)),
        (42, r(8.165, 8.665857)),
        (43, r(8.665857, 9.166714)),
        (44, r(9.166714, 9.667571)),
        (45, r(9.667571, 10.16843)),
    ],
};

/// Brooding temperature band, degrees Celsius, at guide checkpoints.
pub static TEMPERATURE: ReferenceTable = ReferenceTable {
    entries: &[
        (1, r(29.0, 32.0)),
        (3, r(27.0, 30.0)),
        (6, r(25.0, 28.0)),
        (9, r(25.0, 27.0)),
        (12, r(25.0, 26.0)),
        (15, r(24.0, 25.0)),
    ],
};

/// Relative humidity band, percent. The guide holds 60-70% across all
/// checkpoints.
pub static HUMIDITY: ReferenceTable = ReferenceTable {
    entries: &[
        (1, r(60.0, 70.0)),
        (3, r(60.0, 70.0)),
        (6, r(60.0, 70.0)),
        (9, r(60.0, 70.0)),
        (12, r(60.0, 70.0)),
        (15, r(60.0, 70.0)),
    ],
};

/// Mortality-rate ceiling in percent. Age-independent: a cumulative daily
/// rate above this is flagged regardless of flock age.
pub const MORTALITY_RATE_CUTOFF: f64 = 5.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_table_covers_ages_0_to_45() {
        let ages: Vec<u32> = WATER_INTAKE.ages().collect();
        assert_eq!(ages, (0..=45).collect::<Vec<u32>>());
    }

    #[test]
    fn test_weight_table_covers_ages_0_to_45() {
        let ages: Vec<u32> = AVERAGE_WEIGHT.ages().collect();
        assert_eq!(ages, (0..=45).collect::<Vec<u32>>());
    }

    #[test]
    fn test_feed_table_is_sparse_weekly() {
        let ages: Vec<u32> = FEED_INTAKE.ages().collect();
        assert_eq!(ages, vec![0, 1, 8, 15, 22, 29, 36, 43]);
    }

    #[test]
    fn test_water_bounds_strictly_increase() {
        let entries: Vec<ReferenceRange> = WATER_INTAKE.ages().map(|a| WATER_INTAKE.get(a).unwrap()).collect();
        for pair in entries.windows(2) {
            assert!(pair[0].low <= pair[1].low);
            assert!(pair[0].high <= pair[1].high);
        }
        for r in &entries {
            assert!(r.low < r.high);
        }
    }

    #[test]
    fn test_weight_table_keeps_transcribed_slip() {
        // Ages 15 and 16 are intentionally out of line with the
        // surrounding progression.
        assert_eq!(AVERAGE_WEIGHT.get(15), Some(ReferenceRange::new(0.784714, 0.0919429)));
        assert_eq!(AVERAGE_WEIGHT.get(16), Some(ReferenceRange::new(0.0919429, 1.054143)));
    }

    #[test]
    fn test_uncovered_age_falls_back_to_default() {
        let r = FEED_INTAKE.range_or_default(10);
        assert_eq!(r.low, 0.0);
        assert!(r.high.is_infinite());

        assert_eq!(TEMPERATURE.get(2), None);
        assert_eq!(WATER_INTAKE.get(46), None);
    }

    #[test]
    fn test_known_lookups() {
        assert_eq!(WATER_INTAKE.get(10), Some(ReferenceRange::new(0.0591, 0.0650)));
        assert_eq!(TEMPERATURE.get(1), Some(ReferenceRange::new(29.0, 32.0)));
        assert_eq!(HUMIDITY.get(15), Some(ReferenceRange::new(60.0, 70.0)));
    }
}
