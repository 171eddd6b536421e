//! Sort keys for dotted-path identifiers like `"2.10.1"`.

use std::cmp::Ordering;
use std::fmt;

/// Stand-in for a segment that is not a plain non-negative integer.
/// Sorts after every real segment without aborting the sort.
pub const MALFORMED_SEGMENT: u64 = u64::MAX;

/// Totally ordered key for a dotted identifier.
///
/// Segments compare numerically, so `"2.9" < "2.10"`. A shorter key that is a
/// prefix of a longer one sorts first, which puts a parent directly before its
/// first child.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct PathKey(Vec<u64>);

impl PathKey {
    pub fn new(id: &str) -> Self {
        PathKey(id.split('.').map(parse_segment).collect())
    }

    pub fn segments(&self) -> &[u64] {
        &self.0
    }
}

fn parse_segment(segment: &str) -> u64 {
    let segment = segment.trim();
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return MALFORMED_SEGMENT;
    }
    match segment.parse::<u64>() {
        Ok(value) if value < MALFORMED_SEGMENT => value,
        _ => MALFORMED_SEGMENT,
    }
}

impl Ord for PathKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Vec<u64> ordering is lexicographic with shorter-prefix-first
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for PathKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            first = false;
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

/// Sort ids in place by their path key. Stable for ids with equal keys.
pub fn sort_ids<S: AsRef<str>>(ids: &mut [S]) {
    ids.sort_by_cached_key(|id| PathKey::new(id.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numeric_not_lexicographic() {
        assert!(PathKey::new("2.10") > PathKey::new("2.9"));
        assert!(PathKey::new("10") > PathKey::new("9"));
    }

    #[test]
    fn parent_precedes_child() {
        assert!(PathKey::new("1") < PathKey::new("1.1"));
        assert!(PathKey::new("1.1") < PathKey::new("1.1.1"));
        assert!(PathKey::new("1.1.9") < PathKey::new("1.2"));
    }

    #[test]
    fn malformed_segments_sort_last_without_panicking() {
        assert_eq!(PathKey::new("1.x").segments(), &[1, MALFORMED_SEGMENT]);
        assert_eq!(PathKey::new("-3").segments(), &[MALFORMED_SEGMENT]);
        assert_eq!(PathKey::new("1..2").segments(), &[1, MALFORMED_SEGMENT, 2]);
        assert!(PathKey::new("1.x") > PathKey::new("1.999"));
        assert!(PathKey::new("1.x") > PathKey::new("1.1000001"));
        // larger than u64 is malformed, not a crash
        assert_eq!(PathKey::new("99999999999999999999999").segments(), &[MALFORMED_SEGMENT]);
    }

    #[test]
    fn large_numeric_siblings_sort_before_malformed() {
        let mut ids = vec!["1.x", "1.1000001", "1.18446744073709551614", "1.2"];
        sort_ids(&mut ids);
        assert_eq!(ids, vec!["1.2", "1.1000001", "1.18446744073709551614", "1.x"]);
    }

    #[test]
    fn sort_ids_orders_siblings() {
        let mut ids = vec!["2.10", "2.9", "2.x", "2.1"];
        sort_ids(&mut ids);
        assert_eq!(ids, vec!["2.1", "2.9", "2.10", "2.x"]);
    }

    #[test]
    fn display_normalises_segments() {
        assert_eq!(PathKey::new("01.2").to_string(), "1.2");
    }

    proptest! {
        #[test]
        fn larger_segment_sorts_after(
            prefix in prop::collection::vec(0u64..500, 0..4),
            a in 0u64..100_000,
            b in 0u64..100_000,
            suffix in prop::collection::vec(0u64..500, 0..3),
        ) {
            prop_assume!(a != b);
            let render = |mid: u64| {
                prefix.iter().copied()
                    .chain(std::iter::once(mid))
                    .chain(suffix.iter().copied())
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(".")
            };
            let (ka, kb) = (PathKey::new(&render(a)), PathKey::new(&render(b)));
            prop_assert_eq!(ka.cmp(&kb), a.cmp(&b));
        }

        #[test]
        fn ordering_is_total_and_antisymmetric(a in "[0-9x.]{0,8}", b in "[0-9x.]{0,8}") {
            let (ka, kb) = (PathKey::new(&a), PathKey::new(&b));
            prop_assert_eq!(ka.cmp(&kb), kb.cmp(&ka).reverse());
        }
    }
}
