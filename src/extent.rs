//! Vertical extent prediction for tree columns.
//!
//! The canvas is sized before any box is placed, so the estimate works from
//! tree shape alone. It never undershoots what the tree layout consumes.

use crate::hierarchy::Forest;
use crate::types::Px;

/// Spacing inputs for the estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtentDims {
    pub box_height: Px,
    /// Gap below every box
    pub level_gap: Px,
    /// Extra gap before a nested cluster of children
    pub cluster_gap: Px,
    /// Fixed allowance added once per column
    pub margin: Px,
}

/// Predicted vertical space for `id` and all its descendants.
///
/// A leaf needs `box_height + level_gap`. An internal node needs the same for
/// itself plus each child's extent, plus `cluster_gap` for every child that
/// has children of its own. Unknown ids need nothing.
pub fn extent(forest: &Forest, id: &str, dims: &ExtentDims) -> Px {
    if forest.get(id).is_none() {
        return Px::ZERO;
    }
    let own = dims.box_height + dims.level_gap;
    forest
        .children(id)
        .iter()
        .map(|child| {
            let gap = if forest.children(child).is_empty() { Px::ZERO } else { dims.cluster_gap };
            extent(forest, child, dims) + gap
        })
        .fold(own, |acc, h| acc + h)
}

/// [`extent`] plus the fixed per-column margin.
pub fn column_extent(forest: &Forest, root: &str, dims: &ExtentDims) -> Px {
    extent(forest, root, dims) + dims.margin
}

/// Tallest column estimate over all roots.
pub fn tallest_column(forest: &Forest, dims: &ExtentDims) -> Px {
    forest
        .roots()
        .iter()
        .map(|root| column_extent(forest, root, dims))
        .fold(Px::ZERO, Px::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::WbsRecord;

    fn dims() -> ExtentDims {
        ExtentDims {
            box_height: Px(10.0),
            level_gap: Px(2.0),
            cluster_gap: Px(5.0),
            margin: Px(100.0),
        }
    }

    fn forest(ids: &[&str]) -> Forest {
        let records: Vec<_> = ids.iter().map(|id| WbsRecord::new(*id, "t")).collect();
        Forest::build(&records).unwrap()
    }

    #[test]
    fn leaf_needs_one_row() {
        let f = forest(&["1"]);
        assert_eq!(extent(&f, "1", &dims()), Px(12.0));
        assert_eq!(column_extent(&f, "1", &dims()), Px(112.0));
    }

    #[test]
    fn matches_three_level_unroll() {
        // root, two sections, the second with three leaves
        let f = forest(&["1", "1.1", "1.2", "1.2.1", "1.2.2", "1.2.3"]);
        let d = dims();
        let row = d.box_height + d.level_gap;
        let unrolled = row + row + row + d.cluster_gap + row * 3.0;
        assert_eq!(extent(&f, "1", &d), unrolled);
    }

    #[test]
    fn depth_agnostic() {
        let f = forest(&["1", "1.1", "1.1.1", "1.1.1.1", "1.1.1.1.1"]);
        // five rows and a cluster gap for each of the three nested parents
        assert_eq!(extent(&f, "1", &dims()), Px(12.0 * 5.0 + 5.0 * 3.0));
    }

    #[test]
    fn unknown_id_is_zero() {
        let f = forest(&["1"]);
        assert_eq!(extent(&f, "9", &dims()), Px::ZERO);
    }

    #[test]
    fn tallest_column_picks_maximum() {
        let f = forest(&["1", "2", "2.1", "2.2"]);
        assert_eq!(tallest_column(&f, &dims()), Px(36.0 + 100.0));
    }
}
