//! Canonical column orders and visibility toggling for the admin tables.
//!
//! Each admin table has a fixed canonical ordering of every column it can
//! show. The visible-column list stored in the preferences is always kept a
//! subsequence of that ordering: toggling a column back on reinserts it at
//! its canonical slot instead of appending it.

/// Canonical column order for the reflections admin table.
pub const REFLECTION_COLUMNS: &[&str] = &[
    "Date",
    "Zoom Name",
    "Cohort",
    "Week",
    "Reflection",
    "Rating",
];

/// Canonical column order for the users admin table.
pub const USER_COLUMNS: &[&str] = &[
    "Zoom Name",
    "Email",
    "Cohort",
    "Role",
    "Joined",
    "Attendance",
];

/// Compute where a re-enabled column belongs in `visible`.
///
/// Scans the canonical order up to the column's own canonical index and
/// returns the slot immediately after the last canonical predecessor that
/// is still visible, or 0 when none of its predecessors are shown. Columns
/// unknown to the canonical order go to the end of the list.
pub fn reinsert_position(canonical: &[&str], visible: &[String], column: &str) -> usize {
    let Some(canon_idx) = canonical.iter().position(|c| *c == column) else {
        return visible.len();
    };

    let mut position = 0;
    for candidate in &canonical[..canon_idx] {
        if let Some(found) = visible.iter().position(|v| v == candidate) {
            position = found + 1;
        }
    }
    position
}

/// Toggle a column's visibility in place.
///
/// A visible column is removed; a hidden one is reinserted at the position
/// given by [`reinsert_position`], keeping the visible list a subsequence
/// of the canonical order regardless of toggle history.
pub fn toggle_column(canonical: &[&str], visible: &mut Vec<String>, column: &str) {
    if let Some(idx) = visible.iter().position(|v| v == column) {
        visible.remove(idx);
    } else {
        let at = reinsert_position(canonical, visible, column);
        visible.insert(at, column.to_string());
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn visible(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    fn is_subsequence_of(visible: &[String], canonical: &[&str]) -> bool {
        let mut canon = canonical.iter();
        visible
            .iter()
            .all(|col| canon.any(|c| *c == col.as_str()))
    }

    #[test]
    fn readded_column_lands_between_its_canonical_neighbours() {
        let canonical = &["A", "B", "C", "D"];
        let mut cols = visible(&["A", "C"]);
        toggle_column(canonical, &mut cols, "B");
        assert_eq!(cols, visible(&["A", "B", "C"]));
    }

    #[test]
    fn readded_column_with_no_visible_predecessor_goes_first() {
        let canonical = &["A", "B", "C", "D"];
        let mut cols = visible(&["C", "D"]);
        toggle_column(canonical, &mut cols, "A");
        assert_eq!(cols, visible(&["A", "C", "D"]));
    }

    #[test]
    fn toggling_a_visible_column_removes_it() {
        let canonical = &["A", "B", "C", "D"];
        let mut cols = visible(&["A", "B", "C"]);
        toggle_column(canonical, &mut cols, "B");
        assert_eq!(cols, visible(&["A", "C"]));
    }

    #[test]
    fn unknown_column_is_appended() {
        let canonical = &["A", "B"];
        let mut cols = visible(&["A", "B"]);
        toggle_column(canonical, &mut cols, "Mystery");
        assert_eq!(cols, visible(&["A", "B", "Mystery"]));
    }

    #[test]
    fn full_round_trip_restores_canonical_order() {
        let canonical = REFLECTION_COLUMNS;
        let mut cols = visible(canonical);
        // Hide everything, then bring each column back in reverse order.
        for col in canonical {
            toggle_column(canonical, &mut cols, col);
        }
        assert!(cols.is_empty());
        for col in canonical.iter().rev() {
            toggle_column(canonical, &mut cols, col);
        }
        assert_eq!(cols, visible(canonical));
    }

    proptest! {
        #[test]
        fn visible_list_stays_a_canonical_subsequence(
            toggles in prop::collection::vec(0usize..REFLECTION_COLUMNS.len(), 0..48)
        ) {
            let canonical = REFLECTION_COLUMNS;
            let mut cols = visible(canonical);
            for idx in toggles {
                toggle_column(canonical, &mut cols, canonical[idx]);
                prop_assert!(is_subsequence_of(&cols, canonical));
            }
        }
    }
}
