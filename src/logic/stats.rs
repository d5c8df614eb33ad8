/// Counts and ratios shown next to the filters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterStats {
    /// Groups in scope; every group when none is selected.
    pub groups_shown: usize,
    /// Total groups in the dataset.
    pub groups_total: usize,
    /// Items in the visible list.
    pub items_shown: usize,
    /// Total items in the dataset.
    pub items_total: usize,
}

impl FilterStats {
    /// What: Derive stats from raw counts.
    ///
    /// Inputs:
    /// - `selected_groups`: Number of selected groups (0 = all).
    /// - `groups_total`: Groups in the dataset.
    /// - `items_shown`: Length of the visible list.
    /// - `items_total`: Items in the dataset.
    ///
    /// Output:
    /// - Stats where an empty selection counts as every group.
    #[must_use]
    pub const fn new(
        selected_groups: usize,
        groups_total: usize,
        items_shown: usize,
        items_total: usize,
    ) -> Self {
        Self {
            groups_shown: if selected_groups == 0 {
                groups_total
            } else {
                selected_groups
            },
            groups_total,
            items_shown,
            items_total,
        }
    }

    /// Share of groups in scope, in `[0, 1]`; `1.0` when nothing is selected.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn groups_ratio(&self) -> f64 {
        if self.groups_total == 0 {
            return if self.groups_shown == 0 { 1.0 } else { 0.0 };
        }
        self.groups_shown as f64 / self.groups_total as f64
    }

    /// Share of items visible, in `[0, 1]`; `0.0` for an empty dataset.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn items_ratio(&self) -> f64 {
        if self.items_total == 0 {
            return 0.0;
        }
        self.items_shown as f64 / self.items_total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Empty selection counts as every group
    fn empty_selection_is_full() {
        let s = FilterStats::new(0, 4, 10, 40);
        assert_eq!(s.groups_shown, 4);
        assert!((s.groups_ratio() - 1.0).abs() < f64::EPSILON);
        assert!((s.items_ratio() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    /// What: Ratios guard against empty datasets
    fn ratios_handle_zero_totals() {
        let s = FilterStats::new(0, 0, 0, 0);
        assert!((s.groups_ratio() - 1.0).abs() < f64::EPSILON);
        assert!(s.items_ratio().abs() < f64::EPSILON);
        let partial = FilterStats::new(1, 4, 0, 0);
        assert!((partial.groups_ratio() - 0.25).abs() < f64::EPSILON);
    }
}
