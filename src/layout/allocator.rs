//! Flexible-size allocation among siblings.
//!
//! Given a container extent and the main-axis sizes of its children, the
//! allocator grows or shrinks the flexible ones in proportion to their
//! preferred sizes until the children exactly fill the container.

use tracing::debug;

use crate::error::{Result, UiError};

use super::size::Size;

/// Default bound on proportional passes before falling back to unit
/// distribution.
pub const DEFAULT_MAX_PASSES: usize = 32;

/// Distribute `extent` among `sizes`.
///
/// Fixed sizes are left alone. Flexible sizes are resized so that the actual
/// values sum to `extent` whenever at least one flexible size exists; none is
/// ever set below its minimum. If the minimums (fixed sizes count at their
/// actual value) exceed `extent`, nothing is mutated and
/// [`UiError::CannotFit`] is returned.
///
/// Without any flexible size the leftover space stays undistributed.
pub fn allocate(extent: i32, sizes: &mut [Size], max_passes: usize) -> Result<()> {
    let required: i64 = sizes.iter().map(|s| i64::from(s.min())).sum();
    if required > i64::from(extent) {
        return Err(UiError::CannotFit { required, available: extent });
    }

    let mut flexible: Vec<usize> = (0..sizes.len()).filter(|&i| sizes[i].is_flexible()).collect();
    let mut free = i64::from(extent) - total(sizes);
    let mut passes = 0;

    while free != 0 && !flexible.is_empty() && passes < max_passes {
        passes += 1;
        if free < 0 {
            flexible.retain(|&i| sizes[i].actual() > sizes[i].min());
            if flexible.is_empty() {
                break;
            }
        }

        let weights: Vec<i64> = flexible.iter().map(|&i| i64::from(sizes[i].preferred().max(0))).collect();
        let weight_total: i64 = weights.iter().sum();

        for (&i, &weight) in flexible.iter().zip(&weights) {
            let share = if weight_total > 0 {
                (free as f64 * weight as f64 / weight_total as f64).round() as i64
            } else {
                (free as f64 / flexible.len() as f64).round() as i64
            };
            let target = i64::from(sizes[i].actual()) + share;
            sizes[i].set_actual(clamp_cells(target, sizes[i].min()))?;
        }

        let next = i64::from(extent) - total(sizes);
        if next.abs() >= free.abs() {
            // Rounding stopped converging; settle the rest unit by unit.
            free = next;
            break;
        }
        free = next;
    }

    if free != 0 {
        distribute_units(sizes, free)?;
    }
    Ok(())
}

/// Hand out `free` one cell at a time in declaration order.
fn distribute_units(sizes: &mut [Size], mut free: i64) -> Result<()> {
    debug!(free, "allocator settling residual space unit by unit");
    loop {
        let step = free.signum();
        let candidates: Vec<usize> = (0..sizes.len())
            .filter(|&i| sizes[i].is_flexible() && (step > 0 || sizes[i].actual() > sizes[i].min()))
            .collect();
        if candidates.is_empty() {
            return Ok(());
        }
        for i in candidates {
            if free == 0 {
                return Ok(());
            }
            let target = i64::from(sizes[i].actual()) + step;
            if target < i64::from(sizes[i].min()) || target > i64::from(i32::MAX) {
                continue;
            }
            sizes[i].set_actual(clamp_cells(target, sizes[i].min()))?;
            free -= step;
        }
        if free == 0 {
            return Ok(());
        }
    }
}

fn total(sizes: &[Size]) -> i64 {
    sizes.iter().map(|s| i64::from(s.actual())).sum()
}

/// `value` clamped to `[min, i32::MAX]`.
fn clamp_cells(value: i64, min: i32) -> i32 {
    i32::try_from(value.clamp(i64::from(min), i64::from(i32::MAX))).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flex(preferred: i32, min: i32) -> Size {
        Size::flex(preferred, min).unwrap()
    }

    fn actuals(sizes: &[Size]) -> Vec<i32> {
        sizes.iter().map(Size::actual).collect()
    }

    // ── Conformance ──────────────────────────────────────────────────

    #[test]
    fn two_equal_flex_shrink_evenly() {
        let mut sizes = vec![flex(10, 2), flex(10, 2)];
        allocate(6, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
        assert_eq!(actuals(&sizes), vec![3, 3]);
    }

    #[test]
    fn grow_proportionally_to_preferred() {
        let mut sizes = vec![flex(1, 0), flex(3, 0)];
        allocate(20, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
        assert_eq!(actuals(&sizes), vec![5, 15]);
    }

    #[test]
    fn fixed_siblings_untouched() {
        let mut sizes = vec![Size::fixed(4), flex(5, 1), Size::fixed(2)];
        allocate(20, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
        assert_eq!(actuals(&sizes), vec![4, 14, 2]);
    }

    #[test]
    fn pinned_siblings_stop_absorbing_shrink() {
        let mut sizes = vec![flex(10, 8), flex(10, 1)];
        allocate(10, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
        assert_eq!(actuals(&sizes), vec![8, 2]);
    }

    #[test]
    fn odd_split_fills_exactly() {
        let mut sizes = vec![flex(1, 0), flex(1, 0)];
        allocate(5, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
        assert_eq!(actuals(&sizes).iter().sum::<i32>(), 5);
    }

    #[test]
    fn three_way_rounding_converges() {
        let mut sizes = vec![flex(1, 0), flex(1, 0), flex(1, 0)];
        allocate(10, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
        let result = actuals(&sizes);
        assert_eq!(result.iter().sum::<i32>(), 10);
        assert!(result.iter().all(|&v| (3..=4).contains(&v)));
    }

    #[test]
    fn zero_preferred_uses_equal_weights() {
        let mut sizes = vec![flex(0, 0), flex(0, 0)];
        allocate(8, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
        assert_eq!(actuals(&sizes), vec![4, 4]);
    }

    #[test]
    fn sweep_sums_to_extent_and_respects_minimums() {
        for extent in 7..60 {
            let mut sizes = vec![flex(7, 2), Size::fixed(3), flex(3, 1), flex(11, 1)];
            allocate(extent, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
            assert_eq!(actuals(&sizes).iter().sum::<i32>(), extent, "extent {extent}");
            assert!(sizes.iter().all(|s| s.actual() >= s.min()));
        }
    }

    #[test]
    fn single_pass_budget_still_fills() {
        let mut sizes = vec![flex(1, 0), flex(1, 0), flex(1, 0)];
        allocate(11, &mut sizes, 1).unwrap();
        assert_eq!(actuals(&sizes).iter().sum::<i32>(), 11);
    }

    // ── Slack and infeasibility ──────────────────────────────────────

    #[test]
    fn no_flexible_leaves_slack() {
        let mut sizes = vec![Size::fixed(2), Size::fixed(3)];
        allocate(10, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
        assert_eq!(actuals(&sizes), vec![2, 3]);
    }

    #[test]
    fn minimums_exceeding_extent_fail_without_mutation() {
        let mut sizes = vec![flex(10, 4), flex(10, 4), Size::fixed(3)];
        let err = allocate(10, &mut sizes, DEFAULT_MAX_PASSES).unwrap_err();
        assert!(matches!(err, UiError::CannotFit { required: 11, available: 10 }));
        assert_eq!(actuals(&sizes), vec![10, 10, 3]);
    }

    #[test]
    fn huge_minimums_report_without_overflow() {
        let mut sizes = vec![flex(i32::MAX, i32::MAX), flex(i32::MAX, i32::MAX)];
        let err = allocate(10, &mut sizes, DEFAULT_MAX_PASSES).unwrap_err();
        assert!(matches!(err, UiError::CannotFit { required, available: 10 } if required == 2 * i64::from(i32::MAX)));
        assert_eq!(actuals(&sizes), vec![i32::MAX, i32::MAX]);
    }

    #[test]
    fn huge_preferred_sizes_shrink_to_fit() {
        let mut sizes = vec![flex(i32::MAX, 0), flex(i32::MAX, 0), Size::fixed(2)];
        allocate(10, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
        assert_eq!(actuals(&sizes), vec![4, 4, 2]);
    }

    #[test]
    fn empty_input_is_fine() {
        let mut sizes: Vec<Size> = Vec::new();
        allocate(5, &mut sizes, DEFAULT_MAX_PASSES).unwrap();
    }
}
