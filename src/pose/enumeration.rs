//! Mapping sparse host pose slots onto dense pose rows.

use crate::pose::source::GenericPose;
use std::collections::BTreeMap;

/// Decides how many poses a slot array holds and which slot backs each row.
pub trait PoseEnumeration {
    /// Number of real poses.
    fn pose_count(&self, slots: &BTreeMap<usize, GenericPose>) -> usize;

    /// Slot backing row `row`, or `None` for a zero-filled row.
    fn pose_at<'a>(
        &self,
        slots: &'a BTreeMap<usize, GenericPose>,
        row: usize,
    ) -> Option<&'a GenericPose>;
}

/// Host sparse-array bookkeeping.
///
/// Slot 0 is always counted, even when the host dropped it, and a trailing
/// slot without pose inputs is the host's next-available placeholder rather
/// than a pose. Rows map onto existing slots by physical position.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostArrayEnumeration;

impl PoseEnumeration for HostArrayEnumeration {
    fn pose_count(&self, slots: &BTreeMap<usize, GenericPose>) -> usize {
        let mut count = slots.len();
        if count == 0 {
            return 0;
        }
        if slots.keys().next().is_some_and(|&first| first != 0) {
            count += 1;
        }
        if slots.values().next_back().is_some_and(|last| last.inputs.is_empty()) {
            count -= 1;
        }
        count
    }

    fn pose_at<'a>(
        &self,
        slots: &'a BTreeMap<usize, GenericPose>,
        row: usize,
    ) -> Option<&'a GenericPose> {
        slots.values().nth(row)
    }
}

/// Rows are logical indices `0..=last`; gaps become zero rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseEnumeration;

impl PoseEnumeration for DenseEnumeration {
    fn pose_count(&self, slots: &BTreeMap<usize, GenericPose>) -> usize {
        slots.keys().next_back().map_or(0, |&last| last + 1)
    }

    fn pose_at<'a>(
        &self,
        slots: &'a BTreeMap<usize, GenericPose>,
        row: usize,
    ) -> Option<&'a GenericPose> {
        slots.get(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(entries: &[(usize, &[f64])]) -> BTreeMap<usize, GenericPose> {
        entries
            .iter()
            .map(|&(id, inputs)| (id, GenericPose::new(inputs, &[])))
            .collect()
    }

    #[test]
    fn test_host_array_counts() {
        let e = HostArrayEnumeration;
        assert_eq!(e.pose_count(&BTreeMap::new()), 0);
        assert_eq!(e.pose_count(&slots(&[(0, &[0.0]), (1, &[1.0])])), 2);
        // Trailing placeholder.
        assert_eq!(e.pose_count(&slots(&[(0, &[0.0]), (1, &[1.0]), (2, &[])])), 2);
        // Missing slot 0.
        assert_eq!(e.pose_count(&slots(&[(1, &[1.0]), (2, &[2.0])])), 3);
        // Missing slot 0 and a placeholder cancel out.
        assert_eq!(e.pose_count(&slots(&[(1, &[1.0]), (2, &[])])), 2);
    }

    #[test]
    fn test_host_array_rows_by_position() {
        let s = slots(&[(1, &[1.0]), (3, &[3.0])]);
        let e = HostArrayEnumeration;
        assert_eq!(e.pose_at(&s, 0).map(|p| p.inputs[&0]), Some(1.0));
        assert_eq!(e.pose_at(&s, 1).map(|p| p.inputs[&0]), Some(3.0));
        assert!(e.pose_at(&s, 2).is_none());
    }

    #[test]
    fn test_dense_enumeration() {
        let s = slots(&[(1, &[1.0]), (3, &[3.0])]);
        let e = DenseEnumeration;
        assert_eq!(e.pose_count(&s), 4);
        assert!(e.pose_at(&s, 0).is_none());
        assert_eq!(e.pose_at(&s, 3).map(|p| p.inputs[&0]), Some(3.0));
    }
}
