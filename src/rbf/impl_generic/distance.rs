//! Pose distances and the mean distance used as kernel width.

use crate::matrix::Matrix;
use crate::rbf::traits::DistanceType;
use crate::spatial::Vec3;

/// Euclidean distance over the length of `a`.
pub fn radius(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b) {
        let d = x - y;
        sum += d * d;
    }
    sum.sqrt()
}

/// Angle between two 3-vectors.
pub fn vector_angle(a: &[f64], b: &[f64]) -> f64 {
    match (Vec3::from_slice(a), Vec3::from_slice(b)) {
        (Some(u), Some(v)) => u.angle(v),
        _ => radius(a, b),
    }
}

/// Distance between two pose vectors.
///
/// `Angle` only applies when both vectors have exactly three components;
/// everything else is measured with [`radius`].
pub fn pose_delta(a: &[f64], b: &[f64], distance: DistanceType) -> f64 {
    match distance {
        DistanceType::Angle if a.len() == 3 && b.len() == 3 => vector_angle(a, b),
        _ => radius(a, b),
    }
}

/// Build the symmetric `n x n` pose distance matrix and its mean.
///
/// The mean is taken over all `n^2` cells, diagonal zeros included. An empty
/// pose set has mean 0.
pub fn pose_distances(poses: &Matrix, distance: DistanceType) -> (Matrix, f64) {
    let count = poses.rows();
    let mut dist = Matrix::zeros(count, count);
    if count == 0 {
        return (dist, 0.0);
    }

    let mut sum = 0.0;
    for i in 0..count {
        for j in 0..count {
            let d = pose_delta(poses.row(i), poses.row(j), distance);
            dist[(i, j)] = d;
            sum += d;
        }
    }

    let mean = sum / (count * count) as f64;
    (dist, mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_two_scalar_poses() {
        let poses = Matrix::from_rows(vec![vec![0.0], vec![1.0]]).unwrap();
        let (dist, mean) = pose_distances(&poses, DistanceType::Euclidean);
        assert_eq!(dist, Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap());
        assert_abs_diff_eq!(mean, 0.5);
    }

    #[test]
    fn test_angle_only_for_three_components() {
        let a = [1.0, 0.0, 0.0];
        let b = [0.0, 2.0, 0.0];
        assert_abs_diff_eq!(pose_delta(&a, &b, DistanceType::Angle), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(pose_delta(&a, &b, DistanceType::Euclidean), 5.0_f64.sqrt());

        // Four components: angle falls back to euclidean.
        let c = [1.0, 0.0, 0.0, 0.0];
        let d = [0.0, 2.0, 0.0, 0.0];
        assert_abs_diff_eq!(pose_delta(&c, &d, DistanceType::Angle), 5.0_f64.sqrt());
    }

    #[test]
    fn test_angle_distance_matrix() {
        let poses = Matrix::from_rows(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap();
        let (dist, mean) = pose_distances(&poses, DistanceType::Angle);
        for i in 0..3 {
            assert_eq!(dist[(i, i)], 0.0);
        }
        assert_abs_diff_eq!(dist[(0, 2)], FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(mean, 6.0 * FRAC_PI_2 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_pose_set() {
        let (dist, mean) = pose_distances(&Matrix::zeros(0, 4), DistanceType::Euclidean);
        assert!(dist.is_empty());
        assert_eq!(mean, 0.0);
    }
}
