//! Stride downsampling for the overview panel

use crate::error::{PlotError, Result};

/// Every `stride`-th sample starting at index 0 (`ceil(len / stride)` samples)
pub fn stride_downsample(data: &[f64], stride: usize) -> Result<Vec<f64>> {
    if stride == 0 {
        return Err(PlotError::Validation("downsampling stride must be at least 1".to_string()));
    }
    Ok(data.iter().step_by(stride).copied().collect())
}

/// Pair two equal-length series into plot points
pub fn to_points(x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    x.iter().zip(y).map(|(&x, &y)| [x, y]).collect()
}

/// Minimum and maximum of the finite samples, `None` if there are none
pub fn finite_range(data: &[f64]) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_lengths() {
        let data: Vec<f64> = (0..10).map(|i| i as f64).collect();

        assert_eq!(stride_downsample(&data, 1).unwrap().len(), 10);
        assert_eq!(stride_downsample(&data, 3).unwrap(), vec![0.0, 3.0, 6.0, 9.0]);
        assert_eq!(stride_downsample(&data, 4).unwrap().len(), 3);
        assert_eq!(stride_downsample(&data, 100).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_zero_stride_rejected() {
        assert!(stride_downsample(&[1.0], 0).is_err());
    }

    #[test]
    fn test_finite_range() {
        assert_eq!(finite_range(&[3.0, f64::NAN, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(finite_range(&[f64::NAN]), None);
    }
}
