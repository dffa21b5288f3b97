//! Sampling grids and post-processing helpers.

use num_complex::Complex;

use crate::math::Scalar;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` linearly spaced samples in [start, stop), excluding the endpoint.
#[must_use]
pub fn linspace_open(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    if n == 0 {
        return Vec::new();
    }
    let step = (stop - start) / n as Scalar;
    (0..n).map(|i| start + step * i as Scalar).collect()
}

/// Generates `n` logarithmically spaced samples between `start` and `stop` (Hz).
/// Requires start > 0 and stop > 0.
#[must_use]
pub fn logspace_hz(start_hz: Scalar, stop_hz: Scalar, n: usize) -> Vec<Scalar> {
    assert!(start_hz > 0.0 && stop_hz > 0.0);
    match n {
        0 => Vec::new(),
        1 => vec![start_hz],
        _ => {
            let log_start = start_hz.log10();
            let log_stop = stop_hz.log10();
            let step = (log_stop - log_start) / (n as Scalar - 1.0);
            (0..n)
                .map(|i| 10f64.powf(log_start + step * i as Scalar))
                .collect()
        }
    }
}

/// Derivative of sampled `values` with respect to `coords`.
///
/// Second-order central differences in the interior (non-uniform spacing allowed) and
/// first-order one-sided differences at the two ends.
#[must_use]
pub fn gradient(values: &[Scalar], coords: &[Scalar]) -> Vec<Scalar> {
    let n = values.len().min(coords.len());
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let mut out = vec![0.0; n];
            out[0] = (values[1] - values[0]) / (coords[1] - coords[0]);
            out[n - 1] = (values[n - 1] - values[n - 2]) / (coords[n - 1] - coords[n - 2]);
            for i in 1..n - 1 {
                let hl = coords[i] - coords[i - 1];
                let hr = coords[i + 1] - coords[i];
                out[i] = (hl * hl * values[i + 1] - hr * hr * values[i - 1]
                    + (hr * hr - hl * hl) * values[i])
                    / (hl * hr * (hl + hr));
            }
            out
        }
    }
}

/// Magnitude of complex sequence.
#[must_use]
pub fn mag(values: impl IntoIterator<Item = Complex<Scalar>>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.norm()).collect()
}

/// Phase in degrees of complex sequence.
#[must_use]
pub fn phase_deg(values: impl IntoIterator<Item = Complex<Scalar>>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.arg().to_degrees()).collect()
}
