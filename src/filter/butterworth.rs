//! Digital Butterworth low-pass design.
//!
//! The analog prototype is factored into second-order sections (plus one
//! first-order section for odd orders), each mapped to the z-plane with the
//! bilinear transform after pre-warping the cutoff. The sections are then
//! multiplied out into a single `(b, a)` pair.

use log::{debug, warn};
use std::f64::consts::PI;

use super::FilterCoefficients;

/// Design an `order`-th order low-pass filter.
///
/// `normalized_cutoff` is the cutoff divided by the Nyquist frequency.
/// A cutoff at or above Nyquist designs the identity filter, and a cutoff at
/// or below zero designs a filter that blocks everything.
pub fn lowpass(order: usize, normalized_cutoff: f64) -> FilterCoefficients {
    if order == 0 || normalized_cutoff >= 1.0 || normalized_cutoff.is_nan() {
        warn!(
            "Low-pass cutoff {} (order {}) passes everything, filter is a no-op",
            normalized_cutoff, order
        );
        return FilterCoefficients::identity();
    }
    if normalized_cutoff <= 0.0 {
        warn!(
            "Low-pass cutoff {} (order {}) blocks everything",
            normalized_cutoff, order
        );
        return FilterCoefficients::blocking();
    }

    // Pre-warped analog cutoff for a unit-rate bilinear transform
    let omega = (PI * normalized_cutoff / 2.0).tan();
    let omega2 = omega * omega;

    let mut b = vec![1.0];
    let mut a = vec![1.0];

    for k in 0..order / 2 {
        // s^2 + q s + 1
        let q = 2.0 * (PI * (2 * k + 1) as f64 / (2 * order) as f64).sin();
        let section_b = [omega2, 2.0 * omega2, omega2];
        let section_a = [
            1.0 + q * omega + omega2,
            2.0 * omega2 - 2.0,
            1.0 - q * omega + omega2,
        ];
        b = convolve(&b, &section_b);
        a = convolve(&a, &section_a);
    }

    if order % 2 == 1 {
        // s + 1
        b = convolve(&b, &[omega, omega]);
        a = convolve(&a, &[1.0 + omega, omega - 1.0]);
    }

    let filter = FilterCoefficients::from_normalized(b, a);
    debug!(
        "Butterworth order {} cutoff {:.5}: b={:?} a={:?}",
        order, normalized_cutoff, filter.b, filter.a
    );
    filter
}

/// Polynomial product
fn convolve(x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; x.len() + y.len() - 1];
    for (i, &xi) in x.iter().enumerate() {
        for (j, &yj) in y.iter().enumerate() {
            out[i + j] += xi * yj;
        }
    }
    out
}
