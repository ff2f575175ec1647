//! Globally adaptive Gauss-Kronrod quadrature.
//!
//! The integration interval is repeatedly bisected where the local error estimate is the
//! largest, until the accumulated error estimate satisfies the requested tolerance or the
//! subdivision ceiling is reached. The local rule is the 7-point Gauss / 15-point Kronrod
//! pair with the error estimate of QUADPACK's `qk15`.

use crate::math::{Real, DEFAULT_EPSILON};
use crate::utils::WeightedValue;
use num::Zero;
use std::collections::BinaryHeap;

/// Abscissae of the 15-point Kronrod rule on `[-1, 1]` (non-negative half).
///
/// `XGK[1]`, `XGK[3]`, `XGK[5]` and `XGK[7]` are the nodes of the embedded 7-point Gauss rule.
const XGK: [Real; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.0,
];

/// Weights of the 15-point Kronrod rule.
const WGK: [Real; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

/// Weights of the 7-point Gauss rule.
const WG: [Real; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Tolerances and resource bounds of the adaptive integrator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct QuadratureOptions {
    /// Absolute error tolerance.
    pub abs_tol: Real,
    /// Relative error tolerance.
    pub rel_tol: Real,
    /// Maximum number of subintervals the integration domain may be split into.
    ///
    /// This bounds the work spent on any single integral.
    pub max_subdivisions: usize,
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self {
            abs_tol: 1.49e-8,
            rel_tol: 1.49e-8,
            max_subdivisions: 50,
        }
    }
}

impl QuadratureOptions {
    /// Options for integrands with an interior near-singularity.
    ///
    /// Same tolerances as the default, with the subdivision ceiling raised to 100.
    pub fn near_singular() -> Self {
        Self {
            max_subdivisions: 100,
            ..Self::default()
        }
    }
}

/// A successful integral estimate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quadrature {
    /// The estimated value of the integral.
    pub value: Real,
    /// The estimated absolute error of `value`.
    pub error: Real,
    /// The number of subintervals used.
    pub subdivisions: usize,
}

/// Failure of the adaptive integrator.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum QuadratureError {
    /// The error estimate still exceeds the tolerance after the maximum number of subdivisions.
    #[error("no convergence after {subdivisions} subdivisions (estimate {estimate}, error {error})")]
    MaxSubdivisions {
        /// The number of subintervals used.
        subdivisions: usize,
        /// The best estimate of the integral reached so far.
        estimate: Real,
        /// The error estimate of `estimate`.
        error: Real,
    },
    /// A subinterval became too small to be bisected further in floating point.
    #[error("subinterval [{0}, {1}] cannot be bisected further")]
    Roundoff(Real, Real),
    /// The integrand evaluated to a non-finite value.
    #[error("the integrand is not finite on [{0}, {1}]")]
    NonFinite(Real, Real),
    /// An integration bound is infinite or NaN.
    #[error("the integration bounds [{0}, {1}] are not finite")]
    NonFiniteBounds(Real, Real),
}

#[derive(Copy, Clone, Debug)]
struct Segment {
    a: Real,
    b: Real,
    value: Real,
    error: Real,
}

impl Segment {
    fn new(f: &impl Fn(Real) -> Real, a: Real, b: Real) -> Result<Self, QuadratureError> {
        let (value, error) = kronrod15(f, a, b);

        if value.is_finite() && error.is_finite() {
            Ok(Segment { a, b, value, error })
        } else {
            Err(QuadratureError::NonFinite(a, b))
        }
    }
}

/// Applies the 15-point Kronrod rule on `[a, b]`.
///
/// Returns the integral estimate and its error estimate.
fn kronrod15(f: &impl Fn(Real) -> Real, a: Real, b: Real) -> (Real, Real) {
    let center = (a + b) * 0.5;
    let half_length = (b - a) * 0.5;
    let abs_half_length = half_length.abs();

    let f_center = f(center);
    let mut res_gauss = f_center * WG[3];
    let mut res_kronrod = f_center * WGK[7];
    let mut res_abs = res_kronrod.abs();
    let mut fv1 = [0.0; 7];
    let mut fv2 = [0.0; 7];

    for j in 0..7 {
        let dx = half_length * XGK[j];
        let f1 = f(center - dx);
        let f2 = f(center + dx);
        fv1[j] = f1;
        fv2[j] = f2;

        res_kronrod += WGK[j] * (f1 + f2);
        res_abs += WGK[j] * (f1.abs() + f2.abs());

        if j % 2 == 1 {
            res_gauss += WG[j / 2] * (f1 + f2);
        }
    }

    let mean = res_kronrod * 0.5;
    let mut res_asc = WGK[7] * (f_center - mean).abs();
    for j in 0..7 {
        res_asc += WGK[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
    }

    let value = res_kronrod * half_length;
    res_abs *= abs_half_length;
    res_asc *= abs_half_length;

    let mut error = ((res_kronrod - res_gauss) * half_length).abs();
    if res_asc != 0.0 && error != 0.0 {
        error = res_asc * (200.0 * error / res_asc).powf(1.5).min(1.0);
    }
    if res_abs > Real::MIN_POSITIVE / (50.0 * DEFAULT_EPSILON) {
        error = error.max(50.0 * DEFAULT_EPSILON * res_abs);
    }

    (value, error)
}

/// Integrates `f` over `[a, b]`.
///
/// The interval is bisected adaptively, always splitting the subinterval with the largest
/// error estimate, until the total error estimate is below
/// `max(options.abs_tol, options.rel_tol * |value|)`. The number of subintervals never
/// exceeds `options.max_subdivisions`, which bounds the work regardless of the integrand.
///
/// `f` is never evaluated at `a` or `b`, so integrands with integrable endpoint singularities
/// are supported.
pub fn integrate(
    f: impl Fn(Real) -> Real,
    a: Real,
    b: Real,
    options: &QuadratureOptions,
) -> Result<Quadrature, QuadratureError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(QuadratureError::NonFiniteBounds(a, b));
    }

    if a == b {
        return Ok(Quadrature {
            value: Real::zero(),
            error: Real::zero(),
            subdivisions: 1,
        });
    }

    let first = Segment::new(&f, a, b)?;
    let mut value = first.value;
    let mut error = first.error;
    let mut heap = BinaryHeap::new();
    heap.push(WeightedValue::new(first, first.error));

    while error > options.abs_tol.max(options.rel_tol * value.abs()) {
        if heap.len() >= options.max_subdivisions.max(1) {
            return Err(QuadratureError::MaxSubdivisions {
                subdivisions: heap.len(),
                estimate: value,
                error,
            });
        }

        let Some(WeightedValue { value: worst, .. }) = heap.pop() else {
            break;
        };
        let mid = (worst.a + worst.b) * 0.5;

        if mid <= worst.a.min(worst.b) || mid >= worst.a.max(worst.b) {
            return Err(QuadratureError::Roundoff(worst.a, worst.b));
        }

        let left = Segment::new(&f, worst.a, mid)?;
        let right = Segment::new(&f, mid, worst.b)?;

        value += left.value + right.value - worst.value;
        error += left.error + right.error - worst.error;

        heap.push(WeightedValue::new(left, left.error));
        heap.push(WeightedValue::new(right, right.error));
    }

    // Re-sum to drop the drift accumulated by the incremental updates.
    Ok(Quadrature {
        value: heap.iter().map(|s| s.value.value).sum(),
        error: heap.iter().map(|s| s.value.error).sum(),
        subdivisions: heap.len(),
    })
}
