use crate::math::Real;

/// Evaluates at `x` the piecewise-linear function through the samples `(xs[i], ys[i])`.
///
/// The abscissae `xs` must be strictly increasing and have the same length as `ys`.
/// Returns `None` if `x` lies outside of `[xs[0], xs[n - 1]]` or if there are fewer
/// than two samples. No extrapolation is ever performed.
pub fn interp_linear(xs: &[Real], ys: &[Real], x: Real) -> Option<Real> {
    assert_eq!(xs.len(), ys.len(), "Mismatched sample array lengths.");

    let n = xs.len();
    if n < 2 || !(x >= xs[0] && x <= xs[n - 1]) {
        return None;
    }

    // Index of the first abscissa strictly greater than `x`, clamped so that
    // `x == xs[n - 1]` falls into the last segment.
    let i = xs.partition_point(|xi| *xi <= x).clamp(1, n - 1);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    let t = (x - x0) / (x1 - x0);

    Some(y0 + (y1 - y0) * t)
}
