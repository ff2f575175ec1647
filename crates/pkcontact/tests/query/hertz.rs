use core::f64::consts::PI;
use pkcontact::math::Real;
use pkcontact::query::{
    evaluate_contact, ContactParameters, ContactPatch, SolverOptions, REGULARIZATION,
};
use pkcontact::shape::Profile;
use pkcontact::transformation::{lateral_pressure, PatchDistribution};
use pkcontact::utils::QuadratureOptions;

const RADIUS: Real = 460.0;

/// Complete elliptic integrals of the first and second kind, by the arithmetic-geometric mean.
fn complete_elliptic(k: Real) -> (Real, Real) {
    let mut a: Real = 1.0;
    let mut b = (1.0 - k * k).sqrt();
    let mut weight = 0.5;
    let mut sum = weight * k * k;

    for _ in 0..64 {
        if (a - b).abs() <= 1.0e-16 * a {
            break;
        }
        let c = 0.5 * (a - b);
        let next_a = 0.5 * (a + b);
        b = (a * b).sqrt();
        a = next_a;
        weight *= 2.0;
        sum += weight * c * c;
    }

    let k_int = PI / (2.0 * a);
    (k_int, k_int * (1.0 - sum))
}

/// Closed form of `∫ sqrt(a² - x²) / sqrt(x² + c²) dx` over `[-a, a]`.
fn weighted_integral(a: Real, c2: Real) -> Real {
    let r = (a * a + c2).sqrt();
    let (k_int, e_int) = complete_elliptic(a / r);
    2.0 * r * (k_int - e_int)
}

/// A parabolic wheel `z = y² / 2R` over a flat rail, on a grid that avoids `y = 0`.
fn parabolic_pair() -> (Profile, Profile) {
    let ys: Vec<Real> = (0..42).map(|i| -10.25 + 0.5 * i as Real).collect();
    let wheel = Profile::from_fn(ys.clone(), |y| y * y / (2.0 * RADIUS)).unwrap();
    let rail = Profile::from_fn(ys, |_| 0.0).unwrap();
    (wheel, rail)
}

fn params(penetration: Real, virtual_penetration: Real) -> ContactParameters {
    ContactParameters::new(RADIUS, 210_000.0, 0.3, penetration, virtual_penetration)
}

#[test]
fn parabolic_wheel_matches_closed_form() {
    let (wheel, rail) = parabolic_pair();
    let params = params(0.1, 0.05);
    let report = evaluate_contact(&wheel, &rail, &params, &SolverOptions::default()).unwrap();

    // |y| < 6.79 interpenetrates, i.e. the nodes y = -6.75 ..= 6.75.
    assert_eq!(report.patches, vec![ContactPatch::new(7, 35).unwrap()]);
    assert_eq!(report.outcomes.len(), 1);

    let min_z = 0.25 * 0.25 / (2.0 * RADIUS);
    let mut s1 = 0.0;
    for i in 7..35 {
        let y = rail.ys()[i];
        let g = params.virtual_penetration - (y * y / (2.0 * RADIUS) - min_z);
        let a = (2.0 * RADIUS * g).sqrt();
        s1 += weighted_integral(a, y * y + REGULARIZATION);
    }

    let expected = params.load_coefficient()
        * (2.0 * RADIUS * params.virtual_penetration).sqrt()
        / s1;
    let pmax = report.max_pressures()[0];

    assert_relative_eq!(pmax, expected, max_relative = 1.0e-3);
    // Tighter than required, the quadrature is far more accurate than that.
    assert_relative_eq!(pmax, expected, max_relative = 1.0e-7);
}

#[test]
fn peak_pressure_is_linear_in_the_penetration() {
    let (wheel, rail) = parabolic_pair();
    let options = SolverOptions::default();

    let p1 = evaluate_contact(&wheel, &rail, &params(0.1, 0.05), &options).unwrap();
    let p2 = evaluate_contact(&wheel, &rail, &params(0.2, 0.05), &options).unwrap();

    assert_relative_eq!(
        p2.max_pressures()[0],
        2.0 * p1.max_pressures()[0],
        max_relative = 1.0e-12
    );
}

#[test]
fn larger_virtual_penetration_spreads_the_load() {
    // With δ fixed, pmax = coef · sqrt(2 R δ₀) / S1 and S1 grows faster than sqrt(δ₀):
    // widening the patch lowers the peak pressure.
    let (wheel, rail) = parabolic_pair();
    let options = SolverOptions::default();

    let mut previous = Real::INFINITY;
    let mut previous_len = 0;
    for delta0 in [0.01, 0.02, 0.05, 0.1] {
        let report = evaluate_contact(&wheel, &rail, &params(0.1, delta0), &options).unwrap();
        assert_eq!(report.patches.len(), 1);

        let patch = report.patches[0];
        assert!(patch.len() > previous_len);
        previous_len = patch.len();

        let pmax = report.max_pressures()[0];
        assert!(pmax < previous, "δ₀ = {delta0}: {pmax} >= {previous}");
        previous = pmax;
    }
}

#[test]
fn reconstructed_field_recovers_the_load() {
    let (wheel, rail) = parabolic_pair();
    let params = params(0.1, 0.05);
    let report = evaluate_contact(&wheel, &rail, &params, &SolverOptions::default()).unwrap();
    let solved = report.solved().next().unwrap();

    let field = PatchDistribution::new(&report.interpenetration, solved, &params);
    let load = field
        .integrated_load(&QuadratureOptions::default())
        .unwrap();

    assert_relative_eq!(load, solved.load, max_relative = 1.0e-6);
    assert_relative_eq!(field.peak(), solved.pmax, max_relative = 1.0e-12);
    assert_relative_eq!(report.total_load(), solved.load);

    // The display curve peaks at the patch center and vanishes at its edges.
    let lateral = lateral_pressure(rail.ys(), &report.outcomes);
    assert_eq!(lateral[6], 0.0);
    assert_eq!(lateral[7], 0.0);
    assert_eq!(lateral[34], 0.0);
    assert!(lateral[20] > 0.99 * solved.pmax);
}
