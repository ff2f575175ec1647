use pkcontact::io::{load_profile, parse_profile, ProfileFormat};
use pkcontact::math::Real;
use pkcontact::query::{evaluate_contact, ContactParameters, SolverOptions};
use core::fmt::Write as _;
use std::fs;

const RADIUS: Real = 460.0;

/// Writes a profile file, with `z` measured downward, the way measurement tools export them.
fn profile_file(header: &[&str], ys: &[Real], z: impl Fn(Real) -> Real) -> String {
    let mut text = String::new();
    for line in header {
        writeln!(text, "{line}").unwrap();
    }
    // Scanned in the reverse lateral direction.
    for y in ys.iter().rev() {
        writeln!(text, "{:.6}\t{:.9}", y, -z(*y)).unwrap();
    }
    text
}

#[test]
fn loaded_profiles_run_through_the_pipeline() {
    let wheel_ys: Vec<Real> = (0..61).map(|i| -15.0 + 0.5 * i as Real).collect();
    let rail_ys: Vec<Real> = (0..42).map(|i| -10.25 + 0.5 * i as Real).collect();

    let wheel_text = profile_file(&["wheel profile", "y z"], &wheel_ys, |y| {
        y * y / (2.0 * RADIUS)
    });
    let rail_text = profile_file(&[], &rail_ys, |_| -1.0);

    let dir = std::env::temp_dir().join(format!("pkcontact-loader-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let wheel_path = dir.join("wheel.txt");
    let rail_path = dir.join("rail.txt");
    fs::write(&wheel_path, wheel_text).unwrap();
    fs::write(&rail_path, rail_text).unwrap();

    let wheel = load_profile(&wheel_path, &ProfileFormat::wheel()).unwrap();
    let rail = load_profile(&rail_path, &ProfileFormat::rail()).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(wheel.len(), 61);
    assert_eq!(rail.len(), 42);
    // Files are in scan order, and the vertical axis is flipped back up.
    assert!(!wheel.is_strictly_increasing());
    assert_relative_eq!(wheel.zs()[0], 225.0 / 920.0, epsilon = 1.0e-9);
    assert_relative_eq!(rail.zs()[0], -1.0);

    let wheel = wheel.sorted();
    let rail = rail.sorted();
    assert!(wheel.is_strictly_increasing());

    let params = ContactParameters::new(RADIUS, 210_000.0, 0.3, 0.1, 0.05);
    let report = evaluate_contact(&wheel, &rail, &params, &SolverOptions::default()).unwrap();

    // The vertical offset of the rail does not matter, only the gap shape does.
    assert_eq!(report.patches.len(), 1);
    assert_eq!(report.patches[0].range(), 7..35);
    assert!(report.max_pressures()[0] > 0.0);
}

#[test]
fn unsorted_profiles_are_rejected_by_the_pipeline() {
    let text = "0 0\n2 0\n1 0\n3 0\n";
    let wheel = parse_profile(text, &ProfileFormat::rail()).unwrap();
    let rail = parse_profile("0.5 1\n1.5 1\n2.5 1\n", &ProfileFormat::rail()).unwrap();
    let params = ContactParameters::new(RADIUS, 210_000.0, 0.3, 0.1, 0.05);

    assert!(evaluate_contact(&wheel, &rail, &params, &SolverOptions::default()).is_err());
    assert!(evaluate_contact(&wheel.sorted(), &rail, &params, &SolverOptions::default()).is_ok());
}
