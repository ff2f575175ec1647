use pkcontact::math::Real;
use pkcontact::query::{
    contact_patches, interpenetration, separation, ContactError, LengthMismatchError,
};
use pkcontact::shape::{align_profiles, AlignmentError, Profile};

fn random_profile(rng: &mut oorandom::Rand64, lo: Real, hi: Real, n: usize) -> Profile {
    let mut ys: Vec<Real> = (0..n).map(|_| lo + (hi - lo) * rng.rand_float()).collect();
    ys.push(lo);
    ys.push(hi);
    let zs = (0..ys.len()).map(|_| rng.rand_float() * 2.0 - 1.0).collect();
    let profile = Profile::from_coordinates(ys, zs).unwrap().sorted();

    // Random draws may collide; keep only strictly increasing samples.
    let (ys, zs): (Vec<_>, Vec<_>) = profile
        .points()
        .enumerate()
        .filter(|(i, p)| *i == 0 || p.x > profile.ys()[*i - 1])
        .map(|(_, p)| (p.x, p.y))
        .unzip();
    Profile::from_coordinates(ys, zs).unwrap()
}

#[test]
fn alignment_reproduces_the_reference_grid() {
    let mut rng = oorandom::Rand64::new(42);

    for _ in 0..50 {
        let source = random_profile(&mut rng, -40.0, 40.0, 60);
        let reference = random_profile(&mut rng, -30.0, 30.0, 25);

        let aligned = align_profiles(&source, &reference).unwrap();
        assert_eq!(aligned.len(), reference.len());
        assert_eq!(aligned.ys(), reference.ys());
        assert!(aligned.zs().iter().all(|z| *z >= -1.0 && *z <= 1.0));
    }
}

#[test]
fn alignment_requires_a_covering_domain() {
    let mut rng = oorandom::Rand64::new(7);
    let source = random_profile(&mut rng, -10.0, 10.0, 10);
    let reference = random_profile(&mut rng, -10.0, 10.5, 10);

    assert!(matches!(
        align_profiles(&source, &reference),
        Err(AlignmentError::DomainNotCovered { .. })
    ));
}

#[test]
fn separation_and_interpenetration_invariants() {
    let mut rng = oorandom::Rand64::new(1234);

    for _ in 0..50 {
        let rail = random_profile(&mut rng, -30.0, 30.0, 40);
        let wheel = random_profile(&mut rng, -35.0, 35.0, 80).translated(0.0, 5.0);
        let wheel = align_profiles(&wheel, &rail).unwrap();

        let sep = separation(&wheel, &rail).unwrap();
        assert_eq!(sep.len(), rail.len());
        assert_eq!(sep.min(), 0.0);

        let delta0 = 0.01 + rng.rand_float() * 0.5;
        let g = interpenetration(&sep, delta0);
        assert_eq!(g.len(), rail.len());

        for (s, g) in sep.iter().zip(g.iter()) {
            assert!(*g >= 0.0);
            if *s >= delta0 {
                assert_eq!(*g, 0.0);
            }
        }

        // The closest node always interpenetrates by exactly δ₀.
        let patches = contact_patches(g.as_slice());
        assert!(!patches.is_empty());
        assert!(g.max() == delta0);
    }
}

#[test]
fn separation_requires_aligned_profiles() {
    let a = Profile::from_coordinates(vec![0.0, 1.0, 2.0], vec![0.0; 3]).unwrap();
    let b = Profile::from_coordinates(vec![0.0, 1.0], vec![0.0; 2]).unwrap();

    let err: ContactError = separation(&a, &b).unwrap_err().into();
    assert!(matches!(
        err,
        ContactError::LengthMismatch(LengthMismatchError { top: 3, bottom: 2 })
    ));
}
