use pkcontact::query::{contact_patches, ContactPatch};

fn ranges(values: &[f64]) -> Vec<(usize, usize)> {
    contact_patches(values)
        .into_iter()
        .map(|p| (p.start(), p.end()))
        .collect()
}

#[test]
fn reference_mask() {
    assert_eq!(
        ranges(&[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0]),
        vec![(2, 4), (5, 6)]
    );
}

#[test]
fn all_zero_and_all_positive() {
    for n in 0..12 {
        assert!(contact_patches(&vec![0.0; n]).is_empty());
    }

    for n in 1..12 {
        assert_eq!(ranges(&vec![0.3; n]), vec![(0, n)]);
    }
}

#[test]
fn random_masks_are_partitioned_exactly() {
    let mut rng = oorandom::Rand64::new(0x5eed_cafe);

    for _ in 0..200 {
        let n = rng.rand_range(0..40) as usize;
        let values: Vec<f64> = (0..n)
            .map(|_| {
                if rng.rand_float() < 0.5 {
                    0.0
                } else {
                    rng.rand_float() + 1.0e-9
                }
            })
            .collect();

        let patches = contact_patches(&values);

        // Patches are ordered, disjoint, non-empty and maximal.
        for pair in patches.windows(2) {
            assert!(pair[0].end() < pair[1].start());
        }
        for patch in &patches {
            assert!(patch.len() > 0);
            assert!(patch.start() == 0 || values[patch.start() - 1] == 0.0);
            assert!(patch.end() == n || values[patch.end()] == 0.0);
        }

        // Every positive value is covered, and nothing else.
        for (i, v) in values.iter().enumerate() {
            let covered = patches.iter().any(|p: &ContactPatch| p.contains(i));
            assert_eq!(covered, *v > 0.0, "node {i} of {values:?}");
        }
    }
}
