//! Pipeline test over a synthetic 1000-event sample with known
//! generator/reconstructed distributions.

use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand_distr::Normal;

use mp_core::{algos_for_sample, lookup_sample, Variable};
use mp_resolution::{compute_resolution, EventTable};
use mp_root::Jagged;

const N_EVENTS: usize = 1000;

/// Build a table where every algorithm's MET is the generator value plus
/// Gaussian smearing, and HT correlates with event activity.
fn synthetic_table(seed: u64, with_nan_deepmet: bool) -> EventTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let gen_pt_dist = Uniform::new(20.0, 300.0);
    let phi_dist = Uniform::new(-std::f64::consts::PI, std::f64::consts::PI);
    let jet_count = Uniform::new(1usize, 8);
    let jet_pt = Uniform::new(15.0, 250.0);

    let mut gen_pt = Vec::with_capacity(N_EVENTS);
    let mut gen_phi = Vec::with_capacity(N_EVENTS);
    let mut genjet_flat = Vec::new();
    let mut genjet_offsets = vec![0usize];
    for _ in 0..N_EVENTS {
        gen_pt.push(gen_pt_dist.sample(&mut rng));
        gen_phi.push(phi_dist.sample(&mut rng));
        for _ in 0..jet_count.sample(&mut rng) {
            genjet_flat.push(jet_pt.sample(&mut rng));
        }
        genjet_offsets.push(genjet_flat.len());
    }

    let mut table = EventTable::new();
    table.insert_scalar("GenMET_pt", gen_pt.clone()).unwrap();
    table.insert_scalar("GenMET_phi", gen_phi.clone()).unwrap();
    table
        .insert_jagged("GenJet_pt", Jagged { flat: genjet_flat, offsets: genjet_offsets })
        .unwrap();

    for (prefix, sigma) in [
        ("MET", 18.0),
        ("PuppiMET", 12.0),
        ("DeepMETResolutionTune", 9.0),
        ("RawPuppiMET", 22.0),
        ("RawMET", 28.0),
    ] {
        let smear = Normal::new(0.0, sigma).unwrap();
        let mut pt: Vec<f64> =
            gen_pt.iter().map(|&g| (g + smear.sample(&mut rng)).max(0.0)).collect();
        if with_nan_deepmet && prefix == "DeepMETResolutionTune" {
            for v in pt.iter_mut().step_by(17) {
                *v = f64::NAN;
            }
        }
        table.insert_scalar(&format!("{prefix}_pt"), pt).unwrap();
        table
            .insert_scalar(
                &format!("{prefix}_phi"),
                (0..N_EVENTS).map(|_| phi_dist.sample(&mut rng)).collect(),
            )
            .unwrap();
    }

    table
}

#[test]
fn std_over_ht_produces_sane_dispersion() {
    let sample = lookup_sample("TTTT");
    let algos = algos_for_sample(&sample);
    let table = synthetic_table(7, false);

    let artifact =
        compute_resolution(&table, &sample, &algos, Variable::Ht, "std").unwrap();

    assert_eq!(artifact.sample, "TTTT");
    assert_eq!(artifact.estimator, "std");
    assert_eq!(artifact.series.len(), 5);

    for series in &artifact.series {
        assert_eq!(series.centers.len(), 13);
        assert_eq!(series.values.len(), 13);
        assert!(series.values.iter().all(|&v| v >= 0.0));
        // Every quantile bin of a 1000-event uniform sample is populated.
        assert!(series.values.iter().all(|&v| v > 0.0));
    }

    // Wider smearing must show up as larger dispersion, averaged over bins.
    let mean = |label: &str| {
        let s = artifact.series.iter().find(|s| s.label == label).unwrap();
        s.values.iter().sum::<f64>() / s.values.len() as f64
    };
    assert!(mean("DeepMET") < mean("PF"));
    assert!(mean("PF") < mean("PF raw"));
}

#[test]
fn deepmet_nan_events_are_filtered_not_fatal() {
    let sample = lookup_sample("TTTT");
    let algos = algos_for_sample(&sample);
    let table = synthetic_table(11, true);

    let artifact =
        compute_resolution(&table, &sample, &algos, Variable::Ht, "central68").unwrap();
    let deepmet = artifact.series.iter().find(|s| s.label == "DeepMET").unwrap();
    assert!(deepmet.values.iter().all(|v| v.is_finite()));
    assert!(deepmet.values.iter().any(|&v| v > 0.0));
}

#[test]
fn unknown_selector_yields_zero_series() {
    let sample = lookup_sample("TTTT");
    let algos = algos_for_sample(&sample);
    let table = synthetic_table(13, false);

    let artifact =
        compute_resolution(&table, &sample, &algos, Variable::Ht, "rms90").unwrap();
    assert!(artifact.series.iter().all(|s| s.values.iter().all(|&v| v == 0.0)));
}

#[test]
fn vertex_variable_uses_fixed_bins_and_leaves_empty_bins_at_zero() {
    let sample = lookup_sample("TTTT");
    let algos = algos_for_sample(&sample);
    let mut table = synthetic_table(17, false);
    // All events sit between 5 and 15 vertices; bins above stay empty.
    let mut rng = StdRng::seed_from_u64(99);
    let nvtx = Uniform::new(6.0_f64, 15.0);
    table
        .insert_scalar("PV_npvs", (0..N_EVENTS).map(|_| nvtx.sample(&mut rng).floor()).collect())
        .unwrap();

    let artifact =
        compute_resolution(&table, &sample, &algos, Variable::Nvtx, "std").unwrap();
    for series in &artifact.series {
        assert_eq!(series.centers.len(), 9);
        assert_eq!(series.centers[0], 7.5);
        assert!(series.values[0] > 0.0);
        // 35-40 bin and beyond hold no events.
        assert!(series.values[6..].iter().all(|&v| v == 0.0));
    }
}

#[test]
fn dy_sample_differs_from_magnitude_comparison() {
    let algos = algos_for_sample(&lookup_sample("DY_2018"));
    let table = synthetic_table(23, false);

    let dy = compute_resolution(&table, &lookup_sample("DY_2018"), &algos, Variable::Ht, "std")
        .unwrap();
    let plain =
        compute_resolution(&table, &lookup_sample("TTTT"), &algos, Variable::Ht, "std").unwrap();

    // Same columns, different residual definition: the x-component path must
    // not reproduce the magnitude path.
    let a = &dy.series[0].values;
    let b = &plain.series[0].values;
    assert!(a.iter().zip(b).any(|(x, y)| (x - y).abs() > 1e-6));
}
