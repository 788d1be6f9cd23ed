// Propagation engine invariants checked through the public API

use alp_flux_mc::propagation;
use alp_flux_mc::{Detector, DetectorVolume, FluxSample, FluxSpectrum};
use approx::assert_relative_eq;

fn test_spectrum(mass: f64) -> FluxSpectrum {
    let mut flux = FluxSpectrum::new(mass);
    flux.push(FluxSample::new(5.0, 2.0));
    flux.push(FluxSample::new(50.0, 0.5));
    flux.push(FluxSample::new(500.0, 0.1));
    flux
}

#[test]
fn zero_width_means_full_survival_and_no_decay() {
    let detector = Detector::new(100.0, 5.0, 10.0).unwrap();
    let flux = test_spectrum(1.0);
    let w = propagation::propagate(&flux, &detector, 0.0, 1.0);
    assert_eq!(w.len(), flux.len(), "one weight pair per sample");
    for (i, sample) in flux.iter().enumerate() {
        assert_eq!(w.decay[i], 0.0, "stable particles never decay");
        assert_eq!(w.scatter[i], sample.weight, "stable particles all arrive");
    }
}

#[test]
fn enormous_width_removes_the_whole_flux() {
    let detector = Detector::new(100.0, 5.0, 10.0).unwrap();
    let flux = test_spectrum(1.0);
    let w = propagation::propagate(&flux, &detector, 1e10, 1.0);
    for i in 0..w.len() {
        assert_eq!(w.decay[i], 0.0, "nothing survives to the fiducial volume");
        assert_eq!(w.scatter[i], 0.0, "nothing survives the baseline");
    }
}

#[test]
fn sample_at_production_threshold_is_clamped() {
    // energy equal to the mass leaves the particle at rest
    let detector = Detector::new(100.0, 5.0, 10.0).unwrap();
    let mut flux = FluxSpectrum::new(10.0);
    flux.push(FluxSample::new(10.0, 1.0));
    for width in [0.0, 1e-12] {
        let w = propagation::propagate(&flux, &detector, width, 1.0);
        assert_eq!(w.decay[0], 0.0);
        assert_eq!(w.scatter[0], 0.0);
    }
}

#[test]
fn quadratic_rescale_applies_to_both_weight_arrays() {
    let detector = Detector::new(100.0, 5.0, 10.0).unwrap();
    let flux = test_spectrum(1.0);
    let width = 1e-16;
    let base = propagation::propagate(&flux, &detector, width, 1.0);
    let scaled = propagation::propagate(&flux, &detector, width, 4.0);
    for i in 0..base.len() {
        assert_relative_eq!(scaled.decay[i], 4.0 * base.decay[i], max_relative = 1e-12);
        assert_relative_eq!(scaled.scatter[i], 4.0 * base.scatter[i], max_relative = 1e-12);
    }
}

#[test]
fn geometric_acceptance_is_linear_in_area_and_inverse_square_in_distance() {
    let reference = Detector::new(100.0, 5.0, 10.0).unwrap();
    let double_area = Detector::new(100.0, 5.0, 20.0).unwrap();
    let double_dist = Detector::new(200.0, 5.0, 10.0).unwrap();
    assert_relative_eq!(
        double_area.geometric_acceptance(),
        2.0 * reference.geometric_acceptance(),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        double_dist.geometric_acceptance(),
        0.25 * reference.geometric_acceptance(),
        max_relative = 1e-12
    );
}

#[test]
fn volume_engine_keeps_point_survival_on_the_scatter_side() {
    let detector = Detector::new(500.0, 10.0, 25.0).unwrap();
    let volume = DetectorVolume::new(detector);
    let flux = test_spectrum(1.0);
    let width = 1e-17;
    let point = propagation::propagate(&flux, &detector, width, 1.0);
    let volumetric = propagation::propagate_volume(&flux, &volume, width, 1.0);
    for i in 0..point.len() {
        assert_relative_eq!(
            volumetric.scatter[i],
            point.scatter[i],
            max_relative = 1e-12
        );
        assert!(volumetric.decay[i] > 0.0, "unstable flux decays in the volume");
        assert!(volumetric.decay[i].is_finite());
    }
}
