use one_hit_man::beam::*;
use one_hit_man::entities::*;

fn aged(mut beam: BeamHazard, ticks: u32) -> BeamHazard {
    for _ in 0..ticks {
        beam.update(1.0);
    }
    beam
}

#[test]
fn beam_runs_warning_then_damaging_then_done() {
    let beam = BeamHazard::new(400.0, 50.0, BeamOrientation::Vertical);
    assert_eq!(beam.phase(), BeamPhase::Warning);

    let beam = aged(beam, 89);
    assert_eq!(beam.phase(), BeamPhase::Warning);

    let beam = aged(beam, 1);
    assert_eq!(beam.phase(), BeamPhase::Damaging);

    let beam = aged(beam, 59);
    assert_eq!(beam.phase(), BeamPhase::Damaging);
    assert!(!beam.is_done());

    let beam = aged(beam, 1);
    assert_eq!(beam.phase(), BeamPhase::Done);
    assert!(beam.is_done());
}

#[test]
fn warning_beam_never_hits() {
    let beam = aged(BeamHazard::new(400.0, 50.0, BeamOrientation::Vertical), 45);
    assert!(beam.band_contains(400.0, 300.0));
    assert!(!beam.hits(400.0, 300.0));
}

#[test]
fn vertical_band_ignores_y() {
    let beam = aged(BeamHazard::new(400.0, 50.0, BeamOrientation::Vertical), 100);
    assert!(beam.hits(425.0, 0.0));
    assert!(beam.hits(375.0, 799.0));
    assert!(!beam.hits(426.0, 300.0));
}

#[test]
fn horizontal_band_ignores_x() {
    let beam = aged(BeamHazard::new(300.0, 40.0, BeamOrientation::Horizontal), 100);
    assert!(beam.hits(0.0, 300.0));
    assert!(beam.hits(1199.0, 319.0));
    assert!(!beam.hits(600.0, 321.0));
}

#[test]
fn done_beam_never_hits() {
    let beam = aged(BeamHazard::new(300.0, 40.0, BeamOrientation::Horizontal), 150);
    assert!(!beam.hits(600.0, 300.0));
}

#[test]
fn warning_progress_ramps_to_one() {
    let beam = BeamHazard::new(300.0, 40.0, BeamOrientation::Horizontal);
    assert_eq!(beam.warning_progress(), 0.0);
    let beam = aged(beam, 45);
    assert!((beam.warning_progress() - 0.5).abs() < 1e-6);
    let beam = aged(beam, 100);
    assert_eq!(beam.warning_progress(), 1.0);
}

#[test]
fn negative_width_is_clamped() {
    let beam = BeamHazard::new(300.0, -10.0, BeamOrientation::Vertical);
    assert_eq!(beam.width, 0.0);
}
