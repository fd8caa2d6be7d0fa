//! End-to-end checks of the sizing engine through its public API.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use cable_core::calculations::ampacity::{ampacity, recommend_fuse, AmpacityConditions};
use cable_core::calculations::sizing::{area_to_diameter, required_area};
use cable_core::calculations::standard_size::resolve_standard;
use cable_core::calculations::thermal::resistivity_at;
use cable_core::calculations::TemperatureStatus;
use cable_core::derating::InstallationMethod;
use cable_core::materials::{ConductorMaterial, WireType};
use cable_core::units::AmbientTemperature;
use cable_core::{calculate, CalcError, Catalog, EngineSettings, SizingInput};

fn run(input: &SizingInput) -> cable_core::SizingResult {
    calculate(input, &EngineSettings::default(), Catalog::builtin()).unwrap()
}

#[test]
fn scenario_12v_copper_one_way() {
    let result = run(&SizingInput::new("", 12.0, 10.0, 5.0));
    assert_abs_diff_eq!(result.required_area_mm2, 2.4306, epsilon = 1e-4);
    assert_eq!(result.metric.size.area_mm2(), 2.5);
}

#[test]
fn scenario_12v_copper_round_trip() {
    let mut input = SizingInput::new("", 12.0, 10.0, 5.0);
    input.round_trip = true;
    let result = run(&input);
    assert_abs_diff_eq!(result.required_area_mm2, 4.8611, epsilon = 1e-4);
    assert_eq!(result.metric.size.area_mm2(), 6.0);
}

#[test]
fn scenario_24v_five_percent() {
    let mut input = SizingInput::new("", 24.0, 20.0, 10.0);
    input.max_drop_percent = 5.0;
    let result = run(&input);
    assert_abs_diff_eq!(result.required_area_mm2, 2.9167, epsilon = 1e-4);
    assert_eq!(result.metric.size.area_mm2(), 4.0);
    assert_eq!(result.awg.size.label(), Some("12"));
}

#[test]
fn scenario_50v_round_trip_two_percent() {
    let mut input = SizingInput::new("", 50.0, 5.0, 15.0);
    input.max_drop_percent = 2.0;
    input.round_trip = true;
    let result = run(&input);
    assert_abs_diff_eq!(result.required_area_mm2, 2.625, epsilon = 1e-9);
}

#[test]
fn scenario_isolated_at_freezing() {
    let mut input = SizingInput::new("", 12.0, 10.0, 5.0);
    input.ambient = AmbientTemperature::celsius(0.0);
    input.installation = InstallationMethod::Isolated;
    let result = run(&input);
    assert_eq!(result.effective_temp_c, 20.0);
    assert_abs_diff_eq!(result.required_area_mm2, 2.4306, epsilon = 1e-4);
}

#[test]
fn scenario_resolve_with_margin() {
    let resolution = resolve_standard(3.5, Catalog::builtin().metric_sizes()).unwrap();
    assert_eq!(resolution.size.area_mm2(), 4.0);
    assert_relative_eq!(resolution.margin_mm2, 0.5);
}

#[test]
fn diameter_round_trips_to_area() {
    for tenth in 1..=2500 {
        let area = tenth as f64 / 10.0;
        let d = area_to_diameter(area);
        let back = std::f64::consts::PI * (d / 2.0).powi(2);
        assert!((back - area).abs() < 1e-4, "area {area}");
    }
}

#[test]
fn round_trip_area_is_double_one_way() {
    for (v, i, l) in [(12.0, 10.0, 5.0), (24.0, 35.0, 18.5), (48.0, 2.0, 40.0)] {
        let mut input = SizingInput::new("", v, i, l);
        let one_way = required_area(&input).unwrap();
        input.round_trip = true;
        assert_relative_eq!(required_area(&input).unwrap(), 2.0 * one_way, max_relative = 1e-12);
    }
}

#[test]
fn resistivity_reference_and_monotonic() {
    for material in ConductorMaterial::ALL {
        assert_eq!(resistivity_at(material, 20.0), material.properties().resistivity_20c);
        assert!(resistivity_at(material, 60.0) > resistivity_at(material, 59.9));
    }
}

#[test]
fn resolver_never_undersizes_unless_flagged() {
    let catalog = Catalog::builtin();
    for table in [catalog.metric_sizes(), catalog.awg_sizes()] {
        for step in 1..=3000 {
            let required = step as f64 * 0.1;
            let r = resolve_standard(required, table).unwrap();
            if r.fits {
                assert!(r.size.area_mm2() >= required);
            } else {
                assert_eq!(&r.size, table.last().unwrap());
                assert_abs_diff_eq!(r.margin_mm2, required - r.size.area_mm2(), epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn ampacity_non_increasing_with_ambient() {
    let catalog = Catalog::builtin();
    for material in ConductorMaterial::ALL {
        let mut previous = f64::INFINITY;
        for step in 0..=50 {
            let conditions =
                AmpacityConditions::new(material, InstallationMethod::Conduit, -10.0 + 2.0 * step as f64, WireType::Thhn);
            let amps = ampacity(16.0, &conditions, catalog).unwrap();
            assert!(amps <= previous + 1e-12);
            previous = amps;
        }
    }
}

#[test]
fn aluminum_carries_less_than_copper() {
    let catalog = Catalog::builtin();
    let cu = AmpacityConditions::new(ConductorMaterial::Copper, InstallationMethod::InAir, 30.0, WireType::Xlpe);
    let al = AmpacityConditions {
        material: ConductorMaterial::Aluminum,
        ..cu
    };
    let ratio = ampacity(25.0, &al, catalog).unwrap() / ampacity(25.0, &cu, catalog).unwrap();
    assert_relative_eq!(ratio, 0.61, epsilon = 1e-12);
}

#[test]
fn fuse_is_standard_and_within_limit() {
    let catalog = Catalog::builtin();
    for amps in [0.5, 3.3, 12.0, 29.16, 61.0, 240.0, 900.0] {
        let fuse = recommend_fuse(amps, 0.85, catalog).unwrap();
        assert!(catalog.fuse_ratings_a().contains(&fuse.rating_a));
        assert!(fuse.exceeds_limit || fuse.rating_a <= amps * 0.85);
    }
}

#[test]
fn temperature_verdict_does_not_gate_sizing() {
    let mut input = SizingInput::new("Engine bay", 12.0, 10.0, 2.0);
    input.wire_type = WireType::Thwn;
    input.installation = InstallationMethod::Isolated;
    input.ambient = AmbientTemperature::fahrenheit(158.0);
    let result = run(&input);
    // 70°C + 20°C > 75°C
    assert_eq!(result.temperature.status, TemperatureStatus::Unsafe);
    assert!(result.metric.fits);
    assert!(result.metric.voltage_drop.within_limit);
}

#[test]
fn voltage_ceiling_is_configurable() {
    let input = SizingInput::new("48V telecom", 54.0, 10.0, 20.0);
    let err = calculate(&input, &EngineSettings::default(), Catalog::builtin()).unwrap_err();
    assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "voltage_v"));

    let settings = EngineSettings::default().with_max_voltage(60.0);
    assert!(calculate(&input, &settings, Catalog::builtin()).is_ok());
}

#[test]
fn result_serializes_to_json() {
    let result = run(&SizingInput::new("Chartplotter", 12.0, 2.0, 8.0));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["label"], "Chartplotter");
    assert_eq!(json["metric"]["size"]["system"], "Metric");
    assert_eq!(json["awg"]["size"]["system"], "Awg");
    assert_eq!(json["temperature"]["status"], "safe");
}
