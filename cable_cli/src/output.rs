//! Human and JSON renderings of engine results.
//!
//! Every renderer writes to a caller-supplied writer.

use std::io::{self, Write};

use cable_core::calculations::ampacity::{AmpacityConditions, SafeSizeSelection};
use cable_core::calculations::{SizeRecommendation, TemperatureStatus};
use cable_core::derating::InstallationMethod;
use cable_core::materials::{ConductorMaterial, WireType};
use cable_core::{Catalog, SizingInput, SizingResult};
use serde::Serialize;
use serde_json::json;

use crate::schedule::{CableSchedule, CircuitOutcome};
use crate::OutputFormat;

const RULE: &str = "═══════════════════════════════════════";

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

fn banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  {}", title)?;
    writeln!(out, "{}", RULE)
}

pub fn print_sizing<W: Write>(
    out: &mut W,
    input: &SizingInput,
    result: &SizingResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => print_json(
            out,
            &json!({
                "input": input,
                "result": result,
                "warnings": result.warnings(),
            }),
        ),
        OutputFormat::Human => print_sizing_human(out, input, result),
    }
}

/// Full human-readable report for one circuit.
pub fn print_sizing_human<W: Write>(out: &mut W, input: &SizingInput, result: &SizingResult) -> io::Result<()> {
    banner(out, "CABLE SIZING RESULTS")?;
    writeln!(out)?;
    writeln!(out, "Input:")?;
    if !input.label.is_empty() {
        writeln!(out, "  Label:        {}", input.label)?;
    }
    writeln!(out, "  System:       {:.1} V, {:.1} A", input.voltage_v, input.current_a)?;
    writeln!(
        out,
        "  Length:       {:.1} m ({})",
        input.length_m,
        if input.round_trip { "round trip" } else { "one-way" }
    )?;
    writeln!(out, "  Max drop:     {:.1}% ({:.3} V)", input.max_drop_percent, result.max_drop_v)?;
    writeln!(out, "  Conductor:    {}", input.material)?;
    writeln!(out, "  Installation: {}", input.installation)?;
    writeln!(out, "  Wire type:    {}", input.wire_type)?;
    writeln!(
        out,
        "  Ambient:      {:.1}°{} (effective {:.1}°C)",
        input.ambient.value,
        input.ambient.unit.symbol(),
        result.effective_temp_c
    )?;
    writeln!(out)?;
    writeln!(out, "Calculation:")?;
    writeln!(out, "  Resistivity:   {:.6} Ω·mm²/m", result.resistivity_ohm_mm2_per_m)?;
    writeln!(out, "  Required area: {:.4} mm²", result.required_area_mm2)?;
    writeln!(out, "  Diameter:      {:.3} mm", result.required_diameter_mm)?;
    writeln!(out)?;
    print_recommendation(out, "Metric", &result.metric)?;
    writeln!(out)?;
    print_recommendation(out, "AWG", &result.awg)?;
    writeln!(out)?;
    writeln!(
        out,
        "Minimum size for load ({:.1} A with margin):",
        result.min_safe_metric.required_a
    )?;
    print_safe_pick(out, "Metric", &result.min_safe_metric)?;
    print_safe_pick(out, "AWG", &result.min_safe_awg)?;
    writeln!(out)?;
    let temperature = &result.temperature;
    let status = match temperature.status {
        TemperatureStatus::Safe => "SAFE",
        TemperatureStatus::Caution => "CAUTION",
        TemperatureStatus::Unsafe => "UNSAFE",
    };
    writeln!(
        out,
        "Temperature: {} ({:.1}°C of {:.0}°C, headroom {:.1}°C)",
        status,
        temperature.effective_temp_c,
        temperature.max_temp_c,
        temperature.headroom_c()
    )?;
    writeln!(out)?;

    let warnings = result.warnings();
    let verdict = if warnings.is_empty() {
        "RESULT: OK"
    } else {
        "RESULT: CHECK WARNINGS"
    };
    banner(out, verdict)?;
    for warning in &warnings {
        writeln!(out, "  - {}", warning)?;
    }
    Ok(())
}

fn print_recommendation<W: Write>(out: &mut W, title: &str, rec: &SizeRecommendation) -> io::Result<()> {
    writeln!(out, "{}: {} {}", title, rec.size, status_icon(rec.fits))?;
    if rec.fits {
        writeln!(out, "  Margin:   +{:.3} mm²", rec.margin_mm2)?;
    } else {
        writeln!(out, "  Deficit:  {:.3} mm²", rec.margin_mm2)?;
    }
    writeln!(out, "  Diameter: {:.3} mm", rec.diameter_mm)?;
    writeln!(
        out,
        "  Drop:     {:.3} V ({:.2}%) {}",
        rec.voltage_drop.volts,
        rec.voltage_drop.percent,
        status_icon(rec.voltage_drop.within_limit)
    )?;
    writeln!(out, "  Ampacity: {:.1} A {}", rec.ampacity_a, status_icon(rec.carries_load))?;
    writeln!(
        out,
        "  Fuse:     {} A (limit {:.1} A){}",
        rec.fuse.rating_a,
        rec.fuse.limit_a,
        if rec.fuse.exceeds_limit { " [FAIL]" } else { "" }
    )?;
    writeln!(out, "  Mass:     {:.3} kg", rec.conductor_mass_kg)
}

fn print_safe_pick<W: Write>(out: &mut W, title: &str, pick: &SafeSizeSelection) -> io::Result<()> {
    writeln!(
        out,
        "  {:<7} {} ({:.1} A) {}",
        format!("{}:", title),
        pick.size,
        pick.ampacity_a,
        status_icon(pick.safe)
    )
}

pub fn print_min_size<W: Write>(
    out: &mut W,
    current_a: f64,
    conditions: &AmpacityConditions,
    metric: &SafeSizeSelection,
    awg: &SafeSizeSelection,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => print_json(
            out,
            &json!({
                "current_a": current_a,
                "conditions": conditions,
                "metric": metric,
                "awg": awg,
            }),
        ),
        OutputFormat::Human => {
            banner(out, "MINIMUM SAFE SIZE")?;
            writeln!(out)?;
            writeln!(out, "  Load:         {:.1} A (required {:.1} A)", current_a, metric.required_a)?;
            writeln!(out, "  Conductor:    {}", conditions.material)?;
            writeln!(out, "  Installation: {}", conditions.installation)?;
            writeln!(out, "  Wire type:    {}", conditions.wire_type)?;
            writeln!(out, "  Ambient:      {:.1}°C", conditions.ambient_c)?;
            writeln!(out)?;
            print_safe_pick(out, "Metric", metric)?;
            print_safe_pick(out, "AWG", awg)
        }
    }
}

pub fn print_catalog<W: Write>(out: &mut W, catalog: &Catalog, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => print_json(
            out,
            &json!({
                "materials": ConductorMaterial::ALL.iter().map(|m| json!({
                    "key": m.key(),
                    "properties": m.properties(),
                })).collect::<Vec<_>>(),
                "installations": InstallationMethod::ALL.iter().map(|i| json!({
                    "key": i.key(),
                    "name": i.display_name(),
                    "temp_adjustment_c": i.temp_adjustment_c(),
                    "ampacity_factor": i.ampacity_factor(),
                })).collect::<Vec<_>>(),
                "wire_types": WireType::ALL.iter().map(|w| json!({
                    "key": w.key(),
                    "name": w.display_name(),
                    "max_temp_c": w.max_temp_c(),
                })).collect::<Vec<_>>(),
                "tables": catalog,
            }),
        ),
        OutputFormat::Human => {
            writeln!(out, "Materials:")?;
            for material in ConductorMaterial::ALL {
                let props = material.properties();
                writeln!(
                    out,
                    "  {:<10} {:<10} ρ20={:.4} Ω·mm²/m  α={:.5}/°C  {}",
                    material.key(),
                    props.name,
                    props.resistivity_20c,
                    props.temp_coefficient,
                    material.description()
                )?;
            }
            writeln!(out)?;
            writeln!(out, "Installation methods:")?;
            for method in InstallationMethod::ALL {
                writeln!(
                    out,
                    "  {:<10} {:<20} {}",
                    method.key(),
                    method.display_name(),
                    method.description()
                )?;
            }
            writeln!(out)?;
            writeln!(out, "Wire types:")?;
            for wire in WireType::ALL {
                writeln!(out, "  {:<10} {:<20} {}", wire.key(), wire.to_string(), wire.description())?;
            }
            writeln!(out)?;
            let metric: Vec<String> = catalog.metric_sizes().iter().map(|s| s.area_mm2().to_string()).collect();
            writeln!(out, "Metric sizes (mm²): {}", metric.join(", "))?;
            let awg: Vec<String> = catalog
                .awg_sizes()
                .iter()
                .filter_map(|s| s.label().map(str::to_string))
                .collect();
            writeln!(out, "AWG sizes: {}", awg.join(", "))?;
            let fuses: Vec<String> = catalog.fuse_ratings_a().iter().map(|f| f.to_string()).collect();
            writeln!(out, "Fuses (A): {}", fuses.join(", "))
        }
    }
}

pub fn print_schedule<W: Write>(
    out: &mut W,
    schedule: &CableSchedule,
    outcomes: &[CircuitOutcome],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => print_json(
            out,
            &json!({
                "meta": schedule.meta,
                "settings": schedule.settings,
                "circuits": outcomes,
            }),
        ),
        OutputFormat::Human => {
            banner(out, "CABLE SCHEDULE")?;
            writeln!(out, "  Job:      {}", schedule.meta.job_id)?;
            writeln!(out, "  Vessel:   {}", schedule.meta.vessel)?;
            writeln!(out, "  Engineer: {}", schedule.meta.engineer)?;
            writeln!(out)?;
            writeln!(
                out,
                "  {:<20} {:>10} {:>16} {:>9} {:>8}  Notes",
                "Circuit", "Req. mm²", "Metric", "AWG", "Fuse"
            )?;
            writeln!(out, "  {}", "─".repeat(75))?;
            for outcome in outcomes {
                match &outcome.result {
                    Ok(result) => {
                        let awg = result.awg.size.label().unwrap_or("-");
                        let warnings = result.warnings().len();
                        let notes = if warnings == 0 {
                            "OK".to_string()
                        } else {
                            format!("{} warning(s)", warnings)
                        };
                        writeln!(
                            out,
                            "  {:<20} {:>10.3} {:>16} {:>9} {:>6} A  {}",
                            outcome.label,
                            result.required_area_mm2,
                            result.metric.size.to_string(),
                            awg,
                            result.metric.fuse.rating_a,
                            notes
                        )?;
                    }
                    Err(e) => {
                        writeln!(out, "  {:<20} ERROR: {}", outcome.label, e)?;
                    }
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_sizing_report_goes_to_writer() {
        let input = SizingInput::new("Bilge pump", 12.0, 10.0, 5.0);
        let result = cable_core::calculate(&input, &cable_core::EngineSettings::default(), Catalog::builtin()).unwrap();

        let human = render(|out| print_sizing(out, &input, &result, OutputFormat::Human));
        assert!(human.contains("Label:        Bilge pump"));
        assert!(human.contains("Metric: 2.50 mm² [OK]"));
        assert!(human.ends_with(&format!("RESULT: OK\n{}\n", RULE)));

        let json = render(|out| print_sizing(out, &input, &result, OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["input"]["label"], "Bilge pump");
    }

    #[test]
    fn test_catalog_lists_fuses() {
        let text = render(|out| print_catalog(out, Catalog::builtin(), OutputFormat::Human));
        assert!(text.starts_with("Materials:"));
        assert!(text.contains("Fuses (A): "));
    }
}
