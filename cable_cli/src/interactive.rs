//! Line-oriented prompt loop for sizing circuits one after another.
//!
//! Every optional field shows its default in brackets; an empty answer takes
//! it. Invalid answers are reported and asked again. End of input stops the
//! loop cleanly.

use std::io::{self, BufRead, Write};

use cable_core::derating::InstallationMethod;
use cable_core::materials::{ConductorMaterial, WireType};
use cable_core::units::{AmbientTemperature, TemperatureUnit};
use cable_core::{calculate, CalcResult, Catalog, EngineSettings, SizingInput};

use crate::output;

fn to_message<T>(result: CalcResult<T>) -> Result<T, String> {
    result.map_err(|e| e.to_string())
}

pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Prompter { reader, writer }
    }

    /// Ask once; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until `parse` accepts the answer; an empty answer yields `default` if there is one.
    fn ask_parsed<T>(
        &mut self,
        prompt: &str,
        default: Option<T>,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> io::Result<Option<T>>
    where
        T: Clone,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                if let Some(value) = &default {
                    return Ok(Some(value.clone()));
                }
                writeln!(self.writer, "  A value is required.")?;
                continue;
            }
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(reason) => writeln!(self.writer, "  {}", reason)?,
            }
        }
    }

    fn ask_f64(&mut self, prompt: &str, default: Option<f64>) -> io::Result<Option<f64>> {
        self.ask_parsed(prompt, default, |s| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("'{}' is not a number.", s))
        })
    }

    fn ask_yes_no(&mut self, prompt: &str, default: bool) -> io::Result<Option<bool>> {
        self.ask_parsed(prompt, Some(default), |s| match s.to_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err("Please answer y or n.".to_string()),
        })
    }

    /// Collect one circuit; `None` if input ended part-way.
    fn read_circuit(&mut self, settings: &EngineSettings) -> io::Result<Option<SizingInput>> {
        let Some(voltage_v) = self.ask_f64("System voltage (V): ", None)? else {
            return Ok(None);
        };
        let Some(current_a) = self.ask_f64("Load current (A): ", None)? else {
            return Ok(None);
        };
        let Some(length_m) = self.ask_f64("Cable length, one-way (m): ", None)? else {
            return Ok(None);
        };
        let drop_prompt = format!("Max voltage drop (%) [{}]: ", settings.default_drop_percent);
        let Some(max_drop_percent) = self.ask_f64(&drop_prompt, Some(settings.default_drop_percent))? else {
            return Ok(None);
        };
        let Some(round_trip) = self.ask_yes_no("Round trip (both conductors)? (y/N): ", false)? else {
            return Ok(None);
        };
        let Some(material) = self.ask_parsed("Material (copper/aluminum) [copper]: ", Some(ConductorMaterial::Copper), |s| {
            to_message(ConductorMaterial::from_str_flexible(s))
        })?
        else {
            return Ok(None);
        };
        let Some(unit) = self.ask_parsed("Temperature unit (C/F) [C]: ", Some(TemperatureUnit::Celsius), |s| {
            to_message(TemperatureUnit::from_str_flexible(s))
        })?
        else {
            return Ok(None);
        };
        let default_ambient = match unit {
            TemperatureUnit::Celsius => 20.0,
            TemperatureUnit::Fahrenheit => 68.0,
        };
        let ambient_prompt = format!("Ambient temperature (°{}) [{}]: ", unit.symbol(), default_ambient);
        let Some(ambient) = self.ask_f64(&ambient_prompt, Some(default_ambient))? else {
            return Ok(None);
        };
        let Some(installation) = self.ask_parsed(
            "Installation (air/conduit/isolated) [air]: ",
            Some(InstallationMethod::InAir),
            |s| to_message(InstallationMethod::from_str_flexible(s)),
        )?
        else {
            return Ok(None);
        };
        let Some(wire_type) = self.ask_parsed(
            "Wire type (flry/thhn/thwn/xlpe/pvc/silicone/generic) [generic]: ",
            Some(WireType::Generic),
            |s| to_message(WireType::from_str_flexible(s)),
        )?
        else {
            return Ok(None);
        };

        Ok(Some(SizingInput {
            label: String::new(),
            voltage_v,
            current_a,
            length_m,
            max_drop_percent,
            round_trip,
            material,
            ambient: AmbientTemperature { value: ambient, unit },
            installation,
            wire_type,
        }))
    }

    /// Size circuits until the user declines or input ends.
    pub fn run(&mut self, settings: &EngineSettings, catalog: &Catalog) -> io::Result<()> {
        writeln!(self.writer, "DC Cable Sizer")?;
        writeln!(self.writer, "==============")?;
        loop {
            writeln!(self.writer)?;
            let Some(input) = self.read_circuit(settings)? else {
                return Ok(());
            };
            writeln!(self.writer)?;
            match calculate(&input, settings, catalog) {
                Ok(result) => output::print_sizing_human(&mut self.writer, &input, &result)?,
                Err(e) => writeln!(self.writer, "Error: {}", e)?,
            }
            writeln!(self.writer)?;
            match self.ask_yes_no("Calculate another? (y/N): ", false)? {
                Some(true) => continue,
                _ => return Ok(()),
            }
        }
    }
}
