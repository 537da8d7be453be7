//! CLI command implementations.

use std::path::Path;

use log::info;
use section_core::analysis::AnalysisFile;
use section_core::calculations::{sample, AnalysisInput, NeutralAxis};
use section_core::file_io::{load_analysis, save_analysis, save_surface};
use section_core::materials::MaterialParameters;
use section_core::section::{Rebar, Section};

use crate::export;
use crate::Preset;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Evaluate one neutral axis and print the result.
pub fn sample(path: &str, angle: f64, intercept: f64, json: bool) -> CommandResult {
    let file = load_analysis(Path::new(path))?;
    let result = sample::calculate(&file.input, NeutralAxis::new(angle, intercept))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", export::sample_report(&file.input, &result));
    }
    Ok(())
}

/// Sweep the configured grid, print a summary and write the requested outputs.
pub fn sweep(path: &str, output: Option<&str>, tsv: Option<&str>, sequential: bool) -> CommandResult {
    let mut file = load_analysis(Path::new(path))?;
    if sequential {
        file.sweep.parallel = false;
    }

    let surface = file.run_sweep()?;
    print!("{}", export::surface_report(&surface));

    if let Some(out) = output {
        save_surface(&surface, Path::new(out))?;
        info!("surface written to {}", out);
        println!("Surface JSON: {out}");
    }
    if let Some(out) = tsv {
        export::write_tsv(&surface, Path::new(out))?;
        info!("table written to {}", out);
        println!("Surface table: {out}");
    }
    Ok(())
}

/// Load and validate an analysis file.
pub fn validate(path: &str) -> CommandResult {
    let file = load_analysis(Path::new(path))?;
    file.input.validate()?;
    file.sweep.validate()?;

    let section = &file.input.section;
    println!("Analysis: {} (schema {})", file.input.label, file.meta.version);
    println!("  Vertices:  {}", section.vertices().len());
    println!("  Area:      {:.3}", section.area());
    println!("  Bars:      {} (ΣAs = {:.3})", section.rebars().len(), section.steel_area());
    println!("  Grid:      {} cells", file.sweep.cell_count());
    println!("OK");
    Ok(())
}

/// Write a starter analysis file for a preset.
pub fn template(preset: Preset, output: Option<&str>) -> CommandResult {
    let file = template_file(preset)?;
    match output {
        Some(out) => {
            save_analysis(&file, Path::new(out))?;
            println!("Template written to {out}");
        }
        None => println!("{}", serde_json::to_string_pretty(&file)?),
    }
    Ok(())
}

fn template_file(preset: Preset) -> Result<AnalysisFile, Box<dyn std::error::Error>> {
    let input = match preset {
        Preset::Aci => {
            let offsets = [(-5.6, 5.6), (0.0, 5.6), (5.6, 5.6), (5.6, 0.0), (5.6, -5.6), (0.0, -5.6), (-5.6, -5.6), (-5.6, 0.0)];
            let bars = offsets.iter().map(|&(x, y)| Rebar::new(x, y, 0.79)).collect();
            AnalysisInput::new(
                "C-1",
                Section::rectangular(16.0, 16.0, bars)?,
                MaterialParameters::aci(4.0, 60.0),
            )
        }
        Preset::Eurocode => {
            let offsets = [(-150.0, 150.0), (150.0, 150.0), (150.0, -150.0), (-150.0, -150.0)];
            let bars = offsets
                .iter()
                .map(|&(x, y)| Rebar::from_diameter(x, y, 25.0))
                .collect();
            AnalysisInput::new(
                "C-1",
                Section::rectangular(400.0, 400.0, bars)?,
                MaterialParameters::eurocode(30.0, 500.0),
            )
        }
    };
    Ok(AnalysisFile::new("", "", input))
}
