//! Argument handling and the calculation flow behind the binary.
//!
//! [`run`] takes its input, output, and prompt streams as parameters so the
//! whole flow can be driven from tests. Prompts never share a stream with
//! results: `--json` output on stdout stays a single JSON document.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use calc_core::calculations::{BlastEngine, MaterialResult, SAFETY_FACTOR};
use calc_core::catalog::{load_catalog, BlastCatalog};
use calc_core::errors::{CalcError, CalcResult};
use calc_core::file_io::save_report;
use calc_core::report::{CalculationRecord, REPORT_DATE_FORMAT};
use clap::Parser;

/// Estimate blast effects for a suspect package
#[derive(Parser, Debug)]
#[command(name = "calc_cli", version)]
#[command(about = "Estimate blast effects for a package of unknown contents")]
pub struct Args {
    /// Package length in centimeters (prompted if omitted)
    #[arg(short = 'l', long)]
    pub length: Option<String>,

    /// Package width in centimeters (prompted if omitted)
    #[arg(short = 'w', long)]
    pub width: Option<String>,

    /// Package height in centimeters (prompted if omitted)
    #[arg(short = 'H', long)]
    pub height: Option<String>,

    /// TOML catalog replacing the built-in materials and damage tiers
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Write the plain-text report into this directory
    #[arg(long)]
    pub save: Option<PathBuf>,
}

/// Run one calculation.
///
/// Missing dimensions are prompted for on `prompts` and read from `input`.
/// Results (table or JSON) go to `out`.
pub fn run<R, W, P>(args: &Args, input: &mut R, out: &mut W, prompts: &mut P) -> CalcResult<()>
where
    R: BufRead,
    W: Write,
    P: Write,
{
    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => BlastCatalog::default(),
    };
    let engine = BlastEngine::new(catalog);

    if !args.json {
        writeln!(out, "EOD SYSTEM - Structural Safety Calculation").map_err(stdout_error)?;
        writeln!(out, "==========================================").map_err(stdout_error)?;
        writeln!(out).map_err(stdout_error)?;
        out.flush().map_err(stdout_error)?;
    }

    let length = dimension_input(&args.length, "Length (cm): ", input, prompts)?;
    let width = dimension_input(&args.width, "Width (cm): ", input, prompts)?;
    let height = dimension_input(&args.height, "Height (cm): ", input, prompts)?;

    let record = CalculationRecord::from_inputs(&engine, &length, &width, &height)?;
    tracing::debug!(materials = record.results.len(), "calculation complete");

    if args.json {
        writeln!(out, "{}", record.to_json()?).map_err(stdout_error)?;
    } else {
        print_results(&record, out).map_err(stdout_error)?;
    }

    if let Some(dir) = &args.save {
        let export = save_report(&record, dir)?;
        let path = export.finish();
        if args.json {
            tracing::info!(path = %path.display(), "report saved");
        } else {
            writeln!(out).map_err(stdout_error)?;
            writeln!(out, "Report saved: {}", path.display()).map_err(stdout_error)?;
        }
    }

    Ok(())
}

fn stdout_error(e: std::io::Error) -> CalcError {
    CalcError::file_error("write", "stdout", e.to_string())
}

/// Use the flag value if given, otherwise prompt for it.
fn dimension_input<R: BufRead, P: Write>(
    flag: &Option<String>,
    prompt: &str,
    input: &mut R,
    prompts: &mut P,
) -> CalcResult<String> {
    match flag {
        Some(value) => Ok(value.clone()),
        None => prompt_string(prompt, input, prompts),
    }
}

fn prompt_string<R: BufRead, P: Write>(
    prompt: &str,
    input: &mut R,
    prompts: &mut P,
) -> CalcResult<String> {
    write!(prompts, "{}", prompt)
        .and_then(|_| prompts.flush())
        .map_err(|e| CalcError::file_error("write", "stderr", e.to_string()))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| CalcError::file_error("read", "stdin", e.to_string()))?;

    Ok(line.trim().to_string())
}

fn print_results<W: Write>(record: &CalculationRecord, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Package: {} x {} x {} cm",
        record.length_input, record.width_input, record.height_input
    )?;
    writeln!(out, "Calculated: {}", record.calculated_at.format(REPORT_DATE_FORMAT))?;
    writeln!(out, "Safety factor: {}x", SAFETY_FACTOR)?;

    for result in &record.results {
        print_material(result, out)?;
    }
    Ok(())
}

fn print_material<W: Write>(r: &MaterialResult, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "═══════════════════════════════════════")?;
    writeln!(out, "  {}", r.material_name)?;
    writeln!(out, "═══════════════════════════════════════")?;
    writeln!(out, "  Estimated mass:          {:>10.2} kg", r.estimated_mass_kg)?;
    writeln!(out, "  NEQ:                     {:>10.2} kg TNT", r.tnt_equivalent_mass_kg)?;
    writeln!(out, "  Fragmentation distance:  {:>10.2} m", r.base_fragmentation_distance_m)?;
    writeln!(out, "  Safety perimeter:        {:>10.2} m", r.safety_perimeter_m)?;
    writeln!(out, "  Concrete shielding:      {:>10.2} m", r.concrete_shielding_thickness_m)?;
    writeln!(out, "  Structural damage radii:")?;
    for radius in &r.damage_radii {
        writeln!(out, "    {:<10} {:>10.2} m", radius.label, radius.distance_m)?;
    }
    Ok(())
}
