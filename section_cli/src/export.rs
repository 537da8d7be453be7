//! Text reports and tabular export.

use std::fmt::Write as _;
use std::path::Path;

use section_core::calculations::{AnalysisInput, CapacitySurface, ForceResultant, SampleResult};
use section_core::errors::CalcResult;
use section_core::file_io::write_atomic;

/// Column header of the tab-separated surface table
pub const TSV_HEADER: &str = "angle_deg\tintercept\tP\tMx\tMy";

/// One row per capacity point, tab-separated, with a header line.
pub fn surface_to_tsv(surface: &CapacitySurface) -> String {
    let mut out = String::with_capacity(48 * (surface.len() + 1));
    out.push_str(TSV_HEADER);
    out.push('\n');
    for p in &surface.points {
        let _ = writeln!(out, "{}\t{}\t{}\t{}\t{}", p.angle_deg, p.intercept, p.p, p.mx, p.my);
    }
    out
}

/// Write the surface table atomically.
pub fn write_tsv(surface: &CapacitySurface, path: &Path) -> CalcResult<()> {
    write_atomic(&surface_to_tsv(surface), path)
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "-".to_string())
}

fn resultant_line(name: &str, r: &ForceResultant) -> String {
    format!(
        "  {:<12} F = {:>12.3}  Mx = {:>12.3}  My = {:>12.3}  e = ({}, {})",
        name,
        r.force,
        r.mx,
        r.my,
        optional(r.ex),
        optional(r.ey)
    )
}

/// Human-readable report for one sample.
pub fn sample_report(input: &AnalysisInput, result: &SampleResult) -> String {
    let mut out = String::new();
    let rule = "═══════════════════════════════════════";
    let block = &result.stress_block;

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "  SECTION SAMPLE: {}", input.label);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Neutral axis:");
    let _ = writeln!(out, "  Angle:     {:.3}°", result.axis.angle_deg);
    let _ = writeln!(out, "  Intercept: {:.3}", result.axis.intercept);
    let _ = writeln!(out, "  State:     {}", block.state.display_name());
    let _ = writeln!(out, "  c:         {:.4}", block.extreme_fiber_distance);
    if result.singular_strain {
        let _ = writeln!(out, "  (zero extreme fiber distance, bar strains set to zero)");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Stress block:");
    let _ = writeln!(out, "  Area:      {:.3}", block.area);
    if let Some(c) = block.centroid {
        let _ = writeln!(out, "  Centroid:  ({:.3}, {:.3})", c.x, c.y);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Bars:");
    let _ = writeln!(
        out,
        "  {:>3} {:>9} {:>9} {:>10} {:>10} {:>10} {:>10}",
        "#", "x", "y", "strain", "stress", "force", "in block"
    );
    for bar in &result.bars {
        let _ = writeln!(
            out,
            "  {:>3} {:>9.3} {:>9.3} {:>10.5} {:>10.3} {:>10.3} {:>10}",
            bar.index,
            bar.position.x,
            bar.position.y,
            bar.strain,
            bar.stress,
            bar.force,
            if bar.in_stress_block { "yes" } else { "no" }
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Resultants (about {} at ({:.3}, {:.3})):",
        input.moment_reference.display_name(),
        result.reference_point.x,
        result.reference_point.y
    );
    let _ = writeln!(out, "{}", resultant_line("Concrete", &result.concrete));
    let _ = writeln!(out, "{}", resultant_line("Compression", &result.resultants.compression));
    let _ = writeln!(out, "{}", resultant_line("Tension", &result.resultants.tension));
    let _ = writeln!(out);
    let cap = &result.capacity;
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "  P = {:.3}   Mx = {:.3}   My = {:.3}", cap.p, cap.mx, cap.my);
    let _ = writeln!(out, "  Moment angle: {}", optional(result.moment_angle_deg));
    let _ = writeln!(out, "{rule}");
    out
}

/// Summary report for a sweep.
pub fn surface_report(surface: &CapacitySurface) -> String {
    let mut out = String::new();
    let summary = surface.summary();
    let rule = "═══════════════════════════════════════";

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "  CAPACITY SURFACE: {}", surface.label);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "  Points:  {}", summary.evaluated);
    let _ = writeln!(out, "  Failed:  {}", summary.failed);

    let extremes = [
        ("Max compression", summary.max_compression),
        ("Max tension", summary.max_tension),
        ("Max |Mx|", summary.max_abs_mx),
        ("Max |My|", summary.max_abs_my),
    ];
    for (name, point) in extremes {
        if let Some(p) = point {
            let _ = writeln!(
                out,
                "  {:<16} P = {:>12.3}  Mx = {:>12.3}  My = {:>12.3}  (α = {}, b = {})",
                name, p.p, p.mx, p.my, p.angle_deg, p.intercept
            );
        }
    }
    for failure in surface.failures.iter().take(10) {
        let _ = writeln!(
            out,
            "  ! α = {}, b = {}: {}",
            failure.angle_deg, failure.intercept, failure.error
        );
    }
    if surface.failures.len() > 10 {
        let _ = writeln!(out, "  ! ... {} more failures", surface.failures.len() - 10);
    }
    let _ = writeln!(out, "{rule}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use section_core::calculations::capacity_surface::{self, AngleRange, InterceptRange, SweepConfig};
    use section_core::calculations::{sample, NeutralAxis};
    use section_core::materials::MaterialParameters;
    use section_core::section::{Rebar, Section};

    fn input() -> AnalysisInput {
        let bars = vec![Rebar::new(-5.0, -5.0, 0.6), Rebar::new(5.0, -5.0, 0.6)];
        let section = Section::rectangular(14.0, 14.0, bars).unwrap();
        AnalysisInput::new("T-1", section, MaterialParameters::aci(4.0, 60.0))
    }

    fn surface() -> CapacitySurface {
        let config = SweepConfig {
            angles: AngleRange { start_deg: 0.0, end_deg: 360.0, step_deg: 90.0 },
            intercepts: InterceptRange::Explicit { start: -6.0, end: 6.0, step: 3.0 },
            parallel: false,
        };
        capacity_surface::calculate(&input(), &config).unwrap()
    }

    #[test]
    fn test_tsv_has_one_row_per_point() {
        let surface = surface();
        let tsv = surface_to_tsv(&surface);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines[0], TSV_HEADER);
        assert_eq!(lines.len(), surface.len() + 1);

        let first: Vec<f64> = lines[1].split('\t').map(|v| v.parse().unwrap()).collect();
        assert_eq!(first.len(), 5);
        let p = surface.points[0];
        assert_eq!(first[0], p.angle_deg);
        assert_eq!(first[1], p.intercept);
        assert_abs_diff_eq!(first[2], p.p);
        assert_abs_diff_eq!(first[4], p.my);
    }

    #[test]
    fn test_reports_mention_label_and_state() {
        let input = input();
        let result = sample::calculate(&input, NeutralAxis::new(0.0, 0.0)).unwrap();
        let report = sample_report(&input, &result);
        assert!(report.contains("T-1"));
        assert!(report.contains("Mixed tension/compression"));
        assert!(report.contains("P = "));

        let summary = surface_report(&surface());
        assert!(summary.contains("Points:  20"));
        assert!(summary.contains("Max compression"));
    }
}
