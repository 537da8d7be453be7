//! # Cross-Section Definition
//!
//! A concrete outline (implicitly closed polygon) plus discrete reinforcing
//! bars. Sections are validated on construction and always stored with
//! counter-clockwise winding; bar order is preserved so strain, stress and
//! force vectors can be correlated by index.
//!
//! ## Example
//!
//! ```rust
//! use section_core::section::{Rebar, Section};
//!
//! let section = Section::from_coords(
//!     &[(-8.0, 8.0), (8.0, 8.0), (8.0, -8.0), (-8.0, -8.0)],
//!     vec![Rebar::new(-5.6, 5.6, 0.79), Rebar::new(5.6, -5.6, 0.79)],
//! ).unwrap();
//!
//! assert_eq!(section.area(), 256.0);
//! // Stored counter-clockwise regardless of input order
//! assert!(section_core::geometry::signed_area(section.vertices()) > 0.0);
//! ```

use std::f64::consts::PI;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{self, Point2};
use crate::materials::MaterialParameters;

/// A reinforcing bar: position and cross-sectional area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rebar {
    pub x: f64,
    pub y: f64,
    /// Bar area A_s
    pub area: f64,
}

impl Rebar {
    pub fn new(x: f64, y: f64, area: f64) -> Self {
        Rebar { x, y, area }
    }

    /// Bar of nominal diameter `diameter` (A = π·d²/4)
    pub fn from_diameter(x: f64, y: f64, diameter: f64) -> Self {
        Rebar::new(x, y, PI * diameter * diameter / 4.0)
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// Serialized form of a [`Section`], validated on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SectionData {
    vertices: Vec<Point2>,
    #[serde(default)]
    rebars: Vec<Rebar>,
}

/// Validated reinforced concrete cross-section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "vertices": [{ "x": -8.0, "y": 8.0 }, { "x": 8.0, "y": 8.0 },
///                { "x": 8.0, "y": -8.0 }, { "x": -8.0, "y": -8.0 }],
///   "rebars": [{ "x": -5.6, "y": 5.6, "area": 0.79 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectionData", into = "SectionData")]
pub struct Section {
    vertices: Vec<Point2>,
    rebars: Vec<Rebar>,
    area: f64,
    centroid: Point2,
}

impl Section {
    /// Build a section, normalising the outline to counter-clockwise winding.
    ///
    /// # Errors
    ///
    /// - `DegenerateGeometry` for fewer than 3 distinct vertices or zero area
    /// - `InvalidInput` for non-finite coordinates or non-positive bar areas
    pub fn new(mut vertices: Vec<Point2>, rebars: Vec<Rebar>) -> CalcResult<Self> {
        if let Some((i, p)) = vertices.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(CalcError::invalid_input(
                format!("vertices[{}]", i),
                format!("({}, {})", p.x, p.y),
                "Vertex coordinates must be finite",
            ));
        }
        for (i, bar) in rebars.iter().enumerate() {
            if !bar.position().is_finite() {
                return Err(CalcError::invalid_input(
                    format!("rebars[{}]", i),
                    format!("({}, {})", bar.x, bar.y),
                    "Bar coordinates must be finite",
                ));
            }
            if !bar.area.is_finite() || bar.area <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("rebars[{}].area", i),
                    bar.area.to_string(),
                    "Bar area must be positive",
                ));
            }
        }

        geometry::polygon_area(&vertices)?;
        if geometry::signed_area(&vertices) < 0.0 {
            vertices.reverse();
        }
        let centroid = geometry::polygon_centroid(&vertices)?;
        let area = geometry::signed_area(&vertices);

        if !geometry::is_simple_polygon(&vertices) {
            warn!("section outline is self-intersecting; stress blocks will be unreliable");
        }
        for (i, bar) in rebars.iter().enumerate() {
            if !geometry::contains_point(&vertices, bar.position()) {
                warn!("rebar {} at ({}, {}) lies outside the section outline", i, bar.x, bar.y);
            }
        }

        Ok(Section {
            vertices,
            rebars,
            area,
            centroid,
        })
    }

    /// Convenience constructor from `(x, y)` tuples
    pub fn from_coords(coords: &[(f64, f64)], rebars: Vec<Rebar>) -> CalcResult<Self> {
        Section::new(coords.iter().copied().map(Point2::from).collect(), rebars)
    }

    /// Rectangle `width` × `height` centred on the origin
    pub fn rectangular(width: f64, height: f64, rebars: Vec<Rebar>) -> CalcResult<Self> {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Section::from_coords(&[(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)], rebars)
    }

    /// Outline vertices, counter-clockwise
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn rebars(&self) -> &[Rebar] {
        &self.rebars
    }

    /// Gross concrete area
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Geometric centroid of the gross outline
    pub fn centroid(&self) -> Point2 {
        self.centroid
    }

    /// Total reinforcement area ΣA_s
    pub fn steel_area(&self) -> f64 {
        self.rebars.iter().map(|b| b.area).sum()
    }

    /// Largest absolute coordinate of the outline
    pub fn extent(&self) -> f64 {
        self.vertices
            .iter()
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(0.0, f64::max)
    }

    /// Tolerance band used for on-axis classification of this section
    pub fn tolerance(&self) -> f64 {
        geometry::tolerance_for(self.extent())
    }

    /// Axis-aligned bounds of the outline as (min, max)
    pub fn bounds(&self) -> (Point2, Point2) {
        // Non-empty by construction
        geometry::bounding_box(&self.vertices).unwrap_or_default()
    }

    /// A new vertex list with the first vertex repeated at the end, for drawing.
    pub fn closed_outline(&self) -> Vec<Point2> {
        let mut outline = self.vertices.clone();
        if let Some(first) = self.vertices.first() {
            outline.push(*first);
        }
        outline
    }

    /// Plastic centroid: the point about which a uniform squash load has no moment.
    ///
    /// # Formula
    /// x_pl = (0.85·f_cd·A_c·x̄_c + Σ (f_yd − 0.85·f_cd)·A_i·x_i) / (0.85·f_cd·(A_c − ΣA_s) + Σ f_yd·A_i)
    ///
    /// and likewise for y, with x̄_c the gross-section centroid. Concrete
    /// displaced by a bar is removed at the bar, matching the bar force
    /// correction inside the stress block.
    pub fn plastic_centroid(&self, material: &MaterialParameters) -> Point2 {
        let block_stress = material.concrete_block_stress();
        let bar_stress = material.fyd() - block_stress;

        let mut force = block_stress * self.area;
        let mut moment = self.centroid * force;
        for bar in &self.rebars {
            let f = bar_stress * bar.area;
            force += f;
            moment = moment + bar.position() * f;
        }
        moment * (1.0 / force)
    }
}

impl TryFrom<SectionData> for Section {
    type Error = CalcError;

    fn try_from(data: SectionData) -> CalcResult<Self> {
        Section::new(data.vertices, data.rebars)
    }
}

impl From<Section> for SectionData {
    fn from(section: Section) -> Self {
        SectionData {
            vertices: section.vertices,
            rebars: section.rebars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn symmetric_bars() -> Vec<Rebar> {
        [
            (-5.6, 5.6),
            (0.0, 5.6),
            (5.6, 5.6),
            (5.6, 0.0),
            (5.6, -5.6),
            (0.0, -5.6),
            (-5.6, -5.6),
            (-5.6, 0.0),
        ]
        .iter()
        .map(|&(x, y)| Rebar::new(x, y, 0.79))
        .collect()
    }

    #[test]
    fn test_clockwise_input_is_normalised() {
        let section = Section::from_coords(
            &[(-8.0, 8.0), (8.0, 8.0), (8.0, -8.0), (-8.0, -8.0)],
            vec![],
        )
        .unwrap();
        assert!(geometry::signed_area(section.vertices()) > 0.0);
        assert_eq!(section.area(), 256.0);
    }

    #[test]
    fn test_rejects_two_vertices() {
        let err = Section::from_coords(&[(0.0, 0.0), (1.0, 0.0)], vec![]).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_GEOMETRY");
    }

    #[test]
    fn test_rejects_bad_bar_area() {
        let err = Section::rectangular(16.0, 16.0, vec![Rebar::new(0.0, 0.0, 0.0)]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rebar_from_diameter() {
        let bar = Rebar::from_diameter(0.0, 0.0, 1.0);
        assert_abs_diff_eq!(bar.area, 0.7854, epsilon = 1e-4);
    }

    #[test]
    fn test_closed_outline_does_not_mutate() {
        let section = Section::rectangular(10.0, 20.0, vec![]).unwrap();
        let outline = section.closed_outline();
        assert_eq!(outline.len(), 5);
        assert_eq!(outline.first(), outline.last());
        assert_eq!(section.vertices().len(), 4);
    }

    #[test]
    fn test_plastic_centroid_symmetric() {
        let section = Section::rectangular(16.0, 16.0, symmetric_bars()).unwrap();
        let pc = section.plastic_centroid(&MaterialParameters::aci(4.0, 60.0));
        assert_abs_diff_eq!(pc.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pc.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_plastic_centroid_shifts_toward_steel() {
        let bars = vec![Rebar::new(0.0, -6.0, 2.0), Rebar::new(3.0, -6.0, 2.0)];
        let section = Section::rectangular(12.0, 16.0, bars).unwrap();
        let mat = MaterialParameters::aci(4.0, 60.0);
        let pc = section.plastic_centroid(&mat);

        let concrete = 3.4 * 192.0;
        let steel = (60.0 - 3.4) * 2.0;
        let expected_y = (2.0 * steel * -6.0) / (concrete + 2.0 * steel);
        let expected_x = (steel * 3.0) / (concrete + 2.0 * steel);
        assert_abs_diff_eq!(pc.y, expected_y, epsilon = 1e-12);
        assert_abs_diff_eq!(pc.x, expected_x, epsilon = 1e-12);
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let section = Section::rectangular(16.0, 16.0, symmetric_bars()).unwrap();
        let json = serde_json::to_string(&section).unwrap();
        let roundtrip: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(section, roundtrip);

        let bad = r#"{ "vertices": [{ "x": 0.0, "y": 0.0 }, { "x": 1.0, "y": 1.0 }] }"#;
        assert!(serde_json::from_str::<Section>(bad).is_err());
    }
}
