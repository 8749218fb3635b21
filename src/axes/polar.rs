//! Polar axes overlay actor.
//!
//! Draws a polar coordinate grid in the plane z = pole.z: the polar axis at
//! angle 0 along +X, radial axes fanned over the swept angle, one circular
//! arc per tick radius, tick marks, per-tick radial labels, and a title.

use glam::DVec3;

use crate::axes::ticks::{LabelFormat, auto_tick_values, explicit_tick_values};
use crate::core::Bounds;
use crate::error::{SceneError, SceneResult};
use crate::render::Color;
use crate::scene::LineProperty;

/// Style for overlay text generated by the axes actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}

/// Label text anchored at a world-space position.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub anchor: DVec3,
}

/// World-space geometry produced by one `PolarAxesActor`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarAxesGeometry {
    pub polar_axis: [DVec3; 2],
    pub radial_axes: Vec<[DVec3; 2]>,
    /// One sampled polyline per nonzero tick radius.
    pub arcs: Vec<Vec<DVec3>>,
    pub tick_marks: Vec<[DVec3; 2]>,
    pub labels: Vec<AxisLabel>,
    pub title: AxisLabel,
}

/// Renderable polar-coordinate axes overlay.
///
/// Angles are degrees; the swept sector starts at the polar axis (+X from
/// the pole) and opens counterclockwise in the z = pole.z plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarAxesActor {
    pub bounds: Bounds,
    pub pole: DVec3,
    /// When set, the maximum radius is derived from `bounds` instead of
    /// `maximum_radius`.
    pub auto_scale_radius: bool,
    pub maximum_radius: f64,
    pub maximum_angle: f64,
    pub number_of_radial_axes: usize,
    pub number_of_polar_axis_ticks: usize,
    /// When set, tick radii snap to nice decade steps and
    /// `number_of_polar_axis_ticks` is treated as a density target.
    pub auto_subdivide_polar_axis: bool,
    pub radial_label_format: LabelFormat,
    pub title: String,
    /// Label glyph height in pixels.
    pub screen_size: f64,
    pub polar_axis_property: LineProperty,
    pub radial_axes_property: LineProperty,
    pub polar_arcs_property: LineProperty,
    pub title_text: TextStyle,
    pub label_text: TextStyle,
    pub visible: bool,
}

impl Default for PolarAxesActor {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(DVec3::splat(-1.0), DVec3::splat(1.0)),
            pole: DVec3::ZERO,
            auto_scale_radius: true,
            maximum_radius: 1.0,
            maximum_angle: 90.0,
            number_of_radial_axes: 8,
            number_of_polar_axis_ticks: 6,
            auto_subdivide_polar_axis: true,
            radial_label_format: LabelFormat::default(),
            title: "Radial Distance".to_owned(),
            screen_size: 10.0,
            polar_axis_property: LineProperty::default(),
            radial_axes_property: LineProperty::default(),
            polar_arcs_property: LineProperty::default(),
            title_text: TextStyle::default(),
            label_text: TextStyle::default(),
            visible: true,
        }
    }
}

impl PolarAxesActor {
    pub fn validate(&self) -> SceneResult<()> {
        if !self.maximum_angle.is_finite()
            || self.maximum_angle <= 0.0
            || self.maximum_angle > 360.0
        {
            return Err(SceneError::InvalidData(format!(
                "maximum angle must be in (0, 360], got {}",
                self.maximum_angle
            )));
        }
        if !self.pole.is_finite() {
            return Err(SceneError::InvalidData(
                "pole coordinates must be finite".to_owned(),
            ));
        }
        if self.auto_scale_radius {
            if !self.bounds.is_valid() {
                return Err(SceneError::InvalidData(
                    "auto-scaled radius needs valid bounds".to_owned(),
                ));
            }
        } else if !self.maximum_radius.is_finite() || self.maximum_radius <= 0.0 {
            return Err(SceneError::InvalidData(format!(
                "maximum radius must be finite and > 0, got {}",
                self.maximum_radius
            )));
        }
        if !self.auto_subdivide_polar_axis && self.number_of_polar_axis_ticks < 2 {
            return Err(SceneError::InvalidData(format!(
                "explicit tick layout needs at least 2 ticks, got {}",
                self.number_of_polar_axis_ticks
            )));
        }
        if !self.screen_size.is_finite() || self.screen_size <= 0.0 {
            return Err(SceneError::InvalidData(format!(
                "screen size must be finite and > 0, got {}",
                self.screen_size
            )));
        }
        self.polar_axis_property.validate()?;
        self.radial_axes_property.validate()?;
        self.polar_arcs_property.validate()?;
        self.title_text.color.validate()?;
        self.label_text.color.validate()
    }

    /// Radius actually drawn: half the bounds diagonal when auto-scaling,
    /// the configured maximum otherwise.
    #[must_use]
    pub fn effective_maximum_radius(&self) -> f64 {
        if self.auto_scale_radius {
            self.bounds.diagonal() * 0.5
        } else {
            self.maximum_radius
        }
    }

    pub fn tick_values(&self) -> SceneResult<Vec<f64>> {
        let radius = self.effective_maximum_radius();
        if self.auto_subdivide_polar_axis {
            auto_tick_values(radius, self.number_of_polar_axis_ticks)
        } else {
            explicit_tick_values(radius, self.number_of_polar_axis_ticks)
        }
    }

    pub fn build_geometry(&self) -> SceneResult<PolarAxesGeometry> {
        self.validate()?;

        let radius = self.effective_maximum_radius();
        let ticks = self.tick_values()?;
        let axis_end = self.pole + DVec3::X * radius;

        let radial_axes = if self.number_of_radial_axes >= 2 {
            let count = self.number_of_radial_axes;
            let delta = self.maximum_angle / (count - 1) as f64;
            (0..count)
                .map(|index| {
                    let direction = sector_direction(delta * index as f64);
                    [self.pole, self.pole + direction * radius]
                })
                .collect()
        } else {
            Vec::new()
        };

        let arcs = ticks
            .iter()
            .copied()
            .filter(|tick| *tick > radius * 1e-9)
            .map(|tick| self.arc_polyline(tick))
            .collect();

        let tick_half_length = radius * 0.015;
        let tick_marks = ticks
            .iter()
            .copied()
            .map(|tick| {
                let center = self.pole + DVec3::X * tick;
                [
                    center + DVec3::Y * tick_half_length,
                    center - DVec3::Y * tick_half_length,
                ]
            })
            .collect();

        let labels = ticks
            .iter()
            .copied()
            .map(|tick| AxisLabel {
                text: self.radial_label_format.format(tick),
                anchor: self.pole + DVec3::X * tick,
            })
            .collect();

        let title = AxisLabel {
            text: self.title.clone(),
            anchor: self.pole + DVec3::X * (radius * 1.08),
        };

        tracing::debug!(
            radius,
            ticks = ticks.len(),
            radial_axes = self.number_of_radial_axes,
            maximum_angle = self.maximum_angle,
            "built polar axes geometry"
        );

        Ok(PolarAxesGeometry {
            polar_axis: [self.pole, axis_end],
            radial_axes,
            arcs,
            tick_marks,
            labels,
            title,
        })
    }

    /// Arc at `radius`, sampled at roughly one segment per degree of sweep.
    fn arc_polyline(&self, radius: f64) -> Vec<DVec3> {
        let segments = (self.maximum_angle.ceil() as usize).max(8);
        (0..=segments)
            .map(|index| {
                let angle = self.maximum_angle * index as f64 / segments as f64;
                self.pole + sector_direction(angle) * radius
            })
            .collect()
    }
}

fn sector_direction(angle_degrees: f64) -> DVec3 {
    let radians = angle_degrees.to_radians();
    DVec3::new(radians.cos(), radians.sin(), 0.0)
}
