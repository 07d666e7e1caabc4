use crate::error::{GeometryError, Result};
use crate::math::Point2;

use super::ClipPlane2;

/// Default stroke thickness of a [`Line`].
pub const DEFAULT_LINE_THICKNESS: f64 = 0.01;

/// A render-ready polyline produced by a form for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    points: Vec<Point2>,
    closed: bool,
    opacity: f64,
    line_thickness: f64,
    clipping_planes: Vec<ClipPlane2>,
    clip_to_form_boundary: bool,
}

impl Line {
    /// Starts building a line over `points`.
    #[must_use]
    pub fn builder(points: Vec<Point2>) -> LineBuilder {
        LineBuilder {
            line: Self {
                points,
                closed: false,
                opacity: 1.0,
                line_thickness: DEFAULT_LINE_THICKNESS,
                clipping_planes: Vec::new(),
                clip_to_form_boundary: false,
            },
        }
    }

    /// A one-point line, the fallback when a frame cannot be computed.
    #[must_use]
    pub fn degenerate(point: Point2) -> Self {
        Self::builder(vec![point]).line
    }

    /// The ordered points.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Whether the last point connects back to the first.
    #[must_use]
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Stroke thickness.
    #[must_use]
    pub fn line_thickness(&self) -> f64 {
        self.line_thickness
    }

    /// Extra form-local half-planes the line is clipped by.
    #[must_use]
    pub fn clipping_planes(&self) -> &[ClipPlane2] {
        &self.clipping_planes
    }

    /// Whether the line is also clipped to its form's boundary rectangle.
    #[must_use]
    pub fn clip_to_form_boundary(&self) -> bool {
        self.clip_to_form_boundary
    }

    /// Whether the line has fewer than two points.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }
}

/// Builder for [`Line`]; optional fields default to an opaque, open, unclipped line.
#[derive(Debug, Clone)]
#[must_use]
pub struct LineBuilder {
    line: Line,
}

impl LineBuilder {
    pub fn closed(mut self, closed: bool) -> Self {
        self.line.closed = closed;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.line.opacity = opacity;
        self
    }

    pub fn line_thickness(mut self, thickness: f64) -> Self {
        self.line.line_thickness = thickness;
        self
    }

    pub fn clipping_plane(mut self, plane: ClipPlane2) -> Self {
        self.line.clipping_planes.push(plane);
        self
    }

    pub fn clip_to_form_boundary(mut self, clip: bool) -> Self {
        self.line.clip_to_form_boundary = clip;
        self
    }

    /// Validates and returns the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the opacity is outside `[0, 1]` or the thickness
    /// is not a positive finite number.
    pub fn build(self) -> Result<Line> {
        let line = self.line;
        if !(0.0..=1.0).contains(&line.opacity) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "opacity",
                value: line.opacity,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        if !(line.line_thickness > 0.0 && line.line_thickness.is_finite()) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "line_thickness",
                value: line.line_thickness,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(line)
    }
}
