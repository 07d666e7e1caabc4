//! Installations: configured sets of placed forms, driven frame by frame
//! into world-space lines, clip planes and projected membranes.

mod config;

pub use config::{FormConfig, FormKind, InstallationConfig, Scenery};

use crate::error::{ConfigError, Result};
use crate::form::{Form, FrameContext};
use crate::geometry::{ClipPlane2, ClipPlane3, Line};
use crate::math::transform::place_point;
use crate::math::{Matrix4, Point3};
use crate::operations::DeriveClipPlane;
use crate::tessellation::{ComputeNormals, TessellateMembrane, TriangleMesh};

/// Session state shared by every form: which installation is shown and how fast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppState {
    pub installation_index: usize,
    /// Playback speed multiplier.
    pub speed: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            installation_index: 0,
            speed: 1.0,
        }
    }
}

/// One form line in world space, with its light membrane.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedLine {
    /// Index of the form within the active installation.
    pub form_index: usize,
    /// The form-local line.
    pub line: Line,
    /// The line's points on the form plane, in world space.
    pub screen_points: Vec<Point3>,
    /// Ruled surface from the projector to `screen_points`.
    pub membrane: TriangleMesh,
    /// World-space half-spaces the line and membrane are clipped to.
    pub clip_planes: Vec<ClipPlane3>,
}

struct PlacedForm {
    config: FormConfig,
    form: Box<dyn Form>,
    placement: Matrix4,
}

impl PlacedForm {
    fn new(config: &FormConfig) -> Self {
        Self {
            config: config.clone(),
            form: config.kind.instantiate(),
            placement: config.placement(),
        }
    }

    fn project(&self, form_index: usize, line: Line, shaded: bool) -> Result<ProjectedLine> {
        let projector = self.config.projector_point();

        let (width, height) = self.form.size();
        let boundary = (line.clip_to_form_boundary() || self.config.clip_to_form_boundary)
            .then(|| ClipPlane2::form_boundary(width, height));
        let clip_planes = line
            .clipping_planes()
            .iter()
            .chain(boundary.iter().flatten())
            .map(|plane| DeriveClipPlane::new(*plane, self.placement, projector).execute())
            .collect::<Result<Vec<_>>>()?;

        let screen_points: Vec<Point3> = line
            .points()
            .iter()
            .map(|p| place_point(&self.placement, p))
            .collect();

        let mut membrane =
            TessellateMembrane::projected(projector, screen_points.clone(), self.config.membrane_segments)
                .closed(line.closed())
                .execute();
        if shaded {
            ComputeNormals::new().execute(&mut membrane)?;
        }

        Ok(ProjectedLine {
            form_index,
            line,
            screen_points,
            membrane,
            clip_planes,
        })
    }
}

/// Drives the forms of the active installation and switches between installations.
///
/// A frame that fails anywhere (a degenerate clip plane, a malformed mesh)
/// is replaced by the last frame that succeeded.
pub struct Installation {
    configs: Vec<InstallationConfig>,
    state: AppState,
    forms: Vec<PlacedForm>,
    last_good: Vec<ProjectedLine>,
}

impl Installation {
    /// Creates an exhibition over `configs`, showing the first one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `configs` is empty or any
    /// installation fails validation.
    pub fn new(configs: Vec<InstallationConfig>) -> Result<Self> {
        if configs.is_empty() {
            return Err(ConfigError::Invalid("no installations configured".to_string()).into());
        }
        configs.iter().try_for_each(InstallationConfig::validate)?;

        let forms = configs[0].forms.iter().map(PlacedForm::new).collect();
        Ok(Self {
            configs,
            state: AppState::default(),
            forms,
            last_good: Vec::new(),
        })
    }

    /// An exhibition of the built-in installations.
    ///
    /// # Errors
    ///
    /// Only fails if a preset is invalid.
    pub fn with_presets() -> Result<Self> {
        Self::new(InstallationConfig::presets())
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The active installation.
    #[must_use]
    pub fn config(&self) -> &InstallationConfig {
        &self.configs[self.state.installation_index]
    }

    #[must_use]
    pub fn installation_count(&self) -> usize {
        self.configs.len()
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.state.speed = speed;
    }

    /// Shows installation `index`, restarting its forms from their first cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `index` is out of range.
    pub fn switch_to(&mut self, index: usize) -> Result<()> {
        let config = self.configs.get(index).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "installation {index} does not exist ({} configured)",
                self.configs.len()
            ))
        })?;
        tracing::debug!(
            from = self.state.installation_index,
            to = index,
            name = %config.name,
            "switching installation"
        );
        self.forms = config.forms.iter().map(PlacedForm::new).collect();
        self.state.installation_index = index;
        self.last_good.clear();
        Ok(())
    }

    /// Advances every form and projects its lines.
    ///
    /// `absolute_ms`, when given, scrubs to that time instead of adding
    /// `delta_ms`. Never fails: an error freezes the last good frame.
    pub fn frame(&mut self, delta_ms: f64, absolute_ms: Option<f64>) -> Vec<ProjectedLine> {
        let ctx = FrameContext {
            delta_ms,
            absolute_ms,
            speed: self.state.speed,
        };
        match self.try_frame(&ctx) {
            Ok(lines) => {
                self.last_good.clone_from(&lines);
                lines
            }
            Err(err) => {
                tracing::warn!(
                    installation = %self.config().name,
                    %err,
                    "frame failed; freezing last good frame"
                );
                self.last_good.clone()
            }
        }
    }

    fn try_frame(&mut self, ctx: &FrameContext) -> Result<Vec<ProjectedLine>> {
        let shaded = self.config().shaded;
        let mut projected = Vec::new();
        for (form_index, placed) in self.forms.iter_mut().enumerate() {
            let output = placed.form.lines(ctx);
            for line in output.lines {
                projected.push(placed.project(form_index, line, shaded)?);
            }
        }
        Ok(projected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LightformError;
    use crate::math::Point2;

    #[test]
    fn empty_exhibition_is_rejected() {
        assert!(matches!(
            Installation::new(Vec::new()),
            Err(LightformError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn frame_projects_every_line() {
        let mut installation = Installation::new(vec![InstallationConfig::doubling_back()]).unwrap();
        let lines = installation.frame(16.0, None);
        assert_eq!(lines.len(), 2);
        for projected in &lines {
            assert_eq!(projected.form_index, 0);
            assert_eq!(projected.screen_points.len(), projected.line.points().len());
            // One vertex row per segment boundary.
            assert_eq!(
                projected.membrane.vertices.len(),
                projected.screen_points.len() * 5
            );
        }
        // Only the rotated wave clips: its wipe plus the form rectangle.
        assert!(lines[0].clip_planes.is_empty());
        assert_eq!(lines[1].clip_planes.len(), 5);
    }

    #[test]
    fn wipe_plane_is_lifted_through_the_projector() {
        let config = InstallationConfig::doubling_back();
        let projector = config.forms[0].projector_point();
        let placement = config.forms[0].placement();
        let mut installation = Installation::new(vec![config]).unwrap();

        // 2.5 s in, the reveal edge crosses the form centre.
        let lines = installation.frame(0.0, Some(2500.0));
        let wiped = &lines[1];
        assert_eq!(wiped.line.clipping_planes().len(), 1);
        assert_eq!(wiped.clip_planes.len(), 5);
        for plane in &wiped.clip_planes {
            assert!(plane.distance(&projector).abs() < 1e-9);
        }

        let wipe = &wiped.clip_planes[0];
        assert!(wipe.keeps(&place_point(&placement, &Point2::new(-0.5, 0.0))));
        assert!(!wipe.keeps(&place_point(&placement, &Point2::new(0.5, 0.0))));
    }

    #[test]
    fn form_boundary_planes_keep_the_form_centre() {
        let mut installation = Installation::new(vec![InstallationConfig::between_you_and_i()]).unwrap();
        let lines = installation.frame(16.0, None);
        let centres = installation
            .config()
            .forms
            .iter()
            .map(|f| place_point(&f.placement(), &Point2::origin()))
            .collect::<Vec<_>>();
        for projected in &lines {
            assert_eq!(projected.clip_planes.len(), 4);
            for plane in &projected.clip_planes {
                assert!(plane.keeps(&centres[projected.form_index]));
            }
        }
    }

    #[test]
    fn shaded_installations_get_normals() {
        let mut installation = Installation::new(vec![InstallationConfig::breath()]).unwrap();
        let lines = installation.frame(2000.0, None);
        let membrane = &lines[0].membrane;
        assert!(!membrane.is_empty());
        let screen_row = &membrane.normals[membrane.normals.len() - lines[0].screen_points.len()..];
        assert!(screen_row.iter().all(|n| (n.norm() - 1.0).abs() < 1e-9));
    }

    #[test]
    fn switch_to_rebuilds_forms() {
        let mut installation = Installation::with_presets().unwrap();
        assert_eq!(installation.installation_count(), 4);
        installation.frame(16.0, None);

        installation.switch_to(3).unwrap();
        assert_eq!(installation.state().installation_index, 3);
        assert_eq!(installation.config().name, "Breath");
        let lines = installation.frame(16.0, None);
        assert_eq!(lines.len(), 1);

        assert!(installation.switch_to(9).is_err());
        assert_eq!(installation.state().installation_index, 3);
    }

    #[test]
    fn degenerate_clip_plane_freezes_last_good_frame() {
        let mut installation = Installation::new(vec![InstallationConfig::doubling_back()]).unwrap();
        let good = installation.frame(16.0, None);
        assert!(!good.is_empty());

        // A projector on the form's right edge cannot span a plane with it.
        installation.forms[0].config.projector = [2.0, 1.5, 0.0];
        assert_eq!(installation.frame(16.0, None), good);
    }

    #[test]
    fn failure_before_any_good_frame_is_empty() {
        let mut config = InstallationConfig::doubling_back();
        config.forms[0].projector = [2.0, 1.5, 0.0];
        let mut installation = Installation::new(vec![config]).unwrap();
        assert!(installation.frame(16.0, None).is_empty());
    }
}
