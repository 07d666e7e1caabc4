use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Rotation3;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::form::{BetweenYouAndI, Breath, Coupling, DoublingBack, Form};
use crate::math::transform::placement;
use crate::math::{Matrix4, Point3, Vector3};

/// The four form choreographies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    DoublingBack,
    Coupling,
    BetweenYouAndI,
    Breath,
}

impl FormKind {
    /// A fresh form of this kind, at the start of its first cycle.
    #[must_use]
    pub fn instantiate(self) -> Box<dyn Form> {
        match self {
            Self::DoublingBack => Box::new(DoublingBack::new()),
            Self::Coupling => Box::new(Coupling::new()),
            Self::BetweenYouAndI => Box::new(BetweenYouAndI::new()),
            Self::Breath => Box::new(Breath::new()),
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

fn default_membrane_segments() -> usize {
    1
}

/// The surface a form is projected onto.
///
/// Both kinds place the form-local `z = 0` plane at `position`, turned by
/// `rotation_y` about the vertical axis. A wall faces `+z`; a floor faces up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scenery {
    Wall {
        position: [f64; 3],
        #[serde(default)]
        rotation_y: f64,
    },
    Floor {
        position: [f64; 3],
        #[serde(default)]
        rotation_y: f64,
    },
}

impl Scenery {
    #[must_use]
    pub fn wall(position: [f64; 3]) -> Self {
        Self::Wall {
            position,
            rotation_y: 0.0,
        }
    }

    #[must_use]
    pub fn floor(position: [f64; 3]) -> Self {
        Self::Floor {
            position,
            rotation_y: 0.0,
        }
    }

    /// The same surface turned to `angle` about the vertical axis.
    #[must_use]
    pub fn rotated(self, angle: f64) -> Self {
        match self {
            Self::Wall { position, .. } => Self::Wall {
                position,
                rotation_y: angle,
            },
            Self::Floor { position, .. } => Self::Floor {
                position,
                rotation_y: angle,
            },
        }
    }

    fn position(&self) -> [f64; 3] {
        match self {
            Self::Wall { position, .. } | Self::Floor { position, .. } => *position,
        }
    }

    fn rotation_y(&self) -> f64 {
        match self {
            Self::Wall { rotation_y, .. } | Self::Floor { rotation_y, .. } => *rotation_y,
        }
    }

    /// Form-local to world matrix for a form drawn at `scale`.
    #[must_use]
    pub fn placement(&self, scale: f64) -> Matrix4 {
        let upright = placement(&Vector3::from(self.position()), self.rotation_y(), scale);
        match self {
            Self::Wall { .. } => upright,
            Self::Floor { .. } => upright * Rotation3::from_euler_angles(-FRAC_PI_2, 0.0, 0.0).to_homogeneous(),
        }
    }
}

/// One form placed in the room, with the projector that draws it.
///
/// The world placement is `translate(position) * rotate_y(rotation_y) * scale(scale)`,
/// with a floor additionally laid flat before the turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    pub kind: FormKind,
    pub scenery: Scenery,
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// World-space projector position.
    pub projector: [f64; 3],
    /// Clip every line to the form rectangle, not only the lines that ask for it.
    #[serde(default)]
    pub clip_to_form_boundary: bool,
    /// Rows of quads between projector and screen.
    #[serde(default = "default_membrane_segments")]
    pub membrane_segments: usize,
}

impl FormConfig {
    /// A form on `scenery`, drawn from `projector`.
    #[must_use]
    pub fn new(kind: FormKind, scenery: Scenery, projector: [f64; 3]) -> Self {
        Self {
            kind,
            scenery,
            scale: default_scale(),
            projector,
            clip_to_form_boundary: false,
            membrane_segments: default_membrane_segments(),
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_membrane_segments(mut self, segments: usize) -> Self {
        self.membrane_segments = segments;
        self
    }

    #[must_use]
    pub fn clip_to_form_boundary(mut self, clip: bool) -> Self {
        self.clip_to_form_boundary = clip;
        self
    }

    /// Form-local to world matrix.
    #[must_use]
    pub fn placement(&self) -> Matrix4 {
        self.scenery.placement(self.scale)
    }

    #[must_use]
    pub fn projector_point(&self) -> Point3 {
        Point3::from(self.projector)
    }

    /// Checks that the placement is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for non-finite coordinates, a
    /// non-positive scale, or zero membrane segments.
    pub fn validate(&self) -> Result<()> {
        let finite = self.scenery.position().iter().chain(&self.projector).all(|v| v.is_finite());
        if !finite || !self.scenery.rotation_y().is_finite() {
            return Err(ConfigError::Invalid(format!("{:?} has a non-finite coordinate", self.kind)).into());
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::Invalid(format!("{:?} scale must be > 0, got {}", self.kind, self.scale)).into());
        }
        if self.membrane_segments == 0 {
            return Err(ConfigError::Invalid(format!("{:?} membrane_segments must be >= 1", self.kind)).into());
        }
        Ok(())
    }
}

/// A named arrangement of forms, the unit the exhibition switches between.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstallationConfig {
    pub name: String,
    pub forms: Vec<FormConfig>,
    /// Compute membrane normals for lit rendering.
    #[serde(default)]
    pub shaded: bool,
}

impl InstallationConfig {
    /// Parses and validates a JSON installation description.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::Parse(format!("installation JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the installation to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("installation JSON: {e}")).into())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unnamed or empty installation
    /// or an invalid form.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("installation name must be non-empty".to_string()).into());
        }
        if self.forms.is_empty() {
            return Err(ConfigError::Invalid(format!("installation '{}' has no forms", self.name)).into());
        }
        self.forms.iter().try_for_each(FormConfig::validate)
    }

    /// Two facing waves on the far wall.
    #[must_use]
    pub fn doubling_back() -> Self {
        Self {
            name: "Doubling Back".to_string(),
            forms: vec![
                FormConfig::new(FormKind::DoublingBack, Scenery::wall([0.0, 1.5, 0.0]), [0.0, 1.5, 6.0])
                    .with_membrane_segments(4),
            ],
            shaded: false,
        }
    }

    /// Rippling circles on the floor, projected from the ceiling.
    #[must_use]
    pub fn coupling() -> Self {
        Self {
            name: "Coupling".to_string(),
            forms: vec![
                FormConfig::new(FormKind::Coupling, Scenery::floor([0.0, 0.0, 0.0]), [0.0, 5.0, 0.0])
                    .with_membrane_segments(4),
            ],
            shaded: false,
        }
    }

    /// Two wiped ellipses on opposite walls, projected from the room centre.
    #[must_use]
    pub fn between_you_and_i() -> Self {
        Self {
            name: "Between You and I".to_string(),
            forms: vec![
                FormConfig::new(FormKind::BetweenYouAndI, Scenery::wall([0.0, 1.5, -4.0]), [0.0, 1.5, 0.0])
                    .clip_to_form_boundary(true),
                FormConfig::new(
                    FormKind::BetweenYouAndI,
                    Scenery::wall([0.0, 1.5, 4.0]).rotated(PI),
                    [0.0, 1.5, 0.0],
                )
                .clip_to_form_boundary(true),
            ],
            shaded: false,
        }
    }

    #[must_use]
    pub fn breath() -> Self {
        Self {
            name: "Breath".to_string(),
            forms: vec![FormConfig::new(FormKind::Breath, Scenery::wall([0.0, 1.5, 0.0]), [0.0, 1.5, 5.0])
                .with_scale(1.2)
                .with_membrane_segments(8)],
            shaded: true,
        }
    }

    /// Every built-in installation, in exhibition order.
    #[must_use]
    pub fn presets() -> Vec<Self> {
        vec![Self::doubling_back(), Self::coupling(), Self::between_you_and_i(), Self::breath()]
    }
}
