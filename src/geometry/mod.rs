pub mod clip_plane;
pub mod curve;
pub mod line;

pub use clip_plane::{ClipPlane2, ClipPlane3};
pub use curve::{
    CircleWave, Ellipse, EyeBranch, EyeWave, ParametricCurve, RotatedTravelingWave,
    TravelingWave, Winding,
};
pub use line::{Line, LineBuilder};
