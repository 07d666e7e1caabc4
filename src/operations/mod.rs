pub mod combine;
mod derive_clip_plane;

pub use combine::combine;
pub use derive_clip_plane::DeriveClipPlane;
