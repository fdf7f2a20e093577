//! # Scene Module
//!
//! Everything the renderer draws: objects, lights, helpers, the background and
//! the camera.
//!
//! ## Key Components
//!
//! - [`Scene`] - Container owning objects, materials, textures, lights and helpers
//! - [`Object`] - A mesh with a material reference, transform and shadow flags
//! - [`SceneLights`] - Ambient, directional and spot lights with their shadow cameras
//! - [`Helper`] - Unlit line visualisations (axes, grid, light helpers)
//! - [`Vertex3D`] / [`LineVertex`] - Vertex layouts for lit meshes and helper lines
//!
//! Objects and helpers are addressed by the [`ObjectId`] / [`HelperId`]
//! returned when they are added, so callers can mutate them every frame.

pub mod helpers;
pub mod light;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use helpers::{Helper, HelperKind, LightRef};
pub use light::{AmbientLight, DirectionalLight, LightShadow, SceneLights, ShadowCamera, SpotLight};
pub use object::{DrawObject, Mesh, Object, Transform};
pub use scene::{Background, HelperId, ObjectId, Scene, SceneStatistics};
pub use vertex::{LineVertex, Vertex3D};
