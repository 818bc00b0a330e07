//! Glint Core - Scene types for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Light`, `Material`
//! - **Reference scene**: the five-sphere / three-light demo scene
//! - **Scene description**: JSON scene file loading
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let description = load_scene("scene.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     description.scene.sphere_count(),
//!     description.scene.light_count());
//! ```

pub mod description;
pub mod reference;
pub mod scene;

// Re-export commonly used types
pub use description::{
    load_scene, load_scene_from_str, LoadError, LoadResult, NumericPolicy, RenderOverrides,
    SceneDescription, MAX_BOUNCE_LIMIT,
};
pub use reference::reference_scene;
pub use scene::{Color, Light, Material, Scene, SceneError, SceneResult, Sphere};
