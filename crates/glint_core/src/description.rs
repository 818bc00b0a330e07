//! JSON scene description loading.
//!
//! A scene file names its materials once and lets spheres refer to them
//! by name. An optional `render` section overrides renderer settings.
//!
//! ```json
//! {
//!   "materials": {
//!     "red": { "refractive_index": 1.0, "brightness": [0.9, 0.1, 0.0, 0.0],
//!              "diffuse": [0.5, 0.0, 0.0], "specular_exponent": 10.0 }
//!   },
//!   "spheres": [ { "center": [1.5, -0.5, -18.0], "radius": 4.0, "material": "red" } ],
//!   "lights": [ { "position": [-20.0, 20.0, 20.0], "intensity": 1.5 } ],
//!   "render": { "width": 640, "height": 480, "numeric_policy": "clamped" }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use glint_math::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::{Color, Light, Material, Scene, SceneError, Sphere};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene element: {0}")]
    Scene(#[from] SceneError),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("max_bounce {requested} exceeds the limit of {limit}")]
    BounceLimit { requested: u32, limit: u32 },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Deepest `max_bounce` a scene file may request.
///
/// Every shaded bounce spawns two rays, so a primary ray costs up to
/// `2^(max_bounce + 2) - 1` calls and recurses `max_bounce + 1` levels deep.
pub const MAX_BOUNCE_LIMIT: u32 = 8;

/// How the integrator treats numerically invalid intermediate values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Unclamped lighting terms and unguarded refraction. NaN from total
    /// internal reflection or negative specular bases flows through.
    #[default]
    Faithful,
    /// Lighting terms clamped at zero, total internal reflection falls
    /// back to the mirror direction.
    Clamped,
}

/// Renderer settings a scene file may override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub max_bounce: Option<u32>,
    pub background: Option<[f32; 3]>,
    pub numeric_policy: Option<NumericPolicy>,
}

/// A loaded scene plus any renderer overrides it carried.
#[derive(Debug, Clone)]
pub struct SceneDescription {
    pub scene: Scene,
    pub render: RenderOverrides,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    materials: HashMap<String, MaterialDef>,
    #[serde(default)]
    spheres: Vec<SphereDef>,
    #[serde(default)]
    lights: Vec<LightDef>,
    #[serde(default)]
    render: RenderOverrides,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MaterialDef {
    #[serde(default = "default_refractive_index")]
    refractive_index: f32,
    brightness: [f32; 4],
    diffuse: [f32; 3],
    #[serde(default)]
    specular_exponent: f32,
}

fn default_refractive_index() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SphereDef {
    center: [f32; 3],
    radius: f32,
    material: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LightDef {
    position: [f32; 3],
    intensity: f32,
}

impl MaterialDef {
    fn to_material(&self) -> Material {
        Material::new(
            self.refractive_index,
            Vec4::from_array(self.brightness),
            Color::from_array(self.diffuse),
            self.specular_exponent,
        )
    }
}

/// Load a scene description from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    log::debug!("Reading scene description {}", path.display());
    let text = std::fs::read_to_string(path)?;
    load_scene_from_str(&text)
}

/// Load a scene description from JSON text.
pub fn load_scene_from_str(text: &str) -> LoadResult<SceneDescription> {
    let file: SceneFile = serde_json::from_str(text)?;

    if let Some(requested) = file.render.max_bounce {
        if requested > MAX_BOUNCE_LIMIT {
            return Err(LoadError::BounceLimit {
                requested,
                limit: MAX_BOUNCE_LIMIT,
            });
        }
    }

    let mut materials = HashMap::with_capacity(file.materials.len());
    for (name, def) in &file.materials {
        let material = def.to_material();
        material.validate()?;
        materials.insert(name.as_str(), material);
    }

    let mut scene = Scene::new();
    for def in &file.spheres {
        let material = materials
            .get(def.material.as_str())
            .copied()
            .ok_or_else(|| LoadError::UnknownMaterial(def.material.clone()))?;
        scene.add_sphere(Sphere::new(Vec3::from_array(def.center), def.radius, material)?);
    }
    for def in &file.lights {
        scene.add_light(Light::new(Vec3::from_array(def.position), def.intensity)?);
    }

    if scene.light_count() == 0 {
        log::warn!("Scene has no lights; only reflect/refract channels will contribute");
    }
    log::debug!(
        "Loaded {} materials, {} spheres, {} lights",
        materials.len(),
        scene.sphere_count(),
        scene.light_count()
    );

    Ok(SceneDescription {
        scene,
        render: file.render,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "materials": {
            "glass": { "refractive_index": 2.0, "brightness": [0.0, 0.5, 0.1, 0.8],
                       "diffuse": [0.6, 0.7, 0.8], "specular_exponent": 125.0 },
            "red": { "brightness": [0.9, 0.1, 0.0, 0.0], "diffuse": [0.5, 0.0, 0.0],
                     "specular_exponent": 10.0 }
        },
        "spheres": [
            { "center": [3.0, 3.0, -12.0], "radius": 2.0, "material": "glass" },
            { "center": [1.5, -0.5, -18.0], "radius": 4.0, "material": "red" }
        ],
        "lights": [ { "position": [-20.0, 20.0, 20.0], "intensity": 1.5 } ],
        "render": { "width": 64, "height": 48, "numeric_policy": "clamped" }
    }"#;

    #[test]
    fn test_load_scene_from_str() {
        let _ = env_logger::builder().is_test(true).try_init();

        let desc = load_scene_from_str(SCENE).unwrap();
        assert_eq!(desc.scene.sphere_count(), 2);
        assert_eq!(desc.scene.light_count(), 1);

        let glass = &desc.scene.spheres[0];
        assert_eq!(glass.center, Vec3::new(3.0, 3.0, -12.0));
        assert_eq!(glass.material.refractive_index, 2.0);
        assert_eq!(glass.material.brightness, Vec4::new(0.0, 0.5, 0.1, 0.8));

        // Omitted refractive index defaults to air
        assert_eq!(desc.scene.spheres[1].material.refractive_index, 1.0);

        assert_eq!(desc.render.width, Some(64));
        assert_eq!(desc.render.height, Some(48));
        assert_eq!(desc.render.max_bounce, None);
        assert_eq!(desc.render.numeric_policy, Some(NumericPolicy::Clamped));
    }

    #[test]
    fn test_unknown_material() {
        let text = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 1, "material": "gold" } ] }"#;
        match load_scene_from_str(text) {
            Err(LoadError::UnknownMaterial(name)) => assert_eq!(name, "gold"),
            other => panic!("expected UnknownMaterial, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_radius_is_rejected() {
        let text = r#"{
            "materials": { "m": { "brightness": [1, 0, 0, 0], "diffuse": [1, 1, 1] } },
            "spheres": [ { "center": [0, 0, 0], "radius": 0, "material": "m" } ]
        }"#;
        assert!(matches!(
            load_scene_from_str(text),
            Err(LoadError::Scene(SceneError::InvalidRadius(_)))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(load_scene_from_str("{ spheres: "), Err(LoadError::Json(_))));
        assert!(matches!(
            load_scene_from_str(r#"{ "cameras": [] }"#),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_max_bounce_above_limit_is_rejected() {
        let text = r#"{ "render": { "max_bounce": 1000000 } }"#;
        match load_scene_from_str(text) {
            Err(LoadError::BounceLimit { requested, limit }) => {
                assert_eq!(requested, 1_000_000);
                assert_eq!(limit, MAX_BOUNCE_LIMIT);
            }
            other => panic!("expected BounceLimit, got {:?}", other),
        }

        let at_limit = format!(r#"{{ "render": {{ "max_bounce": {} }} }}"#, MAX_BOUNCE_LIMIT);
        let desc = load_scene_from_str(&at_limit).unwrap();
        assert_eq!(desc.render.max_bounce, Some(MAX_BOUNCE_LIMIT));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_scene("/nonexistent/glint/scene.json"),
            Err(LoadError::Io(_))
        ));
    }

    #[test]
    fn test_empty_document() {
        let desc = load_scene_from_str("{}").unwrap();
        assert_eq!(desc.scene.sphere_count(), 0);
        assert_eq!(desc.render, RenderOverrides::default());
    }
}
