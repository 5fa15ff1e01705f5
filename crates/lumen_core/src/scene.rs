//! JSON scene descriptions.
//!
//! A scene file names its materials once and lets any number of spheres
//! refer to them by name:
//!
//! ```json
//! {
//!   "camera": { "eye": [0, 0, 0], "screen_center": [0, 0, -1], "fov_degrees": 90 },
//!   "materials": [
//!     { "name": "ground", "type": "diffuse", "albedo": [0.5, 0.5, 0.5] },
//!     { "name": "glass", "type": "dielectric", "ior": 1.5 }
//!   ],
//!   "spheres": [
//!     { "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
//!     { "center": [0, 0, -1], "radius": 0.5, "material": "glass" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use lumen_math::{Vec3, VecExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} uses unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Material '{0}' is defined more than once")]
    DuplicateMaterial(String),

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub type SceneResult<T> = Result<T, SceneError>;

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> SceneError {
    SceneError::InvalidValue {
        field: field.into(),
        reason: reason.into(),
    }
}

/// How a diffuse surface picks its scatter direction.
///
/// The three policies produce visibly different brightness and contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffuseModel {
    /// Normal plus a random point on the unit sphere surface
    #[default]
    Lambertian,
    /// Normal plus a random point inside the unit sphere
    Uniform,
    /// Uniformly random direction in the hemisphere around the normal
    Hemisphere,
}

/// Camera placement and lens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    /// Focal point
    pub eye: [f64; 3],
    /// Center of the screen rectangle; the view direction is `screen_center - eye`
    pub screen_center: [f64; 3],
    /// Horizontal field of view
    #[serde(default = "default_fov")]
    pub fov_degrees: f64,
    /// Lens radius, 0 = pinhole
    #[serde(default)]
    pub aperture: f64,
    /// Distance to the plane of perfect focus, defaults to the screen distance
    #[serde(default)]
    pub focus_distance: Option<f64>,
}

fn default_fov() -> f64 {
    90.0
}

/// Material parameters, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialKind {
    Diffuse {
        albedo: [f64; 3],
        #[serde(default)]
        model: DiffuseModel,
    },
    Metal {
        albedo: [f64; 3],
        #[serde(default)]
        fuzz: f64,
    },
    Dielectric {
        ior: f64,
    },
}

/// A named material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescription {
    pub name: String,
    #[serde(flatten)]
    pub kind: MaterialKind,
}

/// A sphere bound to a named material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: [f64; 3],
    pub radius: f64,
    pub material: String,
}

/// A complete scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    #[serde(default)]
    pub materials: Vec<MaterialDescription>,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

/// Array to vector.
pub fn vec3(v: [f64; 3]) -> Vec3 {
    Vec3::from_array(v)
}

impl SceneDescription {
    /// Parse and validate a scene from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Read, parse and validate a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        log::info!("Loading scene from: {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&text)?;
        log::info!(
            "Scene has {} materials, {} spheres",
            scene.materials.len(),
            scene.spheres.len()
        );
        Ok(scene)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Index of the material called `name`.
    pub fn material_index(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    /// Check every value the renderer would otherwise assert on.
    pub fn validate(&self) -> SceneResult<()> {
        self.camera.validate()?;

        let mut names = HashSet::new();
        for material in &self.materials {
            if !names.insert(material.name.as_str()) {
                return Err(SceneError::DuplicateMaterial(material.name.clone()));
            }
            material.validate()?;
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !names.contains(sphere.material.as_str()) {
                return Err(SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                });
            }
            if !(sphere.radius > 0.0) {
                return Err(invalid(
                    format!("radius of sphere {index}"),
                    format!("{} is not positive", sphere.radius),
                ));
            }
            if !vec3(sphere.center).is_finite() {
                return Err(invalid(format!("center of sphere {index}"), "not finite"));
            }
        }

        Ok(())
    }
}

impl CameraDescription {
    fn validate(&self) -> SceneResult<()> {
        if !vec3(self.eye).is_finite() || !vec3(self.screen_center).is_finite() {
            return Err(invalid("camera", "positions must be finite"));
        }
        let view = vec3(self.screen_center) - vec3(self.eye);
        if view.is_zero() {
            return Err(invalid("camera", "eye and screen center coincide"));
        }
        if view.is_parallel(Vec3::Y) {
            return Err(invalid("camera", "view direction is parallel to the world up vector"));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid("fov_degrees", format!("{} is not in (0, 180)", self.fov_degrees)));
        }
        if !(self.aperture >= 0.0) {
            return Err(invalid("aperture", format!("{} is negative", self.aperture)));
        }
        if let Some(focus) = self.focus_distance {
            if !(focus > 0.0) {
                return Err(invalid("focus_distance", format!("{focus} is not positive")));
            }
        }
        Ok(())
    }
}

impl MaterialDescription {
    fn validate(&self) -> SceneResult<()> {
        let check_albedo = |albedo: [f64; 3]| {
            if albedo.iter().all(|c| (0.0..=1.0).contains(c)) {
                Ok(())
            } else {
                Err(invalid(
                    format!("albedo of '{}'", self.name),
                    format!("{albedo:?} is outside [0, 1]"),
                ))
            }
        };

        match self.kind {
            MaterialKind::Diffuse { albedo, .. } => check_albedo(albedo),
            MaterialKind::Metal { albedo, fuzz } => {
                check_albedo(albedo)?;
                if !(0.0..=1.0).contains(&fuzz) {
                    return Err(invalid(
                        format!("fuzz of '{}'", self.name),
                        format!("{fuzz} is outside [0, 1]"),
                    ));
                }
                Ok(())
            }
            MaterialKind::Dielectric { ior } => {
                if ior > 0.0 {
                    Ok(())
                } else {
                    Err(invalid(
                        format!("ior of '{}'", self.name),
                        format!("{ior} is not positive"),
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND_SCENE: &str = r#"{
        "camera": { "eye": [0, 0, 0], "screen_center": [0, 0, -1], "fov_degrees": 90 },
        "materials": [
            { "name": "ground", "type": "diffuse", "albedo": [0.5, 0.5, 0.5] },
            { "name": "steel", "type": "metal", "albedo": [0.8, 0.8, 0.8], "fuzz": 0.3 },
            { "name": "glass", "type": "dielectric", "ior": 1.5 },
            { "name": "chalk", "type": "diffuse", "albedo": [0.9, 0.9, 0.9], "model": "hemisphere" }
        ],
        "spheres": [
            { "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
            { "center": [0, 0, -1], "radius": 0.5, "material": "glass" }
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let scene = SceneDescription::from_json_str(GROUND_SCENE).unwrap();
        assert_eq!(scene.materials.len(), 4);
        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.camera.aperture, 0.0);
        assert_eq!(scene.camera.focus_distance, None);
        assert_eq!(
            scene.materials[0].kind,
            MaterialKind::Diffuse {
                albedo: [0.5, 0.5, 0.5],
                model: DiffuseModel::Lambertian
            }
        );
        assert_eq!(
            scene.materials[3].kind,
            MaterialKind::Diffuse {
                albedo: [0.9, 0.9, 0.9],
                model: DiffuseModel::Hemisphere
            }
        );
        assert_eq!(scene.material_index("glass"), Some(2));
        assert_eq!(scene.material_index("wood"), None);
    }

    #[test]
    fn test_json_round_trip() {
        let scene = SceneDescription::from_json_str(GROUND_SCENE).unwrap();
        let text = scene.to_json_string().unwrap();
        assert_eq!(SceneDescription::from_json_str(&text).unwrap(), scene);
    }

    #[test]
    fn test_unknown_material() {
        let json = GROUND_SCENE.replace(r#""material": "glass""#, r#""material": "wood""#);
        match SceneDescription::from_json_str(&json) {
            Err(SceneError::UnknownMaterial { index, name }) => {
                assert_eq!(index, 1);
                assert_eq!(name, "wood");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_material() {
        let json = GROUND_SCENE.replace(r#""name": "steel""#, r#""name": "ground""#);
        assert!(matches!(
            SceneDescription::from_json_str(&json),
            Err(SceneError::DuplicateMaterial(name)) if name == "ground"
        ));
    }

    #[test]
    fn test_invalid_values() {
        let bad_albedo = GROUND_SCENE.replace("[0.5, 0.5, 0.5]", "[1.5, 0.5, 0.5]");
        assert!(matches!(
            SceneDescription::from_json_str(&bad_albedo),
            Err(SceneError::InvalidValue { .. })
        ));

        let bad_radius = GROUND_SCENE.replace(r#""radius": 0.5"#, r#""radius": -0.5"#);
        assert!(matches!(
            SceneDescription::from_json_str(&bad_radius),
            Err(SceneError::InvalidValue { .. })
        ));

        let bad_fov = GROUND_SCENE.replace(r#""fov_degrees": 90"#, r#""fov_degrees": 180"#);
        assert!(matches!(
            SceneDescription::from_json_str(&bad_fov),
            Err(SceneError::InvalidValue { .. })
        ));

        let looking_down = GROUND_SCENE.replace("[0, 0, -1], \"fov", "[0, -1, 0], \"fov");
        assert!(matches!(
            SceneDescription::from_json_str(&looking_down),
            Err(SceneError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SceneDescription::from_json_str("{ not json"),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SceneDescription::load("/nonexistent/scene.json"),
            Err(SceneError::Io(_))
        ));
    }
}
