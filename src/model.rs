//! Scene objects: meshes plus an optional texture.
//!
//! A [`Model`] is what the renderer iterates over. It owns one or more
//! [`Mesh`] instances (an OBJ file may contain several groups) and the texture
//! shared by all of them.

use std::path::Path;

use crate::error::Result;
use crate::mesh::{Mesh, Triangle};
use crate::texture::Texture;

/// A renderable object: one or more meshes and an optional texture.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    meshes: Vec<Mesh>,
    texture: Option<Texture>,
}

impl Model {
    /// Create a new empty model with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meshes: Vec::new(),
            texture: None,
        }
    }

    /// Create a model holding a single mesh.
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        let mut model = Self::new(name);
        model.add_mesh(mesh);
        model
    }

    /// Load a model from an OBJ file.
    ///
    /// All objects/groups in the OBJ file become separate meshes within this model.
    pub fn from_obj<P: AsRef<Path>>(name: impl Into<String>, path: P) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            meshes: Mesh::load_all_from_obj(path)?,
            texture: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all meshes as a slice.
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Add a mesh to this model.
    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    /// Iterate over every triangle of every mesh, in order.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.meshes.iter().flat_map(|mesh| mesh.triangles().iter())
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    // ============ Texture ============

    /// Set the texture for this model.
    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = Some(texture);
    }

    /// Builder-style variant of [`Model::set_texture`].
    pub fn textured(mut self, texture: Texture) -> Self {
        self.set_texture(texture);
        self
    }

    /// Get the texture for this model.
    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;

    #[test]
    fn triangles_span_all_meshes() {
        let mut model = Model::with_mesh("cube", Mesh::cube());
        model.add_mesh(Mesh::new(
            "extra",
            vec![Triangle::from_positions(
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::UP,
            )],
        ));
        assert_eq!(model.triangle_count(), 13);
        assert_eq!(model.triangles().count(), 13);
    }

    #[test]
    fn texture_is_optional() {
        let model = Model::with_mesh("cube", Mesh::cube());
        assert!(model.texture().is_none());
        let textured = model.textured(Texture::from_pixels(1, 1, vec![0xFF00FF00]).unwrap());
        assert!(textured.texture().is_some());
    }
}
