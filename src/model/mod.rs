//! Indexed triangle models with materials and textures
//!
//! A model is read-only while rendering. Positions, texture coordinates and normals
//! are shared by every mesh and referenced by index from each face.

use std::fmt::{self, Debug};

use nalgebra::{Vector2, Vector3};

use crate::error::{RenderError, RenderResult};
use crate::texture::Image;

pub mod render;
pub mod decode;

pub use self::render::{render_model, RenderModelParams, ModelShader, DefaultModelShader, ShadingContext};
pub use self::decode::{decode_model, load_model};

/// One triangle, as indices into the owning model's attribute arrays.
///
/// Texture coordinate and normal indices are only meaningful if the mesh declares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Face {
    pub position_indices: [usize; 3],
    pub tex_coord_indices: [usize; 3],
    pub normal_indices: [usize; 3],
}

/// Group of faces sharing a material
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub faces: Vec<Face>,
    pub material_index: Option<usize>,
    pub has_tex_coords: bool,
    pub has_normals: bool,
}

/// Texture maps, as indices into the model's image table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Material {
    pub albedo_map_index: Option<usize>,
    pub normal_map_index: Option<usize>,
}

#[derive(Clone, Default)]
pub struct Model {
    pub positions: Vec<Vector3<f32>>,
    pub tex_coords: Vec<Vector2<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub images: Vec<Image>,
}

impl Model {
    /// Checks that every index in the model refers to an existing entry.
    pub fn validate(&self) -> RenderResult<()> {
        for material in &self.materials {
            for index in material.albedo_map_index.iter().chain(material.normal_map_index.iter()) {
                lookup(&self.images, *index, "image")?;
            }
        }

        for mesh in &self.meshes {
            if let Some(index) = mesh.material_index {
                lookup(&self.materials, index, "material")?;
            }

            for face in &mesh.faces {
                for i in 0..3 {
                    lookup(&self.positions, face.position_indices[i], "position")?;

                    if mesh.has_tex_coords {
                        lookup(&self.tex_coords, face.tex_coord_indices[i], "texture coordinate")?;
                    }

                    if mesh.has_normals {
                        lookup(&self.normals, face.normal_indices[i], "normal")?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Total number of faces across all meshes
    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.faces.len()).sum()
    }
}

impl Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Model {{ positions: {}, meshes: {}, faces: {}, materials: {}, images: {} }}",
               self.positions.len(), self.meshes.len(), self.face_count(), self.materials.len(), self.images.len())
    }
}

/// Bounds checked indexing that names what was being looked up on failure
#[inline]
pub(crate) fn lookup<'a, T>(items: &'a [T], index: usize, kind: &'static str) -> RenderResult<&'a T> {
    items.get(index).ok_or(RenderError::IndexOutOfRange { kind, index, len: items.len() })
}
