//! Rendering whole models face by face

use nalgebra::{Matrix3, Matrix4, Vector4};

use tracing::debug;

use crate::error::RenderResult;
use crate::color::{Blend, ColorRgba, DefaultBlend};
use crate::geometry::{Attribute, Vertex};
use crate::pipeline::{draw_triangle, Fragment, RenderTargets, VisibilityTest};
use crate::texture::Image;

use super::{lookup, Face, Material, Mesh, Model};

/// Everything a model shader may need besides the interpolated vertex.
#[derive(Debug, Clone, Copy)]
pub struct ShadingContext<'m> {
    pub model: &'m Model,
    /// Material of the mesh being rendered
    pub material_index: Option<usize>,
    /// Whether the first vertex attribute is a texture coordinate
    pub has_tex_coords: bool,
}

impl<'m> ShadingContext<'m> {
    #[inline]
    pub fn material(&self) -> Option<&'m Material> {
        self.material_index.and_then(|index| self.model.materials.get(index))
    }

    #[inline]
    pub fn image(&self, index: usize) -> Option<&'m Image> {
        self.model.images.get(index)
    }

    /// Texture coordinate of the vertex, or the origin if the mesh has none
    pub fn tex_coord(&self, vertex: &Vertex) -> (f32, f32) {
        match vertex.attribute(0) {
            Some(attribute) if self.has_tex_coords => {
                (attribute.get(0).unwrap_or(0.0), attribute.get(1).unwrap_or(0.0))
            }
            _ => (0.0, 0.0),
        }
    }
}

/// Pixel shader bound to a model's materials and images
pub trait ModelShader {
    fn shade(&self, vertex: &Vertex, context: &ShadingContext) -> Fragment;
}

impl<F> ModelShader for F where F: Fn(&Vertex, &ShadingContext) -> Fragment {
    #[inline]
    fn shade(&self, vertex: &Vertex, context: &ShadingContext) -> Fragment {
        self(vertex, context)
    }
}

/// Magenta without a material, otherwise the nearest albedo texel with the nearest
/// normal map texel added on top.
///
/// The normal map is not used for lighting, it only tints the albedo. A map whose image
/// index is missing from the model is skipped, leaving magenta in its place.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultModelShader;

impl ModelShader for DefaultModelShader {
    fn shade(&self, vertex: &Vertex, context: &ShadingContext) -> Fragment {
        let material = match context.material() {
            Some(material) => material,
            None => return Fragment::Color(ColorRgba::MAGENTA),
        };

        let (u, v) = context.tex_coord(vertex);

        let texel = |index: Option<usize>| {
            index.and_then(|index| context.image(index)).and_then(|image| image.texel(u, v).ok())
        };

        let mut result = ColorRgba::MAGENTA;

        if let Some(albedo) = texel(material.albedo_map_index) {
            result = albedo;
        }

        if let Some(normal) = texel(material.normal_map_index) {
            result = result.wrapping_add_rgb(normal);
        }

        Fragment::Color(result)
    }
}

/// Parameters for rendering every face of a model.
pub struct RenderModelParams<'m, 'a, S = DefaultModelShader, B = DefaultBlend> {
    pub model: &'m Model,
    /// Object space to homogeneous clip space, applied to column vectors
    pub mvp_matrix: Matrix4<f32>,
    /// Applied to normals before they are attached to vertices
    pub normal_matrix: Matrix3<f32>,
    pub targets: RenderTargets<'a>,
    pub pixel_shader: S,
    pub blend: B,
    pub visibility: VisibilityTest,
}

impl<'m, 'a> RenderModelParams<'m, 'a> {
    /// Parameters with an identity normal matrix, the default shader and default blending
    pub fn new(model: &'m Model, mvp_matrix: Matrix4<f32>, targets: RenderTargets<'a>) -> RenderModelParams<'m, 'a> {
        RenderModelParams {
            model,
            mvp_matrix,
            normal_matrix: Matrix3::identity(),
            targets,
            pixel_shader: DefaultModelShader,
            blend: DefaultBlend,
            visibility: VisibilityTest::default(),
        }
    }
}

impl<'m, 'a, S, B> RenderModelParams<'m, 'a, S, B> {
    #[must_use]
    pub fn with_normal_matrix(mut self, normal_matrix: Matrix3<f32>) -> RenderModelParams<'m, 'a, S, B> {
        self.normal_matrix = normal_matrix;
        self
    }

    #[must_use]
    pub fn with_shader<T>(self, pixel_shader: T) -> RenderModelParams<'m, 'a, T, B> where T: ModelShader {
        RenderModelParams {
            model: self.model,
            mvp_matrix: self.mvp_matrix,
            normal_matrix: self.normal_matrix,
            targets: self.targets,
            pixel_shader,
            blend: self.blend,
            visibility: self.visibility,
        }
    }

    #[must_use]
    pub fn with_blend<T>(self, blend: T) -> RenderModelParams<'m, 'a, S, T> where T: Blend {
        RenderModelParams {
            model: self.model,
            mvp_matrix: self.mvp_matrix,
            normal_matrix: self.normal_matrix,
            targets: self.targets,
            pixel_shader: self.pixel_shader,
            blend,
            visibility: self.visibility,
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: VisibilityTest) -> RenderModelParams<'m, 'a, S, B> {
        self.visibility = visibility;
        self
    }
}

/// Render every face of every mesh, in order.
///
/// Stops at the first face that fails, leaving earlier faces rendered.
pub fn render_model<S, B>(params: &mut RenderModelParams<S, B>) -> RenderResult<()> where S: ModelShader, B: Blend {
    let RenderModelParams {
        model,
        ref mvp_matrix,
        ref normal_matrix,
        ref mut targets,
        ref pixel_shader,
        ref blend,
        visibility,
    } = *params;

    for (index, mesh) in model.meshes.iter().enumerate() {
        debug!(mesh = index, faces = mesh.faces.len(), material = ?mesh.material_index, "rendering mesh");

        let context = ShadingContext {
            model,
            material_index: mesh.material_index,
            has_tex_coords: mesh.has_tex_coords,
        };

        let shader = |vertex: &Vertex| pixel_shader.shade(vertex, &context);

        for face in &mesh.faces {
            let vertices = face_vertices(model, mesh, face, mvp_matrix, normal_matrix)?;

            draw_triangle(targets, &vertices, &shader, blend, visibility)?;
        }
    }

    Ok(())
}

/// Build clip-space vertices for a face, attaching the texture coordinate first
/// and the transformed normal second when the mesh declares them.
fn face_vertices(model: &Model,
                 mesh: &Mesh,
                 face: &Face,
                 mvp_matrix: &Matrix4<f32>,
                 normal_matrix: &Matrix3<f32>) -> RenderResult<[Vertex; 3]> {
    let mut vertices = [Vertex::new(Vector4::zeros()); 3];

    for (i, vertex) in vertices.iter_mut().enumerate() {
        let p = lookup(&model.positions, face.position_indices[i], "position")?;

        *vertex = Vertex::new(mvp_matrix * Vector4::new(p.x, p.y, p.z, 1.0));

        if mesh.has_tex_coords {
            let tex_coord = lookup(&model.tex_coords, face.tex_coord_indices[i], "texture coordinate")?;

            vertex.push_attribute(Attribute::new(&[tex_coord.x, tex_coord.y])?)?;
        }

        if mesh.has_normals {
            let normal = normal_matrix * lookup(&model.normals, face.normal_indices[i], "normal")?;

            vertex.push_attribute(Attribute::new(&[normal.x, normal.y, normal.z])?)?;
        }
    }

    Ok(vertices)
}
