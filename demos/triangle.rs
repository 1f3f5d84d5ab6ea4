use nalgebra::{Isometry3, Perspective3, Point3, Vector2, Vector3, Vector4};

use softrender_scanline::{ColorRgba, ColorBuffer, DepthBuffer, FAR_DEPTH, Vertex, Fragment, AlphaBlend};
use softrender_scanline::{RenderTargets, RenderTriangleParams, render_triangle};
use softrender_scanline::{Model, Mesh, Face, Material, Image, RenderModelParams, render_model};
use softrender_scanline::image_compat::ImageColorBuffer;

fn checkerboard(size: u32) -> Image {
    let colors: Vec<_> = (0..size * size).map(|i| {
        if (i % size + i / size) % 2 == 0 { ColorRgba::WHITE } else { ColorRgba::new(40, 40, 40, 255) }
    }).collect();

    Image::from_colors(size, size, &colors).unwrap()
}

fn floor_model() -> Model {
    Model {
        positions: vec![
            Vector3::new(-2.0, 0.0, -2.0),
            Vector3::new(2.0, 0.0, -2.0),
            Vector3::new(2.0, 0.0, 2.0),
            Vector3::new(-2.0, 0.0, 2.0),
        ],
        tex_coords: vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(1.0, 1.0), Vector2::new(0.0, 1.0)],
        normals: Vec::new(),
        meshes: vec![Mesh {
            faces: vec![
                Face { position_indices: [0, 1, 2], tex_coord_indices: [0, 1, 2], ..Face::default() },
                Face { position_indices: [0, 2, 3], tex_coord_indices: [0, 2, 3], ..Face::default() },
            ],
            material_index: Some(0),
            has_tex_coords: true,
            has_normals: false,
        }],
        materials: vec![Material { albedo_map_index: Some(0), normal_map_index: None }],
        images: vec![checkerboard(8)],
    }
}

fn main() {
    let (width, height) = (640, 480);

    let mut color = ColorBuffer::new_with(width, height, ColorRgba::new(30, 30, 60, 255));
    let mut depth = DepthBuffer::new_with(width, height, FAR_DEPTH);

    let view = Isometry3::look_at_rh(
        &Point3::new(0.0, 2.0, 4.0),
        &Point3::origin(),
        &Vector3::new(0.0, 1.0, 0.0),
    ).to_homogeneous();

    let projection = Perspective3::new(width as f32 / height as f32, 60.0f32.to_radians(), 0.1, 100.0).to_homogeneous();

    let mvp = projection * view;

    {
        let targets = RenderTargets::color_depth(&mut color, &mut depth).unwrap();

        render_model(&mut RenderModelParams::new(&floor_model(), mvp, targets)).unwrap();
    }

    // Translucent triangle with a color attribute on each vertex
    let corner = |x: f32, y: f32, z: f32, rgb: &[f32]| {
        Vertex::with_attributes(mvp * Vector4::new(x, y, z, 1.0), &[rgb]).unwrap()
    };

    let triangle = [
        corner(-1.0, 0.2, 0.0, &[1.0, 0.0, 0.0]),
        corner(1.0, 0.2, 0.0, &[0.0, 1.0, 0.0]),
        corner(0.0, 1.8, 0.0, &[0.0, 0.0, 1.0]),
    ];

    let shader = |vertex: &Vertex| {
        let rgb = vertex.attribute(0).map(|a| a.as_slice()).unwrap_or(&[]);

        let channel = |i: usize| (rgb.get(i).cloned().unwrap_or(0.0).max(0.0).min(1.0) * 255.0) as u8;

        Fragment::Color(ColorRgba::new(channel(0), channel(1), channel(2), 200))
    };

    {
        let targets = RenderTargets::color_depth(&mut color, &mut depth).unwrap();

        render_triangle(&mut RenderTriangleParams::new(triangle, targets, shader).with_blend(AlphaBlend)).unwrap();
    }

    color.copy_to_image().unwrap().save("triangle.png").unwrap();
}
