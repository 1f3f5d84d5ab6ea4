use nalgebra::{Matrix3, Matrix4, Vector3};

use softrender_scanline::{decode_model, load_model, render_model, RenderModelParams, RenderTargets};
use softrender_scanline::{ColorBuffer, ColorRgba, DepthBuffer, FAR_DEPTH, Fragment, Vertex};
use softrender_scanline::model::ShadingContext;

fn varint(out: &mut Vec<u8>, mut value: u32) {
    for _ in 0..3 {
        let low = (value & 0x7F) as u8;
        value >>= 7;

        if value == 0 {
            out.push(low);
            return;
        }

        out.push(low | 0x80);
    }

    out.push(value as u8);
}

fn floats(out: &mut Vec<u8>, values: &[f32]) {
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Full screen quad in two meshes, the first textured by a 2x1 albedo map and the
/// second without a material, with normals on both.
fn quad_file() -> Vec<u8> {
    let mut out = vec![0; 16];

    varint(&mut out, 4);
    floats(&mut out, &[-1.0, -1.0, 0.5, 1.0, -1.0, 0.5, 1.0, 1.0, 0.5, -1.0, 1.0, 0.5]);

    varint(&mut out, 2);
    floats(&mut out, &[0.0, 0.0, 1.0, 0.0]);

    varint(&mut out, 1);
    floats(&mut out, &[0.0, 0.0, 1.0]);

    // images
    varint(&mut out, 1);
    varint(&mut out, 2);
    varint(&mut out, 1);
    varint(&mut out, 4);
    out.extend_from_slice(&[255, 0, 0, 255, 0, 0, 255, 255]);

    // materials
    varint(&mut out, 1);
    varint(&mut out, 1);
    varint(&mut out, 0);

    // meshes
    varint(&mut out, 2);

    varint(&mut out, 1);
    out.push(0b11);
    varint(&mut out, 1);
    for &i in &[0, 1, 2, 0, 1, 1, 0, 0, 0] {
        varint(&mut out, i);
    }

    varint(&mut out, 0);
    out.push(0b10);
    varint(&mut out, 1);
    for &i in &[0, 2, 3, 0, 0, 0] {
        varint(&mut out, i);
    }

    out
}

#[test]
fn test_decode_and_render() {
    let model = decode_model(&quad_file()).unwrap();

    assert_eq!(model.meshes.len(), 2);
    assert_eq!(model.face_count(), 2);
    model.validate().unwrap();

    let mut color = ColorBuffer::new_with(8, 8, ColorRgba::BLACK);
    let mut depth = DepthBuffer::new_with(8, 8, FAR_DEPTH);

    {
        let targets = RenderTargets::color_depth(&mut color, &mut depth).unwrap();

        render_model(&mut RenderModelParams::new(&model, Matrix4::identity(), targets)).unwrap();
    }

    // lower right half is textured, blending from red on the left to blue on the right
    assert_eq!(*color.at(0, 0).unwrap(), ColorRgba::RED);
    assert_eq!(*color.at(7, 0).unwrap(), ColorRgba::BLUE);
    assert_eq!(*color.at(7, 7).unwrap(), ColorRgba::BLUE);

    // upper left half has no material
    assert_eq!(*color.at(0, 7).unwrap(), ColorRgba::MAGENTA);

    assert!(color.as_slice().iter().all(|c| *c != ColorRgba::BLACK));
    assert!(depth.as_slice().iter().all(|d| *d == 0.5));
}

#[test]
fn test_normal_matrix_reaches_shader() {
    let model = decode_model(&quad_file()).unwrap();

    let mut color = ColorBuffer::new_with(4, 4, ColorRgba::BLACK);

    let shader = |vertex: &Vertex, context: &ShadingContext| {
        let normal = vertex.attribute(if context.has_tex_coords { 1 } else { 0 }).map(|a| a.as_slice().to_vec());

        if normal == Some(vec![0.0, 0.0, -1.0]) {
            Fragment::Color(ColorRgba::GREEN)
        } else {
            Fragment::Discard
        }
    };

    {
        let flip = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0));

        let mut params = RenderModelParams::new(&model, Matrix4::identity(), RenderTargets::color(&mut color))
            .with_normal_matrix(flip)
            .with_shader(shader);

        render_model(&mut params).unwrap();
    }

    assert!(color.as_slice().iter().all(|c| *c == ColorRgba::GREEN));
}

#[test]
fn test_load_missing_model() {
    let path = std::env::temp_dir().join("softrender-scanline-does-not-exist.model");

    assert!(load_model(path).unwrap().is_none());
}
