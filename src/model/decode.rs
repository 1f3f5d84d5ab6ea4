//! Binary model format decoding
//!
//! All multi-byte values are little-endian. Counts and indices are variable length
//! integers of up to four bytes, the first three carrying seven bits each with the
//! high bit set if another byte follows, and the fourth carrying a full eight bits.
//!
//! Layout after a 16 byte header:
//!
//! ```text
//! positions   count, then x y z as f32
//! tex coords  count, then u v as f32
//! normals     count, then x y z as f32
//! images      count, then width height channels and width * height * channels bytes
//! materials   count, then albedo and normal map image, zero for none or index + 1
//! meshes      count, then material (zero for none or index + 1), a flags byte
//!             and a face count. Each face is three position indices, followed by
//!             three tex coord indices if bit 0 is set and three normal indices if
//!             bit 1 is set.
//! ```

use std::{fs, io};
use std::convert::TryFrom;
use std::path::Path;

use nalgebra::{Vector2, Vector3};

use tracing::{debug, trace};

use crate::error::{DecodeError, DecodeResult, RenderError};
use crate::texture::Image;

use super::{Face, Material, Mesh, Model};

/// Size of the unused header at the start of every model file
pub const HEADER_SIZE: usize = 16;

/// Mesh flag marking faces with texture coordinate indices
pub const FLAG_TEX_COORDS: u8 = 1 << 0;
/// Mesh flag marking faces with normal indices
pub const FLAG_NORMALS: u8 = 1 << 1;

/// Bounds checked cursor over a byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> ByteReader<'a> {
        ByteReader { bytes, offset: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize { self.offset }

    #[inline]
    pub fn remaining(&self) -> usize { self.bytes.len() - self.offset }

    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::Truncated { offset: self.offset, needed: len - self.remaining() });
        }

        let bytes = &self.bytes[self.offset..self.offset + len];

        self.offset += len;

        Ok(bytes)
    }

    #[inline]
    pub fn skip(&mut self, len: usize) -> DecodeResult<()> {
        self.read_bytes(len).map(|_| ())
    }

    #[inline]
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Reads a variable length integer of at most 29 bits
    pub fn read_varint(&mut self) -> DecodeResult<u32> {
        let mut value = 0u32;

        for i in 0..4 {
            let byte = self.read_u8()?;

            if i == 3 {
                value |= (byte as u32) << 21;
            } else {
                value |= ((byte & 0x7F) as u32) << (i * 7);

                if byte & 0x80 == 0 {
                    break;
                }
            }
        }

        Ok(value)
    }

    #[inline]
    pub fn read_usize(&mut self) -> DecodeResult<usize> {
        self.read_varint().map(|value| value as usize)
    }

    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        let bytes = self.read_bytes(4)?;

        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads an element count, rejecting it if `count` elements of at least
    /// `min_size` bytes each could not fit in the rest of the data.
    pub fn read_count(&mut self, what: &'static str, min_size: usize) -> DecodeResult<usize> {
        let count = self.read_usize()?;

        self.check_count(what, count, min_size)?;

        Ok(count)
    }

    fn check_count(&self, what: &'static str, count: usize, min_size: usize) -> DecodeResult<()> {
        let remaining = self.remaining();

        match count.checked_mul(min_size) {
            Some(size) if size <= remaining => Ok(()),
            _ => Err(DecodeError::CountExceedsBuffer { what, count, remaining }),
        }
    }

    /// Reads a zero-for-none reference, checking the index against `len`
    fn read_optional_index(&mut self, kind: &'static str, len: usize) -> DecodeResult<Option<usize>> {
        match self.read_usize()? {
            0 => Ok(None),
            n => check_index(kind, n - 1, len).map(Some),
        }
    }

    fn read_index(&mut self, kind: &'static str, len: usize) -> DecodeResult<usize> {
        let index = self.read_usize()?;

        check_index(kind, index, len)
    }

    fn read_indices(&mut self, kind: &'static str, len: usize) -> DecodeResult<[usize; 3]> {
        Ok([self.read_index(kind, len)?, self.read_index(kind, len)?, self.read_index(kind, len)?])
    }
}

#[inline]
fn check_index(kind: &'static str, index: usize, len: usize) -> DecodeResult<usize> {
    if index < len { Ok(index) } else { Err(DecodeError::InvalidIndex { kind, index, len }) }
}

fn read_vector3s(reader: &mut ByteReader, what: &'static str) -> DecodeResult<Vec<Vector3<f32>>> {
    let count = reader.read_count(what, 12)?;

    let mut vectors = Vec::with_capacity(count);

    for _ in 0..count {
        vectors.push(Vector3::new(reader.read_f32()?, reader.read_f32()?, reader.read_f32()?));
    }

    Ok(vectors)
}

fn read_vector2s(reader: &mut ByteReader, what: &'static str) -> DecodeResult<Vec<Vector2<f32>>> {
    let count = reader.read_count(what, 8)?;

    let mut vectors = Vec::with_capacity(count);

    for _ in 0..count {
        vectors.push(Vector2::new(reader.read_f32()?, reader.read_f32()?));
    }

    Ok(vectors)
}

fn read_images(reader: &mut ByteReader) -> DecodeResult<Vec<Image>> {
    let count = reader.read_count("image", 3)?;

    let mut images = Vec::with_capacity(count);

    for index in 0..count {
        let width = reader.read_varint()?;
        let height = reader.read_varint()?;
        let channels = reader.read_varint()?;

        let len = (width as usize).checked_mul(height as usize).and_then(|area| area.checked_mul(channels as usize));

        let len = match len {
            Some(len) => len,
            None => return Err(DecodeError::CountExceedsBuffer { what: "image byte", count: usize::max_value(), remaining: reader.remaining() }),
        };

        reader.check_count("image byte", len, 1)?;

        let data = reader.read_bytes(len)?.to_vec();

        let image = u8::try_from(channels)
            .map_err(|_| RenderError::InvalidImage { width, height, channels })
            .and_then(|channels| Image::new(width, height, channels, data))
            .map_err(|source| DecodeError::InvalidImage { index, source })?;

        trace!(index, width, height, channels, "decoded image");

        images.push(image);
    }

    Ok(images)
}

fn read_materials(reader: &mut ByteReader, image_count: usize) -> DecodeResult<Vec<Material>> {
    let count = reader.read_count("material", 2)?;

    let mut materials = Vec::with_capacity(count);

    for _ in 0..count {
        materials.push(Material {
            albedo_map_index: reader.read_optional_index("image", image_count)?,
            normal_map_index: reader.read_optional_index("image", image_count)?,
        });
    }

    Ok(materials)
}

fn read_meshes(reader: &mut ByteReader, model: &Model) -> DecodeResult<Vec<Mesh>> {
    let count = reader.read_count("mesh", 3)?;

    let mut meshes = Vec::with_capacity(count);

    for _ in 0..count {
        let material_index = reader.read_optional_index("material", model.materials.len())?;
        let flags = reader.read_u8()?;

        let has_tex_coords = flags & FLAG_TEX_COORDS != 0;
        let has_normals = flags & FLAG_NORMALS != 0;

        let indices_per_face = 3 * (1 + has_tex_coords as usize + has_normals as usize);

        let face_count = reader.read_count("face", indices_per_face)?;

        let mut faces = Vec::with_capacity(face_count);

        for _ in 0..face_count {
            let mut face = Face::default();

            face.position_indices = reader.read_indices("position", model.positions.len())?;

            if has_tex_coords {
                face.tex_coord_indices = reader.read_indices("texture coordinate", model.tex_coords.len())?;
            }

            if has_normals {
                face.normal_indices = reader.read_indices("normal", model.normals.len())?;
            }

            faces.push(face);
        }

        meshes.push(Mesh { faces, material_index, has_tex_coords, has_normals });
    }

    Ok(meshes)
}

/// Decode a complete model from memory.
///
/// Every index in the result is checked, so the model passes `Model::validate`.
pub fn decode_model(bytes: &[u8]) -> DecodeResult<Model> {
    let mut reader = ByteReader::new(bytes);

    reader.skip(HEADER_SIZE)?;

    let mut model = Model::default();

    model.positions = read_vector3s(&mut reader, "position")?;
    model.tex_coords = read_vector2s(&mut reader, "texture coordinate")?;
    model.normals = read_vector3s(&mut reader, "normal")?;

    debug!(positions = model.positions.len(), tex_coords = model.tex_coords.len(), normals = model.normals.len(), "decoded vertex data");

    model.images = read_images(&mut reader)?;
    model.materials = read_materials(&mut reader, model.images.len())?;
    model.meshes = read_meshes(&mut reader, &model)?;

    debug!(images = model.images.len(), materials = model.materials.len(), meshes = model.meshes.len(), faces = model.face_count(), "decoded model");

    if reader.remaining() > 0 {
        debug!(trailing = reader.remaining(), "ignoring trailing bytes");
    }

    Ok(model)
}

/// Read and decode a model file.
///
/// A missing or empty file yields `Ok(None)`.
pub fn load_model<P: AsRef<Path>>(path: P) -> DecodeResult<Option<Model>> {
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(ref err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "model file not found");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    if bytes.is_empty() {
        debug!(path = %path.display(), "model file is empty");
        return Ok(None);
    }

    decode_model(&bytes).map(Some)
}
