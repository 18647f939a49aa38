//! Little-endian primitive writes for the node section.
//!
//! The container has no alignment or padding; records are just fields in
//! order. Strings carry a u32 byte-length prefix and no terminator. Matrices
//! are 16 floats in column-major order.

use std::io::Write;

use glam::{Mat4, Vec2, Vec3};

use crate::error::ExportResult;

/// Append-only writer for the fixed-width scalar layout of the node section.
///
/// Failure is only possible at the I/O boundary and aborts the export.
pub struct PrimitiveWriter<W: Write> {
    inner: W,
}

impl<W: Write> PrimitiveWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_u32(&mut self, value: u32) -> ExportResult<()> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> ExportResult<()> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> ExportResult<()> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> ExportResult<()> {
        self.inner.write_all(&[value as u8])?;
        Ok(())
    }

    pub fn write_str(&mut self, value: &str) -> ExportResult<()> {
        self.write_u32(value.len() as u32)?;
        self.inner.write_all(value.as_bytes())?;
        Ok(())
    }

    pub fn write_vec2(&mut self, value: Vec2) -> ExportResult<()> {
        self.write_f32(value.x)?;
        self.write_f32(value.y)
    }

    pub fn write_vec3(&mut self, value: Vec3) -> ExportResult<()> {
        self.write_f32(value.x)?;
        self.write_f32(value.y)?;
        self.write_f32(value.z)
    }

    pub fn write_mat4(&mut self, value: &Mat4) -> ExportResult<()> {
        for component in value.to_cols_array() {
            self.write_f32(component)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
