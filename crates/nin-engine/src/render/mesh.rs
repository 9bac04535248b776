use anyhow::Result;
use wgpu::util::DeviceExt;

use crate::device::with_error_scope;
use crate::geometry::MeshData;

/// GPU-resident, write-once vertex buffer holding one `MeshData`.
pub struct GpuMesh {
    buffer: wgpu::Buffer,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Result<Self> {
        let buffer = with_error_scope(device, label, || {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: mesh.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            })
        })?;

        Ok(Self { buffer })
    }

    #[inline]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
