/// Initialization parameters for the GPU layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: vertex colors are written as-is into a UNORM target.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// `AutoNoVsync` presents immediately where supported and falls back to FIFO.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface. This value is a hint.
    pub desired_maximum_frame_latency: u32,

    /// Backends the instance may pick an adapter from.
    pub backends: wgpu::Backends,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 1,
            backends: wgpu::Backends::all(),
        }
    }
}

impl GpuInit {
    /// Creates the wgpu instance for [`GpuInit::backends`].
    ///
    /// The noop backend is enabled only when it is the sole backend requested.
    pub fn create_instance(&self) -> wgpu::Instance {
        let mut backend_options = wgpu::BackendOptions::from_env_or_default();
        backend_options.noop.enable |= self.backends == wgpu::Backends::NOOP;

        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: self.backends,
            backend_options,
            ..Default::default()
        })
    }
}
