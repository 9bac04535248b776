//! Loading of the outline shader pair from disk.
//!
//! Both programs are WGSL files resolved at runtime. Each file is parsed and
//! validated with naga before any GPU module is created, so a broken or missing
//! shader fails initialization with a message naming the stage.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

pub const VERTEX_SHADER_FILE: &str = "outline.vert.wgsl";
pub const PIXEL_SHADER_FILE: &str = "outline.frag.wgsl";

pub const VERTEX_ENTRY: &str = "vs_main";
pub const PIXEL_ENTRY: &str = "fs_main";

/// Environment variable overriding the shader directory.
pub const SHADER_DIR_ENV: &str = "NIN_SHADER_DIR";

/// Directory name searched next to the executable.
const SHADER_DIR_NAME: &str = "shaders";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderKind {
    Vertex,
    Pixel,
}

impl ShaderKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ShaderKind::Vertex => VERTEX_SHADER_FILE,
            ShaderKind::Pixel => PIXEL_SHADER_FILE,
        }
    }

    pub fn entry_point(self) -> &'static str {
        match self {
            ShaderKind::Vertex => VERTEX_ENTRY,
            ShaderKind::Pixel => PIXEL_ENTRY,
        }
    }

    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderKind::Vertex => naga::ShaderStage::Vertex,
            ShaderKind::Pixel => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Pixel => f.write_str("pixel"),
        }
    }
}

/// A validated WGSL program.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    pub kind: ShaderKind,
    pub path: PathBuf,
    pub source: String,
}

impl ShaderProgram {
    /// Reads and validates `dir/<file for kind>`.
    pub fn load(dir: &Path, kind: ShaderKind) -> Result<Self> {
        let path = dir.join(kind.file_name());
        let source = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {kind} shader {}", path.display()))?;

        validate(&source, kind)
            .with_context(|| format!("invalid {kind} shader {}", path.display()))?;

        log::debug!("loaded {kind} shader from {}", path.display());
        Ok(Self { kind, path, source })
    }

    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        let label = match self.kind {
            ShaderKind::Vertex => "nin outline vertex shader",
            ShaderKind::Pixel => "nin outline pixel shader",
        };
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(self.source.as_str().into()),
        })
    }
}

/// The vertex/pixel pair used by both outline pipelines.
#[derive(Debug, Clone)]
pub struct ShaderSet {
    pub vertex: ShaderProgram,
    pub pixel: ShaderProgram,
}

impl ShaderSet {
    /// Loads the vertex program, then the pixel program. The first failure wins.
    pub fn load(dir: &Path) -> Result<Self> {
        let vertex = ShaderProgram::load(dir, ShaderKind::Vertex)?;
        let pixel = ShaderProgram::load(dir, ShaderKind::Pixel)?;
        Ok(Self { vertex, pixel })
    }
}

fn validate(source: &str, kind: ShaderKind) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| anyhow!("{}", e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| anyhow!("{}", e.emit_to_string(source)))?;

    let entry = kind.entry_point();
    anyhow::ensure!(
        module
            .entry_points
            .iter()
            .any(|ep| ep.name == entry && ep.stage == kind.naga_stage()),
        "missing {kind} entry point `{entry}`"
    );

    Ok(())
}

/// Picks the shader directory.
///
/// An explicit path or `NIN_SHADER_DIR` is used as-is. Otherwise the first of
/// `<exe dir>/shaders` and the engine crate's `shaders/` that holds the vertex
/// program is returned.
pub fn resolve_shader_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = std::env::var_os(SHADER_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let mut candidates = Vec::with_capacity(2);
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(SHADER_DIR_NAME));
    }
    candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join(SHADER_DIR_NAME));

    let profile = if cfg!(debug_assertions) { "debug" } else { "release" };
    candidates
        .iter()
        .find(|dir| dir.join(VERTEX_SHADER_FILE).is_file())
        .cloned()
        .with_context(|| format!("no shader directory found ({profile} build), searched {candidates:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(SHADER_DIR_NAME)
    }

    fn copy_shipped(dir: &Path, kinds: &[ShaderKind]) {
        for kind in kinds {
            let src = shipped_dir().join(kind.file_name());
            fs::copy(&src, dir.join(kind.file_name())).unwrap();
        }
    }

    #[test]
    fn shipped_shaders_validate() {
        let set = ShaderSet::load(&shipped_dir()).unwrap();
        assert_eq!(set.vertex.kind, ShaderKind::Vertex);
        assert_eq!(set.pixel.kind, ShaderKind::Pixel);
    }

    #[test]
    fn missing_pixel_shader_fails_naming_the_stage() {
        let dir = tempfile::tempdir().unwrap();
        copy_shipped(dir.path(), &[ShaderKind::Vertex]);

        let err = ShaderSet::load(dir.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("pixel shader"), "{msg}");
        assert!(msg.contains(PIXEL_SHADER_FILE), "{msg}");
    }

    #[test]
    fn missing_vertex_shader_fails_before_pixel() {
        let dir = tempfile::tempdir().unwrap();
        copy_shipped(dir.path(), &[ShaderKind::Pixel]);

        let msg = format!("{:#}", ShaderSet::load(dir.path()).unwrap_err());
        assert!(msg.contains("vertex shader"), "{msg}");
    }

    #[test]
    fn syntax_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        copy_shipped(dir.path(), &[ShaderKind::Vertex]);
        fs::write(dir.path().join(PIXEL_SHADER_FILE), "fn fs_main( {").unwrap();

        let msg = format!("{:#}", ShaderSet::load(dir.path()).unwrap_err());
        assert!(msg.contains("invalid pixel shader"), "{msg}");
    }

    #[test]
    fn wrong_entry_point_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        copy_shipped(dir.path(), &[ShaderKind::Vertex]);
        fs::write(
            dir.path().join(PIXEL_SHADER_FILE),
            "@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }",
        )
        .unwrap();

        let msg = format!("{:#}", ShaderSet::load(dir.path()).unwrap_err());
        assert!(msg.contains("missing pixel entry point `fs_main`"), "{msg}");
    }

    #[test]
    fn explicit_dir_is_used_verbatim() {
        let dir = Path::new("/definitely/not/here");
        assert_eq!(resolve_shader_dir(Some(dir)).unwrap(), dir);
    }
}
