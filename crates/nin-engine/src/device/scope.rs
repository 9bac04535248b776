use anyhow::{anyhow, Result};
use wgpu::ErrorFilter;

/// Runs `f` inside validation and out-of-memory error scopes.
///
/// wgpu reports resource-creation failures asynchronously; without a scope they
/// reach the uncaptured-error handler, which panics. Any error captured here is
/// logged and returned instead, labeled with `label`.
pub fn with_error_scope<F, T>(device: &wgpu::Device, label: &str, f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    // Scopes nest: the inner (validation) one must be popped first.
    let oom = device.push_error_scope(ErrorFilter::OutOfMemory);
    let validation = device.push_error_scope(ErrorFilter::Validation);

    let out = f();

    let validation_err = pollster::block_on(validation.pop());
    let oom_err = pollster::block_on(oom.pop());

    if let Some(err) = validation_err.or(oom_err) {
        log::error!("wgpu error in {label}: {err}");
        return Err(anyhow!("wgpu error in {label}: {err}"));
    }
    Ok(out)
}
