//! Sample harness: two stencil-outlined rectangles on an 800x600 window.

mod config;
mod scene;

use std::process::ExitCode;

use anyhow::Result;
use nin_engine::device::GpuInit;
use nin_engine::logging::{init_logging, LoggingConfig};
use nin_engine::window::{Runtime, RuntimeConfig};

use config::DemoConfig;
use scene::OutlineDemo;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = DemoConfig::default();
    let runtime = RuntimeConfig {
        initial_size: config.surface,
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), move |ctx| {
        OutlineDemo::new(ctx, &config)
    })
}
