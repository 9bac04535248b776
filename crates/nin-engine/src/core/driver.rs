use anyhow::{anyhow, Result};

/// Observable driver state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifecycle {
    /// Init has not run yet.
    Pending,
    /// Init succeeded; the app is ticked every frame.
    Running,
    /// Init failed; the app does not exist and is never ticked.
    Failed,
    Finished,
}

enum State<A> {
    Pending,
    Running(A),
    Failed(anyhow::Error),
    Finished(Option<anyhow::Error>),
}

/// Owns the app across its lifecycle: `Pending -> Running | Failed -> Finished`.
///
/// The init chain runs at most once; a failed init stores the error for the
/// caller and guarantees no frame callback is ever made.
pub struct Driver<A> {
    state: State<A>,
    frames: u64,
}

impl<A> Driver<A> {
    pub fn new() -> Self {
        Self {
            state: State::Pending,
            frames: 0,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.state {
            State::Pending => Lifecycle::Pending,
            State::Running(_) => Lifecycle::Running,
            State::Failed(_) => Lifecycle::Failed,
            State::Finished(_) => Lifecycle::Finished,
        }
    }

    /// Runs `build` if init has not happened yet. Returns whether the app is running.
    pub fn start<F>(&mut self, build: F) -> bool
    where
        F: FnOnce() -> Result<A>,
    {
        if !matches!(self.state, State::Pending) {
            return self.is_running();
        }

        self.state = match build() {
            Ok(app) => State::Running(app),
            Err(e) => {
                log::error!("initialization failed: {e:#}");
                State::Failed(e)
            }
        };
        self.is_running()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    /// Calls `f` with the app when running; otherwise does nothing.
    pub fn tick<R>(&mut self, f: impl FnOnce(&mut A) -> R) -> Option<R> {
        let State::Running(app) = &mut self.state else {
            return None;
        };
        self.frames += 1;
        Some(f(app))
    }

    /// Number of ticks that reached the app.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Ends the lifecycle, handing the app back for teardown.
    pub fn finish(&mut self) -> Option<A> {
        let prev = std::mem::replace(&mut self.state, State::Finished(None));
        match prev {
            State::Running(app) => Some(app),
            State::Failed(e) => {
                self.state = State::Finished(Some(e));
                None
            }
            State::Finished(e) => {
                self.state = State::Finished(e);
                None
            }
            State::Pending => None,
        }
    }

    /// Final outcome: the init error if init failed, `Ok` otherwise.
    ///
    /// A driver that never started reports an error as well.
    pub fn into_result(self) -> Result<()> {
        match self.state {
            State::Failed(e) | State::Finished(Some(e)) => Err(e),
            State::Pending => Err(anyhow!("event loop ended before initialization")),
            State::Running(_) | State::Finished(None) => Ok(()),
        }
    }
}

impl<A> Default for Driver<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        draws: u32,
    }

    #[test]
    fn failed_init_never_ticks() {
        let mut d: Driver<Counter> = Driver::new();
        assert!(!d.start(|| Err(anyhow!("no pixel shader"))));
        assert_eq!(d.lifecycle(), Lifecycle::Failed);

        let mut called = false;
        for _ in 0..3 {
            assert!(d.tick(|c| {
                called = true;
                c.draws += 1;
            })
            .is_none());
        }
        assert!(!called);
        assert_eq!(d.frames(), 0);

        assert!(d.finish().is_none());
        assert_eq!(d.lifecycle(), Lifecycle::Finished);
        let err = d.into_result().unwrap_err();
        assert!(err.to_string().contains("no pixel shader"));
    }

    #[test]
    fn running_app_ticks_once_per_frame() {
        let mut d = Driver::new();
        assert!(d.start(|| Ok(Counter::default())));

        for _ in 0..5 {
            d.tick(|c| c.draws += 1);
        }
        assert_eq!(d.frames(), 5);

        let app = d.finish().unwrap();
        assert_eq!(app.draws, 5);
        assert!(d.tick(|c| c.draws += 1).is_none());
        assert!(d.into_result().is_ok());
    }

    #[test]
    fn init_runs_at_most_once() {
        let mut d = Driver::new();
        let mut builds = 0;
        assert!(d.start(|| {
            builds += 1;
            Ok(Counter::default())
        }));
        assert!(d.start(|| {
            builds += 1;
            Ok(Counter::default())
        }));
        assert_eq!(builds, 1);
    }

    #[test]
    fn never_started_is_an_error() {
        let d: Driver<Counter> = Driver::new();
        assert!(d.into_result().is_err());
    }

    #[test]
    fn missing_adapter_fails_the_init_chain() {
        use crate::device::{request_device, GpuInit};

        let init = GpuInit {
            backends: wgpu::Backends::empty(),
            ..GpuInit::default()
        };

        let mut d: Driver<Counter> = Driver::new();
        let started = d.start(|| {
            let instance = init.create_instance();
            let (_adapter, _device, _queue) =
                pollster::block_on(request_device(&instance, None, &init))?;
            Ok(Counter::default())
        });
        assert!(!started);
        assert!(d.tick(|c| c.draws += 1).is_none());
        assert_eq!(d.frames(), 0);

        let err = d.into_result().unwrap_err();
        assert!(format!("{err:#}").contains("no GPU adapter available"));
    }
}
