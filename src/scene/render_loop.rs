use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::Session;
use crate::error::RenderError;

/// Handle to a running render loop
///
/// The loop renders the shared session once per `interval` on its own
/// thread until [`RenderLoop::stop`] is called, the frame limit is reached,
/// a frame fails, or the handle is dropped.
pub struct RenderLoop {
    stop: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    handle: Option<JoinHandle<Result<u64, RenderError>>>,
}

impl RenderLoop {
    /// Start rendering `session` every `interval`
    pub fn start(session: Arc<Mutex<Session>>, interval: Duration, max_frames: Option<u64>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let frames = Arc::new(AtomicU64::new(0));

        let handle = {
            let stop = Arc::clone(&stop);
            let frames = Arc::clone(&frames);
            thread::spawn(move || run(&session, interval, max_frames, &stop, &frames))
        };

        tracing::debug!(?interval, ?max_frames, "Render loop started");
        Self {
            stop,
            frames,
            handle: Some(handle),
        }
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Deregister the loop and wait for the current frame to finish
    ///
    /// Returns the number of frames rendered, or the error that ended the
    /// loop early.
    pub fn stop(mut self) -> Result<u64, RenderError> {
        self.stop.store(true, Ordering::Release);
        self.join()
    }

    /// Wait for a frame-limited loop to finish on its own
    pub fn wait(mut self) -> Result<u64, RenderError> {
        self.join()
    }

    fn join(&mut self) -> Result<u64, RenderError> {
        let result = match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| RenderError::Panicked)?,
            None => Ok(self.frames()),
        };
        tracing::debug!(frames = self.frames(), "Render loop stopped");
        result
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.stop.store(true, Ordering::Release);
            if let Err(err) = self.join() {
                tracing::error!(error = %err, "Render loop ended with an error");
            }
        }
    }
}

fn run(
    session: &Mutex<Session>,
    interval: Duration,
    max_frames: Option<u64>,
    stop: &AtomicBool,
    frames: &AtomicU64,
) -> Result<u64, RenderError> {
    let mut next_frame = Instant::now();
    let mut rendered = 0;

    while !stop.load(Ordering::Acquire) && max_frames.is_none_or(|max| rendered < max) {
        session
            .lock()
            .map_err(|_| RenderError::Poisoned)?
            .render_frame()?;
        rendered += 1;
        frames.store(rendered, Ordering::Release);

        next_frame += interval;
        let now = Instant::now();
        if next_frame > now {
            thread::sleep(next_frame - now);
        } else {
            // Running behind, do not try to catch up
            next_frame = now;
        }
    }

    Ok(rendered)
}
