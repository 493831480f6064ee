use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::runtime::AppEvent;

/// Production sampling interval.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Posts `AppEvent::Tick` for one run at a fixed interval until cancelled.
///
/// Ticks are aligned to the instant the sampler started. Cancelling wakes the
/// thread and joins it, so no tick is sent after `cancel` returns; ticks that
/// were already queued carry the run id and can be told apart.
#[derive(Debug)]
pub struct Sampler {
    run_id: u64,
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Sampler {
    pub fn start(run_id: u64, interval: Duration, events: Sender<AppEvent>) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = thread::spawn(move || {
            let mut deadline = Instant::now() + interval;
            loop {
                loop {
                    if flag.load(Ordering::Acquire) {
                        return;
                    }
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    thread::park_timeout(deadline - now);
                }
                if events.send(AppEvent::Tick { run_id }).is_err() {
                    return;
                }
                deadline += interval;
            }
        });
        debug!(run_id, ?interval, "sampler started");

        Self {
            run_id,
            cancelled,
            handle: Some(handle),
        }
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.cancelled.store(true, Ordering::Release);
            handle.thread().unpark();
            if join_reporting_panic(self.run_id, handle) {
                debug!(run_id = self.run_id, "sampler cancelled");
            }
        }
    }
}

/// Join a sampler thread; a panic inside it is logged rather than propagated.
fn join_reporting_panic(run_id: u64, handle: JoinHandle<()>) -> bool {
    match handle.join() {
        Ok(()) => true,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            warn!(run_id, %reason, "sampler thread panicked");
            false
        }
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.cancel();
    }
}
