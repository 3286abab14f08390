use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::debug;

use super::core::EngineCore;
use super::types::EngineCmd;

/// Spawn the engine thread.
///
/// The core is built inside the thread because audio output handles are
/// not `Send`. The loop drains commands and treats `recv_timeout` expiry
/// as the sampling tick, so ticks keep firing while the channel is quiet
/// and commands are never delayed by a sleeping thread.
pub fn spawn_engine_thread<F>(
    build: F,
    rx: Receiver<EngineCmd>,
    tick: Duration,
) -> std::io::Result<JoinHandle<()>>
where
    F: FnOnce() -> EngineCore + Send + 'static,
{
    std::thread::Builder::new()
        .name("vivace-engine".to_string())
        .spawn(move || {
            let mut core = build();
            let mut last_tick = Instant::now();

            loop {
                match rx.recv_timeout(tick) {
                    Ok(EngineCmd::Quit) => break,
                    Ok(cmd) => core.apply(cmd),
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => {
                        debug!("engine command channel closed");
                        break;
                    }
                }

                let now = Instant::now();
                if now.duration_since(last_tick) >= tick {
                    core.tick(now.duration_since(last_tick).as_secs_f64());
                    last_tick = now;
                }
            }

            core.shutdown();
        })
}
