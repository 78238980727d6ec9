// ui.rs

use crate::config::NUM_CHANNELS;
use crate::display;
use crate::driver::WallClock;
use crate::SharedEngine;
use indicatif::ProgressDrawTarget;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::thread;
use std::time::Duration;

/// Display refresh interval; deliberately slow and untied to edges.
const REFRESH_MS: u64 = 500;

fn create_tempo_spinner(multi_progress: &MultiProgress) -> ProgressBar {
    let pb = multi_progress.add(ProgressBar::new_spinner());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.dim} {spinner} {wide_msg}")
            .unwrap(),
    );
    pb.set_prefix("Tempo");
    pb
}

fn create_channel_line(multi_progress: &MultiProgress, idx: usize) -> ProgressBar {
    let pb = multi_progress.add(ProgressBar::new_spinner());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{prefix:.bold} {wide_msg}")
            .unwrap(),
    );
    pb.set_prefix(format!("Out {}", idx + 1));
    pb
}

/// Terminal inspector: renders the display snapshot every 500 ms. Reads
/// only the snapshot plus the output line states; it never drives the
/// engine.
pub struct Inspector {
    engine: SharedEngine,
    clock: WallClock,

    #[allow(dead_code)]
    multi_progress: MultiProgress,
    tempo_pb: ProgressBar,
    channel_pbs: Vec<ProgressBar>,
}

impl Inspector {
    pub fn new(engine: SharedEngine, clock: WallClock) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());
        let tempo_pb = create_tempo_spinner(&multi_progress);
        let channel_pbs = (0..NUM_CHANNELS)
            .map(|idx| create_channel_line(&multi_progress, idx))
            .collect();

        Inspector {
            engine,
            clock,
            multi_progress,
            tempo_pb,
            channel_pbs,
        }
    }

    pub fn run(&self) {
        loop {
            thread::sleep(Duration::from_millis(REFRESH_MS));
            let now = self.clock.now_ms();

            let (snapshot, outputs) = match self.engine.lock() {
                Ok(engine) => (display::snapshot(&engine, now), engine.outputs()),
                Err(_) => continue,
            };

            self.tempo_pb
                .set_message(format!("BPM: {}", snapshot.bpm_label));
            self.tempo_pb.tick();

            for (idx, pb) in self.channel_pbs.iter().enumerate() {
                let line = if outputs[idx] { "●" } else { "○" };
                pb.set_message(format!("{} {}", snapshot.channel_labels[idx], line));
                pb.tick();
            }
        }
    }
}
