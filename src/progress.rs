//! Progress reporting for long-running flash operations.
//!
//! A thin wrapper over an indicatif bar, fed by the engine callbacks, that
//! also reports elapsed wall-clock time when the operation finishes.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::Progress;

pub struct OperationBar {
    bar: ProgressBar,
    started: Instant,
}

impl OperationBar {
    pub fn new(label: &str, total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(
                "{msg:8} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
        );
        bar.set_message(label.to_string());
        Self {
            bar,
            started: Instant::now(),
        }
    }

    pub fn update(&self, p: Progress) {
        if self.bar.length() != Some(p.total) {
            self.bar.set_length(p.total);
        }
        self.bar.set_position(p.current);
    }

    pub fn finish(&self) {
        self.bar.finish();
        println!("Elapsed time: {} seconds", self.started.elapsed().as_secs());
    }
}
