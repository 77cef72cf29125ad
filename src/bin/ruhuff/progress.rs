//! A progress monitor for reading the input of a compression/decompression run
//!
//! This implementation relies heavily on the `indicatif` crate, see <https://docs.rs/indicatif>

use std::io::Read;

use indicatif::{HumanBytes, HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

/// A generic wrapper around a reader that keeps track of how many bytes have been read
/// from the total.
pub struct ProgressMonitor<R: Read> {
    /// The total amount that the reader will read
    pub total: u64,
    /// Amount read so far
    pub read: u64,
    /// The internal reader
    reader: R,
    progress_bar: ProgressBar,
}

impl<R: Read> ProgressMonitor<R> {
    /// Create a new progress monitor, initialized with zero bytes read. With `hidden`
    /// set nothing is drawn.
    pub fn new(reader: R, size: u64, hidden: bool) -> Self {
        // https://docs.rs/indicatif/latest/indicatif/index.html#templates
        let style = ProgressStyle::with_template(
            "{wide_bar} {binary_bytes}/{binary_total_bytes} read  [{eta} left]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        let progress_bar = ProgressBar::new(size).with_style(style);
        if hidden {
            progress_bar.set_draw_target(ProgressDrawTarget::hidden());
        } else {
            // The default is 20hz, this reduces rendering overhead
            progress_bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(8));
        }
        Self {
            reader,
            total: size,
            read: 0,
            progress_bar,
        }
    }

    /// Called after every read, advances the bar and reports once the input is used up
    fn update(&mut self, delta: u64) {
        self.progress_bar.inc(delta);
        if delta == 0 && !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
            let elapsed = self.progress_bar.elapsed();
            let per_second = self.read as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
            info!(
                "read {} of {} in {} ({}/s avg)",
                HumanBytes(self.read),
                HumanBytes(self.total),
                HumanDuration(elapsed),
                HumanBytes(per_second as u64)
            );
        }
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        // Fall back on the internally stored reader, but filch the number of bytes read
        // along the way
        let out = self.reader.read(buf)?;
        self.read += out as u64;
        self.update(out as u64);
        Ok(out)
    }
}
