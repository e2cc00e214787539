//! Links playback time to interval `in`/`out` notifications.

use crate::store::IntervalStore;
use crate::transport::Transport;

/// Round to one decimal place. Comparisons at this precision keep float noise
/// at segment boundaries from firing `in`/`out` twice.
fn tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Default)]
pub struct PlaybackLinker {
    last_tick: Option<f64>,
}

impl PlaybackLinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounded time of the most recent tick.
    pub fn last_tick(&self) -> Option<f64> {
        self.last_tick
    }

    /// Process one playback tick.
    ///
    /// `time` is the tick's reported position. A looping interval that is
    /// exited restarts at its start only when the transport's actual current
    /// time is still inside the interval; a seek away from the segment is
    /// left alone.
    pub fn on_time_update(
        &mut self,
        time: f64,
        store: &mut IntervalStore,
        transport: &mut dyn Transport,
    ) {
        let time = tenths(time);
        self.last_tick = Some(time);

        for interval in store.iter_mut() {
            if !interval.is_linked() {
                continue;
            }
            let start = tenths(interval.start());
            let end = tenths(interval.end());

            if !interval.fired_out() && interval.fired_in() && (start > time || end <= time) {
                interval.exit();
                if interval.looping() {
                    let real = transport.current_time();
                    if real >= interval.start() && real <= interval.end() {
                        log::debug!(target: "playback", "looping {} from {:.2}s", interval.id(), interval.start());
                        transport.play(interval.start(), None);
                    }
                }
            }
            if !interval.fired_in() && start <= time && end > time {
                interval.enter();
            }
        }
    }

    /// Forget entered/exited state, e.g. after teardown or a stop.
    pub fn reset(&mut self, store: &mut IntervalStore) {
        self.last_tick = None;
        for interval in store.iter_mut() {
            interval.reset_link();
        }
    }
}
