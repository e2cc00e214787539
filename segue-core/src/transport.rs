//! Playback transport: the collaborator that owns media time.
//!
//! `Transport` captures what the interval core needs from a player (current
//! time, duration, a scoped play call) independently of how playback is done.
//! Time ticks flow the other way: the host forwards them to
//! [`Timeline::on_time_update`](crate::timeline::Timeline::on_time_update).

pub trait Transport {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Total media duration in seconds. May be zero while media is loading.
    fn duration(&self) -> f64;

    /// Start playback at `start`, optionally stopping at `end`.
    fn play(&mut self, start: f64, end: Option<f64>);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn duration(&self) -> f64 {
        (**self).duration()
    }

    fn play(&mut self, start: f64, end: Option<f64>) {
        (**self).play(start, end)
    }
}
