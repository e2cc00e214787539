use std::path::{Path, PathBuf};

use serde::Deserialize;

use segue_types::{IntervalParams, SnapGrid};

use crate::interval::DEFAULT_SCROLL_SPEED;
use crate::selection::{SelectionOptions, DEFAULT_SCROLL_THRESHOLD, DEFAULT_SLOP};
use crate::store::StoreDefaults;
use crate::timeline::{TimelineOptions, DEFAULT_MARKER_WIDTH_PX};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    selection: SelectionConfig,
    #[serde(default)]
    scroll: ScrollConfig,
    #[serde(default)]
    snap: SnapConfig,
    #[serde(default)]
    intervals: IntervalsConfig,
}

#[derive(Deserialize, Default)]
struct SelectionConfig {
    enabled: Option<bool>,
    slop: Option<u32>,
}

#[derive(Deserialize, Default)]
struct ScrollConfig {
    enabled: Option<bool>,
    speed: Option<f64>,
    threshold: Option<f64>,
    edge_width: Option<f64>,
}

#[derive(Deserialize, Default)]
struct SnapConfig {
    interval: Option<f64>,
    offset: Option<f64>,
}

#[derive(Deserialize, Default)]
struct IntervalsConfig {
    max_count: Option<usize>,
    min_length: Option<f64>,
    marker_width_px: Option<f64>,
    color: Option<String>,
}

pub struct Config {
    selection: SelectionConfig,
    scroll: ScrollConfig,
    snap: SnapConfig,
    intervals: IntervalsConfig,
}

impl Config {
    /// Embedded defaults merged with `~/.config/segue/config.toml`.
    pub fn load() -> Self {
        Self::load_from(user_config_path().as_deref())
    }

    /// Embedded defaults merged with the override at `path`, when it exists.
    /// An unreadable or malformed override is logged and ignored.
    pub fn load_from(path: Option<&Path>) -> Self {
        let mut base = embedded();

        if let Some(path) = path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => merge(&mut base, user),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Self::from_file(base)
    }

    /// Embedded defaults merged with an override given as TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let mut base = embedded();
        let user: ConfigFile = toml::from_str(contents)?;
        merge(&mut base, user);
        Ok(Self::from_file(base))
    }

    fn from_file(file: ConfigFile) -> Self {
        Config {
            selection: file.selection,
            scroll: file.scroll,
            snap: file.snap,
            intervals: file.intervals,
        }
    }

    pub fn drag_selection_enabled(&self) -> bool {
        self.selection.enabled.unwrap_or(false)
    }

    pub fn slop(&self) -> u32 {
        self.selection.slop.unwrap_or(DEFAULT_SLOP)
    }

    pub fn scroll_enabled(&self) -> bool {
        self.scroll.enabled.unwrap_or(true)
    }

    /// Autoscroll speed in pixels per frame. Non-positive values fall back to
    /// the default.
    pub fn scroll_speed(&self) -> f64 {
        self.scroll
            .speed
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(DEFAULT_SCROLL_SPEED)
    }

    pub fn scroll_threshold(&self) -> f64 {
        self.scroll
            .threshold
            .filter(|t| t.is_finite() && *t >= 0.0)
            .unwrap_or(DEFAULT_SCROLL_THRESHOLD)
    }

    /// Interval edge band in pixels; `None` leaves the choice to the timeline.
    pub fn edge_scroll_width(&self) -> Option<f64> {
        self.scroll
            .edge_width
            .filter(|w| w.is_finite() && *w >= 0.0)
    }

    pub fn snap(&self) -> SnapGrid {
        SnapGrid {
            interval: self.snap.interval.filter(|g| g.is_finite() && *g > 0.0),
            offset: self
                .snap
                .offset
                .filter(|o| o.is_finite())
                .unwrap_or(0.0),
        }
    }

    /// Maximum number of intervals. Zero means unlimited.
    pub fn max_count(&self) -> Option<usize> {
        self.intervals.max_count.filter(|n| *n > 0)
    }

    pub fn min_length(&self) -> Option<f64> {
        self.intervals
            .min_length
            .filter(|m| m.is_finite() && *m > 0.0)
    }

    pub fn marker_width_px(&self) -> f64 {
        self.intervals
            .marker_width_px
            .filter(|w| w.is_finite() && *w >= 0.0)
            .unwrap_or(DEFAULT_MARKER_WIDTH_PX)
    }

    pub fn color(&self) -> Option<&str> {
        self.intervals.color.as_deref()
    }

    pub fn selection_options(&self) -> SelectionOptions {
        SelectionOptions {
            params: IntervalParams::default(),
            slop: self.slop(),
            scroll: self.scroll_enabled(),
            scroll_speed: self.scroll_speed(),
            scroll_threshold: self.scroll_threshold(),
        }
    }

    pub fn store_defaults(&self) -> StoreDefaults {
        StoreDefaults {
            snap: self.snap(),
            min_length: self.min_length(),
            scroll: Some(self.scroll_enabled()),
            edge_scroll_width: self.edge_scroll_width(),
            scroll_speed: Some(self.scroll_speed()),
            color: self.color().map(str::to_string),
            time_format: None,
        }
    }

    pub fn timeline_options(&self) -> TimelineOptions {
        TimelineOptions {
            intervals: Vec::new(),
            drag_selection: self
                .drag_selection_enabled()
                .then(|| self.selection_options()),
            defaults: self.store_defaults(),
            max_count: self.max_count(),
            marker_width_px: self.marker_width_px(),
        }
    }
}

fn embedded() -> ConfigFile {
    match toml::from_str(DEFAULT_CONFIG) {
        Ok(file) => file,
        Err(e) => {
            log::error!(target: "config", "embedded config.toml is malformed: {}", e);
            ConfigFile::default()
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("segue").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    merge_selection(&mut base.selection, user.selection);
    merge_scroll(&mut base.scroll, user.scroll);
    merge_snap(&mut base.snap, user.snap);
    merge_intervals(&mut base.intervals, user.intervals);
}

fn merge_selection(base: &mut SelectionConfig, user: SelectionConfig) {
    if user.enabled.is_some() {
        base.enabled = user.enabled;
    }
    if user.slop.is_some() {
        base.slop = user.slop;
    }
}

fn merge_scroll(base: &mut ScrollConfig, user: ScrollConfig) {
    if user.enabled.is_some() {
        base.enabled = user.enabled;
    }
    if user.speed.is_some() {
        base.speed = user.speed;
    }
    if user.threshold.is_some() {
        base.threshold = user.threshold;
    }
    if user.edge_width.is_some() {
        base.edge_width = user.edge_width;
    }
}

fn merge_snap(base: &mut SnapConfig, user: SnapConfig) {
    if user.interval.is_some() {
        base.interval = user.interval;
    }
    if user.offset.is_some() {
        base.offset = user.offset;
    }
}

fn merge_intervals(base: &mut IntervalsConfig, user: IntervalsConfig) {
    if user.max_count.is_some() {
        base.max_count = user.max_count;
    }
    if user.min_length.is_some() {
        base.min_length = user.min_length;
    }
    if user.marker_width_px.is_some() {
        base.marker_width_px = user.marker_width_px;
    }
    if user.color.is_some() {
        base.color = user.color;
    }
}
