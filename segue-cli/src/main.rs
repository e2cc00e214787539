//! `segue-replay`: drive a headless timeline from a recorded interaction log
//! and print every host event as one JSON line.
//!
//! ```text
//! segue-replay [-v] <log.jsonl> [--duration SECS] [--px-per-sec PX] [--viewport PX]
//! ```

use std::fs::File;
use std::path::PathBuf;

use segue_core::config::Config;
use segue_core::headless::{ManualTransport, StaticSurface};
use segue_core::interaction_log::{apply_record, default_log_path, read_interaction_log, LogRecord};
use segue_core::timeline::Timeline;

const DEFAULT_DURATION: f64 = 60.0;
const DEFAULT_PX_PER_SEC: f64 = 20.0;

/// Flags that take a value.
const VALUE_FLAGS: &[&str] = &["--duration", "--px-per-sec", "--viewport"];

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("segue")
        .join("segue-replay.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path)
        .or_else(|_| File::create(std::env::temp_dir().join("segue-replay.log")))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("segue-replay: logging disabled: {}", e);
            return;
        }
    };

    if WriteLogger::init(log_level, Config::default(), log_file).is_err() {
        eprintln!("segue-replay: logger already initialized");
        return;
    }

    log::info!("segue-replay starting (log level: {:?})", log_level);
}

fn flag_value(args: &[String], flag: &str) -> Option<f64> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .filter(|v: &f64| v.is_finite() && *v > 0.0)
}

/// First argument that is neither a flag nor a flag's value.
fn script_path(args: &[String]) -> Option<PathBuf> {
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return Some(PathBuf::from(arg));
    }
    None
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    let path = script_path(&args).unwrap_or_else(default_log_path);
    let duration = flag_value(&args, "--duration").unwrap_or(DEFAULT_DURATION);
    let px_per_sec = flag_value(&args, "--px-per-sec").unwrap_or(DEFAULT_PX_PER_SEC);

    let surface = match flag_value(&args, "--viewport") {
        Some(viewport) => StaticSurface::scrolling(duration, px_per_sec, viewport),
        None => StaticSurface::fit(duration, px_per_sec),
    };

    let config = Config::load();
    let mut timeline = Timeline::new(
        ManualTransport::new(duration),
        surface,
        config.timeline_options(),
    );
    timeline.on(|event| match serde_json::to_string(event) {
        Ok(line) => println!("{}", line),
        Err(e) => log::warn!(target: "replay", "unserializable event {:?}: {}", event, e),
    });

    let records = match read_interaction_log(&path) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("segue-replay: {}", e);
            std::process::exit(1);
        }
    };

    for record in &records {
        // Ticks stand in for the transport clock: the loop check reads it.
        if let LogRecord::Tick { time } = record {
            timeline.transport_mut().time = *time;
        }
        apply_record(&mut timeline, record);
    }
    log::info!(
        "replayed {} records from {} (scroll offset {:.1}px)",
        records.len(),
        path.display(),
        timeline.surface().scroll
    );

    timeline.destroy();
    Ok(())
}
