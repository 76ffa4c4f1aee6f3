//! Console output for optimizer events.
//!
//! Provides a `tracing` layer that prints `corefolio_solver` events as one
//! line each. Enabled by the `console` feature.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<bool> = OnceLock::new();

const TARGET: &str = "corefolio_solver";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// directives are honored on top of `corefolio_solver=info`.
///
/// Returns whether the console layer is active. When another global
/// subscriber was installed first, nothing is installed, a one-line notice
/// goes to stderr and every call returns `false`.
pub fn init() -> bool {
    *INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = format!("{}=info", TARGET).parse() {
            filter = filter.add_directive(directive);
        }

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(OptimizerConsoleLayer)
            .try_init()
            .is_ok();
        if !installed {
            eprintln!(
                "corefolio: a global tracing subscriber is already set, console output disabled"
            );
        }
        installed
    })
}

/// A tracing layer that formats optimizer events.
pub struct OptimizerConsoleLayer;

impl<S: Subscriber> Layer<S> for OptimizerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with(TARGET) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record(field, format_number(value));
    }
}

impl EventVisitor {
    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value.trim_matches('"').to_string()),
            name => self.fields.push((name, value)),
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    let label = match v.event.as_deref() {
        Some("optimize_start") => "Optimization started",
        Some("optimize_end") => "Optimization ended",
        Some("constraints_compiled") => "Constraints compiled",
        Some("solve_failed") => "Solve failed",
        Some(other) => other,
        None => return String::new(),
    };

    let mut line = format!("{:>5} [corefolio] {}", level.as_str(), label);
    for (i, (name, value)) in v.fields.iter().enumerate() {
        let separator = if i == 0 { ": " } else { ", " };
        let _ = write!(line, "{}{} ({})", separator, name, value.trim_matches('"'));
    }
    line
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.4}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test touching the global subscriber.
    #[test]
    fn test_init_yields_to_existing_subscriber() {
        assert!(tracing_subscriber::registry().try_init().is_ok());

        assert!(!init());
        assert!(!init());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(70.0), "70");
        assert_eq!(format_number(2.5), "2.5000");
    }

    #[test]
    fn test_events_without_name_are_skipped() {
        let visitor = EventVisitor::default();
        assert!(format_event(Level::INFO, &visitor).is_empty());
    }

    #[test]
    fn test_format_known_event() {
        let visitor = EventVisitor {
            event: Some("optimize_end".to_string()),
            fields: vec![("selected", "2".to_string()), ("objective", "70".to_string())],
        };
        assert_eq!(
            format_event(Level::INFO, &visitor),
            " INFO [corefolio] Optimization ended: selected (2), objective (70)"
        );
    }
}
