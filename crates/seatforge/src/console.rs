//! Colorful console output for generation runs.
//!
//! Provides a custom `tracing` layer that formats generation events with
//! colors.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. Leaves an
/// already installed global subscriber in place.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "seatforge_solver=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(GenerationConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats generation events with colors.
pub struct GenerationConsoleLayer;

impl<S: Subscriber> Layer<S> for GenerationConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("seatforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_generation_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    guest_count: Option<u64>,
    table_count: Option<u64>,
    group_count: Option<u64>,
    max_attempts: Option<u64>,
    target_plans: Option<u64>,
    seed: Option<u64>,
    plans: Option<u64>,
    attempts: Option<u64>,
    attempt: Option<u64>,
    duration_ms: Option<u64>,
    strategy: Option<String>,
    score: Option<String>,
    stage: Option<String>,
    reason: Option<String>,
}

impl EventVisitor {
    fn set_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "strategy" => self.strategy = Some(value),
            "score" => self.score = Some(value),
            "stage" => self.stage = Some(value),
            "reason" => self.reason = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field, s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "guest_count" => self.guest_count = Some(value),
            "table_count" => self.table_count = Some(value),
            "group_count" => self.group_count = Some(value),
            "max_attempts" => self.max_attempts = Some(value),
            "target_plans" => self.target_plans = Some(value),
            "seed" => self.seed = Some(value),
            "plans" => self.plans = Some(value),
            "attempts" => self.attempts = Some(value),
            "attempt" => self.attempt = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field, value.to_string());
    }
}

fn format_generation_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "generation_start" => format_generation_start(v),
        "generation_end" => format_generation_end(v),
        "generation_aborted" => format_generation_aborted(v),
        "plan_accepted" => format_plan_accepted(v),
        _ => String::new(),
    }
}

fn format_generation_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} guests ({}), tables ({}), groups ({}), target ({} plans within {} attempts), seed ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Generator]".bright_cyan(),
        v.guest_count.unwrap_or(0).bright_yellow(),
        v.table_count.unwrap_or(0).bright_yellow(),
        v.group_count.unwrap_or(0).bright_yellow(),
        v.target_plans.unwrap_or(0).bright_magenta(),
        v.max_attempts.unwrap_or(0).bright_magenta(),
        v.seed.unwrap_or(0).white()
    )
}

fn format_generation_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Generation ended: plans ({}), attempts ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Generator]".bright_cyan(),
        v.plans.unwrap_or(0).bright_green().bold(),
        v.attempts.unwrap_or(0).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_generation_aborted(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Aborted while {}: {}",
        timestamp().bright_black(),
        "INFO".bright_red(),
        "[Generator]".bright_cyan(),
        v.stage.as_deref().unwrap_or("unknown").white().bold(),
        v.reason.as_deref().unwrap_or("").bright_red()
    )
}

fn format_plan_accepted(v: &EventVisitor) -> String {
    format!(
        "    {} Attempt {:>5} | {:<24} | score {}",
        "->".bright_blue(),
        v.attempt.unwrap_or(0).white(),
        v.strategy.as_deref().unwrap_or("?"),
        v.score.as_deref().unwrap_or("N/A").bright_green()
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("attempt_failed".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_generation_event(&visitor).is_empty());
    }

    #[test]
    fn test_end_event_mentions_plan_count() {
        let visitor = EventVisitor {
            event: Some("generation_end".to_string()),
            plans: Some(7),
            attempts: Some(120),
            duration_ms: Some(40),
            ..EventVisitor::default()
        };
        let line = format_generation_event(&visitor);
        assert!(line.contains("Generation ended"));
        assert!(line.contains("40ms"));
    }

    #[test]
    fn test_init_twice() {
        init();
        init();
    }
}
