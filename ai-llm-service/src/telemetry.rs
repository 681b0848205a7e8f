use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Targets of the Librarian workspace crates.
pub const WORKSPACE_TARGETS: &[&str] = &[
    "librarian",
    "api",
    "contextor",
    "rag_store",
    "ai_llm_service",
];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

fn is_workspace_target(target: &str) -> bool {
    WORKSPACE_TARGETS
        .iter()
        .any(|p| target == *p || target.starts_with(&format!("{p}::")))
}

/// Formatting layer that renders ONLY events emitted by workspace crates.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with target and `file:line`
/// - Span close events (duration of instrumented calls)
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();
    let only_workspace = filter::filter_fn(|meta| is_workspace_target(meta.target()));

    let format = fmt::format()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_source_location(true)
        .with_ansi(use_ansi);

    fmt::layer()
        .event_format(format)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_filter(only_workspace)
}

/// Builds `<target>=<level>` directives for every workspace crate.
pub fn level_directives(level: Level) -> Vec<Directive> {
    let lvl = level.as_str().to_lowercase();
    WORKSPACE_TARGETS
        .iter()
        .filter_map(|t| Directive::from_str(&format!("{t}={lvl}")).ok())
        .collect()
}

/// `EnvFilter` from `RUST_LOG` or `default`, with workspace crates raised to `level`.
///
/// When `RUST_LOG` is set it wins entirely.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => level_directives(level)
            .into_iter()
            .fold(EnvFilter::new(default), |f, d| f.add_directive(d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_crate_roots_and_modules_only() {
        assert!(is_workspace_target("contextor"));
        assert!(is_workspace_target("rag_store::store"));
        assert!(!is_workspace_target("rag_storehouse"));
        assert!(!is_workspace_target("hyper::proto"));
    }

    #[test]
    fn one_directive_per_workspace_crate() {
        let d = level_directives(Level::DEBUG);
        assert_eq!(d.len(), WORKSPACE_TARGETS.len());
        assert!(d.iter().any(|x| x.to_string() == "api=debug"));
    }
}
