use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

/// Diagnostics go to stderr; stdout is reserved for result lines.
pub fn init_logging() {
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(ProbeFormatter)
        .init();
}

type Paint = fn(ColoredString) -> ColoredString;

/// Symbol and color for a level. Anything below DEBUG is only visible with
/// `RUST_LOG` and gets the plain dimmed marker.
fn level_style(level: &Level) -> (&'static str, Paint) {
    match *level {
        Level::ERROR => ("[-]", |s| s.red().bold()),
        Level::WARN => ("[*]", |s| s.yellow().bold()),
        Level::INFO => ("[+]", |s| s.green().bold()),
        Level::DEBUG => ("[?]", |s| s.blue()),
        _ => ("[ ]", |s| s.dimmed()),
    }
}

pub struct ProbeFormatter;

impl<S, N> FormatEvent<S, N> for ProbeFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let (symbol, color_func) = level_style(meta.level());

        write!(writer, "{} {} ", color_func(symbol.into()), meta.target().dimmed())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
