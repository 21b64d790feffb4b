//! Tracing output rendered as workflow commands
//!
//! The runner turns `::debug::`, `::warning::` and `::error::` lines into
//! collapsed debug output and annotations. [`WorkflowCommandFormat`] maps
//! tracing levels onto those commands so actions can log with the normal
//! `tracing` macros.
//!
//! | Level | Rendered as |
//! |-------|-------------|
//! | TRACE, DEBUG | `::debug::message` |
//! | INFO | `message` |
//! | WARN | `::warning::message` |
//! | ERROR | `::error::message` |

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::commands::issue_command;

/// Filter used when `RUST_LOG` is not set
///
/// Debug output is limited to the workspace crates; dependencies log at info.
pub const DEFAULT_FILTER: &str = "info,ghactions=debug,ghactions_cli=debug,\
ghactions_core=debug,ghactions_concurrency=debug,ghactions_github=debug,\
ghactions_toolcache=debug,ghactions_executor=debug";

/// `RUST_LOG` if set and valid, [`DEFAULT_FILTER`] otherwise
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing workflow commands to stdout
pub fn init() {
    let filter = env_filter();
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .event_format(WorkflowCommandFormat)
        .try_init()
    {
        eprintln!("tracing init failed: {err}");
    }
}

/// Event formatter producing one workflow command per event
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowCommandFormat;

impl<S, N> FormatEvent<S, N> for WorkflowCommandFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        writeln!(
            writer,
            "{}",
            render(event.metadata().level(), &visitor.finish())
        )
    }
}

/// Render a message for the given level
pub fn render(level: &Level, text: &str) -> String {
    match *level {
        Level::TRACE | Level::DEBUG => issue_command("debug", &[], text),
        Level::INFO => text.to_string(),
        Level::WARN => issue_command("warning", &[], text),
        Level::ERROR => issue_command("error", &[], text),
    }
}

/// Collects the message and appends other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}
