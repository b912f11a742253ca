use std::fmt;

/// Message severities reported to the document author.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Fatal => "fatal",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
    /// Markup of the offending element, when there is one.
    pub context: Option<String>,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Info => write!(f, "{}", self.text)?,
            Severity::Warning => write!(f, "WARNING: {}", self.text)?,
            Severity::Fatal => write!(f, "FATAL ERROR: {}", self.text)?,
        }
        if let Some(context) = &self.context {
            write!(f, "\n{context}")?;
        }
        Ok(())
    }
}

/// Author-facing diagnostics for one document pass.
///
/// Fatal messages are recorded, not raised: the pass keeps going so every
/// problem is surfaced, and the caller decides at the end whether output
/// may still be produced.
#[derive(Debug, Default)]
pub struct Messages {
    entries: Vec<Message>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(&mut self, text: impl Into<String>) {
        self.push(Severity::Info, text.into(), None);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.push(Severity::Warning, text.into(), None);
    }

    pub fn warn_at(&mut self, text: impl Into<String>, context: impl Into<String>) {
        self.push(Severity::Warning, text.into(), Some(context.into()));
    }

    pub fn die(&mut self, text: impl Into<String>) {
        self.push(Severity::Fatal, text.into(), None);
    }

    pub fn die_at(&mut self, text: impl Into<String>, context: impl Into<String>) {
        self.push(Severity::Fatal, text.into(), Some(context.into()));
    }

    fn push(&mut self, severity: Severity, text: String, context: Option<String>) {
        let message = Message {
            severity,
            text,
            context,
        };
        match severity {
            Severity::Info => log::info!(target: "specpress::messages", "{message}"),
            Severity::Warning => log::warn!(target: "specpress::messages", "{message}"),
            Severity::Fatal => log::error!(target: "specpress::messages", "{message}"),
        }
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }

    pub fn fatal_count(&self) -> usize {
        self.count(Severity::Fatal)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_fatal(&self) -> bool {
        self.fatal_count() > 0
    }

    /// Texts of all messages with the given severity, in report order.
    pub fn texts(&self, severity: Severity) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|m| m.severity == severity)
            .map(|m| m.text.as_str())
            .collect()
    }
}
