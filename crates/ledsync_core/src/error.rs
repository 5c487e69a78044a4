use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Convenient result alias for ledsync_core.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Log/handling importance. Maps onto `tracing` levels in the adapter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Where an error came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    Pulse,
    Gpio,
    Config,
    Transport,
    Other,
}

/// Stable error "kind" for matching/branching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    Unavailable,
    Hardware,
    Transport,
    Other,
}

/// Optional structured payload.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Generic key/value context.
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// GPIO line offset on the chip the error refers to.
    Line { offset: u32 },
}

/// The one error type that crosses module boundaries in ledsync_core.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}")]
pub struct CoreError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
}

impl CoreError {
    // ---------------- Fluent entry points ----------------

    #[inline]
    pub fn error() -> ErrB {
        ErrB::new(Severity::Error)
    }
    #[inline]
    pub fn fatal() -> ErrB {
        ErrB::new(Severity::Fatal)
    }

    /// Invalid configuration value, tagged with the parameter name.
    pub fn invalid_param(name: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        CoreError::fatal()
            .domain(Domain::Config)
            .kind(ErrorKind::InvalidArgument)
            .msg(message)
            .payload(Payload::Context {
                key: "param",
                value: name.into(),
            })
            .build()
    }

    /// A GPIO line could not be driven to the requested level.
    pub fn line_write(offset: u32, high: bool, cause: impl fmt::Display) -> Self {
        let level = if high { "HIGH" } else { "LOW" };
        CoreError::error()
            .domain(Domain::Gpio)
            .kind(ErrorKind::Hardware)
            .msgf(format_args!(
                "failed to set GPIO line {offset} to {level}: {cause}"
            ))
            .payload(Payload::Line { offset })
            .build()
    }
}

/// Fluent builder (takes self, returns Self).
/// Defaults:
/// - domain = Other
/// - kind = Other
/// - message = ""
/// - payload = None
#[derive(Debug, Clone)]
pub struct ErrB {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl ErrB {
    #[inline]
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    #[inline]
    pub fn domain(mut self, d: Domain) -> Self {
        self.domain = d;
        self
    }

    #[inline]
    pub fn kind(mut self, k: ErrorKind) -> Self {
        self.kind = k;
        self
    }

    #[inline]
    pub fn msg(mut self, m: impl Into<Cow<'static, str>>) -> Self {
        self.message = m.into();
        self
    }

    /// Formatting-friendly message setter.
    #[inline]
    pub fn msgf(mut self, args: fmt::Arguments<'_>) -> Self {
        self.message = Cow::Owned(args.to_string());
        self
    }

    /// Replaces any previous payload.
    #[inline]
    pub fn payload(mut self, p: Payload) -> Self {
        self.payload = p;
        self
    }

    #[inline]
    pub fn build(self) -> CoreError {
        CoreError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_other() {
        let e = CoreError::error().msg("x").build();
        assert_eq!(e.domain, Domain::Other);
        assert_eq!(e.kind, ErrorKind::Other);
        assert_eq!(e.severity, Severity::Error);
        assert_eq!(e.payload, Payload::None);
    }

    #[test]
    fn line_write_carries_offset_and_level() {
        let e = CoreError::line_write(85, true, "EBUSY");
        assert_eq!(e.domain, Domain::Gpio);
        assert_eq!(e.payload, Payload::Line { offset: 85 });
        assert!(e.to_string().contains("GPIO line 85 to HIGH"));
    }

    #[test]
    fn invalid_param_is_fatal_config_error() {
        let e = CoreError::invalid_param("gpio_delay", "must be positive");
        assert_eq!(e.severity, Severity::Fatal);
        assert_eq!(e.domain, Domain::Config);
        match e.payload {
            Payload::Context { key, value } => {
                assert_eq!(key, "param");
                assert_eq!(value, "gpio_delay");
            }
            _ => panic!("expected Context payload"),
        }
    }
}
