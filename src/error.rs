//! Error and diagnostic types.
//!
//! Three layers:
//!   - `ResourceError`: failures of the resource cache (fetch / parse / registry).
//!   - `ViewerError`: fatal-to-render failures; the viewer shows `messages()`
//!     instead of content.
//!   - `Diagnostic`: recoverable problems. Rendering continues with a fallback
//!     and the message is listed under the pathway.

use serde_json::Value;
use thiserror::Error;

// ─── ResourceError ────────────────────────────────────────────────────────────

/// A failure to obtain a JSON document from the resource cache.
///
/// Every variant carries the same payload: a main message, a list of
/// sub-errors, and the raw response (or parse context) for logging.
#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    #[error("{main_error}")]
    Fetch {
        main_error: String,
        error_list: Vec<String>,
        raw: Value,
    },
    #[error("{main_error}")]
    Parse {
        main_error: String,
        error_list: Vec<String>,
        raw: Value,
    },
    #[error("{main_error}")]
    Registry {
        main_error: String,
        error_list: Vec<String>,
        raw: Value,
    },
}

impl ResourceError {
    pub fn fetch(uri: &str, raw: Value) -> Self {
        Self::Fetch {
            main_error: format!("Error loading data for Resource URI: {uri}"),
            error_list: Vec::new(),
            raw,
        }
    }

    pub fn parse(uri: &str, raw: Value) -> Self {
        Self::Parse {
            main_error: format!("Error parsing data for Resource URI: {uri}"),
            error_list: Vec::new(),
            raw,
        }
    }

    pub fn registry(uri: &str, error_list: Vec<String>, raw: Value) -> Self {
        Self::Registry {
            main_error: format!("One or more errors encountered for Resource URI: {uri}"),
            error_list,
            raw,
        }
    }

    pub fn main_error(&self) -> &str {
        match self {
            Self::Fetch { main_error, .. }
            | Self::Parse { main_error, .. }
            | Self::Registry { main_error, .. } => main_error,
        }
    }

    pub fn error_list(&self) -> &[String] {
        match self {
            Self::Fetch { error_list, .. }
            | Self::Parse { error_list, .. }
            | Self::Registry { error_list, .. } => error_list,
        }
    }

    pub fn raw_error(&self) -> &Value {
        match self {
            Self::Fetch { raw, .. } | Self::Parse { raw, .. } | Self::Registry { raw, .. } => raw,
        }
    }

    /// `[main_error, ...error_list]`, the message list shown in place of content.
    pub fn messages(&self) -> Vec<String> {
        std::iter::once(self.main_error().to_string())
            .chain(self.error_list().iter().cloned())
            .collect()
    }
}

// ─── ViewerError ──────────────────────────────────────────────────────────────

/// Errors that stop a viewer from rendering anything but its message list.
#[derive(Debug, Clone, Error)]
pub enum ViewerError {
    #[error("No ceterms:Pathway object found for Pathway {pathway_uri}")]
    MissingPathway { pathway_uri: String },

    #[error("No Destination Component found for this Pathway.")]
    MissingDestination { pathway_id: String },

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl ViewerError {
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Resource(err) => err.messages(),
            other => vec![other.to_string()],
        }
    }
}

/// Failure to place a node into the layout; reported as a diagnostic.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Unable to find rendered Progression Level for Component {ctid}.")]
    UnresolvedLevel { ctid: String, level: Option<String> },
}

// ─── Diagnostics ──────────────────────────────────────────────────────────────

/// Category of a recoverable problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    MissingProgressionModel,
    ProgressionModelLoad,
    MissingTopLevels,
    MissingLevels,
    UnknownTopLevel,
    InvalidLevelReference,
    LevelCycle,
    PrecedenceCycle,
    UnresolvedLevel,
    UnresolvedTarget,
    UnresolvedCondition,
    DuplicateRender,
    OrphanComponent,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingProgressionModel => "missing-progression-model",
            DiagnosticKind::ProgressionModelLoad => "progression-model-load",
            DiagnosticKind::MissingTopLevels => "missing-top-levels",
            DiagnosticKind::MissingLevels => "missing-levels",
            DiagnosticKind::UnknownTopLevel => "unknown-top-level",
            DiagnosticKind::InvalidLevelReference => "invalid-level-reference",
            DiagnosticKind::LevelCycle => "level-cycle",
            DiagnosticKind::PrecedenceCycle => "precedence-cycle",
            DiagnosticKind::UnresolvedLevel => "unresolved-level",
            DiagnosticKind::UnresolvedTarget => "unresolved-target",
            DiagnosticKind::UnresolvedCondition => "unresolved-condition",
            DiagnosticKind::DuplicateRender => "duplicate-render",
            DiagnosticKind::OrphanComponent => "orphan-component",
        }
    }
}

/// A recoverable problem: a message plus context for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub context: Value,
}

/// Ordered collection of diagnostics for one viewer.
///
/// Every pushed diagnostic is also emitted as a `tracing` warning.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>, context: Value) {
        let message = message.into();
        tracing::warn!(kind = kind.as_str(), context = %context, "{message}");
        self.entries.push(Diagnostic {
            kind,
            message,
            context,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.message.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
