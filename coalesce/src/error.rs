//! Error types and result definitions for coalescing operations.
//!
//! Provides an error system with classification and captured diagnostic metadata for
//! the merge engine and its boundaries. The merge computation itself never fails (all
//! edge conditions collapse to conservative defaults), so [`CoalesceError`] surfaces
//! only at the edges: reading documents, converting values, loading configuration.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Convenient result type for coalescing operations using [`CoalesceError`] as the error type.
pub type CoalesceResult<T> = Result<T, CoalesceError>;

/// Specific categories of errors that can occur around the merge engine.
///
/// Error kinds are organized by functional area. The merge computation proper produces
/// none of them; they classify boundary failures so callers can decide how to react.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // Configuration errors
    ConfigError,

    // Data & conversion errors
    InvalidData,
    ConversionError,

    // IO & serialization errors
    IoError,
    SerializationError,
    DeserializationError,

    // Unknown / uncategorized
    Unknown,
}

/// Main error type for coalescing operations.
///
/// [`CoalesceError`] carries an [`ErrorKind`], a static description, optional dynamic
/// detail, an optional source error, and the callsite location plus backtrace captured
/// at construction time.
#[derive(Debug, Clone)]
pub struct CoalesceError {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
    backtrace: Arc<Backtrace>,
}

impl CoalesceError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the captured backtrace for this error.
    pub fn backtrace(&self) -> &Backtrace {
        self.backtrace.as_ref()
    }

    /// Returns the captured callsite location for this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Attaches an originating [`error::Error`] to this error and returns the modified instance.
    ///
    /// The stored source is preserved across clones and exposed via [`error::Error::source`].
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Creates a [`CoalesceError`] from its components.
    #[track_caller]
    fn from_components(
        kind: ErrorKind,
        description: Cow<'static, str>,
        detail: Option<Cow<'static, str>>,
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    ) -> Self {
        CoalesceError {
            kind,
            description,
            detail,
            source,
            location: Location::caller(),
            backtrace: Arc::new(Backtrace::capture()),
        }
    }
}

impl PartialEq for CoalesceError {
    fn eq(&self, other: &CoalesceError) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for CoalesceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "[{:?}] {} @ {}:{}:{}",
            self.kind,
            self.description,
            self.location.file(),
            self.location.line(),
            self.location.column()
        )?;

        write_detail(self.detail.as_deref(), f, 1)?;
        write_backtrace(self.backtrace.as_ref(), f, 1)?;

        Ok(())
    }
}

impl error::Error for CoalesceError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source as &(dyn error::Error + 'static))
    }
}

/// Writes the captured backtrace with indentation.
fn write_backtrace(backtrace: &Backtrace, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    let indent_str = "  ".repeat(indent);

    let rendered_backtrace = format!("{backtrace}");
    if !rendered_backtrace.trim().is_empty() {
        write!(f, "\n{indent_str}Backtrace:")?;
        for line in rendered_backtrace.lines() {
            if line.trim().is_empty() {
                write!(f, "\n{indent_str}  ")?;
            } else {
                write!(f, "\n{indent_str}  {line}")?;
            }
        }
    }

    Ok(())
}

/// Writes the detail block with indentation.
fn write_detail(detail: Option<&str>, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    if let Some(detail) = detail {
        let indent_str = "  ".repeat(indent);
        if detail.trim().is_empty() {
            write!(f, "\n{indent_str}Detail: <empty>")?;
        } else {
            write!(f, "\n{indent_str}Detail:")?;
            for line in detail.lines() {
                if line.trim().is_empty() {
                    write!(f, "\n{indent_str}  ")?;
                } else {
                    write!(f, "\n{indent_str}  {line}")?;
                }
            }
        }
    }

    Ok(())
}

/// Creates a [`CoalesceError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for CoalesceError {
    #[track_caller]
    fn from((kind, desc): (ErrorKind, &'static str)) -> CoalesceError {
        CoalesceError::from_components(kind, Cow::Borrowed(desc), None, None)
    }
}

/// Creates a [`CoalesceError`] from an error kind, static description, and dynamic detail.
impl<D> From<(ErrorKind, &'static str, D)> for CoalesceError
where
    D: Into<Cow<'static, str>>,
{
    #[track_caller]
    fn from((kind, desc, detail): (ErrorKind, &'static str, D)) -> CoalesceError {
        CoalesceError::from_components(kind, Cow::Borrowed(desc), Some(detail.into()), None)
    }
}

/// Converts [`std::io::Error`] to [`CoalesceError`] with [`ErrorKind::IoError`].
impl From<std::io::Error> for CoalesceError {
    #[track_caller]
    fn from(err: std::io::Error) -> CoalesceError {
        let detail = err.to_string();
        let source = Arc::new(err);
        CoalesceError::from_components(
            ErrorKind::IoError,
            Cow::Borrowed("I/O operation failed"),
            Some(Cow::Owned(detail)),
            Some(source),
        )
    }
}

/// Converts [`serde_json::Error`] to [`CoalesceError`] with the appropriate error kind.
///
/// Maps to [`ErrorKind::SerializationError`] for serialization failures and
/// [`ErrorKind::DeserializationError`] for deserialization failures based on error
/// classification.
impl From<serde_json::Error> for CoalesceError {
    #[track_caller]
    fn from(err: serde_json::Error) -> CoalesceError {
        let (kind, description) = match err.classify() {
            serde_json::error::Category::Io => (ErrorKind::IoError, "JSON I/O operation failed"),
            serde_json::error::Category::Syntax
            | serde_json::error::Category::Data
            | serde_json::error::Category::Eof => (
                ErrorKind::DeserializationError,
                "JSON deserialization failed",
            ),
        };

        let detail = err.to_string();
        let source = Arc::new(err);
        CoalesceError::from_components(
            kind,
            Cow::Borrowed(description),
            Some(Cow::Owned(detail)),
            Some(source),
        )
    }
}
