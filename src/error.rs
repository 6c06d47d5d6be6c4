use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Fatal, construction-time errors in the problem model.
///
/// Unsatisfiable outcomes are not errors; solvers report those through their
/// success flag.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("variable `{0}` is already declared")]
    DuplicateVariable(String),
    #[error("constraint scope is empty")]
    EmptyScope,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<ModelError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<ModelError> for Error {
    fn from(inner: ModelError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
