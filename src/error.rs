use thiserror::Error;

/// Errors reported to a user driving a [`Session`].
///
/// The trees themselves are infallible; these cover input validation and
/// requests that do not apply to the current session state.
///
/// [`Session`]: crate::Session
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("please enter a value")]
    Empty,
    #[error("please enter a valid number (got {0:?})")]
    InvalidNumber(String),
    #[error("value not found")]
    NotFound,
    #[error("no search in progress")]
    NoActiveSearch,
}

/// Parse user input into a tree key.
pub(crate) fn parse_key(input: &str) -> Result<i64, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::Empty);
    }

    input
        .parse()
        .map_err(|_| InputError::InvalidNumber(input.to_string()))
}
