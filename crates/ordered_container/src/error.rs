use thiserror::Error;

/// Failure of a keyed operation.
///
/// Every variant leaves the map untouched when it returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// `get`, `get_mut` or `erase` was called with a key the map does not hold.
    #[error("key not found")]
    KeyNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;
