use std::fmt::Display;

use tracing::debug;

pub trait ResultExt<T, E> {
    /// Turn the error into a variant that carries its message
    ///
    /// # Example
    /// ```rust
    /// use tagkit_util::result_ext::ResultExt;
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// enum WriteError {
    ///     #[error("write failed: {0}")]
    ///     Failed(String),
    /// }
    ///
    /// fn commit() -> Result<(), WriteError> {
    ///     "x".parse::<u8>().map_err_str(WriteError::Failed)?;
    ///     Ok(())
    /// }
    ///
    /// assert!(commit().is_err());
    /// ```
    fn map_err_str<F, G>(self, f: G) -> Result<T, F>
    where
        E: Display,
        G: FnOnce(String) -> F;

    /// Drop the error after logging it, for best effort paths where a failure just means "nothing"
    fn ok_or_debug(self, context: &str) -> Option<T>
    where
        E: Display;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_err_str<F, G>(self, f: G) -> Result<T, F>
    where
        E: Display,
        G: FnOnce(String) -> F,
    {
        self.map_err(|e| f(e.to_string()))
    }

    fn ok_or_debug(self, context: &str) -> Option<T>
    where
        E: Display,
    {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                debug!("{context}: {error}");
                None
            }
        }
    }
}
