use std::error;
use std::fmt;
use std::io;

pub type Report<T> = Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    err: Option<io::Error>,
    message: String,
}

impl Error {
    pub fn new<U, M>(err: U, message: M) -> Self
    where
        U: Into<io::Error>,
        M: Into<String>,
    {
        Self {
            err: Some(err.into()),
            message: message.into(),
        }
    }

    pub fn message<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            err: None,
            message: message.into(),
        }
    }

    /// `true` if the underlying cause is a closed pipe, eg. `textlens run | head`.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(&self.err, Some(err) if err.kind() == io::ErrorKind::BrokenPipe)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(err) = &self.err {
            write!(f, ": {err}")?;
        }

        Ok(())
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.err.as_ref().map(|err| err as &(dyn error::Error + 'static))
    }
}

pub trait ErrorExt<T, E> {
    fn message(self, message: &str) -> Result<T, Error>
    where
        E: Into<io::Error>;

    fn with_message<F, M>(self, f: F) -> Result<T, Error>
    where
        E: Into<io::Error>,
        F: FnOnce() -> M,
        M: Into<String>;
}

impl<T, E> ErrorExt<T, E> for Result<T, E> {
    fn message(self, message: &str) -> Result<T, Error>
    where
        E: Into<io::Error>,
    {
        self.map_err(|err| Error::new(err, message))
    }

    fn with_message<F, M>(self, f: F) -> Result<T, Error>
    where
        E: Into<io::Error>,
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.map_err(|err| Error::new(err, f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_with_cause() {
        let res: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.message("failed to open file").unwrap_err();

        assert_eq!(err.to_string(), "failed to open file: gone");
        assert!(error::Error::source(&err).is_some());
        assert!(!err.is_broken_pipe());
    }

    #[test]
    fn message_only() {
        let err = Error::message("nothing to serve");

        assert_eq!(err.to_string(), "nothing to serve");
        assert!(error::Error::source(&err).is_none());
    }

    #[test]
    fn broken_pipe() {
        let res: Result<(), io::Error> = Err(io::ErrorKind::BrokenPipe.into());

        assert!(res
            .with_message(|| format!("failed to write {}", "stdout"))
            .unwrap_err()
            .is_broken_pipe());
    }
}
