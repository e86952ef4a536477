//! Raw input for the blocking editor.
//!
//! The editor pulls one byte at a time through [`RawInput`]. [`IO`] adapts
//! any [`embedded_io::Read`] and, with feature `std`, [`std_sync`] wraps
//! stdin and stdout.
use embedded_io::Error;

use crate::error::LineEditError;

pub trait RawInput {
    /// Block until the next byte is available.
    fn next_byte(&mut self) -> Result<u8, LineEditError>;
}

/// IO wrapper for [`embedded_io::Read`]
pub struct IO<R>
where
    R: embedded_io::Read,
{
    input: R,
}

impl<R> IO<R>
where
    R: embedded_io::Read,
{
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Consume wrapper and return input
    pub fn take(self) -> R {
        self.input
    }
}

impl<R> RawInput for IO<R>
where
    R: embedded_io::Read,
{
    fn next_byte(&mut self) -> Result<u8, LineEditError> {
        let mut buf = [0u8; 1];

        let len = self
            .input
            .read(&mut buf)
            .map_err(|e| LineEditError::ReadError(e.kind()))?;

        match len {
            0 => Err(LineEditError::Aborted),
            _ => Ok(buf[0]),
        }
    }
}

#[cfg(any(test, feature = "std"))]
pub mod std_sync {
    //! Wrappers for stdin and stdout. Requires feature `std`.
    use std::io::{Read, Stdin, Stdout, Write};

    use super::IO;

    impl Default for IO<StdinWrapper> {
        fn default() -> Self {
            Self::new(StdinWrapper::new())
        }
    }

    /// Wrapper for [`std::io::Stdin`]
    pub struct StdinWrapper(Stdin);

    impl StdinWrapper {
        pub fn new() -> Self {
            Self(std::io::stdin())
        }

        pub fn new_with(val: Stdin) -> Self {
            Self(val)
        }
    }

    impl Default for StdinWrapper {
        fn default() -> Self {
            Self::new()
        }
    }

    impl embedded_io::ErrorType for StdinWrapper {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io::Read for StdinWrapper {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            match buf.first_mut() {
                Some(first) => {
                    let mut b = [0];

                    match self.0.read(&mut b) {
                        Ok(0) => Ok(0),
                        Ok(_) => {
                            *first = b[0];
                            Ok(1)
                        }
                        Err(e) => Err(e.kind().into()),
                    }
                }
                None => Ok(0),
            }
        }
    }

    /// Wrapper for [`std::io::Stdout`]
    pub struct StdoutWrapper(Stdout);

    impl StdoutWrapper {
        pub fn new() -> Self {
            Self(std::io::stdout())
        }

        pub fn new_with(val: Stdout) -> Self {
            Self(val)
        }
    }

    impl Default for StdoutWrapper {
        fn default() -> Self {
            Self::new()
        }
    }

    impl embedded_io::ErrorType for StdoutWrapper {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io::Write for StdoutWrapper {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.0.write(buf).map_err(|e| e.kind().into())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.0.flush().map_err(|e| e.kind().into())
        }
    }
}
