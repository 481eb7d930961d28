//! Verbose output for `-v`.
//!
//! The driver reports every diagnostic through the [`Diagnostics`] trait.
//! [`Silent`] drops everything; [`Verbose`] writes plain lines to any
//! [`Write`] sink (standard output in the binary, a buffer in tests).

use std::io::{self, Write};

use reqwest::{Request, Response};

use crate::error::FetchError;

/// Sink for user-facing diagnostic lines.
pub trait Diagnostics {
    /// Free-form debug note, printed as `DEBUG: <message>`.
    fn debug(&mut self, message: &str);

    /// Echo of the request about to be sent, printed as `> ...`.
    fn request(&mut self, request: &Request);

    /// Echo of the response just received, printed as `< ...`.
    fn response(&mut self, response: &Response);

    /// Kind and debug representation of a failure, printed before the
    /// user-facing error message.
    fn error(&mut self, error: &FetchError);
}

/// Discards all diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Diagnostics for Silent {
    fn debug(&mut self, _message: &str) {}

    fn request(&mut self, _request: &Request) {}

    fn response(&mut self, _response: &Response) {}

    fn error(&mut self, _error: &FetchError) {}
}

/// Writes diagnostics line by line to `W`.
///
/// Write failures are ignored: diagnostics never change control flow.
#[derive(Debug)]
pub struct Verbose<W: Write> {
    out: W,
}

impl<W: Write> Verbose<W> {
    /// Creates a verbose sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Diagnostics for Verbose<W> {
    fn debug(&mut self, message: &str) {
        let _ = writeln!(self.out, "DEBUG: {message}");
    }

    fn request(&mut self, request: &Request) {
        let _ = writeln!(
            self.out,
            "> {} {} {:?}",
            request.method(),
            request.url(),
            request.headers()
        );
    }

    fn response(&mut self, response: &Response) {
        let _ = writeln!(self.out, "< {response:?}");
    }

    fn error(&mut self, error: &FetchError) {
        let _ = writeln!(self.out, "DEBUG: error ({}): {error:?}", error.kind());
    }
}

/// Picks the diagnostics sink for the `-v` flag.
#[must_use]
pub fn for_verbosity(verbose: bool) -> Box<dyn Diagnostics> {
    if verbose {
        Box::new(Verbose::new(io::stdout()))
    } else {
        Box::new(Silent)
    }
}
