use std::io::{self, Read};

/// Replayed body: yields the recorded bytes, then the recorded read error.
///
/// A body whose read failed part way through during recording fails at the
/// same point on replay instead of reporting a clean end of stream.
#[derive(Debug)]
pub struct ReplayBody {
    data: io::Cursor<Vec<u8>>,
    error: Option<anyhow::Error>,
}

impl ReplayBody {
    pub fn new(data: Vec<u8>, error: Option<anyhow::Error>) -> Self {
        Self {
            data: io::Cursor::new(data),
            error,
        }
    }

    pub fn len(&self) -> usize {
        self.data.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.get_ref().is_empty()
    }
}

impl Read for ReplayBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(buf)?;
        if n > 0 || buf.is_empty() {
            return Ok(n);
        }
        match self.error.take() {
            Some(err) => Err(io::Error::other(err)),
            None => Ok(0),
        }
    }
}
