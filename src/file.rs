// src/file.rs
//
// Per-path file handle. Construction initiates the download and captures the
// remote-reported size; the body is pulled into memory on the first read,
// once per handle, and line iteration walks an explicit cursor over that
// buffer. Large objects are held entirely in memory by design.

use std::str::FromStr;

use bytes::Bytes;
use log::info;

use crate::error::{AbfssError, Result};
use crate::file_system::AbfssFileSystem;
use crate::store::DownloadStream;

/// Access mode for [`AbfssFile`]. Write mode is accepted at open for
/// interface compatibility but carries no write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    #[default]
    Read,
    Write,
}

impl OpenMode {
    pub fn is_read(self) -> bool {
        matches!(self, OpenMode::Read)
    }
}

impl FromStr for OpenMode {
    type Err = AbfssError;

    /// Parse a `"rb"` / `"wb"`-style mode string.
    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with('r') {
            Ok(OpenMode::Read)
        } else if s.starts_with('w') {
            Ok(OpenMode::Write)
        } else {
            Err(AbfssError::Unsupported("open mode"))
        }
    }
}

/// An opened remote object.
///
/// States: Opening -> Open -> Closed. Closing only flips a flag; no remote
/// resource is held that would need releasing. Reads after [`close`] fail
/// with [`AbfssError::Closed`].
///
/// [`close`]: AbfssFile::close
pub struct AbfssFile {
    path: String,
    mode: OpenMode,
    stream: Box<dyn DownloadStream>,
    size: Option<u64>,
    closed: bool,
    buffer: Option<Bytes>,
    pos: usize,
}

impl AbfssFile {
    pub(crate) async fn open(
        fs: &AbfssFileSystem,
        path: &str,
        mode: OpenMode,
    ) -> Result<Self> {
        let client = fs.file_client(path).await?;
        let stream = client.open_read().await?;
        let size = mode.is_read().then(|| stream.size());
        info!("created an AbfssFile for {path}: {size:?}");
        Ok(Self {
            path: path.to_string(),
            mode,
            stream,
            size,
            closed: false,
            buffer: None,
            pos: 0,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Remote-reported content length, captured at open in read mode.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The buffered object body, downloaded on first use and cached for the
    /// lifetime of the handle.
    async fn buffered(&mut self) -> Result<Bytes> {
        if self.buffer.is_none() {
            self.buffer = Some(self.stream.read_all().await?);
        }
        Ok(self.buffer.clone().unwrap_or_default())
    }

    /// The next line from the cursor, including its trailing `\n` (the final
    /// line may lack one). `Ok(None)` at end of buffer. The first call
    /// downloads the full object body; later calls only walk the buffer.
    pub async fn read_line(&mut self) -> Result<Option<Bytes>> {
        if self.closed {
            return Err(AbfssError::Closed(self.path.clone()));
        }
        let buf = self.buffered().await?;
        if self.pos >= buf.len() {
            return Ok(None);
        }
        let end = match buf[self.pos..].iter().position(|&b| b == b'\n') {
            Some(i) => self.pos + i + 1,
            None => buf.len(),
        };
        let line = buf.slice(self.pos..end);
        self.pos = end;
        Ok(Some(line))
    }

    /// All lines from the start of the buffer. Rewinds first, so a repeat
    /// call yields the same sequence from the cached bytes without another
    /// download.
    pub async fn read_lines(&mut self) -> Result<Vec<Bytes>> {
        self.rewind();
        let mut lines = Vec::new();
        while let Some(line) = self.read_line().await? {
            lines.push(line);
        }
        Ok(lines)
    }

    /// Reset the line cursor to the start of the buffered bytes.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Accepted no-op; there is no write path to flush.
    pub fn flush(&self) {}

    /// Flip the closed flag. The buffer is left to normal reclamation.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Acquisition/release bracket: run `f` with the handle, then close it
    /// whether or not `f` succeeded.
    pub async fn scoped<T, F>(&mut self, f: F) -> Result<T>
    where
        F: AsyncFnOnce(&mut Self) -> Result<T>,
    {
        let out = f(self).await;
        self.close();
        out
    }
}
