//! Scoped file resource shared by file-backed outputs.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// How a [`FileOutput`] opens its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Read/write, truncating existing content.
    Truncate,
    /// Append to existing content.
    Append,
}

/// An open output file. Parent directories are created on open.
#[derive(Debug)]
pub struct FileOutput {
    path: PathBuf,
    file: Option<File>,
}

impl FileOutput {
    pub fn open(path: impl AsRef<Path>, mode: FileMode) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        match mode {
            FileMode::Truncate => options.read(true).write(true).create(true).truncate(true),
            FileMode::Append => options.read(true).append(true).create(true),
        };
        let file = options.open(&path)?;

        tracing::debug!(
            target: "tabulog.file",
            path = %path.display(),
            ?mode,
            "Opened output file"
        );
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Handle for writing at the current position.
    pub fn handle(&mut self) -> io::Result<&mut File> {
        let path = &self.path;
        self.file.as_mut().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("output file {} is closed", path.display()),
            )
        })
    }

    /// Read everything written so far. Leaves the position at the end.
    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let file = self.handle()?;
        file.flush()?;
        file.seek(SeekFrom::Start(0))?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Discard all content and position at the start.
    pub fn truncate_and_rewind(&mut self) -> io::Result<()> {
        let file = self.handle()?;
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.handle()?.flush()
    }

    /// Flush, sync and release the handle. Closing twice is a no-op.
    pub fn close(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
            file.sync_all()?;
            tracing::debug!(target: "tabulog.file", path = %self.path.display(), "Closed output file");
        }
        Ok(())
    }
}
