//! Byte-range views over shared backing stores.
//!
//! Converters read texture data through [`SubStream`] windows while other
//! readers use the same store concurrently. All access goes through
//! [`ReadAt`], an absolute-offset primitive that never depends on ambient
//! cursor state, so interleaved reads cannot corrupt each other.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::{Arc, Mutex};

/// Read at an absolute offset, without any shared cursor.
pub trait ReadAt: Send + Sync {
    /// Reads into `buf` starting at `offset`, returning the number of bytes
    /// read. Reads past the end return fewer bytes (possibly zero), never an
    /// error.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;
}

impl ReadAt for [u8] {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(self.len());
        let count = buf.len().min(self.len() - start);
        buf[..count].copy_from_slice(&self[start..start + count]);
        Ok(count)
    }
}

impl ReadAt for Vec<u8> {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        self.as_slice().read_at(offset, buf)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &T {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_at(offset, buf)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for Arc<T> {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_at(offset, buf)
    }
}

/// Mutex-guarded adapter giving [`ReadAt`] over any seekable store.
///
/// Each read seeks, reads and restores the inner cursor under one lock, so
/// readers that still use the store's own position observe it undisturbed.
#[derive(Debug)]
pub struct SharedStore<S> {
    inner: Mutex<S>,
}

impl<S: Read + Seek> SharedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    pub fn into_inner(self) -> S {
        match self.inner.into_inner() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<S: Read + Seek + Send> ReadAt for SharedStore<S> {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("shared store lock poisoned"))?;

        let saved = inner.stream_position()?;
        inner.seek(SeekFrom::Start(offset))?;

        // Fill as much of the buffer as the store allows; EOF is not an
        // error here, the caller sees a short count.
        let mut total = 0;
        let read_result: io::Result<()> = loop {
            if total == buf.len() {
                break Ok(());
            }
            match inner.read(&mut buf[total..]) {
                Ok(0) => break Ok(()),
                Ok(n) => total += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => break Err(e),
            }
        };

        // Restore the shared position even when the read failed.
        let restore_result = inner.seek(SeekFrom::Start(saved));
        read_result?;
        restore_result?;
        Ok(total)
    }
}

/// Read-only window `[offset, offset + length)` over a backing store.
///
/// Reads past the declared length are truncated, not errored. Seeking is
/// relative to the window. Writes fail explicitly with
/// [`io::ErrorKind::Unsupported`].
#[derive(Debug)]
pub struct SubStream<R> {
    store: R,
    offset: u64,
    length: u64,
    position: u64,
}

impl<R: ReadAt> SubStream<R> {
    pub fn new(store: R, offset: u64, length: u64) -> Self {
        Self {
            store,
            offset,
            length,
            position: 0,
        }
    }

    /// Declared length of the window, independent of the backing store size.
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl<R: ReadAt> Read for SubStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.length.saturating_sub(self.position);
        let count = (buf.len() as u64).min(remaining) as usize;
        if count == 0 {
            return Ok(0);
        }
        let n = self
            .store
            .read_at(self.offset + self.position, &mut buf[..count])?;
        self.position += n as u64;
        Ok(n)
    }
}

impl<R: ReadAt> Seek for SubStream<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(o) => Some(o),
            SeekFrom::Current(d) => self.position.checked_add_signed(d),
            SeekFrom::End(d) => self.length.checked_add_signed(d),
        };
        match target {
            Some(p) => {
                self.position = p;
                Ok(p)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start of byte-range view",
            )),
        }
    }
}

impl<R: ReadAt> Write for SubStream<R> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "byte-range views are read-only",
        ))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "byte-range views are read-only",
        ))
    }
}
