//! DeviceChannel — raw bytes from an OS entropy device.
//!
//! Opens a character device such as `/dev/urandom` read-only and passes reads
//! straight through. Reads may block until the kernel considers its pool
//! seeded; that backpressure is intentional and not bounded here.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::channel::{ChannelInfo, EntropyChannel, Strength};
use crate::error::InitError;

static DEVICE_INFO: ChannelInfo = ChannelInfo {
    name: "device",
    description: "OS entropy device read through an open file handle",
    strength: Strength::Cryptographic,
};

/// An open handle to the entropy device.
#[derive(Debug)]
pub struct ChannelHandle {
    file: File,
}

impl ChannelHandle {
    /// Raw descriptor of the open device, for diagnostics.
    #[cfg(unix)]
    pub fn descriptor(&self) -> std::os::fd::RawFd {
        use std::os::fd::AsRawFd;
        self.file.as_raw_fd()
    }
}

/// Where the device handle is in its lifecycle.
///
/// "Not open" is a variant, not a reserved descriptor value, so it can never
/// be mistaken for a real handle (descriptor 0 included).
#[derive(Debug, Default)]
pub enum HandleState {
    #[default]
    Unopened,
    Open(ChannelHandle),
    Closed,
}

/// Entropy channel backed by an OS device file.
#[derive(Debug)]
pub struct DeviceChannel {
    path: PathBuf,
    handle: HandleState,
}

impl DeviceChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: HandleState::Unopened,
        }
    }

    /// The configured device path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn handle_state(&self) -> &HandleState {
        &self.handle
    }
}

impl EntropyChannel for DeviceChannel {
    fn info(&self) -> &ChannelInfo {
        &DEVICE_INFO
    }

    fn open(&mut self) -> Result<(), InitError> {
        if matches!(self.handle, HandleState::Open(_)) {
            log::debug!("{} already open; keeping existing handle", self.path.display());
            return Ok(());
        }

        let file = OpenOptions::new()
            .read(true)
            .open(&self.path)
            .map_err(|source| InitError::InitializationFailure {
                path: self.path.clone(),
                source,
            })?;

        log::info!("opened entropy device {}", self.path.display());
        self.handle = HandleState::Open(ChannelHandle { file });
        Ok(())
    }

    fn is_ready(&self) -> bool {
        matches!(self.handle, HandleState::Open(_))
    }

    fn read(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        match &mut self.handle {
            HandleState::Open(handle) => handle.file.read(dest),
            _ => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "entropy device is not open",
            )),
        }
    }

    fn close(&mut self) -> bool {
        match std::mem::replace(&mut self.handle, HandleState::Closed) {
            HandleState::Open(handle) => {
                // Dropping the File closes the descriptor exactly once.
                drop(handle);
                log::info!("closed entropy device {}", self.path.display());
                true
            }
            previous => {
                self.handle = previous;
                false
            }
        }
    }
}
