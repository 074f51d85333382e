use std::{
    io::{self, Read, Write},
    sync::{Arc, Mutex},
};

/// Where a relayed child stream ends up.
#[derive(Debug, Clone, Default)]
pub enum Sink {
    /// The parent's standard output.
    #[default]
    Stdout,
    /// The parent's standard error.
    Stderr,
    /// An in-memory buffer shared with the caller.
    Buffer(SharedBuffer),
}

impl Sink {
    /// A writer appending to this sink.
    pub fn writer(&self) -> Box<dyn Write + Send> {
        match self {
            Sink::Stdout => Box::new(io::stdout()),
            Sink::Stderr => Box::new(io::stderr()),
            Sink::Buffer(buffer) => Box::new(buffer.clone()),
        }
    }
}

/// A cloneable byte buffer; all clones append to the same storage.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Contents decoded as UTF-8, lossily.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        // A panicking writer cannot leave the Vec in a torn state.
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Copy a child stream into a sink until the child closes it.
///
/// Returns the number of bytes relayed.
pub(crate) fn relay(mut from: impl Read, sink: &Sink) -> io::Result<u64> {
    let mut to = sink.writer();
    let copied = io::copy(&mut from, &mut to)?;
    to.flush()?;
    Ok(copied)
}
