//! Where `show` writes.
//!
//! Scripts print through an [`OutputSink`] chosen when the runtime is built:
//! standard output for normal runs, an in-memory buffer when the embedder (or
//! a test) wants to read what was printed, or nothing at all.

use std::sync::Arc;

use parking_lot::Mutex;

/// Destination for script output.
pub enum OutputSink {
    /// Lines go to the process's standard output.
    Stdout,
    /// Lines are collected in memory.
    Buffer(Mutex<String>),
    /// Lines are dropped.
    Silent,
}

impl OutputSink {
    pub fn buffer() -> Self {
        OutputSink::Buffer(Mutex::new(String::new()))
    }

    /// Write `line` followed by a newline.
    pub fn write_line(&self, line: &str) {
        match self {
            OutputSink::Stdout => println!("{line}"),
            OutputSink::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(line);
                buffer.push('\n');
            }
            OutputSink::Silent => {}
        }
    }

    /// Everything written so far; empty unless buffering.
    pub fn captured(&self) -> String {
        match self {
            OutputSink::Buffer(buffer) => buffer.lock().clone(),
            OutputSink::Stdout | OutputSink::Silent => String::new(),
        }
    }

    /// Forget buffered output.
    pub fn clear(&self) {
        if let OutputSink::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Output sink shared between the runtime and the `show` primitive.
pub type SharedOutput = Arc<OutputSink>;

pub fn stdout_output() -> SharedOutput {
    Arc::new(OutputSink::Stdout)
}

pub fn buffer_output() -> SharedOutput {
    Arc::new(OutputSink::buffer())
}

pub fn silent_output() -> SharedOutput {
    Arc::new(OutputSink::Silent)
}

#[cfg(test)]
mod tests;
