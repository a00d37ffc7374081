//! Standard input JSON source.

use super::input_source::priority;
use super::{InputSource, SourceKind};
use crate::error::{InputError, Result};
use crate::map::InputMap;
use serde_json::Value;
use std::io::{self, Read};
use std::sync::{Mutex, OnceLock};

/// Process stdin, read at most once for the lifetime of the process.
static PROCESS_STDIN: OnceLock<std::result::Result<String, String>> = OnceLock::new();

type BoxedReader = Box<dyn Read + Send>;

enum StdinReader {
    Process,
    Injected {
        reader: Mutex<Option<BoxedReader>>,
        contents: OnceLock<std::result::Result<String, String>>,
    },
}

/// JSON document on standard input.
///
/// The stream is consumed the first time the source is loaded and the text is
/// cached, so refreshing a store never blocks on stdin twice. Every
/// `StdinSource::new()` shares one process-wide cache.
///
/// Empty input contributes no inputs. Anything else must be a JSON object.
///
/// # Examples
///
/// ```rust
/// use directed_inputs::sources::{InputSource, StdinSource};
///
/// let source = StdinSource::from_reader(&br#"{"stdin_key": "stdin_value"}"#[..]);
/// let inputs = source.load(false).unwrap();
/// assert_eq!(inputs.get("stdin_key").unwrap(), "stdin_value");
/// ```
pub struct StdinSource {
    reader: StdinReader,
    override_stdin: bool,
    priority: i32,
}

impl StdinSource {
    /// Read from the process's standard input.
    pub fn new() -> Self {
        Self {
            reader: StdinReader::Process,
            override_stdin: false,
            priority: priority::STDIN,
        }
    }

    /// Read from `reader` instead of the process's standard input.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: StdinReader::Injected {
                reader: Mutex::new(Some(Box::new(reader))),
                contents: OnceLock::new(),
            },
            override_stdin: false,
            priority: priority::STDIN,
        }
    }

    /// Skip reading entirely when `override_stdin` is true.
    pub fn with_override(mut self, override_stdin: bool) -> Self {
        self.override_stdin = override_stdin;
        self
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the underlying stream has been consumed.
    pub fn is_consumed(&self) -> bool {
        match &self.reader {
            StdinReader::Process => PROCESS_STDIN.get().is_some(),
            StdinReader::Injected { contents, .. } => contents.get().is_some(),
        }
    }

    fn read_once(&self) -> Result<&str> {
        let contents = match &self.reader {
            StdinReader::Process => PROCESS_STDIN.get_or_init(|| {
                tracing::debug!("reading inputs from stdin");
                read_all(io::stdin().lock())
            }),
            StdinReader::Injected { reader, contents } => contents.get_or_init(|| {
                let taken = reader
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .take();
                match taken {
                    Some(reader) => read_all(reader),
                    None => Ok(String::new()),
                }
            }),
        };

        contents
            .as_deref()
            .map_err(|e| InputError::source_load(self.name(), e))
    }
}

fn read_all(mut reader: impl Read) -> std::result::Result<String, String> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map(|_| buf)
        .map_err(|e| e.to_string())
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for StdinSource {
    fn load(&self, case_sensitive: bool) -> Result<InputMap> {
        if self.override_stdin {
            tracing::debug!("OVERRIDE_STDIN set, not reading stdin");
            return Ok(InputMap::new(case_sensitive));
        }

        let raw = self.read_once()?;
        if raw.trim().is_empty() {
            return Ok(InputMap::new(case_sensitive));
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(object)) => Ok(InputMap::from_object(object, case_sensitive)),
            Ok(_) => Err(InputError::source_decode(
                self.name(),
                raw,
                "expected a JSON object",
            )),
            Err(e) => Err(InputError::source_decode(self.name(), raw, e)),
        }
    }

    fn name(&self) -> String {
        "stdin".to_string()
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Stdin
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
