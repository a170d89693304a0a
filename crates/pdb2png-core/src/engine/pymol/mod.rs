//! PyMOL as the scene engine, driven over stdin/stdout of a child process.

pub mod protocol;

use self::protocol::{BOOTSTRAP, PyArg, Reply, command_line, parse_reply};
use super::error::EngineError;
use super::traits::{Axis, SceneEngine};
use crate::core::color::Rgb;
use crate::core::selection::Selection;
use crate::core::style::SettingValue;
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Flags for a headless PyMOL that takes commands on stdin: no GUI, stdin, quiet.
const PYMOL_FLAGS: [&str; 3] = ["-c", "-p", "-q"];

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PymolOptions {
    pub executable: PathBuf,
    pub extra_args: Vec<String>,
}

impl Default for PymolOptions {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("pymol"),
            extra_args: Vec::new(),
        }
    }
}

/// Speaks the dispatcher protocol over any writer/reader pair.
pub struct PymolBridge<W: Write, R: BufRead> {
    writer: W,
    reader: R,
}

impl<W: Write, R: BufRead> PymolBridge<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Self { writer, reader }
    }

    /// Installs the dispatcher and checks that the engine answers.
    pub fn handshake(&mut self) -> Result<String, EngineError> {
        for line in BOOTSTRAP {
            self.send(line)?;
        }
        let version = self.call("get_version", &[])?;
        let label = match &version {
            Value::Array(items) => items
                .first()
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            other => other.to_string(),
        };
        Ok(label)
    }

    fn send(&mut self, line: &str) -> Result<(), EngineError> {
        trace!("-> {}", line);
        writeln!(self.writer, "{}", line)
            .and_then(|_| self.writer.flush())
            .map_err(|e| EngineError::Process(format!("cannot write to engine: {}", e)))
    }

    fn read_reply(&mut self, command: &str) -> Result<Reply, EngineError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| EngineError::Process(format!("cannot read from engine: {}", e)))?;
            if read == 0 {
                return Err(EngineError::Process(format!(
                    "engine exited while running '{}'",
                    command
                )));
            }
            match parse_reply(&line)? {
                Some(reply) => return Ok(reply),
                None => trace!("<- {}", line.trim_end()),
            }
        }
    }

    pub fn call(&mut self, function: &str, args: &[PyArg<'_>]) -> Result<Value, EngineError> {
        let line = command_line(function, args);
        debug!("engine: {}", &line[1..]);
        self.send(&line)?;
        match self.read_reply(function)? {
            Reply::Ok(value) => Ok(value),
            Reply::Err(message) => Err(EngineError::Command {
                command: function.to_string(),
                message,
            }),
        }
    }

    fn call_count(&mut self, function: &str, args: &[PyArg<'_>]) -> Result<usize, EngineError> {
        let value = self.call(function, args)?;
        value
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| {
                EngineError::Protocol(format!("'{}' returned {} instead of a count", function, value))
            })
    }

    pub fn into_parts(self) -> (W, R) {
        (self.writer, self.reader)
    }
}

fn path_arg<'a>(command: &str, path: &'a Path) -> Result<PyArg<'a>, EngineError> {
    path.to_str().map(PyArg::Str).ok_or_else(|| EngineError::Command {
        command: command.to_string(),
        message: format!("path {:?} is not valid UTF-8", path),
    })
}

fn setting_arg(value: &SettingValue) -> PyArg<'_> {
    match value {
        SettingValue::Text(s) => PyArg::Str(s),
        SettingValue::Integer(i) => PyArg::Int(*i),
        SettingValue::Float(x) => PyArg::Float(*x),
        SettingValue::Bool(_) => PyArg::Owned(value.to_string()),
    }
}

impl<W: Write, R: BufRead> SceneEngine for PymolBridge<W, R> {
    fn reinitialize(&mut self) -> Result<(), EngineError> {
        self.call("reinitialize", &[]).map(drop)
    }

    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        let arg = path_arg("load", path)?;
        self.call("load", &[arg]).map(drop)
    }

    fn orient(&mut self) -> Result<(), EngineError> {
        self.call("orient", &[]).map(drop)
    }

    fn rotate(&mut self, axis: Axis, degrees: f64) -> Result<(), EngineError> {
        self.call("rotate", &[PyArg::Str(axis.as_str()), PyArg::Float(degrees)])
            .map(drop)
    }

    fn chains(&mut self) -> Result<Vec<String>, EngineError> {
        let value = self.call("get_chains", &[])?;
        let items = value.as_array().ok_or_else(|| {
            EngineError::Protocol(format!("'get_chains' returned {} instead of a list", value))
        })?;
        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    EngineError::Protocol(format!("chain identifier {} is not a string", item))
                })
            })
            .collect()
    }

    fn select(&mut self, name: &str, selection: &Selection) -> Result<usize, EngineError> {
        let expr = selection.to_string();
        self.call_count("select", &[PyArg::Str(name), PyArg::Str(&expr)])
    }

    fn count_atoms(&mut self, selection: &Selection) -> Result<usize, EngineError> {
        let expr = selection.to_string();
        self.call_count("count_atoms", &[PyArg::Str(&expr)])
    }

    fn set_color(&mut self, name: &str, rgb: Rgb) -> Result<(), EngineError> {
        self.call(
            "set_color",
            &[PyArg::Str(name), PyArg::Floats(rgb.components().to_vec())],
        )
        .map(drop)
    }

    fn color(&mut self, color: &str, selection: &Selection) -> Result<(), EngineError> {
        let expr = selection.to_string();
        self.call("color", &[PyArg::Str(color), PyArg::Str(&expr)])
            .map(drop)
    }

    fn zoom(&mut self, selection: &Selection, buffer: f64) -> Result<(), EngineError> {
        let expr = selection.to_string();
        self.call("zoom", &[PyArg::Str(&expr), PyArg::Float(buffer)])
            .map(drop)
    }

    fn hide(&mut self, representation: &str, selection: &Selection) -> Result<(), EngineError> {
        let expr = selection.to_string();
        self.call("hide", &[PyArg::Str(representation), PyArg::Str(&expr)])
            .map(drop)
    }

    fn set(&mut self, setting: &str, value: &SettingValue) -> Result<(), EngineError> {
        self.call("set", &[PyArg::Str(setting), setting_arg(value)])
            .map(drop)
    }

    fn bg_color(&mut self, color: &str) -> Result<(), EngineError> {
        self.call("bg_color", &[PyArg::Str(color)]).map(drop)
    }

    fn ray(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        self.call("ray", &[PyArg::Int(width.into()), PyArg::Int(height.into())])
            .map(drop)
    }

    fn save(&mut self, path: &Path) -> Result<(), EngineError> {
        let arg = path_arg("png", path)?;
        self.call("png", &[arg]).map(drop)
    }
}

pub type PymolPipe = PymolBridge<ChildStdin, BufReader<ChildStdout>>;

/// A running headless PyMOL. Asks PyMOL to quit and reaps it on drop.
pub struct PymolProcess {
    child: Child,
    bridge: PymolPipe,
    version: String,
}

impl PymolProcess {
    pub fn spawn(options: &PymolOptions) -> Result<Self, EngineError> {
        let program = options.executable.display().to_string();
        info!("Starting rendering engine: {}", program);

        let mut child = Command::new(&options.executable)
            .args(PYMOL_FLAGS)
            .args(&options.extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: program.clone(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            return Err(EngineError::Process(
                "engine pipes were not captured".to_string(),
            ));
        };

        let mut bridge = PymolBridge::new(stdin, BufReader::new(stdout));
        let version = match bridge.handshake() {
            Ok(version) => version,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        };
        info!("Rendering engine ready (PyMOL {})", version);

        Ok(Self {
            child,
            bridge,
            version,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The engine handle; wrap it in a [`Session`](crate::engine::session::Session).
    pub fn engine(&mut self) -> &mut PymolPipe {
        &mut self.bridge
    }
}

impl Drop for PymolProcess {
    fn drop(&mut self) {
        if self.bridge.send("/cmd.quit()").is_err() {
            debug!("Engine already closed its input");
        }

        let deadline = Instant::now() + SHUTDOWN_GRACE;
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    debug!("Engine exited with {}", status);
                    return;
                }
                Ok(None) if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(20));
                }
                Ok(None) => {
                    warn!("Engine did not exit after quit; killing it.");
                    let _ = self.child.kill();
                    let _ = self.child.wait();
                    return;
                }
                Err(e) => {
                    warn!("Could not query engine status: {}", e);
                    return;
                }
            }
        }
    }
}
