use std::process::{Child, Command, Stdio};

pub const DEFAULT_VOICE_PROGRAM: &str = "espeak";
/// Words per minute.
pub const DEFAULT_VOICE_RATE: u32 = 100;

pub trait Voice {
    /// Starts speaking `line` and returns without waiting for it to finish.
    fn say(&mut self, line: &str);
}

#[derive(Debug, Default)]
pub struct SilentVoice;

impl Voice for SilentVoice {
    fn say(&mut self, line: &str) {
        tracing::info!(line, "voice (muted)");
    }
}

/// Speaks through an external `espeak`-compatible program.
#[derive(Debug)]
pub struct ProgramVoice {
    program: String,
    rate: u32,
    children: Vec<Child>,
    warned: bool,
}

impl ProgramVoice {
    pub fn new(program: impl Into<String>, rate: u32) -> Self {
        Self {
            program: program.into(),
            rate,
            children: Vec::new(),
            warned: false,
        }
    }

    pub fn command(&self, line: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-s")
            .arg(self.rate.to_string())
            .arg(line)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }

    pub fn in_flight(&self) -> usize {
        self.children.len()
    }

    fn reap(&mut self) {
        self.children
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }
}

impl Voice for ProgramVoice {
    fn say(&mut self, line: &str) {
        tracing::info!(line, "voice");
        self.reap();
        match self.command(line).spawn() {
            Ok(child) => self.children.push(child),
            Err(err) => {
                if !self.warned {
                    tracing::warn!(program = %self.program, "speech unavailable: {err}");
                    self.warned = true;
                }
            }
        }
    }
}
