use std::env;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use md_base::config::VoiceSettings;

use crate::{SpeechEngine, SpeechError};

/// Speech programs we know how to drive, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechProgram {
    /// speech-dispatcher client (Linux desktops)
    SpdSay,
    EspeakNg,
    Espeak,
    /// macOS
    Say,
}

impl SpeechProgram {
    pub const ALL: [SpeechProgram; 4] =
        [SpeechProgram::SpdSay, SpeechProgram::EspeakNg, SpeechProgram::Espeak, SpeechProgram::Say];

    pub fn binary(&self) -> &'static str {
        match self {
            SpeechProgram::SpdSay => "spd-say",
            SpeechProgram::EspeakNg => "espeak-ng",
            SpeechProgram::Espeak => "espeak",
            SpeechProgram::Say => "say",
        }
    }

    /// Command-line arguments for one utterance (text last).
    pub fn args(&self, text: &str, voice: &VoiceSettings) -> Vec<String> {
        let mut args = match self {
            SpeechProgram::SpdSay => vec![
                "--wait".to_string(),
                "-r".to_string(),
                scale_signed(voice.rate).to_string(),
                "-p".to_string(),
                scale_signed(voice.pitch).to_string(),
                "-i".to_string(),
                ((voice.volume.clamp(0.0, 1.0) * 200.0) as i32 - 100).to_string(),
            ],
            SpeechProgram::EspeakNg | SpeechProgram::Espeak => vec![
                "-s".to_string(),
                ((175.0 * voice.rate).round() as i32).clamp(80, 450).to_string(),
                "-p".to_string(),
                ((50.0 * voice.pitch).round() as i32).clamp(0, 99).to_string(),
                "-a".to_string(),
                ((100.0 * voice.volume).round() as i32).clamp(0, 200).to_string(),
            ],
            SpeechProgram::Say => vec!["-r".to_string(), ((175.0 * voice.rate).round() as i32).max(1).to_string()],
        };
        args.push(text.to_string());
        args
    }
}

/// 1.0-centred setting to spd-say's -100..=100 range
fn scale_signed(value: f32) -> i32 {
    (((value - 1.0) * 100.0).round() as i32).clamp(-100, 100)
}

/// Look `name` up in `PATH`.
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).map(|dir| dir.join(name)).find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Speaks by spawning a speech program per utterance.
pub struct CommandSpeech {
    program: SpeechProgram,
    path: PathBuf,
    child: Option<Child>,
}

impl CommandSpeech {
    pub fn new(program: SpeechProgram, path: PathBuf) -> Self {
        Self { program, path, child: None }
    }

    pub fn program(&self) -> SpeechProgram {
        self.program
    }
}

/// First installed speech program, if any.
pub fn detect() -> Option<CommandSpeech> {
    SpeechProgram::ALL
        .iter()
        .find_map(|program| find_in_path(program.binary()).map(|path| CommandSpeech::new(*program, path)))
}

impl SpeechEngine for CommandSpeech {
    fn name(&self) -> &str {
        self.program.binary()
    }

    fn speak(&mut self, text: &str, voice: &VoiceSettings) -> Result<(), SpeechError> {
        let child = Command::new(&self.path)
            .args(self.program.args(text, voice))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeechError::Spawn(format!("{}: {}", self.program.binary(), e)))?;
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take()
            && child.try_wait().ok().flatten().is_none()
        {
            let _ = child.kill();
            let _ = child.wait();
        }
        if self.program == SpeechProgram::SpdSay {
            // The dispatcher keeps speaking after its client dies.
            let _ = Command::new(&self.path)
                .arg("--cancel")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}
