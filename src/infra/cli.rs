//! Command-line flags and environment overrides.

use std::path::{Path, PathBuf};

use md_base::constants::{KV_DIR, STORE_DIR};
use md_base::difficulty::Difficulty;

use crate::llms::LlmProvider;

pub const USAGE: &str = "\
mayday - talk a crippled starship through its last ten minutes

USAGE:
    mayday [OPTIONS]

OPTIONS:
    --provider <anthropic|grok|groq|deepseek>   Model provider (env MAYDAY_PROVIDER)
    --model <id>                                Model id (env MAYDAY_MODEL)
    --difficulty <easy|normal|hard>             Preselected difficulty
    --mute                                      Start with narration off
    -h, --help                                  Print this help

ENVIRONMENT:
    ANTHROPIC_API_KEY, XAI_API_KEY, GROQ_API_KEY, DEEPSEEK_API_KEY
    MAYDAY_TRACE_LOG   trace log path (default .mayday/logs/trace.jsonl)
    MAYDAY_STORE_DIR   status store directory (default .mayday/store)
";

/// Flags as typed on the command line
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub provider: Option<LlmProvider>,
    pub model: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub mute: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments (without the program name).
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut out = CliArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((f, v)) if f.starts_with("--") => (f, Some(v.to_string())),
                _ => (arg.as_str(), None),
            };
            let mut value = |name: &str| {
                inline.clone().or_else(|| iter.next().cloned()).ok_or_else(|| format!("{} needs a value", name))
            };
            match flag {
                "--provider" => {
                    let v = value(flag)?;
                    out.provider = Some(LlmProvider::parse(&v).ok_or_else(|| format!("unknown provider: {}", v))?);
                }
                "--model" => out.model = Some(value(flag)?),
                "--difficulty" => {
                    let v = value(flag)?;
                    out.difficulty = Some(Difficulty::parse(&v).ok_or_else(|| format!("unknown difficulty: {}", v))?);
                }
                "--mute" => out.mute = true,
                "-h" | "--help" => out.help = true,
                other => return Err(format!("unknown argument: {}", other)),
            }
        }
        Ok(out)
    }
}

/// Fully resolved startup settings
#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    pub provider: LlmProvider,
    pub model: String,
    pub difficulty: Difficulty,
    pub muted: bool,
    pub store_dir: PathBuf,
}

impl Settings {
    /// Flags win over environment, environment over defaults. An unknown
    /// provider in the environment falls back to the default with a warning.
    pub fn resolve(cli: CliArgs, env: impl Fn(&str) -> Option<String>) -> Self {
        let provider = cli.provider.unwrap_or_else(|| match env("MAYDAY_PROVIDER") {
            Some(v) => LlmProvider::parse(&v).unwrap_or_else(|| {
                tracing::warn!(value = %v, "unknown MAYDAY_PROVIDER, using default");
                LlmProvider::default()
            }),
            None => LlmProvider::default(),
        });
        let model = cli
            .model
            .or_else(|| env("MAYDAY_MODEL"))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());
        let store_dir = env("MAYDAY_STORE_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(STORE_DIR).join(KV_DIR));
        Self { provider, model, difficulty: cli.difficulty.unwrap_or_default(), muted: cli.mute, store_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn parses_all_flags() {
        let cli = CliArgs::parse(&args(&["--provider", "groq", "--model=llama", "--difficulty", "3", "--mute"])).unwrap();
        assert_eq!(cli.provider, Some(LlmProvider::Groq));
        assert_eq!(cli.model.as_deref(), Some("llama"));
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));
        assert!(cli.mute);
    }

    #[test]
    fn rejects_unknown_and_incomplete() {
        assert!(CliArgs::parse(&args(&["--warp"])).is_err());
        assert!(CliArgs::parse(&args(&["--model"])).is_err());
        assert!(CliArgs::parse(&args(&["--provider", "hal9000"])).is_err());
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let s = Settings::resolve(CliArgs::default(), no_env);
        assert_eq!(s.provider, LlmProvider::Anthropic);
        assert_eq!(s.model, LlmProvider::Anthropic.default_model());
        assert_eq!(s.difficulty, Difficulty::Normal);
        assert_eq!(s.store_dir, Path::new(".mayday/store"));
    }

    #[test]
    fn env_fills_gaps_and_flags_win() {
        let env = |k: &str| match k {
            "MAYDAY_PROVIDER" => Some("deepseek".to_string()),
            "MAYDAY_MODEL" => Some("deepseek-reasoner".to_string()),
            "MAYDAY_STORE_DIR" => Some("/tmp/ship".to_string()),
            _ => None,
        };
        let s = Settings::resolve(CliArgs::default(), env);
        assert_eq!(s.provider, LlmProvider::DeepSeek);
        assert_eq!(s.model, "deepseek-reasoner");
        assert_eq!(s.store_dir, PathBuf::from("/tmp/ship"));

        let cli = CliArgs { provider: Some(LlmProvider::Grok), ..CliArgs::default() };
        assert_eq!(Settings::resolve(cli, env).provider, LlmProvider::Grok);
    }

    #[test]
    fn bad_env_provider_falls_back() {
        let s = Settings::resolve(CliArgs::default(), |k| (k == "MAYDAY_PROVIDER").then(|| "skynet".to_string()));
        assert_eq!(s.provider, LlmProvider::Anthropic);
    }
}
