//! CLI - Command-line argument parsing and one-shot checks.
//!
//! With a command on the command line the check runs once and prints the
//! result; without one the interactive UI starts.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::ai::checker::{analyze, validate_command};
use crate::ai::client::AiClient;
use crate::config::{Settings, Tier};
use crate::error::CheckError;
use crate::security::CommandAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    Fast,
    Accurate,
}

impl From<TierArg> for Tier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Fast => Tier::Fast,
            TierArg::Accurate => Tier::Accurate,
        }
    }
}

/// Check how safe a shell command is before running it
#[derive(Parser, Debug)]
#[command(name = "rusty-guard", version, long_about = None)]
pub struct Cli {
    /// Analysis mode (defaults to the saved preference)
    #[arg(long, value_enum)]
    pub tier: Option<TierArg>,

    /// Print the analysis as JSON instead of a text report
    #[arg(long)]
    pub json: bool,

    /// Settings file (defaults to ~/.rusty-guard/settings.json)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Command to check; starts the interactive UI when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// The command to check, if one was given.
    pub fn command_line(&self) -> Option<String> {
        if self.command.is_empty() {
            None
        } else {
            Some(self.command.join(" "))
        }
    }

    pub fn tier_or(&self, default: Tier) -> Tier {
        self.tier.map(Tier::from).unwrap_or(default)
    }
}

/// Run a single check with the OpenAI-backed client.
pub async fn check_once(
    command: &str,
    tier: Tier,
    settings: &Settings,
) -> Result<CommandAnalysis, CheckError> {
    validate_command(command)?;
    let config = settings.request_config()?;
    let client = AiClient::new(&config);
    analyze(&client, command, config.model_for(tier)).await
}

pub fn render_output(analysis: &CommandAnalysis, command: &str, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(analysis)?)
    } else {
        Ok(analysis.to_report(command.trim()))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::security::SafetyLevel;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_command_with_flags() {
        let cli = Cli::try_parse_from(["rusty-guard", "--tier", "accurate", "rm", "-rf", "/tmp/x"]).unwrap();
        assert_eq!(cli.tier, Some(TierArg::Accurate));
        assert_eq!(cli.command_line().as_deref(), Some("rm -rf /tmp/x"));
        assert_eq!(cli.tier_or(Tier::Fast), Tier::Accurate);
    }

    #[test]
    fn test_no_command_means_interactive() {
        let cli = Cli::try_parse_from(["rusty-guard", "--json"]).unwrap();
        assert!(cli.json);
        assert!(cli.command_line().is_none());
        assert_eq!(cli.tier_or(Tier::Accurate), Tier::Accurate);
    }

    #[test]
    fn test_render_output() {
        let analysis = CommandAnalysis {
            explanation: "Prints the date.".to_string(),
            safety_level: SafetyLevel::new("Safe"),
            risks: vec![],
            recommendations: vec![],
        };

        let json = render_output(&analysis, "date", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["safety"], "Safe");

        let text = render_output(&analysis, " date ", false).unwrap();
        assert!(text.starts_with("Command: date\n"));
    }

    #[tokio::test]
    async fn test_check_once_rejects_blank_command() {
        let err = check_once("  ", Tier::Fast, &Settings::default()).await.unwrap_err();
        assert!(matches!(
            err,
            CheckError::Validation(crate::error::ValidationError::EmptyCommand)
        ));
    }
}
