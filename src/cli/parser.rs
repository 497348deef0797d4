/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Generate and post follow-up questions for the given issue
    Process { issue_number: u64 },
    /// Usage error, contains the message shown to the user
    Invalid(String),
}

pub const USAGE: &str = "Usage: issue-followup <ISSUE_NUMBER>

Environment:
  REPO_OWNER                 owner of the repository (required)
  REPO_NAME                  name of the repository (required)
  GITHUB_TOKEN               token used for the GitHub API
  GOOGLE_AI_API_KEY          key for the generative language API
  FOLLOWUP_MODEL             generation model identifier
  FOLLOWUP_PROMPT_TEMPLATE   prompt template, must contain {body}";

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
///
/// Only the first argument is read; anything after it is ignored.
pub fn parse_args(args: &[String]) -> Command {
    match args.get(1) {
        Some(arg) => parse_issue_number(arg),
        None => Command::Invalid("Issue number is required".to_string()),
    }
}

fn parse_issue_number(arg: &str) -> Command {
    match arg.parse::<u64>() {
        Ok(0) => Command::Invalid("Invalid issue number: 0".to_string()),
        Ok(issue_number) => Command::Process { issue_number },
        Err(e) => Command::Invalid(format!("Invalid issue number: {arg} ({e})")),
    }
}
