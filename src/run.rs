use crate::cli;
use crate::config::Settings;
use crate::generator;
use crate::github::client::GitHubClient;
use crate::output;
use crate::prompt;
use anyhow::Context;

pub const SUCCESS_MESSAGE: &str = "Successfully posted follow-up questions as a comment!";

pub async fn run(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    match cli::parser::parse_args(&args) {
        cli::parser::Command::Invalid(message) => {
            return Err(anyhow::anyhow!("{message}\n\n{}", cli::parser::USAGE));
        }
        cli::parser::Command::Process { issue_number } => {
            let settings = Settings::load().context("Failed to load configuration")?;
            process_issue(&settings, issue_number, &mut stdout_additional).await?;
        }
    }
    Ok(())
}

/// Fetches the issue, generates follow-up questions and posts them as a comment.
///
/// Fetch and post failures are returned as errors. Generation failures are not:
/// a fallback text is posted instead.
pub async fn process_issue(
    settings: &Settings,
    issue_number: u64,
    stdout_additional: &mut Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    let github = GitHubClient::new(&settings.github_api_url, settings.github_token.as_deref())?;

    tracing::info!(
        owner = %settings.owner,
        repo = %settings.repo,
        issue_number,
        "processing issue"
    );
    let issue = github
        .get_issue(&settings.owner, &settings.repo, issue_number)
        .await
        .context("Failed to get issue details")?;

    output::print_issue(&issue, stdout_additional)?;

    let prompt = prompt::build_prompt(&settings.prompt_template, &issue.body);
    let follow_up = generator::generate_follow_up(settings, &prompt).await;

    github
        .create_comment(&settings.owner, &settings.repo, issue_number, &follow_up)
        .await
        .context("Failed to post comment")?;

    output::println(SUCCESS_MESSAGE, stdout_additional)?;
    Ok(())
}
