use crate::github::error::FetchError;

/// Issue text used to build the prompt
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub title: String,
    pub body: String,
    /// Reserved for comment follow-ups; never populated yet.
    pub comments: Vec<String>,
}

/// Builds an `Issue` from a GitHub `GET /repos/{owner}/{repo}/issues/{number}` response.
///
/// Both `title` and `body` must be present strings; a missing or `null` field is an error.
pub fn parse_issue(issue_json: &serde_json::Value) -> Result<Issue, FetchError> {
    let title = issue_json["title"]
        .as_str()
        .ok_or_else(|| FetchError::InvalidResponse("missing `title` field".to_string()))?;

    let body = issue_json["body"]
        .as_str()
        .ok_or_else(|| FetchError::InvalidResponse("missing `body` field".to_string()))?;

    Ok(Issue {
        title: title.to_string(),
        body: body.to_string(),
        comments: Vec::new(),
    })
}
