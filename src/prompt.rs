/// Placeholder replaced with the issue body
pub const BODY_PLACEHOLDER: &str = "{body}";

pub const DEFAULT_PROMPT_TEMPLATE: &str = concat!(
    "Analyze the following GitHub issue and generate helpful follow-up questions ",
    "that would help clarify the problem or gather more information needed to resolve it.\n",
    "\n",
    "Issue content: {body}\n",
    "\n",
    "Please generate 2-3 specific, actionable follow-up questions that would help the ",
    "maintainers better understand and resolve this issue. ",
    "Format your response as a clear, helpful comment."
);

/// Builds the generation prompt by substituting the issue body into `template`.
///
/// The body is inserted verbatim and never truncated. Placeholders that appear
/// inside the body itself are left alone.
pub fn build_prompt(template: &str, body: &str) -> String {
    template.replace(BODY_PLACEHOLDER, body)
}
