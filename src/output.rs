use crate::github::issues::Issue;
use std::io::{self, Write};

/// Writes `message` to stdout and, when given, to the additional writer.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        tracing::warn!(error = %e, "Failed to write to stdout");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}

/// Prints the fetched issue: title, body, then each comment numbered from 1.
pub fn print_issue(issue: &Issue, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    println(&format!("Title: {}", issue.title), writer)?;
    println(&format!("Body: {}", issue.body), writer)?;
    for (i, comment) in issue.comments.iter().enumerate() {
        println(&format!("Comment {}: {}", i + 1, comment), writer)?;
    }
    Ok(())
}
