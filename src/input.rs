//! Token intake: one company name, domain or URL per line.

use std::path::Path;
use tracing::debug;

use crate::error::{LeadsmithError, LeadsmithResult};

/// Split free-form text into tokens, one per line. Blank lines and `#`
/// comment lines are dropped; surrounding whitespace is trimmed.
pub fn parse_tokens(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reject tokens the pipeline cannot turn into a target
pub fn validate_token(token: &str) -> LeadsmithResult<String> {
    let trimmed = token.trim();

    if trimmed.is_empty() {
        return Err(LeadsmithError::InvalidInput("token is empty".to_string()));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(LeadsmithError::InvalidInput(format!(
            "token {:?} contains control characters",
            trimmed
        )));
    }
    if !trimmed.chars().any(char::is_alphanumeric) {
        return Err(LeadsmithError::InvalidInput(format!(
            "token {:?} has no letters or digits",
            trimmed
        )));
    }

    Ok(trimmed.to_string())
}

/// Read and validate tokens from a file
pub fn read_tokens_file(path: &Path) -> LeadsmithResult<Vec<String>> {
    debug!("Loading tokens from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| LeadsmithError::FileError {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;

    parse_tokens(&content)
        .iter()
        .map(|token| validate_token(token))
        .collect()
}

/// Validate command-line tokens and append the contents of `file`, if any
pub fn collect_tokens(args: &[String], file: Option<&Path>) -> LeadsmithResult<Vec<String>> {
    let mut tokens = args
        .iter()
        .map(|token| validate_token(token))
        .collect::<LeadsmithResult<Vec<_>>>()?;

    if let Some(path) = file {
        tokens.extend(read_tokens_file(path)?);
    }

    if tokens.is_empty() {
        return Err(LeadsmithError::InvalidInput(
            "no tokens given; pass company names or URLs, or --file".to_string(),
        ));
    }

    Ok(tokens)
}
