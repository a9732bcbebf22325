//! Centralized request validation helpers shared by the CLI and web server.

use crate::core::types::SymptomId;

/// Maximum number of symptom IDs accepted in a single request (DOS protection)
pub const MAX_QUERY_SYMPTOMS: usize = 256;

/// Request validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Too many symptoms: {0} given, at most {MAX_QUERY_SYMPTOMS} allowed")]
    TooManySymptoms(usize),
    #[error("Invalid symptom ID '{0}': expected a non-negative integer")]
    InvalidSymptomId(String),
}

/// Check that a request does not name more symptoms than allowed.
///
/// Counts raw entries, duplicates included, since that is what the caller sent.
///
/// # Errors
///
/// Returns `ValidationError::TooManySymptoms` if `count` exceeds [`MAX_QUERY_SYMPTOMS`].
pub fn check_symptom_limit(count: usize) -> Result<(), ValidationError> {
    if count > MAX_QUERY_SYMPTOMS {
        Err(ValidationError::TooManySymptoms(count))
    } else {
        Ok(())
    }
}

/// Parse a comma- or whitespace-separated list of symptom IDs.
///
/// # Examples
///
/// ```
/// use symptom_solver::utils::validation::parse_symptom_ids;
/// use symptom_solver::SymptomId;
///
/// let ids = parse_symptom_ids("1, 2 3").unwrap();
/// assert_eq!(ids, vec![SymptomId::new(1), SymptomId::new(2), SymptomId::new(3)]);
/// assert!(parse_symptom_ids("1,fever").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::InvalidSymptomId` for any token that is not a `u32`, or
/// `ValidationError::TooManySymptoms` if the list is too long.
pub fn parse_symptom_ids(text: &str) -> Result<Vec<SymptomId>, ValidationError> {
    let ids = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u32>()
                .map(SymptomId::new)
                .map_err(|_| ValidationError::InvalidSymptomId(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    check_symptom_limit(ids.len())?;
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_limit() {
        assert!(check_symptom_limit(0).is_ok());
        assert!(check_symptom_limit(MAX_QUERY_SYMPTOMS).is_ok());
        assert!(matches!(
            check_symptom_limit(MAX_QUERY_SYMPTOMS + 1),
            Err(ValidationError::TooManySymptoms(_))
        ));
    }

    #[test]
    fn test_parse_symptom_ids() {
        assert_eq!(
            parse_symptom_ids("3,1,,2").unwrap(),
            vec![SymptomId::new(3), SymptomId::new(1), SymptomId::new(2)]
        );
        assert!(parse_symptom_ids("").unwrap().is_empty());
        assert!(matches!(
            parse_symptom_ids("1,-2"),
            Err(ValidationError::InvalidSymptomId(token)) if token == "-2"
        ));
    }

    #[test]
    fn test_parse_rejects_oversized_lists() {
        let text = (0..=MAX_QUERY_SYMPTOMS)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",");
        assert!(matches!(
            parse_symptom_ids(&text),
            Err(ValidationError::TooManySymptoms(_))
        ));
    }
}
