//! Rendering search results into user-facing text.

use schemebot_core::error::{Result, SchemebotError};
use schemebot_core::types::Scheme;

/// Render zero, one, or many schemes.
///
/// - empty → `Ok(None)` — "no formatted response", distinct from an empty answer
/// - one → full detail block
/// - many → numbered name list with a count lead-in
///
/// A scheme missing one of its required prose fields fails with
/// `MissingField` instead of rendering a hole.
pub fn format_results(results: &[Scheme]) -> Result<Option<String>> {
    if results.is_empty() {
        return Ok(None);
    }

    if let [scheme] = results {
        return Ok(Some(format!(
            "I found a scheme that might interest you:\n\n{}",
            format_scheme_details(scheme)?
        )));
    }

    let mut response = format!("I found {} schemes that match your query:\n\n", results.len());
    for (i, scheme) in results.iter().enumerate() {
        response.push_str(&format!("{}. {}\n", i + 1, scheme.name));
    }
    response.push_str("\nFor more details, please ask about a specific scheme.");
    Ok(Some(response))
}

/// The single-result detail block: six labeled lines in fixed order.
pub fn format_scheme_details(scheme: &Scheme) -> Result<String> {
    let require = |value: &Option<String>, field: &'static str| {
        value.clone().ok_or_else(|| SchemebotError::MissingField {
            scheme: scheme.name.clone(),
            field,
        })
    };

    Ok([
        format!("Name: {}", scheme.name),
        format!("Description: {}", require(&scheme.description, "description")?),
        format!("Eligibility: {}", require(&scheme.eligibility, "eligibility")?),
        format!("Benefits: {}", require(&scheme.benefits, "benefits")?),
        format!("Documents Required: {}", scheme.documents_required.join(", ")),
        format!(
            "Application Process: {}",
            require(&scheme.application_process, "application_process")?
        ),
    ]
    .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_scheme;

    #[test]
    fn test_empty_results_format_to_none() {
        assert!(format_results(&[]).unwrap().is_none());
    }

    #[test]
    fn test_single_result_detail_block() {
        let scheme = sample_scheme("Free Education Scheme", &["education"]);
        let text = format_results(std::slice::from_ref(&scheme)).unwrap().unwrap();
        assert!(text.starts_with("I found a scheme that might interest you:\n\n"));
        let body = text.split_once("\n\n").unwrap().1;
        let labels: Vec<&str> = body
            .lines()
            .map(|l| l.split_once(':').unwrap().0)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Name",
                "Description",
                "Eligibility",
                "Benefits",
                "Documents Required",
                "Application Process"
            ]
        );
    }

    #[test]
    fn test_documents_are_comma_joined() {
        let mut scheme = sample_scheme("S", &[]);
        scheme.documents_required = vec!["Aadhaar card".into(), "Income certificate".into()];
        let text = format_scheme_details(&scheme).unwrap();
        assert!(text.contains("Documents Required: Aadhaar card, Income certificate"));
    }

    #[test]
    fn test_multiple_results_list_names() {
        let schemes = vec![
            sample_scheme("Scheme A", &[]),
            sample_scheme("Scheme B", &[]),
        ];
        let text = format_results(&schemes).unwrap().unwrap();
        assert!(text.starts_with("I found 2 schemes that match your query:\n\n"));
        assert!(text.contains("1. Scheme A\n"));
        assert!(text.contains("2. Scheme B\n"));
        assert!(text.ends_with("For more details, please ask about a specific scheme."));
    }

    #[test]
    fn test_missing_field_fails_loudly() {
        let mut scheme = sample_scheme("Broken Scheme", &[]);
        scheme.eligibility = None;
        let err = format_results(std::slice::from_ref(&scheme)).unwrap_err();
        match err {
            SchemebotError::MissingField { scheme, field } => {
                assert_eq!(scheme, "Broken Scheme");
                assert_eq!(field, "eligibility");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
