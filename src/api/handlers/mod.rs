//! HTTP handlers for API endpoints.
//!
//! Every proxy handler has the same shape: pull the parameters out of the
//! request, build one [`crate::upstream::UpstreamRequest`] with them
//! unchanged, await the data API and relay whatever comes back.

pub mod account;
pub mod aptos;
pub mod health;
pub mod nft;
pub mod token;
pub mod webhook;

use crate::error::{ProxyError, ProxyResult};

/// Unwrap a parameter the outbound call cannot be formed without.
///
/// Empty strings are passed through: the caller's value is forwarded as-is
/// and judged by the data API.
pub(crate) fn required(name: &str, value: Option<String>) -> ProxyResult<String> {
    value.ok_or_else(|| ProxyError::validation(format!("query parameter `{name}` is required")))
}

/// Collect a repeated query parameter, accepting both `name=` and the
/// `name[]=` form produced by browser HTTP clients.
pub(crate) fn list_param(pairs: &[(String, String)], name: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(key, _)| key.strip_suffix("[]").unwrap_or(key) == name)
        .map(|(_, value)| value.clone())
        .collect()
}

/// Value of a single-valued parameter in a raw pair list.
///
/// A parameter given more than once is rejected, the same as the typed
/// query extractors do.
pub(crate) fn single_param(pairs: &[(String, String)], name: &str) -> ProxyResult<Option<String>> {
    let mut values = pairs.iter().filter(|(key, _)| key == name);
    let first = values.next().map(|(_, value)| value.clone());
    if values.next().is_some() {
        return Err(ProxyError::validation(format!("query parameter `{name}` must be given once")));
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_required_rejects_missing_but_keeps_empty() {
        assert!(matches!(
            required("address", None),
            Err(ProxyError::ValidationError { .. })
        ));
        assert_eq!(required("address", Some(String::new())).ok(), Some(String::new()));
    }

    #[test]
    fn test_list_param_accepts_both_forms_in_order() {
        let raw = pairs(&[
            ("dates[]", "1700000000000"),
            ("chain", "eth"),
            ("dates", "1700086400000"),
            ("datesx", "ignored"),
        ]);

        assert_eq!(list_param(&raw, "dates"), vec!["1700000000000", "1700086400000"]);
        assert!(list_param(&raw, "blockNumbers").is_empty());
    }

    #[test]
    fn test_single_param_rejects_repeats() {
        let raw = pairs(&[("chain", "eth"), ("address", "0xabc"), ("chain", "0x89")]);
        assert!(matches!(
            single_param(&raw, "chain"),
            Err(ProxyError::ValidationError { .. })
        ));
        assert_eq!(single_param(&raw, "address").ok().flatten().as_deref(), Some("0xabc"));
        assert!(matches!(single_param(&raw, "cursor"), Ok(None)));
    }
}
