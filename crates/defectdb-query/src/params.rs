//! Decoding list-page URL query parameters into a [`ListState`].

use std::str::FromStr;

use defectdb_core::types::{DefectCategory, Severity};
use defectdb_core::{Error, Result};

use crate::engine::ListState;
use crate::filter::{DefectQuery, TextTarget};
use crate::sort::{SortDirection, SortField};

/// Raw list parameters as they arrive from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub query: DefectQuery,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort_field: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
}

impl ListParams {
    /// Parse `item=wire&page=2&sortField=process`. `+` decodes to a space.
    pub fn from_query_string(qs: &str) -> Result<Self> {
        let qs = qs.strip_prefix('?').unwrap_or(qs);
        Self::from_pairs(url::form_urlencoded::parse(qs.as_bytes()))
    }

    /// Parse already-split key/value pairs. Unknown keys are skipped and empty
    /// values count as absent. Text fragments are kept as given, whitespace
    /// included; blank non-text values count as absent.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            if value.is_empty() {
                continue;
            }
            if TextTarget::from_name(key).is_some() {
                params.query.set_text(key, value);
                continue;
            }
            if value.trim().is_empty() {
                continue;
            }
            match key {
                "page" => params.page = Some(parse_page(value)?),
                "pageSize" | "limit" => params.page_size = Some(parse_positive(key, value)?),
                "sortField" => params.sort_field = Some(value.parse()?),
                "sortDirection" => params.sort_direction = Some(value.parse()?),
                "categoryCode" => params.query.category = Some(DefectCategory::from_str(value)?),
                "severity" => params.query.severity = Some(Severity::from_str(value)?),
                "isActive" => params.query.is_active = Some(parse_bool(value)?),
                other => tracing::warn!(key = other, "ignoring unknown query parameter"),
            }
        }
        Ok(params)
    }

    /// Build list state; a missing page size falls back to `default_page_size`.
    pub fn into_state(self, default_page_size: usize) -> Result<ListState> {
        let mut state = ListState::new(self.page_size.unwrap_or(default_page_size))?;
        state.set_query(self.query);
        let direction = match (self.sort_field, self.sort_direction) {
            (Some(_), None) => SortDirection::Asc,
            (_, d) => d.unwrap_or_default(),
        };
        state.set_sort(self.sort_field, direction);
        state.goto_page(self.page.unwrap_or(1));
        Ok(state)
    }
}

/// Pages below 1 are accepted and clamped later, pages beyond `usize`
/// saturate; only non-integers fail.
fn parse_page(value: &str) -> Result<usize> {
    let trimmed = value.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidArgument(format!("page must be an integer, got '{value}'")));
    }
    if negative {
        return Ok(0);
    }
    Ok(digits.parse::<usize>().unwrap_or(usize::MAX))
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidArgument(format!("{key} must be a positive integer, got '{value}'"))),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::InvalidArgument(format!("isActive must be a boolean, got '{value}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_page_becomes_zero() {
        assert_eq!(parse_page("-3").unwrap(), 0);
        assert_eq!(parse_page("-99999999999999999999").unwrap(), 0);
        assert!(parse_page("two").is_err());
        assert!(parse_page("-").is_err());
        assert!(parse_page("2.5").is_err());
    }

    #[test]
    fn oversized_page_saturates() {
        assert_eq!(parse_page("99999999999999999999").unwrap(), usize::MAX);
        assert_eq!(parse_page("+4").unwrap(), 4);
    }

    #[test]
    fn bool_spellings() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
