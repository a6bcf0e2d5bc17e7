//! The filter request: a flat record of independent, optional axes.
//!
//! Every axis is caller supplied and may be absent. Parallel arrays
//! (`filter_by`/`filter`, `sort_by`/`sort`, ...) must line up; the compiler
//! treats a misaligned axis as inert, while [`FilterRequest::validate`] reports
//! it for callers that prefer to reject such requests.

use serde::{Deserialize, Deserializer, Serialize};
use sieve_types::Value;
use thiserror::Error;

use crate::path::FieldPath;
use crate::select::SortDirection;

/// Combinator across the entries of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    And,
    Or,
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("and") {
            Ok(Condition::And)
        } else if s.eq_ignore_ascii_case("or") {
            Ok(Condition::Or)
        } else {
            Err(serde::de::Error::unknown_variant(&s, &["and", "or"]))
        }
    }
}

/// Which row represents its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupSort {
    Max,
    Min,
}

impl GroupSort {
    pub(crate) fn direction(self) -> SortDirection {
        match self {
            GroupSort::Max => SortDirection::Desc,
            GroupSort::Min => SortDirection::Asc,
        }
    }
}

impl<'de> Deserialize<'de> for GroupSort {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("max") {
            Ok(GroupSort::Max)
        } else if s.eq_ignore_ascii_case("min") {
            Ok(GroupSort::Min)
        } else {
            Err(serde::de::Error::unknown_variant(&s, &["MAX", "MIN"]))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    pub filter_by: Vec<String>,
    pub filter: Vec<Vec<Value>>,
    pub filter_condition: Condition,

    pub filter_nested_by: Vec<String>,
    pub filter_nested: Vec<Vec<Value>>,
    pub filter_nested_condition: Condition,

    pub filter_nested_parent_by: Vec<String>,
    pub filter_nested_parent: Vec<Vec<Value>>,
    pub filter_nested_parent_condition: Condition,

    pub filter_m2m_by: Vec<String>,
    pub filter_m2m: Vec<Vec<Value>>,
    pub filter_m2m_condition: Condition,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub search_by: Vec<String>,

    #[serde(alias = "start_date", skip_serializing_if = "Option::is_none")]
    pub start: Option<Value>,
    #[serde(alias = "filter_date_start_by", skip_serializing_if = "Option::is_none")]
    pub start_by: Option<String>,
    #[serde(alias = "end_date", skip_serializing_if = "Option::is_none")]
    pub end: Option<Value>,
    #[serde(alias = "filter_date_end_by", skip_serializing_if = "Option::is_none")]
    pub end_by: Option<String>,
    pub start_and_end_condition: Condition,

    #[serde(deserialize_with = "one_or_many")]
    pub sort: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub sort_by: Vec<String>,

    pub group_by: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_sort: Option<GroupSort>,

    pub preload: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u64>,
}

fn values<I, V>(values: I) -> Vec<Value>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    values.into_iter().map(Into::into).collect()
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `filter_by`/`filter` pair.
    pub fn filter_by<I, V>(mut self, field: impl Into<String>, vals: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter_by.push(field.into());
        self.filter.push(values(vals));
        self
    }

    pub fn filter_condition(mut self, condition: Condition) -> Self {
        self.filter_condition = condition;
        self
    }

    pub fn filter_nested_by<I, V>(mut self, field: impl Into<String>, vals: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter_nested_by.push(field.into());
        self.filter_nested.push(values(vals));
        self
    }

    pub fn filter_nested_condition(mut self, condition: Condition) -> Self {
        self.filter_nested_condition = condition;
        self
    }

    pub fn filter_nested_parent_by<I, V>(mut self, field: impl Into<String>, vals: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter_nested_parent_by.push(field.into());
        self.filter_nested_parent.push(values(vals));
        self
    }

    pub fn filter_nested_parent_condition(mut self, condition: Condition) -> Self {
        self.filter_nested_parent_condition = condition;
        self
    }

    pub fn filter_m2m_by<I, V>(mut self, field: impl Into<String>, vals: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter_m2m_by.push(field.into());
        self.filter_m2m.push(values(vals));
        self
    }

    pub fn filter_m2m_condition(mut self, condition: Condition) -> Self {
        self.filter_m2m_condition = condition;
        self
    }

    pub fn search<I, S>(mut self, term: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search = Some(term.into());
        self.search_by = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn start(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.start_by = Some(field.into());
        self.start = Some(value.into());
        self
    }

    pub fn end(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.end_by = Some(field.into());
        self.end = Some(value.into());
        self
    }

    pub fn start_and_end_condition(mut self, condition: Condition) -> Self {
        self.start_and_end_condition = condition;
        self
    }

    /// Appends one ordering entry.
    pub fn sort_by(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort_by.push(field.into());
        self.sort.push(direction.into());
        self
    }

    pub fn group_by<I, S>(mut self, keys: I, sort_by: impl Into<String>, sort: GroupSort) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = keys.into_iter().map(Into::into).collect();
        self.group_sort_by = Some(sort_by.into());
        self.group_sort = Some(sort);
        self
    }

    pub fn preload(mut self, relation: impl Into<String>) -> Self {
        self.preload.push(relation.into());
        self
    }

    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// `(skip, take)` when both `page` and `per_page` are at least 1.
    pub fn pagination(&self) -> Option<(u64, u64)> {
        match (self.page, self.per_page) {
            (Some(page), Some(per_page)) if page >= 1 && per_page >= 1 => {
                Some(((page - 1).saturating_mul(per_page), per_page))
            }
            _ => None,
        }
    }

    /// Strict validation for callers that reject malformed requests instead
    /// of letting the affected axes go inert.
    ///
    /// ```
    /// use sieve_core::request::{FilterRequest, ValidationError};
    ///
    /// let mut request = FilterRequest::new().filter_by("status", ["active"]);
    /// assert!(request.validate().is_ok());
    ///
    /// request.filter.clear();
    /// assert!(matches!(
    ///     request.validate(),
    ///     Err(ValidationError::MissingPair { present: "filter_by", missing: "filter" })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        let search = self.search.as_deref().is_some_and(|s| !s.trim().is_empty());
        let group = [
            !self.group_by.is_empty(),
            self.group_sort_by.is_some(),
            self.group_sort.is_some(),
        ];

        let pairs: [(&'static str, bool, &'static str, bool); 11] = [
            ("filter_by", !self.filter_by.is_empty(), "filter", !self.filter.is_empty()),
            (
                "filter_nested_by",
                !self.filter_nested_by.is_empty(),
                "filter_nested",
                !self.filter_nested.is_empty(),
            ),
            (
                "filter_nested_parent_by",
                !self.filter_nested_parent_by.is_empty(),
                "filter_nested_parent",
                !self.filter_nested_parent.is_empty(),
            ),
            ("filter_m2m_by", !self.filter_m2m_by.is_empty(), "filter_m2m", !self.filter_m2m.is_empty()),
            ("search", search, "search_by", !self.search_by.is_empty()),
            ("start", self.start.is_some(), "start_by", self.start_by.is_some()),
            ("end", self.end.is_some(), "end_by", self.end_by.is_some()),
            ("sort", !self.sort.is_empty(), "sort_by", !self.sort_by.is_empty()),
            ("page", self.page.is_some(), "per_page", self.per_page.is_some()),
            ("group_by", group[0], "group_sort_by", group[1]),
            ("group_by", group[0], "group_sort", group[2]),
        ];
        for (left, has_left, right, has_right) in pairs {
            match (has_left, has_right) {
                (true, false) => return Err(ValidationError::MissingPair { present: left, missing: right }),
                (false, true) => return Err(ValidationError::MissingPair { present: right, missing: left }),
                _ => {}
            }
        }

        let lengths = [
            ("filter_by", self.filter_by.len(), "filter", self.filter.len()),
            ("filter_nested_by", self.filter_nested_by.len(), "filter_nested", self.filter_nested.len()),
            (
                "filter_nested_parent_by",
                self.filter_nested_parent_by.len(),
                "filter_nested_parent",
                self.filter_nested_parent.len(),
            ),
            ("filter_m2m_by", self.filter_m2m_by.len(), "filter_m2m", self.filter_m2m.len()),
            ("sort_by", self.sort_by.len(), "sort", self.sort.len()),
        ];
        for (left, left_len, right, right_len) in lengths {
            if left_len != right_len {
                return Err(ValidationError::LengthMismatch { left, left_len, right, right_len });
            }
        }

        for (field, value) in [("page", self.page), ("per_page", self.per_page)] {
            if value == Some(0) {
                return Err(ValidationError::NotPositive { field });
            }
        }

        check_paths("filter_by", &self.filter_by, FieldPath::root)?;
        check_paths("filter_nested_by", &self.filter_nested_by, FieldPath::relation)?;
        check_paths("filter_nested_parent_by", &self.filter_nested_parent_by, FieldPath::parent)?;
        check_paths("filter_m2m_by", &self.filter_m2m_by, |p| {
            FieldPath::relation(p).filter(|p| p.json_key().is_none())
        })?;
        check_paths("search_by", &self.search_by, FieldPath::root)?;
        check_paths("start_by", self.start_by.as_slice(), FieldPath::root)?;
        check_paths("end_by", self.end_by.as_slice(), FieldPath::root)?;
        check_paths("sort_by", &self.sort_by, FieldPath::root)?;
        check_paths("group_by", &self.group_by, FieldPath::root)?;
        check_paths("group_sort_by", self.group_sort_by.as_slice(), FieldPath::root)?;

        if let Some(bad) = self.sort.iter().find(|s| SortDirection::parse(s).is_none()) {
            return Err(ValidationError::InvalidSort { value: bad.clone() });
        }
        Ok(())
    }
}

fn check_paths(
    field: &'static str,
    paths: &[String],
    parse: impl Fn(&str) -> Option<FieldPath>,
) -> Result<(), ValidationError> {
    match paths.iter().find(|p| parse(p.as_str()).is_none()) {
        Some(bad) => Err(ValidationError::InvalidPath { field, value: bad.clone() }),
        None => Ok(()),
    }
}

/// Why a request failed [`FilterRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{present}` requires `{missing}`")]
    MissingPair {
        present: &'static str,
        missing: &'static str,
    },

    #[error("`{left}` has {left_len} entries but `{right}` has {right_len}")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    #[error("`{field}` must be at least 1")]
    NotPositive { field: &'static str },

    #[error("`{value}` is not a valid `{field}` path")]
    InvalidPath { field: &'static str, value: String },

    #[error("`{value}` is not a sort direction, expected ASC or DESC")]
    InvalidSort { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_aliases_and_single_sort() {
        let request: FilterRequest = serde_json::from_value(serde_json::json!({
            "filter_by": ["status"],
            "filter": [["active", "!banned"]],
            "filter_condition": "OR",
            "filter_date_start_by": "created_at",
            "start_date": "2024-01-01",
            "sort_by": "name",
            "sort": "desc",
            "group_sort": "max",
            "page": 2,
            "per_page": 10
        }))
        .unwrap();

        assert_eq!(request.filter_condition, Condition::Or);
        assert_eq!(request.start_by.as_deref(), Some("created_at"));
        assert_eq!(request.start, Some(Value::from("2024-01-01")));
        assert_eq!(request.sort_by, vec!["name".to_string()]);
        assert_eq!(request.sort, vec!["desc".to_string()]);
        assert_eq!(request.group_sort, Some(GroupSort::Max));
        assert_eq!(request.pagination(), Some((10, 10)));
    }

    #[test]
    fn mixed_value_types_deserialize() {
        let request: FilterRequest =
            serde_json::from_str(r#"{"filter_by":["age"],"filter":[[1, 2.5, true, null]]}"#).unwrap();
        assert_eq!(
            request.filter[0],
            vec![Value::Integer(1), Value::Real(2.5), Value::Bool(true), Value::Null]
        );
    }

    #[test]
    fn unknown_condition_is_rejected() {
        let err = serde_json::from_str::<FilterRequest>(r#"{"filter_condition":"xor"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn pagination_needs_both_positive() {
        assert_eq!(FilterRequest::new().pagination(), None);
        assert_eq!(FilterRequest::new().paginate(0, 10).pagination(), None);
        assert_eq!(FilterRequest::new().paginate(1, 0).pagination(), None);
        assert_eq!(FilterRequest::new().paginate(3, 25).pagination(), Some((50, 25)));
    }

    #[test]
    fn validate_checks_lengths_and_paths() {
        let mut request = FilterRequest::new().sort_by("name", "asc");
        request.sort.push("desc".into());
        assert_eq!(
            request.validate(),
            Err(ValidationError::LengthMismatch {
                left: "sort_by",
                left_len: 1,
                right: "sort",
                right_len: 2,
            })
        );

        let request = FilterRequest::new().filter_m2m_by("roles.meta.key", ["x"]);
        assert!(matches!(request.validate(), Err(ValidationError::InvalidPath { field: "filter_m2m_by", .. })));

        let request = FilterRequest::new().sort_by("name", "sideways");
        assert!(matches!(request.validate(), Err(ValidationError::InvalidSort { .. })));
    }

    #[test]
    fn validate_requires_the_group_triple() {
        let mut request = FilterRequest::new().group_by(["category"], "price", GroupSort::Max);
        assert!(request.validate().is_ok());
        request.group_sort = None;
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingPair { present: "group_by", missing: "group_sort" })
        );
    }

    #[test]
    fn validate_rejects_zero_page() {
        let request = FilterRequest::new().paginate(0, 10);
        assert_eq!(request.validate(), Err(ValidationError::NotPositive { field: "page" }));
    }
}
