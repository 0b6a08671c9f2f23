use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationErrorKind;

static EMAIL_SHAPE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// A single validation predicate attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Trimmed value must not be empty.
    Required,
    /// Trimmed value must have at least `n` characters.
    MinLength(usize),
    /// Value must look like `local@domain.tld`.
    EmailShape,
    /// Trimmed value must be a year between `earliest` and `latest`, inclusive.
    NumericYear { earliest: i32, latest: i32 },
    /// Empty is accepted; anything else must parse as an absolute URL.
    OptionalUrl,
    /// Trimmed value must be one of `allowed`.
    OneOf(Arc<[String]>),
}

impl FieldRule {
    pub fn one_of<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(allowed.into_iter().map(Into::into).collect())
    }

    /// Error kind produced when this rule fails.
    pub fn error_kind(&self) -> ValidationErrorKind {
        match self {
            Self::Required => ValidationErrorKind::Required,
            Self::MinLength(min) => ValidationErrorKind::MinLength { min: *min },
            Self::EmailShape => ValidationErrorKind::EmailShape,
            Self::NumericYear { .. } => ValidationErrorKind::NumericYear,
            Self::OptionalUrl => ValidationErrorKind::UrlShape,
            Self::OneOf(_) => ValidationErrorKind::EnumMembership,
        }
    }

    pub fn check(&self, value: &str) -> Result<(), ValidationErrorKind> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(self.error_kind())
        }
    }

    fn accepts(&self, value: &str) -> bool {
        let trimmed = value.trim();
        match self {
            Self::Required => !trimmed.is_empty(),
            Self::MinLength(min) => trimmed.chars().count() >= *min,
            Self::EmailShape => EMAIL_SHAPE
                .as_ref()
                .is_some_and(|re| re.is_match(trimmed)),
            Self::NumericYear { earliest, latest } => {
                trimmed.chars().count() >= 4
                    && trimmed.chars().all(|c| c.is_ascii_digit())
                    && trimmed
                        .parse::<i32>()
                        .is_ok_and(|year| (*earliest..=*latest).contains(&year))
            }
            Self::OptionalUrl => trimmed.is_empty() || url::Url::parse(trimmed).is_ok(),
            Self::OneOf(allowed) => allowed.iter().any(|candidate| candidate == trimmed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_length_counts_trimmed_characters() {
        let rule = FieldRule::MinLength(2);
        assert!(rule.check("Al").is_ok());
        assert!(rule.check("  Al  ").is_ok());
        assert_eq!(
            rule.check(" X "),
            Err(ValidationErrorKind::MinLength { min: 2 })
        );
        // multi-byte names count characters, not bytes
        assert_eq!(
            rule.check("é"),
            Err(ValidationErrorKind::MinLength { min: 2 })
        );
        assert!(rule.check("Zoë").is_ok());
    }

    #[test]
    fn email_shape_requires_local_domain_and_tld() {
        let rule = FieldRule::EmailShape;
        assert!(rule.check("a@b.com").is_ok());
        assert!(rule.check("john.doe@example.co.uk").is_ok());
        for bad in ["", "a@b", "@b.com", "a b@c.com", "a@@b.com", "plain"] {
            assert_eq!(rule.check(bad), Err(ValidationErrorKind::EmailShape), "{bad}");
        }
    }

    #[test]
    fn numeric_year_rejects_short_non_numeric_and_out_of_range() {
        let rule = FieldRule::NumericYear {
            earliest: 1800,
            latest: 2024,
        };
        assert!(rule.check("2020").is_ok());
        assert!(rule.check(" 1800 ").is_ok());
        for bad in ["", "202", "20a0", "-2020", "1799", "2025", "99999"] {
            assert_eq!(rule.check(bad), Err(ValidationErrorKind::NumericYear), "{bad}");
        }
    }

    #[test]
    fn optional_url_requires_scheme_when_present() {
        let rule = FieldRule::OptionalUrl;
        assert!(rule.check("").is_ok());
        assert!(rule.check("   ").is_ok());
        assert!(rule.check("https://www.example.com").is_ok());
        for bad in ["not-a-url", "www.example.com", "/relative/path"] {
            assert_eq!(rule.check(bad), Err(ValidationErrorKind::UrlShape), "{bad}");
        }
    }

    #[test]
    fn one_of_matches_exact_codes() {
        let rule = FieldRule::one_of(["us", "ca"]);
        assert!(rule.check("us").is_ok());
        assert_eq!(rule.check("US"), Err(ValidationErrorKind::EnumMembership));
        assert_eq!(rule.check(""), Err(ValidationErrorKind::EnumMembership));
    }
}
