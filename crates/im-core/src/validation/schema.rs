use chrono::Datelike;

use super::FieldRule;
use crate::config::ValidationConfig;
use crate::registration::fields;

/// Rules attached to one field, checked in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rules: Vec<FieldRule>,
}

/// Ordered field rules of one form step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepSchema {
    fields: Vec<FieldSpec>,
}

impl StepSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Later calls with the same name replace the earlier rules.
    pub fn field(mut self, name: &'static str, rules: Vec<FieldRule>) -> Self {
        match self.fields.iter_mut().find(|spec| spec.name == name) {
            Some(spec) => spec.rules = rules,
            None => self.fields.push(FieldSpec { name, rules }),
        }
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|spec| spec.name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|spec| spec.name == name)
    }

    pub fn personal_info(config: &ValidationConfig) -> Self {
        Self::new()
            .field(fields::FIRST_NAME, vec![FieldRule::MinLength(2)])
            .field(fields::LAST_NAME, vec![FieldRule::MinLength(2)])
            .field(fields::EMAIL, vec![FieldRule::EmailShape])
            .field(fields::PHONE, vec![FieldRule::MinLength(10)])
            .field(
                fields::COUNTRY,
                vec![
                    FieldRule::Required,
                    FieldRule::one_of(config.countries.iter().cloned()),
                ],
            )
    }

    pub fn business_info(config: &ValidationConfig, latest_year: i32) -> Self {
        Self::new()
            .field(fields::BUSINESS_NAME, vec![FieldRule::MinLength(2)])
            .field(
                fields::BUSINESS_TYPE,
                vec![
                    FieldRule::Required,
                    FieldRule::one_of(config.business_types.iter().cloned()),
                ],
            )
            .field(fields::REGISTRATION_NUMBER, vec![FieldRule::Required])
            .field(
                fields::FOUNDED_YEAR,
                vec![FieldRule::NumericYear {
                    earliest: config.earliest_founded_year,
                    latest: latest_year,
                }],
            )
            .field(fields::WEBSITE, vec![FieldRule::OptionalUrl])
    }

    pub fn login() -> Self {
        Self::new()
            .field(fields::IDENTIFIER, vec![FieldRule::EmailShape])
            .field(fields::SECRET, vec![FieldRule::Required])
    }
}

/// The schemas used by the onboarding flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSchemas {
    pub personal_info: StepSchema,
    pub business_info: StepSchema,
    pub login: StepSchema,
}

impl StepSchemas {
    /// Build schemas with the current calendar year as the latest founding year.
    pub fn new(config: &ValidationConfig) -> Self {
        Self::with_latest_year(config, chrono::Utc::now().year())
    }

    pub fn with_latest_year(config: &ValidationConfig, latest_year: i32) -> Self {
        Self {
            personal_info: StepSchema::personal_info(config),
            business_info: StepSchema::business_info(config, latest_year),
            login: StepSchema::login(),
        }
    }
}
