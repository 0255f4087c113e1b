//! # Validation Errors
//!
//! Rule violations collected while checking a candidate record.
//!
//! Errors are either scoped to a field (`X can't be blank`) or attached to
//! the record as a whole (`Circle must be completely inside the frame`).
//! Checkers never stop at the first violation; every failing rule reports.

use serde::Serialize;
use thiserror::Error;

/// Attribute a field-scoped error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    X,
    Y,
    Width,
    Height,
    Diameter,
    Frame,
}

impl Field {
    /// Human label used as the message prefix
    pub fn label(&self) -> &'static str {
        match self {
            Field::X => "X",
            Field::Y => "Y",
            Field::Width => "Width",
            Field::Height => "Height",
            Field::Diameter => "Diameter",
            Field::Frame => "Frame",
        }
    }
}

/// A single broken rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    #[error("can't be blank")]
    Blank,

    #[error("is not a number")]
    NotANumber,

    #[error("must be greater than 0")]
    NotPositive,

    #[error("must exist")]
    Missing,

    #[error("Frame cannot touch or overlap another frame")]
    FrameOverlap,

    #[error("Circle must be completely inside the frame")]
    OutsideFrame,

    #[error("Circle collides with another circle within the same frame")]
    CircleCollision,
}

/// A violation, optionally scoped to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: Option<Field>,
    pub violation: Violation,
}

impl ValidationError {
    pub fn field(field: Field, violation: Violation) -> Self {
        Self {
            field: Some(field),
            violation,
        }
    }

    pub fn base(violation: Violation) -> Self {
        Self {
            field: None,
            violation,
        }
    }

    /// Full message, prefixed by the field label when field-scoped
    pub fn full_message(&self) -> String {
        match self.field {
            Some(field) => format!("{} {}", field.label(), self.violation),
            None => self.violation.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_message())
    }
}

/// Ordered collection of violations for one candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn add_field(&mut self, field: Field, violation: Violation) {
        self.add(ValidationError::field(field, violation));
    }

    pub fn add_base(&mut self, violation: Violation) {
        self.add(ValidationError::base(violation));
    }

    /// Add a base violation unless it is already recorded
    pub fn add_base_once(&mut self, violation: Violation) {
        if !self.has_base(violation) {
            self.add_base(violation);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Violations recorded against `field`
    pub fn on(&self, field: Field) -> Vec<Violation> {
        self.0
            .iter()
            .filter(|e| e.field == Some(field))
            .map(|e| e.violation)
            .collect()
    }

    /// Violations recorded against the record as a whole
    pub fn on_base(&self) -> Vec<Violation> {
        self.0
            .iter()
            .filter(|e| e.field.is_none())
            .map(|e| e.violation)
            .collect()
    }

    pub fn has_base(&self, violation: Violation) -> bool {
        self.0
            .iter()
            .any(|e| e.field.is_none() && e.violation == violation)
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.0.iter().map(ValidationError::full_message).collect()
    }

    /// `Ok(value)` when nothing was recorded, the errors otherwise
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_messages() {
        let mut errors = ValidationErrors::new();
        errors.add_field(Field::X, Violation::Blank);
        errors.add_field(Field::Width, Violation::NotANumber);
        errors.add_base(Violation::OutsideFrame);

        assert_eq!(
            errors.full_messages(),
            vec![
                "X can't be blank",
                "Width is not a number",
                "Circle must be completely inside the frame",
            ]
        );
    }

    #[test]
    fn test_scoped_lookups() {
        let mut errors = ValidationErrors::new();
        errors.add_field(Field::Diameter, Violation::NotPositive);
        errors.add_base(Violation::CircleCollision);
        errors.add_base(Violation::CircleCollision);

        assert_eq!(errors.on(Field::Diameter), vec![Violation::NotPositive]);
        assert!(errors.on(Field::X).is_empty());
        assert_eq!(errors.on_base().len(), 2);
        assert!(errors.has_base(Violation::CircleCollision));
        assert!(!errors.has_base(Violation::OutsideFrame));
    }

    #[test]
    fn test_add_base_once() {
        let mut errors = ValidationErrors::new();
        errors.add_base_once(Violation::FrameOverlap);
        errors.add_base_once(Violation::FrameOverlap);

        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(5), Ok(5));

        let mut errors = ValidationErrors::new();
        errors.add_field(Field::Frame, Violation::Missing);
        let err = errors.into_result(5).unwrap_err();
        assert_eq!(err.to_string(), "Frame must exist");
    }
}
