//! # Attributes
//!
//! Raw, unvalidated attributes of a frame or circle as a caller supplies them.
//!
//! A value may be a number, numeric text, or null. A field may also be
//! absent altogether, which matters for updates: an absent field keeps the
//! committed value while a null one clears it (and fails presence).

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::{Field, ValidationErrors, Violation};
use super::geometry;
use super::record::{Circle, CircleGeometry, FrameGeometry, Position};

/// A single raw attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
    Null,
}

/// Outcome of reading one attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed {
    Value(f64),
    Blank,
    NotANumber,
}

impl AttrValue {
    /// Interpret the value as a finite number
    pub fn parse(&self) -> Parsed {
        match self {
            AttrValue::Null => Parsed::Blank,
            AttrValue::Number(n) if n.is_finite() => Parsed::Value(*n),
            AttrValue::Number(_) => Parsed::NotANumber,
            AttrValue::Text(s) if s.trim().is_empty() => Parsed::Blank,
            AttrValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Parsed::Value(n),
                _ => Parsed::NotANumber,
            },
        }
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<Option<f64>> for AttrValue {
    fn from(n: Option<f64>) -> Self {
        n.map_or(AttrValue::Null, AttrValue::Number)
    }
}

/// Keeps an explicit `null` distinguishable from an absent key
fn present<'de, D>(deserializer: D) -> Result<Option<AttrValue>, D::Error>
where
    D: Deserializer<'de>,
{
    AttrValue::deserialize(deserializer).map(Some)
}

/// Presence and numericality of one field
///
/// A missing value is both blank and not a number.
fn read(field: Field, value: Option<&AttrValue>, errors: &mut ValidationErrors) -> Option<f64> {
    match value.map_or(Parsed::Blank, AttrValue::parse) {
        Parsed::Value(n) => Some(n),
        Parsed::Blank => {
            errors.add_field(field, Violation::Blank);
            errors.add_field(field, Violation::NotANumber);
            None
        }
        Parsed::NotANumber => {
            errors.add_field(field, Violation::NotANumber);
            None
        }
    }
}

// ============================================================================
// FRAME
// ============================================================================

/// Frame attributes as supplied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameParams {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub x: Option<AttrValue>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub y: Option<AttrValue>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub width: Option<AttrValue>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub height: Option<AttrValue>,
}

impl FrameParams {
    /// Fully numeric parameters
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
            width: Some(width.into()),
            height: Some(height.into()),
        }
    }

    pub fn with_x(mut self, value: impl Into<AttrValue>) -> Self {
        self.x = Some(value.into());
        self
    }

    pub fn with_y(mut self, value: impl Into<AttrValue>) -> Self {
        self.y = Some(value.into());
        self
    }

    pub fn with_width(mut self, value: impl Into<AttrValue>) -> Self {
        self.width = Some(value.into());
        self
    }

    pub fn with_height(mut self, value: impl Into<AttrValue>) -> Self {
        self.height = Some(value.into());
        self
    }

    /// Read every field, recording presence and numericality failures
    pub fn parse(&self, errors: &mut ValidationErrors) -> ParsedFrame {
        ParsedFrame {
            x: read(Field::X, self.x.as_ref(), errors),
            y: read(Field::Y, self.y.as_ref(), errors),
            width: read(Field::Width, self.width.as_ref(), errors),
            height: read(Field::Height, self.height.as_ref(), errors),
        }
    }
}

impl From<FrameGeometry> for FrameParams {
    fn from(g: FrameGeometry) -> Self {
        Self::new(g.x, g.y, g.width, g.height)
    }
}

/// Frame fields that parsed as numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedFrame {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ParsedFrame {
    /// The geometry, when every field parsed
    pub fn geometry(&self) -> Option<FrameGeometry> {
        Some(FrameGeometry::new(self.x?, self.y?, self.width?, self.height?))
    }
}

// ============================================================================
// CIRCLE
// ============================================================================

/// Circle attributes as supplied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircleParams {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub x: Option<AttrValue>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub y: Option<AttrValue>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub diameter: Option<AttrValue>,
}

impl CircleParams {
    /// Fully numeric parameters
    pub fn new(x: f64, y: f64, diameter: f64) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
            diameter: Some(diameter.into()),
        }
    }

    pub fn with_x(mut self, value: impl Into<AttrValue>) -> Self {
        self.x = Some(value.into());
        self
    }

    pub fn with_y(mut self, value: impl Into<AttrValue>) -> Self {
        self.y = Some(value.into());
        self
    }

    pub fn with_diameter(mut self, value: impl Into<AttrValue>) -> Self {
        self.diameter = Some(value.into());
        self
    }

    /// Apply these params as an update over a committed circle
    ///
    /// Absent fields keep the committed value.
    pub fn merged_over(&self, existing: &Circle) -> CircleParams {
        CircleParams {
            x: Some(self.x.clone().unwrap_or(AttrValue::Number(existing.x))),
            y: Some(self.y.clone().unwrap_or(AttrValue::Number(existing.y))),
            diameter: Some(
                self.diameter
                    .clone()
                    .unwrap_or(AttrValue::Number(existing.diameter)),
            ),
        }
    }

    /// Read every field, recording presence and numericality failures
    pub fn parse(&self, errors: &mut ValidationErrors) -> ParsedCircle {
        ParsedCircle {
            x: read(Field::X, self.x.as_ref(), errors),
            y: read(Field::Y, self.y.as_ref(), errors),
            diameter: read(Field::Diameter, self.diameter.as_ref(), errors),
        }
    }
}

impl From<CircleGeometry> for CircleParams {
    fn from(g: CircleGeometry) -> Self {
        Self::new(g.x, g.y, g.diameter)
    }
}

/// Circle fields that parsed as numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedCircle {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub diameter: Option<f64>,
}

impl ParsedCircle {
    pub fn center(&self) -> Option<Position> {
        Some(Position::new(self.x?, self.y?))
    }

    /// Half the diameter, `0.0` while the diameter is missing
    pub fn radius(&self) -> f64 {
        geometry::radius(self.diameter)
    }

    /// The geometry, when every field parsed
    pub fn geometry(&self) -> Option<CircleGeometry> {
        Some(CircleGeometry::new(self.x?, self.y?, self.diameter?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Id;

    #[test]
    fn test_parse_values() {
        assert_eq!(AttrValue::Number(10.0).parse(), Parsed::Value(10.0));
        assert_eq!(AttrValue::from(" 2.5 ").parse(), Parsed::Value(2.5));
        assert_eq!(AttrValue::from("invalid").parse(), Parsed::NotANumber);
        assert_eq!(AttrValue::from("").parse(), Parsed::Blank);
        assert_eq!(AttrValue::Null.parse(), Parsed::Blank);
        assert_eq!(AttrValue::Number(f64::NAN).parse(), Parsed::NotANumber);
        assert_eq!(AttrValue::from("inf").parse(), Parsed::NotANumber);
    }

    #[test]
    fn test_frame_parse_reports_each_field() {
        let params = FrameParams::new(10.0, 10.0, 5.0, 5.0)
            .with_x(AttrValue::Null)
            .with_height("tall");
        let mut errors = ValidationErrors::new();

        let parsed = params.parse(&mut errors);

        assert_eq!(parsed.geometry(), None);
        assert_eq!(parsed.y, Some(10.0));
        assert_eq!(
            errors.full_messages(),
            vec!["X can't be blank", "X is not a number", "Height is not a number"]
        );
    }

    #[test]
    fn test_circle_parse_missing_diameter() {
        let params = CircleParams::new(1.0, 2.0, 3.0);
        let params = CircleParams {
            diameter: None,
            ..params
        };
        let mut errors = ValidationErrors::new();

        let parsed = params.parse(&mut errors);

        assert_eq!(parsed.radius(), 0.0);
        assert_eq!(parsed.center(), Some(Position::new(1.0, 2.0)));
        assert_eq!(errors.on(Field::Diameter), vec![Violation::Blank, Violation::NotANumber]);
    }

    #[test]
    fn test_merged_over_keeps_absent_fields() {
        let existing = Circle::new(Id::new(1), Id::new(1), CircleGeometry::new(10.0, 10.0, 2.0));
        let update = CircleParams::default().with_x(12.0);

        let merged = update.merged_over(&existing);

        assert_eq!(merged, CircleParams::new(12.0, 10.0, 2.0));
    }

    #[test]
    fn test_deserialize_distinguishes_null_from_absent() {
        let params: CircleParams = serde_json::from_str(r#"{"x": null, "y": 11.0}"#).unwrap();

        assert_eq!(params.x, Some(AttrValue::Null));
        assert_eq!(params.y, Some(AttrValue::Number(11.0)));
        assert_eq!(params.diameter, None);
    }

    #[test]
    fn test_deserialize_integers_and_text() {
        let params: FrameParams =
            serde_json::from_str(r#"{"x": 10, "y": "10.5", "width": 5, "height": 5}"#).unwrap();
        let mut errors = ValidationErrors::new();

        let geometry = params.parse(&mut errors).geometry();

        assert!(errors.is_empty());
        assert_eq!(geometry, Some(FrameGeometry::new(10.0, 10.5, 5.0, 5.0)));
    }
}
