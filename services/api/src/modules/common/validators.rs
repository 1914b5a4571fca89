use super::responses::{field_errors, FieldError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    constants::tracking::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE},
    VehicleType,
};
use std::{borrow::Cow, str::FromStr};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// A request body schema.
///
/// every field of a schema is an untyped, optional JSON value so a missing or
/// wrongly typed field is reported together with every other violation by
/// `validate` instead of failing the whole body at deserialization,
/// `normalize` then turns the validated body into the value the handlers
/// work with.
pub trait RequestSchema: DeserializeOwned + Validate {
    type Normalized;

    /// only called after `validate` succeeded, `None` means a required
    /// field was missing regardless
    fn normalize(self) -> Option<Self::Normalized>;
}

/// Validates an untyped JSON body against a schema, returning the normalized
/// value or every field violation found.
pub fn validate_body<T: RequestSchema>(body: Value) -> Result<T::Normalized, Vec<FieldError>> {
    if !body.is_object() {
        return Err(vec![FieldError::new(
            "body",
            "request body must be a JSON object.",
        )]);
    }

    let schema: T =
        serde_json::from_value(body).map_err(|e| vec![FieldError::new("body", e.to_string())])?;

    schema.validate().map_err(|e| field_errors(&e))?;

    schema
        .normalize()
        .ok_or_else(|| vec![FieldError::new("body", "request body is incomplete.")])
}

/// `Ok` when nothing was added to `errors`
pub fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// a `type` error, `expected` reads as `a string`, `a number`...
fn type_error(expected: &'static str) -> ValidationError {
    let mut error = ValidationError::new("type");
    error.add_param(Cow::from("expected"), &expected);
    error
}

/// Runs `rule` on a required field, a missing (or `null`) field is a
/// `required` error.
pub fn check_required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &Option<Value>,
    rule: fn(&Value) -> Result<(), ValidationError>,
) {
    let result = match value {
        None => Err(ValidationError::new("required")),
        Some(value) => rule(value),
    };

    if let Err(error) = result {
        errors.add(field, error);
    }
}

pub fn validate_string(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::String(_) => Ok(()),
        _ => Err(type_error("a string")),
    }
}

/// a string with at least one non whitespace character
pub fn validate_text(value: &Value) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(text) if text.trim().is_empty() => Err(ValidationError::new("blank")),
        Some(_) => Ok(()),
        None => Err(type_error("a string")),
    }
}

pub fn validate_vehicle_type(value: &Value) -> Result<(), ValidationError> {
    let Some(name) = value.as_str() else {
        return Err(type_error("a string"));
    };

    if VehicleType::from_str(name).is_ok() {
        return Ok(());
    }

    let allowed = VehicleType::to_string_vec();

    let mut error = ValidationError::new("vehicle_type");
    error.message = Some(Cow::from(format!(
        "Invalid vehicle type. Must be {}.",
        quoted_alternatives(&allowed)
    )));
    error.add_param(Cow::from("allowed"), &allowed);

    Err(error)
}

/// Checks a optional coordinate component, adding a `required`, `type` or
/// `range` error for `field` to `errors`.
pub fn validate_coordinate(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&Value>,
    min: f64,
    max: f64,
) {
    let error = match value {
        None | Some(Value::Null) => ValidationError::new("required"),
        Some(value) => match value.as_f64() {
            None => type_error("a number"),
            Some(v) if !(min..=max).contains(&v) => {
                let mut error = ValidationError::new("range");
                error.add_param(Cow::from("min"), &min);
                error.add_param(Cow::from("max"), &max);
                error.add_param(Cow::from("value"), &v);
                error
            }
            Some(_) => return,
        },
    };

    errors.add(field, error);
}

/// Checks a required `{ lat, lng }` object, errors of its components are
/// nested under `field` so they are reported as `field.lat` / `field.lng`
pub fn validate_point(errors: &mut ValidationErrors, field: &'static str, value: &Option<Value>) {
    let point = match value {
        None => return errors.add(field, ValidationError::new("required")),
        Some(Value::Object(point)) => point,
        Some(_) => return errors.add(field, type_error("an object")),
    };

    let mut nested = ValidationErrors::new();

    validate_coordinate(&mut nested, "lat", point.get("lat"), MIN_LATITUDE, MAX_LATITUDE);
    validate_coordinate(&mut nested, "lng", point.get("lng"), MIN_LONGITUDE, MAX_LONGITUDE);

    if !nested.is_empty() {
        errors
            .errors_mut()
            .insert(field, ValidationErrorsKind::Struct(Box::new(nested)));
    }
}

/// `["a", "b", "c"]` -> `'a', 'b', or 'c'`
fn quoted_alternatives(items: &[String]) -> String {
    let quoted = items.iter().map(|i| format!("'{i}'")).collect::<Vec<_>>();

    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [a, b] => format!("{a} or {b}"),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(validate_text(&json!("S1")).is_ok());
        assert_eq!(validate_text(&json!("   ")).unwrap_err().code, "blank");
        assert_eq!(validate_text(&json!("")).unwrap_err().code, "blank");
    }

    #[test]
    fn non_strings_are_type_errors() {
        assert_eq!(validate_text(&json!(123)).unwrap_err().code, "type");
        assert_eq!(validate_string(&json!(["a"])).unwrap_err().code, "type");
        assert_eq!(validate_vehicle_type(&json!(true)).unwrap_err().code, "type");
        assert!(validate_string(&json!("")).is_ok());
    }

    #[test]
    fn vehicle_type_error_names_the_allowed_values() {
        assert!(validate_vehicle_type(&json!("ambulance")).is_ok());

        let error = validate_vehicle_type(&json!("car")).unwrap_err();

        assert_eq!(
            error.message.as_deref(),
            Some("Invalid vehicle type. Must be 'ambulance', 'firetruck', or 'other'.")
        );
    }

    #[test]
    fn coordinate_errors() {
        let mut errors = ValidationErrors::new();

        validate_coordinate(&mut errors, "lat", Some(&json!(91.0)), -90.0, 90.0);
        validate_coordinate(&mut errors, "lng", None, -180.0, 180.0);

        let errs = errors.field_errors();
        assert_eq!(errs["lat"][0].code, "range");
        assert_eq!(errs["lng"][0].code, "required");

        let mut errors = ValidationErrors::new();
        validate_coordinate(&mut errors, "lat", Some(&json!("19.02")), -90.0, 90.0);
        assert_eq!(errors.field_errors()["lat"][0].code, "type");
    }

    #[test]
    fn coordinate_bounds_are_inclusive() {
        let mut errors = ValidationErrors::new();

        validate_coordinate(&mut errors, "lat", Some(&json!(-90)), -90.0, 90.0);
        validate_coordinate(&mut errors, "lng", Some(&json!(180.0)), -180.0, 180.0);

        assert!(errors.is_empty());
    }

    #[test]
    fn point_errors_are_nested_under_the_field() {
        let mut errors = ValidationErrors::new();

        validate_point(&mut errors, "source", &Some(json!({ "lat": 100.0 })));
        validate_point(&mut errors, "destination", &Some(json!("here")));
        validate_point(&mut errors, "other", &None);

        let fields = field_errors(&errors)
            .into_iter()
            .map(|e| e.field)
            .collect::<Vec<_>>();

        assert_eq!(
            fields,
            vec!["destination", "other", "source.lat", "source.lng"]
        );
    }

    #[test]
    fn non_object_body_is_rejected_as_a_whole() {
        #[derive(serde::Deserialize, Debug)]
        struct Named {
            name: Option<Value>,
        }

        impl Validate for Named {
            fn validate(&self) -> Result<(), ValidationErrors> {
                let mut errors = ValidationErrors::new();
                check_required(&mut errors, "name", &self.name, validate_text);
                into_result(errors)
            }
        }

        impl RequestSchema for Named {
            type Normalized = String;

            fn normalize(self) -> Option<String> {
                self.name?.as_str().map(String::from)
            }
        }

        let errors = validate_body::<Named>(json!(["a"])).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("body", "request body must be a JSON object.")]);

        let errors = validate_body::<Named>(json!({ "name": 1 })).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("name", "name must be a string.")]);

        assert_eq!(validate_body::<Named>(json!({ "name": "x" })).unwrap(), "x");
    }

    #[test]
    fn alternatives() {
        let items = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(quoted_alternatives(&items(&["a"])), "'a'");
        assert_eq!(quoted_alternatives(&items(&["a", "b"])), "'a' or 'b'");
        assert_eq!(
            quoted_alternatives(&items(&["a", "b", "c"])),
            "'a', 'b', or 'c'"
        );
    }
}
