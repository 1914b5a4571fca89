use crate::modules::common::validators::{
    check_required, into_result, validate_point, validate_string, validate_text,
    validate_vehicle_type, RequestSchema,
};
use chrono::{DateTime, FixedOffset};
use entity::tracking_record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{
    constants::tracking::{DEFAULT_MESSAGE, MISSING_COORDINATES},
    VehicleType,
};
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// A latitude / longitude pair in degrees
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    /// latitude, within [-90, 90]
    pub lat: f64,

    /// longitude, within [-180, 180]
    pub lng: f64,
}

impl GeoPoint {
    fn from_pair(pair: Option<(f64, f64)>) -> Option<GeoPoint> {
        pair.map(|(lat, lng)| GeoPoint { lat, lng })
    }

    /// parses a point that already passed `validate_point`
    fn from_value(value: Value) -> Option<GeoPoint> {
        serde_json::from_value(value).ok()
    }

    pub fn is_valid(&self) -> bool {
        shared::constants::tracking::is_valid_point(self.lat, self.lng)
    }
}

/// trimmed content of a string value
fn trimmed(value: Value) -> Option<String> {
    value.as_str().map(|s| s.trim().to_string())
}

/// A validated tracking record ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrackingRecord {
    pub serial_no: String,
    pub type_of_vehicle: VehicleType,
    pub vehicle_number: String,
    pub source: GeoPoint,
    pub destination: GeoPoint,
    pub message: String,
}

/// Registration of a vehicle by its driver
#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct RegisterDriverDto {
    #[schema(value_type = String, example = "S1")]
    pub serial_no: Option<Value>,

    #[schema(value_type = VehicleType)]
    pub type_of_vehicle: Option<Value>,

    #[schema(value_type = String, example = "MH01AB1234")]
    pub vehicle_number: Option<Value>,

    #[schema(value_type = GeoPoint)]
    pub source: Option<Value>,

    #[schema(value_type = GeoPoint)]
    pub destination: Option<Value>,

    /// defaults to "No message provided."
    #[schema(value_type = Option<String>)]
    pub message: Option<Value>,
}

impl Validate for RegisterDriverDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_required(&mut errors, "serial_no", &self.serial_no, validate_text);
        check_required(&mut errors, "type_of_vehicle", &self.type_of_vehicle, validate_vehicle_type);
        check_required(&mut errors, "vehicle_number", &self.vehicle_number, validate_text);
        validate_point(&mut errors, "source", &self.source);
        validate_point(&mut errors, "destination", &self.destination);

        if let Some(Err(error)) = self.message.as_ref().map(validate_string) {
            errors.add("message", error);
        }

        into_result(errors)
    }
}

impl RequestSchema for RegisterDriverDto {
    type Normalized = NewTrackingRecord;

    fn normalize(self) -> Option<NewTrackingRecord> {
        let message = match self.message.as_ref().and_then(Value::as_str) {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ => String::from(DEFAULT_MESSAGE),
        };

        let type_of_vehicle = self.type_of_vehicle?;

        Some(NewTrackingRecord {
            serial_no: trimmed(self.serial_no?)?,
            type_of_vehicle: VehicleType::from_str(type_of_vehicle.as_str()?).ok()?,
            vehicle_number: trimmed(self.vehicle_number?)?,
            source: GeoPoint::from_value(self.source?)?,
            destination: GeoPoint::from_value(self.destination?)?,
            message,
        })
    }
}

/// A message a dispatcher leaves for the driver of a record
///
/// whitespace only messages are rejected like empty ones
#[derive(Deserialize, Validate, ToSchema, Debug, Default)]
pub struct SetMessageDto {
    #[schema(value_type = String, example = "S1")]
    #[validate(required, custom = "validate_text")]
    pub serial_no: Option<Value>,

    #[schema(value_type = String, example = "Clear the way")]
    #[validate(required, custom = "validate_text")]
    pub message: Option<Value>,
}

impl RequestSchema for SetMessageDto {
    /// `(serial_no, message)`
    type Normalized = (String, String);

    fn normalize(self) -> Option<(String, String)> {
        let message = self.message?.as_str()?.to_string();

        Some((trimmed(self.serial_no?)?, message))
    }
}

/// New source and destination for a record, always set together
#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct SetLocationDto {
    #[schema(value_type = String, example = "S1")]
    pub serial_no: Option<Value>,

    #[schema(value_type = GeoPoint)]
    pub source: Option<Value>,

    #[schema(value_type = GeoPoint)]
    pub destination: Option<Value>,
}

impl Validate for SetLocationDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_required(&mut errors, "serial_no", &self.serial_no, validate_text);
        validate_point(&mut errors, "source", &self.source);
        validate_point(&mut errors, "destination", &self.destination);

        into_result(errors)
    }
}

/// A validated location update
#[derive(Debug, Clone, PartialEq)]
pub struct LocationUpdate {
    pub serial_no: String,
    pub source: GeoPoint,
    pub destination: GeoPoint,
}

impl RequestSchema for SetLocationDto {
    type Normalized = LocationUpdate;

    fn normalize(self) -> Option<LocationUpdate> {
        Some(LocationUpdate {
            serial_no: trimmed(self.serial_no?)?,
            source: GeoPoint::from_value(self.source?)?,
            destination: GeoPoint::from_value(self.destination?)?,
        })
    }
}

/// A stored tracking record
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[schema(title = "TrackingRecord")]
pub struct TrackingRecordDto {
    #[serde(rename = "_id")]
    pub id: i32,

    pub serial_no: String,

    pub type_of_vehicle: VehicleType,

    pub vehicle_number: String,

    /// `null` on incomplete records
    pub source: Option<GeoPoint>,

    /// `null` on incomplete records
    pub destination: Option<GeoPoint>,

    pub message: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<FixedOffset>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<FixedOffset>,
}

impl From<tracking_record::Model> for TrackingRecordDto {
    fn from(m: tracking_record::Model) -> Self {
        TrackingRecordDto {
            source: GeoPoint::from_pair(m.source()),
            destination: GeoPoint::from_pair(m.destination()),
            id: m.id,
            serial_no: m.serial_no,
            type_of_vehicle: m.type_of_vehicle,
            vehicle_number: m.vehicle_number,
            message: m.message,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Human readable projection of a record used by the dispatcher listing
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct DisplayRecordDto {
    pub serial_no: String,

    pub type_of_vehicle: VehicleType,

    pub vehicle_number: String,

    /// `"lat, lng"` or `"N/A"`
    #[schema(example = "19.02, 72.85")]
    pub source: String,

    /// `"lat, lng"` or `"N/A"`
    #[schema(example = "19.03, 72.86")]
    pub destination: String,

    pub message: String,
}

fn display_point(pair: Option<(f64, f64)>) -> String {
    match pair {
        Some((lat, lng)) => format!("{lat}, {lng}"),
        None => String::from(MISSING_COORDINATES),
    }
}

impl From<&tracking_record::Model> for DisplayRecordDto {
    fn from(m: &tracking_record::Model) -> Self {
        let message = if m.message.trim().is_empty() {
            String::from(DEFAULT_MESSAGE)
        } else {
            m.message.clone()
        };

        DisplayRecordDto {
            serial_no: m.serial_no.clone(),
            type_of_vehicle: m.type_of_vehicle,
            vehicle_number: m.vehicle_number.clone(),
            source: display_point(m.source()),
            destination: display_point(m.destination()),
            message,
        }
    }
}

/// Route endpoints of one record
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct LocationDto {
    pub source: Option<GeoPoint>,
    pub destination: Option<GeoPoint>,
}

/// Route endpoints of a record, identified, as listed for the live map
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct RecordLocationDto {
    #[serde(rename = "_id")]
    pub id: i32,

    pub serial_no: String,

    pub source: Option<GeoPoint>,

    pub destination: Option<GeoPoint>,
}
