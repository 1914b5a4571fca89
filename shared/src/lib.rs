pub mod constants;
pub mod tracer;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, IntoEnumIterator};
use utoipa::ToSchema;

/// All the kinds of vehicles a driver can register a tracking record for
///
/// stored as a lowercase string column so the same schema works on every
/// database backend supported by the service
#[derive(
    Eq,
    Copy,
    Clone,
    Debug,
    Display,
    EnumIter,
    ToSchema,
    Serialize,
    PartialEq,
    Deserialize,
    DeriveActiveEnum,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum VehicleType {
    #[sea_orm(string_value = "ambulance")]
    Ambulance,
    #[sea_orm(string_value = "firetruck")]
    Firetruck,
    #[sea_orm(string_value = "other")]
    Other,
}

impl VehicleType {
    pub fn to_string_vec() -> Vec<String> {
        VehicleType::iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
    }
}

impl FromStr for VehicleType {
    type Err = ();

    fn from_str(input: &str) -> Result<VehicleType, Self::Err> {
        match input {
            "ambulance" => Ok(VehicleType::Ambulance),
            "firetruck" => Ok(VehicleType::Firetruck),
            "other" => Ok(VehicleType::Other),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_type_round_trips_through_its_lowercase_name() {
        for vehicle_type in VehicleType::iter() {
            let parsed = VehicleType::from_str(&vehicle_type.to_string());
            assert_eq!(parsed, Ok(vehicle_type));
        }

        assert_eq!(
            VehicleType::to_string_vec(),
            vec!["ambulance", "firetruck", "other"]
        );
    }

    #[test]
    fn vehicle_type_rejects_unknown_and_differently_cased_names() {
        assert!(VehicleType::from_str("car").is_err());
        assert!(VehicleType::from_str("Ambulance").is_err());
        assert!(VehicleType::from_str("").is_err());
    }

    #[test]
    fn vehicle_type_serializes_lowercase() {
        let json = serde_json::to_string(&VehicleType::Firetruck).unwrap();
        assert_eq!(json, "\"firetruck\"");
    }
}
