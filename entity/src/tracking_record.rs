use sea_orm::entity::prelude::*;
use sea_orm::Set;
use shared::VehicleType;

/// A vehicle registered by its driver, with the route it is taking and the
/// last message a dispatcher left for it.
///
/// coordinates are nullable on the table so rows written by older clients
/// without a full route can still be read, every write path of the api
/// requires both pairs.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tracking_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub serial_no: String,
    pub type_of_vehicle: VehicleType,
    #[sea_orm(unique)]
    pub vehicle_number: String,
    pub source_lat: Option<f64>,
    pub source_lng: Option<f64>,
    pub destination_lat: Option<f64>,
    pub destination_lng: Option<f64>,
    pub message: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// `(lat, lng)` of the route source, `None` if any half is missing
    pub fn source(&self) -> Option<(f64, f64)> {
        Some((self.source_lat?, self.source_lng?))
    }

    /// `(lat, lng)` of the route destination, `None` if any half is missing
    pub fn destination(&self) -> Option<(f64, f64)> {
        Some((self.destination_lat?, self.destination_lng?))
    }

    pub fn has_complete_route(&self) -> bool {
        self.source().is_some() && self.destination().is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// keeps `created_at` and `updated_at` in sync with every write
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();

        if insert {
            self.created_at = Set(now);
        }

        self.updated_at = Set(now);

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Model {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();

        Model {
            id: 1,
            serial_no: String::from("S1"),
            type_of_vehicle: VehicleType::Ambulance,
            vehicle_number: String::from("MH01AB1234"),
            source_lat: Some(19.02),
            source_lng: Some(72.85),
            destination_lat: Some(19.03),
            destination_lng: Some(72.86),
            message: String::from("No message provided."),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn complete_route() {
        let r = record();

        assert_eq!(r.source(), Some((19.02, 72.85)));
        assert_eq!(r.destination(), Some((19.03, 72.86)));
        assert!(r.has_complete_route());
    }

    #[test]
    fn half_missing_pair_counts_as_missing() {
        let r = Model {
            destination_lng: None,
            ..record()
        };

        assert!(r.source().is_some());
        assert_eq!(r.destination(), None);
        assert!(!r.has_complete_route());
    }
}
