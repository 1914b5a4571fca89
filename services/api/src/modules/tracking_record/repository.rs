use super::dto::{GeoPoint, NewTrackingRecord};
use crate::database::error::{DbError, UniqueColumn};
use entity::tracking_record::{self, ActiveModel, Column, Entity};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// Fields of a record a dispatcher can change after registration
#[derive(Debug, Clone, PartialEq)]
pub enum RecordPatch {
    Message(String),

    /// both route endpoints, never one without the other
    Route {
        source: GeoPoint,
        destination: GeoPoint,
    },
}

/// The id and route columns of a record
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct LocationRow {
    pub id: i32,
    pub serial_no: String,
    pub source_lat: Option<f64>,
    pub source_lng: Option<f64>,
    pub destination_lat: Option<f64>,
    pub destination_lng: Option<f64>,
}

fn ensure_in_range(field: &'static str, point: &GeoPoint) -> Result<(), DbError> {
    if point.is_valid() {
        Ok(())
    } else {
        Err(DbError::OutOfRange(field))
    }
}

/// Stores a new record.
///
/// duplicates are looked for before inserting, a insert racing another one
/// with the same serial or vehicle number still fails on the unique indexes
/// and is reported as the same `UniqueViolation`
pub async fn create(
    db: &DatabaseConnection,
    record: &NewTrackingRecord,
) -> Result<tracking_record::Model, DbError> {
    ensure_in_range("source", &record.source)?;
    ensure_in_range("destination", &record.destination)?;

    if find_by_serial(db, &record.serial_no).await?.is_some() {
        return Err(DbError::UniqueViolation(UniqueColumn::SerialNo));
    }

    let vehicle_number_in_use = Entity::find()
        .filter(Column::VehicleNumber.eq(record.vehicle_number.as_str()))
        .one(db)
        .await?
        .is_some();

    if vehicle_number_in_use {
        return Err(DbError::UniqueViolation(UniqueColumn::VehicleNumber));
    }

    let active = ActiveModel {
        serial_no: Set(record.serial_no.clone()),
        type_of_vehicle: Set(record.type_of_vehicle),
        vehicle_number: Set(record.vehicle_number.clone()),
        source_lat: Set(Some(record.source.lat)),
        source_lng: Set(Some(record.source.lng)),
        destination_lat: Set(Some(record.destination.lat)),
        destination_lng: Set(Some(record.destination.lng)),
        message: Set(record.message.clone()),
        ..Default::default()
    };

    Ok(active.insert(db).await?)
}

pub async fn find_by_serial(
    db: &DatabaseConnection,
    serial_no: &str,
) -> Result<Option<tracking_record::Model>, DbError> {
    Ok(Entity::find()
        .filter(Column::SerialNo.eq(serial_no))
        .one(db)
        .await?)
}

/// Applies `patch` to the record with `serial_no`, refreshing its `updated_at`.
///
/// returns `None` without writing anything if no record matches
pub async fn update_by_serial(
    db: &DatabaseConnection,
    serial_no: &str,
    patch: RecordPatch,
) -> Result<Option<tracking_record::Model>, DbError> {
    if let RecordPatch::Route {
        source,
        destination,
    } = &patch
    {
        ensure_in_range("source", source)?;
        ensure_in_range("destination", destination)?;
    }

    let Some(current) = find_by_serial(db, serial_no).await? else {
        return Ok(None);
    };

    let mut active = current.into_active_model();

    match patch {
        RecordPatch::Message(message) => {
            active.message = Set(message);
        }
        RecordPatch::Route {
            source,
            destination,
        } => {
            active.source_lat = Set(Some(source.lat));
            active.source_lng = Set(Some(source.lng));
            active.destination_lat = Set(Some(destination.lat));
            active.destination_lng = Set(Some(destination.lng));
        }
    }

    Ok(Some(active.update(db).await?))
}

/// All records, newest first
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<tracking_record::Model>, DbError> {
    Ok(Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await?)
}

/// Route columns of every record, newest first
pub async fn list_locations(db: &DatabaseConnection) -> Result<Vec<LocationRow>, DbError> {
    Ok(Entity::find()
        .select_only()
        .columns([
            Column::Id,
            Column::SerialNo,
            Column::SourceLat,
            Column::SourceLng,
            Column::DestinationLat,
            Column::DestinationLng,
        ])
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .into_model::<LocationRow>()
        .all(db)
        .await?)
}
