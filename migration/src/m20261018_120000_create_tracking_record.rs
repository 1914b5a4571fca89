use sea_orm_migration::prelude::*;
use shared::constants::tracking::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden, Clone, Copy)]
enum TrackingRecord {
    Table,
    Id,
    SerialNo,
    TypeOfVehicle,
    VehicleNumber,
    SourceLat,
    SourceLng,
    DestinationLat,
    DestinationLng,
    Message,
    CreatedAt,
    UpdatedAt,
}

/// nullable coordinate column, constrained to `[min, max]` when present
fn coordinate(col: TrackingRecord, min: f64, max: f64) -> ColumnDef {
    ColumnDef::new(col)
        .double()
        .null()
        .check(Expr::col(col).between(min, max))
        .to_owned()
}

/// unique index named with the `<table>_<columns>_unique` pattern, the api
/// reads the column back from this name when reporting conflicts
fn unique_index(name: &str, cols: Vec<TrackingRecord>) -> IndexCreateStatement {
    let mut index = Index::create();

    index.name(name).table(TrackingRecord::Table).unique();

    for col in cols {
        index.col(col);
    }

    index.to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrackingRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrackingRecord::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TrackingRecord::SerialNo)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackingRecord::TypeOfVehicle)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackingRecord::VehicleNumber)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(&mut coordinate(
                        TrackingRecord::SourceLat,
                        MIN_LATITUDE,
                        MAX_LATITUDE,
                    ))
                    .col(&mut coordinate(
                        TrackingRecord::SourceLng,
                        MIN_LONGITUDE,
                        MAX_LONGITUDE,
                    ))
                    .col(&mut coordinate(
                        TrackingRecord::DestinationLat,
                        MIN_LATITUDE,
                        MAX_LATITUDE,
                    ))
                    .col(&mut coordinate(
                        TrackingRecord::DestinationLng,
                        MIN_LONGITUDE,
                        MAX_LONGITUDE,
                    ))
                    .col(ColumnDef::new(TrackingRecord::Message).text().not_null())
                    .col(
                        ColumnDef::new(TrackingRecord::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackingRecord::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "tracking_record_serial_no_unique",
                vec![TrackingRecord::SerialNo],
            ))
            .await?;

        manager
            .create_index(unique_index(
                "tracking_record_vehicle_number_unique",
                vec![TrackingRecord::VehicleNumber],
            ))
            .await?;

        // the pair is also unique on its own
        manager
            .create_index(unique_index(
                "tracking_record_serial_no_vehicle_number_unique",
                vec![TrackingRecord::SerialNo, TrackingRecord::VehicleNumber],
            ))
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("tracking_record_created_at_idx")
                    .table(TrackingRecord::Table)
                    .col(TrackingRecord::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrackingRecord::Table).to_owned())
            .await
    }
}
