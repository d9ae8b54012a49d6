//! Database migrations for the society service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_societies::Migration),
            Box::new(m20250301_000002_create_profiles::Migration),
            Box::new(m20250301_000003_create_operations::Migration),
            Box::new(m20250301_000004_create_directory::Migration),
        ]
    }
}

mod m20250301_000001_create_societies {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_societies"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Societies::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Societies::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Societies::Name).string().not_null())
                        .col(ColumnDef::new(Societies::Address).string().not_null())
                        .col(ColumnDef::new(Societies::City).string().not_null())
                        .col(ColumnDef::new(Societies::State).string().not_null())
                        .col(ColumnDef::new(Societies::Pincode).string().not_null())
                        .col(ColumnDef::new(Societies::TotalUnits).big_integer().not_null())
                        .col(ColumnDef::new(Societies::CreatedBy).uuid().not_null())
                        .col(
                            ColumnDef::new(Societies::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Societies::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_societies_created_by")
                        .table(Societies::Table)
                        .col(Societies::CreatedBy)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UtilityWorkers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UtilityWorkers::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(UtilityWorkers::SocietyId).uuid().not_null())
                        .col(ColumnDef::new(UtilityWorkers::Name).string().not_null())
                        .col(ColumnDef::new(UtilityWorkers::Phone).string().not_null())
                        .col(ColumnDef::new(UtilityWorkers::Category).string().not_null())
                        .col(
                            ColumnDef::new(UtilityWorkers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_utility_workers_society")
                                .from(UtilityWorkers::Table, UtilityWorkers::SocietyId)
                                .to(Societies::Table, Societies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Properties::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Properties::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Properties::SocietyId).uuid().not_null())
                        .col(ColumnDef::new(Properties::UnitNumber).string().not_null())
                        .col(ColumnDef::new(Properties::Block).string())
                        .col(ColumnDef::new(Properties::Floor).integer())
                        .col(
                            ColumnDef::new(Properties::MonthlyRentCents)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Properties::TenantId).uuid())
                        .col(
                            ColumnDef::new(Properties::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Properties::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_properties_society")
                                .from(Properties::Table, Properties::SocietyId)
                                .to(Societies::Table, Societies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Properties::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(UtilityWorkers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Societies::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Societies {
        Table,
        Id,
        Name,
        Address,
        City,
        State,
        Pincode,
        TotalUnits,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum UtilityWorkers {
        Table,
        Id,
        SocietyId,
        Name,
        Phone,
        Category,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Properties {
        Table,
        Id,
        SocietyId,
        UnitNumber,
        Block,
        Floor,
        MonthlyRentCents,
        TenantId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000002_create_profiles {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_profiles"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Profiles::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Profiles::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Profiles::FirstName).string().not_null())
                        .col(ColumnDef::new(Profiles::LastName).string().not_null())
                        .col(ColumnDef::new(Profiles::Role).string().not_null())
                        .col(ColumnDef::new(Profiles::SocietyId).uuid())
                        .col(ColumnDef::new(Profiles::Phone).string())
                        .col(ColumnDef::new(Profiles::PasswordHash).string().not_null())
                        .col(
                            ColumnDef::new(Profiles::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Profiles::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_profiles_society_id")
                        .table(Profiles::Table)
                        .col(Profiles::SocietyId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Profiles::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Profiles {
        Table,
        Id,
        Email,
        FirstName,
        LastName,
        Role,
        SocietyId,
        Phone,
        PasswordHash,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000003_create_operations {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_operations"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MaintenanceRequests::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MaintenanceRequests::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(MaintenanceRequests::SocietyId).uuid().not_null())
                        .col(ColumnDef::new(MaintenanceRequests::TenantId).uuid().not_null())
                        .col(ColumnDef::new(MaintenanceRequests::PropertyId).uuid())
                        .col(ColumnDef::new(MaintenanceRequests::Title).string().not_null())
                        .col(
                            ColumnDef::new(MaintenanceRequests::Description)
                                .text()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MaintenanceRequests::Category).string().not_null())
                        .col(ColumnDef::new(MaintenanceRequests::Priority).string().not_null())
                        .col(ColumnDef::new(MaintenanceRequests::Status).string().not_null())
                        .col(ColumnDef::new(MaintenanceRequests::AssignedWorkerId).uuid())
                        .col(
                            ColumnDef::new(MaintenanceRequests::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(MaintenanceRequests::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(MaintenanceRequests::ResolvedAt)
                                .timestamp_with_time_zone(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_maintenance_requests_society_id")
                        .table(MaintenanceRequests::Table)
                        .col(MaintenanceRequests::SocietyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_maintenance_requests_tenant_id")
                        .table(MaintenanceRequests::Table)
                        .col(MaintenanceRequests::TenantId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Notices::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Notices::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Notices::SocietyId).uuid().not_null())
                        .col(ColumnDef::new(Notices::AuthorId).uuid().not_null())
                        .col(ColumnDef::new(Notices::Title).string().not_null())
                        .col(ColumnDef::new(Notices::Content).text().not_null())
                        .col(
                            ColumnDef::new(Notices::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(Notices::ExpiresAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Payments::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Payments::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Payments::SocietyId).uuid().not_null())
                        .col(ColumnDef::new(Payments::TenantId).uuid().not_null())
                        .col(ColumnDef::new(Payments::PropertyId).uuid())
                        .col(ColumnDef::new(Payments::AmountCents).big_integer().not_null())
                        .col(ColumnDef::new(Payments::Description).string().not_null())
                        .col(ColumnDef::new(Payments::Status).string().not_null())
                        .col(
                            ColumnDef::new(Payments::DueDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Payments::PaidAt).timestamp_with_time_zone())
                        .col(
                            ColumnDef::new(Payments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Documents::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Documents::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Documents::SocietyId).uuid().not_null())
                        .col(ColumnDef::new(Documents::UploadedBy).uuid().not_null())
                        .col(ColumnDef::new(Documents::FileName).string().not_null())
                        .col(ColumnDef::new(Documents::ContentType).string().not_null())
                        .col(ColumnDef::new(Documents::SizeBytes).big_integer().not_null())
                        .col(ColumnDef::new(Documents::Sha256).string().not_null())
                        .col(
                            ColumnDef::new(Documents::StorageKey)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Documents::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Documents::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Payments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Notices::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MaintenanceRequests::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum MaintenanceRequests {
        Table,
        Id,
        SocietyId,
        TenantId,
        PropertyId,
        Title,
        Description,
        Category,
        Priority,
        Status,
        AssignedWorkerId,
        CreatedAt,
        UpdatedAt,
        ResolvedAt,
    }

    #[derive(DeriveIden)]
    enum Notices {
        Table,
        Id,
        SocietyId,
        AuthorId,
        Title,
        Content,
        CreatedAt,
        ExpiresAt,
    }

    #[derive(DeriveIden)]
    enum Payments {
        Table,
        Id,
        SocietyId,
        TenantId,
        PropertyId,
        AmountCents,
        Description,
        Status,
        DueDate,
        PaidAt,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Documents {
        Table,
        Id,
        SocietyId,
        UploadedBy,
        FileName,
        ContentType,
        SizeBytes,
        Sha256,
        StorageKey,
        CreatedAt,
    }
}

mod m20250301_000004_create_directory {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_directory"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(DirectorySocieties::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DirectorySocieties::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(DirectorySocieties::Name).string().not_null())
                        .col(ColumnDef::new(DirectorySocieties::Location).string().not_null())
                        .col(ColumnDef::new(DirectorySocieties::CreatedBy).string().not_null())
                        .col(
                            ColumnDef::new(DirectorySocieties::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DirectoryTenants::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DirectoryTenants::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(DirectoryTenants::Name).string().not_null())
                        .col(ColumnDef::new(DirectoryTenants::Email).string().not_null())
                        .col(
                            ColumnDef::new(DirectoryTenants::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DirectoryTenants::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(DirectorySocieties::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum DirectorySocieties {
        Table,
        Id,
        Name,
        Location,
        CreatedBy,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum DirectoryTenants {
        Table,
        Id,
        Name,
        Email,
        CreatedAt,
    }
}
