use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_customers_table::Migration),
            Box::new(m20250301_000003_create_orders_table::Migration),
            Box::new(m20250301_000004_create_order_sequences_table::Migration),
            Box::new(m20250301_000005_create_order_children_tables::Migration),
        ]
    }
}

mod m20250301_000001_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Users::Username).string().not_null())
                        .col(ColumnDef::new(Users::FullName).string().null())
                        .col(ColumnDef::new(Users::Department).string().null())
                        .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_users_username")
                        .table(Users::Table)
                        .col(Users::Username)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Users {
        Table,
        Id,
        Username,
        FullName,
        Department,
        CreatedAt,
    }
}

mod m20250301_000002_create_customers_table {
    use super::m20250301_000001_create_users_table::Users;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Customers::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Customers::Name).string().null())
                        .col(ColumnDef::new(Customers::City).string().null())
                        .col(ColumnDef::new(Customers::Code).string().null())
                        .col(ColumnDef::new(Customers::ManagerId).uuid().null())
                        .col(ColumnDef::new(Customers::CreatedAt).timestamp_with_time_zone().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_customers_manager_id")
                                .from(Customers::Table, Customers::ManagerId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_customers_code")
                        .table(Customers::Table)
                        .col(Customers::Code)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Customers {
        Table,
        Id,
        Name,
        City,
        Code,
        ManagerId,
        CreatedAt,
    }
}

mod m20250301_000003_create_orders_table {
    use super::m20250301_000001_create_users_table::Users;
    use super::m20250301_000002_create_customers_table::Customers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Orders::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Orders::OrderNumber).string().not_null())
                        .col(ColumnDef::new(Orders::Month).integer().not_null())
                        .col(ColumnDef::new(Orders::Year).integer().not_null())
                        .col(ColumnDef::new(Orders::Week).integer().null())
                        .col(ColumnDef::new(Orders::OrderType).string().null())
                        .col(ColumnDef::new(Orders::SubOrderType).string().null())
                        .col(ColumnDef::new(Orders::ParentOrderId).uuid().null())
                        .col(ColumnDef::new(Orders::Part).integer().null())
                        .col(ColumnDef::new(Orders::ManagerId).uuid().not_null())
                        .col(ColumnDef::new(Orders::TechnologistId).uuid().null())
                        .col(ColumnDef::new(Orders::Status).string().not_null())
                        .col(
                            ColumnDef::new(Orders::Mdf)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Orders::Fittings)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Orders::Glass)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Orders::Cnc)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Orders::LdspArea).double().null())
                        .col(ColumnDef::new(Orders::MdfArea).double().null())
                        .col(ColumnDef::new(Orders::Edge04).double().null())
                        .col(ColumnDef::new(Orders::Edge1).double().null())
                        .col(ColumnDef::new(Orders::Edge2).double().null())
                        .col(ColumnDef::new(Orders::TotalArea).double().null())
                        .col(ColumnDef::new(Orders::SerialArea).double().null())
                        .col(ColumnDef::new(Orders::PortalArea).double().null())
                        .col(ColumnDef::new(Orders::Weight).double().null())
                        .col(ColumnDef::new(Orders::PackageCount).integer().null())
                        .col(ColumnDef::new(Orders::StartDate).date().null())
                        .col(ColumnDef::new(Orders::ComplaintReason).text().null())
                        .col(ColumnDef::new(Orders::CreatedAt).timestamp_with_time_zone().not_null())
                        .col(ColumnDef::new(Orders::UpdatedAt).timestamp_with_time_zone().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer_id")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_manager_id")
                                .from(Orders::Table, Orders::ManagerId)
                                .to(Users::Table, Users::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_technologist_id")
                                .from(Orders::Table, Orders::TechnologistId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_parent_order_id")
                                .from(Orders::Table, Orders::ParentOrderId)
                                .to(Orders::Table, Orders::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // The uniqueness backstop for the allocator.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_order_number")
                        .table(Orders::Table)
                        .col(Orders::OrderNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_customer_year")
                        .table(Orders::Table)
                        .col(Orders::CustomerId)
                        .col(Orders::Year)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_status")
                        .table(Orders::Table)
                        .col(Orders::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Orders {
        Table,
        Id,
        CustomerId,
        OrderNumber,
        Month,
        Year,
        Week,
        OrderType,
        SubOrderType,
        ParentOrderId,
        Part,
        ManagerId,
        TechnologistId,
        Status,
        Mdf,
        Fittings,
        Glass,
        Cnc,
        LdspArea,
        MdfArea,
        #[sea_orm(iden = "edge_04")]
        Edge04,
        #[sea_orm(iden = "edge_1")]
        Edge1,
        #[sea_orm(iden = "edge_2")]
        Edge2,
        TotalArea,
        SerialArea,
        PortalArea,
        Weight,
        PackageCount,
        StartDate,
        ComplaintReason,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000004_create_order_sequences_table {
    use super::m20250301_000002_create_customers_table::Customers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_order_sequences_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrderSequences::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(OrderSequences::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(OrderSequences::Year).integer().not_null())
                        .col(ColumnDef::new(OrderSequences::LastSeq).integer().not_null())
                        .primary_key(
                            Index::create()
                                .col(OrderSequences::CustomerId)
                                .col(OrderSequences::Year),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_sequences_customer_id")
                                .from(OrderSequences::Table, OrderSequences::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderSequences::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum OrderSequences {
        Table,
        CustomerId,
        Year,
        LastSeq,
    }
}

mod m20250301_000005_create_order_children_tables {
    use super::m20250301_000001_create_users_table::Users;
    use super::m20250301_000003_create_orders_table::Orders;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000005_create_order_children_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrderFiles::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderFiles::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderFiles::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderFiles::FileName).string().not_null())
                        .col(ColumnDef::new(OrderFiles::ContentType).string().null())
                        .col(ColumnDef::new(OrderFiles::UploadedAt).timestamp_with_time_zone().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_files_order_id")
                                .from(OrderFiles::Table, OrderFiles::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderComments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderComments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderComments::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderComments::AuthorId).uuid().not_null())
                        .col(ColumnDef::new(OrderComments::Body).text().not_null())
                        .col(
                            ColumnDef::new(OrderComments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_comments_order_id")
                                .from(OrderComments::Table, OrderComments::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_comments_author_id")
                                .from(OrderComments::Table, OrderComments::AuthorId)
                                .to(Users::Table, Users::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_files_order_id")
                        .table(OrderFiles::Table)
                        .col(OrderFiles::OrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_comments_order_id")
                        .table(OrderComments::Table)
                        .col(OrderComments::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderComments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OrderFiles::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum OrderFiles {
        Table,
        Id,
        OrderId,
        FileName,
        ContentType,
        UploadedAt,
    }

    #[derive(DeriveIden)]
    enum OrderComments {
        Table,
        Id,
        OrderId,
        AuthorId,
        Body,
        CreatedAt,
    }
}
