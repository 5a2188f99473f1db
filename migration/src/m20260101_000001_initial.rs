use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TiffinServices {
    Table,
    Id,
    OwnerId,
    Name,
    Address,
    Phone,
    IsVerified,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Menus {
    Table,
    Id,
    TiffinServiceId,
    Title,
    Description,
    MonthlyPrice,
    ImagePath,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DailyMenus {
    Table,
    Id,
    MenuId,
    Day,
    FoodDescription,
    ImagePath,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    CustomerId,
    MenuId,
    Address,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    CustomerId,
    TiffinServiceId,
    Rating,
    Comment,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn created_at_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(&mut id_col(Users::Id))
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string_len(254).not_null())
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::Role)
                            .string_len(16)
                            .not_null()
                            .default("customer"),
                    )
                    .col(&mut created_at_col(Users::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TiffinServices::Table)
                    .if_not_exists()
                    .col(&mut id_col(TiffinServices::Id))
                    .col(
                        ColumnDef::new(TiffinServices::OwnerId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TiffinServices::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TiffinServices::Address).text().not_null())
                    .col(
                        ColumnDef::new(TiffinServices::Phone)
                            .string_len(15)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(TiffinServices::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(&mut created_at_col(TiffinServices::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tiffin_services_owner")
                            .from(TiffinServices::Table, TiffinServices::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Menus::Table)
                    .if_not_exists()
                    .col(&mut id_col(Menus::Id))
                    .col(
                        ColumnDef::new(Menus::TiffinServiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Menus::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Menus::Description).text().not_null())
                    .col(
                        ColumnDef::new(Menus::MonthlyPrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Menus::ImagePath).string_len(255).null())
                    .col(ColumnDef::new(Menus::Monday).text().not_null().default(""))
                    .col(ColumnDef::new(Menus::Tuesday).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Menus::Wednesday)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Menus::Thursday)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Menus::Friday).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Menus::Saturday)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Menus::Sunday).text().not_null().default(""))
                    .col(&mut created_at_col(Menus::CreatedAt))
                    .col(&mut created_at_col(Menus::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menus_tiffin_service")
                            .from(Menus::Table, Menus::TiffinServiceId)
                            .to(TiffinServices::Table, TiffinServices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DailyMenus::Table)
                    .if_not_exists()
                    .col(&mut id_col(DailyMenus::Id))
                    .col(ColumnDef::new(DailyMenus::MenuId).big_integer().not_null())
                    .col(ColumnDef::new(DailyMenus::Day).string_len(10).not_null())
                    .col(
                        ColumnDef::new(DailyMenus::FoodDescription)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DailyMenus::ImagePath).string_len(255).null())
                    .col(&mut created_at_col(DailyMenus::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_menus_menu")
                            .from(DailyMenus::Table, DailyMenus::MenuId)
                            .to(Menus::Table, Menus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(&mut id_col(Orders::Id))
                    .col(ColumnDef::new(Orders::CustomerId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::MenuId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::Address).text().not_null())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(&mut created_at_col(Orders::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_customer")
                            .from(Orders::Table, Orders::CustomerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_menu")
                            .from(Orders::Table, Orders::MenuId)
                            .to(Menus::Table, Menus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(&mut id_col(Reviews::Id))
                    .col(ColumnDef::new(Reviews::CustomerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reviews::TiffinServiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reviews::Rating).integer().not_null())
                    .col(ColumnDef::new(Reviews::Comment).text().not_null())
                    .col(&mut created_at_col(Reviews::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_customer")
                            .from(Reviews::Table, Reviews::CustomerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_tiffin_service")
                            .from(Reviews::Table, Reviews::TiffinServiceId)
                            .to(TiffinServices::Table, TiffinServices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_menus_tiffin_service")
                    .table(Menus::Table)
                    .col(Menus::TiffinServiceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Reviews::Table.into_iden(),
            Orders::Table.into_iden(),
            DailyMenus::Table.into_iden(),
            Menus::Table.into_iden(),
            TiffinServices::Table.into_iden(),
            Users::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().if_exists().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}
