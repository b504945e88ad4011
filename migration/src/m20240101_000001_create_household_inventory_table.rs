use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

pub const POLICY_NAME: &str = "Allow all access";

const ENABLE_RLS: &str = r#"ALTER TABLE household_inventory ENABLE ROW LEVEL SECURITY;"#;

const CREATE_POLICY: &str = r#"
CREATE POLICY "Allow all access" ON household_inventory
    FOR ALL
    USING (true)
    WITH CHECK (true);
"#;

const DROP_POLICY: &str = r#"DROP POLICY IF EXISTS "Allow all access" ON household_inventory;"#;

/// `household_inventory` as it is provisioned. Column names, types, defaults
/// and nullability are fixed; clients outside this crate depend on them.
pub fn table_definition() -> TableCreateStatement {
    Table::create()
        .table(HouseholdInventory::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(HouseholdInventory::Id)
                .uuid()
                .not_null()
                .default(Expr::cust("gen_random_uuid()"))
                .primary_key()
        )
        .col(
            ColumnDef::new(HouseholdInventory::Category)
                .text()
                .not_null()
        )
        .col(
            ColumnDef::new(HouseholdInventory::Name)
                .text()
                .not_null()
        )
        .col(
            ColumnDef::new(HouseholdInventory::Quantity)
                .integer()
                .null()
                .default(1)
        )
        .col(
            ColumnDef::new(HouseholdInventory::Notes)
                .text()
                .null()
        )
        .col(
            ColumnDef::new(HouseholdInventory::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::cust("timezone('utc'::text, now())"))
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // gen_random_uuid()
        manager
            .get_connection()
            .execute_unprepared(r#"CREATE EXTENSION IF NOT EXISTS "pgcrypto";"#)
            .await?;

        manager.create_table(table_definition()).await?;

        manager.get_connection().execute_unprepared(ENABLE_RLS).await?;
        manager.get_connection().execute_unprepared(CREATE_POLICY).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // the extension may be shared with other schemas, leave it installed
        manager.get_connection().execute_unprepared(DROP_POLICY).await?;
        manager
            .drop_table(
                Table::drop()
                    .table(HouseholdInventory::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum HouseholdInventory {
    Table,
    Id,
    Category,
    Name,
    Quantity,
    Notes,
    CreatedAt,
}
