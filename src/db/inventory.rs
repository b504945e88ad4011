use std::collections::BTreeSet;

use entity::household_inventory::{ActiveModel, Column, Entity as Inventory, Model};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::policy::Operation;
use crate::types::{
    caller::Caller,
    error::AppError,
    item::{CreateItem, UpdateItem},
};

impl PostgresService {
    /// Inserts one row and returns it as stored, database defaults included.
    /// A missing `category` or `name` is left to the NOT NULL constraint.
    pub async fn create_item(&self, caller: &Caller, item: CreateItem) -> Result<Model, AppError> {
        self.authorize(caller, Operation::Insert, None)?;

        let new_item = ActiveModel {
            id: item.id.map_or(NotSet, Set),
            category: item.category.map_or(NotSet, Set),
            name: item.name.map_or(NotSet, Set),
            quantity: item.quantity.map_or(NotSet, |q| Set(Some(q))),
            notes: item.notes.map_or(NotSet, |n| Set(Some(n))),
            created_at: item.created_at.map_or(NotSet, Set),
        };

        let created = Inventory::insert(new_item).exec_with_returning(&self.db).await?;
        info!(id = %created.id, category = %created.category, name = %created.name, "inventory item created");
        Ok(created)
    }

    pub async fn get_item(&self, caller: &Caller, id: Uuid) -> Result<Model, AppError> {
        let item = Inventory::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        if !self.can_see(caller, &item) {
            return Err(AppError::NotFound);
        }
        Ok(item)
    }

    /// Newest first.
    pub async fn list_items(&self, caller: &Caller) -> Result<Vec<Model>, AppError> {
        let items = Inventory::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(self.visible(caller, items))
    }

    pub async fn list_items_in_category(
        &self,
        caller: &Caller,
        category: &str,
    ) -> Result<Vec<Model>, AppError> {
        let items = Inventory::find()
            .filter(Column::Category.eq(category))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(self.visible(caller, items))
    }

    /// Distinct categories among the rows the caller can see, ascending.
    pub async fn categories(&self, caller: &Caller) -> Result<Vec<String>, AppError> {
        let categories: BTreeSet<String> = self
            .list_items(caller)
            .await?
            .into_iter()
            .map(|item| item.category)
            .collect();

        Ok(categories.into_iter().collect())
    }

    pub async fn update_item(
        &self,
        caller: &Caller,
        id: Uuid,
        patch: UpdateItem,
    ) -> Result<Model, AppError> {
        let current = self.get_item(caller, id).await?;
        self.authorize(caller, Operation::Update, Some(&current))?;

        if patch.is_empty() {
            return Ok(current);
        }

        let mut model: ActiveModel = current.into();
        if let Some(category) = patch.category {
            model.category = Set(category);
        }
        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(quantity) = patch.quantity {
            model.quantity = Set(quantity);
        }
        if let Some(notes) = patch.notes {
            model.notes = Set(notes);
        }

        let updated = model.update(&self.db).await?;
        info!(id = %updated.id, "inventory item updated");
        Ok(updated)
    }

    /// Adds `delta` to the stored quantity in a single statement. NULL counts
    /// as zero and the result never goes below zero.
    pub async fn adjust_quantity(
        &self,
        caller: &Caller,
        id: Uuid,
        delta: i32,
    ) -> Result<Model, AppError> {
        let current = self.get_item(caller, id).await?;
        self.authorize(caller, Operation::Update, Some(&current))?;

        let updated = Inventory::update_many()
            .col_expr(
                Column::Quantity,
                Expr::cust_with_values(r#"GREATEST(COALESCE("quantity", 0) + $1, 0)"#, [delta]),
            )
            .filter(Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?
            .into_iter()
            .next()
            .ok_or(AppError::NotFound)?;

        info!(id = %updated.id, delta, quantity = ?updated.quantity, "inventory quantity adjusted");
        Ok(updated)
    }

    pub async fn delete_item(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        let current = self.get_item(caller, id).await?;
        self.authorize(caller, Operation::Delete, Some(&current))?;

        let res = Inventory::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        info!(%id, "inventory item deleted");
        Ok(())
    }
}
