//! PostgreSQL implementation of the item repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{Catalog, Item, ItemPatch, NewItem};
use crate::domain::query::{ItemQuery, Page, like_pattern};
use crate::domain::repositories::ItemRepository;
use crate::error::AppError;

/// PostgreSQL repository for items of both catalogs.
///
/// Reads always join the owning category to fill `category_name` and
/// `category_slug`.
pub struct PgItemRepository {
    pool: Arc<PgPool>,
}

impl PgItemRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

const ITEM_COLUMNS: &str = "i.id, i.name, i.slug, i.description, i.image, i.price, i.sku, \
     i.is_active, i.is_featured, i.category_id, c.name AS category_name, \
     c.slug AS category_slug, i.created_at, i.updated_at";

fn select_from(catalog: Catalog) -> String {
    format!(
        "SELECT {} FROM {} i JOIN {} c ON c.id = i.category_id",
        ITEM_COLUMNS,
        catalog.items_table(),
        catalog.categories_table()
    )
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ItemQuery) {
    qb.push(" WHERE TRUE");

    if let Some(search) = query.search.as_deref() {
        let pattern = like_pattern(search);
        qb.push(" AND (i.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR i.slug ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR i.sku ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR i.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(is_active) = query.is_active {
        qb.push(" AND i.is_active = ").push_bind(is_active);
    }

    if let Some(is_featured) = query.is_featured {
        qb.push(" AND i.is_featured = ").push_bind(is_featured);
    }

    if let Some(category_id) = query.category_id {
        qb.push(" AND i.category_id = ").push_bind(category_id);
    }

    if let Some(min_price) = query.min_price {
        qb.push(" AND i.price >= ").push_bind(min_price);
    }

    if let Some(max_price) = query.max_price {
        qb.push(" AND i.price <= ").push_bind(max_price);
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn list(&self, catalog: Catalog, query: ItemQuery) -> Result<Page<Item>, AppError> {
        let mut count_qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT COUNT(*) FROM {} i JOIN {} c ON c.id = i.category_id",
            catalog.items_table(),
            catalog.categories_table()
        ));
        push_filters(&mut count_qb, &query);
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(select_from(catalog));
        push_filters(&mut qb, &query);
        let direction = query.direction.as_sql();
        // NULL prices and SKUs sort last in both directions.
        qb.push(format!(
            " ORDER BY {} {} NULLS LAST, i.id {}",
            query.sort.as_sql(),
            direction,
            direction
        ));
        qb.push(" LIMIT ")
            .push_bind(query.page.limit())
            .push(" OFFSET ")
            .push_bind(query.page.offset());

        let items = qb
            .build_query_as::<Item>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(Page::new(items, total, query.page))
    }

    async fn list_by_category(
        &self,
        catalog: Catalog,
        category_id: i64,
        only_active: bool,
    ) -> Result<Vec<Item>, AppError> {
        let sql = format!(
            "{} WHERE i.category_id = $1 AND (NOT $2 OR i.is_active) ORDER BY i.name, i.id",
            select_from(catalog)
        );

        let rows = sqlx::query_as::<_, Item>(&sql)
            .bind(category_id)
            .bind(only_active)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn list_featured(&self, catalog: Catalog) -> Result<Vec<Item>, AppError> {
        let sql = format!(
            "{} WHERE i.is_active AND i.is_featured AND c.is_active ORDER BY i.updated_at DESC, i.id",
            select_from(catalog)
        );

        let rows = sqlx::query_as::<_, Item>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, catalog: Catalog, id: i64) -> Result<Option<Item>, AppError> {
        let sql = format!("{} WHERE i.id = $1", select_from(catalog));

        let row = sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn slug_exists(
        &self,
        catalog: Catalog,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
            catalog.items_table()
        );

        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(slug)
            .bind(exclude_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn sku_exists(
        &self,
        catalog: Catalog,
        sku: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE sku = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
            catalog.items_table()
        );

        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(sku)
            .bind(exclude_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn create(&self, catalog: Catalog, new_item: NewItem) -> Result<Item, AppError> {
        let sql = format!(
            r#"
            WITH i AS (
                INSERT INTO {items}
                    (name, slug, description, price, sku, is_active, is_featured, category_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
            )
            SELECT {columns} FROM i JOIN {categories} c ON c.id = i.category_id
            "#,
            items = catalog.items_table(),
            categories = catalog.categories_table(),
            columns = ITEM_COLUMNS,
        );

        let row = sqlx::query_as::<_, Item>(&sql)
            .bind(new_item.name)
            .bind(new_item.slug)
            .bind(new_item.description)
            .bind(new_item.price)
            .bind(new_item.sku)
            .bind(new_item.is_active)
            .bind(new_item.is_featured)
            .bind(new_item.category_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn update(&self, catalog: Catalog, id: i64, patch: ItemPatch) -> Result<Item, AppError> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", catalog.items_table()));

        {
            let mut set = qb.separated(", ");
            if let Some(name) = patch.name {
                set.push("name = ").push_bind_unseparated(name);
            }
            if let Some(slug) = patch.slug {
                set.push("slug = ").push_bind_unseparated(slug);
            }
            if let Some(description) = patch.description {
                set.push("description = ").push_bind_unseparated(description);
            }
            if let Some(image) = patch.image {
                set.push("image = ").push_bind_unseparated(image);
            }
            if let Some(price) = patch.price {
                set.push("price = ").push_bind_unseparated(price);
            }
            if let Some(sku) = patch.sku {
                set.push("sku = ").push_bind_unseparated(sku);
            }
            if let Some(is_active) = patch.is_active {
                set.push("is_active = ").push_bind_unseparated(is_active);
            }
            if let Some(is_featured) = patch.is_featured {
                set.push("is_featured = ").push_bind_unseparated(is_featured);
            }
            if let Some(category_id) = patch.category_id {
                set.push("category_id = ").push_bind_unseparated(category_id);
            }
            set.push("updated_at = NOW()");
        }

        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(self.pool.as_ref()).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Item not found",
                json!({ "catalog": catalog, "id": id }),
            ));
        }

        self.find_by_id(catalog, id).await?.ok_or_else(|| {
            AppError::not_found("Item not found", json!({ "catalog": catalog, "id": id }))
        })
    }

    async fn delete(&self, catalog: Catalog, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", catalog.items_table());

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Item not found",
                json!({ "catalog": catalog, "id": id }),
            ));
        }

        Ok(())
    }
}
