//! PostgreSQL implementation of the category repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{Catalog, Category, CategoryOption, CategoryPatch, NewCategory};
use crate::domain::query::{CategoryQuery, Page, like_pattern};
use crate::domain::repositories::{CatalogSummary, CategoryRepository};
use crate::error::AppError;

/// PostgreSQL repository for categories of both catalogs.
pub struct PgCategoryRepository {
    pool: Arc<PgPool>,
}

impl PgCategoryRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Select list producing a [`Category`] row from alias `c`.
fn select_columns(catalog: Catalog) -> String {
    format!(
        "SELECT c.id, c.name, c.slug, c.description, c.image, c.is_active, c.is_featured, \
         (SELECT COUNT(*) FROM {items} i WHERE i.category_id = c.id) AS item_count, \
         c.created_at, c.updated_at \
         FROM {categories} c",
        items = catalog.items_table(),
        categories = catalog.categories_table(),
    )
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &CategoryQuery) {
    qb.push(" WHERE TRUE");

    if let Some(search) = query.search.as_deref() {
        let pattern = like_pattern(search);
        qb.push(" AND (c.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.slug ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(is_active) = query.is_active {
        qb.push(" AND c.is_active = ").push_bind(is_active);
    }

    if let Some(is_featured) = query.is_featured {
        qb.push(" AND c.is_featured = ").push_bind(is_featured);
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(
        &self,
        catalog: Catalog,
        query: CategoryQuery,
    ) -> Result<Page<Category>, AppError> {
        let mut count_qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT COUNT(*) FROM {} c",
            catalog.categories_table()
        ));
        push_filters(&mut count_qb, &query);
        let total: i64 = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(select_columns(catalog));
        push_filters(&mut qb, &query);
        let direction = query.direction.as_sql();
        qb.push(format!(
            " ORDER BY {} {}, c.id {}",
            query.sort.as_sql(),
            direction,
            direction
        ));
        qb.push(" LIMIT ")
            .push_bind(query.page.limit())
            .push(" OFFSET ")
            .push_bind(query.page.offset());

        let items = qb
            .build_query_as::<Category>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(Page::new(items, total, query.page))
    }

    async fn list_options(&self, catalog: Catalog) -> Result<Vec<CategoryOption>, AppError> {
        let sql = format!(
            "SELECT id, name FROM {} WHERE is_active ORDER BY name, id",
            catalog.categories_table()
        );

        let rows = sqlx::query_as::<_, CategoryOption>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn list_active(&self, catalog: Catalog) -> Result<Vec<Category>, AppError> {
        let sql = format!(
            "{} WHERE c.is_active ORDER BY c.is_featured DESC, c.name, c.id",
            select_columns(catalog)
        );

        let rows = sqlx::query_as::<_, Category>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, catalog: Catalog, id: i64) -> Result<Option<Category>, AppError> {
        let sql = format!("{} WHERE c.id = $1", select_columns(catalog));

        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn find_by_slug(
        &self,
        catalog: Catalog,
        slug: &str,
    ) -> Result<Option<Category>, AppError> {
        let sql = format!("{} WHERE c.slug = $1", select_columns(catalog));

        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(slug)
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
            catalog.categories_table()
        );

        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(slug)
            .bind(exclude_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn create(
        &self,
        catalog: Catalog,
        new_category: NewCategory,
    ) -> Result<Category, AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} (name, slug, description, is_active, is_featured)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, slug, description, image, is_active, is_featured,
                      0::BIGINT AS item_count, created_at, updated_at
            "#,
            catalog.categories_table()
        );

        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(new_category.name)
            .bind(new_category.slug)
            .bind(new_category.description)
            .bind(new_category.is_active)
            .bind(new_category.is_featured)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn update(
        &self,
        catalog: Catalog,
        id: i64,
        patch: CategoryPatch,
    ) -> Result<Category, AppError> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", catalog.categories_table()));

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
            if let Some(is_active) = patch.is_active {
                set.push("is_active = ").push_bind_unseparated(is_active);
            }
            if let Some(is_featured) = patch.is_featured {
                set.push("is_featured = ").push_bind_unseparated(is_featured);
            }
            set.push("updated_at = NOW()");
        }

        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(self.pool.as_ref()).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Category not found",
                json!({ "catalog": catalog, "id": id }),
            ));
        }

        self.find_by_id(catalog, id).await?.ok_or_else(|| {
            AppError::not_found("Category not found", json!({ "catalog": catalog, "id": id }))
        })
    }

    async fn delete(&self, catalog: Catalog, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", catalog.categories_table());

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Category not found",
                json!({ "catalog": catalog, "id": id }),
            ));
        }

        Ok(())
    }

    async fn count_items(&self, catalog: Catalog, id: i64) -> Result<i64, AppError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE category_id = $1",
            catalog.items_table()
        );

        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn summary(&self, catalog: Catalog) -> Result<CatalogSummary, AppError> {
        let sql = format!(
            r#"
            SELECT
                (SELECT COUNT(*) FROM {categories}) AS categories,
                (SELECT COUNT(*) FROM {categories} WHERE is_active) AS active_categories,
                (SELECT COUNT(*) FROM {items}) AS items,
                (SELECT COUNT(*) FROM {items} WHERE is_active) AS active_items,
                (SELECT COUNT(*) FROM {items} WHERE is_featured) AS featured_items
            "#,
            categories = catalog.categories_table(),
            items = catalog.items_table(),
        );

        let summary = sqlx::query_as::<_, CatalogSummary>(&sql)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(summary)
    }
}
