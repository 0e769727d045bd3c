mod common;

use catalog_admin::domain::entities::{Catalog, CategoryPatch, NewCategory};
use catalog_admin::domain::query::{CategoryQuery, CategorySortField, PageRequest, SortDirection};
use catalog_admin::domain::repositories::CategoryRepository;
use catalog_admin::error::AppError;
use catalog_admin::infrastructure::persistence::PgCategoryRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_category(name: &str, slug: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        is_active: true,
        is_featured: false,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool));

    let created = repo
        .create(Catalog::Products, new_category("Garden", "garden"))
        .await
        .unwrap();

    assert_eq!(created.item_count, 0);
    let by_slug = repo
        .find_by_slug(Catalog::Products, "garden")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_slug.id, created.id);

    assert!(
        repo.find_by_id(Catalog::Services, created.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_slug_conflicts(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool));

    repo.create(Catalog::Products, new_category("Garden", "garden"))
        .await
        .unwrap();
    let result = repo
        .create(Catalog::Products, new_category("Garden 2", "garden"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_slug_exists_excludes_self(pool: PgPool) {
    let id = common::create_category(&pool, "product_categories", "Garden", "garden").await;
    let repo = PgCategoryRepository::new(Arc::new(pool));

    assert!(repo.slug_exists(Catalog::Products, "garden", None).await.unwrap());
    assert!(!repo.slug_exists(Catalog::Products, "garden", Some(id)).await.unwrap());
    assert!(!repo.slug_exists(Catalog::Services, "garden", None).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_search_sort_and_paginate(pool: PgPool) {
    for (name, slug) in [("Apples", "apples"), ("Bananas", "bananas"), ("Cherries", "cherries")] {
        common::create_category(&pool, "product_categories", name, slug).await;
    }
    let repo = PgCategoryRepository::new(Arc::new(pool));

    let page = repo
        .list(
            Catalog::Products,
            CategoryQuery {
                sort: CategorySortField::Name,
                direction: SortDirection::Asc,
                page: PageRequest::new(2, 2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].slug, "cherries");

    let searched = repo
        .list(
            Catalog::Products,
            CategoryQuery {
                search: Some("NAN".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(searched.total, 1);
    assert_eq!(searched.items[0].slug, "bananas");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    common::create_category(&pool, "product_categories", "Sale", "sale").await;
    let repo = PgCategoryRepository::new(Arc::new(pool));

    let page = repo
        .list(
            Catalog::Products,
            CategoryQuery {
                search: Some("%".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_patch_and_clear(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool));
    let mut input = new_category("Garden", "garden");
    input.description = Some("Outdoor".to_string());
    let created = repo.create(Catalog::Products, input).await.unwrap();

    let updated = repo
        .update(
            Catalog::Products,
            created.id,
            CategoryPatch {
                description: Some(None),
                is_featured: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Garden");
    assert!(updated.description.is_none());
    assert!(updated.is_featured);
    assert!(updated.updated_at >= created.updated_at);

    let missing = repo
        .update(Catalog::Products, 9999, CategoryPatch::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound { .. })));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_counts_and_summary(pool: PgPool) {
    let tools = common::create_category(&pool, "product_categories", "Tools", "tools").await;
    common::create_inactive_category(&pool, "product_categories", "Old", "old").await;
    let saw = common::create_item(&pool, "product_items", tools, "Saw", "saw", None).await;
    common::create_item(&pool, "product_items", tools, "Drill", "drill", None).await;
    common::set_item_flags(&pool, "product_items", saw, true, true).await;
    let repo = PgCategoryRepository::new(Arc::new(pool));

    assert_eq!(repo.count_items(Catalog::Products, tools).await.unwrap(), 2);

    let summary = repo.summary(Catalog::Products).await.unwrap();
    assert_eq!(summary.categories, 2);
    assert_eq!(summary.active_categories, 1);
    assert_eq!(summary.items, 2);
    assert_eq!(summary.active_items, 2);
    assert_eq!(summary.featured_items, 1);

    let options = repo.list_options(Catalog::Products).await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].name, "Tools");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_with_items_is_refused_by_database(pool: PgPool) {
    let tools = common::create_category(&pool, "product_categories", "Tools", "tools").await;
    common::create_item(&pool, "product_items", tools, "Saw", "saw", None).await;
    let repo = PgCategoryRepository::new(Arc::new(pool));

    let result = repo.delete(Catalog::Products, tools).await;
    assert!(matches!(result, Err(AppError::Validation { .. })));

    let missing = repo.delete(Catalog::Products, 9999).await;
    assert!(matches!(missing, Err(AppError::NotFound { .. })));
}
