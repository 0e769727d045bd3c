//! List query types: pagination, filters and whitelisted sort fields.
//!
//! Sort enums map to fixed SQL expressions so user input never reaches the
//! `ORDER BY` clause as text.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.page_size as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the totals the data table needs.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            ((total as u64).div_ceil(request.page_size as u64)) as u32
        };
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySortField {
    Name,
    Slug,
    #[default]
    CreatedAt,
    UpdatedAt,
    IsActive,
    IsFeatured,
    ItemCount,
}

impl CategorySortField {
    /// Column expression in the category list query (`c` aliases the table).
    pub fn as_sql(&self) -> &'static str {
        match self {
            CategorySortField::Name => "c.name",
            CategorySortField::Slug => "c.slug",
            CategorySortField::CreatedAt => "c.created_at",
            CategorySortField::UpdatedAt => "c.updated_at",
            CategorySortField::IsActive => "c.is_active",
            CategorySortField::IsFeatured => "c.is_featured",
            CategorySortField::ItemCount => "item_count",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSortField {
    Name,
    Slug,
    Price,
    Sku,
    #[default]
    CreatedAt,
    UpdatedAt,
    IsActive,
    IsFeatured,
    Category,
}

impl ItemSortField {
    /// Column expression in the item list query (`i` items, `c` categories).
    pub fn as_sql(&self) -> &'static str {
        match self {
            ItemSortField::Name => "i.name",
            ItemSortField::Slug => "i.slug",
            ItemSortField::Price => "i.price",
            ItemSortField::Sku => "i.sku",
            ItemSortField::CreatedAt => "i.created_at",
            ItemSortField::UpdatedAt => "i.updated_at",
            ItemSortField::IsActive => "i.is_active",
            ItemSortField::IsFeatured => "i.is_featured",
            ItemSortField::Category => "c.name",
        }
    }
}

/// Filters and ordering for the category list.
#[derive(Debug, Clone, Default)]
pub struct CategoryQuery {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub sort: CategorySortField,
    pub direction: SortDirection,
    pub page: PageRequest,
}

/// Filters and ordering for the item list.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub category_id: Option<i64>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: ItemSortField,
    pub direction: SortDirection,
    pub page: PageRequest,
}

/// Escapes `%`, `_` and `\` and wraps the term for an `ILIKE` match.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
