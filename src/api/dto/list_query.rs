//! Query string parameters of the category and item list endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use serde_with::{NoneAsEmptyString, serde_as};

use crate::domain::query::{
    CategoryQuery, CategorySortField, DEFAULT_PAGE_SIZE, ItemQuery, ItemSortField, MAX_PAGE_SIZE,
    PageRequest, SortDirection,
};
use crate::error::AppError;

/// Pagination and ordering shared by both lists.
///
/// Empty values (`?is_active=`) are treated as absent, which is what HTML
/// filter forms send for "any".
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page_size: Option<u32>,

    #[serde(default)]
    pub search: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub is_featured: Option<bool>,

    #[serde(default)]
    pub sort: Option<String>,

    #[serde(default)]
    pub order: Option<String>,
}

impl ListParams {
    /// Checks page bounds and applies defaults.
    ///
    /// # Validation
    ///
    /// - `page` must be > 0
    /// - `page_size` must be between 1 and 100
    pub fn page_request(&self) -> Result<PageRequest, AppError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::bad_request(
                format!("Page size must be between 1 and {}", MAX_PAGE_SIZE),
                json!({ "page_size": page_size }),
            ));
        }

        Ok(PageRequest::new(page, page_size))
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn direction(&self) -> Result<SortDirection, AppError> {
        parse_keyword(self.order.as_deref(), "order")
    }
}

/// Category list parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListParams {
    #[serde(flatten)]
    pub list: ListParams,
}

impl CategoryListParams {
    pub fn into_query(self) -> Result<CategoryQuery, AppError> {
        let list = self.list;
        Ok(CategoryQuery {
            search: list.search_term(),
            is_active: list.is_active,
            is_featured: list.is_featured,
            sort: parse_keyword::<CategorySortField>(list.sort.as_deref(), "sort")?,
            direction: list.direction()?,
            page: list.page_request()?,
        })
    }
}

/// Item list parameters.
///
/// `serde(flatten)` hands every value to the inner struct as a string, so the
/// item-only numbers are parsed with `NoneAsEmptyString` as well.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ItemListParams {
    #[serde(flatten)]
    pub list: ListParams,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub category_id: Option<i64>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub min_price: Option<Decimal>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub max_price: Option<Decimal>,
}

impl ItemListParams {
    pub fn into_query(self) -> Result<ItemQuery, AppError> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price)
            && min > max
        {
            return Err(AppError::bad_request(
                "min_price must not exceed max_price",
                json!({ "min_price": min, "max_price": max }),
            ));
        }

        let list = self.list;
        Ok(ItemQuery {
            search: list.search_term(),
            is_active: list.is_active,
            is_featured: list.is_featured,
            category_id: self.category_id,
            min_price: self.min_price,
            max_price: self.max_price,
            sort: parse_keyword::<ItemSortField>(list.sort.as_deref(), "sort")?,
            direction: list.direction()?,
            page: list.page_request()?,
        })
    }
}

/// Parses a whitelisted keyword (`sort`, `order`) or falls back to its default.
fn parse_keyword<T>(raw: Option<&str>, param: &str) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(T::default()),
        Some(value) => serde_json::from_value(Value::String(value.to_ascii_lowercase()))
            .map_err(|_| {
                AppError::bad_request(
                    format!("Unsupported {} value", param),
                    json!({ param: value }),
                )
            }),
    }
}
