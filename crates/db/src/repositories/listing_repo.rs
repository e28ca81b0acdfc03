//! Repository for the `listings` table.

use sqlx::PgPool;

use rentora_core::filter::{like_pattern, Condition, ListingFilter, Number, Predicate, Term};
use rentora_core::listing::{CreateListing, UpdateListing};
use rentora_core::page::PageRequest;
use rentora_core::types::DbId;

use crate::models::listing::Listing;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, unit_name, unit_number, project, description, address, city, \
    price, bedrooms, bathrooms, area, images, available, created_at, updated_at";

/// Provides CRUD and paginated query operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing, returning the created row.
    ///
    /// The payload is expected to be validated and normalized (defaults
    /// applied) by the caller; the `unwrap_or` fallbacks here only mirror
    /// the schema defaults.
    pub async fn create(pool: &PgPool, input: &CreateListing) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings
                (unit_name, unit_number, project, description, address, city,
                 price, bedrooms, bathrooms, area, images, available)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(&input.unit_name)
            .bind(&input.unit_number)
            .bind(&input.project)
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.city)
            .bind(input.price)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.area)
            .bind(input.images.as_deref().unwrap_or(&[]))
            .bind(input.available.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    /// Find a listing by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a listing with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM listings WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Fetch one page of listings matching `filter`, plus the total match
    /// count ignoring pagination.
    ///
    /// Both statements run inside a single repeatable-read transaction so
    /// the page and the count reflect the same snapshot even under
    /// concurrent writes.
    pub async fn list(
        pool: &PgPool,
        filter: &ListingFilter,
        page: &PageRequest,
    ) -> Result<(Vec<Listing>, i64), sqlx::Error> {
        let predicate = filter.predicate();
        let (where_clause, binds, next_idx) = render_predicate(&predicate);

        // id breaks ties so pages stay stable when the sort column repeats.
        let fetch_sql = format!(
            "SELECT {COLUMNS} FROM listings {where_clause} ORDER BY {}, id DESC LIMIT ${} OFFSET ${}",
            page.order_clause(),
            next_idx,
            next_idx + 1,
        );
        let count_sql = format!("SELECT COUNT(*) FROM listings {where_clause}");
        tracing::debug!(fetch_sql, "Running listing query");

        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let rows = bind_values(sqlx::query_as::<_, Listing>(&fetch_sql), &binds)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&mut *tx)
            .await?;

        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_sql), &binds)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((rows, total))
    }

    /// Update a listing. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET
                unit_name = COALESCE($2, unit_name),
                unit_number = COALESCE($3, unit_number),
                project = COALESCE($4, project),
                description = COALESCE($5, description),
                address = COALESCE($6, address),
                city = COALESCE($7, city),
                price = COALESCE($8, price),
                bedrooms = COALESCE($9, bedrooms),
                bathrooms = COALESCE($10, bathrooms),
                area = COALESCE($11, area),
                images = COALESCE($12, images),
                available = COALESCE($13, available),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(&input.unit_name)
            .bind(&input.unit_number)
            .bind(&input.project)
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.city)
            .bind(input.price)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.area)
            .bind(input.images.as_deref())
            .bind(input.available)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a listing by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built listing queries.
enum BindValue {
    Text(String),
    Int(i32),
    Float(f64),
    Bool(bool),
}

/// Render one condition at the given bind index.
fn render_condition(cond: &Condition, bind_idx: u32, binds: &mut Vec<BindValue>) -> String {
    match cond {
        Condition::Contains(col, term) => {
            binds.push(BindValue::Text(like_pattern(term)));
            format!("{} ILIKE ${bind_idx}", col.name())
        }
        Condition::Min(col, value) => {
            binds.push(number_bind(*value));
            format!("{} >= ${bind_idx}", col.name())
        }
        Condition::Max(col, value) => {
            binds.push(number_bind(*value));
            format!("{} <= ${bind_idx}", col.name())
        }
        Condition::Equals(col, value) => {
            binds.push(BindValue::Bool(*value));
            format!("{} = ${bind_idx}", col.name())
        }
    }
}

fn number_bind(value: Number) -> BindValue {
    match value {
        Number::Int(v) => BindValue::Int(v),
        Number::Float(v) => BindValue::Float(v),
    }
}

/// Render a predicate tree into a WHERE clause and bind values.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause is
/// empty when the predicate matches all rows, otherwise starts with `WHERE `.
fn render_predicate(predicate: &Predicate) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<BindValue> = Vec::new();
    let mut bind_idx = 1u32;

    for term in &predicate.terms {
        match term {
            Term::Cond(cond) => {
                conditions.push(render_condition(cond, bind_idx, &mut binds));
                bind_idx += 1;
            }
            Term::AnyOf(alternatives) => {
                let rendered: Vec<String> = alternatives
                    .iter()
                    .map(|cond| {
                        let sql = render_condition(cond, bind_idx, &mut binds);
                        bind_idx += 1;
                        sql
                    })
                    .collect();
                conditions.push(format!("({})", rendered.join(" OR ")));
            }
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, binds, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    binds: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in binds {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Int(v) => q = q.bind(*v),
            BindValue::Float(v) => q = q.bind(*v),
            BindValue::Bool(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    binds: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in binds {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Int(v) => q = q.bind(*v),
            BindValue::Float(v) => q = q.bind(*v),
            BindValue::Bool(v) => q = q.bind(*v),
        }
    }
    q
}
