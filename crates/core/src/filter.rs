//! Filter predicate builder for listing queries.
//!
//! Turns the flat, all-optional filter fields from the query string into a
//! structured predicate tree. The tree is storage-agnostic; the repository
//! layer renders it into parameterized SQL. Building never fails: range and
//! boolean typing is validated at the HTTP boundary before it gets here.

use serde::Deserialize;

/// A filterable column of the `listings` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    UnitName,
    Project,
    Description,
    Address,
    City,
    Price,
    Bedrooms,
    Bathrooms,
    Area,
    Available,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::UnitName => "unit_name",
            Column::Project => "project",
            Column::Description => "description",
            Column::Address => "address",
            Column::City => "city",
            Column::Price => "price",
            Column::Bedrooms => "bedrooms",
            Column::Bathrooms => "bathrooms",
            Column::Area => "area",
            Column::Available => "available",
        }
    }
}

/// A numeric bound value, kept as the bind type the column expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i32),
    Float(f64),
}

/// A single column constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Case-insensitive substring match.
    Contains(Column, String),
    /// `column >= value` (inclusive).
    Min(Column, Number),
    /// `column <= value` (inclusive).
    Max(Column, Number),
    /// Exact boolean equality.
    Equals(Column, bool),
}

/// One AND-ed term of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A single condition.
    Cond(Condition),
    /// A disjunction of conditions (the free-text search group).
    AnyOf(Vec<Condition>),
}

/// Conjunction of terms. Empty means "match all records".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub terms: Vec<Term>,
}

impl Predicate {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// The columns searched by the free-text `search` filter.
pub const SEARCH_COLUMNS: [Column; 5] = [
    Column::UnitName,
    Column::Description,
    Column::Address,
    Column::City,
    Column::Project,
];

/// Optional filter fields of a listing query (pagination and sort excluded).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
    pub search: Option<String>,
    pub city: Option<String>,
    pub project: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<i32>,
    pub max_bedrooms: Option<i32>,
    pub min_bathrooms: Option<i32>,
    pub max_bathrooms: Option<i32>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub available: Option<bool>,
}

impl ListingFilter {
    /// Build the predicate tree for this filter.
    ///
    /// All terms are AND-ed. The `search` term is itself a disjunction over
    /// [`SEARCH_COLUMNS`]. An empty filter yields an empty predicate.
    pub fn predicate(&self) -> Predicate {
        let mut terms = Vec::new();

        if let Some(term) = self.search.as_deref().map(str::trim) {
            if !term.is_empty() {
                terms.push(Term::AnyOf(
                    SEARCH_COLUMNS
                        .iter()
                        .map(|&col| Condition::Contains(col, term.to_string()))
                        .collect(),
                ));
            }
        }

        if let Some(city) = non_blank(self.city.as_deref()) {
            terms.push(Term::Cond(Condition::Contains(Column::City, city)));
        }
        if let Some(project) = non_blank(self.project.as_deref()) {
            terms.push(Term::Cond(Condition::Contains(Column::Project, project)));
        }

        push_range_f64(&mut terms, Column::Price, self.min_price, self.max_price);
        push_range_i32(
            &mut terms,
            Column::Bedrooms,
            self.min_bedrooms,
            self.max_bedrooms,
        );
        push_range_i32(
            &mut terms,
            Column::Bathrooms,
            self.min_bathrooms,
            self.max_bathrooms,
        );
        push_range_f64(&mut terms, Column::Area, self.min_area, self.max_area);

        if let Some(available) = self.available {
            terms.push(Term::Cond(Condition::Equals(Column::Available, available)));
        }

        Predicate { terms }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn push_range_f64(terms: &mut Vec<Term>, col: Column, min: Option<f64>, max: Option<f64>) {
    if let Some(min) = min {
        terms.push(Term::Cond(Condition::Min(col, Number::Float(min))));
    }
    if let Some(max) = max {
        terms.push(Term::Cond(Condition::Max(col, Number::Float(max))));
    }
}

fn push_range_i32(terms: &mut Vec<Term>, col: Column, min: Option<i32>, max: Option<i32>) {
    if let Some(min) = min {
        terms.push(Term::Cond(Condition::Min(col, Number::Int(min))));
    }
    if let Some(max) = max {
        terms.push(Term::Cond(Condition::Max(col, Number::Int(max))));
    }
}

/// Escape `%`, `_` and `\` in a user term and wrap it for a substring
/// `ILIKE` match, so filter input is always matched literally.
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_builds_empty_predicate() {
        let predicate = ListingFilter::default().predicate();
        assert!(predicate.is_empty());
    }

    #[test]
    fn search_builds_disjunction_over_five_columns() {
        let filter = ListingFilter {
            search: Some("Hills".to_string()),
            ..Default::default()
        };
        let predicate = filter.predicate();
        assert_eq!(predicate.terms.len(), 1);
        match &predicate.terms[0] {
            Term::AnyOf(conds) => {
                assert_eq!(conds.len(), 5);
                assert!(conds
                    .iter()
                    .all(|c| matches!(c, Condition::Contains(_, t) if t == "Hills")));
                let cols: Vec<Column> = conds
                    .iter()
                    .map(|c| match c {
                        Condition::Contains(col, _) => *col,
                        other => panic!("unexpected condition {other:?}"),
                    })
                    .collect();
                assert_eq!(cols, SEARCH_COLUMNS);
            }
            other => panic!("expected AnyOf, got {other:?}"),
        }
    }

    #[test]
    fn blank_search_is_ignored() {
        let filter = ListingFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(filter.predicate().is_empty());
    }

    #[test]
    fn range_emits_min_and_max_terms() {
        let filter = ListingFilter {
            min_price: Some(1000.0),
            max_price: Some(5000.0),
            ..Default::default()
        };
        let predicate = filter.predicate();
        assert_eq!(
            predicate.terms,
            vec![
                Term::Cond(Condition::Min(Column::Price, Number::Float(1000.0))),
                Term::Cond(Condition::Max(Column::Price, Number::Float(5000.0))),
            ]
        );
    }

    #[test]
    fn half_open_range_emits_single_term() {
        let filter = ListingFilter {
            min_bedrooms: Some(2),
            ..Default::default()
        };
        assert_eq!(
            filter.predicate().terms,
            vec![Term::Cond(Condition::Min(
                Column::Bedrooms,
                Number::Int(2)
            ))]
        );
    }

    #[test]
    fn available_is_three_valued() {
        let absent = ListingFilter::default();
        assert!(absent.predicate().is_empty());

        for value in [true, false] {
            let filter = ListingFilter {
                available: Some(value),
                ..Default::default()
            };
            assert_eq!(
                filter.predicate().terms,
                vec![Term::Cond(Condition::Equals(Column::Available, value))]
            );
        }
    }

    #[test]
    fn all_filters_are_conjunctive() {
        let filter = ListingFilter {
            search: Some("view".to_string()),
            city: Some("Cairo".to_string()),
            min_area: Some(80.0),
            available: Some(true),
            ..Default::default()
        };
        let predicate = filter.predicate();
        // search group + city + min_area + available
        assert_eq!(predicate.terms.len(), 4);
        assert!(matches!(predicate.terms[0], Term::AnyOf(_)));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("a%b_c"), "%a\\%b\\_c%");
        assert_eq!(like_pattern("plain"), "%plain%");
    }
}
