//! Search filter construction and hit shaping for the customer picker.
//!
//! # Responsibility
//! - Build the two bind patterns used by the search query.
//! - Annotate raw rows with flattened display fields.
//!
//! # Invariants
//! - The name clause compares the whole `"first last"` string against the
//!   token; only the company, number and email clauses match substrings.
//! - Tokens are trimmed; whitespace-only tokens produce no filter.
//! - `%`, `_` and `\` in a token are literal characters, never wildcards.

use crate::model::customer::CustomerId;
use serde::Serialize;

/// Bind patterns for one customer search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    token: String,
}

impl SearchFilter {
    /// Builds a filter for `term`, or `None` for blank input.
    pub fn from_term(term: &str) -> Option<Self> {
        let token = term.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self {
            token: token.to_string(),
        })
    }

    /// Value for the concatenated name clause.
    ///
    /// Compared with `=` under `NOCASE`, so only the full name matches
    /// (ASCII case-insensitive).
    pub fn exact_name(&self) -> &str {
        &self.token
    }

    /// `LIKE` pattern for the company, number and email substring clauses.
    ///
    /// Pair with `ESCAPE '\'`.
    pub fn contains_pattern(&self) -> String {
        format!("%{}%", escape_like(&self.token))
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

fn escape_like(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for ch in token.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

const LIKE_ESCAPE: char = '\\';

/// Raw row returned by the search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSearchRow {
    pub id: CustomerId,
    pub number: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub billing_company: Option<String>,
    pub shipping_company: Option<String>,
}

/// One entry of the type-ahead result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSearchHit {
    pub id: CustomerId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub billing_company: Option<String>,
    pub shipping_company: Option<String>,
    /// Display company: billing company, else shipping company.
    pub company: Option<String>,
    /// Customer number.
    pub number: Option<String>,
    /// `"first last"`.
    pub name: String,
}

impl CustomerSearchRow {
    /// Adds the flattened display fields used by the picker.
    pub fn annotate(self) -> CustomerSearchHit {
        let company = self
            .billing_company
            .clone()
            .filter(|company| !company.is_empty())
            .or_else(|| self.shipping_company.clone());
        let name = format!("{} {}", self.first_name, self.last_name);

        CustomerSearchHit {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            billing_company: self.billing_company,
            shipping_company: self.shipping_company,
            company,
            number: self.number,
            name,
        }
    }
}
