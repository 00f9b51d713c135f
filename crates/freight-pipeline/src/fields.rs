//! Header alias resolution
//!
//! Input columns are matched case-insensitively (after trimming) against a
//! fixed alias table. Rows are reduced to [`RawFields`] before any
//! validation rule runs.

use crate::normalize::normalize_text;
use std::collections::HashMap;

/// The three logical fields of a freight-matrix record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Sku,
    PostCode,
    Price,
}

const SKU_ALIASES: &[&str] = &[
    "sku",
    "productcode",
    "product_code",
    "product code",
    "productid",
    "product id",
];

const POST_CODE_ALIASES: &[&str] = &["postcode", "post_code", "post code", "zip", "zip_code"];

const PRICE_ALIASES: &[&str] = &["price", "unit_price", "unitprice", "unit price", "amount"];

impl Field {
    /// All fields in canonical order
    pub const ALL: [Field; 3] = [Field::Sku, Field::PostCode, Field::Price];

    /// Canonical field name as used in messages and exported files
    pub fn name(self) -> &'static str {
        match self {
            Field::Sku => "sku",
            Field::PostCode => "postCode",
            Field::Price => "price",
        }
    }

    /// Lower-case header spellings accepted for this field, in lookup order
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Sku => SKU_ALIASES,
            Field::PostCode => POST_CODE_ALIASES,
            Field::Price => PRICE_ALIASES,
        }
    }

    /// Resolve a column name to a field, if it is a registered alias
    pub fn from_alias(name: &str) -> Option<Field> {
        let key = normalize_key(name);
        Field::ALL
            .into_iter()
            .find(|field| field.aliases().contains(&key.as_str()))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trim and lower-case a column name
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Fields with no alias present among `headers`, in canonical order
pub fn missing_fields<S: AsRef<str>>(headers: &[S]) -> Vec<Field> {
    let keys: Vec<String> = headers.iter().map(|h| normalize_key(h.as_ref())).collect();
    Field::ALL
        .into_iter()
        .filter(|field| {
            !field
                .aliases()
                .iter()
                .any(|alias| keys.iter().any(|k| k == alias))
        })
        .collect()
}

/// A row keyed by normalized column name.
///
/// When two columns normalize to the same key the later one wins.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    values: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: &str, value: impl Into<String>) {
        self.values.insert(normalize_key(column), value.into());
    }

    /// First value present under the field's aliases
    pub fn lookup(&self, field: Field) -> Option<&str> {
        field
            .aliases()
            .iter()
            .find_map(|alias| self.values.get(*alias))
            .map(String::as_str)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k.as_ref(), v);
        }
        row
    }
}

/// The resolved, text-normalized raw values of one input row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    pub sku: String,
    pub post_code: String,
    pub price: String,
}

impl RawFields {
    pub fn new(
        sku: impl Into<String>,
        post_code: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            post_code: post_code.into(),
            price: price.into(),
        }
    }

    /// Resolve the three fields from a row and normalize their text
    pub fn resolve(row: &RawRow) -> Self {
        let text = |field| normalize_text(row.lookup(field));
        Self {
            sku: text(Field::Sku),
            post_code: text(Field::PostCode),
            price: text(Field::Price),
        }
    }

    /// True when every field is empty; such rows are skipped silently
    pub fn is_blank(&self) -> bool {
        self.sku.is_empty() && self.post_code.is_empty() && self.price.is_empty()
    }

    /// Error context string: `sku=<sku>, postCode=<postCode>`
    pub fn context(&self) -> String {
        format!("sku={}, postCode={}", self.sku, self.post_code)
    }
}
