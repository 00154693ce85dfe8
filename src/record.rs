//! The inventory record and the field selector used by search and sort.

use std::borrow::Cow;
use std::fmt;

use crate::key::derive_key;

/// One inventory entry: five descriptive fields plus the order key derived
/// from the item identifier at construction time.
///
/// `item_id` is the business key; a [`StockTree`](crate::StockTree) holds
/// at most one record per derived key. The key places the record in the
/// tree and is never written to the CSV file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StockRecord {
    date: String,
    stock_label: String,
    brand: String,
    item_id: String,
    status: String,
    key: i32,
}

impl StockRecord {
    /// Builds a record from its five descriptive fields and derives the
    /// order key from `item_id`.
    pub fn new(
        date: impl Into<String>,
        stock_label: impl Into<String>,
        brand: impl Into<String>,
        item_id: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        let item_id = item_id.into();
        let key = derive_key(&item_id);
        Self {
            date: date.into(),
            stock_label: stock_label.into(),
            brand: brand.into(),
            item_id,
            status: status.into(),
            key,
        }
    }

    /// Acquisition date in textual month/day/year form.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Free-text stock classification, e.g. `"New"` or `"Used"`.
    #[must_use]
    pub fn stock_label(&self) -> &str {
        &self.stock_label
    }

    /// Free-text manufacturer name.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// The unique item identifier.
    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Free-text lifecycle state, e.g. `"On-hand"` or `"Sold"`.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The derived order key.
    #[must_use]
    pub const fn key(&self) -> i32 {
        self.key
    }
}

impl fmt::Display for StockRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {}, Stock Label: {}, Brand: {}, Item ID: {}, Status: {}",
            self.date, self.stock_label, self.brand, self.item_id, self.status
        )
    }
}

/// Selects which attribute of a [`StockRecord`] a search matches against or
/// a sort orders by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    Date,
    StockLabel,
    Brand,
    ItemId,
    Status,
    /// The derived order key, rendered as decimal text.
    Key,
}

impl Field {
    /// Returns the record's value for this field. The key is rendered as
    /// text so that all fields compare the same way.
    #[must_use]
    pub fn value_of(self, record: &StockRecord) -> Cow<'_, str> {
        match self {
            Self::Date => Cow::Borrowed(record.date()),
            Self::StockLabel => Cow::Borrowed(record.stock_label()),
            Self::Brand => Cow::Borrowed(record.brand()),
            Self::ItemId => Cow::Borrowed(record.item_id()),
            Self::Status => Cow::Borrowed(record.status()),
            Self::Key => Cow::Owned(record.key().to_string()),
        }
    }
}
