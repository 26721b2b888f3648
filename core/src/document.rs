use crate::error::{ExtractError, UnknownField};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

pub type Pid = String;

/// A product as loaded from the catalog, before any field is checked.
pub type RawDocument = Map<String, Value>;

/// All documents of a catalog keyed by pid.
pub type Corpus = BTreeMap<Pid, RawDocument>;

pub type MetadataMap = BTreeMap<Pid, MetadataRecord>;
pub type IndexInfoMap = BTreeMap<Pid, IndexInfoRecord>;

/// A product with every declared attribute present.
///
/// Prices, discount and rating stay as the raw JSON values found in the
/// catalog (e.g. `"69% off"`); cleaning them is a separate stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pid: Pid,
    pub title: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub sub_category: String,
    pub product_details: Value,
    pub seller: String,
    pub out_of_stock: bool,
    pub selling_price: Value,
    pub discount: Value,
    pub actual_price: Value,
    pub average_rating: Value,
    pub url: String,
}

impl Document {
    /// Attributes besides the pid, in declaration order.
    pub const ATTRIBUTES: [&'static str; 13] = [
        "title",
        "description",
        "brand",
        "category",
        "sub_category",
        "product_details",
        "seller",
        "out_of_stock",
        "selling_price",
        "discount",
        "actual_price",
        "average_rating",
        "url",
    ];

    /// Build a document from its loaded JSON object. Attributes are checked
    /// in declaration order and the first problem is reported.
    pub fn from_raw(pid: &str, raw: &RawDocument) -> Result<Self, ExtractError> {
        let fields = Fields { pid, raw };
        Ok(Self {
            pid: pid.to_string(),
            title: fields.text("title")?,
            description: fields.text("description")?,
            brand: fields.text("brand")?,
            category: fields.text("category")?,
            sub_category: fields.text("sub_category")?,
            product_details: fields.opaque("product_details")?,
            seller: fields.text("seller")?,
            out_of_stock: fields.flag("out_of_stock")?,
            selling_price: fields.opaque("selling_price")?,
            discount: fields.opaque("discount")?,
            actual_price: fields.opaque("actual_price")?,
            average_rating: fields.opaque("average_rating")?,
            url: fields.text("url")?,
        })
    }

    /// Split into the operational record and the textual record.
    pub fn split(self) -> (MetadataRecord, IndexInfoRecord) {
        let metadata = MetadataRecord {
            out_of_stock: self.out_of_stock,
            selling_price: self.selling_price,
            discount: self.discount,
            actual_price: self.actual_price,
            average_rating: self.average_rating,
            url: self.url,
        };
        let info = IndexInfoRecord {
            title: self.title,
            description: self.description,
            brand: self.brand,
            category: self.category,
            sub_category: self.sub_category,
            product_details: self.product_details,
            seller: self.seller,
        };
        (metadata, info)
    }
}

struct Fields<'a> {
    pid: &'a str,
    raw: &'a RawDocument,
}

impl<'a> Fields<'a> {
    fn get(&self, field: &'static str) -> Result<&'a Value, ExtractError> {
        self.raw.get(field).ok_or_else(|| ExtractError::MissingField {
            pid: self.pid.to_string(),
            field,
        })
    }

    fn text(&self, field: &'static str) -> Result<String, ExtractError> {
        match self.get(field)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.invalid(field, "a string", other)),
        }
    }

    fn flag(&self, field: &'static str) -> Result<bool, ExtractError> {
        match self.get(field)? {
            Value::Bool(b) => Ok(*b),
            other => Err(self.invalid(field, "a boolean", other)),
        }
    }

    fn opaque(&self, field: &'static str) -> Result<Value, ExtractError> {
        self.get(field).cloned()
    }

    fn invalid(&self, field: &'static str, expected: &str, found: &Value) -> ExtractError {
        ExtractError::InvalidField {
            pid: self.pid.to_string(),
            field,
            reason: format!("expected {expected}, found {}", kind(found)),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Numeric and operational fields, used for filtering and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub out_of_stock: bool,
    pub selling_price: Value,
    pub discount: Value,
    pub actual_price: Value,
    pub average_rating: Value,
    pub url: String,
}

impl MetadataRecord {
    pub const FIELDS: [&'static str; 6] = [
        "out_of_stock",
        "selling_price",
        "discount",
        "actual_price",
        "average_rating",
        "url",
    ];
}

/// Categorical and textual fields, the surface a search index normalizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexInfoRecord {
    pub title: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub sub_category: String,
    pub product_details: Value,
    pub seller: String,
}

impl IndexInfoRecord {
    pub const FIELDS: [&'static str; 7] = [
        "title",
        "description",
        "brand",
        "category",
        "sub_category",
        "product_details",
        "seller",
    ];

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
            TextField::Description => &self.description,
            TextField::Brand => &self.brand,
            TextField::Category => &self.category,
            TextField::SubCategory => &self.sub_category,
            TextField::Seller => &self.seller,
        }
    }
}

/// Plain-text fields of an [`IndexInfoRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
    Description,
    Brand,
    Category,
    SubCategory,
    Seller,
}

impl TextField {
    pub const ALL: [TextField; 6] = [
        TextField::Title,
        TextField::Description,
        TextField::Brand,
        TextField::Category,
        TextField::SubCategory,
        TextField::Seller,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::Description => "description",
            TextField::Brand => "brand",
            TextField::Category => "category",
            TextField::SubCategory => "sub_category",
            TextField::Seller => "seller",
        }
    }
}

impl FromStr for TextField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
