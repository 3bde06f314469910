use serde::{Deserialize, Serialize};

use crate::entities::RecordId;

/// A standing order for an item, as listed under "my orders".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub item: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub apartment: String,
    #[serde(default)]
    pub flat: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub qty: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default, rename = "deliveryperson")]
    pub delivery_person: String,
}

impl Order {
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legacy_delivery_person_field() {
        let order: Order = serde_json::from_str(
            r#"{"item":"Fresh Milk","qty":2,"price":25,"deliveryperson":"Rajesh"}"#,
        )
        .unwrap();
        assert_eq!(order.delivery_person, "Rajesh");
        assert!((order.line_total() - 50.0).abs() < f64::EPSILON);
    }
}
