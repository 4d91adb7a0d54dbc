//! Provider action types and product line items.

use serde::{Deserialize, Serialize};

/// The provider's operation selector.
///
/// Serialized on the wire as the provider's digit strings: `"3"`, `"4"`,
/// `"8"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// Balance query. Never carries an rrn, amount, or products.
    #[serde(rename = "3")]
    BalanceQuery,
    /// Regular sale.
    #[serde(rename = "4")]
    Sale,
    /// Cashback redemption.
    #[serde(rename = "8")]
    Cashback,
}

impl ActionType {
    /// The wire representation (`"3"` / `"4"` / `"8"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BalanceQuery => "3",
            Self::Sale => "4",
            Self::Cashback => "8",
        }
    }

    /// Whether this action carries an rrn and amount (sales and cashback).
    #[must_use]
    pub const fn is_monetary(self) -> bool {
        matches!(self, Self::Sale | Self::Cashback)
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product line item in provider wire format.
///
/// All numeric fields are strings per the provider contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Catalog product id.
    #[serde(rename = "productId")]
    pub product_id: String,
    /// Cost in minor units. Overridden with the attempt amount on submit.
    #[serde(rename = "pCost")]
    pub p_cost: String,
    /// Price in minor units. Overridden with the attempt amount on submit.
    pub price: String,
    /// Quantity, always `"1000"` per the provider contract.
    pub quantity: String,
    /// Markup/discount, always `"0"`.
    #[serde(rename = "markupDiscount")]
    pub markup_discount: String,
    /// Tax percentage string.
    pub tax: String,
    /// Barcode.
    pub barcode: String,
    /// Product group.
    pub group: String,
    /// Provider flag field, always empty.
    pub flag: String,
}

impl Product {
    /// The default line item used when the operator did not pick products.
    #[must_use]
    pub fn default_item(amount_minor: &str) -> Self {
        Self {
            name: "Loyalty Item".to_string(),
            product_id: "1000100".to_string(),
            p_cost: amount_minor.to_string(),
            price: amount_minor.to_string(),
            quantity: "1000".to_string(),
            markup_discount: "0".to_string(),
            tax: "20".to_string(),
            barcode: "1000100".to_string(),
            group: "4b".to_string(),
            flag: String::new(),
        }
    }

    /// Rewrite cost, price, and quantity to the per-attempt wire values.
    ///
    /// `pCost` and `price` both carry the transaction's minor-unit amount
    /// rather than the catalog price — a deliberate per-attempt override the
    /// provider expects, not a bug.
    #[must_use]
    pub fn with_attempt_amount(mut self, amount_minor: &str) -> Self {
        self.p_cost = amount_minor.to_string();
        self.price = amount_minor.to_string();
        self.quantity = "1000".to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_types_serialize_as_digit_strings() {
        assert_eq!(
            serde_json::to_string(&ActionType::BalanceQuery).unwrap(),
            "\"3\""
        );
        assert_eq!(serde_json::to_string(&ActionType::Sale).unwrap(), "\"4\"");
        assert_eq!(
            serde_json::to_string(&ActionType::Cashback).unwrap(),
            "\"8\""
        );
    }

    #[test]
    fn monetary_actions() {
        assert!(ActionType::Sale.is_monetary());
        assert!(ActionType::Cashback.is_monetary());
        assert!(!ActionType::BalanceQuery.is_monetary());
    }

    #[test]
    fn attempt_amount_overrides_catalog_price() {
        let product = Product {
            price: "9990".into(),
            p_cost: "5000".into(),
            quantity: "1".into(),
            ..Product::default_item("100")
        };
        let wired = product.with_attempt_amount("1550");
        assert_eq!(wired.price, "1550");
        assert_eq!(wired.p_cost, "1550");
        assert_eq!(wired.quantity, "1000");
    }

    #[test]
    fn product_wire_field_names() {
        let json = serde_json::to_value(Product::default_item("100")).unwrap();
        assert!(json.get("pCost").is_some());
        assert!(json.get("productId").is_some());
        assert!(json.get("markupDiscount").is_some());
    }
}
