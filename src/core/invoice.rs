//! Invoice domain types and the invoice form schema

use crate::core::error::ValidationError;
use crate::core::form::FormData;
use crate::core::validation::{FieldErrors, FormSchema, filters, validators};
use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use uuid::Uuid;

/// Form field carrying the customer reference
pub const CUSTOMER_ID_FIELD: &str = "customerId";
/// Form field carrying the amount in major units (dollars)
pub const AMOUNT_FIELD: &str = "amount";
/// Form field carrying the invoice status
pub const STATUS_FIELD: &str = "status";

pub const CUSTOMER_ID_MESSAGE: &str = "Please select a customer";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const AMOUNT_INVALID_MESSAGE: &str = "Please enter a valid amount.";
pub const AMOUNT_TOO_LARGE_MESSAGE: &str = "Amount is too large.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status.";

/// Minor units per major unit
const CENTS_PER_UNIT: i64 = 100;

/// Invoice payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub const ALL: &'static [&'static str] = &["pending", "paid"];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(format!("unknown invoice status '{}'", other)),
        }
    }
}

static INVOICE_SCHEMA: LazyLock<FormSchema> = LazyLock::new(|| {
    let mut schema = FormSchema::new();

    schema.add_filter(CUSTOMER_ID_FIELD, filters::trim());
    schema.add_validator(CUSTOMER_ID_FIELD, validators::required(CUSTOMER_ID_MESSAGE));

    schema.add_filter(AMOUNT_FIELD, filters::trim());
    schema.add_validator(
        AMOUNT_FIELD,
        validators::positive_number(AMOUNT_MESSAGE, AMOUNT_INVALID_MESSAGE),
    );
    schema.add_validator(
        AMOUNT_FIELD,
        validators::at_least_one_minor_unit(CENTS_PER_UNIT, AMOUNT_MESSAGE),
    );
    schema.add_validator(
        AMOUNT_FIELD,
        validators::fits_minor_units(CENTS_PER_UNIT, AMOUNT_TOO_LARGE_MESSAGE),
    );

    schema.add_validator(
        STATUS_FIELD,
        validators::in_list(InvoiceStatus::ALL, STATUS_MESSAGE),
    );

    schema
});

/// The form schema shared by create and update
pub fn invoice_schema() -> &'static FormSchema {
    &INVOICE_SCHEMA
}

/// A submitted invoice form that passed the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceInput {
    pub customer_id: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    amount_cents: i64,
}

impl InvoiceInput {
    /// Validate without failing: the error side carries every field message
    pub fn safe_parse(form: &FormData) -> Result<Self, FieldErrors> {
        let cleaned = invoice_schema().validate_and_filter(form)?;
        Self::from_cleaned(&cleaned)
    }

    /// Validate, treating a bad payload as an error to propagate
    pub fn parse(form: &FormData) -> Result<Self, ValidationError> {
        Self::safe_parse(form).map_err(ValidationError::from)
    }

    fn from_cleaned(cleaned: &IndexMap<&'static str, String>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = cleaned.get(CUSTOMER_ID_FIELD).cloned();
        if customer_id.is_none() {
            errors.add(CUSTOMER_ID_FIELD, CUSTOMER_ID_MESSAGE);
        }

        let amount = cleaned
            .get(AMOUNT_FIELD)
            .and_then(|raw| validators::coerce_decimal(raw));
        let amount_cents = amount.and_then(to_minor_units);
        if amount_cents.is_none() {
            errors.add(AMOUNT_FIELD, AMOUNT_TOO_LARGE_MESSAGE);
        }

        let status = cleaned
            .get(STATUS_FIELD)
            .and_then(|raw| raw.parse::<InvoiceStatus>().ok());
        if status.is_none() {
            errors.add(STATUS_FIELD, STATUS_MESSAGE);
        }

        match (customer_id, amount, amount_cents, status) {
            (Some(customer_id), Some(amount), Some(amount_cents), Some(status)) => Ok(Self {
                customer_id,
                amount,
                status,
                amount_cents,
            }),
            _ => Err(errors),
        }
    }

    /// Amount in cents, `round(amount × 100)` in exact decimal arithmetic
    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Insert parameters, dated by the caller
    pub fn into_new_invoice(self, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount_cents: self.amount_cents,
            status: self.status,
            date,
        }
    }

    /// Update parameters; id and date are never part of an update
    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: self.customer_id,
            amount_cents: self.amount_cents,
            status: self.status,
        }
    }
}

/// Convert a major-unit amount to cents, rounding half away from zero
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::from(CENTS_PER_UNIT))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// An invoice as persisted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: Uuid,
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl InvoiceRecord {
    /// Case-insensitive substring match on customer id or status
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.customer_id.to_lowercase().contains(&needle) || self.status.as_str().contains(&needle)
    }

    /// Overwrite the mutable columns
    pub fn apply(&mut self, changes: InvoiceChanges) {
        self.customer_id = changes.customer_id;
        self.amount_cents = changes.amount_cents;
        self.status = changes.status;
    }
}

/// Parameters of the insert statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl NewInvoice {
    pub fn into_record(self, id: Uuid) -> InvoiceRecord {
        InvoiceRecord {
            id,
            customer_id: self.customer_id,
            amount_cents: self.amount_cents,
            status: self.status,
            date: self.date,
        }
    }
}

/// Parameters of the update statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(customer: &str, amount: &str, status: &str) -> FormData {
        FormData::from_pairs([
            (CUSTOMER_ID_FIELD, customer),
            (AMOUNT_FIELD, amount),
            (STATUS_FIELD, status),
        ])
    }

    #[test]
    fn test_valid_form_parses() {
        let input = InvoiceInput::safe_parse(&form("cust-1", "19.99", "pending")).unwrap();
        assert_eq!(input.customer_id, "cust-1");
        assert_eq!(input.status, InvoiceStatus::Pending);
        assert_eq!(input.amount_cents(), 1999);
    }

    #[test]
    fn test_cents_have_no_float_residue() {
        for (amount, cents) in [("19.99", 1999), ("0.07", 7), ("1.10", 110), ("4.35", 435)] {
            let input = InvoiceInput::safe_parse(&form("c", amount, "paid")).unwrap();
            assert_eq!(input.amount_cents(), cents, "amount {}", amount);
        }
    }

    #[test]
    fn test_sub_cent_amounts_round_half_up() {
        assert_eq!(to_minor_units(Decimal::new(5, 3)), Some(1));
        assert_eq!(to_minor_units(Decimal::new(12344, 4)), Some(123));
        assert_eq!(to_minor_units(Decimal::new(1235, 3)), Some(124));
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        for amount in ["0", "-1", "-0.01", ""] {
            let errors = InvoiceInput::safe_parse(&form("c", amount, "paid")).unwrap_err();
            assert_eq!(errors.get(AMOUNT_FIELD), [AMOUNT_MESSAGE.to_string()]);
        }
    }

    #[test]
    fn test_amount_rounding_to_zero_cents_is_rejected() {
        for amount in ["0.001", "0.004"] {
            let errors = InvoiceInput::safe_parse(&form("c", amount, "paid")).unwrap_err();
            assert_eq!(errors.get(AMOUNT_FIELD), [AMOUNT_MESSAGE.to_string()]);
        }
        let input = InvoiceInput::safe_parse(&form("c", "0.005", "paid")).unwrap();
        assert_eq!(input.amount_cents(), 1);
    }

    #[test]
    fn test_digit_separators_are_not_an_amount() {
        for amount in ["1_000", "1_00"] {
            let errors = InvoiceInput::safe_parse(&form("c", amount, "paid")).unwrap_err();
            assert_eq!(errors.get(AMOUNT_FIELD), [AMOUNT_INVALID_MESSAGE.to_string()]);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let errors = InvoiceInput::safe_parse(&form("c", "10", "overdue")).unwrap_err();
        assert_eq!(errors.get(STATUS_FIELD), [STATUS_MESSAGE.to_string()]);
        assert!(!errors.contains(AMOUNT_FIELD));
    }

    #[test]
    fn test_empty_form_reports_all_fields() {
        let errors = InvoiceInput::safe_parse(&FormData::new()).unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec![CUSTOMER_ID_FIELD, AMOUNT_FIELD, STATUS_FIELD]);
    }

    #[test]
    fn test_parse_wraps_field_errors() {
        let err = InvoiceInput::parse(&form("", "5", "paid")).unwrap_err();
        assert!(err.field_errors().contains(CUSTOMER_ID_FIELD));
    }

    #[test]
    fn test_into_changes_drops_date() {
        let input = InvoiceInput::safe_parse(&form("c", "3", "paid")).unwrap();
        let changes = input.into_changes();
        assert_eq!(changes.amount_cents, 300);
        assert_eq!(changes.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_record_serializes_camel_case_with_iso_date() {
        let record = NewInvoice {
            customer_id: "c".to_string(),
            amount_cents: 1999,
            status: InvoiceStatus::Paid,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        }
        .into_record(Uuid::nil());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["customerId"], "c");
        assert_eq!(json["amountCents"], 1999);
        assert_eq!(json["status"], "paid");
        assert_eq!(json["date"], "2024-03-09");
    }

    #[test]
    fn test_record_matches_query() {
        let record = NewInvoice {
            customer_id: "Delba-Oliveira".to_string(),
            amount_cents: 1,
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
        .into_record(Uuid::new_v4());

        assert!(record.matches("delba"));
        assert!(record.matches("PEND"));
        assert!(!record.matches("paid"));
    }
}
