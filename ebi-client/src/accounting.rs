//! Accounting calculator
//!
//! Pure derivations over a fetched order total: discount, change and the
//! even-split ("warikan") breakdown. All amounts are integer currency
//! units and percentage discounts truncate toward zero, matching the till
//! display digit for digit.

use shared::ItemStatus;

/// Discount applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Discount {
    /// No discount
    #[default]
    None,
    /// Flat amount off
    Flat(i64),
    /// Percentage off, truncated
    Percent(i64),
}

impl Discount {
    /// Amount deducted from `original_total`.
    pub fn amount(&self, original_total: i64) -> i64 {
        match self {
            Discount::None => 0,
            Discount::Flat(v) => *v,
            Discount::Percent(v) => original_total * v / 100,
        }
    }
}

/// Total due after discount. Never negative.
pub fn final_total(original_total: i64, discount: Discount) -> i64 {
    if original_total == 0 {
        return 0;
    }
    (original_total - discount.amount(original_total)).max(0)
}

/// Change for a given deposit. Zero when the deposit does not cover the
/// total; deposit sufficiency is a precondition the caller checks before
/// allowing payment.
pub fn change(deposit: i64, final_total: i64) -> i64 {
    if deposit >= final_total {
        deposit - final_total
    } else {
        0
    }
}

/// Whether a line may be settled individually (split billing).
pub fn is_split_eligible(status: ItemStatus) -> bool {
    status.is_settleable()
}

/// Even split among `people`: (amount per person, remainder). A head
/// count below one is clamped to one.
pub fn warikan(total: i64, people: i64) -> (i64, i64) {
    let n = people.max(1);
    (total / n, total % n)
}

/// Parse a head-count text field: digits only, at most two characters.
/// Empty or unparsable input falls back to one.
pub fn parse_head_count(input: &str) -> Option<i64> {
    if input.len() >= 3 || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(input.parse::<i64>().unwrap_or(1))
}
