//! Net salary rounding.

use rust_decimal::Decimal;

/// Rounds an amount to the nearest whole currency unit.
///
/// Halves move toward positive infinity, so `2.5` becomes `3` and `-2.5`
/// becomes `-2`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(47004, 1)), Decimal::from(4700));
/// assert_eq!(round_currency(Decimal::new(-25, 1)), Decimal::from(-2));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    (amount + Decimal::new(5, 1)).floor()
}

/// Calculates net salary: gross pay less deductions, rounded.
///
/// No floor is applied; deductions larger than gross produce a negative
/// result.
pub fn calculate_net_salary(
    basic_salary: Decimal,
    allowances: Decimal,
    deductions: Decimal,
) -> Decimal {
    round_currency(basic_salary + allowances - deductions)
}
