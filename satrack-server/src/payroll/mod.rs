//! Personnel cost aggregation
//!
//! Read-side summary of the payroll figures embedded in user records.
//! Nothing here is persisted; the dashboard fetches it fresh each time.

use crate::db::models::{SalaryType, User};
use crate::ledger::{to_decimal, to_f64};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Approximate weeks-per-month factor used for salary normalization
const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Aggregated payroll figures for the whole staff
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelStats {
    pub total_users: usize,
    pub total_monthly_cost: f64,
    pub total_weekly_cost: f64,
}

/// Sum staff cost over all users, normalized to monthly and weekly totals.
///
/// `extras` = insurance + benefits + transport + overtime. Monthly-paid
/// staff convert to a weekly figure by dividing everything by four.
/// Weekly-paid staff convert to a monthly figure by multiplying only the
/// salary by four: their extras are recorded as monthly amounts already,
/// so they are added unscaled to the monthly total and divided by four
/// for the weekly one.
pub fn aggregate(users: &[User]) -> PersonnelStats {
    let mut monthly = Decimal::ZERO;
    let mut weekly = Decimal::ZERO;

    for user in users {
        let f = &user.financials;
        let salary = to_decimal(f.salary);
        let extras = to_decimal(f.insurance)
            + to_decimal(f.benefits)
            + to_decimal(f.transport)
            + to_decimal(f.overtime);

        match f.salary_type {
            SalaryType::Monthly => {
                monthly += salary + extras;
                weekly += (salary + extras) / WEEKS_PER_MONTH;
            }
            SalaryType::Weekly => {
                monthly += salary * WEEKS_PER_MONTH + extras;
                weekly += salary + extras / WEEKS_PER_MONTH;
            }
        }
    }

    PersonnelStats {
        total_users: users.len(),
        total_monthly_cost: to_f64(monthly),
        total_weekly_cost: to_f64(weekly),
    }
}
