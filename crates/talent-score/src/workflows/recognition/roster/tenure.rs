use chrono::NaiveDate;

const DAYS_PER_YEAR: f64 = 365.25;

/// Distance in years between `date` and `as_of`, rounded to one decimal. A missing date
/// counts as zero years.
pub(crate) fn years_since(date: Option<NaiveDate>, as_of: NaiveDate) -> f64 {
    date.map(|date| {
        let days = (as_of - date).num_days().abs() as f64;
        (days / DAYS_PER_YEAR * 10.0).round() / 10.0
    })
    .unwrap_or(0.0)
}

/// Years in the current role: the explicit figure when it is set, else the month count.
pub(crate) fn role_years(explicit_years: f64, months_in_role: f64) -> f64 {
    if explicit_years.is_finite() && explicit_years != 0.0 {
        explicit_years
    } else if months_in_role.is_finite() {
        months_in_role / 12.0
    } else {
        0.0
    }
}
