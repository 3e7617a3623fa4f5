//! Revenue reporting over an invoice collection.
//!
//! All functions are read-only and framework-agnostic; the bot layer formats the
//! returned structures. "Pending amount" counts `Pending` invoices only: drafts
//! have not been sent and overdue invoices are reported through their own count.

use crate::core::model::{Invoice, InvoiceStatus};

/// Number of invoices in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Invoices still being prepared
    pub draft: usize,
    /// Invoices sent and awaiting payment
    pub pending: usize,
    /// Settled invoices
    pub paid: usize,
    /// Invoices past due
    pub overdue: usize,
}

impl StatusCounts {
    /// Count for a single status.
    #[must_use]
    pub const fn get(&self, status: InvoiceStatus) -> usize {
        match status {
            InvoiceStatus::Draft => self.draft,
            InvoiceStatus::Pending => self.pending,
            InvoiceStatus::Paid => self.paid,
            InvoiceStatus::Overdue => self.overdue,
        }
    }

    fn increment(&mut self, status: InvoiceStatus) {
        match status {
            InvoiceStatus::Draft => self.draft += 1,
            InvoiceStatus::Pending => self.pending += 1,
            InvoiceStatus::Paid => self.paid += 1,
            InvoiceStatus::Overdue => self.overdue += 1,
        }
    }
}

/// Sum of invoice totals issued in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    /// Short month name, e.g. `"Jan"`
    pub month: String,
    /// Σ total of invoices dated in that month
    pub amount: f64,
}

/// Aggregate figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    /// Σ total over paid invoices
    pub total_revenue: f64,
    /// Σ total over pending invoices
    pub pending_amount: f64,
    /// Number of invoices considered
    pub total_invoices: usize,
    /// Invoices per status
    pub status_counts: StatusCounts,
    /// Totals per issue month, in order of first appearance
    pub monthly_totals: Vec<MonthlyTotal>,
}

impl DashboardStats {
    /// Number of paid invoices.
    #[must_use]
    pub const fn paid_invoices(&self) -> usize {
        self.status_counts.paid
    }
}

/// Sum of `total` over invoices with the given status.
#[must_use]
pub fn sum_by_status(invoices: &[Invoice], status: InvoiceStatus) -> f64 {
    invoices
        .iter()
        .filter(|invoice| invoice.status == status)
        .map(|invoice| invoice.total)
        .sum()
}

/// Groups invoice totals by the short month name of their issue date.
///
/// Buckets appear in the order their month is first met in `invoices`, not in
/// calendar order. The year is ignored, so March 2023 and March 2024 share a
/// bucket.
#[must_use]
pub fn monthly_totals(invoices: &[Invoice]) -> Vec<MonthlyTotal> {
    let mut buckets: Vec<MonthlyTotal> = Vec::new();

    for invoice in invoices {
        let month = invoice.date.format("%b").to_string();
        match buckets.iter_mut().find(|bucket| bucket.month == month) {
            Some(bucket) => bucket.amount += invoice.total,
            None => buckets.push(MonthlyTotal {
                month,
                amount: invoice.total,
            }),
        }
    }

    buckets
}

/// Counts invoices per status.
#[must_use]
pub fn count_by_status(invoices: &[Invoice]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for invoice in invoices {
        counts.increment(invoice.status);
    }
    counts
}

/// Computes every dashboard figure in one call.
#[must_use]
pub fn dashboard_stats(invoices: &[Invoice]) -> DashboardStats {
    DashboardStats {
        total_revenue: sum_by_status(invoices, InvoiceStatus::Paid),
        pending_amount: sum_by_status(invoices, InvoiceStatus::Pending),
        total_invoices: invoices.len(),
        status_counts: count_by_status(invoices),
        monthly_totals: monthly_totals(invoices),
    }
}

/// Generates a bar showing `amount` relative to `max`.
///
/// Creates a text bar like: `[████████░░]`
#[must_use]
pub fn format_share_bar(amount: f64, max: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let share = if max > 0.0 {
        (amount / max).clamp(0.0, 1.0)
    } else {
        0.0
    };

    // Cast safety: share ∈ [0, 1] and length is small, so the result is in [0, length].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = (share * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::create_custom_invoice;
    use chrono::NaiveDate;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    #[test]
    fn test_dashboard_stats_example() {
        let invoices = vec![
            create_custom_invoice(InvoiceStatus::Paid, 100.0, date(1, 10)),
            create_custom_invoice(InvoiceStatus::Pending, 50.0, date(1, 12)),
            create_custom_invoice(InvoiceStatus::Paid, 25.0, date(2, 3)),
        ];

        let stats = dashboard_stats(&invoices);

        assert_eq!(stats.total_revenue, 125.0);
        assert_eq!(stats.pending_amount, 50.0);
        assert_eq!(stats.total_invoices, 3);
        assert_eq!(stats.paid_invoices(), 2);
    }

    #[test]
    fn test_pending_excludes_draft_and_overdue() {
        let invoices = vec![
            create_custom_invoice(InvoiceStatus::Pending, 50.0, date(1, 1)),
            create_custom_invoice(InvoiceStatus::Draft, 70.0, date(1, 1)),
            create_custom_invoice(InvoiceStatus::Overdue, 30.0, date(1, 1)),
        ];

        let stats = dashboard_stats(&invoices);
        assert_eq!(stats.pending_amount, 50.0);
        assert_eq!(stats.total_revenue, 0.0);
    }

    #[test]
    fn test_status_counts() {
        let invoices = vec![
            create_custom_invoice(InvoiceStatus::Draft, 1.0, date(1, 1)),
            create_custom_invoice(InvoiceStatus::Draft, 1.0, date(1, 1)),
            create_custom_invoice(InvoiceStatus::Overdue, 1.0, date(1, 1)),
            create_custom_invoice(InvoiceStatus::Paid, 1.0, date(1, 1)),
        ];

        let counts = count_by_status(&invoices);
        assert_eq!(
            counts,
            StatusCounts {
                draft: 2,
                pending: 0,
                paid: 1,
                overdue: 1,
            }
        );
        assert_eq!(counts.get(InvoiceStatus::Draft), 2);
    }

    #[test]
    fn test_monthly_totals_follow_first_encounter_order() {
        let invoices = vec![
            create_custom_invoice(InvoiceStatus::Paid, 10.0, date(3, 1)),
            create_custom_invoice(InvoiceStatus::Pending, 20.0, date(1, 5)),
            create_custom_invoice(InvoiceStatus::Draft, 5.0, date(3, 28)),
            create_custom_invoice(InvoiceStatus::Paid, 1.0, date(2, 14)),
        ];

        let months = monthly_totals(&invoices);

        assert_eq!(
            months,
            vec![
                MonthlyTotal {
                    month: "Mar".to_string(),
                    amount: 15.0,
                },
                MonthlyTotal {
                    month: "Jan".to_string(),
                    amount: 20.0,
                },
                MonthlyTotal {
                    month: "Feb".to_string(),
                    amount: 1.0,
                },
            ]
        );
    }

    #[test]
    fn test_monthly_totals_use_issue_date_and_ignore_year() {
        let mut late = create_custom_invoice(InvoiceStatus::Paid, 40.0, date(5, 30));
        late.due_date = date(6, 13);
        let next_year = create_custom_invoice(
            InvoiceStatus::Paid,
            2.0,
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        );

        let months = monthly_totals(&[late, next_year]);

        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, "May");
        assert_eq!(months[0].amount, 42.0);
    }

    #[test]
    fn test_empty_collection() {
        let stats = dashboard_stats(&[]);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_format_share_bar() {
        assert_eq!(format_share_bar(10.0, 10.0, Some(10)), "[██████████]");
        assert_eq!(format_share_bar(5.0, 10.0, Some(10)), "[█████░░░░░]");
        assert_eq!(format_share_bar(0.0, 10.0, Some(4)), "[░░░░]");
        assert_eq!(format_share_bar(3.0, 0.0, Some(4)), "[░░░░]");
    }
}
