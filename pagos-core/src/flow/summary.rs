//! Pure derived computations over a student's payment list.

use rust_decimal::Decimal;

use crate::entities::payment::{PaymentItem, PaymentStatus};

/// Days left until `due`, negative when overdue. A due date of today is 0.
pub fn days_remaining(due: time::Date, today: time::Date) -> i64 {
    (due - today).whole_days()
}

/// Urgency band for a due date, as rendered in the payment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// Past due.
    Overdue,
    /// Due within the warning band (5 days or less).
    ClosingSoon { days_left: i64 },
    /// Not urgent yet.
    OnSchedule { days_left: i64 },
}

impl DueStatus {
    pub fn classify(due: time::Date, today: time::Date) -> Self {
        match days_remaining(due, today) {
            d if d < 0 => DueStatus::Overdue,
            d if d <= 5 => DueStatus::ClosingSoon { days_left: d },
            d => DueStatus::OnSchedule { days_left: d },
        }
    }
}

/// Count of items with status pending.
pub fn pending_count(items: &[PaymentItem]) -> usize {
    items
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .count()
}

/// Sum of amounts over pending items.
pub fn total_pending_amount(items: &[PaymentItem]) -> Decimal {
    items
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .map(|p| p.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::payment::{PaymentItem, PaymentKind};
    use rust_decimal_macros::dec;
    use time::macros::date;

    fn item(id: &str, amount: Decimal, status: PaymentStatus) -> PaymentItem {
        PaymentItem {
            id: id.to_owned(),
            kind: PaymentKind::Pension,
            month: None,
            amount,
            due_date: date!(2024 - 12 - 15),
            status,
        }
    }

    #[test]
    fn test_days_remaining_is_zero_today() {
        let today = date!(2024 - 12 - 15);
        assert_eq!(days_remaining(date!(2024 - 12 - 15), today), 0);
    }

    #[test]
    fn test_days_remaining_decreases_as_today_advances() {
        let due = date!(2024 - 12 - 15);
        let mut previous = i64::MAX;
        let mut today = date!(2024 - 12 - 01);
        for _ in 0..30 {
            let days = days_remaining(due, today);
            assert!(days < previous);
            previous = days;
            today = today.next_day().unwrap();
        }
        // Past the due date the count keeps going negative.
        assert!(days_remaining(due, date!(2024 - 12 - 20)) < 0);
    }

    #[test]
    fn test_due_status_bands() {
        let due = date!(2024 - 12 - 15);
        assert_eq!(
            DueStatus::classify(due, date!(2024 - 12 - 16)),
            DueStatus::Overdue
        );
        assert_eq!(
            DueStatus::classify(due, date!(2024 - 12 - 15)),
            DueStatus::ClosingSoon { days_left: 0 }
        );
        assert_eq!(
            DueStatus::classify(due, date!(2024 - 12 - 10)),
            DueStatus::ClosingSoon { days_left: 5 }
        );
        assert_eq!(
            DueStatus::classify(due, date!(2024 - 12 - 09)),
            DueStatus::OnSchedule { days_left: 6 }
        );
    }

    #[test]
    fn test_pending_summary() {
        let items = vec![
            item("a", dec!(350), PaymentStatus::Pending),
            item("b", dec!(150), PaymentStatus::Paid),
            item("c", dec!(150), PaymentStatus::Pending),
        ];
        assert_eq!(pending_count(&items), 2);
        assert_eq!(total_pending_amount(&items), dec!(500));
    }

    #[test]
    fn test_pending_summary_empty() {
        assert_eq!(pending_count(&[]), 0);
        assert_eq!(total_pending_amount(&[]), Decimal::ZERO);
    }
}
