use chrono::NaiveDate;

use crate::core::{Counts, EquipmentTotals, Financials, Reservation, Summary};

pub fn counts(reservations: &[Reservation], today: NaiveDate) -> Counts {
    let total = reservations.len();
    let completed = reservations.iter().filter(|r| r.completed).count();

    Counts {
        total,
        completed,
        active: total - completed,
        today: reservations.iter().filter(|r| r.date == today).count(),
    }
}

pub fn equipment_totals(reservations: &[Reservation]) -> EquipmentTotals {
    reservations
        .iter()
        .fold(EquipmentTotals::default(), |mut totals, r| {
            totals.ombrellone += u64::from(r.ombrellone);
            totals.sdraio += u64::from(r.sdraio);
            totals.lettino += u64::from(r.lettino);
            totals.regista += u64::from(r.regista);
            totals
        })
}

/// Revenue figures. The average is 0 when there are no reservations.
pub fn financials(reservations: &[Reservation]) -> Financials {
    let total_revenue: f64 = reservations.iter().map(|r| r.price).sum();
    let average_per_rental = if reservations.is_empty() {
        0.0
    } else {
        total_revenue / reservations.len() as f64
    };

    Financials {
        total_revenue,
        average_per_rental,
        deposits_paid: reservations.iter().filter(|r| r.deposit_paid).count(),
    }
}

pub fn summary(reservations: &[Reservation], today: NaiveDate) -> Summary {
    Summary {
        counts: counts(reservations, today),
        equipment: equipment_totals(reservations),
        financials: financials(reservations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::tests::sample;
    use crate::core::EquipmentKind;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_reservation_example() {
        let mut rossi = sample(1, "Rossi", "2024-06-01");
        rossi.ombrellone = 2;
        rossi.price = 20.0;
        let items = vec![rossi];

        assert_eq!(
            counts(&items, day("2024-06-01")),
            Counts {
                total: 1,
                completed: 0,
                active: 1,
                today: 1
            }
        );
        assert_eq!(counts(&items, day("2024-06-02")).today, 0);

        let totals = equipment_totals(&items);
        assert_eq!(totals.get(EquipmentKind::Ombrellone), 2);
        assert_eq!(totals.sdraio, 0);
        assert_eq!(totals.lettino, 0);
        assert_eq!(totals.regista, 0);
    }

    #[test]
    fn test_counts_split_active_and_completed() {
        let mut done = sample(2, "Bianchi", "2024-06-02");
        done.completed = true;
        let items = vec![sample(1, "Rossi", "2024-06-01"), done, sample(3, "Verdi", "2024-06-03")];

        let c = counts(&items, day("2024-01-01"));
        assert_eq!(c.total, 3);
        assert_eq!(c.completed, 1);
        assert_eq!(c.active, 2);
        assert_eq!(c.today, 0);
    }

    #[test]
    fn test_equipment_totals_sum_every_kind() {
        let mut a = sample(1, "A", "2024-06-01");
        a.ombrellone = 1;
        a.sdraio = 2;
        let mut b = sample(2, "B", "2024-06-01");
        b.sdraio = 3;
        b.lettino = 4;
        b.regista = 5;

        let totals = equipment_totals(&[a, b]);
        assert_eq!(
            totals,
            EquipmentTotals {
                ombrellone: 1,
                sdraio: 5,
                lettino: 4,
                regista: 5
            }
        );
    }

    #[test]
    fn test_financials_empty_collection() {
        let f = financials(&[]);
        assert_eq!(f.total_revenue, 0.0);
        assert_eq!(f.average_per_rental, 0.0);
        assert_eq!(f.deposits_paid, 0);
    }

    #[test]
    fn test_financials_average_and_deposits() {
        let mut a = sample(1, "A", "2024-06-01");
        a.price = 30.0;
        a.deposit_paid = true;
        let mut b = sample(2, "B", "2024-06-01");
        b.price = 15.0;

        let f = financials(&[a, b]);
        assert_eq!(f.total_revenue, 45.0);
        assert_eq!(f.average_per_rental, 22.5);
        assert_eq!(f.deposits_paid, 1);
    }
}
