//! Demo catalog and opening hours for a fresh database.
//!
//! Two salons share one team: "Atelier Nord" is open Tuesday to Saturday of
//! the current week with a lunch break, "Atelier Sud" is closed that week.

use chrono::{Datelike, NaiveDate};

use salonbook_core::booking::Review;
use salonbook_core::catalog::{Prestation, Salon, Service, ServiceKind};
use salonbook_core::schedule::{week_dates, OpeningHours, TimeSlot};

use crate::state::AppState;

/// Everything the demo inserts.
pub struct DemoData {
    pub salons: Vec<Salon>,
    pub services: Vec<Service>,
    pub prestations: Vec<Prestation>,
    pub opening_hours: Vec<OpeningHours>,
    pub reviews: Vec<Review>,
}

fn day_slots() -> Vec<TimeSlot> {
    [((9, 0), (12, 0)), ((13, 0), (18, 0))]
        .into_iter()
        .filter_map(|(start, end)| TimeSlot::from_hm(start, end))
        .collect()
}

/// Builds the demo data for the ISO week containing `today`.
pub fn demo_data(today: NaiveDate) -> DemoData {
    let nord = Salon::new("Atelier Nord", "atelier-nord", "12 rue des Lilas, Lille")
        .with_phone("03 20 00 00 01");
    let sud = Salon::new("Atelier Sud", "atelier-sud", "5 place du Marché, Arras")
        .with_phone("03 21 00 00 02");

    let nails = Service::new("Nail care", ServiceKind::NailCare)
        .with_description("Manicures, gel polish and nail art")
        .with_position(1);
    let tattoo = Service::new("Tattoo", ServiceKind::Tattoo)
        .with_description("Custom pieces drawn with you")
        .with_position(2);
    let flash = Service::new("Flash tattoo", ServiceKind::FlashTattoo)
        .with_description("Ready-made designs from the flash sheet")
        .with_position(3);

    let prestations = vec![
        Prestation::new(nails.id, "Classic manicure", 2500, 45),
        Prestation::new(nails.id, "Gel polish", 3500, 60),
        Prestation::new(nails.id, "Nail art (per hand)", 1500, 30),
        Prestation::new(tattoo.id, "Consultation", 0, 30)
            .with_description("Talk through your project and placement"),
        Prestation::new(tattoo.id, "Small piece (up to 5 cm)", 8000, 60),
        Prestation::new(flash.id, "Swallow", 6000, 60),
        Prestation::new(flash.id, "Dagger and rose", 9000, 90),
    ];

    let opening_hours = week_dates(today)
        .into_iter()
        .flat_map(|day| {
            // Tuesday (1) to Saturday (5), counting from Monday = 0.
            let nord_day = if (1..=5).contains(&day.weekday().num_days_from_monday()) {
                OpeningHours::open(nord.id, day, day_slots())
            } else {
                OpeningHours::closed(nord.id, day)
            };
            [nord_day, OpeningHours::closed(sud.id, day)]
        })
        .collect();

    let reviews = vec![
        Review::new("Inès", 5, "Very precise work and a lovely welcome.").published(),
        Review::new("Marc", 4, "My flash healed perfectly.").published(),
    ];

    DemoData {
        salons: vec![nord, sud],
        services: vec![nails, tattoo, flash],
        prestations,
        opening_hours,
        reviews,
    }
}

/// Inserts the demo data unless salons already exist.
///
/// Returns true when data was inserted.
pub async fn seed(state: &AppState) -> anyhow::Result<bool> {
    if !state.salon_repo.list_salons().await?.is_empty() {
        tracing::info!("Database already has salons, skipping demo data");
        return Ok(false);
    }

    let data = demo_data(chrono::Local::now().date_naive());

    for salon in &data.salons {
        state.salon_repo.create_salon(salon).await?;
    }
    for service in &data.services {
        state.service_repo.create_service(service).await?;
    }
    for prestation in &data.prestations {
        state.prestation_repo.create_prestation(prestation).await?;
    }
    for hours in &data.opening_hours {
        state.opening_hours_repo.upsert_opening_hours(hours).await?;
    }
    for review in &data.reviews {
        state.review_repo.create_review(review).await?;
    }

    tracing::info!(
        salons = data.salons.len(),
        services = data.services.len(),
        prestations = data.prestations.len(),
        "Inserted demo data"
    );

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use salonbook_core::schedule::validate_opening_hours;
    use salonbook_core::storage::DateRange;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn test_only_one_salon_is_open_in_the_week() {
        let data = demo_data(wednesday());
        let (nord, sud) = (data.salons[0].id, data.salons[1].id);

        assert_eq!(data.opening_hours.len(), 14);
        assert!(data.opening_hours.iter().all(|h| validate_opening_hours(h).is_ok()));

        let open_days: Vec<NaiveDate> = data
            .opening_hours
            .iter()
            .filter(|h| h.is_open())
            .map(|h| {
                assert_eq!(h.salon_id, nord);
                h.date
            })
            .collect();
        assert_eq!(open_days.len(), 5);
        assert_eq!(open_days[0], NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert!(data
            .opening_hours
            .iter()
            .filter(|h| h.salon_id == sud)
            .all(|h| h.is_closed));
    }

    #[test]
    fn test_prestations_belong_to_demo_services() {
        let data = demo_data(wednesday());
        assert!(data
            .prestations
            .iter()
            .all(|p| data.services.iter().any(|s| s.id == p.service_id)));
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let state = AppState::default();

        assert!(seed(&state).await.unwrap());
        assert!(!seed(&state).await.unwrap());

        assert_eq!(state.salon_repo.list_salons().await.unwrap().len(), 2);
        let today = chrono::Local::now().date_naive();
        let week = state
            .opening_hours_repo
            .list_opening_hours(None, DateRange::week(today))
            .await
            .unwrap();
        assert_eq!(week.len(), 14);
    }
}
