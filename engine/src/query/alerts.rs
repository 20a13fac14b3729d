//! [`Query`] deriving expiration reminders from a [`Warranty`].

use std::convert::Infallible;

use common::DateTime;
use serde::Serialize;
use smart_default::SmartDefault;

use crate::{
    domain::{customer, warranty, Warranty},
    Engine,
};

use super::Query;

/// [`Query`] deriving [`Candidate`] reminders from a [`Warranty`].
///
/// Meant to run once, right after the [`Warranty`] is issued: lead times
/// whose trigger moment has already passed produce no [`Candidate`]s.
#[derive(Clone, Copy, Debug)]
pub struct Alerts<'w> {
    /// [`Warranty`] to derive [`Candidate`]s from.
    pub warranty: &'w Warranty,

    /// Current [`DateTime`].
    pub now: DateTime,
}

/// Expiration reminder derived from a [`Warranty`], ready to be handed over
/// to a notification queue.
#[derive(Clone, Debug, Serialize)]
pub struct Candidate {
    /// ID of the [`Warranty`] to remind about.
    pub warranty_id: warranty::Id,

    /// Number of days before the expiration this [`Candidate`] fires at.
    pub lead_time_days: u32,

    /// [`DateTime`] this [`Candidate`] fires at.
    #[serde(with = "common::datetime::serde::unix_timestamp")]
    pub trigger_at: DateTime,

    /// Name of the customer to remind.
    pub customer_name: customer::Name,

    /// Label of the covered product.
    pub product_label: String,

    /// Phone of the customer, if known.
    pub phone: Option<customer::Phone>,
}

impl Query<Alerts<'_>> for Engine {
    type Ok = Vec<Candidate>;
    type Err = Infallible;

    fn execute(&self, query: Alerts<'_>) -> Result<Self::Ok, Self::Err> {
        let Alerts { warranty, now } = query;

        Ok(self
            .config()
            .alerts
            .lead_times_days
            .iter()
            .filter_map(|&lead| {
                let trigger_at: DateTime =
                    warranty.expires_at.checked_sub_days(lead)?.coerce();
                (trigger_at > now).then(|| Candidate {
                    warranty_id: warranty.id,
                    lead_time_days: lead,
                    trigger_at,
                    customer_name: warranty.customer.name.clone(),
                    product_label: warranty.product_label(),
                    phone: warranty.customer.phone.clone(),
                })
            })
            .collect())
    }
}

/// Configuration of the [`Alerts`] [`Query`].
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Lead times to derive [`Candidate`]s with, in days before the
    /// expiration.
    #[default(vec![30, 7])]
    pub lead_times_days: Vec<u32>,
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            customer, employee, shop,
            warranty::{
                Brand, Category, Id, Model, Months, Price, State, TermKind,
                Terms,
            },
            Customer, Warranty,
        },
        Config, Engine,
    };

    use super::{Alerts, Query as _};

    fn at(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    fn warranty(expires_at: &str) -> Warranty {
        Warranty {
            id: Id::new(),
            shop_id: shop::Id::new(),
            category: Category::Battery,
            brand: Brand::new("Willard").unwrap(),
            model: Model::new("UB 620").unwrap(),
            serial_number: None,
            description: None,
            sold_at: at("2024-06-01T00:00:00Z").coerce(),
            price: Price::new(Decimal::new(100, 0)).unwrap(),
            invoice_number: None,
            seller_id: employee::Id::new(),
            seller_name: employee::Name::new("Luis").unwrap(),
            customer: Customer {
                name: customer::Name::new("Ana Diaz").unwrap(),
                phone: customer::Phone::new("112-345-6789"),
                email: None,
            },
            vehicle: None,
            terms: Terms::new(TermKind::DurationMonths, Months::new(12), None)
                .unwrap(),
            expires_at: at(expires_at).coerce(),
            state: State::Active,
            claims: vec![],
            created_at: at("2024-06-01T00:00:00Z").coerce(),
            created_by: employee::Id::new(),
            updated_at: at("2024-06-01T00:00:00Z").coerce(),
        }
    }

    #[test]
    fn derives_candidate_per_future_lead_time() {
        let engine = Engine::new(Config::default());
        let w = warranty("2025-06-01T00:00:00Z");

        let candidates = engine
            .execute(Alerts {
                warranty: &w,
                now: at("2025-03-10T00:00:00Z"),
            })
            .unwrap();

        assert_eq!(candidates.len(), 2);

        assert_eq!(candidates[0].lead_time_days, 30);
        assert_eq!(candidates[0].trigger_at, at("2025-05-02T00:00:00Z"));
        assert_eq!(candidates[1].lead_time_days, 7);
        assert_eq!(candidates[1].trigger_at, at("2025-05-25T00:00:00Z"));

        assert_eq!(candidates[0].warranty_id, w.id);
        assert_eq!(candidates[0].product_label, "Willard UB 620");
        assert_eq!(candidates[0].customer_name, w.customer.name);
        assert_eq!(candidates[0].phone, w.customer.phone);
    }

    #[test]
    fn drops_lead_times_already_passed() {
        let engine = Engine::new(Config::default());

        // 10 days to the expiration: the 30-day reminder moment is gone.
        let w = warranty("2025-03-20T00:00:00Z");
        let candidates = engine
            .execute(Alerts {
                warranty: &w,
                now: at("2025-03-10T00:00:00Z"),
            })
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].lead_time_days, 7);
    }

    #[test]
    fn trigger_moments_must_lie_strictly_ahead() {
        let engine = Engine::new(Config::default());

        // Exactly 7 days left: the 7-day trigger is `now` itself.
        let w = warranty("2025-03-17T00:00:00Z");
        let candidates = engine
            .execute(Alerts {
                warranty: &w,
                now: at("2025-03-10T00:00:00Z"),
            })
            .unwrap();

        assert!(candidates.is_empty());
    }

    #[test]
    fn honors_configured_lead_times() {
        let engine = Engine::new(Config {
            alerts: super::Config {
                lead_times_days: vec![90, 1],
            },
            ..Config::default()
        });

        let w = warranty("2025-06-01T00:00:00Z");
        let candidates = engine
            .execute(Alerts {
                warranty: &w,
                now: at("2025-03-10T00:00:00Z"),
            })
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].lead_time_days, 1);
    }
}
