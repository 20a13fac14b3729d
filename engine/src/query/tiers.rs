//! [`Query`] classifying [`Warranty`]s by expiration urgency.

use std::convert::Infallible;

use common::DateTime;
use tracing as log;

use crate::{
    domain::{
        warranty::{self, Tier},
        Warranty,
    },
    Engine,
};

use super::Query;

/// [`Query`] classifying [`Warranty`]s into expiration urgency [`Tier`]s.
#[derive(Clone, Copy, Debug)]
pub struct Tiers<'w> {
    /// [`Warranty`]s to classify.
    pub warranties: &'w [Warranty],

    /// Current [`DateTime`].
    pub now: DateTime,
}

/// Output of the [`Tiers`] [`Query`].
///
/// Every bucket is sorted by days to expiration, most urgent first.
#[derive(Clone, Debug, Default)]
pub struct Output<'w> {
    /// [`Warranty`]s past their expiration date.
    pub overdue: Vec<&'w Warranty>,

    /// [`Warranty`]s expiring within [`warranty::URGENT_DAYS`].
    pub urgent: Vec<&'w Warranty>,

    /// [`Warranty`]s expiring within [`warranty::SOON_DAYS`], but not within
    /// [`warranty::URGENT_DAYS`].
    pub soon: Vec<&'w Warranty>,

    /// [`Warranty`]s expiring later than [`warranty::SOON_DAYS`].
    pub distant: Vec<&'w Warranty>,

    /// Number of malformed records skipped.
    pub skipped: usize,
}

impl<'w> Query<Tiers<'w>> for Engine {
    type Ok = Output<'w>;
    type Err = Infallible;

    fn execute(&self, query: Tiers<'w>) -> Result<Self::Ok, Self::Err> {
        let mut out = Output::default();

        for w in query.warranties {
            if let Err(e) = w.validate() {
                log::warn!("skipping malformed `Warranty(id: {})`: {e}", w.id);
                out.skipped += 1;
                continue;
            }

            match w.tier(query.now) {
                Some(Tier::Overdue) => out.overdue.push(w),
                Some(Tier::Urgent) => out.urgent.push(w),
                Some(Tier::Soon) => out.soon.push(w),
                Some(Tier::Distant) => out.distant.push(w),
                // Cancelled `Warranty`s have no expiration left to track.
                None => {}
            }
        }

        for bucket in [
            &mut out.overdue,
            &mut out.urgent,
            &mut out.soon,
            &mut out.distant,
        ] {
            bucket.sort_by_key(|w| w.days_to_expire(query.now));
        }

        Ok(out)
    }
}
