//! [`Query`] aggregating fleet-wide [`Warranty`] statistics.

use std::{cmp::Reverse, collections::HashMap, convert::Infallible};

use common::DateTime;
use itertools::Itertools as _;
use rust_decimal::Decimal;
use tracing as log;

use crate::{
    domain::{
        warranty::{Brand, Category, State, Status, SOON_DAYS, URGENT_DAYS},
        Warranty,
    },
    Engine,
};

use super::Query;

/// Number of top [`Brand`]s reported by the [`Stats`] [`Query`].
pub const TOP_BRANDS: usize = 10;

/// [`Query`] aggregating statistics over a fleet of [`Warranty`]s.
#[derive(Clone, Copy, Debug)]
pub struct Stats<'w> {
    /// [`Warranty`]s to aggregate.
    pub warranties: &'w [Warranty],

    /// Current [`DateTime`].
    pub now: DateTime,
}

/// Output of the [`Stats`] [`Query`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Output {
    /// Number of [`Warranty`]s aggregated.
    pub total: usize,

    /// Counts by stored [`State`].
    pub stored: StateBreakdown,

    /// Counts by effective [`Status`] at the queried moment.
    pub effective: StatusBreakdown,

    /// Stored-active [`Warranty`]s with `1..=`[`URGENT_DAYS`] days left.
    pub expiring_within_7_days: usize,

    /// Stored-active [`Warranty`]s with `1..=`[`SOON_DAYS`] days left.
    pub expiring_within_30_days: usize,

    /// Sum of sale prices over the aggregated [`Warranty`]s.
    pub total_revenue: Decimal,

    /// [`Category`] counts, most sold first.
    ///
    /// Ties keep the order of first appearance in the input.
    pub top_categories: Vec<(Category, usize)>,

    /// [`Brand`] counts, most sold first, truncated to [`TOP_BRANDS`].
    ///
    /// Ties keep the order of first appearance in the input.
    pub top_brands: Vec<(Brand, usize)>,

    /// Number of malformed records skipped.
    pub skipped: usize,
}

/// Counts of [`Warranty`]s by their stored [`State`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StateBreakdown {
    /// Stored [`State::Active`] count.
    pub active: usize,

    /// Stored [`State::Expired`] count.
    pub expired: usize,

    /// Stored [`State::Claimed`] count.
    pub claimed: usize,

    /// Stored [`State::Cancelled`] count.
    pub cancelled: usize,
}

/// Counts of [`Warranty`]s by their effective [`Status`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StatusBreakdown {
    /// Effective [`Status::Active`] count.
    pub active: usize,

    /// Effective [`Status::ExpiringSoon`] count.
    pub expiring_soon: usize,

    /// Effective [`Status::ExpiringUrgent`] count.
    pub expiring_urgent: usize,

    /// Effective [`Status::Claimed`] count.
    pub claimed: usize,

    /// Effective [`Status::Expired`] count.
    pub expired: usize,

    /// Effective [`Status::Cancelled`] count.
    pub cancelled: usize,
}

impl Query<Stats<'_>> for Engine {
    type Ok = Output;
    type Err = Infallible;

    fn execute(&self, query: Stats<'_>) -> Result<Self::Ok, Self::Err> {
        let mut out = Output::default();
        let mut categories = Vec::<(Category, usize)>::new();
        let mut brands = HashMap::<&Brand, (usize, usize)>::new();

        for w in query.warranties {
            if let Err(e) = w.validate() {
                log::warn!("skipping malformed `Warranty(id: {})`: {e}", w.id);
                out.skipped += 1;
                continue;
            }

            out.total += 1;
            out.total_revenue += w.price.get();

            match w.state {
                State::Active => out.stored.active += 1,
                State::Expired => out.stored.expired += 1,
                State::Claimed => out.stored.claimed += 1,
                State::Cancelled => out.stored.cancelled += 1,
            }
            match w.effective_status(query.now) {
                Status::Active => out.effective.active += 1,
                Status::ExpiringSoon => out.effective.expiring_soon += 1,
                Status::ExpiringUrgent => out.effective.expiring_urgent += 1,
                Status::Claimed => out.effective.claimed += 1,
                Status::Expired => out.effective.expired += 1,
                Status::Cancelled => out.effective.cancelled += 1,
            }

            // Expiration windows count stored-active coverage only, and the
            // expiration day itself is no longer a window day.
            if w.state == State::Active {
                let days = w.days_to_expire(query.now);
                if days > 0 {
                    if days <= URGENT_DAYS {
                        out.expiring_within_7_days += 1;
                    }
                    if days <= SOON_DAYS {
                        out.expiring_within_30_days += 1;
                    }
                }
            }

            if let Some((_, count)) =
                categories.iter_mut().find(|(c, _)| *c == w.category)
            {
                *count += 1;
            } else {
                categories.push((w.category, 1));
            }

            let first_seen = brands.len();
            let (_, count) = brands.entry(&w.brand).or_insert((first_seen, 0));
            *count += 1;
        }

        out.top_categories = categories
            .into_iter()
            .sorted_by_key(|&(_, count)| Reverse(count))
            .collect();
        out.top_brands = brands
            .into_iter()
            .sorted_by_key(|&(_, (first_seen, count))| {
                (Reverse(count), first_seen)
            })
            .take(TOP_BRANDS)
            .map(|(brand, (_, count))| (brand.clone(), count))
            .collect();

        Ok(out)
    }
}
