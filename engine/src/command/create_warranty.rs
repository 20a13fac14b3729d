//! [`Command`] for issuing a new [`Warranty`].

use common::DateTime;
use derive_more::{Display, Error, From};
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::{
    domain::{
        employee, shop,
        warranty::{
            self, Brand, Category, Description, InvoiceNumber, Kilometers,
            Model, Months, Price, SerialNumber, State, TermKind, Terms,
        },
        Customer, Vehicle, Warranty,
    },
    Engine,
};

use super::Command;

/// [`Command`] for issuing a new [`Warranty`] at the point of sale.
#[derive(Clone, Debug)]
pub struct CreateWarranty {
    /// ID of the shop issuing the [`Warranty`].
    pub shop_id: shop::Id,

    /// [`Category`] of the sold product.
    pub category: Category,

    /// [`Brand`] of the sold product.
    pub brand: Brand,

    /// [`Model`] of the sold product.
    pub model: Model,

    /// [`SerialNumber`] of the sold product, if it has one.
    pub serial_number: Option<SerialNumber>,

    /// Free-form [`Description`] of the sold product.
    pub description: Option<Description>,

    /// [`DateTime`] when the product was sold.
    pub sold_at: warranty::SaleDateTime,

    /// [`Price`] the product was sold for.
    pub price: Price,

    /// [`InvoiceNumber`] of the sale, if any.
    pub invoice_number: Option<InvoiceNumber>,

    /// ID of the employee who sold the product.
    pub seller_id: employee::Id,

    /// Name of the employee who sold the product, recorded as of the sale
    /// moment.
    pub seller_name: employee::Name,

    /// [`Customer`] the [`Warranty`] is issued to.
    pub customer: Customer,

    /// [`Vehicle`] the product was installed on, if any.
    pub vehicle: Option<Vehicle>,

    /// [`TermKind`] of the coverage.
    pub term_kind: TermKind,

    /// Covered calendar [`Months`], when the [`TermKind`] involves duration.
    pub months: Option<Months>,

    /// Covered [`Kilometers`], when the [`TermKind`] involves distance.
    pub km: Option<Kilometers>,

    /// ID of the employee issuing the [`Warranty`].
    pub created_by: employee::Id,

    /// Current [`DateTime`].
    pub now: DateTime,
}

impl Command<CreateWarranty> for Engine {
    type Ok = Warranty;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: CreateWarranty) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let terms = Terms::new(cmd.term_kind, cmd.months, cmd.km)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        // Distance terms cannot be resolved against a calendar, so such
        // `Warranty`s still receive a date horizon for expiration tracking.
        let months = terms.months.map_or(
            self.config().create_warranty.distance_horizon_months,
            Months::get,
        );
        let expires_at = cmd
            .sold_at
            .checked_add_months(months)
            .ok_or(E::ExpirationUnrepresentable)
            .map_err(tracerr::wrap!())?
            .coerce();

        Ok(Warranty {
            id: warranty::Id::new(),
            shop_id: cmd.shop_id,
            category: cmd.category,
            brand: cmd.brand,
            model: cmd.model,
            serial_number: cmd.serial_number,
            description: cmd.description,
            sold_at: cmd.sold_at,
            price: cmd.price,
            invoice_number: cmd.invoice_number,
            seller_id: cmd.seller_id,
            seller_name: cmd.seller_name,
            customer: cmd.customer,
            vehicle: cmd.vehicle,
            terms,
            expires_at,
            state: State::Active,
            claims: vec![],
            created_at: cmd.now.coerce(),
            created_by: cmd.created_by,
            updated_at: cmd.now.coerce(),
        })
    }
}

/// Configuration of the [`CreateWarranty`] [`Command`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of calendar months a purely distance-covered [`Warranty`]
    /// stays tracked for after the sale.
    #[default(12)]
    pub distance_horizon_months: u32,
}

/// Error of [`CreateWarranty`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Expiration of the [`Warranty`] cannot be represented on the calendar.
    #[display("`Warranty` expiration is not representable")]
    ExpirationUnrepresentable,

    /// Provided coverage [`Terms`] are incoherent.
    #[display("invalid `Terms`: {_0}")]
    #[from]
    InvalidTerms(warranty::InvalidTermsError),
}
