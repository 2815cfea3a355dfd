//! [`Installment`] definitions.

use common::{define_kind, unit, DateTime, DateTimeOf, Money, Percent};
use derive_more::{Display, Error, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{plot, profile, template};
#[cfg(doc)]
use crate::domain::{InstallmentTemplate, Plot, Profile};

/// Single payment obligation of a [`Plot`] purchase.
#[derive(Clone, Debug)]
pub struct Installment {
    /// ID of this [`Installment`].
    pub id: Id,

    /// ID of the [`Plot`] this [`Installment`] pays for.
    pub plot_id: plot::Id,

    /// ID of the [`Profile`] obliged to pay this [`Installment`].
    pub profile_id: profile::Id,

    /// [`Kind`] of this [`Installment`].
    pub kind: Kind,

    /// [`DateTime`] when this [`Installment`] comes due.
    pub due_at: DueDateTime,

    /// Amount to be paid.
    pub amount: Money,

    /// [`Status`] of this [`Installment`].
    pub status: Status,

    /// [`DateTime`] when this [`Installment`] was paid, if it was.
    pub paid_at: Option<PaymentDateTime>,
}

/// ID of an [`Installment`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Kind of an [`Installment`]."]
    enum Kind {
        #[doc = "Upfront share of the price."]
        DownPayment,

        #[doc = "Regular monthly payment."]
        Monthly,
    }
}

define_kind! {
    #[doc = "Status of an [`Installment`]."]
    enum Status {
        #[doc = "The [`Installment`] is awaiting payment."]
        Pending,

        #[doc = "The [`Installment`] has been paid."]
        Paid,

        #[doc = "The [`Installment`] is past its due date and unpaid."]
        Overdue,
    }
}

/// Payment plan an [`Installment`] ledger is generated from.
#[derive(Clone, Debug)]
pub enum Plan {
    /// Plan derived from an [`InstallmentTemplate`]: a down payment followed
    /// by equal monthly [`Installment`]s.
    Template {
        /// Share of the price paid upfront.
        down_payment: Percent,

        /// Number of monthly [`Installment`]s.
        months: template::TotalMonths,
    },

    /// Explicitly listed [`Installment`]s.
    Custom(Vec<CustomInstallment>),
}

impl From<&template::InstallmentTemplate> for Plan {
    fn from(tpl: &template::InstallmentTemplate) -> Self {
        Self::Template {
            down_payment: tpl.down_payment,
            months: tpl.months,
        }
    }
}

/// Single entry of a [`Plan::Custom`].
#[derive(Clone, Copy, Debug)]
pub struct CustomInstallment {
    /// [`Kind`] of the [`Installment`].
    pub kind: Kind,

    /// [`DateTime`] when the [`Installment`] comes due.
    pub due_at: DueDateTime,

    /// Amount to be paid.
    pub amount: Money,
}

/// Error of a [`Plan`] failing to produce a valid [`Installment`] ledger.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum PlanError {
    /// Price of the [`Plot`] is zero or negative.
    #[display("price `{_0}` is not positive")]
    NonPositivePrice(#[error(not(source))] Money),

    /// A [`Plan::Custom`] entry carries a negative amount.
    #[display("custom plan entry amount `{_0}` is negative")]
    NegativeAmount(#[error(not(source))] Money),

    /// A [`Plan::Custom`] lists no entries.
    #[display("custom plan lists no installments")]
    EmptyCustomPlan,
}

/// Generates the [`Installment`] ledger of a [`Plot`] purchase.
///
/// For a [`Plan::Template`] the down payment is due at `sold_at`, and the
/// remainder is split into equal monthly [`Installment`]s due on subsequent
/// months. Amounts are truncated to 2 decimal places, with the rounding
/// remainder folded into the last [`Installment`], so the ledger always sums
/// to the exact `price`.
///
/// # Errors
///
/// See [`PlanError`] for details.
pub fn schedule(
    price: Money,
    plot_id: plot::Id,
    profile_id: profile::Id,
    plan: &Plan,
    sold_at: DateTime,
) -> Result<Vec<Installment>, PlanError> {
    use PlanError as E;

    if !price.is_positive() {
        return Err(E::NonPositivePrice(price));
    }

    let new = |kind, due_at, amount| Installment {
        id: Id::new(),
        plot_id,
        profile_id,
        kind,
        due_at,
        amount: Money {
            amount,
            currency: price.currency,
        },
        status: Status::Pending,
        paid_at: None,
    };

    match plan {
        Plan::Template {
            down_payment,
            months,
        } => {
            let months = months.get();

            let down = down_payment.of(price.amount).trunc_with_scale(2);
            let remaining = price.amount - down;
            let monthly =
                (remaining / Decimal::from(months)).trunc_with_scale(2);

            let mut ledger = Vec::with_capacity(months as usize + 1);
            ledger.push(new(Kind::DownPayment, sold_at.coerce(), down));
            for num in 1..=months {
                let amount = if num == months {
                    remaining - monthly * Decimal::from(months - 1)
                } else {
                    monthly
                };
                ledger.push(new(
                    Kind::Monthly,
                    sold_at.add_months(num).coerce(),
                    amount,
                ));
            }
            Ok(ledger)
        }

        Plan::Custom(entries) => {
            if entries.is_empty() {
                return Err(E::EmptyCustomPlan);
            }
            entries
                .iter()
                .map(|e| {
                    if e.amount.amount < Decimal::ZERO {
                        return Err(E::NegativeAmount(e.amount));
                    }
                    Ok(new(e.kind, e.due_at, e.amount.amount))
                })
                .collect()
        }
    }
}

/// [`DateTime`] when an [`Installment`] comes due.
pub type DueDateTime = DateTimeOf<(Installment, unit::Due)>;

/// [`DateTime`] when an [`Installment`] was paid.
pub type PaymentDateTime = DateTimeOf<(Installment, unit::Payment)>;

#[cfg(test)]
mod spec {
    use common::{DateTime, Money, Percent};
    use rust_decimal::Decimal;

    use crate::domain::{plot, profile, template};

    use super::{schedule, CustomInstallment, Kind, Plan, PlanError, Status};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn template_plan(down_payment: &str, months: u32) -> Plan {
        Plan::Template {
            down_payment: Percent::new(decimal(down_payment)).unwrap(),
            months: template::TotalMonths::new(months).unwrap(),
        }
    }

    fn sold_at() -> DateTime {
        DateTime::from_rfc3339("2024-01-15T00:00:00Z").unwrap()
    }

    #[test]
    fn splits_price_into_down_payment_and_equal_months() {
        let ledger = schedule(
            Money::pkr(decimal("5000000")),
            plot::Id::new(),
            profile::Id::new(),
            &template_plan("20", 12),
            sold_at(),
        )
        .unwrap();

        assert_eq!(ledger.len(), 13);

        assert_eq!(ledger[0].kind, Kind::DownPayment);
        assert_eq!(ledger[0].amount.amount, decimal("1000000"));
        assert_eq!(ledger[0].due_at, sold_at().coerce());

        for inst in &ledger[1..12] {
            assert_eq!(inst.kind, Kind::Monthly);
            assert_eq!(inst.amount.amount, decimal("333333.33"));
        }
        assert_eq!(ledger[12].amount.amount, decimal("333333.37"));

        let total: Decimal = ledger.iter().map(|i| i.amount.amount).sum();
        assert_eq!(total, decimal("5000000"));
    }

    #[test]
    fn monthly_due_dates_advance_by_calendar_months() {
        let ledger = schedule(
            Money::pkr(decimal("1200000")),
            plot::Id::new(),
            profile::Id::new(),
            &template_plan("10", 3),
            sold_at(),
        )
        .unwrap();

        assert_eq!(ledger[1].due_at, sold_at().add_months(1).coerce());
        assert_eq!(ledger[2].due_at, sold_at().add_months(2).coerce());
        assert_eq!(ledger[3].due_at, sold_at().add_months(3).coerce());
    }

    #[test]
    fn all_generated_installments_are_pending() {
        let ledger = schedule(
            Money::pkr(decimal("1000000")),
            plot::Id::new(),
            profile::Id::new(),
            &template_plan("25", 6),
            sold_at(),
        )
        .unwrap();

        assert!(ledger
            .iter()
            .all(|i| i.status == Status::Pending && i.paid_at.is_none()));
    }

    #[test]
    fn rejects_non_positive_price() {
        let result = schedule(
            Money::pkr(decimal("0")),
            plot::Id::new(),
            profile::Id::new(),
            &template_plan("20", 12),
            sold_at(),
        );

        assert!(matches!(result, Err(PlanError::NonPositivePrice(..))));
    }

    #[test]
    fn custom_plan_keeps_provided_entries() {
        let entries = vec![
            CustomInstallment {
                kind: Kind::DownPayment,
                due_at: sold_at().coerce(),
                amount: Money::pkr(decimal("500000")),
            },
            CustomInstallment {
                kind: Kind::Monthly,
                due_at: sold_at().add_months(1).coerce(),
                amount: Money::pkr(decimal("250000")),
            },
        ];

        let ledger = schedule(
            Money::pkr(decimal("750000")),
            plot::Id::new(),
            profile::Id::new(),
            &Plan::Custom(entries),
            sold_at(),
        )
        .unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].amount.amount, decimal("500000"));
        assert_eq!(ledger[1].amount.amount, decimal("250000"));
    }

    #[test]
    fn custom_plan_rejects_negative_amounts() {
        let entries = vec![CustomInstallment {
            kind: Kind::Monthly,
            due_at: sold_at().coerce(),
            amount: Money::pkr(decimal("-1")),
        }];

        let result = schedule(
            Money::pkr(decimal("750000")),
            plot::Id::new(),
            profile::Id::new(),
            &Plan::Custom(entries),
            sold_at(),
        );

        assert!(matches!(result, Err(PlanError::NegativeAmount(..))));
    }

    #[test]
    fn custom_plan_rejects_no_entries() {
        let result = schedule(
            Money::pkr(decimal("750000")),
            plot::Id::new(),
            profile::Id::new(),
            &Plan::Custom(vec![]),
            sold_at(),
        );

        assert!(matches!(result, Err(PlanError::EmptyCustomPlan)));
    }
}
