//! [`Installment`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select, Update},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{installment, Installment},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Installment>, installment::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Installment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Installment>, installment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: installment::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, plot_id, profile_id, kind, due_at, \
                   amount, currency, status, paid_at \
            FROM installments \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Installment {
                id: row.get("id"),
                plot_id: row.get("plot_id"),
                profile_id: row.get("profile_id"),
                kind: row.get("kind"),
                due_at: row.get("due_at"),
                amount: Money {
                    amount: row.get("amount"),
                    currency: row.get("currency"),
                },
                status: row.get("status"),
                paid_at: row.get("paid_at"),
            }))
    }
}

impl<C> Database<Insert<Installment>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Installment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(installment): Insert<Installment>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(installment))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Vec<Installment>>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Installment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(installments): Insert<Vec<Installment>>,
    ) -> Result<Self::Ok, Self::Err> {
        for installment in installments {
            self.execute(Update(installment))
                .await
                .map_err(tracerr::wrap!())?;
        }
        Ok(())
    }
}

impl<C> Database<Update<Installment>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(installment): Update<Installment>,
    ) -> Result<Self::Ok, Self::Err> {
        let Installment {
            id,
            plot_id,
            profile_id,
            kind,
            due_at,
            amount,
            status,
            paid_at,
        } = installment;

        let Money { amount, currency } = amount;

        const SQL: &str = "\
            INSERT INTO installments (\
                id, plot_id, profile_id, kind, due_at, \
                amount, currency, status, paid_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::TEXT, $5::TIMESTAMPTZ, \
                $6::NUMERIC, $7::TEXT, $8::TEXT, $9::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET plot_id = EXCLUDED.plot_id, \
                profile_id = EXCLUDED.profile_id, \
                kind = EXCLUDED.kind, \
                due_at = EXCLUDED.due_at, \
                amount = EXCLUDED.amount, \
                currency = EXCLUDED.currency, \
                status = EXCLUDED.status, \
                paid_at = EXCLUDED.paid_at";
        self.exec(
            SQL,
            &[
                &id, &plot_id, &profile_id, &kind, &due_at, &amount,
                &currency, &status, &paid_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<read::installment::Settle>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(settle): Update<read::installment::Settle>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::installment::Settle { id, paid_at } = settle;

        const SQL: &str = "\
            UPDATE installments \
            SET status = $1::TEXT, \
                paid_at = $2::TIMESTAMPTZ \
            WHERE id = $3::UUID \
              AND status != $1::TEXT";
        self.exec(SQL, &[&installment::Status::Paid, &paid_at, &id])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows > 0)
    }
}

impl<C> Database<Update<read::installment::Amend>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(amend): Update<read::installment::Amend>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::installment::Amend { id, due_at, amount } = amend;

        let Money { amount, currency } = amount;

        const SQL: &str = "\
            UPDATE installments \
            SET due_at = $1::TIMESTAMPTZ, \
                amount = $2::NUMERIC, \
                currency = $3::TEXT \
            WHERE id = $4::UUID \
              AND status != $5::TEXT";
        self.exec(
            SQL,
            &[&due_at, &amount, &currency, &id, &installment::Status::Paid],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|rows| rows > 0)
    }
}

impl<C> Database<Update<read::installment::Reassign>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(reassign): Update<read::installment::Reassign>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::installment::Reassign { plot_id, to } = reassign;

        const SQL: &str = "\
            UPDATE installments \
            SET profile_id = $1::UUID \
            WHERE plot_id = $2::UUID \
              AND status = $3::TEXT";
        self.exec(SQL, &[&to, &plot_id, &installment::Status::Pending])
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<read::installment::FlagOverdue>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(flag): Update<read::installment::FlagOverdue>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::installment::FlagOverdue { deadline } = flag;

        const SQL: &str = "\
            UPDATE installments \
            SET status = $1::TEXT \
            WHERE status = $2::TEXT \
              AND due_at < $3::TIMESTAMPTZ";
        self.exec(
            SQL,
            &[
                &installment::Status::Overdue,
                &installment::Status::Pending,
                &deadline,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<Installment>, read::installment::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Installment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<Installment>, read::installment::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::installment::list::Filter {
            plot_id,
            profile_id,
            status,
        } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let plot_idx = plot_id.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let profile_idx = profile_id.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });

        let sql = format!(
            "SELECT id, plot_id, profile_id, kind, due_at, \
                    amount, currency, status, paid_at \
             FROM installments \
             WHERE true \
                   {plot_filtering} \
                   {profile_filtering} \
                   {status_filtering} \
             ORDER BY due_at, id",
            plot_filtering = plot_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND plot_id = ${idx}::UUID"))
            }),
            profile_filtering =
                profile_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND profile_id = ${idx}::UUID"))
                }),
            status_filtering =
                status_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND status = ${idx}::TEXT"))
                }),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Installment {
                id: row.get("id"),
                plot_id: row.get("plot_id"),
                profile_id: row.get("profile_id"),
                kind: row.get("kind"),
                due_at: row.get("due_at"),
                amount: Money {
                    amount: row.get("amount"),
                    currency: row.get("currency"),
                },
                status: row.get("status"),
                paid_at: row.get("paid_at"),
            })
            .collect())
    }
}
