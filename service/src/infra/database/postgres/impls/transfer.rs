//! [`Transfer`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::Transfer,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Insert<Transfer>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(transfer): Insert<Transfer>,
    ) -> Result<Self::Ok, Self::Err> {
        let Transfer {
            id,
            plot_id,
            from,
            to,
            fee,
            number,
            created_at,
        } = transfer;

        let Money {
            amount: fee_amount,
            currency: fee_currency,
        } = fee;

        // No upsert: a `Transfer` is an immutable ledger record.
        const SQL: &str = "\
            INSERT INTO transfers (\
                id, plot_id, from_id, to_id, \
                fee_amount, fee_currency, \
                number, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::NUMERIC, $6::TEXT, \
                $7::TEXT, $8::TIMESTAMPTZ \
            )";
        self.exec(
            SQL,
            &[
                &id,
                &plot_id,
                &from,
                &to,
                &fee_amount,
                &fee_currency,
                &number,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Transfer>, read::transfer::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Transfer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Transfer>, read::transfer::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::transfer::list::Filter { plot_id, to } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let plot_idx = plot_id.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let to_idx = to.as_ref().map(|t| {
            ps.push(t);
            ps.len()
        });

        let sql = format!(
            "SELECT id, plot_id, from_id, to_id, \
                    fee_amount, fee_currency, \
                    number, created_at \
             FROM transfers \
             WHERE true \
                   {plot_filtering} \
                   {to_filtering} \
             ORDER BY created_at, id",
            plot_filtering = plot_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND plot_id = ${idx}::UUID"))
            }),
            to_filtering = to_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND to_id = ${idx}::UUID"))
            }),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Transfer {
                id: row.get("id"),
                plot_id: row.get("plot_id"),
                from: row.get("from_id"),
                to: row.get("to_id"),
                fee: Money {
                    amount: row.get("fee_amount"),
                    currency: row.get("fee_currency"),
                },
                number: row.get("number"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
