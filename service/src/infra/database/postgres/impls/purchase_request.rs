//! [`PurchaseRequest`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{purchase_request, PurchaseRequest},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<PurchaseRequest>, purchase_request::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PurchaseRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PurchaseRequest>, purchase_request::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: purchase_request::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, client_id, plot_id, plan_label, status, created_at \
            FROM purchase_requests \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| PurchaseRequest {
                id: row.get("id"),
                client_id: row.get("client_id"),
                plot_id: row.get("plot_id"),
                plan_label: row.get("plan_label"),
                status: row.get("status"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Insert<PurchaseRequest>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Update<PurchaseRequest>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(request): Insert<PurchaseRequest>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(request))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<PurchaseRequest>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(request): Update<PurchaseRequest>,
    ) -> Result<Self::Ok, Self::Err> {
        let PurchaseRequest {
            id,
            client_id,
            plot_id,
            plan_label,
            status,
            created_at,
        } = request;

        const SQL: &str = "\
            INSERT INTO purchase_requests (\
                id, client_id, plot_id, plan_label, status, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::TEXT, $5::TEXT, \
                $6::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET client_id = EXCLUDED.client_id, \
                plot_id = EXCLUDED.plot_id, \
                plan_label = EXCLUDED.plan_label, \
                status = EXCLUDED.status, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[&id, &client_id, &plot_id, &plan_label, &status, &created_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<read::purchase_request::Finalize>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(finalize): Update<read::purchase_request::Finalize>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::purchase_request::Finalize { id, status } = finalize;

        const SQL: &str = "\
            UPDATE purchase_requests \
            SET status = $1::TEXT \
            WHERE id = $2::UUID \
              AND status = $3::TEXT";
        self.exec(
            SQL,
            &[&status, &id, &purchase_request::Status::Pending],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|rows| rows > 0)
    }
}

impl<C>
    Database<
        Select<By<Vec<PurchaseRequest>, read::purchase_request::list::Filter>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<PurchaseRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<PurchaseRequest>, read::purchase_request::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::purchase_request::list::Filter { client_id, status } =
            by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let client_idx = client_id.as_ref().map(|c| {
            ps.push(c);
            ps.len()
        });
        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });

        let sql = format!(
            "SELECT id, client_id, plot_id, plan_label, status, created_at \
             FROM purchase_requests \
             WHERE true \
                   {client_filtering} \
                   {status_filtering} \
             ORDER BY created_at, id",
            client_filtering =
                client_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND client_id = ${idx}::UUID"))
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
            .map(|row| PurchaseRequest {
                id: row.get("id"),
                client_id: row.get("client_id"),
                plot_id: row.get("plot_id"),
                plan_label: row.get("plan_label"),
                status: row.get("status"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
