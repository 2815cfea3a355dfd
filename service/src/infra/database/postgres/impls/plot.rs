//! [`Plot`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{plot, Plot},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Plot>, plot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Plot>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Plot>, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: plot::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, number, town, size_marla, \
                   price_amount, price_currency, \
                   status, owner_id, created_at \
            FROM plots \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Plot {
                id: row.get("id"),
                number: row.get("number"),
                town: row.get("town"),
                size_marla: u32::try_from(row.get::<_, i64>("size_marla"))
                    .expect("`size_marla` overflow"),
                price: Money {
                    amount: row.get("price_amount"),
                    currency: row.get("price_currency"),
                },
                status: row.get("status"),
                owner_id: row.get("owner_id"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Select<By<Option<Plot>, plot::Number>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Plot>, plot::Id>>,
        Ok = Option<Plot>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Plot>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Plot>, plot::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let number: plot::Number = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM plots \
            WHERE number = $1::TEXT \
            LIMIT 1";
        let Some(row) = self
            .query_opt(SQL, &[&number])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        self.execute(Select(By::new(row.get("id"))))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Plot>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Plot>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(plot): Insert<Plot>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(plot)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Plot>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(plot): Update<Plot>,
    ) -> Result<Self::Ok, Self::Err> {
        let Plot {
            id,
            number,
            town,
            size_marla,
            price,
            status,
            owner_id,
            created_at,
        } = plot;

        let size_marla = i64::from(size_marla);
        let Money {
            amount: price_amount,
            currency: price_currency,
        } = price;

        const SQL: &str = "\
            INSERT INTO plots (\
                id, number, town, size_marla, \
                price_amount, price_currency, \
                status, owner_id, created_at \
            ) VALUES (\
                $1::UUID, $2::TEXT, $3::TEXT, $4::INT8, \
                $5::NUMERIC, $6::TEXT, \
                $7::TEXT, $8::UUID, $9::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET number = EXCLUDED.number, \
                town = EXCLUDED.town, \
                size_marla = EXCLUDED.size_marla, \
                price_amount = EXCLUDED.price_amount, \
                price_currency = EXCLUDED.price_currency, \
                status = EXCLUDED.status, \
                owner_id = EXCLUDED.owner_id, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &number,
                &town,
                &size_marla,
                &price_amount,
                &price_currency,
                &status,
                &owner_id,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<read::plot::Sold>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(sold): Update<read::plot::Sold>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::plot::Sold { id, owner_id, was } = sold;

        const SQL: &str = "\
            UPDATE plots \
            SET status = $1::TEXT, \
                owner_id = $2::UUID \
            WHERE id = $3::UUID \
              AND status = $4::TEXT";
        self.exec(SQL, &[&plot::Status::Sold, &owner_id, &id, &was])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows > 0)
    }
}

impl<C> Database<Update<read::plot::Reserve>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(reserve): Update<read::plot::Reserve>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::plot::Reserve { id } = reserve;

        const SQL: &str = "\
            UPDATE plots \
            SET status = $1::TEXT \
            WHERE id = $2::UUID \
              AND status = $3::TEXT";
        self.exec(
            SQL,
            &[&plot::Status::Reserved, &id, &plot::Status::Available],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|rows| rows > 0)
    }
}

impl<C> Database<Update<read::plot::Release>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(release): Update<read::plot::Release>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::plot::Release { id } = release;

        const SQL: &str = "\
            UPDATE plots \
            SET status = $1::TEXT \
            WHERE id = $2::UUID \
              AND status = $3::TEXT";
        self.exec(
            SQL,
            &[&plot::Status::Available, &id, &plot::Status::Reserved],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|rows| rows > 0)
    }
}

impl<C> Database<Update<read::plot::NewOwner>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(new_owner): Update<read::plot::NewOwner>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::plot::NewOwner { id, owner_id } = new_owner;

        const SQL: &str = "\
            UPDATE plots \
            SET owner_id = $1::UUID \
            WHERE id = $2::UUID";
        self.exec(SQL, &[&owner_id, &id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Plot, plot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Plot, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: plot::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO plots_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Plot>, read::plot::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Plot>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Plot>, read::plot::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::plot::list::Filter {
            status,
            town,
            owner_id,
        } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });
        let town_idx = town.as_ref().map(|t| {
            ps.push(t);
            ps.len()
        });
        let owner_idx = owner_id.as_ref().map(|o| {
            ps.push(o);
            ps.len()
        });

        let sql = format!(
            "SELECT id, number, town, size_marla, \
                    price_amount, price_currency, \
                    status, owner_id, created_at \
             FROM plots \
             WHERE true \
                   {status_filtering} \
                   {town_filtering} \
                   {owner_filtering} \
             ORDER BY created_at, id",
            status_filtering =
                status_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND status = ${idx}::TEXT"))
                }),
            town_filtering = town_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND town = ${idx}::TEXT"))
            }),
            owner_filtering =
                owner_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND owner_id = ${idx}::UUID"))
                }),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Plot {
                id: row.get("id"),
                number: row.get("number"),
                town: row.get("town"),
                size_marla: u32::try_from(row.get::<_, i64>("size_marla"))
                    .expect("`size_marla` overflow"),
                price: Money {
                    amount: row.get("price_amount"),
                    currency: row.get("price_currency"),
                },
                status: row.get("status"),
                owner_id: row.get("owner_id"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
