//! [`InstallmentTemplate`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{template, InstallmentTemplate},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<InstallmentTemplate>, template::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<InstallmentTemplate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<InstallmentTemplate>, template::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: template::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, down_payment, months, created_at \
            FROM installment_templates \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| InstallmentTemplate {
                id: row.get("id"),
                name: row.get("name"),
                down_payment: row.get("down_payment"),
                months: template::TotalMonths::new(
                    u32::try_from(row.get::<_, i32>("months"))
                        .expect("`months` overflow"),
                )
                .expect("`months` is at least 1"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Select<By<Option<InstallmentTemplate>, template::Name>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<InstallmentTemplate>, template::Id>>,
        Ok = Option<InstallmentTemplate>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<InstallmentTemplate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<InstallmentTemplate>, template::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let name: template::Name = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM installment_templates \
            WHERE name = $1::TEXT \
            LIMIT 1";
        let Some(row) = self
            .query_opt(SQL, &[&name])
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

impl<C> Database<Insert<InstallmentTemplate>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Update<InstallmentTemplate>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(template): Insert<InstallmentTemplate>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(template))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<InstallmentTemplate>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(template): Update<InstallmentTemplate>,
    ) -> Result<Self::Ok, Self::Err> {
        let InstallmentTemplate {
            id,
            name,
            down_payment,
            months,
            created_at,
        } = template;

        let months =
            i32::try_from(months.get()).expect("`months` overflow");

        const SQL: &str = "\
            INSERT INTO installment_templates (\
                id, name, down_payment, months, created_at \
            ) VALUES (\
                $1::UUID, $2::TEXT, $3::NUMERIC, $4::INT4, $5::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                down_payment = EXCLUDED.down_payment, \
                months = EXCLUDED.months, \
                created_at = EXCLUDED.created_at";
        self.exec(SQL, &[&id, &name, &down_payment, &months, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<InstallmentTemplate>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<InstallmentTemplate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<InstallmentTemplate>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, down_payment, months, created_at \
            FROM installment_templates \
            ORDER BY created_at, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| InstallmentTemplate {
                id: row.get("id"),
                name: row.get("name"),
                down_payment: row.get("down_payment"),
                months: template::TotalMonths::new(
                    u32::try_from(row.get::<_, i32>("months"))
                        .expect("`months` overflow"),
                )
                .expect("`months` is at least 1"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
