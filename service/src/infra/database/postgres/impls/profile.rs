//! [`Profile`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{profile, Profile},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Profile>, profile::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Profile>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Profile>, profile::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: profile::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, cnic, role, \
                   biometric_ref, biometric_verified, \
                   created_at \
            FROM profiles \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Profile {
                id: row.get("id"),
                name: row.get("name"),
                cnic: row.get("cnic"),
                role: row.get("role"),
                biometric_ref: row.get("biometric_ref"),
                biometric_verified: row.get("biometric_verified"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Select<By<Option<Profile>, profile::Cnic>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Profile>, profile::Id>>,
        Ok = Option<Profile>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Profile>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Profile>, profile::Cnic>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let cnic: profile::Cnic = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM profiles \
            WHERE cnic = $1::TEXT \
            LIMIT 1";
        let Some(row) = self
            .query_opt(SQL, &[&cnic])
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

impl<C> Database<Insert<Profile>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Profile>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(profile): Insert<Profile>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(profile))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Profile>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(profile): Update<Profile>,
    ) -> Result<Self::Ok, Self::Err> {
        let Profile {
            id,
            name,
            cnic,
            role,
            biometric_ref,
            biometric_verified,
            created_at,
        } = profile;

        const SQL: &str = "\
            INSERT INTO profiles (\
                id, name, cnic, role, \
                biometric_ref, biometric_verified, \
                created_at \
            ) VALUES (\
                $1::UUID, $2::TEXT, $3::TEXT, $4::TEXT, \
                $5::TEXT, $6::BOOL, \
                $7::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                cnic = EXCLUDED.cnic, \
                role = EXCLUDED.role, \
                biometric_ref = EXCLUDED.biometric_ref, \
                biometric_verified = EXCLUDED.biometric_verified, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &cnic,
                &role,
                &biometric_ref,
                &biometric_verified,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Profile>, Option<profile::Role>>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Profile>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Profile>, Option<profile::Role>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let role = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let role_idx = role.as_ref().map(|r| {
            ps.push(r);
            ps.len()
        });

        let sql = format!(
            "SELECT id, name, cnic, role, \
                    biometric_ref, biometric_verified, \
                    created_at \
             FROM profiles \
             WHERE true \
                   {role_filtering} \
             ORDER BY created_at, id",
            role_filtering = role_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND role = ${idx}::TEXT"))
            }),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Profile {
                id: row.get("id"),
                name: row.get("name"),
                cnic: row.get("cnic"),
                role: row.get("role"),
                biometric_ref: row.get("biometric_ref"),
                biometric_verified: row.get("biometric_verified"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
