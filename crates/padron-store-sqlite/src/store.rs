//! [`SqliteStore`] — the SQLite implementation of [`PersonaStore`].

use std::path::Path;

use padron_core::{
  patch::PersonaPatch,
  persona::{Page, Persona, Rut},
  store::{Liveness, PersonaStore},
};
use rusqlite::{OptionalExtension as _, params, params_from_iter, types::Value};

use crate::{
  Error, Result,
  encode::{
    decode_persona, encode_row, encode_value, insert_sql, select_one_sql,
    select_page_sql,
  },
  schema::{SCHEMA, SCHEMA_NAME, TABLE},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person registry backed by a single SQLite file attached as `bdi`.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// operation runs as one closure on the connection thread, and write
/// operations run inside a transaction that rolls back if the closure exits
/// early.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::attach(path.as_ref().to_string_lossy().into_owned()).await
  }

  /// Open a scratch store that lives only as long as the connection.
  pub async fn open_in_memory() -> Result<Self> {
    Self::attach(":memory:".to_owned()).await
  }

  async fn attach(location: String) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    conn
      .call(move |conn| {
        conn.execute(
          &format!("ATTACH DATABASE ?1 AS {SCHEMA_NAME}"),
          params![location],
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn })
  }
}

// ─── PersonaStore impl ───────────────────────────────────────────────────────

impl PersonaStore for SqliteStore {
  type Error = Error;

  async fn create(&self, persona: Persona) -> Result<Persona> {
    persona.validate()?;

    let rut        = persona.rut;
    let values     = encode_row(&persona);
    let insert     = insert_sql();
    let select_one = select_one_sql();

    let stored: Option<Persona> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let taken = tx
          .query_row(
            &format!("SELECT 1 FROM {TABLE} WHERE rut = ?1"),
            params![rut],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(None);
        }

        tx.execute(&insert, params_from_iter(values))?;
        let stored = tx.query_row(&select_one, params![rut], decode_persona)?;
        tx.commit()?;
        Ok(Some(stored))
      })
      .await?;

    stored.ok_or(Error::Conflict(rut))
  }

  async fn list(&self, page: Page) -> Result<Vec<Persona>> {
    let select_page = select_page_sql();

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&select_page)?;
        let rows = stmt
          .query_map(params![page.limit, page.offset], decode_persona)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn get(&self, rut: Rut) -> Result<Option<Persona>> {
    let select_one = select_one_sql();

    let persona = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&select_one, params![rut], decode_persona)
            .optional()?,
        )
      })
      .await?;

    Ok(persona)
  }

  async fn update(
    &self,
    rut:   Rut,
    patch: PersonaPatch,
  ) -> Result<Option<Persona>> {
    // Column names come from `PersonaField`, never from the caller.
    let assignments = patch
      .iter()
      .enumerate()
      .map(|(i, (field, _))| format!("{} = ?{}", field.column(), i + 1))
      .collect::<Vec<_>>();
    let mut values: Vec<Value> =
      patch.iter().map(|(_, value)| encode_value(value)).collect();
    values.push(Value::Integer(rut));

    let update = (!patch.is_empty()).then(|| {
      format!(
        "UPDATE {TABLE} SET {} WHERE rut = ?{}",
        assignments.join(", "),
        values.len()
      )
    });
    let select_one = select_one_sql();

    let persona = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if let Some(update) = update
          && tx.execute(&update, params_from_iter(values))? == 0
        {
          return Ok(None);
        }

        let persona = tx
          .query_row(&select_one, params![rut], decode_persona)
          .optional()?;
        tx.commit()?;
        Ok(persona)
      })
      .await?;

    Ok(persona)
  }

  async fn delete(&self, rut: Rut) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!("DELETE FROM {TABLE} WHERE rut = ?1"),
          params![rut],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }

  async fn liveness(&self) -> Result<Liveness> {
    let liveness = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT 1, sqlite_version()", [], |row| {
          Ok(Liveness {
            status:  row.get(0)?,
            version: row.get(1)?,
          })
        })?)
      })
      .await?;

    Ok(liveness)
  }
}
