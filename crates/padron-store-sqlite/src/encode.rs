//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Flags are stored as 0/1 integers. Dates are stored as `%F` text and
//! timestamps as `%F %T%.f` text, the formats rusqlite's chrono support reads
//! back.

use padron_core::{
  field::{FieldValue, PersonaField},
  persona::Persona,
};
use rusqlite::{Row, types::Value};
use strum::IntoEnumIterator as _;

use crate::schema::TABLE;

// ─── Values ──────────────────────────────────────────────────────────────────

pub fn encode_value(value: &FieldValue) -> Value {
  match value {
    FieldValue::Text(v) => v.clone().map_or(Value::Null, Value::Text),
    FieldValue::Int(v) => v.map_or(Value::Null, |n| Value::Integer(n.into())),
    FieldValue::BigInt(v) => v.map_or(Value::Null, Value::Integer),
    FieldValue::Flag(v) => v.map_or(Value::Null, |b| Value::Integer(b.into())),
    FieldValue::Date(v) => {
      v.map_or(Value::Null, |d| Value::Text(d.format("%F").to_string()))
    }
    FieldValue::Timestamp(v) => v.map_or(Value::Null, |ts| {
      Value::Text(ts.format("%F %T%.f").to_string())
    }),
  }
}

/// `rut` followed by every mutable column, in column order.
pub fn encode_row(persona: &Persona) -> Vec<Value> {
  std::iter::once(Value::Integer(persona.rut))
    .chain(persona.values().into_iter().map(|(_, v)| encode_value(&v)))
    .collect()
}

// ─── Statements ──────────────────────────────────────────────────────────────

/// `rut, digito_verificador, …` — the full column list in column order.
pub fn column_list() -> String {
  std::iter::once("rut")
    .chain(PersonaField::iter().map(PersonaField::column))
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn insert_sql() -> String {
  let placeholders = (1..=PersonaField::iter().count() + 1)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ");
  format!("INSERT INTO {TABLE} ({}) VALUES ({placeholders})", column_list())
}

pub fn select_one_sql() -> String {
  format!("SELECT {} FROM {TABLE} WHERE rut = ?1", column_list())
}

pub fn select_page_sql() -> String {
  format!(
    "SELECT {} FROM {TABLE} ORDER BY rut ASC LIMIT ?1 OFFSET ?2",
    column_list()
  )
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Read a full `persona_natural` row selected with [`column_list`].
pub fn decode_persona(row: &Row<'_>) -> rusqlite::Result<Persona> {
  Ok(Persona {
    rut:                                row.get("rut")?,
    digito_verificador:                 row.get("digito_verificador")?,
    nombre:                             row.get("nombre")?,
    apellido_paterno:                   row.get("apellido_paterno")?,
    apellido_materno:                   row.get("apellido_materno")?,
    chileno:                            row.get("chileno")?,
    fecha_nacimiento:                   row.get("fecha_nacimiento")?,
    sexo:                               row.get("sexo")?,
    id_pueblo_originario:               row.get("id_pueblo_originario")?,
    email:                              row.get("email")?,
    id_pais:                            row.get("id_pais")?,
    id_regimen_conyugal:                row.get("id_regimen_conyugal")?,
    id_estado_civil:                    row.get("id_estado_civil")?,
    id_nivel_educacional:               row.get("id_nivel_educacional")?,
    id_usuario:                         row.get("id_usuario")?,
    inicio_actividad:                   row.get("inicio_actividad")?,
    rut_conyuge:                        row.get("rut_conyuge")?,
    id_regimen_conyugal_caracteristica: row
      .get("id_regimen_conyugal_caracteristica")?,
    fecha_defuncion:                    row.get("fecha_defuncion")?,
    id_pueblo_originario_pertenencia:   row
      .get("id_pueblo_originario_pertenencia")?,
    fecha_actualizacion_registro_civil: row
      .get("fecha_actualizacion_registro_civil")?,
    fecha_actualizacion_mideso:         row.get("fecha_actualizacion_mideso")?,
    calificacion_socioeconomica:        row.get("calificacion_socioeconomica")?,
    serie:                              row.get("serie")?,
    fecha_matrimonio:                   row.get("fecha_matrimonio")?,
    imagen_path:                        row.get("imagen_path")?,
  })
}
