//! The fixed set of mutable `persona_natural` columns and their typed values.
//!
//! Every column except `rut` has a [`PersonaField`] variant. The variant name in
//! snake case is the column name, so SQL built from these variants never
//! contains caller-supplied identifiers.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

// ─── Field ───────────────────────────────────────────────────────────────────

/// A mutable column of `bdi.persona_natural`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum PersonaField {
  DigitoVerificador,
  Nombre,
  ApellidoPaterno,
  ApellidoMaterno,
  Chileno,
  FechaNacimiento,
  Sexo,
  IdPuebloOriginario,
  Email,
  IdPais,
  IdRegimenConyugal,
  IdEstadoCivil,
  IdNivelEducacional,
  IdUsuario,
  InicioActividad,
  RutConyuge,
  IdRegimenConyugalCaracteristica,
  FechaDefuncion,
  IdPuebloOriginarioPertenencia,
  FechaActualizacionRegistroCivil,
  FechaActualizacionMideso,
  CalificacionSocioeconomica,
  Serie,
  FechaMatrimonio,
  ImagenPath,
}

/// The storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  /// 32-bit integer.
  Int,
  /// 64-bit integer.
  BigInt,
  Flag,
  Date,
  Timestamp,
}

/// Upper bound for the free-text columns.
pub const TEXT_MAX_LEN: usize = 8000;

impl PersonaField {
  /// The column name, e.g. `"apellido_paterno"`.
  pub fn column(self) -> &'static str { self.into() }

  pub fn kind(self) -> FieldKind {
    use PersonaField::*;
    match self {
      DigitoVerificador | Nombre | ApellidoPaterno | ApellidoMaterno | Sexo
      | Email | ImagenPath => FieldKind::Text,
      Chileno | InicioActividad => FieldKind::Flag,
      FechaNacimiento
      | FechaActualizacionRegistroCivil
      | FechaActualizacionMideso => FieldKind::Timestamp,
      FechaDefuncion | FechaMatrimonio => FieldKind::Date,
      RutConyuge => FieldKind::BigInt,
      IdPuebloOriginario
      | IdPais
      | IdRegimenConyugal
      | IdEstadoCivil
      | IdNivelEducacional
      | IdUsuario
      | IdRegimenConyugalCaracteristica
      | IdPuebloOriginarioPertenencia
      | CalificacionSocioeconomica
      | Serie => FieldKind::Int,
    }
  }

  pub fn nullable(self) -> bool {
    !matches!(
      self,
      Self::DigitoVerificador
        | Self::Nombre
        | Self::ApellidoPaterno
        | Self::ApellidoMaterno
    )
  }

  /// Maximum length in characters for text columns.
  pub fn max_len(self) -> Option<usize> {
    match self {
      Self::DigitoVerificador | Self::Sexo => Some(1),
      Self::ImagenPath => Some(100),
      _ if self.kind() == FieldKind::Text => Some(TEXT_MAX_LEN),
      _ => None,
    }
  }

  /// Check `value` against the column constraints: nullability and length.
  pub fn check(self, value: &FieldValue) -> Result<()> {
    let column = self.column();

    if value.is_null() {
      if self.nullable() {
        return Ok(());
      }
      return Err(Error::Validation {
        field:  column,
        reason: "must not be null".to_owned(),
      });
    }

    if let FieldValue::Text(Some(text)) = value {
      // SQLite's length() stops at the first NUL.
      if text.contains('\0') {
        return Err(Error::Validation {
          field:  column,
          reason: "must not contain NUL characters".to_owned(),
        });
      }
      let len = text.chars().count();
      if self == Self::DigitoVerificador && len != 1 {
        return Err(Error::Validation {
          field:  column,
          reason: "must be exactly one character".to_owned(),
        });
      }
      if let Some(max) = self.max_len()
        && len > max
      {
        return Err(Error::Validation {
          field:  column,
          reason: format!("must be at most {max} characters"),
        });
      }
    }

    Ok(())
  }
}

// ─── Value ───────────────────────────────────────────────────────────────────

/// A typed, possibly-null value for one [`PersonaField`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
  Text(Option<String>),
  Int(Option<i32>),
  BigInt(Option<i64>),
  Flag(Option<bool>),
  Date(Option<NaiveDate>),
  Timestamp(Option<NaiveDateTime>),
}

impl FieldValue {
  /// The null value of the given kind.
  pub fn null(kind: FieldKind) -> Self {
    match kind {
      FieldKind::Text => Self::Text(None),
      FieldKind::Int => Self::Int(None),
      FieldKind::BigInt => Self::BigInt(None),
      FieldKind::Flag => Self::Flag(None),
      FieldKind::Date => Self::Date(None),
      FieldKind::Timestamp => Self::Timestamp(None),
    }
  }

  pub fn kind(&self) -> FieldKind {
    match self {
      Self::Text(_) => FieldKind::Text,
      Self::Int(_) => FieldKind::Int,
      Self::BigInt(_) => FieldKind::BigInt,
      Self::Flag(_) => FieldKind::Flag,
      Self::Date(_) => FieldKind::Date,
      Self::Timestamp(_) => FieldKind::Timestamp,
    }
  }

  pub fn is_null(&self) -> bool {
    match self {
      Self::Text(v) => v.is_none(),
      Self::Int(v) => v.is_none(),
      Self::BigInt(v) => v.is_none(),
      Self::Flag(v) => v.is_none(),
      Self::Date(v) => v.is_none(),
      Self::Timestamp(v) => v.is_none(),
    }
  }

  /// Interpret a JSON value as the type stored in `field`'s column.
  ///
  /// Only the JSON type is checked here; column constraints are applied by
  /// [`PersonaField::check`].
  pub fn from_json(field: PersonaField, value: Value) -> Result<Self> {
    let invalid = |message: String| Error::InvalidValue {
      field: field.column(),
      message,
    };

    if value.is_null() {
      return Ok(Self::null(field.kind()));
    }

    match field.kind() {
      FieldKind::Text => match value {
        Value::String(s) => Ok(Self::Text(Some(s))),
        other => Err(invalid(format!("expected a string, got {other}"))),
      },
      FieldKind::Int => {
        let n = value
          .as_i64()
          .ok_or_else(|| invalid(format!("expected an integer, got {value}")))?;
        i32::try_from(n)
          .map(|n| Self::Int(Some(n)))
          .map_err(|_| invalid(format!("{n} does not fit in 32 bits")))
      }
      FieldKind::BigInt => value
        .as_i64()
        .map(|n| Self::BigInt(Some(n)))
        .ok_or_else(|| invalid(format!("expected an integer, got {value}"))),
      FieldKind::Flag => value
        .as_bool()
        .map(|b| Self::Flag(Some(b)))
        .ok_or_else(|| invalid(format!("expected a boolean, got {value}"))),
      FieldKind::Date => serde_json::from_value::<NaiveDate>(value)
        .map(|d| Self::Date(Some(d)))
        .map_err(|e| invalid(e.to_string())),
      FieldKind::Timestamp => serde_json::from_value::<NaiveDateTime>(value)
        .map(|ts| Self::Timestamp(Some(ts)))
        .map_err(|e| invalid(e.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn columns_are_snake_case() {
    assert_eq!(PersonaField::DigitoVerificador.column(), "digito_verificador");
    assert_eq!(
      PersonaField::IdRegimenConyugalCaracteristica.column(),
      "id_regimen_conyugal_caracteristica"
    );
    assert_eq!(
      "fecha_actualizacion_mideso".parse::<PersonaField>().unwrap(),
      PersonaField::FechaActualizacionMideso
    );
    assert!("rut".parse::<PersonaField>().is_err());
  }

  #[test]
  fn every_mutable_column_is_listed() {
    assert_eq!(PersonaField::iter().count(), 25);
    assert_eq!(PersonaField::iter().filter(|f| !f.nullable()).count(), 4);
  }

  #[test]
  fn int_out_of_range_is_rejected() {
    let err =
      FieldValue::from_json(PersonaField::IdPais, json!(5_000_000_000_i64))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { field: "id_pais", .. }));

    let ok =
      FieldValue::from_json(PersonaField::RutConyuge, json!(5_000_000_000_i64))
        .unwrap();
    assert_eq!(ok, FieldValue::BigInt(Some(5_000_000_000)));
  }

  #[test]
  fn wrong_json_type_is_rejected() {
    let err =
      FieldValue::from_json(PersonaField::Chileno, json!("yes")).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { field: "chileno", .. }));

    let err =
      FieldValue::from_json(PersonaField::FechaDefuncion, json!("not a date"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));
  }

  #[test]
  fn dates_and_timestamps_parse() {
    let date =
      FieldValue::from_json(PersonaField::FechaMatrimonio, json!("2001-09-18"))
        .unwrap();
    assert_eq!(
      date,
      FieldValue::Date(NaiveDate::from_ymd_opt(2001, 9, 18))
    );

    let ts = FieldValue::from_json(
      PersonaField::FechaNacimiento,
      json!("1990-05-01T08:30:00"),
    )
    .unwrap();
    assert!(matches!(ts, FieldValue::Timestamp(Some(_))));
  }

  #[test]
  fn null_is_rejected_for_required_columns() {
    let value = FieldValue::from_json(PersonaField::Nombre, Value::Null).unwrap();
    assert!(PersonaField::Nombre.check(&value).is_err());
    let value = FieldValue::from_json(PersonaField::Email, Value::Null).unwrap();
    assert!(PersonaField::Email.check(&value).is_ok());
  }

  #[test]
  fn length_limits() {
    let dv = FieldValue::Text(Some("12".into()));
    assert!(PersonaField::DigitoVerificador.check(&dv).is_err());
    let dv = FieldValue::Text(Some(String::new()));
    assert!(PersonaField::DigitoVerificador.check(&dv).is_err());
    let dv = FieldValue::Text(Some("K".into()));
    assert!(PersonaField::DigitoVerificador.check(&dv).is_ok());

    let dv = FieldValue::Text(Some("\0".into()));
    assert!(matches!(
      PersonaField::DigitoVerificador.check(&dv),
      Err(Error::Validation { field: "digito_verificador", .. })
    ));
    let email = FieldValue::Text(Some("a\0b@x.cl".into()));
    assert!(PersonaField::Email.check(&email).is_err());

    let path = FieldValue::Text(Some("x".repeat(101)));
    assert!(PersonaField::ImagenPath.check(&path).is_err());
    let path = FieldValue::Text(Some("x".repeat(100)));
    assert!(PersonaField::ImagenPath.check(&path).is_ok());
  }
}
