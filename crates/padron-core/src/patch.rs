//! Partial updates: an explicit map from [`PersonaField`] to its new value.
//!
//! Only the fields present in a patch are written; everything else on the
//! record keeps its stored value.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{
  Error, Result,
  field::{FieldValue, PersonaField},
};

/// Column changes for a single record, validated on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonaPatch {
  changes: BTreeMap<PersonaField, FieldValue>,
}

impl PersonaPatch {
  pub fn new() -> Self { Self::default() }

  /// Build a patch from a JSON object such as `{"email": "a@b.cl"}`.
  ///
  /// `rut` is rejected as immutable and any key that is not a column is
  /// rejected as unknown.
  pub fn from_json(object: Map<String, Value>) -> Result<Self> {
    let mut patch = Self::new();
    for (key, value) in object {
      if key == "rut" {
        return Err(Error::ImmutableField(key));
      }
      let field = key
        .parse::<PersonaField>()
        .map_err(|_| Error::UnknownField(key))?;
      patch.set(field, FieldValue::from_json(field, value)?)?;
    }
    Ok(patch)
  }

  /// Stage a change; a later change to the same field replaces the earlier.
  pub fn set(&mut self, field: PersonaField, value: FieldValue) -> Result<()> {
    if value.kind() != field.kind() {
      return Err(Error::InvalidValue {
        field:   field.column(),
        message: format!("expected a {:?} value", field.kind()),
      });
    }
    field.check(&value)?;
    self.changes.insert(field, value);
    Ok(())
  }

  pub fn is_empty(&self) -> bool { self.changes.is_empty() }

  pub fn len(&self) -> usize { self.changes.len() }

  pub fn get(&self, field: PersonaField) -> Option<&FieldValue> {
    self.changes.get(&field)
  }

  /// Changes in column order.
  pub fn iter(&self) -> impl Iterator<Item = (PersonaField, &FieldValue)> {
    self.changes.iter().map(|(f, v)| (*f, v))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn object(value: Value) -> Map<String, Value> {
    match value {
      Value::Object(map) => map,
      _ => unreachable!("test input must be an object"),
    }
  }

  #[test]
  fn parses_known_fields() {
    let patch = PersonaPatch::from_json(object(json!({
      "email": "ana@example.cl",
      "chileno": true,
      "serie": null,
    })))
    .unwrap();

    assert_eq!(patch.len(), 3);
    assert_eq!(
      patch.get(PersonaField::Email),
      Some(&FieldValue::Text(Some("ana@example.cl".into())))
    );
    assert_eq!(patch.get(PersonaField::Chileno), Some(&FieldValue::Flag(Some(true))));
    assert_eq!(patch.get(PersonaField::Serie), Some(&FieldValue::Int(None)));
    assert_eq!(patch.get(PersonaField::Nombre), None);
  }

  #[test]
  fn rut_is_immutable() {
    let err = PersonaPatch::from_json(object(json!({ "rut": 2 }))).unwrap_err();
    assert!(matches!(err, Error::ImmutableField(ref k) if k == "rut"));
  }

  #[test]
  fn unknown_field_is_rejected() {
    let err =
      PersonaPatch::from_json(object(json!({ "telefono": "123" }))).unwrap_err();
    assert!(matches!(err, Error::UnknownField(ref k) if k == "telefono"));
  }

  #[test]
  fn required_field_cannot_be_nulled() {
    let err =
      PersonaPatch::from_json(object(json!({ "nombre": null }))).unwrap_err();
    assert!(matches!(err, Error::Validation { field: "nombre", .. }));
  }

  #[test]
  fn set_rejects_mismatched_kind() {
    let mut patch = PersonaPatch::new();
    let err = patch
      .set(PersonaField::IdPais, FieldValue::Text(Some("56".into())))
      .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { field: "id_pais", .. }));
    assert!(patch.is_empty());
  }
}
