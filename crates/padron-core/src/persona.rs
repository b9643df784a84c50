//! `Persona` — one row of the `bdi.persona_natural` table.
//!
//! Field names match the column names; the JSON representation uses the same
//! keys so records pass through the HTTP layer unmodified.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;

use crate::{
  Result,
  field::{FieldValue, PersonaField},
};

/// The national identifier that keys a person record.
pub type Rut = i64;

// ─── Record ──────────────────────────────────────────────────────────────────

/// A natural person. `rut` is the primary key and never changes once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Persona {
  pub rut:                                Rut,
  pub digito_verificador:                 String,
  pub nombre:                             String,
  pub apellido_paterno:                   String,
  pub apellido_materno:                   String,
  pub chileno:                            Option<bool>,
  pub fecha_nacimiento:                   Option<NaiveDateTime>,
  pub sexo:                               Option<String>,
  pub id_pueblo_originario:               Option<i32>,
  pub email:                              Option<String>,
  pub id_pais:                            Option<i32>,
  pub id_regimen_conyugal:                Option<i32>,
  pub id_estado_civil:                    Option<i32>,
  pub id_nivel_educacional:               Option<i32>,
  /// The user account that owns this record.
  pub id_usuario:                         Option<i32>,
  pub inicio_actividad:                   Option<bool>,
  /// Spouse's `rut`; not enforced as a foreign key.
  pub rut_conyuge:                        Option<Rut>,
  pub id_regimen_conyugal_caracteristica: Option<i32>,
  pub fecha_defuncion:                    Option<NaiveDate>,
  pub id_pueblo_originario_pertenencia:   Option<i32>,
  pub fecha_actualizacion_registro_civil: Option<NaiveDateTime>,
  pub fecha_actualizacion_mideso:         Option<NaiveDateTime>,
  pub calificacion_socioeconomica:        Option<i32>,
  pub serie:                              Option<i32>,
  pub fecha_matrimonio:                   Option<NaiveDate>,
  pub imagen_path:                        Option<String>,
}

impl Persona {
  /// A record with only the required columns set.
  pub fn new(
    rut: Rut,
    digito_verificador: impl Into<String>,
    nombre: impl Into<String>,
    apellido_paterno: impl Into<String>,
    apellido_materno: impl Into<String>,
  ) -> Self {
    Self {
      rut,
      digito_verificador: digito_verificador.into(),
      nombre: nombre.into(),
      apellido_paterno: apellido_paterno.into(),
      apellido_materno: apellido_materno.into(),
      chileno: None,
      fecha_nacimiento: None,
      sexo: None,
      id_pueblo_originario: None,
      email: None,
      id_pais: None,
      id_regimen_conyugal: None,
      id_estado_civil: None,
      id_nivel_educacional: None,
      id_usuario: None,
      inicio_actividad: None,
      rut_conyuge: None,
      id_regimen_conyugal_caracteristica: None,
      fecha_defuncion: None,
      id_pueblo_originario_pertenencia: None,
      fecha_actualizacion_registro_civil: None,
      fecha_actualizacion_mideso: None,
      calificacion_socioeconomica: None,
      serie: None,
      fecha_matrimonio: None,
      imagen_path: None,
    }
  }

  /// The current value of `field`.
  pub fn value(&self, field: PersonaField) -> FieldValue {
    use PersonaField as F;
    match field {
      F::DigitoVerificador => FieldValue::Text(Some(self.digito_verificador.clone())),
      F::Nombre => FieldValue::Text(Some(self.nombre.clone())),
      F::ApellidoPaterno => FieldValue::Text(Some(self.apellido_paterno.clone())),
      F::ApellidoMaterno => FieldValue::Text(Some(self.apellido_materno.clone())),
      F::Chileno => FieldValue::Flag(self.chileno),
      F::FechaNacimiento => FieldValue::Timestamp(self.fecha_nacimiento),
      F::Sexo => FieldValue::Text(self.sexo.clone()),
      F::IdPuebloOriginario => FieldValue::Int(self.id_pueblo_originario),
      F::Email => FieldValue::Text(self.email.clone()),
      F::IdPais => FieldValue::Int(self.id_pais),
      F::IdRegimenConyugal => FieldValue::Int(self.id_regimen_conyugal),
      F::IdEstadoCivil => FieldValue::Int(self.id_estado_civil),
      F::IdNivelEducacional => FieldValue::Int(self.id_nivel_educacional),
      F::IdUsuario => FieldValue::Int(self.id_usuario),
      F::InicioActividad => FieldValue::Flag(self.inicio_actividad),
      F::RutConyuge => FieldValue::BigInt(self.rut_conyuge),
      F::IdRegimenConyugalCaracteristica => {
        FieldValue::Int(self.id_regimen_conyugal_caracteristica)
      }
      F::FechaDefuncion => FieldValue::Date(self.fecha_defuncion),
      F::IdPuebloOriginarioPertenencia => {
        FieldValue::Int(self.id_pueblo_originario_pertenencia)
      }
      F::FechaActualizacionRegistroCivil => {
        FieldValue::Timestamp(self.fecha_actualizacion_registro_civil)
      }
      F::FechaActualizacionMideso => {
        FieldValue::Timestamp(self.fecha_actualizacion_mideso)
      }
      F::CalificacionSocioeconomica => {
        FieldValue::Int(self.calificacion_socioeconomica)
      }
      F::Serie => FieldValue::Int(self.serie),
      F::FechaMatrimonio => FieldValue::Date(self.fecha_matrimonio),
      F::ImagenPath => FieldValue::Text(self.imagen_path.clone()),
    }
  }

  /// Every mutable column paired with its current value, in column order.
  pub fn values(&self) -> Vec<(PersonaField, FieldValue)> {
    PersonaField::iter().map(|f| (f, self.value(f))).collect()
  }

  /// Check every column constraint; the first violation is returned.
  pub fn validate(&self) -> Result<()> {
    PersonaField::iter().try_for_each(|f| f.check(&self.value(f)))
  }
}

// ─── Pagination ──────────────────────────────────────────────────────────────

/// A window over the records ordered by `rut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
  pub offset: u32,
  pub limit:  u32,
}

impl Default for Page {
  fn default() -> Self { Self { offset: 0, limit: 10 } }
}
