//! SQL schema for the padron SQLite store.
//!
//! The store file is attached to the connection as schema `bdi`; everything
//! below is qualified with that name.

/// Name the store file is attached under.
pub const SCHEMA_NAME: &str = "bdi";

/// Fully qualified table name.
pub const TABLE: &str = "bdi.persona_natural";

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA bdi.journal_mode = WAL;

-- One row per natural person, keyed by rut.
-- Dates are stored as 'YYYY-MM-DD', timestamps as 'YYYY-MM-DD HH:MM:SS[.fff]'.
CREATE TABLE IF NOT EXISTS bdi.persona_natural (
    rut                                INTEGER PRIMARY KEY NOT NULL,
    digito_verificador                 TEXT    NOT NULL CHECK (length(digito_verificador) = 1),
    nombre                             TEXT    NOT NULL,
    apellido_paterno                   TEXT    NOT NULL,
    apellido_materno                   TEXT    NOT NULL,
    chileno                            INTEGER,
    fecha_nacimiento                   TEXT,
    sexo                               TEXT    CHECK (length(sexo) <= 1),
    id_pueblo_originario               INTEGER,
    email                              TEXT,
    id_pais                            INTEGER,
    id_regimen_conyugal                INTEGER,
    id_estado_civil                    INTEGER,
    id_nivel_educacional               INTEGER,
    id_usuario                         INTEGER,
    inicio_actividad                   INTEGER,
    rut_conyuge                        INTEGER,   -- another rut; not a foreign key
    id_regimen_conyugal_caracteristica INTEGER,
    fecha_defuncion                    TEXT,
    id_pueblo_originario_pertenencia   INTEGER,
    fecha_actualizacion_registro_civil TEXT,
    fecha_actualizacion_mideso         TEXT,
    calificacion_socioeconomica        INTEGER,
    serie                              INTEGER,
    fecha_matrimonio                   TEXT,
    imagen_path                        TEXT    CHECK (length(imagen_path) <= 100)
);

PRAGMA bdi.user_version = 1;
";
