//! Client-side CSV/JSON export of table views.
//!
//! CSV output matches what the dashboard's download button produces: a
//! header row from a fixed per-table column list, every value wrapped in
//! double quotes, comma-joined, newline-delimited.

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use crate::alerts::types::AlertaExtendida;
use crate::errors::CmoError;
use crate::novedades::types::Novedad;
use crate::precintos::types::PrecintoActivo;
use crate::transitos::types::TransitoPendiente;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("CSV writer flush failed")]
    Flush,

    #[error("JSON serialization failed: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl CmoError for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            ExportError::Csv { .. } => "EXPORT_CSV_FAILED",
            ExportError::Flush => "EXPORT_FLUSH_FAILED",
            ExportError::Json { .. } => "EXPORT_JSON_FAILED",
        }
    }
}

/// One column of a tabular export: header plus value projection.
pub struct Columna<T> {
    pub titulo: &'static str,
    pub valor: fn(&T) -> String,
}

/// Render rows through a column list into quoted CSV.
pub fn a_csv<T>(columnas: &[Columna<T>], filas: &[T]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(columnas.iter().map(|c| c.titulo))?;
    for fila in filas {
        writer.write_record(columnas.iter().map(|c| (c.valor)(fila)))?;
    }

    let bytes = writer.into_inner().map_err(|_| ExportError::Flush)?;
    String::from_utf8(bytes).map_err(|_| ExportError::Flush)
}

/// Render any serializable row collection as pretty JSON.
pub fn a_json<T: Serialize>(filas: &[T]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(filas)?)
}

fn opt_str(value: Option<String>) -> String {
    value.unwrap_or_default()
}

pub fn alertas_csv(filas: &[AlertaExtendida]) -> Result<String, ExportError> {
    let columnas: [Columna<AlertaExtendida>; 8] = [
        Columna {
            titulo: "id",
            valor: |a| a.alerta.id.clone(),
        },
        Columna {
            titulo: "tipo",
            valor: |a| a.alerta.tipo.codigo().to_string(),
        },
        Columna {
            titulo: "severidad",
            valor: |a| a.alerta.severidad.to_string(),
        },
        Columna {
            titulo: "precinto",
            valor: |a| a.alerta.codigo_precinto.clone(),
        },
        Columna {
            titulo: "fecha",
            valor: |a| a.alerta.timestamp.to_rfc3339(),
        },
        Columna {
            titulo: "atendida",
            valor: |a| a.alerta.atendida.to_string(),
        },
        Columna {
            titulo: "asignada_a",
            valor: |a| opt_str(a.asignacion().map(|asg| asg.usuario.clone())),
        },
        Columna {
            titulo: "resuelta",
            valor: |a| a.esta_resuelta().to_string(),
        },
    ];
    a_csv(&columnas, filas)
}

pub fn transitos_csv(filas: &[TransitoPendiente]) -> Result<String, ExportError> {
    let columnas: [Columna<TransitoPendiente>; 7] = [
        Columna {
            titulo: "id",
            valor: |t| t.id.clone(),
        },
        Columna {
            titulo: "dua",
            valor: |t| t.dua.clone(),
        },
        Columna {
            titulo: "matricula",
            valor: |t| t.matricula.clone(),
        },
        Columna {
            titulo: "origen",
            valor: |t| t.origen.clone(),
        },
        Columna {
            titulo: "destino",
            valor: |t| t.destino.clone(),
        },
        Columna {
            titulo: "carga",
            valor: |t| t.descripcion_carga.clone(),
        },
        Columna {
            titulo: "fecha_solicitud",
            valor: |t| t.fecha_solicitud.to_rfc3339(),
        },
    ];
    a_csv(&columnas, filas)
}

pub fn precintos_csv(filas: &[PrecintoActivo]) -> Result<String, ExportError> {
    let columnas: [Columna<PrecintoActivo>; 5] = [
        Columna {
            titulo: "codigo",
            valor: |p| p.codigo.clone(),
        },
        Columna {
            titulo: "bateria_pct",
            valor: |p| p.bateria_pct.to_string(),
        },
        Columna {
            titulo: "gps_activo",
            valor: |p| p.gps_activo.to_string(),
        },
        Columna {
            titulo: "eslinga",
            valor: |p| p.eslinga.to_string(),
        },
        Columna {
            titulo: "ultimo_reporte",
            valor: |p| p.ultimo_reporte.to_rfc3339(),
        },
    ];
    a_csv(&columnas, filas)
}

pub fn novedades_csv(filas: &[Novedad]) -> Result<String, ExportError> {
    let columnas: [Columna<Novedad>; 7] = [
        Columna {
            titulo: "id",
            valor: |n| n.id.clone(),
        },
        Columna {
            titulo: "tipo",
            valor: |n| n.tipo.to_string(),
        },
        Columna {
            titulo: "estado",
            valor: |n| n.estado().to_string(),
        },
        Columna {
            titulo: "descripcion",
            valor: |n| n.descripcion.clone(),
        },
        Columna {
            titulo: "usuario",
            valor: |n| n.usuario.clone(),
        },
        Columna {
            titulo: "fecha",
            valor: |n| n.fecha.to_rfc3339(),
        },
        Columna {
            titulo: "seguimientos",
            valor: |n| n.seguimientos().len().to_string(),
        },
    ];
    a_csv(&columnas, filas)
}
