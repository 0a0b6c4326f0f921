use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::NovedadError;

/// Type tag of an operational log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoNovedad {
    Operativa,
    Incidencia,
    Mantenimiento,
    Administrativa,
    Otro,
}

impl std::fmt::Display for TipoNovedad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TipoNovedad::Operativa => "operativa",
            TipoNovedad::Incidencia => "incidencia",
            TipoNovedad::Mantenimiento => "mantenimiento",
            TipoNovedad::Administrativa => "administrativa",
            TipoNovedad::Otro => "otro",
        };
        f.write_str(label)
    }
}

/// Lifecycle state of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoNovedad {
    Activa,
    Seguimiento,
    Resuelta,
}

impl std::fmt::Display for EstadoNovedad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EstadoNovedad::Activa => "activa",
            EstadoNovedad::Seguimiento => "seguimiento",
            EstadoNovedad::Resuelta => "resuelta",
        };
        f.write_str(label)
    }
}

/// File attached to a log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjunto {
    pub nombre: String,
    pub url: String,
}

/// One follow-up on a log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seguimiento {
    pub id: String,
    pub usuario: String,
    pub comentario: String,
    pub fecha: DateTime<Utc>,
}

/// Terminal resolution record of a log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolucionNovedad {
    pub usuario: String,
    pub fecha: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comentario: Option<String>,
}

/// A free-text operational log entry ("novedad").
///
/// The follow-up list is append-only and the resolution is terminal:
/// once resolved, every further mutation returns
/// [`NovedadError::YaResuelta`]. State moves `Activa` -> `Seguimiento`
/// on the first follow-up and `-> Resuelta` on resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Novedad {
    pub id: String,
    pub tipo: TipoNovedad,
    pub descripcion: String,
    /// Operator who recorded the entry.
    pub usuario: String,
    pub fecha: DateTime<Utc>,
    estado: EstadoNovedad,
    #[serde(default)]
    pub adjuntos: Vec<Adjunto>,
    #[serde(default)]
    seguimientos: Vec<Seguimiento>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolucion: Option<ResolucionNovedad>,
}

impl Novedad {
    /// Create a new active entry. Rejects blank descriptions.
    pub fn nueva(
        tipo: TipoNovedad,
        descripcion: &str,
        usuario: &str,
        fecha: DateTime<Utc>,
    ) -> Result<Self, NovedadError> {
        let descripcion = descripcion.trim();
        if descripcion.is_empty() {
            return Err(NovedadError::DescripcionVacia);
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            tipo,
            descripcion: descripcion.to_string(),
            usuario: usuario.to_string(),
            fecha,
            estado: EstadoNovedad::Activa,
            adjuntos: Vec::new(),
            seguimientos: Vec::new(),
            resolucion: None,
        })
    }

    pub fn estado(&self) -> EstadoNovedad {
        self.estado
    }

    pub fn seguimientos(&self) -> &[Seguimiento] {
        &self.seguimientos
    }

    pub fn resolucion(&self) -> Option<&ResolucionNovedad> {
        self.resolucion.as_ref()
    }

    pub fn esta_resuelta(&self) -> bool {
        self.estado == EstadoNovedad::Resuelta
    }

    fn verificar_mutable(&self) -> Result<(), NovedadError> {
        if self.esta_resuelta() {
            return Err(NovedadError::YaResuelta {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Append a follow-up; the entry moves to `Seguimiento` state.
    /// Returns the new follow-up's id.
    pub fn agregar_seguimiento(
        &mut self,
        usuario: &str,
        comentario: &str,
        fecha: DateTime<Utc>,
    ) -> Result<String, NovedadError> {
        self.verificar_mutable()?;

        let id = uuid::Uuid::new_v4().to_string();
        self.seguimientos.push(Seguimiento {
            id: id.clone(),
            usuario: usuario.to_string(),
            comentario: comentario.to_string(),
            fecha,
        });
        self.estado = EstadoNovedad::Seguimiento;
        Ok(id)
    }

    /// Resolve the entry. Terminal.
    pub fn resolver(
        &mut self,
        usuario: &str,
        comentario: Option<String>,
        fecha: DateTime<Utc>,
    ) -> Result<(), NovedadError> {
        self.verificar_mutable()?;
        self.resolucion = Some(ResolucionNovedad {
            usuario: usuario.to_string(),
            fecha,
            comentario,
        });
        self.estado = EstadoNovedad::Resuelta;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn novedad() -> Novedad {
        Novedad::nueva(
            TipoNovedad::Incidencia,
            "Camion demorado en acceso norte",
            "maria",
            ts(100),
        )
        .unwrap()
    }

    #[test]
    fn test_nueva_rejects_blank_description() {
        let result = Novedad::nueva(TipoNovedad::Otro, "   ", "maria", ts(1));
        assert!(matches!(result, Err(NovedadError::DescripcionVacia)));
    }

    #[test]
    fn test_first_follow_up_moves_state() {
        let mut n = novedad();
        assert_eq!(n.estado(), EstadoNovedad::Activa);
        n.agregar_seguimiento("jorge", "escaner confirmo la carga", ts(200))
            .unwrap();
        assert_eq!(n.estado(), EstadoNovedad::Seguimiento);
        assert_eq!(n.seguimientos().len(), 1);
    }

    #[test]
    fn test_resolver_is_terminal() {
        let mut n = novedad();
        n.resolver("maria", Some("liberado".to_string()), ts(300))
            .unwrap();
        assert!(n.esta_resuelta());

        let err = n
            .agregar_seguimiento("jorge", "tarde", ts(400))
            .unwrap_err();
        assert!(matches!(err, NovedadError::YaResuelta { .. }));
        let err = n.resolver("jorge", None, ts(400)).unwrap_err();
        assert!(matches!(err, NovedadError::YaResuelta { .. }));
    }

    #[test]
    fn test_serde_roundtrip_preserves_state() {
        let mut n = novedad();
        n.agregar_seguimiento("jorge", "escaner confirmo la carga", ts(200))
            .unwrap();
        let json = serde_json::to_string(&n).unwrap();
        let roundtripped: Novedad = serde_json::from_str(&json).unwrap();
        assert_eq!(n, roundtripped);
        assert_eq!(roundtripped.estado(), EstadoNovedad::Seguimiento);
    }
}
