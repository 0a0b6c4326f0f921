use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{AlertaError, MIN_LARGO_COMENTARIO};

/// Four-level ordinal severity of an alert.
///
/// The derive order matters: `Baja < Media < Alta < Critica`, which is
/// what severity sorting and minimum-severity filters rely on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severidad {
    Baja,
    Media,
    Alta,
    Critica,
}

impl std::fmt::Display for Severidad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severidad::Baja => "baja",
            Severidad::Media => "media",
            Severidad::Alta => "alta",
            Severidad::Critica => "critica",
        };
        f.write_str(label)
    }
}

/// The nine alarm codes a seal device can raise.
///
/// Wire form is the three-letter code the devices report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipoAlarma {
    /// Apertura de eslinga autorizada
    AAR,
    /// Bateria baja
    BBJ,
    /// Demora en transito
    DEM,
    /// Desvio de ruta
    DNR,
    /// Detencion no autorizada
    DTN,
    /// Sin posicion GPS
    NPG,
    /// Sin reporte del precinto
    NPN,
    /// Posible manipulacion (tamper)
    PTN,
    /// Salida no autorizada
    SNA,
}

impl TipoAlarma {
    pub const TODOS: [TipoAlarma; 9] = [
        TipoAlarma::AAR,
        TipoAlarma::BBJ,
        TipoAlarma::DEM,
        TipoAlarma::DNR,
        TipoAlarma::DTN,
        TipoAlarma::NPG,
        TipoAlarma::NPN,
        TipoAlarma::PTN,
        TipoAlarma::SNA,
    ];

    /// The three-letter device code.
    pub fn codigo(&self) -> &'static str {
        match self {
            TipoAlarma::AAR => "AAR",
            TipoAlarma::BBJ => "BBJ",
            TipoAlarma::DEM => "DEM",
            TipoAlarma::DNR => "DNR",
            TipoAlarma::DTN => "DTN",
            TipoAlarma::NPG => "NPG",
            TipoAlarma::NPN => "NPN",
            TipoAlarma::PTN => "PTN",
            TipoAlarma::SNA => "SNA",
        }
    }

    /// Human-readable description shown in tables and tooltips.
    pub fn descripcion(&self) -> &'static str {
        match self {
            TipoAlarma::AAR => "Apertura de eslinga autorizada",
            TipoAlarma::BBJ => "Bateria baja",
            TipoAlarma::DEM => "Demora en transito",
            TipoAlarma::DNR => "Desvio de ruta",
            TipoAlarma::DTN => "Detencion no autorizada",
            TipoAlarma::NPG => "Sin posicion GPS",
            TipoAlarma::NPN => "Sin reporte del precinto",
            TipoAlarma::PTN => "Posible manipulacion",
            TipoAlarma::SNA => "Salida no autorizada",
        }
    }
}

impl std::fmt::Display for TipoAlarma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.codigo())
    }
}

/// Geolocation attached to an alert or seal report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ubicacion {
    pub lat: f64,
    pub lng: f64,
    /// Reverse-geocoded address, when the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
}

/// An event raised by a seal device.
///
/// Created by backend ingestion; the dashboard never deletes alerts, it
/// only attends, assigns, comments on, and resolves them (see
/// [`AlertaExtendida`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alerta {
    pub id: String,
    pub tipo: TipoAlarma,
    pub codigo_precinto: String,
    pub severidad: Severidad,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<Ubicacion>,
    /// Whether an operator has taken note of the alert.
    #[serde(default)]
    pub atendida: bool,
}

/// Assignment of an alert to an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asignacion {
    pub usuario: String,
    pub fecha: DateTime<Utc>,
}

/// A comment on an alert's thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comentario {
    pub id: String,
    pub autor: String,
    pub texto: String,
    pub fecha: DateTime<Utc>,
}

/// Terminal resolution record of an alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolucion {
    pub usuario: String,
    pub motivo: String,
    pub fecha: DateTime<Utc>,
}

/// One entry of the derived history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntradaHistorial {
    pub fecha: DateTime<Utc>,
    pub usuario: String,
    pub accion: AccionHistorial,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detalle: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccionHistorial {
    Atencion,
    Asignacion,
    Comentario,
    Resolucion,
}

/// An alert enriched with its attention lifecycle.
///
/// Composition over the base [`Alerta`]: assignment, comment thread,
/// resolution record, and a derived history log. The sub-collections are
/// append-only and private; all mutation goes through the methods below,
/// which also enforce the terminal-state invariant: once resolved, every
/// further mutation returns [`AlertaError::YaResuelta`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertaExtendida {
    pub alerta: Alerta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    asignacion: Option<Asignacion>,
    #[serde(default)]
    comentarios: Vec<Comentario>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolucion: Option<Resolucion>,
    #[serde(default)]
    historial: Vec<EntradaHistorial>,
}

impl AlertaExtendida {
    pub fn nueva(alerta: Alerta) -> Self {
        Self {
            alerta,
            asignacion: None,
            comentarios: Vec::new(),
            resolucion: None,
            historial: Vec::new(),
        }
    }

    pub fn asignacion(&self) -> Option<&Asignacion> {
        self.asignacion.as_ref()
    }

    pub fn comentarios(&self) -> &[Comentario] {
        &self.comentarios
    }

    pub fn resolucion(&self) -> Option<&Resolucion> {
        self.resolucion.as_ref()
    }

    pub fn historial(&self) -> &[EntradaHistorial] {
        &self.historial
    }

    pub fn esta_resuelta(&self) -> bool {
        self.resolucion.is_some()
    }

    fn verificar_mutable(&self) -> Result<(), AlertaError> {
        if self.esta_resuelta() {
            return Err(AlertaError::YaResuelta {
                id: self.alerta.id.clone(),
            });
        }
        Ok(())
    }

    fn registrar(
        &mut self,
        usuario: &str,
        accion: AccionHistorial,
        detalle: Option<String>,
        fecha: DateTime<Utc>,
    ) {
        self.historial.push(EntradaHistorial {
            fecha,
            usuario: usuario.to_string(),
            accion,
            detalle,
        });
    }

    /// Mark the alert as attended by `usuario`. Idempotent: a second
    /// attention is a no-op and adds no history entry.
    pub fn atender(&mut self, usuario: &str, fecha: DateTime<Utc>) -> Result<(), AlertaError> {
        self.verificar_mutable()?;
        if self.alerta.atendida {
            return Ok(());
        }
        self.alerta.atendida = true;
        self.registrar(usuario, AccionHistorial::Atencion, None, fecha);
        Ok(())
    }

    /// Assign the alert to an operator. Re-assignment replaces the
    /// current assignment and is recorded in the history.
    pub fn asignar(&mut self, usuario: &str, fecha: DateTime<Utc>) -> Result<(), AlertaError> {
        self.verificar_mutable()?;
        self.asignacion = Some(Asignacion {
            usuario: usuario.to_string(),
            fecha,
        });
        self.registrar(usuario, AccionHistorial::Asignacion, None, fecha);
        Ok(())
    }

    /// Append a comment to the thread.
    ///
    /// Comments shorter than [`MIN_LARGO_COMENTARIO`] characters (after
    /// trimming) are rejected.
    pub fn comentar(
        &mut self,
        autor: &str,
        texto: &str,
        fecha: DateTime<Utc>,
    ) -> Result<&Comentario, AlertaError> {
        self.verificar_mutable()?;

        let texto = texto.trim();
        let len = texto.chars().count();
        if len < MIN_LARGO_COMENTARIO {
            return Err(AlertaError::ComentarioMuyCorto { len });
        }

        self.comentarios.push(Comentario {
            id: uuid::Uuid::new_v4().to_string(),
            autor: autor.to_string(),
            texto: texto.to_string(),
            fecha,
        });
        self.registrar(
            autor,
            AccionHistorial::Comentario,
            Some(texto.to_string()),
            fecha,
        );

        // Just pushed, so last() is always Some
        Ok(self.comentarios.last().expect("comment was just appended"))
    }

    /// Resolve the alert. Terminal: no further mutation is accepted.
    /// Resolution implies attention.
    pub fn resolver(
        &mut self,
        usuario: &str,
        motivo: &str,
        fecha: DateTime<Utc>,
    ) -> Result<(), AlertaError> {
        self.verificar_mutable()?;
        self.alerta.atendida = true;
        self.resolucion = Some(Resolucion {
            usuario: usuario.to_string(),
            motivo: motivo.to_string(),
            fecha,
        });
        self.registrar(
            usuario,
            AccionHistorial::Resolucion,
            Some(motivo.to_string()),
            fecha,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn alerta_base() -> Alerta {
        Alerta {
            id: "a-1".to_string(),
            tipo: TipoAlarma::PTN,
            codigo_precinto: "BT-1042".to_string(),
            severidad: Severidad::Alta,
            timestamp: ts(1_700_000_000),
            ubicacion: Some(Ubicacion {
                lat: -34.901,
                lng: -56.164,
                direccion: None,
            }),
            atendida: false,
        }
    }

    #[test]
    fn test_severidad_is_ordinal() {
        assert!(Severidad::Baja < Severidad::Media);
        assert!(Severidad::Media < Severidad::Alta);
        assert!(Severidad::Alta < Severidad::Critica);
    }

    #[test]
    fn test_tipo_alarma_wire_form_is_code() {
        let json = serde_json::to_string(&TipoAlarma::BBJ).unwrap();
        assert_eq!(json, "\"BBJ\"");
        let parsed: TipoAlarma = serde_json::from_str("\"SNA\"").unwrap();
        assert_eq!(parsed, TipoAlarma::SNA);
    }

    #[test]
    fn test_tipo_alarma_covers_nine_codes() {
        assert_eq!(TipoAlarma::TODOS.len(), 9);
        for tipo in TipoAlarma::TODOS {
            assert_eq!(tipo.codigo().len(), 3);
            assert!(!tipo.descripcion().is_empty());
        }
    }

    #[test]
    fn test_alerta_backward_compatibility_atendida() {
        // Backend payloads that predate the atendida flag still parse.
        let json = r#"{
            "id": "a-9",
            "tipo": "DNR",
            "codigo_precinto": "BT-1042",
            "severidad": "media",
            "timestamp": "2024-01-01T12:00:00Z"
        }"#;
        let alerta: Alerta = serde_json::from_str(json).unwrap();
        assert!(!alerta.atendida);
        assert_eq!(alerta.ubicacion, None);
    }

    #[test]
    fn test_atender_is_idempotent() {
        let mut alerta = AlertaExtendida::nueva(alerta_base());
        alerta.atender("maria", ts(1)).unwrap();
        alerta.atender("maria", ts(2)).unwrap();
        assert!(alerta.alerta.atendida);
        assert_eq!(alerta.historial().len(), 1);
    }

    #[test]
    fn test_comentar_rejects_short_comment() {
        let mut alerta = AlertaExtendida::nueva(alerta_base());
        let err = alerta.comentar("maria", "   corto  ", ts(1)).unwrap_err();
        assert!(matches!(err, AlertaError::ComentarioMuyCorto { len: 5 }));
        assert!(alerta.comentarios().is_empty());
        assert!(alerta.historial().is_empty());
    }

    #[test]
    fn test_comentar_appends_to_thread_and_history() {
        let mut alerta = AlertaExtendida::nueva(alerta_base());
        alerta
            .comentar("maria", "revisando en camara", ts(1))
            .unwrap();
        alerta
            .comentar("jorge", "confirmado, eslinga intacta", ts(2))
            .unwrap();
        assert_eq!(alerta.comentarios().len(), 2);
        assert_eq!(alerta.comentarios()[0].autor, "maria");
        assert_eq!(alerta.historial().len(), 2);
        assert_eq!(alerta.historial()[1].accion, AccionHistorial::Comentario);
    }

    #[test]
    fn test_resolver_is_terminal() {
        let mut alerta = AlertaExtendida::nueva(alerta_base());
        alerta.resolver("maria", "falsa alarma", ts(1)).unwrap();
        assert!(alerta.esta_resuelta());
        assert!(alerta.alerta.atendida);

        let err = alerta.asignar("jorge", ts(2)).unwrap_err();
        assert!(matches!(err, AlertaError::YaResuelta { .. }));
        let err = alerta
            .comentar("jorge", "un comentario valido", ts(2))
            .unwrap_err();
        assert!(matches!(err, AlertaError::YaResuelta { .. }));
        let err = alerta.resolver("jorge", "de nuevo", ts(2)).unwrap_err();
        assert!(matches!(err, AlertaError::YaResuelta { .. }));
    }

    #[test]
    fn test_asignar_replaces_and_records() {
        let mut alerta = AlertaExtendida::nueva(alerta_base());
        alerta.asignar("maria", ts(1)).unwrap();
        alerta.asignar("jorge", ts(2)).unwrap();
        assert_eq!(alerta.asignacion().unwrap().usuario, "jorge");
        assert_eq!(alerta.historial().len(), 2);
    }

    #[test]
    fn test_extendida_serde_roundtrip() {
        let mut alerta = AlertaExtendida::nueva(alerta_base());
        alerta.asignar("maria", ts(1)).unwrap();
        alerta
            .comentar("maria", "revisando en camara", ts(2))
            .unwrap();

        let json = serde_json::to_string(&alerta).unwrap();
        let roundtripped: AlertaExtendida = serde_json::from_str(&json).unwrap();
        assert_eq!(alerta, roundtripped);
    }

    #[test]
    fn test_extendida_from_bare_alert_json() {
        // An extended alert built from a payload that only carries the
        // base alert fields: sub-collections default to empty.
        let json = r#"{
            "alerta": {
                "id": "a-3",
                "tipo": "NPG",
                "codigo_precinto": "BT-2000",
                "severidad": "critica",
                "timestamp": "2024-01-01T12:00:00Z"
            }
        }"#;
        let alerta: AlertaExtendida = serde_json::from_str(json).unwrap();
        assert!(alerta.comentarios().is_empty());
        assert!(alerta.asignacion().is_none());
        assert!(!alerta.esta_resuelta());
    }
}
