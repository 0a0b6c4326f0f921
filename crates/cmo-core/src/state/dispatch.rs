use chrono::Utc;
use tracing::{debug, error, info};

use crate::alerts::store::AlertasStore;
use crate::alerts::types::Alerta;
use crate::novedades::store::NovedadesStore;
use crate::novedades::types::Novedad;
use crate::precintos::store::PrecintosStore;
use crate::precintos::types::PrecintoActivo;
use crate::state::errors::DispatchError;
use crate::state::events::Event;
use crate::state::store::Store;
use crate::state::types::Command;
use crate::transitos::store::TransitosStore;
use crate::transitos::types::TransitoPendiente;

/// Default Store implementation owning the per-domain collections.
///
/// Operator commands route through [`Store::dispatch`]; refresh cycles
/// apply fetched snapshots through the `apply_*` methods, which return
/// the corresponding snapshot event.
#[derive(Debug, Default)]
pub struct CoreStore {
    alertas: AlertasStore,
    novedades: NovedadesStore,
    precintos: PrecintosStore,
    transitos: TransitosStore,
}

impl CoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alertas(&self) -> &AlertasStore {
        &self.alertas
    }

    pub fn novedades(&self) -> &NovedadesStore {
        &self.novedades
    }

    pub fn precintos(&self) -> &PrecintosStore {
        &self.precintos
    }

    pub fn transitos(&self) -> &TransitosStore {
        &self.transitos
    }

    pub fn apply_alertas(&mut self, snapshot: Vec<Alerta>) -> Event {
        self.alertas.apply_snapshot(snapshot);
        Event::AlertasRecargadas {
            total: self.alertas.len(),
        }
    }

    pub fn apply_transitos(&mut self, snapshot: Vec<TransitoPendiente>) -> Event {
        self.transitos.apply_snapshot(snapshot);
        Event::TransitosRecargados {
            total: self.transitos.len(),
        }
    }

    pub fn apply_precintos(&mut self, snapshot: Vec<PrecintoActivo>) -> Event {
        self.precintos.apply_snapshot(snapshot);
        Event::PrecintosRecargados {
            total: self.precintos.len(),
        }
    }

    pub fn apply_novedades(&mut self, snapshot: Vec<Novedad>) {
        self.novedades.apply_snapshot(snapshot);
    }
}

impl Store for CoreStore {
    type Error = DispatchError;

    fn dispatch(&mut self, cmd: Command) -> Result<Vec<Event>, DispatchError> {
        debug!(event = "core.state.dispatch_started", command = ?cmd);
        let ahora = Utc::now();

        let result = match cmd {
            Command::AtenderAlerta { id, usuario } => {
                self.alertas.atender(&id, &usuario, ahora)?;
                Ok(vec![Event::AlertaAtendida { id }])
            }
            Command::AsignarAlerta { id, usuario } => {
                self.alertas.asignar(&id, &usuario, ahora)?;
                Ok(vec![Event::AlertaAsignada { id, usuario }])
            }
            Command::ComentarAlerta { id, autor, texto } => {
                let comentario_id = self.alertas.comentar(&id, &autor, &texto, ahora)?;
                Ok(vec![Event::AlertaComentada { id, comentario_id }])
            }
            Command::ResolverAlerta {
                id,
                usuario,
                motivo,
            } => {
                self.alertas.resolver(&id, &usuario, &motivo, ahora)?;
                Ok(vec![Event::AlertaResuelta { id }])
            }
            Command::CrearNovedad {
                tipo,
                descripcion,
                usuario,
            } => {
                let id = self.novedades.crear(tipo, &descripcion, &usuario, ahora)?;
                Ok(vec![Event::NovedadCreada { id }])
            }
            Command::AgregarSeguimiento {
                id,
                usuario,
                comentario,
            } => {
                let seguimiento_id =
                    self.novedades
                        .agregar_seguimiento(&id, &usuario, &comentario, ahora)?;
                Ok(vec![Event::SeguimientoAgregado { id, seguimiento_id }])
            }
            Command::ResolverNovedad {
                id,
                usuario,
                comentario,
            } => {
                self.novedades.resolver(&id, &usuario, comentario, ahora)?;
                Ok(vec![Event::NovedadResuelta { id }])
            }
        };

        match &result {
            Ok(events) => info!(
                event = "core.state.dispatch_completed",
                event_count = events.len()
            ),
            Err(e) => error!(event = "core.state.dispatch_failed", error = %e),
        }

        result
    }
}
