// --- File: crates/beaux_agenda/src/service.rs ---
//! Backend implementation of [`AgendaSource`].

use beaux_common::models::{decode_lenient, extract_list, BloqueoRecord, CitaRecord, Estilista, Sede};
use beaux_common::services::{AgendaSource, BoxFuture, CitaFilter};
use beaux_common::ApiClient;
use beaux_quotes::{bloqueos, logic};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AgendaError;

#[derive(Serialize)]
struct SedeQuery<'a> {
    sede_id: &'a str,
}

/// Reads the agenda listings over HTTP with one client, usually carrying
/// the caller's token.
#[derive(Debug, Clone)]
pub struct HttpAgendaSource {
    client: ApiClient,
}

impl HttpAgendaSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl AgendaSource for HttpAgendaSource {
    type Error = AgendaError;

    fn list_sedes(&self) -> BoxFuture<'_, Vec<Sede>, Self::Error> {
        Box::pin(async move {
            let body: Value = self.client.get("admin/locales/").await?;
            Ok(decode_lenient(extract_list(body, "sedes")))
        })
    }

    fn list_estilistas(&self, sede_id: Option<&str>) -> BoxFuture<'_, Vec<Estilista>, Self::Error> {
        let sede_id = sede_id.map(str::to_string);
        Box::pin(async move {
            let body: Value = match sede_id.as_deref() {
                Some(sede_id) => {
                    self.client
                        .get_json("admin/profesionales/", &SedeQuery { sede_id })
                        .await?
                }
                None => self.client.get("admin/profesionales/").await?,
            };
            let estilistas: Vec<Estilista> = decode_lenient(extract_list(body, "profesionales"));
            debug!("Loaded {} estilistas", estilistas.len());
            Ok(estilistas)
        })
    }

    fn list_citas(&self, filter: &CitaFilter) -> BoxFuture<'_, Vec<CitaRecord>, Self::Error> {
        let filter = filter.clone();
        Box::pin(async move { Ok(logic::list_citas(&self.client, &filter).await?) })
    }

    fn list_bloqueos_profesional(
        &self,
        profesional_id: &str,
    ) -> BoxFuture<'_, Vec<BloqueoRecord>, Self::Error> {
        let profesional_id = profesional_id.to_string();
        Box::pin(async move {
            Ok(bloqueos::list_bloqueos_profesional(&self.client, &profesional_id).await?)
        })
    }
}

/// In-memory source for tests and local runs without a backend.
pub mod mock {
    use super::*;
    use beaux_common::ApiError;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockData {
        sedes: Vec<Sede>,
        estilistas: Vec<Estilista>,
        citas: Vec<CitaRecord>,
        bloqueos: Vec<BloqueoRecord>,
        failing: HashSet<String>,
        fail_citas: bool,
        cita_filters: Vec<CitaFilter>,
    }

    /// Serves fixed records. Professionals marked as failing answer their
    /// bloqueo lookups with an error.
    #[derive(Default)]
    pub struct MockAgendaSource {
        data: Mutex<MockData>,
    }

    impl MockAgendaSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_sedes(self, sedes: Vec<Sede>) -> Self {
            self.update(|d| d.sedes = sedes);
            self
        }

        pub fn with_estilistas(self, estilistas: Vec<Estilista>) -> Self {
            self.update(|d| d.estilistas = estilistas);
            self
        }

        pub fn with_citas(self, citas: Vec<CitaRecord>) -> Self {
            self.update(|d| d.citas = citas);
            self
        }

        pub fn with_bloqueos(self, bloqueos: Vec<BloqueoRecord>) -> Self {
            self.update(|d| d.bloqueos = bloqueos);
            self
        }

        pub fn failing_bloqueos_for(self, profesional_id: &str) -> Self {
            self.update(|d| {
                d.failing.insert(profesional_id.to_string());
            });
            self
        }

        pub fn failing_citas(self) -> Self {
            self.update(|d| d.fail_citas = true);
            self
        }

        /// Filters the cita listing was called with, in order.
        pub fn cita_filters(&self) -> Vec<CitaFilter> {
            self.read(|d| d.cita_filters.clone())
        }

        fn update(&self, f: impl FnOnce(&mut MockData)) {
            let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
            f(&mut data);
        }

        fn read<T>(&self, f: impl FnOnce(&MockData) -> T) -> T {
            let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
            f(&data)
        }
    }

    impl AgendaSource for MockAgendaSource {
        type Error = AgendaError;

        fn list_sedes(&self) -> BoxFuture<'_, Vec<Sede>, Self::Error> {
            let sedes = self.read(|d| d.sedes.clone());
            Box::pin(async move { Ok(sedes) })
        }

        fn list_estilistas(&self, _sede_id: Option<&str>) -> BoxFuture<'_, Vec<Estilista>, Self::Error> {
            // The backend ignores the branch filter here as well.
            let estilistas = self.read(|d| d.estilistas.clone());
            Box::pin(async move { Ok(estilistas) })
        }

        fn list_citas(&self, filter: &CitaFilter) -> BoxFuture<'_, Vec<CitaRecord>, Self::Error> {
            self.update(|d| d.cita_filters.push(filter.clone()));
            let result = self.read(|d| {
                if d.fail_citas {
                    Err(AgendaError::Api(ApiError::Url("citas unavailable".to_string())))
                } else {
                    Ok(d.citas.clone())
                }
            });
            Box::pin(async move { result })
        }

        fn list_bloqueos_profesional(
            &self,
            profesional_id: &str,
        ) -> BoxFuture<'_, Vec<BloqueoRecord>, Self::Error> {
            let result: Option<Vec<BloqueoRecord>> = self.read(|d| {
                if d.failing.contains(profesional_id) {
                    None
                } else {
                    Some(
                        d.bloqueos
                            .iter()
                            .filter(|b| b.profesional_id == profesional_id)
                            .cloned()
                            .collect(),
                    )
                }
            });
            let profesional_id = profesional_id.to_string();
            Box::pin(async move {
                result.ok_or_else(|| {
                    AgendaError::Api(ApiError::Url(format!(
                        "bloqueos for {} unavailable",
                        profesional_id
                    )))
                })
            })
        }
    }
}
