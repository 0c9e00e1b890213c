//! Coalescing de peticiones GET en vuelo.
//!
//! Réplicas idénticas de un GET (misma ruta, mismo token) comparten una sola
//! llamada saliente: el primer caller ejecuta el fetch y los que llegan
//! mientras tanto reciben un clon de la respuesta reenviada. Las mutaciones
//! nunca pasan por aquí.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct RequestCoalescer<T> {
    inflight: DashMap<String, Arc<Mutex<Option<T>>>>,
}

impl<T: Clone> RequestCoalescer<T> {
    pub fn new() -> Self {
        Self {
            inflight: DashMap::new(),
        }
    }

    /// Ejecuta `fetch` deduplicando por `key`.
    ///
    /// El líder corre el fetch bajo el candado de la celda; los seguidores
    /// esperan y clonan el resultado. Los errores no se cachean jamás: el
    /// siguiente en la cola corre su propio fetch.
    pub async fn run<F, Fut, E>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cell = self
            .inflight
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone();

        let mut slot = cell.lock().await;
        if let Some(value) = slot.as_ref() {
            // Alguien completó el vuelo mientras esperábamos el candado.
            return Ok(value.clone());
        }

        let result = fetch().await;
        if let Ok(value) = &result {
            *slot = Some(value.clone());
        }
        drop(slot);

        // Solo se retira la celda propia: una key reinsertada por un vuelo
        // nuevo no debe ser eliminada por un vuelo viejo.
        self.inflight.remove_if(key, |_, v| Arc::ptr_eq(v, &cell));

        result
    }

    pub fn inflight_count(&self) -> usize {
        self.inflight.len()
    }
}

impl<T: Clone> Default for RequestCoalescer<T> {
    fn default() -> Self {
        Self::new()
    }
}
