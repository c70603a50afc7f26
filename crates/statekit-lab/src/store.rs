//! Store wiring for the lab
//!
//! Middleware order:
//! `[LoggingMiddleware, DecrementAlertMiddleware, ThunkMiddleware, PersistenceMiddleware]`.
//! Deferred actions stop at the thunk middleware; the actions they dispatch
//! re-enter from the top, so persistence only ever sees plain actions.

use crate::middleware::DecrementAlertMiddleware;
use crate::slices::{counter, lessons, photos, products, student};
use anyhow::Result;
use statekit::{
    Action, CombineReducers, LoggingMiddleware, Slice, SliceMap, Store, ThunkMiddleware,
};
use statekit_config::AppConfig;
use statekit_fetch::HttpTransport;
use statekit_storage::{KeyValueStorage, PersistenceMiddleware};
use std::sync::Arc;

/// The configured store together with the slices that feed it
pub struct Lab {
    pub store: Store<SliceMap, Action>,
    pub counter: Slice<i64>,
    pub student: Slice<student::Student>,
    pub lessons: Slice<Vec<lessons::Lesson>>,
    pub products: Slice<products::Products>,
    pub photos: photos::PhotosSlice,
    pub decrement_alert: DecrementAlertMiddleware,
}

pub fn configure_store(
    config: &AppConfig,
    transport: Arc<dyn HttpTransport>,
    storage: Arc<dyn KeyValueStorage>,
) -> Result<Lab> {
    let counter = counter::slice();
    let student = student::slice();
    let lessons = lessons::slice();
    let products = products::slice();
    let photos = photos::slice(config, transport, storage.as_ref());

    let reducer = CombineReducers::new()
        .slice(&counter)
        .slice(&student)
        .slice(&lessons)
        .slice(&products)
        .slice(photos.slice())
        .build()?;

    let decrement_alert = DecrementAlertMiddleware::new(counter.action_type("decrement"));

    let store = Store::builder(reducer.initial_state(), reducer)
        .middleware(LoggingMiddleware::new())
        .middleware(decrement_alert.clone())
        .middleware(ThunkMiddleware::new())
        .middleware(PersistenceMiddleware::new(storage))
        .build();

    log::info!("Store configured");

    Ok(Lab {
        store,
        counter,
        student,
        lessons,
        products,
        photos,
        decrement_alert,
    })
}
