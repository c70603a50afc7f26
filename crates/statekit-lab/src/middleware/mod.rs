pub mod decrement_alert;

pub use decrement_alert::DecrementAlertMiddleware;
