//! Server-rendered front-end for the school activities sign-up service.
//!
//! All activity state lives in the upstream REST service; this crate only
//! fetches it, renders it, and forwards sign-up/unregister actions.

pub mod api;
pub mod errors;
pub mod flash;
pub mod handlers;
pub mod templates_structs;
pub mod views;
