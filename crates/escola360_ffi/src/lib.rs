//! Flutter-facing bridge over the Escola 360 core.

pub mod api;
