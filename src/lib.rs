//! Santa Wishing Machine — library root.
//!
//! A small egui/eframe desktop app that collects a child's holiday profile,
//! asks a remote service for a narrated Santa transcript, fires a parallel
//! video-generation request, and shows the transcript over the finished
//! video or a rotating placeholder carousel until it arrives.
//!
//! Modules:
//! * [`form`]    — wish form validation and the [`form::WishRequest`] payload.
//! * [`api`]     — reqwest clients for the transcript and video services.
//! * [`session`] — the view state machine and its tokio orchestration.
//! * [`config`]  — TOML settings and platform paths.
//! * [`app`]     — the egui presentation layer.

pub mod api;
pub mod app;
pub mod config;
pub mod form;
pub mod session;
