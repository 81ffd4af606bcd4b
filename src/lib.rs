//! phishscan: client for a URL phishing classification service.
//!
//! Submits URLs to a prediction endpoint, renders the verdict and keeps a
//! local scan history. The [`controller::Controller`] owns the history and
//! talks to the outside world through three seams: a
//! [`client::PredictionClient`], a [`store::KeyValueStore`] and a
//! [`ui::UiBinding`].

pub mod analytics;
pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod render;
pub mod store;
pub mod ui;
pub mod web;
