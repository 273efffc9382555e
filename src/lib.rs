//! Web control panel for Chromecast receivers — drives the `catt` CLI for
//! discovery, status, and playback control, and serves the media it casts.

pub mod catt;
pub mod cli;
pub mod config;
pub mod http;
pub mod media;
