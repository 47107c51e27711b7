//! FlagMaker - turn any image into a palette-addressed flag
//!
//! A source image is reduced to a 100x66 grid and every pixel is replaced
//! by the UV coordinate of its closest palette color. The resulting text
//! flag is saved per source and handed to a [`services::FlagSink`].
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
