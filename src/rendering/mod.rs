pub mod preview;

pub use preview::encode_preview_png;
