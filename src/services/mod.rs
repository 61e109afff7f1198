//! Backend services.

pub mod clipboard;
pub mod notifier;
pub mod translator;

pub use clipboard::Clipboard;
pub use notifier::Notifier;
pub use translator::{DeepLClient, Translate, TranslateError};
