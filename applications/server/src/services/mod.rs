pub mod notifier;
pub mod playlist;
pub mod resolver;

pub use notifier::{LogNotifier, Notifier};
pub use playlist::PlaylistService;
pub use resolver::{VideoResolver, YoutubeCatalog};
