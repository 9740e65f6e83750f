#![warn(missing_docs)]
//! Tryon - virtual try-on through a multimodal AI gateway.
//!
//! Two halves share this crate:
//!
//! - [`proxy`]: a stateless HTTP endpoint that takes a person photo and a
//!   garment image, asks the gateway to dress the person in the garment,
//!   and maps whatever comes back onto a small JSON contract.
//! - [`client`]: the headless model of the try-on page (upload slots,
//!   single-flight generation, history) that a UI or the CLI drives.
//!
//! # Quick Start - Proxy
//!
//! ```no_run
//! use tryon::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> tryon::Result<()> {
//!     let config = ServerConfig::builder().build()?;
//!     let app = tryon::proxy::router(config.proxy_state());
//!     let listener = tokio::net::TcpListener::bind(config.bind).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Client
//!
//! ```no_run
//! use tryon::client::{AppState, HttpTryOnApi, SlotKind, TryOnTool};
//! use tryon::ImageFile;
//!
//! #[tokio::main]
//! async fn main() -> tryon::Result<()> {
//!     let api = HttpTryOnApi::new("http://127.0.0.1:8787/virtual-tryon");
//!     let mut app = AppState::new();
//!     let mut tool = TryOnTool::new();
//!     tool.select_file(SlotKind::Person, &ImageFile::from_path("me.jpg")?);
//!     tool.select_file(SlotKind::Clothing, &ImageFile::from_path("jacket.png")?);
//!     if let Some(note) = tool.generate(&api, &mut app).await {
//!         println!("{note}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `server`: axum router for the proxy (default)
//! - `cli`: the `tryon` binary (default)

mod error;

pub mod client;
mod config;
pub mod gateway;
mod media;
pub mod proxy;
pub mod wire;

// Re-export error types at crate root
pub use error::{Result, TryOnError};

pub use config::{ServerConfig, ServerConfigBuilder, DEFAULT_BIND};
pub use gateway::{ChatGateway, Gateway};
pub use media::{DataUri, ImageFile, ImageFormat};
pub use proxy::{ProxyState, TryOnOutcome};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::{AppState, HttpTryOnApi, SlotKind, TryOnApi, TryOnTool};
    pub use crate::error::{Result, TryOnError};
    pub use crate::gateway::{ChatGateway, Gateway};
    pub use crate::proxy::{ProxyState, TryOnOutcome};
}
