pub mod api;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod events;
pub mod flows;
pub mod remote;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use api::ApiClient;
pub use config::ClientConfig;
pub use cooldown::{CooldownStore, MemoryCooldownStore};
pub use error::{ClientError, RemoteError, StoreError, TransportError};
pub use events::{Notice, NoticeKind};
pub use state::{AppState, SessionContext};

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default
/// filter. Calling it again is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("presenty_client=debug,presenty_shared=info,warn")
    });

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    if installed.is_ok() {
        tracing::info!(
            "Starting {} client v{}",
            presenty_shared::constants::APP_NAME,
            env!("CARGO_PKG_VERSION")
        );
    }
}
