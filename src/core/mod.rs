//! Core modules for Twinfit

pub mod config;
pub mod geometry;
pub mod overlay;
pub mod construction;
pub mod isolation;
pub mod body;
pub mod session;
pub mod api;

pub use config::{Canvas, ConfigError, LogConfig, ServerConfig, TwinConfig};
pub use geometry::TwinGeometry;
pub use overlay::OverlayBuilder;
pub use isolation::{ChangeIsolationManager, IsolationPhase, verify_isolation};
pub use body::PersistentBodyManager;
pub use session::{StylingSession, TwinRender};
pub use api::{create_router, run_server};
