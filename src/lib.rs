// Library surface shared by the binary and the integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod timer;
pub mod typing_policy;
pub mod ui;
pub mod word_supply;

pub use error::{EngineError, EngineResult};
pub use session::{TestConfig, TestMode};
pub use typing_test::TypingTest;
