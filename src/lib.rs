//! Reef Catalog Server - product variant configuration and generation engine
//!
//! # Architecture overview
//!
//! - **HTTP API** (`api`): RESTful routes for items, attributes and variants
//! - **Generation engine** (`generation`): combination expansion, pricing,
//!   SKU derivation and the variant lifecycle manager
//! - **Database** (`db`): embedded SurrealDB storage and repositories
//! - **Auth** (`auth`): admin-token authentication and permission gating
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # configuration, state, server lifecycle
//! ├── auth/          # token auth, permission middleware
//! ├── api/           # HTTP routes and handlers
//! ├── generation/    # combiner, pricing, sku, manager
//! ├── db/            # models and repositories
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod generation;
pub mod utils;

pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use generation::{GenerateRequest, GenerationReport, VariantManager};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env, prepare the working directory and initialize logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    if config.is_production() {
        let logs_dir = config.logs_dir();
        init_logger_with_file(Some(&config.log_level), logs_dir.to_str());
    } else {
        init_logger_with_file(Some(&config.log_level), None);
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ____  ____________
  / __ \/ ____/ ____/
 / /_/ / __/ / /_
/ _, _/ /___/ __/
/_/ |_/_____/_/
    "#
    );
}
