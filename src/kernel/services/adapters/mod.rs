//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod repository;
pub mod runtime;
pub mod settings;

pub use repository::JsonRepository;
pub use runtime::AsyncRuntime;
pub use settings::{
    database_path, default_database_path, ensure_log_dir, ensure_settings_file, get_app_dir,
    get_settings_path, load_settings,
};
