pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::default_projects_dir;
pub use paths::{format_path_with_tilde, safe_dir_name, shorten_path, validate_file_size};
pub use terminal::strip_ansi_codes;
