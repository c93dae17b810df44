pub mod toml_loader;

pub use toml_loader::{load_options_file, parse_options, OptionsFile};
