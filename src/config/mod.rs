mod types;
mod loader;
mod defaults;
mod validation;

pub use types::*;
pub use defaults::DEFAULT_LIST_TAG_NAME;
pub use loader::{load_options, parse_options, OptionsFormat};
pub use validation::validate_options;
