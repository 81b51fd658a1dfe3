pub mod executor;
pub mod parser;
pub use executor::Shell;
pub use parser::{CommandAction, parse_command};
