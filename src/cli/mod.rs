mod args;
mod ask;
mod index;
mod search;
mod serve;
mod theme;

pub use args::{Args, Command};
pub use ask::{run_ask, run_loop};
pub use index::run_index;
pub use search::run_search;
pub use serve::{router, run_serve};
pub use theme::print_error;
