//! Command implementations for the atomspace CLI

pub mod dump;
pub mod eval;
pub mod load;
pub mod repl;
pub mod roundtrip;
pub mod stats;

pub use dump::dump_command;
pub use eval::eval_command;
pub use load::{load_command, load_files};
pub use repl::repl_command;
pub use roundtrip::roundtrip_command;
pub use stats::stats_command;
