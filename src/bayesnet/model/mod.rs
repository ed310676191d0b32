pub mod network;
pub mod table;
pub mod variable;

pub use network::Network;
pub use table::{Assignment, ConditionalTable, Precision, Rows};
pub use variable::Variable;
