// Status lines go to stderr so that stdout only ever carries a serialized network.
pub use colored::Colorize;

#[macro_export]
macro_rules! print_red {
    ($($arg:tt)*) => {{
        use $crate::bayesnet::common::logging::Colorize;
        eprintln!("{}", format!($($arg)*).red());
    }};
}

#[macro_export]
macro_rules! print_green {
    ($($arg:tt)*) => {{
        use $crate::bayesnet::common::logging::Colorize;
        eprintln!("{}", format!($($arg)*).green());
    }};
}

#[macro_export]
macro_rules! print_yellow {
    ($($arg:tt)*) => {{
        use $crate::bayesnet::common::logging::Colorize;
        eprintln!("{}", format!($($arg)*).yellow());
    }};
}

#[macro_export]
macro_rules! print_blue {
    ($($arg:tt)*) => {{
        use $crate::bayesnet::common::logging::Colorize;
        eprintln!("{}", format!($($arg)*).blue());
    }};
}
