//! utility modules used throughout the project
/// terminal and file logging set up the same way for the demo binary and for library users
pub mod logger;
