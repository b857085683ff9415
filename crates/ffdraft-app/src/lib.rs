// Library root for the ffdraft host: command parsing and the interactive
// session loop, split out of main.rs so they can be tested.

pub mod command;
pub mod session;
