use colored::{ColoredString, Colorize};
use std::{
    fmt::Display,
    io::{self, Write},
};

// Status lines share stderr so stdout carries only rendered tables.
fn write_line(mut out: impl Write, mark: ColoredString, message: impl Display) {
    let _ = writeln!(out, "{mark} {message}");
}

pub fn success(message: impl Display) {
    write_line(io::stderr(), "✓".green().bold(), message);
}

pub fn failure(message: impl Display) {
    write_line(io::stderr(), "✖".red().bold(), message);
}

pub fn warning(message: impl Display) {
    write_line(io::stderr(), "⚠".yellow().bold(), message);
}

pub fn progress(message: impl Display) {
    write_line(
        io::stderr(),
        "…".bright_black(),
        message.to_string().bright_black(),
    );
}
