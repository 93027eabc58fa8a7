use std::io::{self, stderr, stdout, Write};

use crossterm::style::{style, Print, PrintStyledContent, Stylize};
use crossterm::QueueableCommand;
use log::warn;

use super::report::OutputSink;

const PROMPT: &str = "> ";
const INDENT: &str = "  ";

/// Renders simulation events on the terminal and redraws the prompt.
#[derive(Debug, Default)]
pub struct Console;

impl Console {
    pub fn new() -> Self {
        Console
    }

    fn event(&self, text: String) {
        if let Err(e) = print_event(text) {
            warn!("could not write to stdout: {}", e);
        }
    }
}

impl OutputSink for Console {
    fn report_error(&self, message: &str) {
        if let Err(e) = print_error(message) {
            warn!("could not write to stderr: {}", e);
        }
    }

    fn report_floor_passed(&self, floor: u8) {
        self.event(format!("The elevator is on the floor number {}", floor));
    }

    fn report_doors_opened(&self) {
        self.event(String::from("The elevator's doors are opened"));
    }

    fn report_doors_closing(&self) {}

    fn report_doors_closed(&self) {
        self.event(String::from("The elevator's doors are closed"));
    }

    fn report_same_floor_inside(&self, floor: u8) {
        self.event(format!(
            "The elevator's doors are closed, it's on the floor number {}, \
             ignoring command to go the same floor requested inside the elevator",
            floor
        ));
    }
}

fn print_event(text: String) -> io::Result<()> {
    let mut out = stdout().lock();
    out.queue(Print("\n"))?;
    out.queue(PrintStyledContent(style(text).bold()))?;
    out.queue(Print("\n"))?;
    out.queue(Print(PROMPT))?;
    out.flush()
}

pub fn print_error(message: &str) -> io::Result<()> {
    let mut err = stderr().lock();
    err.queue(PrintStyledContent(style(message).red()))?;
    err.queue(Print("\n"))?;
    err.flush()
}

pub fn print_prompt() -> io::Result<()> {
    let mut out = stdout().lock();
    out.queue(Print(PROMPT))?;
    out.flush()
}

pub fn print_invitation(complete: bool) -> io::Result<()> {
    let mut out = stdout().lock();
    if complete {
        writeln!(out, "Enter a command.")?;
        write!(out, "{}", INDENT)?;
    }
    writeln!(out, "Available commands are:")?;
    writeln!(out, "{}o N , where the N is a floor number. Request an elevator to the N floor outside of the elevator", INDENT.repeat(2))?;
    writeln!(out, "{}i N , where the N is a floor number. Request an elevator to the N floor inside of the elevator", INDENT.repeat(2))?;
    writeln!(out, "{}quit or Ctrl^D to exit", INDENT.repeat(2))?;
    out.flush()
}

pub fn print_lines(heading: &str, lines: &[String]) -> io::Result<()> {
    let mut out = stdout().lock();
    writeln!(out, "{}{}", INDENT, heading)?;
    for line in lines {
        writeln!(out, "{}{}", INDENT.repeat(2), line)?;
    }
    writeln!(out)?;
    out.flush()
}
