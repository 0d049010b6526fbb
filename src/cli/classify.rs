//! Classify command implementation

use natasha::{Command, Transcript};

/// Print the intent and argument a transcript resolves to
pub fn classify_command(text: &str) {
    let command = Command::from_transcript(&Transcript::new(text));

    println!("Intent:   {}", command.intent);
    if command.has_argument() {
        println!("Argument: {}", command.argument);
    } else {
        println!("Argument: (none)");
    }
}
