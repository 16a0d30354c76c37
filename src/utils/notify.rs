use std::io::{self, BufRead, Write};

use colored::Colorize;

pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message.green());
}

pub fn failure(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn notice(message: &str) {
    eprintln!("{} {}", "→".cyan(), message);
}

/// Prints the current text next to the AI suggestion.
pub fn comparison(label: &str, original: &str, suggestion: &str) {
    println!("\n{}", format!("=== {} ===", label).cyan().bold());
    println!("{}", "Original:".yellow().bold());
    println!("{}\n", original);
    println!("{}", "Suggestion:".green().bold());
    println!("{}\n", suggestion);
}

/// Asks a y/n question until it gets an answer. EOF counts as no.
pub fn confirm(question: &str) -> io::Result<bool> {
    confirm_from(question, &mut io::stdin().lock())
}

fn confirm_from(question: &str, input: &mut impl BufRead) -> io::Result<bool> {
    loop {
        eprint!("{} ", format!("{} (y/n):", question).cyan());
        io::stderr().flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }

        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => eprintln!("{}", "Please enter 'y' or 'n'.".red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_confirm_retries_until_answered() {
        let mut input = Cursor::new("maybe\nYES\n");
        assert!(confirm_from("Apply?", &mut input).unwrap());

        let mut input = Cursor::new("n\n");
        assert!(!confirm_from("Apply?", &mut input).unwrap());
    }

    #[test]
    fn test_confirm_treats_eof_as_no() {
        let mut input = Cursor::new("");
        assert!(!confirm_from("Reset?", &mut input).unwrap());
    }
}
