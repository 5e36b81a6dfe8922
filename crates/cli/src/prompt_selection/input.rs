//! Plain stdin prompts used by the setup flow and `run`.

use std::io::{stdin, stdout, Write};

use redpen_core::error::Result;

/// One selectable option in a setup question.
pub struct SelectOption {
    pub value: &'static str,
    pub description: &'static str,
}

/// Prompts for one of `options`, returning the chosen index.
///
/// Shows a numbered list with the default marked. An empty answer takes the
/// default, a number picks by position, and an answer equal to an option
/// value picks that option. Anything else asks again.
pub fn select_option(
    message: &str,
    options: &[SelectOption],
    default_index: usize,
) -> Result<usize> {
    loop {
        println!("{message}:");
        for (index, option) in options.iter().enumerate() {
            let marker = if index == default_index { "*" } else { " " };
            println!(
                " {marker} {}. {:<14} {}",
                index + 1,
                option.value,
                option.description
            );
        }
        print!("> [{}]: ", options[default_index].value);
        stdout().flush()?;

        let mut input = String::new();
        stdin().read_line(&mut input)?;
        let answer = input.trim().to_lowercase();

        if answer.is_empty() {
            return Ok(default_index);
        }

        if let Ok(number) = answer.parse::<usize>() {
            if (1..=options.len()).contains(&number) {
                return Ok(number - 1);
            }
        }

        if let Some(index) = options.iter().position(|option| option.value == answer) {
            return Ok(index);
        }

        // Unusable answer; ask again.
    }
}

/// Blocks until the user presses Enter.
pub fn press_enter(message: &str) -> Result<()> {
    if !message.is_empty() {
        print!("{message}");
        stdout().flush()?;
    }

    let mut input = String::new();
    stdin().read_line(&mut input)?;
    Ok(())
}
