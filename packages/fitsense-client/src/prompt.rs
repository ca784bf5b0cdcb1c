//! Line-oriented input helpers for the interactive console.

use fitsense_core::{ActivityLevel, Plan, SignupInput, parse_height, parse_weight};
use std::io::{self, BufRead, Write};

/// Ask `question` until `parse` accepts the answer.
///
/// End of input is reported as `UnexpectedEof`.
pub fn ask<R, W, T, E>(
    input: &mut R,
    output: &mut W,
    question: &str,
    parse: impl Fn(&str) -> Result<T, E>,
) -> io::Result<T>
where
    R: BufRead,
    W: Write,
    E: std::fmt::Display,
{
    loop {
        write!(output, "{question}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(err) => writeln!(output, "Invalid input: {err}")?,
        }
    }
}

fn non_empty(text: &str) -> Result<String, &'static str> {
    if text.is_empty() {
        Err("a value is required")
    } else {
        Ok(text.to_string())
    }
}

fn optional(text: &str) -> Result<Option<String>, &'static str> {
    Ok((!text.is_empty()).then(|| text.to_string()))
}

/// Pick one of `options` by number or by exact name.
fn choose<T: Copy + std::fmt::Display>(options: &[T], text: &str) -> Result<T, String> {
    if let Ok(index) = text.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| options.get(i).copied())
            .ok_or_else(|| format!("choose 1-{}", options.len()));
    }
    options
        .iter()
        .copied()
        .find(|option| option.to_string() == text)
        .ok_or_else(|| format!("unknown choice '{text}'"))
}

fn menu<T: std::fmt::Display>(options: &[T]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("  {}. {option}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn ask_plan<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Plan> {
    writeln!(output, "Plans:\n{}", menu(&Plan::ALL))?;
    ask(input, output, "Plan: ", |text| choose(&Plan::ALL, text))
}

pub fn ask_activity<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<ActivityLevel> {
    writeln!(output, "Activity levels:\n{}", menu(&ActivityLevel::ALL))?;
    ask(input, output, "Activity level: ", |text| {
        choose(&ActivityLevel::ALL, text)
    })
}

pub fn ask_muscles<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    ask(input, output, "Target muscle groups: ", non_empty)
}

/// Collect everything needed to sign up.
pub fn onboarding<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<SignupInput> {
    let height = ask(input, output, "Height (inches): ", parse_height)?;
    let weight = ask(input, output, "Weight (pounds): ", parse_weight)?;
    let plan = ask_plan(input, output)?;
    let activity = ask_activity(input, output)?;
    let workout = ask_muscles(input, output)?;
    let username = ask(input, output, "Username (optional): ", optional)?;
    let password = match username {
        Some(_) => ask(input, output, "Password (optional): ", optional)?,
        None => None,
    };

    Ok(SignupInput {
        height,
        weight,
        plan,
        activity,
        workout,
        username,
        password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run<T>(
        script: &str,
        f: impl FnOnce(&mut Cursor<Vec<u8>>, &mut Vec<u8>) -> io::Result<T>,
    ) -> (io::Result<T>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = f(&mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn onboarding_reprompts_until_valid() {
        let script = "tall\n120\n70\n50\n180.5\n9\n2\nExtremely Active\nlegs, glutes\nriley\n\n";
        let (result, output) = run(script, |i, o| onboarding(i, o));
        let signup = result.unwrap();

        assert_eq!(signup.height, 70);
        assert_eq!(signup.weight, 180.5);
        assert_eq!(signup.plan, Plan::LeanBulk);
        assert_eq!(signup.activity, ActivityLevel::ExtremelyActive);
        assert_eq!(signup.workout, "legs, glutes");
        assert_eq!(signup.username.as_deref(), Some("riley"));
        assert!(signup.password.is_none());
        assert_eq!(output.matches("Invalid input").count(), 4);
    }

    #[test]
    fn anonymous_signup_skips_password() {
        let script = "70\n180\n1\n1\nback\n\n";
        let (result, output) = run(script, |i, o| onboarding(i, o));
        let signup = result.unwrap();
        assert!(signup.username.is_none());
        assert!(!output.contains("Password"));
    }

    #[test]
    fn closed_input_is_eof() {
        let (result, _) = run("70\n", |i, o| onboarding(i, o));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn choose_by_number_or_name() {
        assert_eq!(choose(&Plan::ALL, "6"), Ok(Plan::Maintain));
        assert_eq!(choose(&Plan::ALL, "Standard Cut"), Ok(Plan::StandardCut));
        assert!(choose(&Plan::ALL, "0").is_err());
        assert!(choose(&Plan::ALL, "Cut").is_err());
    }
}
