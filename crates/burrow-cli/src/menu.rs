use burrow_core::{ShortCode, Shortener};
use std::io::{self, BufRead, Write};
use tracing::debug;

const NOT_FOUND: &str = "Short URL not found or has expired.";

/// Runs the numbered menu until the user picks "Exit" or input ends.
pub fn run<S, R, W>(shortener: &S, mut input: R, mut output: W) -> io::Result<()>
where
    S: Shortener + ?Sized,
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(output, "Choose an option:")?;
        writeln!(output, "1. Create Short URL")?;
        writeln!(output, "2. Redirect to Original URL")?;
        writeln!(output, "3. View Statistics")?;
        writeln!(output, "4. Exit")?;
        output.flush()?;

        let Some(option) = read_line(&mut input)? else {
            break;
        };

        match option.as_str() {
            "1" => {
                let Some(target) = prompt(&mut input, &mut output, "Enter the URL: ")? else {
                    break;
                };
                if target.is_empty() {
                    writeln!(output, "URL cannot be empty.")?;
                    continue;
                }
                let code = shortener.shorten(&target);
                writeln!(output, "Short URL: {}", code)?;
            }
            "2" => {
                let Some(input_code) = prompt(&mut input, &mut output, "Enter the Short URL: ")?
                else {
                    break;
                };
                let code = parse_code(&input_code);
                match code.and_then(|code| shortener.resolve(&code)) {
                    Some(target) => writeln!(output, "Original URL: {}", target)?,
                    None => writeln!(output, "{}", NOT_FOUND)?,
                }
            }
            "3" => {
                let Some(input_code) = prompt(
                    &mut input,
                    &mut output,
                    "Enter the Short URL to view statistics: ",
                )?
                else {
                    break;
                };
                let code = parse_code(&input_code);
                match code.and_then(|code| shortener.stats(&code)) {
                    Some(count) => writeln!(
                        output,
                        "Short URL {} has been accessed {} times.",
                        input_code, count
                    )?,
                    None => writeln!(output, "{}", NOT_FOUND)?,
                }
            }
            "4" => break,
            _ => writeln!(output, "Invalid option. Please try again.")?,
        }
    }

    writeln!(output, "Exiting...")?;
    output.flush()
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;
    read_line(input)
}

/// Reads one trimmed line; `None` at end of input.
///
/// Bytes that are not UTF-8 are replaced, so such a line ends up as an
/// invalid entry instead of ending the session.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
}

/// A code that can never have been generated is simply not found.
fn parse_code(raw: &str) -> Option<ShortCode> {
    ShortCode::new(raw)
        .inspect_err(|e| debug!(error = %e, "rejected short code input"))
        .ok()
}
