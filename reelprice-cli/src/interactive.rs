//! Line-oriented menu over any reader and writer.

use std::io::{self, BufRead, Write};

use reelprice::{Reel, ReelError, TitleIndex};

use crate::describe_error;

const MENU: &str = "Choose one option:\n\
--------------\n\
1. All movies list\n\
2. Find the cheapest price of a movie\n\
3. Find the cheapest price by list index\n\
0. Exit\n";

const SEPARATOR: &str = "-------------------------------------------------------------";

/// Run the menu until the user picks `0` or input ends.
///
/// Every choice builds a fresh index, so catalog changes upstream show up on
/// the next pick. Failures print a short line and the menu continues.
///
/// # Errors
/// Only I/O errors on `input` or `out` end the session early.
pub async fn run<R: BufRead, W: Write>(reel: &Reel, mut input: R, mut out: W) -> io::Result<()> {
    loop {
        write!(out, "{MENU}Enter your choice: ")?;
        out.flush()?;
        let Some(choice) = read_line(&mut input)? else {
            return Ok(());
        };
        match choice.as_str() {
            "0" => return Ok(()),
            "1" => match reel.build_index().await {
                Ok(index) => print_list(&mut out, &index)?,
                Err(e) => print_failure(&mut out, &e)?,
            },
            "2" => {
                let Some(title) = prompt(&mut input, &mut out, "Movie name: ")? else {
                    return Ok(());
                };
                match reel.cheapest_price(&title).await {
                    Ok(best) => writeln!(out, "\nCheapest Price: {}\n", best.price)?,
                    Err(e) if e.is_not_found() => writeln!(out, "\nMovie ({title}) not found\n")?,
                    Err(e) => print_failure(&mut out, &e)?,
                }
            }
            "3" => {
                let Some(pick) = prompt(&mut input, &mut out, "Movie index: ")? else {
                    return Ok(());
                };
                let result = match reel.build_index().await {
                    Ok(index) => reel.cheapest_at(&index, &pick).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(best) => writeln!(out, "\nCheapest Price: {}\n", best.price)?,
                    Err(ReelError::InvalidArg(_)) => {
                        writeln!(out, "\nInvalid index ({pick})\n")?;
                    }
                    Err(e) if e.is_not_found() => {
                        writeln!(out, "\nNo price available for movie {pick}\n")?;
                    }
                    Err(e) => print_failure(&mut out, &e)?,
                }
            }
            _ => writeln!(out, "Invalid option, try again")?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).trim().to_string()))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    read_line(input)
}

fn print_list<W: Write>(out: &mut W, index: &TitleIndex) -> io::Result<()> {
    writeln!(out, "\nAll Movies List:\n----------------------------\n")?;
    for (i, (_, records)) in index.iter().enumerate() {
        let Some(first) = records.first() else {
            continue;
        };
        writeln!(out, " Index: {}", i + 1)?;
        writeln!(out, " Title: {}", first.title)?;
        writeln!(out, " Year: {}", first.year)?;
        writeln!(out, " Type: {}", first.kind)?;
        writeln!(out, " Poster: {}", first.poster)?;
        writeln!(out, "\n{SEPARATOR}\n")?;
    }
    Ok(())
}

fn print_failure<W: Write>(out: &mut W, e: &ReelError) -> io::Result<()> {
    tracing::debug!(error = %e, "menu action failed");
    writeln!(out, "\nSorry, {}\n", describe_error(e))
}
