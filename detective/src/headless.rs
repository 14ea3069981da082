//! The line-oriented game loop.
//!
//! One line in, one response out. Exploration ends on `s`, at a dead end
//! when the scenario says so, or at end of input; then the clues are listed
//! and, if the scenario has suspects, one more line is read as the accusation.

use detective_core::{
    Arrival, Direction, HeadlessConfig, HeadlessGame, StepOutcome, VERDICT_THRESHOLD,
};
use std::io::{BufRead, Write};

/// Run a whole game against the given input and output.
pub fn run_headless<R: BufRead, W: Write>(
    config: HeadlessConfig,
    mut input: R,
    mut out: W,
) -> anyhow::Result<()> {
    let mut game = HeadlessGame::new(config)?;

    let intro = &game.session().scenario().intro;
    if !intro.is_empty() {
        writeln!(out, "{intro}")?;
    }
    narrate_arrival(&mut out, game.session().opening())?;

    while !game.is_over() {
        write!(out, "Choose: e (left), d (right), s (leave): ")?;
        out.flush()?;

        let line = match read_line(&mut input)? {
            Some(line) => line,
            None => {
                writeln!(out)?;
                break;
            }
        };

        match game.send(line.trim()) {
            StepOutcome::Moved(arrival) => narrate_arrival(&mut out, &arrival)?,
            StepOutcome::NoPath(Direction::Left) => writeln!(out, "There is no room to the left.")?,
            StepOutcome::NoPath(Direction::Right) => writeln!(out, "There is no room to the right.")?,
            StepOutcome::Invalid(_) => writeln!(out, "Invalid choice.")?,
            StepOutcome::Exited | StepOutcome::AlreadyExited => {
                writeln!(out, "You stop exploring.")?
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "Collected clues:")?;
    let clues = game.clues();
    if clues.is_empty() {
        writeln!(out, "No clues collected.")?;
    }
    for clue in clues {
        writeln!(out, "- {clue}")?;
    }

    if !game.session().scenario().has_accusation() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "Suspects: {}", game.roster().join(", "))?;
    write!(out, "Who do you accuse? ")?;
    out.flush()?;

    let Some(line) = read_line(&mut input)? else {
        writeln!(out)?;
        return Ok(());
    };
    let result = game.accuse(line.trim());
    if result.convicted {
        writeln!(
            out,
            "Well done! {} clues prove it: the culprit is {}!",
            result.count, result.accused
        )?;
    } else {
        writeln!(
            out,
            "Wrong accusation. Only {} clue(s) against {}; {} are needed.",
            result.count, result.accused, VERDICT_THRESHOLD
        )?;
    }

    Ok(())
}

/// Read one line, replacing bytes that are not UTF-8. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn narrate_arrival<W: Write>(out: &mut W, arrival: &Arrival) -> std::io::Result<()> {
    writeln!(out, "You entered {}.", arrival.room_name)?;
    match &arrival.discovery {
        Some(discovery) => writeln!(out, "Clue found: {}", discovery.clue)?,
        None => writeln!(out, "Nothing to find here.")?,
    }
    if arrival.dead_end {
        writeln!(out, "This room has no exits. Exploration is over.")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(config: HeadlessConfig, input: &str) -> String {
        let mut out = Vec::new();
        run_headless(config, Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_full_game_conviction() {
        let out = play(HeadlessConfig::preset("mansion"), "d\ne\ns\nJardineiro\n");
        assert!(out.contains("You entered Biblioteca."));
        assert!(out.contains("Clue found: Terra no tapete"));
        assert!(out.contains("- Luva rasgada\n- Pegada de lama\n- Terra no tapete\n"));
        assert!(out.contains("the culprit is Jardineiro!"));
    }

    #[test]
    fn test_wrong_accusation_and_bad_input() {
        let out = play(HeadlessConfig::preset("mansion"), "x\nd\nd\nd\n s \nCozinheiro\n");
        assert!(out.contains("Invalid choice."));
        assert!(out.contains("There is no room to the right."));
        assert!(out.contains("Only 1 clue(s) against Cozinheiro"));
    }

    #[test]
    fn test_end_of_input_ends_game() {
        let out = play(HeadlessConfig::preset("mansion"), "e\n");
        assert!(out.contains("- Faca suja\n- Pegada de lama\n"));
        assert!(!out.contains("culprit"));
    }

    #[test]
    fn test_basic_scenario_has_no_accusation() {
        let out = play(HeadlessConfig::preset("basic"), "e\ne\n");
        assert!(out.contains("This room has no exits."));
        assert!(out.contains("No clues collected."));
        assert!(!out.contains("Who do you accuse?"));
    }

    #[test]
    fn test_non_utf8_line_is_invalid_choice() {
        let mut input = b"e\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"s\nCozinheiro\n");

        let mut out = Vec::new();
        run_headless(HeadlessConfig::preset("mansion"), Cursor::new(input), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("You entered Sala de Estar."));
        assert!(out.contains("Invalid choice."));
        assert!(out.contains("Collected clues:"));
        assert!(out.contains("Only 1 clue(s) against Cozinheiro"));
    }

    #[test]
    fn test_non_utf8_accusation_is_not_fatal() {
        let mut input = b"e\ns\n".to_vec();
        input.extend_from_slice(&[0xff, b'\n']);

        let mut out = Vec::new();
        run_headless(HeadlessConfig::preset("mansion"), Cursor::new(input), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Wrong accusation. Only 0 clue(s)"));
    }
}
