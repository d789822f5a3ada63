use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use crate::types::Outcome;

/// Reads maze rows from `reader`. Blank lines and `#` comment lines are
/// skipped; everything else is taken verbatim as a maze row.
pub fn read_maze(reader: &mut impl Read) -> Vec<String> {
    BufReader::new(reader)
        .lines()
        .map(|line| line.unwrap())
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .collect()
}

pub fn write_outcome(writer: &mut impl Write, outcome: &Outcome) {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "c Pitsweeper mission report.").unwrap();

    let status = if outcome.reached_goal {
        "GOAL"
    } else {
        "ABANDONED"
    };
    writeln!(writer, "s {status}").unwrap();
    writeln!(writer, "v moves {} score {}", outcome.moves, outcome.score).unwrap();
}

#[cfg(test)]
mod tests {
    use crate::types::Outcome;

    use super::{read_maze, write_outcome};

    #[test]
    fn reads_rows_and_skips_noise() {
        let input = b"# demo maze\nXXXX\nX@GX\nXXXX\n\n";
        let rows = read_maze(&mut input.as_slice());
        assert_eq!(rows, vec!["XXXX", "X@GX", "XXXX"]);
    }

    #[test]
    fn reports_outcome() {
        let outcome = Outcome {
            score: -12,
            reached_goal: true,
            moves: 9,
        };
        let mut buffer = vec![];
        write_outcome(&mut buffer, &outcome);

        let report = String::from_utf8(buffer).unwrap();
        assert!(report.contains("s GOAL"));
        assert!(report.contains("v moves 9 score -12"));
    }
}
