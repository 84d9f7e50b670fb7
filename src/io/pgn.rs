//! PGN reading: attribute lines plus movetext, driving the input-move
//! resolver one half-move at a time.

use std::io::BufRead;

use crate::board::{Board, Context, Side};
use crate::io::algebraic::{consume_input_move, PGN_INPUT};
use crate::io::{bump, peek, skip_prefix, skip_whitespace, ParseError};

/// The four PGN game terminations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    WhiteWin,
    BlackWin,
    Draw,
    /// The `*` marker: game unfinished or result unknown.
    InProgress,
}

const RESULT_TOKENS: [(&str, GameResult); 4] = [
    ("1-0", GameResult::WhiteWin),
    ("0-1", GameResult::BlackWin),
    ("1/2-1/2", GameResult::Draw),
    ("*", GameResult::InProgress),
];

/// Parse one `[Name "Value"]` attribute line.
///
/// Returns `Ok(true)` when the line was an attribute (or blank); `Ok(false)`
/// when it is not attribute-shaped and movetext must have started. A line
/// that opens with `[` but breaks the grammar is an error.
pub fn parse_pgn_attribute(
    line: &str,
    on_attribute: &mut impl FnMut(&str, &str),
) -> Result<bool, ParseError> {
    let mut s = line;
    skip_whitespace(&mut s);
    if at_line_end(s) {
        return Ok(true);
    }
    if !skip_prefix(&mut s, "[") {
        return Ok(false);
    }
    skip_whitespace(&mut s);
    let name = take_graphic(&mut s);
    if name.is_empty() {
        return Err(ParseError::BadAttribute {
            detail: "missing attribute name",
        });
    }
    let trimmed = s.trim_start();
    if trimmed.len() == s.len() {
        return Err(ParseError::BadAttribute {
            detail: "missing separator between name and value",
        });
    }
    s = trimmed;
    if !skip_prefix(&mut s, "\"") {
        return Err(ParseError::BadAttribute {
            detail: "missing value opening quote",
        });
    }
    let Some(end) = s.find('"') else {
        return Err(ParseError::BadAttribute {
            detail: "missing value closing quote",
        });
    };
    let value = &s[..end];
    s = &s[end + 1..];
    skip_whitespace(&mut s);
    if !skip_prefix(&mut s, "]") {
        return Err(ParseError::BadAttribute {
            detail: "missing closing tag",
        });
    }
    if !at_line_end(s.trim_start()) {
        return Err(ParseError::BadAttribute {
            detail: "unexpected text after attribute",
        });
    }
    on_attribute(name, value);
    Ok(true)
}

fn at_line_end(s: &str) -> bool {
    s.is_empty() || s.starts_with(';')
}

fn take_graphic<'a>(s: &mut &'a str) -> &'a str {
    let end = s
        .find(|c: char| !c.is_ascii_graphic())
        .unwrap_or(s.len());
    let token = &s[..end];
    *s = &s[end..];
    token
}

struct LineScanner<R> {
    reader: R,
    line: String,
    pos: usize,
    number: u32,
}

impl<R: BufRead> LineScanner<R> {
    fn new(reader: R) -> LineScanner<R> {
        LineScanner {
            reader,
            line: String::new(),
            pos: 0,
            number: 0,
        }
    }

    fn getline(&mut self) -> Result<bool, ParseError> {
        self.line.clear();
        self.pos = 0;
        self.number += 1;
        let read = self
            .reader
            .read_line(&mut self.line)
            .map_err(|_| ParseError::TruncatedInput)?;
        while self.line.ends_with('\n') || self.line.ends_with('\r') {
            self.line.pop();
        }
        Ok(read != 0)
    }

    fn rest(&self) -> &str {
        &self.line[self.pos..]
    }

    fn advance_to(&mut self, remaining_len: usize) {
        self.pos = self.line.len() - remaining_len;
    }

    fn located(&self, cause: ParseError) -> ParseError {
        ParseError::AtLine {
            line: self.number,
            cause: Box::new(cause),
        }
    }
}

/// Skip whitespace, line breaks and `{...}` comments up to the next token.
fn skip_move_separator<R: BufRead>(lines: &mut LineScanner<R>) -> Result<(), ParseError> {
    loop {
        let mut s = lines.rest();
        skip_whitespace(&mut s);
        let ended = at_line_end(s);
        let comment = s.starts_with('{');
        lines.advance_to(s.len());
        if ended {
            if !lines.getline()? {
                return Err(ParseError::TruncatedInput);
            }
            continue;
        }
        if comment {
            loop {
                match lines.rest().find('}') {
                    Some(close) => {
                        let new_len = lines.rest().len() - close - 1;
                        lines.advance_to(new_len);
                        break;
                    }
                    None => {
                        if !lines.getline()? {
                            return Err(ParseError::TruncatedInput);
                        }
                    }
                }
            }
            continue;
        }
        return Ok(());
    }
}

// dollar sign followed by digits, e.g. $7
fn skip_nag(s: &mut &str) {
    if skip_prefix(s, "$") {
        *s = s.trim_start_matches(|c: char| c.is_ascii_digit());
    }
}

fn try_result(s: &mut &str) -> Option<GameResult> {
    for (token, result) in RESULT_TOKENS {
        if skip_prefix(s, token) {
            return Some(result);
        }
    }
    None
}

fn expect_move_number<R: BufRead>(
    lines: &mut LineScanner<R>,
    ctx: &Context,
) -> Result<(), ParseError> {
    let mut s = lines.rest();
    let found = crate::io::scan_number(&mut s)?;
    let (expected, side) = ctx.fullmove_number();
    if found != expected {
        return Err(ParseError::MoveNumberMismatch { expected, found });
    }
    if peek(&s) != Some('.') {
        return Err(ParseError::InvalidCharacter {
            found: peek(&s).unwrap_or(' '),
            expected: "'.' after a move number",
        });
    }
    bump(&mut s)?;
    if side == Side::Black && !skip_prefix(&mut s, "..") {
        return Err(ParseError::InvalidCharacter {
            found: peek(&s).unwrap_or(' '),
            expected: "'..' after a move number for black",
        });
    }
    lines.advance_to(s.len());
    Ok(())
}

/// Replay one PGN game from its attribute section through the result token,
/// reporting every position (the initial one included) to `on_position`.
pub fn replay_pgn<R: BufRead>(
    reader: R,
    mut on_position: impl FnMut(&Board, &Context),
) -> Result<GameResult, ParseError> {
    let mut lines = LineScanner::new(reader);
    let mut board = Board::initial();
    let mut ctx = Context::start();

    let mut more = lines.getline()?;
    while more {
        let mut log_attribute = |name: &str, value: &str| {
            log::trace!("pgn attribute {name}: {value}");
        };
        match parse_pgn_attribute(lines.rest(), &mut log_attribute) {
            Ok(true) => more = lines.getline()?,
            Ok(false) => break,
            Err(cause) => return Err(lines.located(cause)),
        }
    }
    if !more {
        return Err(lines.located(ParseError::TruncatedInput));
    }

    on_position(&board, &ctx);
    loop {
        skip_move_separator(&mut lines).map_err(|cause| lines.located(cause))?;

        let mut s = lines.rest();
        skip_nag(&mut s);
        if s.len() != lines.rest().len() {
            lines.advance_to(s.len());
            continue;
        }
        if let Some(result) = try_result(&mut s) {
            lines.advance_to(s.len());
            log::debug!("pgn game finished after {} plies", ctx.halfmove_count);
            return Ok(result);
        }

        if ctx.side() == Side::White || lines.rest().starts_with(|c: char| c.is_ascii_digit()) {
            expect_move_number(&mut lines, &ctx).map_err(|cause| lines.located(cause))?;
            skip_move_separator(&mut lines).map_err(|cause| lines.located(cause))?;
        }

        let mut s = lines.rest();
        consume_input_move(&mut board, &mut ctx, &mut s, PGN_INPUT)
            .map_err(|cause| lines.located(cause))?;
        lines.advance_to(s.len());
        on_position(&board, &ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::make_canvas;

    #[test]
    fn test_attribute_parsing() {
        let mut seen = Vec::new();
        let mut record = |name: &str, value: &str| seen.push((name.to_string(), value.to_string()));
        assert!(parse_pgn_attribute("[Event \"F/S Return Match\"]", &mut record).unwrap());
        assert!(parse_pgn_attribute("", &mut record).unwrap());
        assert!(parse_pgn_attribute("; a comment line", &mut record).unwrap());
        assert!(!parse_pgn_attribute("1. e4 e5", &mut record).unwrap());
        assert_eq!(seen, vec![("Event".to_string(), "F/S Return Match".to_string())]);
    }

    #[test]
    fn test_attribute_errors() {
        let mut ignore = |_: &str, _: &str| {};
        assert!(parse_pgn_attribute("[Event \"x\"", &mut ignore).is_err());
        assert!(parse_pgn_attribute("[Event x]", &mut ignore).is_err());
        assert!(parse_pgn_attribute("[]", &mut ignore).is_err());
    }

    #[test]
    fn test_replay_scholars_mate() {
        let pgn = "[Event \"test\"]\n\
                   [Result \"1-0\"]\n\
                   \n\
                   1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7# 1-0\n";
        let mut positions = 0;
        let result = replay_pgn(pgn.as_bytes(), |_, _| positions += 1).unwrap();
        assert_eq!(result, GameResult::WhiteWin);
        assert_eq!(positions, 9); // initial plus eight half-moves
    }

    #[test]
    fn test_replay_with_comments_and_nags() {
        let pgn = "1. d4 {queen's pawn\nspanning a line} d5 2. c4 $1 dxc4 *\n";
        let mut last = String::new();
        let result = replay_pgn(pgn.as_bytes(), |board, _| last = make_canvas(board)).unwrap();
        assert_eq!(result, GameResult::InProgress);
        assert_eq!(
            last,
            "rnbqkbnr\n\
             ppp.pppp\n\
             ........\n\
             ........\n\
             ..pP....\n\
             ........\n\
             PP..PPPP\n\
             RNBQKBNR\n"
        );
    }

    #[test]
    fn test_replay_black_continuation() {
        let pgn = "1. e4 e5 2. Nf3 2... Nc6 1/2-1/2\n";
        let result = replay_pgn(pgn.as_bytes(), |_, _| {}).unwrap();
        assert_eq!(result, GameResult::Draw);
    }

    #[test]
    fn test_replay_move_number_mismatch() {
        let pgn = "1. e4 e5 3. Nf3 *\n";
        let err = replay_pgn(pgn.as_bytes(), |_, _| {}).unwrap_err();
        assert!(matches!(
            err,
            ParseError::AtLine { cause, .. }
                if matches!(*cause, ParseError::MoveNumberMismatch { expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_replay_illegal_move_is_located() {
        // the king cannot move onto its own pawn
        let pgn = "1. e4 Ke7 *\n";
        let err = replay_pgn(pgn.as_bytes(), |_, _| {}).unwrap_err();
        assert!(matches!(
            err,
            ParseError::AtLine { line: 1, cause }
                if matches!(*cause, ParseError::InMove { .. })
        ));
    }

    #[test]
    fn test_replay_truncated_game() {
        let pgn = "1. e4 e5\n";
        let err = replay_pgn(pgn.as_bytes(), |_, _| {}).unwrap_err();
        assert!(matches!(
            err,
            ParseError::AtLine { cause, .. } if *cause == ParseError::TruncatedInput
        ));
    }
}
