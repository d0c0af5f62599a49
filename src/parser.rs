use crate::ast::{Command, Direction, SyntaxError, MAXARGS};

/// Whitespace class the tokenizer skips between tokens.
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0b)
}

/// Single-character operators; anything else starts (or continues) a WORD.
fn is_symbol(b: u8) -> bool {
    matches!(b, b'<' | b'|' | b'>' | b';' | b'&')
}

/// One lexical token: a single-char operator, a maximal run of non-operator,
/// non-whitespace bytes (a WORD), or end-of-input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Lt,
    Gt,
    Pipe,
    Semi,
    Amp,
    End,
}

/// Byte-position tokenizer over one input line.
///
/// Mirrors the source's `gettoken`/`peek` pair: `peek` inspects the next
/// non-whitespace byte without consuming it, `gettoken` consumes and
/// classifies the next token.
struct Tokenizer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Tokenizer {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && is_whitespace(self.bytes[self.pos]) {
            self.pos += 1;
        }
    }

    /// The next non-whitespace byte, without consuming it.
    fn peek(&self) -> Option<u8> {
        let mut p = self.pos;
        while p < self.bytes.len() && is_whitespace(self.bytes[p]) {
            p += 1;
        }
        self.bytes.get(p).copied()
    }

    /// True if the next non-whitespace byte is one of `toks`.
    fn peek_in(&self, toks: &[u8]) -> bool {
        matches!(self.peek(), Some(b) if toks.contains(&b))
    }

    /// Consume and return the next token, skipping leading and trailing
    /// whitespace (matching the source's `gettoken`, which also consumes
    /// the whitespace run following the token).
    fn gettoken(&mut self) -> Token {
        self.skip_whitespace();
        let tok = match self.bytes.get(self.pos) {
            None => Token::End,
            Some(b'&') => {
                self.pos += 1;
                Token::Amp
            }
            Some(b';') => {
                self.pos += 1;
                Token::Semi
            }
            Some(b'|') => {
                self.pos += 1;
                Token::Pipe
            }
            Some(b'<') => {
                self.pos += 1;
                Token::Lt
            }
            Some(b'>') => {
                self.pos += 1;
                Token::Gt
            }
            Some(_) => {
                let start = self.pos;
                while self.pos < self.bytes.len()
                    && !is_whitespace(self.bytes[self.pos])
                    && !is_symbol(self.bytes[self.pos])
                {
                    self.pos += 1;
                }
                Token::Word(String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned())
            }
        };
        self.skip_whitespace();
        tok
    }

    /// Everything from the next non-whitespace byte to the end of input,
    /// for the `leftovers: <rest>` diagnostic.
    fn remainder(&mut self) -> &'a str {
        self.skip_whitespace();
        std::str::from_utf8(&self.bytes[self.pos..]).unwrap_or("")
    }
}

/// Parse one input line into a `Command` tree.
///
/// `line ::= list`, per spec.md's grammar; see `parse_list`/`parse_back`/
/// `parse_pipe`/`parse_exec`/`parse_redirs` for the remaining productions.
///
/// The `Leftovers` check below mirrors the source's own defensive
/// `peek(start, end, "")` call after `parseline`: since every byte in the
/// input is classified as whitespace, one of `<|>;&`, or a WORD byte, and
/// every production consumes whatever operator it peeks, a syntactically
/// exhaustive grammar over this alphabet always reaches end-of-input. The
/// check is kept because the source keeps it, and because it is the
/// correct response should that invariant ever stop holding.
pub fn parse(line: &str) -> Result<Command, SyntaxError> {
    let mut t = Tokenizer::new(line);
    let cmd = parse_list(&mut t)?;

    let rest = t.remainder();
    if !rest.is_empty() {
        return Err(SyntaxError::Leftovers(rest.to_string()));
    }
    Ok(cmd)
}

/// True for a bare, redir-free `Exec` with no WORDs — the "nothing was
/// there" shape `parse_exec` returns when it finds an operator (or
/// end-of-input) in operand position. This shape is fine as the whole line
/// (an empty line is a legitimate no-op), but never as the operand beside
/// an explicit operator — `echo |` must be a syntax error, not a pipe into
/// a no-op.
fn is_empty_operand(cmd: &Command) -> bool {
    matches!(cmd, Command::Exec { argv } if argv.is_empty())
}

/// Reject `cmd` if it is an empty operand; otherwise pass it through.
fn require_operand(cmd: Command) -> Result<Command, SyntaxError> {
    if is_empty_operand(&cmd) {
        return Err(SyntaxError::Unexpected);
    }
    Ok(cmd)
}

/// `list ::= back (';' list)?` — right-associative.
fn parse_list(t: &mut Tokenizer) -> Result<Command, SyntaxError> {
    let cmd = parse_back(t)?;
    if t.peek_in(b";") {
        let cmd = require_operand(cmd)?;
        t.gettoken();
        let right = require_operand(parse_list(t)?)?;
        return Ok(Command::List {
            left: Box::new(cmd),
            right: Box::new(right),
        });
    }
    Ok(cmd)
}

/// `back ::= pipe ('&')*` — each trailing `&` wraps the command once more.
fn parse_back(t: &mut Tokenizer) -> Result<Command, SyntaxError> {
    let mut cmd = parse_pipe(t)?;
    while t.peek_in(b"&") {
        let operand = require_operand(cmd)?;
        t.gettoken();
        cmd = Command::Back {
            child: Box::new(operand),
        };
    }
    Ok(cmd)
}

/// `pipe ::= exec ('|' pipe)?` — right-associative.
fn parse_pipe(t: &mut Tokenizer) -> Result<Command, SyntaxError> {
    let cmd = parse_exec(t)?;
    if t.peek_in(b"|") {
        let cmd = require_operand(cmd)?;
        t.gettoken();
        let right = require_operand(parse_pipe(t)?)?;
        return Ok(Command::Pipe {
            left: Box::new(cmd),
            right: Box::new(right),
        });
    }
    Ok(cmd)
}

/// `exec ::= redir* (WORD redir*)*`
///
/// Redirections may appear interleaved with WORDs; each one wraps whatever
/// partial command has been built so far, so the final tree nests `Redir`
/// nodes (outermost = most recently encountered) around a single inner
/// `Exec` regardless of where among the WORDs the operator appeared.
fn parse_exec(t: &mut Tokenizer) -> Result<Command, SyntaxError> {
    let mut argv: Vec<String> = Vec::new();
    let mut redirs: Vec<(Direction, String)> = Vec::new();

    parse_redirs(t, &mut redirs)?;

    loop {
        if t.peek_in(b"|;&") {
            break;
        }
        match t.gettoken() {
            Token::End => break,
            Token::Word(w) => {
                argv.push(w);
                if argv.len() > MAXARGS {
                    return Err(SyntaxError::TooManyArgs);
                }
                parse_redirs(t, &mut redirs)?;
            }
            _ => return Err(SyntaxError::Unexpected),
        }
    }

    let mut cmd = Command::Exec { argv };
    for (direction, path) in redirs {
        cmd = Command::Redir {
            child: Box::new(cmd),
            path,
            direction,
        };
    }
    Ok(cmd)
}

/// `redir ::= ('<' | '>') WORD`, zero or more in sequence.
fn parse_redirs(
    t: &mut Tokenizer,
    redirs: &mut Vec<(Direction, String)>,
) -> Result<(), SyntaxError> {
    while t.peek_in(b"<>") {
        let op = t.gettoken();
        let direction = match op {
            Token::Lt => Direction::In,
            Token::Gt => Direction::Out,
            _ => unreachable!("peek_in guarantees < or >"),
        };
        match t.gettoken() {
            Token::Word(path) => redirs.push((direction, path)),
            _ => return Err(SyntaxError::MissingRedirectionTarget),
        }
    }
    Ok(())
}
