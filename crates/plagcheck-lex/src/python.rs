use crate::cursor::{is_digit, is_ident_continue, is_ident_start, Cursor};
use plagcheck_types::{PythonKeyword, PythonKind, Span, Token, TokenKind, Warning};

/// Tokenizes Python source. `NEWLINE`/`INDENT`/`DEDENT` are derived from
/// leading-whitespace deltas between logical lines; both are suppressed
/// while an unmatched `(`/`[`/`{` is open or the previous physical line
/// ended in a backslash continuation.
pub(crate) fn tokenize(content: &str) -> (Vec<Token>, Vec<Warning>) {
    let mut cur = Cursor::new(content);
    let mut tokens = Vec::new();
    let mut warnings = Vec::new();
    let mut indents: Vec<u32> = vec![0];
    let mut bracket_depth: i32 = 0;
    let mut at_line_start = true;
    let mut line_has_token = false;

    while !cur.is_eof() {
        if at_line_start && bracket_depth == 0 {
            let is_logical_line = scan_indentation(&mut cur, &mut tokens, &mut indents);
            at_line_start = false;
            if !is_logical_line {
                // blank or comment-only line: no INDENT/DEDENT here, and
                // the `#`/`\n` that stopped us is handled below like any
                // other line content.
                continue;
            }
        }

        let b = match cur.peek() {
            Some(b) => b,
            None => break,
        };

        if b == b' ' || b == b'\t' {
            cur.bump();
            continue;
        }

        if b == b'#' {
            cur.bump_while(|c| c != b'\n');
            continue;
        }

        if b == b'\\' && cur.peek_at(1) == Some(b'\n') {
            cur.bump();
            cur.bump();
            continue;
        }

        if b == b'\n' {
            let start = cur.position();
            cur.bump();
            if bracket_depth == 0 {
                if line_has_token {
                    push(&mut tokens, PythonKind::Newline, start, cur.position());
                }
                at_line_start = true;
                line_has_token = false;
            }
            continue;
        }

        if b == b'"' || b == b'\'' {
            scan_string(&mut cur, &mut tokens, &mut warnings, b);
            line_has_token = true;
            continue;
        }

        if is_digit(b) {
            scan_number(&mut cur, &mut tokens);
            line_has_token = true;
            continue;
        }

        if is_ident_start(b) {
            scan_ident(&mut cur, &mut tokens);
            line_has_token = true;
            continue;
        }

        scan_operator(&mut cur, &mut tokens, &mut warnings, &mut bracket_depth);
        line_has_token = true;
    }

    // Final NEWLINE if the last logical line didn't end with one, then
    // close out any open indentation levels.
    if line_has_token {
        let end = cur.position();
        push(&mut tokens, PythonKind::Newline, end, end);
    }
    let end = cur.position();
    while indents.len() > 1 {
        indents.pop();
        push(&mut tokens, PythonKind::Dedent, end, end);
    }

    (tokens, warnings)
}

/// Consumes leading whitespace on a logical line and emits INDENT/DEDENT
/// as needed. Returns `false` if the line is blank or comment-only (no
/// logical line begins here, so caller should keep scanning without
/// treating this as indentation).
fn scan_indentation(cur: &mut Cursor, tokens: &mut Vec<Token>, indents: &mut Vec<u32>) -> bool {
    let line_start = cur.position();
    let mut width = 0u32;
    loop {
        match cur.peek() {
            Some(b' ') => {
                width += 1;
                cur.bump();
            }
            Some(b'\t') => {
                width += 8 - (width % 8);
                cur.bump();
            }
            _ => break,
        }
    }
    match cur.peek() {
        None | Some(b'\n') | Some(b'#') => return false,
        _ => {}
    }

    let current = *indents.last().unwrap();
    if width > current {
        indents.push(width);
        push(tokens, PythonKind::Indent, line_start, cur.position());
    } else {
        while width < *indents.last().unwrap() {
            indents.pop();
            push(tokens, PythonKind::Dedent, cur.position(), cur.position());
        }
    }
    true
}

fn push(tokens: &mut Vec<Token>, kind: PythonKind, start: (u32, u32), end: (u32, u32)) {
    tokens.push(Token::new(
        TokenKind::Python(kind),
        Span::new(start.0, start.1, end.0, end.1),
    ));
}

fn scan_string(cur: &mut Cursor, tokens: &mut Vec<Token>, warnings: &mut Vec<Warning>, quote: u8) {
    let start = cur.position();
    let triple = cur.peek_at(1) == Some(quote) && cur.peek_at(2) == Some(quote);
    if triple {
        cur.bump();
        cur.bump();
        cur.bump();
        let mut closed = false;
        while !cur.is_eof() {
            if cur.peek() == Some(b'\\') {
                cur.bump();
                cur.bump();
                continue;
            }
            if cur.peek() == Some(quote) && cur.peek_at(1) == Some(quote) && cur.peek_at(2) == Some(quote) {
                cur.bump();
                cur.bump();
                cur.bump();
                closed = true;
                break;
            }
            cur.bump();
        }
        let end = cur.position();
        if !closed {
            warnings.push(Warning::at_position(
                start.0,
                start.1,
                "unterminated triple-quoted string",
            ));
        }
        push(tokens, PythonKind::String, start, end);
        return;
    }

    cur.bump();
    let mut closed = false;
    while let Some(b) = cur.peek() {
        if b == b'\\' {
            cur.bump();
            cur.bump();
            continue;
        }
        if b == quote {
            cur.bump();
            closed = true;
            break;
        }
        if b == b'\n' {
            break;
        }
        cur.bump();
    }
    let end = cur.position();
    if !closed {
        warnings.push(Warning::at_position(
            start.0,
            start.1,
            "unterminated string literal",
        ));
    }
    push(tokens, PythonKind::String, start, end);
}

fn scan_number(cur: &mut Cursor, tokens: &mut Vec<Token>) {
    let start = cur.position();
    cur.bump();
    loop {
        match cur.peek() {
            Some(b) if is_digit(b) || b == b'_' || b == b'.' => {
                cur.bump();
            }
            Some(b'x') | Some(b'X') | Some(b'o') | Some(b'O') | Some(b'b') | Some(b'B') => {
                cur.bump();
            }
            Some(b) if b.is_ascii_hexdigit() => {
                cur.bump();
            }
            Some(b'e') | Some(b'E') => {
                cur.bump();
                if matches!(cur.peek(), Some(b'+') | Some(b'-')) {
                    cur.bump();
                }
            }
            Some(b'j') | Some(b'J') => {
                cur.bump();
                break;
            }
            _ => break,
        }
    }
    let end = cur.position();
    push(tokens, PythonKind::Number, start, end);
}

fn scan_ident(cur: &mut Cursor, tokens: &mut Vec<Token>) {
    let start = cur.position();
    let byte_start = cur.byte_pos();
    cur.bump_while(is_ident_continue);
    let end = cur.position();
    let text = cur.slice_from(byte_start);
    let kind = match PythonKeyword::from_str(text) {
        Some(kw) => PythonKind::Keyword(kw),
        None => PythonKind::Ident,
    };
    push(tokens, kind, start, end);
}

fn scan_operator(
    cur: &mut Cursor,
    tokens: &mut Vec<Token>,
    warnings: &mut Vec<Warning>,
    bracket_depth: &mut i32,
) {
    let start = cur.position();
    let b0 = cur.peek().unwrap();
    let b1 = cur.peek_at(1);
    let b2 = cur.peek_at(2);

    let (kind, len) = match (b0, b1, b2) {
        (b'*', Some(b'*'), Some(b'=')) => (Some(PythonKind::DoubleStarEq), 3),
        (b'/', Some(b'/'), Some(b'=')) => (Some(PythonKind::DoubleSlashEq), 3),
        (b'*', Some(b'*'), _) => (Some(PythonKind::DoubleStar), 2),
        (b'/', Some(b'/'), _) => (Some(PythonKind::DoubleSlash), 2),
        (b'<', Some(b'<'), Some(b'=')) => (Some(PythonKind::ShlEq), 3),
        (b'>', Some(b'>'), Some(b'=')) => (Some(PythonKind::ShrEq), 3),
        (b'<', Some(b'<'), _) => (Some(PythonKind::Shl), 2),
        (b'>', Some(b'>'), _) => (Some(PythonKind::Shr), 2),
        (b'=', Some(b'='), _) => (Some(PythonKind::Eq), 2),
        (b'!', Some(b'='), _) => (Some(PythonKind::Ne), 2),
        (b'<', Some(b'='), _) => (Some(PythonKind::Le), 2),
        (b'>', Some(b'='), _) => (Some(PythonKind::Ge), 2),
        (b'+', Some(b'='), _) => (Some(PythonKind::PlusEq), 2),
        (b'-', Some(b'='), _) => (Some(PythonKind::MinusEq), 2),
        (b'*', Some(b'='), _) => (Some(PythonKind::StarEq), 2),
        (b'/', Some(b'='), _) => (Some(PythonKind::SlashEq), 2),
        (b'%', Some(b'='), _) => (Some(PythonKind::PercentEq), 2),
        (b'&', Some(b'='), _) => (Some(PythonKind::AmpEq), 2),
        (b'|', Some(b'='), _) => (Some(PythonKind::PipeEq), 2),
        (b'^', Some(b'='), _) => (Some(PythonKind::CaretEq), 2),
        (b'@', Some(b'='), _) => (Some(PythonKind::AtEq), 2),
        (b':', Some(b'='), _) => (Some(PythonKind::Walrus), 2),
        (b'-', Some(b'>'), _) => (Some(PythonKind::Arrow), 2),
        (b'.', Some(b'.'), Some(b'.')) => (Some(PythonKind::Ellipsis), 3),
        (b'(', ..) => (Some(PythonKind::LParen), 1),
        (b')', ..) => (Some(PythonKind::RParen), 1),
        (b'[', ..) => (Some(PythonKind::LBracket), 1),
        (b']', ..) => (Some(PythonKind::RBracket), 1),
        (b'{', ..) => (Some(PythonKind::LBrace), 1),
        (b'}', ..) => (Some(PythonKind::RBrace), 1),
        (b',', ..) => (Some(PythonKind::Comma), 1),
        (b':', ..) => (Some(PythonKind::Colon), 1),
        (b'.', ..) => (Some(PythonKind::Dot), 1),
        (b';', ..) => (Some(PythonKind::Semicolon), 1),
        (b'@', ..) => (Some(PythonKind::At), 1),
        (b'+', ..) => (Some(PythonKind::Plus), 1),
        (b'-', ..) => (Some(PythonKind::Minus), 1),
        (b'*', ..) => (Some(PythonKind::Star), 1),
        (b'/', ..) => (Some(PythonKind::Slash), 1),
        (b'%', ..) => (Some(PythonKind::Percent), 1),
        (b'=', ..) => (Some(PythonKind::Assign), 1),
        (b'<', ..) => (Some(PythonKind::Lt), 1),
        (b'>', ..) => (Some(PythonKind::Gt), 1),
        (b'&', ..) => (Some(PythonKind::Amp), 1),
        (b'|', ..) => (Some(PythonKind::Pipe), 1),
        (b'^', ..) => (Some(PythonKind::Caret), 1),
        (b'~', ..) => (Some(PythonKind::Tilde), 1),
        _ => (None, 1),
    };

    match b0 {
        b'(' | b'[' | b'{' => *bracket_depth += 1,
        b')' | b']' | b'}' => *bracket_depth -= 1,
        _ => {}
    }

    for _ in 0..len {
        cur.bump();
    }
    let end = cur.position();

    match kind {
        Some(k) => push(tokens, k, start, end),
        None => {
            warnings.push(Warning::at_position(
                start.0,
                start.1,
                format!("unexpected character '{}'", b0 as char),
            ));
        }
    }
}
