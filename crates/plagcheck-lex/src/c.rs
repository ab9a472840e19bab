use crate::cursor::{is_digit, is_ident_continue, is_ident_start, Cursor};
use plagcheck_types::{CKeyword, CKind, Span, Token, TokenKind, Warning};

pub(crate) fn tokenize(content: &str) -> (Vec<Token>, Vec<Warning>) {
    let mut cur = Cursor::new(content);
    let mut tokens = Vec::new();
    let mut warnings = Vec::new();

    while !cur.is_eof() {
        let b = cur.peek().unwrap();

        if b.is_ascii_whitespace() {
            cur.bump();
            continue;
        }

        if b == b'/' && cur.peek_at(1) == Some(b'/') {
            cur.bump_while(|c| c != b'\n');
            continue;
        }

        if b == b'/' && cur.peek_at(1) == Some(b'*') {
            let start = cur.position();
            cur.bump();
            cur.bump();
            let mut closed = false;
            while !cur.is_eof() {
                if cur.peek() == Some(b'*') && cur.peek_at(1) == Some(b'/') {
                    cur.bump();
                    cur.bump();
                    closed = true;
                    break;
                }
                cur.bump();
            }
            if !closed {
                warnings.push(Warning::at_position(
                    start.0,
                    start.1,
                    "unterminated block comment",
                ));
            }
            continue;
        }

        if b == b'#' {
            scan_preprocessor_directive(&mut cur, &mut tokens);
            continue;
        }

        if b == b'"' {
            scan_string(&mut cur, &mut tokens, &mut warnings);
            continue;
        }

        if b == b'\'' {
            scan_char(&mut cur, &mut tokens, &mut warnings);
            continue;
        }

        if is_digit(b) {
            scan_number(&mut cur, &mut tokens);
            continue;
        }

        if is_ident_start(b) {
            scan_ident(&mut cur, &mut tokens);
            continue;
        }

        scan_operator(&mut cur, &mut tokens, &mut warnings);
    }

    (tokens, warnings)
}

fn push(tokens: &mut Vec<Token>, kind: CKind, start: (u32, u32), end: (u32, u32)) {
    tokens.push(Token::new(
        TokenKind::C(kind),
        Span::new(start.0, start.1, end.0, end.1),
    ));
}

/// Consumes a `#...` directive through end-of-line, honoring
/// backslash-newline continuation, and emits a single `PPDIR` token with
/// its content discarded.
fn scan_preprocessor_directive(cur: &mut Cursor, tokens: &mut Vec<Token>) {
    let start = cur.position();
    cur.bump(); // '#'
    loop {
        match cur.peek() {
            None => break,
            Some(b'\\') if cur.peek_at(1) == Some(b'\n') => {
                cur.bump();
                cur.bump();
            }
            Some(b'\n') => break,
            Some(_) => {
                cur.bump();
            }
        }
    }
    let end = cur.position();
    push(tokens, CKind::PpDir, start, end);
}

fn scan_string(cur: &mut Cursor, tokens: &mut Vec<Token>, warnings: &mut Vec<Warning>) {
    let start = cur.position();
    cur.bump();
    let mut closed = false;
    while let Some(b) = cur.peek() {
        if b == b'\\' {
            cur.bump();
            cur.bump();
            continue;
        }
        if b == b'"' {
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
    push(tokens, CKind::String, start, end);
}

fn scan_char(cur: &mut Cursor, tokens: &mut Vec<Token>, warnings: &mut Vec<Warning>) {
    let start = cur.position();
    cur.bump();
    let mut closed = false;
    while let Some(b) = cur.peek() {
        if b == b'\\' {
            cur.bump();
            cur.bump();
            continue;
        }
        if b == b'\'' {
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
            "unterminated char literal",
        ));
    }
    push(tokens, CKind::Char, start, end);
}

fn scan_number(cur: &mut Cursor, tokens: &mut Vec<Token>) {
    let start = cur.position();
    cur.bump();
    loop {
        match cur.peek() {
            Some(b) if is_digit(b) || b == b'\'' || b == b'.' => {
                cur.bump();
            }
            Some(b'x') | Some(b'X') | Some(b'b') | Some(b'B') => {
                cur.bump();
            }
            Some(b) if b.is_ascii_hexdigit() => {
                cur.bump();
            }
            Some(b'e') | Some(b'E') | Some(b'p') | Some(b'P') => {
                cur.bump();
                if matches!(cur.peek(), Some(b'+') | Some(b'-')) {
                    cur.bump();
                }
            }
            Some(b'u') | Some(b'U') | Some(b'l') | Some(b'L') | Some(b'f') | Some(b'F') => {
                cur.bump();
            }
            _ => break,
        }
    }
    let end = cur.position();
    push(tokens, CKind::Number, start, end);
}

fn scan_ident(cur: &mut Cursor, tokens: &mut Vec<Token>) {
    let start = cur.position();
    let byte_start = cur.byte_pos();
    cur.bump_while(is_ident_continue);
    let end = cur.position();
    let text = cur.slice_from(byte_start);
    let kind = match CKeyword::from_str(text) {
        Some(kw) => CKind::Keyword(kw),
        None => CKind::Ident,
    };
    push(tokens, kind, start, end);
}

fn scan_operator(cur: &mut Cursor, tokens: &mut Vec<Token>, warnings: &mut Vec<Warning>) {
    let start = cur.position();
    let b0 = cur.peek().unwrap();
    let b1 = cur.peek_at(1);
    let b2 = cur.peek_at(2);

    let (kind, len) = match (b0, b1, b2) {
        (b'.', Some(b'.'), Some(b'.')) => (Some(CKind::Ellipsis), 3),
        (b'<', Some(b'<'), Some(b'=')) => (Some(CKind::ShlEq), 3),
        (b'>', Some(b'>'), Some(b'=')) => (Some(CKind::ShrEq), 3),
        (b'-', Some(b'>'), _) => (Some(CKind::Arrow), 2),
        (b'+', Some(b'+'), _) => (Some(CKind::PlusPlus), 2),
        (b'-', Some(b'-'), _) => (Some(CKind::MinusMinus), 2),
        (b'<', Some(b'<'), _) => (Some(CKind::Shl), 2),
        (b'>', Some(b'>'), _) => (Some(CKind::Shr), 2),
        (b'&', Some(b'&'), _) => (Some(CKind::AndAnd), 2),
        (b'|', Some(b'|'), _) => (Some(CKind::OrOr), 2),
        (b'=', Some(b'='), _) => (Some(CKind::Eq), 2),
        (b'!', Some(b'='), _) => (Some(CKind::Ne), 2),
        (b'<', Some(b'='), _) => (Some(CKind::Le), 2),
        (b'>', Some(b'='), _) => (Some(CKind::Ge), 2),
        (b'+', Some(b'='), _) => (Some(CKind::PlusEq), 2),
        (b'-', Some(b'='), _) => (Some(CKind::MinusEq), 2),
        (b'*', Some(b'='), _) => (Some(CKind::StarEq), 2),
        (b'/', Some(b'='), _) => (Some(CKind::SlashEq), 2),
        (b'%', Some(b'='), _) => (Some(CKind::PercentEq), 2),
        (b'&', Some(b'='), _) => (Some(CKind::AmpEq), 2),
        (b'|', Some(b'='), _) => (Some(CKind::PipeEq), 2),
        (b'^', Some(b'='), _) => (Some(CKind::CaretEq), 2),
        (b'(', ..) => (Some(CKind::LParen), 1),
        (b')', ..) => (Some(CKind::RParen), 1),
        (b'{', ..) => (Some(CKind::LBrace), 1),
        (b'}', ..) => (Some(CKind::RBrace), 1),
        (b'[', ..) => (Some(CKind::LBracket), 1),
        (b']', ..) => (Some(CKind::RBracket), 1),
        (b';', ..) => (Some(CKind::Semicolon), 1),
        (b',', ..) => (Some(CKind::Comma), 1),
        (b'.', ..) => (Some(CKind::Dot), 1),
        (b'?', ..) => (Some(CKind::Question), 1),
        (b':', ..) => (Some(CKind::Colon), 1),
        (b'+', ..) => (Some(CKind::Plus), 1),
        (b'-', ..) => (Some(CKind::Minus), 1),
        (b'*', ..) => (Some(CKind::Star), 1),
        (b'/', ..) => (Some(CKind::Slash), 1),
        (b'%', ..) => (Some(CKind::Percent), 1),
        (b'=', ..) => (Some(CKind::Assign), 1),
        (b'<', ..) => (Some(CKind::Lt), 1),
        (b'>', ..) => (Some(CKind::Gt), 1),
        (b'!', ..) => (Some(CKind::Not), 1),
        (b'&', ..) => (Some(CKind::Amp), 1),
        (b'|', ..) => (Some(CKind::Pipe), 1),
        (b'^', ..) => (Some(CKind::Caret), 1),
        (b'~', ..) => (Some(CKind::Tilde), 1),
        _ => (None, 1),
    };

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

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<CKind> {
        tokenize(src)
            .0
            .into_iter()
            .map(|t| match t.kind {
                TokenKind::C(k) => k,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn preprocessor_directive_becomes_a_single_token() {
        assert_eq!(
            kinds("#include <stdio.h>\nint main() {}"),
            vec![
                CKind::PpDir,
                CKind::Keyword(CKeyword::Int),
                CKind::Ident,
                CKind::LParen,
                CKind::RParen,
                CKind::LBrace,
                CKind::RBrace,
            ]
        );
    }

    #[test]
    fn preprocessor_directive_honors_backslash_continuation() {
        let k = kinds("#define FOO(x) \\\n  ((x) + 1)\nint y;");
        assert_eq!(
            k,
            vec![
                CKind::PpDir,
                CKind::Keyword(CKeyword::Int),
                CKind::Ident,
                CKind::Semicolon,
            ]
        );
    }

    #[test]
    fn keywords_are_not_folded_into_ident() {
        assert_eq!(
            kinds("struct Foo"),
            vec![CKind::Keyword(CKeyword::Struct), CKind::Ident]
        );
    }

    #[test]
    fn compound_operators_are_single_tokens() {
        assert_eq!(
            kinds("a -> b"),
            vec![CKind::Ident, CKind::Arrow, CKind::Ident]
        );
        assert_eq!(
            kinds("a <<= b"),
            vec![CKind::Ident, CKind::ShlEq, CKind::Ident]
        );
    }

    #[test]
    fn string_and_char_literals_fold_content_away() {
        assert_eq!(
            kinds("\"a\\\"b\" 'x'"),
            vec![CKind::String, CKind::Char]
        );
    }

    #[test]
    fn block_comment_spanning_lines_is_skipped_entirely() {
        let k = kinds("int x; /* multi\nline\ncomment */ int y;");
        assert_eq!(
            k,
            vec![
                CKind::Keyword(CKeyword::Int),
                CKind::Ident,
                CKind::Semicolon,
                CKind::Keyword(CKeyword::Int),
                CKind::Ident,
                CKind::Semicolon,
            ]
        );
    }

    #[test]
    fn stray_character_resyncs_with_a_warning() {
        let (_tokens, warnings) = tokenize("int x = 1 ` 2;");
        assert_eq!(warnings.len(), 1);
    }
}
