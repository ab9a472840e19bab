use crate::cursor::{is_digit, is_ident_continue, is_ident_start, Cursor};
use plagcheck_types::{JavaKeyword, JavaKind, Span, Token, TokenKind, Warning};

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
            let (start_row, start_col) = cur.position();
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
                    start_row,
                    start_col,
                    "unterminated block comment",
                ));
            }
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

fn push(tokens: &mut Vec<Token>, kind: JavaKind, start: (u32, u32), end: (u32, u32)) {
    tokens.push(Token::new(
        TokenKind::Java(kind),
        Span::new(start.0, start.1, end.0, end.1),
    ));
}

fn scan_string(cur: &mut Cursor, tokens: &mut Vec<Token>, warnings: &mut Vec<Warning>) {
    let start = cur.position();
    cur.bump(); // opening quote
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
    push(tokens, JavaKind::String, start, end);
}

fn scan_char(cur: &mut Cursor, tokens: &mut Vec<Token>, warnings: &mut Vec<Warning>) {
    let start = cur.position();
    cur.bump(); // opening quote
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
    push(tokens, JavaKind::Char, start, end);
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
            Some(b'e') | Some(b'E') | Some(b'p') | Some(b'P') => {
                cur.bump();
                if matches!(cur.peek(), Some(b'+') | Some(b'-')) {
                    cur.bump();
                }
            }
            Some(b'l') | Some(b'L') | Some(b'f') | Some(b'F') | Some(b'd') | Some(b'D') => {
                cur.bump();
                break;
            }
            _ => break,
        }
    }
    let end = cur.position();
    push(tokens, JavaKind::Number, start, end);
}

fn scan_ident(cur: &mut Cursor, tokens: &mut Vec<Token>) {
    let start = cur.position();
    let byte_start = cur.byte_pos();
    cur.bump_while(is_ident_continue);
    let end = cur.position();
    let text = cur.slice_from(byte_start);
    let kind = match JavaKeyword::from_str(text) {
        Some(kw) => JavaKind::Keyword(kw),
        None => JavaKind::Ident,
    };
    push(tokens, kind, start, end);
}

fn scan_operator(cur: &mut Cursor, tokens: &mut Vec<Token>, warnings: &mut Vec<Warning>) {
    let start = cur.position();
    let b0 = cur.peek().unwrap();
    let b1 = cur.peek_at(1);
    let b2 = cur.peek_at(2);
    let b3 = cur.peek_at(3);

    let (kind, len) = match (b0, b1, b2, b3) {
        (b'>', Some(b'>'), Some(b'>'), Some(b'=')) => (Some(JavaKind::UShrEq), 4),
        (b'.', Some(b'.'), Some(b'.'), _) => (Some(JavaKind::Ellipsis), 3),
        (b'>', Some(b'>'), Some(b'>'), _) => (Some(JavaKind::UShr), 3),
        (b'<', Some(b'<'), Some(b'='), _) => (Some(JavaKind::ShlEq), 3),
        (b'>', Some(b'>'), Some(b'='), _) => (Some(JavaKind::ShrEq), 3),
        (b'=', Some(b'='), _, _) => (Some(JavaKind::Eq), 2),
        (b'!', Some(b'='), _, _) => (Some(JavaKind::Ne), 2),
        (b'<', Some(b'='), _, _) => (Some(JavaKind::Le), 2),
        (b'>', Some(b'='), _, _) => (Some(JavaKind::Ge), 2),
        (b'&', Some(b'&'), _, _) => (Some(JavaKind::AndAnd), 2),
        (b'|', Some(b'|'), _, _) => (Some(JavaKind::OrOr), 2),
        (b'+', Some(b'+'), _, _) => (Some(JavaKind::PlusPlus), 2),
        (b'-', Some(b'-'), _, _) => (Some(JavaKind::MinusMinus), 2),
        (b'+', Some(b'='), _, _) => (Some(JavaKind::PlusEq), 2),
        (b'-', Some(b'='), _, _) => (Some(JavaKind::MinusEq), 2),
        (b'*', Some(b'='), _, _) => (Some(JavaKind::StarEq), 2),
        (b'/', Some(b'='), _, _) => (Some(JavaKind::SlashEq), 2),
        (b'%', Some(b'='), _, _) => (Some(JavaKind::PercentEq), 2),
        (b'&', Some(b'='), _, _) => (Some(JavaKind::AmpEq), 2),
        (b'|', Some(b'='), _, _) => (Some(JavaKind::PipeEq), 2),
        (b'^', Some(b'='), _, _) => (Some(JavaKind::CaretEq), 2),
        (b'<', Some(b'<'), _, _) => (Some(JavaKind::Shl), 2),
        (b'>', Some(b'>'), _, _) => (Some(JavaKind::Shr), 2),
        (b':', Some(b':'), _, _) => (Some(JavaKind::DoubleColon), 2),
        (b'-', Some(b'>'), _, _) => (Some(JavaKind::Arrow), 2),
        (b'(', ..) => (Some(JavaKind::LParen), 1),
        (b')', ..) => (Some(JavaKind::RParen), 1),
        (b'{', ..) => (Some(JavaKind::LBrace), 1),
        (b'}', ..) => (Some(JavaKind::RBrace), 1),
        (b'[', ..) => (Some(JavaKind::LBracket), 1),
        (b']', ..) => (Some(JavaKind::RBracket), 1),
        (b';', ..) => (Some(JavaKind::Semicolon), 1),
        (b',', ..) => (Some(JavaKind::Comma), 1),
        (b'.', ..) => (Some(JavaKind::Dot), 1),
        (b':', ..) => (Some(JavaKind::Colon), 1),
        (b'+', ..) => (Some(JavaKind::Plus), 1),
        (b'-', ..) => (Some(JavaKind::Minus), 1),
        (b'*', ..) => (Some(JavaKind::Star), 1),
        (b'/', ..) => (Some(JavaKind::Slash), 1),
        (b'%', ..) => (Some(JavaKind::Percent), 1),
        (b'=', ..) => (Some(JavaKind::Assign), 1),
        (b'<', ..) => (Some(JavaKind::Lt), 1),
        (b'>', ..) => (Some(JavaKind::Gt), 1),
        (b'!', ..) => (Some(JavaKind::Not), 1),
        (b'&', ..) => (Some(JavaKind::Amp), 1),
        (b'|', ..) => (Some(JavaKind::Pipe), 1),
        (b'^', ..) => (Some(JavaKind::Caret), 1),
        (b'~', ..) => (Some(JavaKind::Tilde), 1),
        (b'?', ..) => (Some(JavaKind::Question), 1),
        (b'@', ..) => (Some(JavaKind::Annotation), 1),
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

    fn kinds(src: &str) -> Vec<JavaKind> {
        tokenize(src)
            .0
            .into_iter()
            .map(|t| match t.kind {
                TokenKind::Java(k) => k,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn skips_line_and_block_comments() {
        let (tokens, warnings) = tokenize("// hello\nint x; /* block */ int y;");
        assert!(warnings.is_empty());
        assert_eq!(
            kinds("// hello\nint x;"),
            vec![
                JavaKind::Keyword(JavaKeyword::Int),
                JavaKind::Ident,
                JavaKind::Semicolon
            ]
        );
        assert!(!tokens.is_empty());
    }

    #[test]
    fn keywords_are_not_folded_into_ident() {
        assert_eq!(
            kinds("class Foo"),
            vec![JavaKind::Keyword(JavaKeyword::Class), JavaKind::Ident]
        );
    }

    #[test]
    fn generics_use_lt_gt_not_a_generic_comparison_kind() {
        assert_eq!(
            kinds("List<String> x"),
            vec![
                JavaKind::Ident,
                JavaKind::Lt,
                JavaKind::Ident,
                JavaKind::Gt,
                JavaKind::Ident
            ]
        );
    }

    #[test]
    fn annotation_is_its_own_kind() {
        assert_eq!(
            kinds("@Override"),
            vec![JavaKind::Annotation, JavaKind::Ident]
        );
    }

    #[test]
    fn compound_operators_are_single_tokens() {
        assert_eq!(
            kinds("a == b"),
            vec![JavaKind::Ident, JavaKind::Eq, JavaKind::Ident]
        );
        assert_eq!(
            kinds("a >>>= b"),
            vec![JavaKind::Ident, JavaKind::UShrEq, JavaKind::Ident]
        );
    }

    #[test]
    fn unterminated_string_emits_warning_but_still_tokenizes() {
        let (tokens, warnings) = tokenize("String s = \"abc");
        assert_eq!(warnings.len(), 1);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Java(JavaKind::String)));
    }

    #[test]
    fn string_and_char_literals_fold_content_away() {
        assert_eq!(
            kinds("\"a\\\"b\" 'x'"),
            vec![JavaKind::String, JavaKind::Char]
        );
    }

    #[test]
    fn numeric_literals_of_any_form_become_number() {
        for src in ["42", "3.14", "0x1F", "1e10", "5L", "3.14f"] {
            assert_eq!(kinds(src), vec![JavaKind::Number], "{src}");
        }
    }

    #[test]
    fn stray_character_resyncs_with_a_warning() {
        let (_tokens, warnings) = tokenize("int x = 1 $ 2;");
        assert_eq!(warnings.len(), 1);
    }
}
