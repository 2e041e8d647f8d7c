//! Evaluation of literal expressions.
//!
//! Descriptors only ever need the value of string literals and of containers
//! of string literals. Anything computed at runtime evaluates to `None`.

use crate::parser::{AstNode, DictExpr, Expr, SourceFile, StringExpr};

/// Value of a string literal, with implicit concatenation applied.
pub fn string_value(expr: &Expr) -> Option<String> {
    match expr.clone().unparenthesized() {
        Expr::String(string) => Some(string_expr_value(&string)),
        _ => None,
    }
}

pub fn string_expr_value(string: &StringExpr) -> String {
    string.tokens().map(|t| decode_string_token(t.text())).collect()
}

/// Values of a list, tuple or set literal whose elements are all strings.
///
/// Returns `None` for any other shape, including a container holding a
/// single non-string element.
pub fn str_list_value(expr: &Expr) -> Option<Vec<String>> {
    expr.clone()
        .unparenthesized()
        .sequence_elements()?
        .iter()
        .map(string_value)
        .collect()
}

/// String-keyed entries of a dictionary literal, in source order.
///
/// Entries whose key is not a string literal are skipped.
pub fn dict_value(expr: &Expr) -> Option<Vec<(String, Expr)>> {
    match expr.clone().unparenthesized() {
        Expr::Dict(dict) => Some(dict_entries(&dict)),
        _ => None,
    }
}

pub fn dict_entries(dict: &DictExpr) -> Vec<(String, Expr)> {
    dict.entries()
        .filter_map(|entry| {
            let key = string_value(&entry.key()?)?;
            Some((key, entry.value()?))
        })
        .collect()
}

/// First dictionary literal of a file in preorder.
pub fn first_dict_literal(file: &SourceFile) -> Option<DictExpr> {
    file.syntax().descendants().find_map(DictExpr::cast)
}

/// Decode the text of a single string token (prefix and quotes included).
pub fn decode_string_token(text: &str) -> String {
    let prefix_len = text
        .find(|c: char| c == '\'' || c == '"')
        .unwrap_or(text.len());
    let (prefix, quoted) = text.split_at(prefix_len);
    let raw = prefix.contains(['r', 'R']);

    let quote_len = if quoted.starts_with("'''") || quoted.starts_with("\"\"\"") {
        3
    } else {
        1
    };
    let body = if quoted.len() >= 2 * quote_len {
        &quoted[quote_len..quoted.len() - quote_len]
    } else {
        quoted.get(quote_len..).unwrap_or_default()
    };

    if raw {
        body.to_string()
    } else {
        unescape(body)
    }
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0C'),
            'v' => out.push('\x0B'),
            '0'..='7' => {
                let mut value = escaped.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(value));
            }
            'x' | 'u' | 'U' => {
                let width = match escaped {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.clone().take(width).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if digits.len() == width => {
                        out.push(decoded);
                        for _ in 0..width {
                            chars.next();
                        }
                    }
                    _ => {
                        out.push('\\');
                        out.push(escaped);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}
