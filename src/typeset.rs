// SPDX: CC0-1.0

use crate::scan::{Scanner, SegTyp};

// function names KaTeX has a control sequence for
const NAMED_CALLS: &[(&str, &str)] = &[
    ("arccos", "\\arccos"),
    ("arcsin", "\\arcsin"),
    ("arctan", "\\arctan"),
    ("cos", "\\cos"),
    ("cosh", "\\cosh"),
    ("cot", "\\cot"),
    ("csc", "\\csc"),
    ("exp", "\\exp"),
    ("ln", "\\ln"),
    ("log", "\\log"),
    ("max", "\\max"),
    ("min", "\\min"),
    ("sec", "\\sec"),
    ("sin", "\\sin"),
    ("sinh", "\\sinh"),
    ("tan", "\\tan"),
    ("tanh", "\\tanh"),
];

const NAMED_CONSTS: &[(&str, &str)] = &[("e", "e"), ("pi", "\\pi"), ("tau", "\\tau")];

fn lookup(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, tex)| *tex)
}

/// KaTeX source for the plot label. Segment-for-segment mapping, no
/// symbolic rewriting: exponents and radicands get braced, `*` becomes
/// `\cdot`, everything else passes through.
pub fn latex(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() * 2);
    let mut depth = 0usize;
    // paren depths whose closing `)` also closes a `^{...}`/`\sqrt{...}` group
    let mut group_ends: Vec<usize> = Vec::new();
    // the next unit (digit run, paren group, or segment) gets braced
    let mut group_next = false;

    for seg in Scanner::new(expr) {
        match seg.typ {
            SegTyp::Text => {
                let mut chars = seg.text.chars().peekable();
                while let Some(chr) = chars.next() {
                    match chr {
                        '*' if chars.peek() == Some(&'*') => {
                            chars.next();
                            out.push('^');
                            group_next = true;
                        }
                        '^' => {
                            out.push('^');
                            group_next = true;
                        }
                        '0'..='9' if group_next => {
                            out.push('{');
                            out.push(chr);
                            while let Some(&c) = chars.peek() {
                                if c.is_ascii_digit() {
                                    out.push(c);
                                    chars.next();
                                } else {
                                    break;
                                }
                            }
                            out.push('}');
                            group_next = false;
                        }
                        '*' => out.push_str("\\cdot "),
                        '%' => out.push_str("\\bmod "),
                        '(' => {
                            if group_next {
                                out.push('{');
                                group_ends.push(depth);
                                group_next = false;
                            }
                            out.push('(');
                            depth += 1;
                        }
                        ')' => {
                            depth = depth.saturating_sub(1);
                            out.push(')');
                            if group_ends.last() == Some(&depth) {
                                group_ends.pop();
                                out.push('}');
                            }
                        }
                        _ => out.push(chr),
                    }
                }
            }

            SegTyp::Call | SegTyp::Name | SegTyp::Free | SegTyp::Upper | SegTyp::Qualified => {
                let piece = match seg.typ {
                    SegTyp::Call if seg.text == "sqrt" => String::from("\\sqrt"),
                    SegTyp::Call => match lookup(NAMED_CALLS, seg.text) {
                        Some(tex) => String::from(tex),
                        None => format!("\\operatorname{{{}}}", seg.text),
                    },
                    SegTyp::Name => match lookup(NAMED_CONSTS, seg.text) {
                        Some(tex) => String::from(tex),
                        None => format!("\\mathrm{{{}}}", seg.text),
                    },
                    _ => String::from(seg.text),
                };

                if group_next {
                    out.push('{');
                    out.push_str(&piece);
                    out.push('}');
                    group_next = false;
                } else {
                    out.push_str(&piece);
                }

                if seg.typ == SegTyp::Call && seg.text == "sqrt" {
                    // brace the radicand so the radical spans it
                    group_next = true;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_functions_get_control_sequences() {
        assert_eq!(latex("sin(X*A+B)*C+D"), "\\sin(X\\cdot A+B)\\cdot C+D");
        assert_eq!(latex("tan(X)*A"), "\\tan(X)\\cdot A");
    }

    #[test]
    fn unknown_calls_fall_back_to_operatorname() {
        assert_eq!(latex("foo(X)"), "\\operatorname{foo}(X)");
    }

    #[test]
    fn exponents_are_braced() {
        assert_eq!(latex("X**2+pi"), "X^{2}+\\pi");
        assert_eq!(latex("X**10"), "X^{10}");
        assert_eq!(latex("e**A"), "e^{A}");
    }

    #[test]
    fn exponent_groups_close_with_their_paren() {
        assert_eq!(
            latex("A/(1+e**(-1*B*(X-C)))"),
            "A/(1+e^{(-1\\cdot B\\cdot (X-C))})"
        );
    }

    #[test]
    fn sqrt_radicand_is_braced() {
        assert_eq!(latex("sqrt(A**2-X**2)"), "\\sqrt{(A^{2}-X^{2})}");
    }

    #[test]
    fn modulo_and_factorial() {
        assert_eq!(latex("X%2"), "X\\bmod 2");
        assert_eq!(latex("X!"), "X!");
    }
}
