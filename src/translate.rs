// SPDX: CC0-1.0

use crate::scan::{Scanner, SegTyp, FREE_VAR};

/// Namespace the page evaluates function and constant names against.
pub const QUALIFIER: &str = "Math.";

/// Uppercase letters that never become sliders.
pub const RESERVED: [char; 2] = ['E', FREE_VAR];

/// Members of the browser `Math` namespace, lowercased. Used only for the
/// advisory hints; translation itself never checks names.
pub const MATH_NAMES: &[&str] = &[
    "abs", "acos", "acosh", "asin", "asinh", "atan", "atan2", "atanh", "cbrt",
    "ceil", "cos", "cosh", "e", "exp", "expm1", "floor", "hypot", "ln10",
    "ln2", "log", "log10", "log2", "max", "min", "pi", "pow", "random",
    "round", "sign", "sin", "sinh", "sqrt", "sqrt1_2", "sqrt2", "tan", "tanh",
    "trunc",
];

fn rewrite(expr: &str, free: &str) -> String {
    let mut out = String::with_capacity(expr.len() + 16);
    for seg in Scanner::new(expr) {
        match seg.typ {
            SegTyp::Call => {
                out.push_str(QUALIFIER);
                out.push_str(seg.text);
            }
            SegTyp::Name => {
                out.push_str(QUALIFIER);
                out.extend(seg.text.chars().map(|c| c.to_ascii_uppercase()));
            }
            SegTyp::Free => out.push_str(free),
            SegTyp::Qualified | SegTyp::Upper | SegTyp::Text => out.push_str(seg.text),
        }
    }
    out
}

/// Browser-side form: element-wise over the sample buffer.
pub fn translate(expr: &str) -> String {
    rewrite(expr, "X[i]")
}

/// Human-readable normalized form, printed as `f(X) = ...`.
pub fn display(expr: &str) -> String {
    rewrite(expr, "X")
}

/// Slider-controlled variables in order of first appearance.
pub fn parameters(expr: &str) -> Vec<char> {
    let mut vars = Vec::new();
    for chr in expr.chars() {
        if chr.is_ascii_uppercase() && !RESERVED.contains(&chr) && !vars.contains(&chr) {
            vars.push(chr);
        }
    }
    vars
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unknown {
    pub name: String,
    pub hint: Option<&'static str>,
}

/// Names the translator qualified that the browser will not actually find
/// in `Math`. The page is generated regardless; these are notes only.
pub fn unknown_names(expr: &str) -> Vec<Unknown> {
    let mut ret: Vec<Unknown> = Vec::new();
    for seg in Scanner::new(expr) {
        if !matches!(seg.typ, SegTyp::Call | SegTyp::Name) {
            continue;
        }
        if MATH_NAMES.contains(&seg.text) {
            continue;
        }
        if ret.iter().any(|u| u.name == seg.text) {
            continue;
        }

        let most_similar = MATH_NAMES
            .iter()
            .map(|known| (strsim::normalized_damerau_levenshtein(seg.text, known), known))
            .reduce(|(acc_sim, acc_name), (elem_sim, elem_name)| {
                if elem_sim > acc_sim {
                    (elem_sim, elem_name)
                } else {
                    (acc_sim, acc_name)
                }
            });
        let hint = match most_similar {
            Some((sim, name)) if sim > 0.3 => Some(*name),
            _ => None,
        };
        ret.push(Unknown {
            name: seg.text.to_string(),
            hint,
        });
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifies_calls_and_substitutes_the_free_variable() {
        assert_eq!(translate("sin(X)*A"), "Math.sin(X[i])*A");
        assert_eq!(translate("log(X)+pi"), "Math.log(X[i])+Math.PI");
    }

    #[test]
    fn every_occurrence_of_the_free_variable_is_rewritten() {
        assert_eq!(
            translate("sqrt(A**2-X**2)+X"),
            "Math.sqrt(A**2-X[i]**2)+X[i]"
        );
    }

    #[test]
    fn constants_are_uppercased_behind_the_qualifier() {
        assert_eq!(translate("e**X"), "Math.E**X[i]");
        assert_eq!(translate("tau*X"), "Math.TAU*X[i]");
    }

    #[test]
    fn qualification_is_idempotent() {
        assert_eq!(translate("Math.sin(X)"), "Math.sin(X[i])");
        assert_eq!(translate("Math.PI+pi"), "Math.PI+Math.PI");
    }

    #[test]
    fn parameters_are_untouched() {
        assert_eq!(translate("A*X+B"), "A*X[i]+B");
    }

    #[test]
    fn display_form_keeps_the_free_variable_bare() {
        assert_eq!(display("sin(X)*A"), "Math.sin(X)*A");
    }

    #[test]
    fn variable_set_ordered_and_distinct() {
        assert_eq!(parameters("A*sin(X)+A+B"), vec!['A', 'B']);
        assert_eq!(parameters("B+A"), vec!['B', 'A']);
        // E and X never count
        assert_eq!(parameters("E*X"), Vec::<char>::new());
    }

    #[test]
    fn known_names_produce_no_notes() {
        assert!(unknown_names("sin(X)*A+pi").is_empty());
    }

    #[test]
    fn near_misses_get_a_hint() {
        let notes = unknown_names("sine(X)*A");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].name, "sine");
        assert_eq!(notes[0].hint, Some("sin"));
    }

    #[test]
    fn repeated_unknowns_collapse() {
        let notes = unknown_names("foo(X)+foo(X)");
        assert_eq!(notes.len(), 1);
    }
}
