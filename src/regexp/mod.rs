//! Pattern parsing for the DNA-oriented regexp subset.
//!
//! This module turns pattern strings into a tree structure for NFA
//! construction. The grammar, lowest precedence first: alternation (`|`),
//! concatenation, quantified atoms (`*`, `+`, `?`, `{n,m}`), atoms (literal,
//! `.`, class, group, escape, edge anchors).

mod parser;

// Re-export public API
pub use parser::{parse, AnchorKind, Ast, SyntaxError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let ast = parse("ACG").unwrap();
        match ast {
            Ast::Concat(parts) => {
                assert_eq!(parts.len(), 3);
                assert_eq!(parts[0], Ast::Literal(b'A'));
                assert_eq!(parts[2], Ast::Literal(b'G'));
            }
            other => panic!("expected Concat, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_pattern() {
        assert_eq!(parse("").unwrap(), Ast::Empty);
    }

    #[test]
    fn test_parse_alternation() {
        let ast = parse("TAA|TAG|TGA").unwrap();
        match ast {
            Ast::Alternate(branches) => assert_eq!(branches.len(), 3),
            other => panic!("expected Alternate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_char_class() {
        let ast = parse("[ACGT]").unwrap();
        match ast {
            Ast::Class { bytes, negated } => {
                assert_eq!(bytes, b"ACGT".to_vec());
                assert!(!negated);
            }
            other => panic!("expected Class, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_char_range() {
        let ast = parse("[A-D]").unwrap();
        match ast {
            Ast::Class { bytes, .. } => assert_eq!(bytes, b"ABCD".to_vec()),
            other => panic!("expected Class, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_negated_class() {
        let ast = parse("[^AC]").unwrap();
        match ast {
            Ast::Class { bytes, negated } => {
                assert_eq!(bytes, b"AC".to_vec());
                assert!(negated);
            }
            other => panic!("expected Class, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_class_trailing_dash_is_literal() {
        let ast = parse("[A-]").unwrap();
        match ast {
            Ast::Class { bytes, .. } => assert_eq!(bytes, b"-A".to_vec()),
            other => panic!("expected Class, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_dot() {
        let ast = parse("A.G").unwrap();
        match ast {
            Ast::Concat(parts) => assert_eq!(parts[1], Ast::Dot),
            other => panic!("expected Concat, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_quantifiers() {
        assert!(matches!(parse("A*").unwrap(), Ast::Star(_)));
        assert!(matches!(parse("A+").unwrap(), Ast::Plus(_)));
        assert!(matches!(parse("A?").unwrap(), Ast::Optional(_)));
    }

    #[test]
    fn test_parse_bounded_repeat() {
        match parse("T{2,3}").unwrap() {
            Ast::Repeat { min, max, .. } => {
                assert_eq!(min, 2);
                assert_eq!(max, Some(3));
            }
            other => panic!("expected Repeat, got {:?}", other),
        }
        match parse("A{2,}").unwrap() {
            Ast::Repeat { min, max, .. } => {
                assert_eq!(min, 2);
                assert_eq!(max, None);
            }
            other => panic!("expected Repeat, got {:?}", other),
        }
        match parse("G{3}").unwrap() {
            Ast::Repeat { min, max, .. } => {
                assert_eq!(min, 3);
                assert_eq!(max, Some(3));
            }
            other => panic!("expected Repeat, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_group() {
        let ast = parse("(AT|CG)C").unwrap();
        match ast {
            Ast::Concat(parts) => {
                assert_eq!(parts.len(), 2);
                match &parts[0] {
                    Ast::Group(inner) => assert!(matches!(**inner, Ast::Alternate(_))),
                    other => panic!("expected Group, got {:?}", other),
                }
            }
            other => panic!("expected Concat, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_anchors() {
        let ast = parse("^ATG$").unwrap();
        match ast {
            Ast::Concat(parts) => {
                assert_eq!(parts.first(), Some(&Ast::Anchor(AnchorKind::Start)));
                assert_eq!(parts.last(), Some(&Ast::Anchor(AnchorKind::End)));
            }
            other => panic!("expected Concat, got {:?}", other),
        }
        assert_eq!(parse("^").unwrap(), Ast::Anchor(AnchorKind::Start));
        assert_eq!(parse("$").unwrap(), Ast::Anchor(AnchorKind::End));
    }

    #[test]
    fn test_parse_anchor_in_illegal_position() {
        assert!(parse("A^G").is_err());
        assert!(parse("A$G").is_err());
        assert!(parse("(^A)").is_err());
    }

    #[test]
    fn test_parse_quantified_anchor_rejected() {
        assert!(parse("^*A").is_err());
        assert!(parse("^{2}A").is_err());
    }

    #[test]
    fn test_parse_escape() {
        let ast = parse(r"\*").unwrap();
        assert_eq!(ast, Ast::Literal(b'*'));
        assert!(parse("\\").is_err(), "escape at end should fail");
    }

    #[test]
    fn test_parse_literal_brace_leniency() {
        // '{' that opens no well-formed bound is an ordinary literal, as in
        // mainstream engines.
        let ast = parse("T{2,x}").unwrap();
        match ast {
            Ast::Concat(parts) => {
                assert_eq!(parts.len(), 6);
                assert_eq!(parts[1], Ast::Literal(b'{'));
                assert_eq!(parts[5], Ast::Literal(b'}'));
            }
            other => panic!("expected Concat, got {:?}", other),
        }
        // Unterminated bound text is all literal too
        assert!(parse("T{2,3").is_ok());
        // Leading '{' never had an atom to quantify; still a literal
        assert!(parse("{4}").is_ok());
    }

    #[test]
    fn test_parse_invalid_bound_values() {
        let e = parse("T{3,2}").unwrap_err();
        assert!(e.message.contains("min repeat greater than max"), "{}", e);
        assert!(parse("T{99999999999}").is_err());
    }

    #[test]
    fn test_parse_quantifier_without_atom() {
        assert!(parse("*A").is_err());
        assert!(parse("+A").is_err());
        assert!(parse("?A").is_err());
        assert!(parse("(|A)").is_err());
    }

    #[test]
    fn test_parse_empty_alternation_branch() {
        assert!(parse("A|").is_err());
        assert!(parse("|A").is_err());
        assert!(parse("A||G").is_err());
    }

    #[test]
    fn test_parse_unbalanced_groups() {
        let e = parse("(AT").unwrap_err();
        assert_eq!(e.offset, 0);
        assert!(parse("AT)").is_err());
        assert!(parse("((A)").is_err());
    }

    #[test]
    fn test_parse_unclosed_class() {
        let e = parse("[ACG").unwrap_err();
        assert!(e.message.contains("unclosed"), "{}", e);
        assert!(parse("[]").is_err(), "empty class should fail");
    }

    #[test]
    fn test_parse_stacked_quantifiers() {
        // Quantifiers bind to the preceding quantified atom and may stack.
        let ast = parse("A+*").unwrap();
        match ast {
            Ast::Star(inner) => assert!(matches!(*inner, Ast::Plus(_))),
            other => panic!("expected Star(Plus), got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_offsets() {
        let e = parse("AC(G").unwrap_err();
        assert_eq!(e.offset, 2);
        let e = parse("ACG[T").unwrap_err();
        assert_eq!(e.offset, 3);
    }
}
