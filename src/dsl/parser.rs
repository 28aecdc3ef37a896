//! Parser for impedance expressions.

use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{FastzError, Result};
use crate::impedance::{Composite, ConnectionKind, ElementKind, Impedance, LumpedElement, Subscript};

/// Recursive-descent parser building an [`Impedance`] tree.
///
/// Every `+` or `‖` chain becomes one composite whose children are exactly
/// the chain's operands. A parenthesized group is always a single operand,
/// so a rendered tree reads back with the same nesting.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire expression.
    pub fn parse(&mut self) -> Result<Impedance> {
        let network = self.parse_series()?;
        if self.current.kind != TokenKind::Eof {
            return Err(FastzError::parse(
                self.current.line,
                format!("unexpected token: {:?}", self.current.text),
            ));
        }
        Ok(network)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(FastzError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    // series = parallel { '+' parallel }
    fn parse_series(&mut self) -> Result<Impedance> {
        let mut operands = vec![self.parse_parallel()?];
        while self.current.kind == TokenKind::Plus {
            self.advance()?;
            operands.push(self.parse_parallel()?);
        }
        connect(ConnectionKind::Series, operands)
    }

    // parallel = primary { ('||' | '‖') primary }
    fn parse_parallel(&mut self) -> Result<Impedance> {
        let mut operands = vec![self.parse_primary()?];
        while self.current.kind == TokenKind::Parallel {
            self.advance()?;
            operands.push(self.parse_primary()?);
        }
        connect(ConnectionKind::Parallel, operands)
    }

    // primary = '(' series ')' | IDENT ':' '(' series ')' | element
    fn parse_primary(&mut self) -> Result<Impedance> {
        match self.current.kind {
            TokenKind::OpenParen => self.parse_group(),
            TokenKind::Identifier => {
                let designator = self.expect(TokenKind::Identifier)?;
                if self.current.kind == TokenKind::Colon {
                    self.advance()?;
                    self.parse_labeled_group(&designator)
                } else {
                    self.parse_element(&designator)
                }
            }
            _ => Err(FastzError::parse(
                self.current.line,
                format!("expected an element or '(', got {:?}", self.current.text),
            )),
        }
    }

    fn parse_group(&mut self) -> Result<Impedance> {
        self.expect(TokenKind::OpenParen)?;
        let network = self.parse_series()?;
        self.expect(TokenKind::CloseParen)?;
        Ok(network)
    }

    fn parse_labeled_group(&mut self, designator: &Token) -> Result<Impedance> {
        let subscript = designator
            .text
            .strip_prefix(ConnectionKind::PREFIX)
            .ok_or_else(|| {
                FastzError::parse(
                    designator.line,
                    format!("composite label '{}' must start with 'Z'", designator.text),
                )
            })?;
        let network = self.parse_group()?;
        match network {
            Impedance::Composite(_) => Ok(network.with_subscript(parse_subscript(subscript))),
            Impedance::Element(_) => Err(FastzError::parse(
                designator.line,
                format!("'{}' labels a single element, not a connection", designator.text),
            )),
        }
    }

    // element = IDENT [ '[' NUMBER [UNIT] ']' ]
    fn parse_element(&mut self, designator: &Token) -> Result<Impedance> {
        let mut chars = designator.text.chars();
        let kind = chars.next().and_then(ElementKind::from_prefix).ok_or_else(|| {
            FastzError::parse(
                designator.line,
                format!("unknown element '{}' (expected R, L or C)", designator.text),
            )
        })?;
        let subscript = parse_subscript(chars.as_str());

        let mut value = None;
        if self.current.kind == TokenKind::OpenBracket {
            self.advance()?;
            let number = self.expect(TokenKind::Number)?;
            value = Some(number.text.parse::<f64>().map_err(|e| {
                FastzError::parse(number.line, format!("invalid value '{}': {}", number.text, e))
            })?);
            if self.current.kind == TokenKind::Identifier {
                let unit = self.expect(TokenKind::Identifier)?;
                if unit.text != kind.unit() {
                    return Err(FastzError::parse(
                        unit.line,
                        format!(
                            "unit '{}' does not match {} '{}' (expected '{}')",
                            unit.text,
                            kind,
                            designator.text,
                            kind.unit()
                        ),
                    ));
                }
            }
            self.expect(TokenKind::CloseBracket)?;
        }

        Ok(Impedance::Element(LumpedElement::new(kind, subscript, value)))
    }
}

/// A lone operand stays as it is; two or more form a composite.
fn connect(kind: ConnectionKind, mut operands: Vec<Impedance>) -> Result<Impedance> {
    if operands.len() == 1 {
        return Ok(operands.swap_remove(0));
    }
    Ok(Impedance::Composite(Composite::new(kind, operands)?))
}

/// Subscripts in canonical integer form (`7`, `-1`) become integer
/// subscripts. Anything else, including `01`, stays text.
fn parse_subscript(text: &str) -> Subscript {
    match text.parse::<i64>() {
        Ok(n) if n.to_string() == text => Subscript::Index(n),
        _ => Subscript::from(text),
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;
    use crate::impedance::{NodeKind, Overrides};
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_element() {
        let z = parse("La[100e-9H]").unwrap();
        assert_eq!(z.label(), "La");
        match z {
            Impedance::Element(e) => {
                assert_eq!(e.kind, ElementKind::Inductor);
                assert_eq!(e.value(), Some(100e-9));
            }
            other => panic!("expected element, got {other}"),
        }
        assert_eq!(parse("R[10]").unwrap(), Impedance::resistor("", Some(10.0)));
        assert_eq!(parse("C7").unwrap().subscript(), &Subscript::Index(7));
    }

    #[test]
    fn test_parallel_binds_tighter() {
        let z = parse("R || C + L").unwrap();
        assert_eq!(z.kind(), NodeKind::Connection(ConnectionKind::Series));
        assert_eq!(z.children().len(), 2);
        assert_eq!(z.children()[0].kind(), NodeKind::Connection(ConnectionKind::Parallel));
    }

    #[test]
    fn test_chain_is_one_composite() {
        let z = parse("R1 + L1 + C1").unwrap();
        assert_eq!(z.children().len(), 3);
        assert_eq!(
            z,
            Impedance::resistor(1, None)
                .series(Impedance::inductor(1, None))
                .unwrap()
                .series(Impedance::capacitor(1, None))
                .unwrap()
        );
    }

    #[test]
    fn test_groups_stay_nested() {
        let z = parse("R1 + L1 + C1 + (R2 + L2)").unwrap();
        assert_eq!(z.children().len(), 4);
        assert_eq!(z.children()[3].children().len(), 2);

        let z = parse("(Zs:(R + L) + C)").unwrap();
        assert_eq!(z.label(), "Z");
        assert_eq!(z.children().len(), 2);
        assert_eq!(z.subz("Zs").unwrap().children().len(), 2);
    }

    #[test]
    fn test_same_kind_children_parse_back() {
        let leaf = |kind: ElementKind, value: f64| Impedance::Element(LumpedElement::new(kind, "", Some(value)));
        let zs = Composite::series(vec![
            leaf(ElementKind::Resistor, 1.0),
            leaf(ElementKind::Inductor, 1e-6),
        ])
        .unwrap();
        let first = Impedance::from(zs.clone()).with_subscript("s");
        let last = Impedance::from(zs);
        let z = Impedance::from(
            Composite::series(vec![first, leaf(ElementKind::Capacitor, 1e-9), last]).unwrap(),
        );
        assert_eq!(z.to_string(), "(Zs:(R[1Ω] + L[1e-6H]) + C[1e-9F] + (R[1Ω] + L[1e-6H]))");

        let reparsed = parse(&z.to_string()).unwrap();
        assert_eq!(reparsed, z);
        let none = Overrides::new();
        let (a, b) = (
            z.subz("Zs").unwrap().evaluate(1e6, &none).unwrap(),
            reparsed.subz("Zs").unwrap().evaluate(1e6, &none).unwrap(),
        );
        assert_relative_eq!(a.re, b.re);
        assert_relative_eq!(a.im, b.im);
    }

    #[test]
    fn test_subscript_forms() {
        assert_eq!(parse("R7").unwrap().subscript(), &Subscript::Index(7));
        assert_eq!(parse("R01").unwrap().subscript(), &Subscript::from("01"));
        assert_eq!(parse("R01").unwrap().label(), "R01");
        assert_eq!(parse("R-1[10Ω]").unwrap().subscript(), &Subscript::Index(-1));
        let z = parse("Z-2:(R-1[10Ω] + C[1e-9F])").unwrap();
        assert_eq!(z.label(), "Z-2");
        assert!(z.subz("R-1").is_ok());
    }

    #[test]
    fn test_labeled_groups() {
        let z = parse("Z1:(Zp:(R[10] ‖ C[0.2e-9] ‖ La[100e-9]) + Lb[5e-9])").unwrap();
        assert_eq!(z.label(), "Z1");
        assert_eq!(z.subz("Zp").unwrap().children().len(), 3);
        let value = z.evaluate(10e6, &Overrides::new()).unwrap();
        assert!(value.is_finite());
    }

    #[test]
    fn test_rendering_parses_back() {
        let z = Impedance::resistor("", Some(10.0))
            .parallel(Impedance::capacitor("", Some(0.2e-9)))
            .unwrap()
            .parallel(Impedance::inductor("a", Some(100e-9)))
            .unwrap()
            .with_subscript("p")
            .series(Impedance::inductor("b", Some(5e-9)))
            .unwrap()
            .with_subscript(1);
        let reparsed = parse(&z.to_string()).unwrap();
        assert_eq!(reparsed, z);
        let none = Overrides::new();
        let (a, b) = (z.evaluate(1e7, &none).unwrap(), reparsed.evaluate(1e7, &none).unwrap());
        assert_relative_eq!(a.re, b.re);
        assert_relative_eq!(a.im, b.im);
    }

    #[test]
    fn test_parse_errors() {
        for input in ["", "R +", "(R + L", "X1", "Zp:(R)", "Rp:(R + L)", "R[10H]", "R[]", "R L"] {
            assert!(
                matches!(parse(input), Err(FastzError::Parse { .. })),
                "{input:?} should fail to parse"
            );
        }
        assert!(matches!(parse("R + C\n+ ?"), Err(FastzError::Lexer { line: 2, .. })));
        assert!(matches!(parse("R"), Ok(Impedance::Element(_))));
    }

    #[test]
    fn test_parenthesized_element() {
        assert!(matches!(parse("(R)"), Ok(Impedance::Element(_))));
    }
}
