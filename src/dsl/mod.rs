//! Textual impedance expressions.
//!
//! The expression language is the same notation that [`Impedance`] renders
//! itself in, so a printed network can be read back in.
//!
//! # Grammar Overview
//!
//! ```text
//! series    = parallel { '+' parallel }
//! parallel  = primary { ('||' | '‖') primary }
//! primary   = '(' series ')' | label ':' '(' series ')' | element
//! label     = 'Z' subscript
//! element   = ('R' | 'L' | 'C') subscript [ '[' number [unit] ']' ]
//! unit      = 'Ω' | 'H' | 'F'          (must match the element)
//! number    = ['-'] digit* ['.' digit*] [('e'|'E') ['-'|'+'] digit+]
//! ```
//!
//! Parallel binds tighter than series. Each `+` or `‖` chain is one
//! composite and every parenthesized group is one of its children, so
//! `R + (L + C)` keeps the inner series as a child.
//!
//! Subscripts written as a canonical integer (`7`, or `-1` directly after
//! the prefix) are integer subscripts; anything else, such as `01`, is
//! text. Numbers are plain SI values; there are no unit prefixes. `#`
//! starts a comment that runs to the end of the line.
//!
//! # Example
//!
//! ```text
//! # die and package model
//! Zin:( Zpkg:(R1[1.8e-3] + L1[64e-12]) ‖ Zdie:(Cd[1e-9] + Rd[40e-3]) )
//! ```

mod lexer;
mod parser;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;
use crate::impedance::Impedance;

/// Parse an impedance expression.
pub fn parse(input: &str) -> Result<Impedance> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse an impedance expression file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Impedance> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::FastzError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
