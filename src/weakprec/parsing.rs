//! Weak precedence parsing
//!
//!     A bottom-up shift/reduce parser driven by Wirth–Weber precedence relations. The
//!     relations are computed once per grammar ([relations]) and folded into an action table
//!     ([table]) keyed by the kind of the stack top and the kind of the lookahead.
//!
//!     Parsing ([parser]) shifts on `<` and `=`, and reduces on `>`. A reduction takes the
//!     longest run of stack elements, counted from the top, whose kinds spell the body of a
//!     production. The output is the rightmost derivation in reverse order of reduction, so
//!     the first production is the one headed by the start symbol.
//!
//! Empty Productions
//!
//!     Grammars may declare an empty symbol (the arithmetic grammar uses `ε`). Where the
//!     table has nothing for the lookahead, the parser asks what it would do with the empty
//!     symbol instead: a shift pushes the empty marker without reading input, a reduce
//!     reduces. Several heads can derive the empty body; the one whose head the element
//!     beneath it yields to (or equals) is chosen.

pub mod parser;
pub mod relations;
pub mod table;

pub use parser::{Derivation, WeakPrecedenceParser};
pub use relations::{PrecedenceRelations, Relation, RelationEntry};
pub use table::{Action, ActionTable};
