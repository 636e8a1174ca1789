use super::relations::PrecedenceRelations;
use super::table::{Action, ActionTable};
use crate::weakprec::error::{AnalysisError, GrammaticalError};
use crate::weakprec::grammar::{Grammar, Production};
use crate::weakprec::lexing::LookaheadBuffer;
use crate::weakprec::token::Element;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Productions in derivation order, borrowed from the parser's grammar.
pub type Derivation<'g> = Vec<&'g Production>;

/// A grammar together with its precedence relations and action table.
///
/// Construction does all the table work; parsing only reads it, so one parser can run any
/// number of inputs.
#[derive(Debug, Clone)]
pub struct WeakPrecedenceParser {
    grammar: Grammar,
    start: String,
    end_marker: String,
    relations: PrecedenceRelations,
    table: ActionTable,
    longest_body: usize,
}

impl WeakPrecedenceParser {
    pub fn new(grammar: Grammar, start: impl Into<String>, end_marker: impl Into<String>) -> Self {
        let start = start.into();
        let end_marker = end_marker.into();

        let relations = PrecedenceRelations::compute(&grammar, &start, &end_marker);
        for (left, right) in relations.conflicts() {
            debug!(left = %left, right = %right, "shift/reduce conflict, shift wins");
        }
        let table = ActionTable::build(&grammar, &relations, &end_marker);
        let longest_body = grammar
            .productions()
            .iter()
            .map(|p| p.body().len())
            .max()
            .unwrap_or(0);

        WeakPrecedenceParser {
            grammar,
            start,
            end_marker,
            relations,
            table,
            longest_body,
        }
    }

    /// Parse everything the buffer supplies.
    ///
    /// Stops with the derivation once the stack holds just the start symbol and the
    /// lookahead is the end marker. Any lexical or grammatical error aborts the parse.
    pub fn parse<B>(&self, buffer: &mut B) -> Result<Derivation<'_>, AnalysisError>
    where
        B: LookaheadBuffer + ?Sized,
    {
        // The end marker sits implicitly below the bottom of the stack
        let mut stack: Vec<Element> = Vec::new();
        let mut derivation: VecDeque<&Production> = VecDeque::new();
        let mut lookahead = buffer.next_element()?;
        let mut insertions = 0;

        while !self.accepts(&stack, &lookahead) {
            let top = self.top_kind(&stack);
            let action = self.table.action(top, lookahead.kind());
            trace!(top, lookahead = lookahead.kind(), %action, "parser step");

            match action {
                Action::Shift => {
                    stack.push(lookahead);
                    lookahead = buffer.next_element()?;
                    insertions = 0;
                }
                Action::Reduce => self.reduce(&mut stack, &mut derivation, &lookahead)?,
                Action::Undefined => {
                    let fallback = self
                        .grammar
                        .empty_symbol()
                        .map(|empty| (empty, self.table.action(top, empty)));

                    match fallback {
                        Some((empty, Action::Shift)) => {
                            insertions += 1;
                            if insertions > self.grammar.productions().len() {
                                return Err(GrammaticalError::new(lookahead).into());
                            }
                            trace!(empty, "inserting empty symbol");
                            stack.push(Element::symbol(empty));
                        }
                        Some((_, Action::Reduce)) => {
                            self.reduce(&mut stack, &mut derivation, &lookahead)?
                        }
                        _ => return Err(GrammaticalError::new(lookahead).into()),
                    }
                }
            }
        }

        debug!(productions = derivation.len(), "parse complete");
        Ok(derivation.into())
    }

    fn accepts(&self, stack: &[Element], lookahead: &Element) -> bool {
        stack.len() == 1 && stack[0].kind() == self.start && lookahead.kind() == self.end_marker
    }

    fn top_kind<'s>(&'s self, stack: &'s [Element]) -> &'s str {
        stack.last().map_or(self.end_marker.as_str(), Element::kind)
    }

    /// Replace the longest matching handle on top of the stack with its head.
    fn reduce<'g>(
        &'g self,
        stack: &mut Vec<Element>,
        derivation: &mut VecDeque<&'g Production>,
        lookahead: &Element,
    ) -> Result<(), GrammaticalError> {
        let longest = stack.len().min(self.longest_body);

        for length in (1..=longest).rev() {
            let handle = stack.len() - length;
            let body_key = stack[handle..]
                .iter()
                .map(Element::kind)
                .collect::<Vec<_>>()
                .join(" ");
            let beneath = if handle == 0 {
                self.end_marker.as_str()
            } else {
                stack[handle - 1].kind()
            };

            if let Some(production) = self.select(&body_key, beneath) {
                trace!(%production, "reduce");
                stack.truncate(handle);
                stack.push(Element::symbol(production.head()));
                derivation.push_front(production);
                return Ok(());
            }
        }

        Err(GrammaticalError::new(lookahead.clone()))
    }

    /// The first declared production with this body. Empty productions are the exception:
    /// there the first whose head `beneath` shifts to wins.
    fn select(&self, body_key: &str, beneath: &str) -> Option<&Production> {
        let mut candidates = self.grammar.productions_with_body(body_key);
        let first = candidates.next()?;
        if !self.grammar.is_empty_symbol(body_key)
            || self.relations.shifts(beneath, first.head())
        {
            return Some(first);
        }
        candidates
            .find(|p| self.relations.shifts(beneath, p.head()))
            .or(Some(first))
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end_marker(&self) -> &str {
        &self.end_marker
    }

    pub fn relations(&self) -> &PrecedenceRelations {
        &self.relations
    }

    pub fn table(&self) -> &ActionTable {
        &self.table
    }
}
