//! Binding powers and handler tables for the Pratt parser.
//!
//! Handlers are registered on a [`GrammarBuilder`] and frozen into a
//! [`Grammar`], which the parser only ever reads. The built-in grammar is
//! built once per process and shared by every parse.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::ast::{ExprWrapper, StmtWrapper, TypeWrapper},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{expr::*, parser::Parser, stmt::*, types::create_token_type_lookups};

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Comma,
    Assignment,
    Logical,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser<'_>) -> Result<StmtWrapper, Error>;
pub type NUDHandler = fn(&mut Parser<'_>) -> Result<ExprWrapper, Error>;
pub type LEDHandler = fn(&mut Parser<'_>, ExprWrapper, BindingPower) -> Result<ExprWrapper, Error>;
pub type TypeNUDHandler = fn(&mut Parser<'_>) -> Result<TypeWrapper, Error>;
pub type TypeLEDHandler =
    fn(&mut Parser<'_>, TypeWrapper, BindingPower) -> Result<TypeWrapper, Error>;

pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

lazy_static! {
    static ref DEFAULT_GRAMMAR: Grammar =
        Grammar::new().expect("built-in grammar registers every token once per table");
}

/// The grammar every `parse` call uses unless given another one.
pub fn default_grammar() -> &'static Grammar {
    &DEFAULT_GRAMMAR
}

/// Collects handler registrations before they are frozen into a [`Grammar`].
///
/// Registering the same kind twice in one table is recorded and reported by
/// [`GrammarBuilder::build`] instead of silently replacing the first handler.
#[derive(Default)]
pub struct GrammarBuilder {
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: HashMap<TokenKind, (BindingPower, LEDHandler)>,
    type_nud_lookup: TypeNUDLookup,
    type_led_lookup: HashMap<TokenKind, (BindingPower, TypeLEDHandler)>,
    duplicates: Vec<(TokenKind, &'static str)>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a left denotation (infix/postfix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        if self.led_lookup.insert(kind, (binding_power, led_fn)).is_some() {
            self.duplicates.push((kind, "led"));
        }
    }

    /// Registers a null denotation (prefix/primary) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        if self.nud_lookup.insert(kind, nud_fn).is_some() {
            self.duplicates.push((kind, "nud"));
        }
    }

    /// Registers a statement-leading token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        if self.stmt_lookup.insert(kind, stmt_fn).is_some() {
            self.duplicates.push((kind, "statement"));
        }
    }

    pub fn type_led(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        led_fn: TypeLEDHandler,
    ) {
        if self.type_led_lookup.insert(kind, (binding_power, led_fn)).is_some() {
            self.duplicates.push((kind, "type led"));
        }
    }

    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        if self.type_nud_lookup.insert(kind, nud_fn).is_some() {
            self.duplicates.push((kind, "type nud"));
        }
    }

    /// Freezes the registrations.
    ///
    /// Binding powers are derived here so registration order never matters:
    /// a kind with a led gets the led's power, otherwise a statement keyword
    /// gets `Default` (it ends any expression), otherwise a nud-only kind
    /// gets `Primary` (it can never continue one).
    pub fn build(self) -> Result<Grammar, Error> {
        if let Some((kind, table)) = self.duplicates.first() {
            return Err(Error::new(
                ErrorImpl::DuplicateHandler {
                    kind: *kind,
                    table: *table,
                },
                Position::null(),
            ));
        }

        let mut binding_power_lookup = BPLookup::new();
        for kind in self.nud_lookup.keys() {
            binding_power_lookup.insert(*kind, BindingPower::Primary);
        }
        for kind in self.stmt_lookup.keys() {
            binding_power_lookup.insert(*kind, BindingPower::Default);
        }
        for (kind, (binding_power, _)) in &self.led_lookup {
            binding_power_lookup.insert(*kind, *binding_power);
        }

        let mut type_binding_power_lookup = BPLookup::new();
        for kind in self.type_nud_lookup.keys() {
            type_binding_power_lookup.insert(*kind, BindingPower::Primary);
        }
        for (kind, (binding_power, _)) in &self.type_led_lookup {
            type_binding_power_lookup.insert(*kind, *binding_power);
        }

        Ok(Grammar {
            stmt_lookup: self.stmt_lookup,
            nud_lookup: self.nud_lookup,
            led_lookup: self
                .led_lookup
                .into_iter()
                .map(|(kind, (_, led_fn))| (kind, led_fn))
                .collect(),
            binding_power_lookup,
            type_nud_lookup: self.type_nud_lookup,
            type_led_lookup: self
                .type_led_lookup
                .into_iter()
                .map(|(kind, (_, led_fn))| (kind, led_fn))
                .collect(),
            type_binding_power_lookup,
        })
    }
}

/// Read-only handler and binding power tables for expressions, statements
/// and types.
pub struct Grammar {
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
    type_nud_lookup: TypeNUDLookup,
    type_led_lookup: TypeLEDLookup,
    type_binding_power_lookup: BPLookup,
}

impl Grammar {
    /// Builds the language's grammar.
    pub fn new() -> Result<Grammar, Error> {
        let mut builder = GrammarBuilder::new();
        create_token_lookups(&mut builder);
        create_token_type_lookups(&mut builder);
        builder.build()
    }

    pub fn get_stmt(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    pub fn get_nud(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    pub fn get_led(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.led_lookup.get(&kind).copied()
    }

    /// Binding power of `kind` in continuation position; `Default` if the
    /// kind is not in the table.
    pub fn get_binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    pub fn get_type_nud(&self, kind: TokenKind) -> Option<TypeNUDHandler> {
        self.type_nud_lookup.get(&kind).copied()
    }

    pub fn get_type_led(&self, kind: TokenKind) -> Option<TypeLEDHandler> {
        self.type_led_lookup.get(&kind).copied()
    }

    pub fn get_type_binding_power(&self, kind: TokenKind) -> BindingPower {
        self.type_binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }
}

pub fn create_token_lookups(builder: &mut GrammarBuilder) {
    builder.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);
    builder.led(TokenKind::PlusEquals, BindingPower::Assignment, parse_assignment_expr);
    builder.led(TokenKind::MinusEquals, BindingPower::Assignment, parse_assignment_expr);
    builder.led(TokenKind::StarEquals, BindingPower::Assignment, parse_assignment_expr);
    builder.led(TokenKind::SlashEquals, BindingPower::Assignment, parse_assignment_expr);

    // Logical
    builder.led(TokenKind::And, BindingPower::Logical, parse_binary_expr);
    builder.led(TokenKind::Or, BindingPower::Logical, parse_binary_expr);
    builder.led(TokenKind::DotDot, BindingPower::Logical, parse_range_expr);

    // Relational
    builder.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    builder.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    builder.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    builder.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);
    builder.led(TokenKind::Equals, BindingPower::Relational, parse_binary_expr);
    builder.led(TokenKind::NotEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    builder.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    builder.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    builder.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    builder.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    builder.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    // Call and instantiation
    builder.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    builder.led(TokenKind::OpenCurly, BindingPower::Call, parse_struct_instantiation_expr);

    // Member
    builder.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);
    builder.led(TokenKind::OpenBracket, BindingPower::Member, parse_computed_expr);

    // Literals and symbols
    builder.nud(TokenKind::Number, parse_primary_expr);
    builder.nud(TokenKind::String, parse_primary_expr);
    builder.nud(TokenKind::Identifier, parse_primary_expr);

    // Prefix and grouping
    builder.nud(TokenKind::Dash, parse_prefix_expr);
    builder.nud(TokenKind::Not, parse_prefix_expr);
    builder.nud(TokenKind::Typeof, parse_prefix_expr);
    builder.nud(TokenKind::OpenParen, parse_grouping_expr);

    builder.nud(TokenKind::OpenBracket, parse_array_instantiation_expr);
    builder.nud(TokenKind::Fn, parse_fn_expr);
    builder.nud(TokenKind::New, parse_new_expr);

    // Statements
    builder.stmt(TokenKind::OpenCurly, parse_block_stmt);
    builder.stmt(TokenKind::Let, parse_var_decl_stmt);
    builder.stmt(TokenKind::Const, parse_var_decl_stmt);
    builder.stmt(TokenKind::Fn, parse_fn_decl_stmt);
    builder.stmt(TokenKind::Struct, parse_struct_decl_stmt);
    builder.stmt(TokenKind::Class, parse_class_decl_stmt);
    builder.stmt(TokenKind::If, parse_if_stmt);
    builder.stmt(TokenKind::Import, parse_import_stmt);
    builder.stmt(TokenKind::Foreach, parse_foreach_stmt);
    builder.stmt(TokenKind::While, parse_while_stmt);
    builder.stmt(TokenKind::Return, parse_return_stmt);
}
