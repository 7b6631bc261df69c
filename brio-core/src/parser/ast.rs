use std::fmt::Display;

use crate::{
    lexer::prelude::{LexResult, Token},
    utils::prelude::SrcSpan
};
use super::error::{ParseError, ParseErrorType};
use super::parser::{parse_error, Parser};

pub trait Parse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError>;
}

// program -> { <statement> }
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let start = match &parser.current_token {
            Some((start, _, _)) => *start,
            None => 0
        };

        let mut statements = vec![];

        let end = loop {
            match &parser.current_token {
                Some((pos, Token::Eof, _)) => break *pos,
                Some(_) => statements.push(Statement::parse(parser)?),
                None => return parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        };

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join(" "))
    }
}

// statement -> <var_declaration> | <function_declaration> | <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VarDeclaration(VarDeclaration),
    FunctionDeclaration(FunctionDeclaration),
    Expression(Expression),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let statement = match &parser.current_token {
            Some((_, Token::Let | Token::Const, _)) => {
                Self::VarDeclaration(VarDeclaration::parse(parser)?)
            },
            Some((_, Token::Fn, _)) => {
                Self::FunctionDeclaration(FunctionDeclaration::parse(parser)?)
            },
            Some(_) => {
                let expression = Expression::parse(parser)?;

                // An expression statement may carry one trailing `;`.
                if matches!(parser.current_token, Some((_, Token::Semicolon, _))) {
                    parser.step();
                }

                Self::Expression(expression)
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        Ok(statement)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VarDeclaration(declaration) => write!(f, "{declaration}"),
            Self::FunctionDeclaration(declaration) => write!(f, "{declaration}"),
            Self::Expression(expression) => write!(f, "{expression};")
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::VarDeclaration(declaration) => declaration.location,
            Self::FunctionDeclaration(declaration) => declaration.location,
            Self::Expression(expression) => expression.location()
        }
    }
}

// var_declaration -> (let | const) <identifier> [= <expression>] ;
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub name: Identifier,
    pub value: Option<Expression>,
    pub constant: bool,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for VarDeclaration {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, keyword, _) = match parser.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };
        let constant = keyword == Token::Const;

        let name = Identifier::from(parser.expect_ident()?);

        if matches!(parser.current_token, Some((_, Token::Semicolon, _))) {
            let (_, end) = parser.expect_one(Token::Semicolon)?;

            if constant {
                return parse_error(
                    ParseErrorType::MissingConstInitializer,
                    SrcSpan { start, end }
                );
            }

            return Ok(Self {
                name,
                value: None,
                constant,
                location: SrcSpan { start, end }
            });
        }

        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser)?;

        let (_, end) = parser.expect_one(Token::Semicolon)?;

        Ok(Self {
            name,
            value: Some(value),
            constant,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for VarDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = if self.constant { "const" } else { "let" };

        match &self.value {
            Some(value) => write!(f, "{} {} = {};", keyword, self.name, value),
            None => write!(f, "{} {};", keyword, self.name)
        }
    }
}

// function_declaration -> fn <identifier> ( [<identifier> {, <identifier>}] ) { <statement>* }
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for FunctionDeclaration {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Fn)?;

        let name = Identifier::from(parser.expect_ident()?);

        // The parameter list reuses the argument grammar; anything but a
        // bare identifier at a parameter position is rejected here.
        let (arguments, _) = Expression::parse_call_arguments(parser)?;

        let mut parameters = Vec::with_capacity(arguments.len());

        for argument in arguments {
            match argument {
                Expression::Identifier(ident) => parameters.push(ident),
                other => return parse_error(
                    ParseErrorType::ExpectedParameterName,
                    other.location()
                )
            }
        }

        parser.expect_one(Token::LBrace)?;

        let mut body = vec![];

        while !matches!(
            parser.current_token,
            Some((_, Token::RBrace | Token::Eof, _)) | None
        ) {
            body.push(Statement::parse(parser)?);
        }

        let (_, end) = parser.expect_one(Token::RBrace)?;

        Ok(Self {
            name,
            parameters,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for FunctionDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<String>>();

        let body = self.body.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        write!(f, "fn {}({}) {{ {} }}", self.name, parameters.join(", "), body.join(" "))
    }
}

// identifier -> <letter> { <letter> }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%"
        };

        write!(f, "{operator}")
    }
}

// property -> <identifier> [: <expression>]
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Option<Expression>,
    pub location: SrcSpan
}

impl Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.key, value),
            None => write!(f, "{}", self.key)
        }
    }
}

// expression -> <assignment>
// assignment -> <object_or_additive> [= <assignment>]
// additive -> <multiplicative> { (+ | -) <multiplicative> }
// multiplicative -> <call_member> { (* | / | %) <call_member> }
// call_member -> <member> [ ( <arguments> ) { ( <arguments> ) } ]
// member -> <primary> { . <identifier> | [ <expression> ] }
// primary -> <identifier> | <number> | ( <expression> ) | <object_literal>
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Assignment {
        assignee: Box<Expression>,
        value: Box<Expression>,
        location: SrcSpan
    },
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
        location: SrcSpan
    },
    Call {
        caller: Box<Expression>,
        arguments: Vec<Expression>,
        location: SrcSpan
    },
    Member {
        object: Box<Expression>,
        property: Box<Expression>,
        computed: bool,
        location: SrcSpan
    },
    Identifier(Identifier),
    NumericLiteral {
        value: f64,
        location: SrcSpan
    },
    ObjectLiteral {
        properties: Vec<Property>,
        location: SrcSpan
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        Self::parse_assignment(parser)
    }
}

impl Expression {
    // Right-associative: `a = b = c` parses as `a = (b = c)`. Whether the
    // assignee is actually assignable is checked at evaluation time.
    fn parse_assignment<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let assignee = Self::parse_object(parser)?;

        if matches!(parser.current_token, Some((_, Token::Assign, _))) {
            parser.step();

            let value = Self::parse_assignment(parser)?;

            let location = SrcSpan {
                start: assignee.location().start,
                end: value.location().end
            };

            return Ok(Self::Assignment {
                assignee: Box::new(assignee),
                value: Box::new(value),
                location
            });
        }

        Ok(assignee)
    }

    // object_literal -> { [<property> {, <property>} [,]] }
    fn parse_object<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let start = match &parser.current_token {
            Some((start, Token::LBrace, _)) => *start,
            _ => return Self::parse_additive(parser)
        };
        parser.step();

        let mut properties = vec![];

        while !matches!(
            parser.current_token,
            Some((_, Token::RBrace | Token::Eof, _)) | None
        ) {
            let (key_start, key, key_end) = parser.expect_ident()?;

            // `{ key, ... }` and `{ key }` are shorthand for looking the
            // key up as a variable when the object is built.
            match &parser.current_token {
                Some((_, Token::Comma, _)) => {
                    parser.step();
                    properties.push(Property {
                        key,
                        value: None,
                        location: SrcSpan { start: key_start, end: key_end }
                    });
                    continue;
                },
                Some((_, Token::RBrace, _)) => {
                    properties.push(Property {
                        key,
                        value: None,
                        location: SrcSpan { start: key_start, end: key_end }
                    });
                    continue;
                },
                _ => {}
            }

            parser.expect_one(Token::Colon)?;

            let value = Self::parse_assignment(parser)?;

            properties.push(Property {
                key,
                location: SrcSpan { start: key_start, end: value.location().end },
                value: Some(value)
            });

            if !matches!(parser.current_token, Some((_, Token::RBrace, _))) {
                parser.expect_one(Token::Comma)?;
            }
        }

        let (_, end) = parser.expect_one(Token::RBrace)?;

        Ok(Self::ObjectLiteral {
            properties,
            location: SrcSpan { start, end }
        })
    }

    // Left-fold keeps `1 - 2 - 3` as `(1 - 2) - 3`.
    fn parse_additive<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let mut left = Self::parse_multiplicative(parser)?;

        loop {
            let operator = match &parser.current_token {
                Some((_, Token::Plus, _)) => BinaryOperator::Add,
                Some((_, Token::Minus, _)) => BinaryOperator::Subtract,
                _ => break
            };
            parser.step();

            let right = Self::parse_multiplicative(parser)?;

            let location = SrcSpan {
                start: left.location().start,
                end: right.location().end
            };

            left = Self::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                location
            };
        }

        Ok(left)
    }

    fn parse_multiplicative<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let mut left = Self::parse_call_member(parser)?;

        loop {
            let operator = match &parser.current_token {
                Some((_, Token::Asterisk, _)) => BinaryOperator::Multiply,
                Some((_, Token::Slash, _)) => BinaryOperator::Divide,
                Some((_, Token::Percent, _)) => BinaryOperator::Remainder,
                _ => break
            };
            parser.step();

            let right = Self::parse_call_member(parser)?;

            let location = SrcSpan {
                start: left.location().start,
                end: right.location().end
            };

            left = Self::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                location
            };
        }

        Ok(left)
    }

    fn parse_call_member<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let member = Self::parse_member(parser)?;

        if matches!(parser.current_token, Some((_, Token::LParen, _))) {
            return Self::parse_call(parser, member);
        }

        Ok(member)
    }

    // Calls chain: `f()()` calls the value the first call returned.
    fn parse_call<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
        caller: Expression
    ) -> Result<Self, ParseError> {
        let (arguments, parens) = Self::parse_call_arguments(parser)?;

        let location = SrcSpan {
            start: caller.location().start,
            end: parens.end
        };

        let call = Self::Call {
            caller: Box::new(caller),
            arguments,
            location
        };

        if matches!(parser.current_token, Some((_, Token::LParen, _))) {
            return Self::parse_call(parser, call);
        }

        Ok(call)
    }

    // arguments -> ( [<assignment> {, <assignment>}] )
    pub(super) fn parse_call_arguments<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<(Vec<Expression>, SrcSpan), ParseError> {
        let (start, _) = parser.expect_one(Token::LParen)?;

        let mut arguments = vec![];

        if !matches!(parser.current_token, Some((_, Token::RParen, _))) {
            arguments.push(Self::parse_assignment(parser)?);

            while matches!(parser.current_token, Some((_, Token::Comma, _))) {
                parser.step();
                arguments.push(Self::parse_assignment(parser)?);
            }
        }

        let (_, end) = parser.expect_one(Token::RParen)?;

        Ok((arguments, SrcSpan { start, end }))
    }

    fn parse_member<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let mut object = Self::parse_primary(parser)?;

        loop {
            let computed = match &parser.current_token {
                Some((_, Token::Dot, _)) => false,
                Some((_, Token::LBracket, _)) => true,
                _ => break
            };
            parser.step();

            let (property, end) = if computed {
                let property = Self::parse_assignment(parser)?;
                let (_, end) = parser.expect_one(Token::RBracket)?;

                (property, end)
            } else {
                let property = Self::parse_primary(parser)?;

                if !matches!(property, Self::Identifier(_)) {
                    return parse_error(
                        ParseErrorType::ExpectedPropertyName,
                        property.location()
                    );
                }

                let end = property.location().end;

                (property, end)
            };

            let location = SrcSpan {
                start: object.location().start,
                end
            };

            object = Self::Member {
                object: Box::new(object),
                property: Box::new(property),
                computed,
                location
            };
        }

        Ok(object)
    }

    fn parse_primary<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        match parser.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                parser.step();

                Ok(Self::Identifier(Identifier {
                    value,
                    location: SrcSpan { start, end }
                }))
            },
            Some((start, Token::Number(value), end)) => {
                parser.step();

                Ok(Self::NumericLiteral {
                    value,
                    location: SrcSpan { start, end }
                })
            },
            t @ Some((_, Token::LParen, _)) => {
                parser.current_token = t;
                parser.expect_one(Token::LParen)?;

                let expression = Self::parse_assignment(parser)?;

                parser.expect_one(Token::RParen)?;

                // Grouping produces no node of its own.
                Ok(expression)
            },
            Some(t) => {
                let (start, token, end) = t.clone();
                parser.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token,
                        expected: vec!["an Identifier, a Number, `(` or `{`".to_string()]
                    },
                    SrcSpan { start, end }
                )
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Assignment { location, .. }
            | Self::Binary { location, .. }
            | Self::Call { location, .. }
            | Self::Member { location, .. }
            | Self::NumericLiteral { location, .. }
            | Self::ObjectLiteral { location, .. } => *location,
            Self::Identifier(ident) => ident.location
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assignment { assignee, value, .. } => {
                write!(f, "{assignee} = {value}")
            },
            Self::Binary { left, operator, right, .. } => {
                write!(f, "{left} {operator} {right}")
            },
            Self::Call { caller, arguments, .. } => {
                let arguments = arguments.iter()
                    .map(|argument| argument.to_string())
                    .collect::<Vec<String>>();

                write!(f, "{}({})", caller, arguments.join(", "))
            },
            Self::Member { object, property, computed, .. } => {
                if *computed {
                    write!(f, "{object}[{property}]")
                } else {
                    write!(f, "{object}.{property}")
                }
            },
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::NumericLiteral { value, .. } => write!(f, "{value}"),
            Self::ObjectLiteral { properties, .. } => {
                let properties = properties.iter()
                    .map(|property| property.to_string())
                    .collect::<Vec<String>>();

                write!(f, "{{ {} }}", properties.join(", "))
            }
        }
    }
}
