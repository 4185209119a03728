use crate::lexer::{Token, TokenKind, tokenize};
use crate::{
    ArrowBody, DeclKeyword, Declarator, Loc, Node, NodeKind, ParseError, ParseOptions, Program,
    ProgramMetadata, SourceKind, Span,
};

pub(crate) fn parse_program(source: &str, options: ParseOptions) -> Result<Program, ParseError> {
    let lexed = tokenize(source)?;
    let mut parser = Parser {
        tokens: lexed.tokens,
        pos: 0,
        end_loc: lexed.end_loc,
        options,
    };
    let body = parser.parse_statements_until(None)?;

    Ok(Program {
        metadata: ProgramMetadata {
            source_kind: options.source_kind,
            syntax_version: options.syntax_version,
            original_bytes: source.len(),
            line_count: source.lines().count(),
        },
        body,
    })
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    end_loc: Loc,
    options: ParseOptions,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn is_punct(&self, text: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Punct && t.text == text)
    }

    fn eat_punct(&mut self, text: &str) -> bool {
        if self.is_punct(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, text: &str) -> Result<(), ParseError> {
        if self.eat_punct(text) {
            Ok(())
        } else {
            Err(self.unexpected(format!("expected `{text}`")))
        }
    }

    fn expect_binding_name(&mut self, what: &str) -> Result<String, ParseError> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Ident && !is_keyword(&t.text) => {
                let name = t.text.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected(format!("expected {what}"))),
        }
    }

    fn expect_property_name(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Ident => {
                let name = t.text.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected("expected property name".to_string())),
        }
    }

    fn current_loc(&self) -> Loc {
        self.peek().map_or(self.end_loc, |t| t.loc)
    }

    fn unexpected(&self, message: String) -> ParseError {
        let loc = self.current_loc();
        ParseError {
            line: loc.line,
            column: loc.column,
            message,
        }
    }

    /// Build a node spanning from the token at `start_index` to the last
    /// consumed token. Callers must have consumed at least one token.
    fn make_node(&self, start_index: usize, kind: NodeKind) -> Node {
        let first = &self.tokens[start_index];
        let last = &self.tokens[self.pos - 1];
        Node {
            kind,
            span: Span {
                start: first.span.start,
                end: last.span.end,
            },
            loc: first.loc,
        }
    }

    fn parse_statements_until(&mut self, closing: Option<&str>) -> Result<Vec<Node>, ParseError> {
        let mut body = Vec::new();

        loop {
            if let Some(close) = closing {
                if self.is_punct(close) {
                    break;
                }
                if self.at_eof() {
                    return Err(self.unexpected("unexpected end of input".to_string()));
                }
            } else if self.at_eof() {
                break;
            }

            if self.eat_punct(";") {
                continue;
            }
            body.push(self.parse_statement()?);
        }

        Ok(body)
    }

    fn parse_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let head = match self.peek() {
            Some(t) if t.kind == TokenKind::Ident => t.text.clone(),
            Some(_) => String::new(),
            None => return Err(self.unexpected("expected a statement".to_string())),
        };

        match head.as_str() {
            "function" => self.parse_function_declaration(start),
            "let" | "const" | "var" => self.parse_variable_declaration(start, &head),
            "return" => self.parse_return_statement(start),
            "import" | "export" => {
                if self.options.source_kind == SourceKind::Script {
                    return Err(self.unexpected(format!(
                        "`{head}` may only appear in module source"
                    )));
                }
                self.parse_unknown_statement(start)
            }
            "if" | "for" | "while" | "do" | "switch" | "try" | "class" | "throw" | "break"
            | "continue" | "async" | "new" | "delete" | "typeof" | "await" | "yield"
            | "debugger" | "with" => self.parse_unknown_statement(start),
            _ => self.parse_expression_statement(start),
        }
    }

    fn parse_function_declaration(&mut self, start: usize) -> Result<Node, ParseError> {
        self.pos += 1;
        let name = self.expect_binding_name("function name")?;
        let params = self.parse_params()?;
        let body = self.parse_brace_body()?;
        Ok(self.make_node(start, NodeKind::FunctionDecl { name, params, body }))
    }

    fn parse_variable_declaration(&mut self, start: usize, head: &str) -> Result<Node, ParseError> {
        let keyword = match head {
            "let" => DeclKeyword::Let,
            "const" => DeclKeyword::Const,
            _ => DeclKeyword::Var,
        };
        self.pos += 1;

        let mut declarators = Vec::new();
        loop {
            let name = self.expect_binding_name("binding name")?;
            let init = if self.eat_punct("=") {
                Some(self.parse_value_expression(&[";", ","])?)
            } else {
                None
            };
            declarators.push(Declarator { name, init });
            if !self.eat_punct(",") {
                break;
            }
        }
        self.eat_punct(";");

        Ok(self.make_node(
            start,
            NodeKind::VariableDecl {
                keyword,
                declarators,
            },
        ))
    }

    fn parse_return_statement(&mut self, start: usize) -> Result<Node, ParseError> {
        self.pos += 1;
        let argument = if self.at_eof() || self.is_punct(";") || self.is_punct("}") {
            None
        } else {
            Some(Box::new(self.parse_value_expression(&[";"])?))
        };
        self.eat_punct(";");
        Ok(self.make_node(start, NodeKind::ReturnStmt { argument }))
    }

    /// Consume one well-delimited statement the grammar does not model,
    /// preserving its normalized token text.
    fn parse_unknown_statement(&mut self, start: usize) -> Result<Node, ParseError> {
        let mut depth = 0usize;
        let mut parts: Vec<String> = Vec::new();

        loop {
            let (kind, text) = match self.peek() {
                Some(t) => (t.kind, t.text.clone()),
                None => {
                    if depth > 0 {
                        return Err(self.unexpected("unexpected end of input".to_string()));
                    }
                    break;
                }
            };

            if kind == TokenKind::Punct {
                match text.as_str() {
                    ";" if depth == 0 => {
                        parts.push(text);
                        self.pos += 1;
                        break;
                    }
                    // The enclosing block closes; this statement ends here.
                    ")" | "]" | "}" if depth == 0 => break,
                    "(" | "[" | "{" => depth += 1,
                    "}" => {
                        depth -= 1;
                        parts.push(text);
                        self.pos += 1;
                        if depth == 0 {
                            // `} else`, `} catch`, `} finally`, and do-while
                            // tails keep the statement going.
                            let continues = self.peek().is_some_and(|t| {
                                t.kind == TokenKind::Ident
                                    && matches!(
                                        t.text.as_str(),
                                        "else" | "catch" | "finally" | "while"
                                    )
                            });
                            if continues {
                                continue;
                            }
                            break;
                        }
                        continue;
                    }
                    ")" | "]" => depth -= 1,
                    _ => {}
                }
            }

            parts.push(text);
            self.pos += 1;
        }

        if parts.is_empty() {
            return Err(self.unexpected("expected a statement".to_string()));
        }

        Ok(self.make_node(start, NodeKind::UnknownStmt { text: parts.join(" ") }))
    }

    fn parse_expression_statement(&mut self, start: usize) -> Result<Node, ParseError> {
        let mark = self.pos;
        if let Ok(expr) = self.parse_expression() {
            let terminated = match self.peek() {
                None => true,
                Some(t) => t.kind == TokenKind::Punct && matches!(t.text.as_str(), ";" | "}"),
            };
            if terminated {
                self.eat_punct(";");
                return Ok(self.make_node(
                    start,
                    NodeKind::ExpressionStmt {
                        expression: Box::new(expr),
                    },
                ));
            }
        }

        self.pos = mark;
        self.parse_unknown_statement(start)
    }

    /// Parse an initializer or argument-position expression. Shapes the
    /// expression grammar does not model are preserved as unknown
    /// expressions delimited by `terminators` at depth zero.
    fn parse_value_expression(&mut self, terminators: &[&str]) -> Result<Node, ParseError> {
        let mark = self.pos;
        if let Ok(expr) = self.parse_expression() {
            if self.at_expression_boundary(terminators) {
                return Ok(expr);
            }
        }

        self.pos = mark;
        let raw_start = self.pos;
        let text = self.collect_raw_until(terminators)?;
        if self.pos == raw_start {
            return Err(self.unexpected("expected an expression".to_string()));
        }
        Ok(self.make_node(raw_start, NodeKind::UnknownExpr { text }))
    }

    fn at_expression_boundary(&self, terminators: &[&str]) -> bool {
        match self.peek() {
            None => true,
            Some(t) => {
                t.kind == TokenKind::Punct
                    && (terminators.contains(&t.text.as_str())
                        || matches!(t.text.as_str(), ")" | "]" | "}"))
            }
        }
    }

    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let mut node = self.parse_primary()?;

        loop {
            if self.is_punct(".") {
                self.pos += 1;
                let property_start = self.pos;
                let name = self.expect_property_name()?;
                let property = self.make_node(property_start, NodeKind::Identifier { name });
                node = self.make_node(
                    start,
                    NodeKind::Member {
                        object: Box::new(node),
                        property: Box::new(property),
                    },
                );
            } else if self.is_punct("(") {
                let arguments = self.parse_arguments()?;
                node = self.make_node(
                    start,
                    NodeKind::Call {
                        callee: Box::new(node),
                        arguments,
                    },
                );
            } else if self.is_punct("[") {
                let bracket = self.pos;
                self.pos += 1;
                let text = self.collect_raw_until(&["]"])?;
                self.expect_punct("]")?;
                let property = self.make_node(bracket, NodeKind::UnknownExpr { text });
                node = self.make_node(
                    start,
                    NodeKind::Member {
                        object: Box::new(node),
                        property: Box::new(property),
                    },
                );
            } else {
                break;
            }
        }

        Ok(node)
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let (kind, text, value) = match self.peek() {
            Some(t) => (t.kind, t.text.clone(), t.value.clone()),
            None => return Err(self.unexpected("expected an expression".to_string())),
        };

        match kind {
            TokenKind::Number => {
                self.pos += 1;
                Ok(self.make_node(
                    start,
                    NodeKind::Literal {
                        value: text.clone(),
                        raw: text,
                    },
                ))
            }
            TokenKind::Str => {
                self.pos += 1;
                Ok(self.make_node(
                    start,
                    NodeKind::Literal {
                        raw: text,
                        value: value.unwrap_or_default(),
                    },
                ))
            }
            TokenKind::Ident => match text.as_str() {
                "function" => self.parse_function_expression(start),
                "true" | "false" | "null" => {
                    self.pos += 1;
                    Ok(self.make_node(
                        start,
                        NodeKind::Literal {
                            value: text.clone(),
                            raw: text,
                        },
                    ))
                }
                _ => {
                    let arrow_follows = self
                        .peek_at(1)
                        .is_some_and(|t| t.kind == TokenKind::Punct && t.text == "=>");
                    if arrow_follows {
                        self.pos += 2;
                        let body = self.parse_arrow_body()?;
                        Ok(self.make_node(
                            start,
                            NodeKind::ArrowFunctionExpr {
                                params: vec![text],
                                body,
                            },
                        ))
                    } else if is_keyword(&text) {
                        Err(self.unexpected(format!("unexpected keyword `{text}`")))
                    } else {
                        self.pos += 1;
                        Ok(self.make_node(start, NodeKind::Identifier { name: text }))
                    }
                }
            },
            TokenKind::Punct if text == "(" => {
                if self.looks_like_arrow_params() {
                    let params = self.parse_params()?;
                    self.expect_punct("=>")?;
                    let body = self.parse_arrow_body()?;
                    Ok(self.make_node(start, NodeKind::ArrowFunctionExpr { params, body }))
                } else {
                    Err(self.unexpected("unsupported parenthesized expression".to_string()))
                }
            }
            _ => Err(self.unexpected(format!("unexpected token `{text}`"))),
        }
    }

    fn parse_function_expression(&mut self, start: usize) -> Result<Node, ParseError> {
        self.pos += 1;
        let name = match self.peek() {
            Some(t) if t.kind == TokenKind::Ident && !is_keyword(&t.text) => {
                let name = t.text.clone();
                self.pos += 1;
                Some(name)
            }
            _ => None,
        };
        let params = self.parse_params()?;
        let body = self.parse_brace_body()?;
        Ok(self.make_node(start, NodeKind::FunctionExpr { name, params, body }))
    }

    fn parse_arrow_body(&mut self) -> Result<ArrowBody, ParseError> {
        if self.is_punct("{") {
            let statements = self.parse_brace_body()?;
            Ok(ArrowBody::Block { statements })
        } else {
            let expression = self.parse_value_expression(&[",", ";"])?;
            Ok(ArrowBody::Expression {
                expression: Box::new(expression),
            })
        }
    }

    fn parse_brace_body(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect_punct("{")?;
        let body = self.parse_statements_until(Some("}"))?;
        self.expect_punct("}")?;
        Ok(body)
    }

    fn parse_params(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect_punct("(")?;
        let mut params = Vec::new();

        loop {
            if self.eat_punct(")") {
                break;
            }
            if self.at_eof() {
                return Err(self.unexpected("unexpected end of input in parameter list".to_string()));
            }
            let text = self.collect_raw_until(&[",", ")"])?;
            if text.is_empty() {
                return Err(self.unexpected("expected a parameter".to_string()));
            }
            params.push(text);
            if !self.eat_punct(",") {
                self.expect_punct(")")?;
                break;
            }
        }

        Ok(params)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect_punct("(")?;
        let mut arguments = Vec::new();

        loop {
            if self.eat_punct(")") {
                break;
            }
            if self.at_eof() {
                return Err(self.unexpected("unexpected end of input in argument list".to_string()));
            }
            arguments.push(self.parse_argument()?);
            if !self.eat_punct(",") {
                self.expect_punct(")")?;
                break;
            }
        }

        Ok(arguments)
    }

    fn parse_argument(&mut self) -> Result<Node, ParseError> {
        let mark = self.pos;
        if let Ok(expr) = self.parse_expression() {
            let bounded = self
                .peek()
                .is_none_or(|t| t.kind == TokenKind::Punct && matches!(t.text.as_str(), "," | ")"));
            if bounded {
                return Ok(expr);
            }
        }

        self.pos = mark;
        let raw_start = self.pos;
        let text = self.collect_raw_until(&[",", ")"])?;
        if self.pos == raw_start {
            return Err(self.unexpected("expected an argument".to_string()));
        }
        Ok(self.make_node(raw_start, NodeKind::UnknownExpr { text }))
    }

    /// Detect `( ... ) =>` from the current `(` without consuming input.
    fn looks_like_arrow_params(&self) -> bool {
        let mut depth = 0usize;
        let mut i = self.pos;

        while let Some(tok) = self.tokens.get(i) {
            if tok.kind == TokenKind::Punct {
                match tok.text.as_str() {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => {
                        if depth == 0 {
                            return false;
                        }
                        depth -= 1;
                        if depth == 0 {
                            if tok.text != ")" {
                                return false;
                            }
                            return self
                                .tokens
                                .get(i + 1)
                                .is_some_and(|t| t.kind == TokenKind::Punct && t.text == "=>");
                        }
                    }
                    _ => {}
                }
            }
            i += 1;
        }

        false
    }

    /// Consume tokens until a depth-zero stop punct (left unconsumed) or an
    /// unmatched closer, tracking bracket depth. Returns normalized text.
    fn collect_raw_until(&mut self, stops: &[&str]) -> Result<String, ParseError> {
        let mut depth = 0usize;
        let mut parts: Vec<String> = Vec::new();

        loop {
            let (kind, text) = match self.peek() {
                Some(t) => (t.kind, t.text.clone()),
                None => {
                    if depth == 0 {
                        return Ok(parts.join(" "));
                    }
                    return Err(self.unexpected("unexpected end of input".to_string()));
                }
            };

            if kind == TokenKind::Punct {
                if depth == 0 && stops.contains(&text.as_str()) {
                    return Ok(parts.join(" "));
                }
                match text.as_str() {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => {
                        if depth == 0 {
                            return Ok(parts.join(" "));
                        }
                        depth -= 1;
                    }
                    _ => {}
                }
            }

            parts.push(text);
            self.pos += 1;
        }
    }
}

fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "function"
            | "let"
            | "const"
            | "var"
            | "return"
            | "if"
            | "else"
            | "for"
            | "while"
            | "do"
            | "switch"
            | "case"
            | "default"
            | "try"
            | "catch"
            | "finally"
            | "class"
            | "extends"
            | "new"
            | "delete"
            | "typeof"
            | "instanceof"
            | "void"
            | "in"
            | "of"
            | "await"
            | "async"
            | "yield"
            | "import"
            | "export"
            | "throw"
            | "break"
            | "continue"
            | "debugger"
            | "with"
            | "super"
    )
}
