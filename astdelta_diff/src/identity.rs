use astdelta_ir::{Node, NodeKind};

/// Derive the stable logical identity for a top-level statement, if any.
///
/// Identity is a cheap syntactic proxy for "the same declaration or call
/// site even if its content changed". It is derived from the node alone,
/// never from sibling context:
///
/// 1. `function foo() {}`        -> `func:foo`
/// 2. `let x = ...;` (one binding) -> `var:x`
/// 3. `app.get('/a', ...);`      -> `call:app.get(/a)`
/// 4. anything else              -> no identity
pub fn identity_of(node: &Node) -> Option<String> {
    match &node.kind {
        NodeKind::FunctionDecl { name, .. } => Some(format!("func:{name}")),
        NodeKind::VariableDecl { declarators, .. } => match declarators.as_slice() {
            [declarator] => Some(format!("var:{}", declarator.name)),
            _ => None,
        },
        NodeKind::ExpressionStmt { expression } => match &expression.kind {
            NodeKind::Call { callee, arguments } => {
                let callee = callee_name(callee);
                let route = arguments.first().map_or_else(
                    || "init".to_string(),
                    |argument| match &argument.kind {
                        NodeKind::Literal { value, .. } => value.clone(),
                        _ => "init".to_string(),
                    },
                );
                Some(format!("call:{callee}({route})"))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Render a callee chain: identifiers by name, member chains dotted,
/// anything else as `anonymous`.
pub(crate) fn callee_name(node: &Node) -> String {
    match &node.kind {
        NodeKind::Identifier { name } => name.clone(),
        NodeKind::Member { object, property } => {
            format!("{}.{}", callee_name(object), callee_name(property))
        }
        _ => "anonymous".to_string(),
    }
}
