use astdelta_ir::{ArrowBody, Node, NodeKind};
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::model::Fingerprint;

/// Hash a node into its position-independent fingerprint.
///
/// The canonical form is produced by an explicit visitor over the node kind
/// payloads, in field declaration order, so two structurally identical nodes
/// at different source offsets always hash the same.
pub fn fingerprint(node: &Node) -> Fingerprint {
    let digest = Sha256::digest(canonical_form(node).as_bytes());
    Fingerprint(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest))
}

pub(crate) fn canonical_form(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match &node.kind {
        NodeKind::FunctionDecl { name, params, body } => {
            out.push_str(&format!("FunctionDeclaration(name={name:?},params="));
            write_params(params, out);
            out.push_str(",body=");
            write_list(body, out);
            out.push(')');
        }
        NodeKind::VariableDecl {
            keyword,
            declarators,
        } => {
            out.push_str(&format!(
                "VariableDeclaration(keyword={},declarators=[",
                keyword.as_str()
            ));
            for (idx, declarator) in declarators.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                out.push_str(&format!("Declarator(name={:?},init=", declarator.name));
                match &declarator.init {
                    Some(init) => {
                        out.push_str("Some(");
                        write_node(init, out);
                        out.push(')');
                    }
                    None => out.push_str("None"),
                }
                out.push(')');
            }
            out.push_str("])");
        }
        NodeKind::ExpressionStmt { expression } => {
            out.push_str("ExpressionStatement(");
            write_node(expression, out);
            out.push(')');
        }
        NodeKind::ReturnStmt { argument } => {
            out.push_str("ReturnStatement(argument=");
            match argument {
                Some(argument) => {
                    out.push_str("Some(");
                    write_node(argument, out);
                    out.push(')');
                }
                None => out.push_str("None"),
            }
            out.push(')');
        }
        NodeKind::UnknownStmt { text } => {
            out.push_str(&format!("UnknownStatement(text={text:?})"));
        }
        NodeKind::Call { callee, arguments } => {
            out.push_str("CallExpression(callee=");
            write_node(callee, out);
            out.push_str(",arguments=");
            write_list(arguments, out);
            out.push(')');
        }
        NodeKind::Identifier { name } => {
            out.push_str(&format!("Identifier(name={name:?})"));
        }
        NodeKind::Member { object, property } => {
            out.push_str("MemberExpression(object=");
            write_node(object, out);
            out.push_str(",property=");
            write_node(property, out);
            out.push(')');
        }
        NodeKind::Literal { raw, value } => {
            out.push_str(&format!("Literal(raw={raw:?},value={value:?})"));
        }
        NodeKind::FunctionExpr { name, params, body } => {
            out.push_str(&format!("FunctionExpression(name={name:?},params="));
            write_params(params, out);
            out.push_str(",body=");
            write_list(body, out);
            out.push(')');
        }
        NodeKind::ArrowFunctionExpr { params, body } => {
            out.push_str("ArrowFunctionExpression(params=");
            write_params(params, out);
            out.push_str(",body=");
            match body {
                ArrowBody::Block { statements } => {
                    out.push_str("Block");
                    write_list(statements, out);
                }
                ArrowBody::Expression { expression } => {
                    out.push_str("Expression(");
                    write_node(expression, out);
                    out.push(')');
                }
            }
            out.push(')');
        }
        NodeKind::UnknownExpr { text } => {
            out.push_str(&format!("UnknownExpression(text={text:?})"));
        }
    }
}

fn write_list(nodes: &[Node], out: &mut String) {
    out.push('[');
    for (idx, node) in nodes.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        write_node(node, out);
    }
    out.push(']');
}

fn write_params(params: &[String], out: &mut String) {
    out.push('[');
    for (idx, param) in params.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(&format!("{param:?}"));
    }
    out.push(']');
}
