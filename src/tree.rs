//! Parse-tree pretty-printing for `--tree` and the REPL `tree on` toggle.

use crate::ast::{Expr, ExprKind, Stmt};
use crate::value::value_to_display;

pub fn render_program(stmts: &[Stmt]) -> String {
    let mut out = String::from("Program\n");
    for (i, stmt) in stmts.iter().enumerate() {
        render_stmt(&mut out, stmt, 1, &format!("Stmt{}: ", i + 1));
    }
    out
}

fn push_line(out: &mut String, level: usize, prefix: &str, label: &str) {
    out.push_str(&"  ".repeat(level));
    out.push_str(prefix);
    out.push_str(label);
    out.push('\n');
}

fn render_stmt(out: &mut String, stmt: &Stmt, level: usize, prefix: &str) {
    match stmt {
        Stmt::Assign { target, value } => {
            push_line(out, level, prefix, "Assign");
            render_expr(out, target, level + 1, "Target: ");
            render_expr(out, value, level + 1, "Value: ");
        }
        Stmt::Print(expr) => {
            push_line(out, level, prefix, "Print");
            render_expr(out, expr, level + 1, "Expr: ");
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            push_line(out, level, prefix, "If");
            render_expr(out, condition, level + 1, "Condition: ");
            render_block(out, then_branch, level + 1, "Then");
            if let Some(else_stmts) = else_branch {
                render_block(out, else_stmts, level + 1, "Else");
            }
        }
        Stmt::While { condition, body } => {
            push_line(out, level, prefix, "While");
            render_expr(out, condition, level + 1, "Condition: ");
            render_block(out, body, level + 1, "Body");
        }
        Stmt::Del(target) => {
            push_line(out, level, prefix, "Del");
            render_expr(out, target, level + 1, "Target: ");
        }
        Stmt::Expr(expr) => {
            push_line(out, level, prefix, "ExprStmt");
            render_expr(out, expr, level + 1, "Expr: ");
        }
    }
}

fn render_block(out: &mut String, stmts: &[Stmt], level: usize, label: &str) {
    push_line(out, level, "", &format!("{}:", label));
    for (i, stmt) in stmts.iter().enumerate() {
        render_stmt(out, stmt, level + 1, &format!("Stmt{}: ", i + 1));
    }
}

fn render_expr(out: &mut String, expr: &Expr, level: usize, prefix: &str) {
    match &expr.kind {
        ExprKind::Literal(value) => {
            push_line(
                out,
                level,
                prefix,
                &format!("Literal({})", value_to_display(value)),
            );
        }
        ExprKind::Var(name) => {
            push_line(out, level, prefix, &format!("Var({})", name));
        }
        ExprKind::List(elements) => {
            push_line(out, level, prefix, &format!("List[{}]", elements.len()));
            for (i, element) in elements.iter().enumerate() {
                render_expr(out, element, level + 1, &format!("Elem{}: ", i + 1));
            }
        }
        ExprKind::Dict(entries) => {
            push_line(out, level, prefix, &format!("Dict[{}]", entries.len()));
            for (key, value) in entries {
                render_expr(out, key, level + 1, "Key: ");
                render_expr(out, value, level + 1, "Value: ");
            }
        }
        ExprKind::Index { target, index } => {
            push_line(out, level, prefix, "Index");
            render_expr(out, target, level + 1, "Target: ");
            render_expr(out, index, level + 1, "Subscript: ");
        }
        ExprKind::Unary { op, operand } => {
            push_line(out, level, prefix, &format!("Unary({})", op.symbol()));
            render_expr(out, operand, level + 1, "Operand: ");
        }
        ExprKind::Binary { left, op, right } => {
            push_line(out, level, prefix, &format!("Binary({})", op.symbol()));
            render_expr(out, left, level + 1, "L: ");
            render_expr(out, right, level + 1, "R: ");
        }
        ExprKind::Call { name, args } => {
            push_line(out, level, prefix, &format!("Call({})", name));
            for (i, arg) in args.iter().enumerate() {
                render_expr(out, arg, level + 1, &format!("Arg{}: ", i + 1));
            }
        }
    }
}
